use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub scope: String, // GLOBAL, TRIMESTER, SECTION, USER
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub trimester_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
    /// Either a student or a faculty id, so not a foreign key
    pub target_user_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub created_by: String,
    pub updated_by: String,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::trimesters::Entity",
        from = "Column::TrimesterId",
        to = "super::trimesters::Column::Id"
    )]
    Trimester,
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::Id"
    )]
    Section,
}

impl ActiveModelBehavior for ActiveModel {}
