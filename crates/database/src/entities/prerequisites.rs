use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Directed edge: `subject_id` requires `required_subject_id`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prerequisites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub subject_id: Uuid,
    pub required_subject_id: Uuid,
    #[sea_orm(column_type = "Float")]
    pub min_grade: f32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub created_by: String,
    pub updated_by: String,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::RequiredSubjectId",
        to = "super::subjects::Column::Id"
    )]
    RequiredSubject,
}

impl ActiveModelBehavior for ActiveModel {}
