use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub subject_id: Uuid,
    pub trimester_id: Uuid,
    pub max_capacity: i32,
    pub current_capacity: i32,
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
        belongs_to = "super::trimesters::Entity",
        from = "Column::TrimesterId",
        to = "super::trimesters::Column::Id"
    )]
    Trimester,
    #[sea_orm(has_many = "super::section_space_times::Entity")]
    SectionSpaceTimes,
    #[sea_orm(has_many = "super::section_teachers::Entity")]
    SectionTeachers,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::trimesters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trimester.def()
    }
}

impl Related<super::section_space_times::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionSpaceTimes.def()
    }
}

impl Related<super::section_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionTeachers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
