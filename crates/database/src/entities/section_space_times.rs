use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction table between sections and the space times they occupy.
///
/// `trimester_id` is copied from the section so the store can keep a space
/// time booked at most once per trimester.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "section_space_times")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub section_id: Uuid,
    pub space_time_id: Uuid,
    pub trimester_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::Id"
    )]
    Section,
    #[sea_orm(
        belongs_to = "super::space_times::Entity",
        from = "Column::SpaceTimeId",
        to = "super::space_times::Column::Id"
    )]
    SpaceTime,
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::space_times::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpaceTime.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
