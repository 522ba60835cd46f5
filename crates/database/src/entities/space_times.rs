use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A bookable room slot, unique per (room_number, day_of_week, time_slot)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "space_times")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub room_number: String, // e.g. "GHC 4102"
    pub day_of_week: String,
    pub room_type: String, // THEORY, LAB
    pub time_slot: i16,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub created_by: String,
    pub updated_by: String,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::section_space_times::Entity")]
    SectionSpaceTimes,
}

impl Related<super::section_space_times::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionSpaceTimes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
