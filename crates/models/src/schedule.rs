use crate::audit::Audit;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::RangeInclusive,
};
use strum::{AsRefStr, EnumIter, EnumProperty, EnumString};
use uuid::Uuid;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    AsRefStr,
    EnumProperty,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    #[strum(props(short = "M"))]
    Monday,
    #[strum(props(short = "T"))]
    Tuesday,
    #[strum(props(short = "W"))]
    Wednesday,
    #[strum(props(short = "R"))]
    Thursday,
    #[strum(props(short = "F"))]
    Friday,
    #[strum(props(short = "S"))]
    Saturday,
    #[strum(props(short = "U"))]
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Single letter used in printed timetables
    pub fn short(&self) -> &'static str {
        self.get_str("short").unwrap_or_default()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Theory,
    Lab,
}

impl RoomType {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Time slots a room of this type is bookable in; labs run double-length periods
    pub fn slot_range(&self) -> RangeInclusive<i16> {
        match self {
            Self::Theory => 1..=6,
            Self::Lab => 1..=3,
        }
    }
}

/// The (room, day, slot) triple that must be unique across space-time rows
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SlotKey {
    pub room_number: String,
    pub day_of_week: DayOfWeek,
    pub time_slot: i16,
}

impl Display for SlotKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "room {} on {} slot {}",
            self.room_number,
            self.day_of_week.short(),
            self.time_slot
        )
    }
}

/// A bookable (room, day-of-week, time-slot) unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceTime {
    pub audit: Audit,
    pub room_number: String,
    pub day_of_week: DayOfWeek,
    pub room_type: RoomType,
    pub time_slot: Option<i16>,
}

impl SpaceTime {
    pub fn slot_key(&self) -> Option<SlotKey> {
        Some(SlotKey {
            room_number: self.room_number.clone(),
            day_of_week: self.day_of_week,
            time_slot: self.time_slot?,
        })
    }
}

/// A scheduled offering of a subject within a trimester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub audit: Audit,
    pub subject_id: Option<Uuid>,
    pub trimester_id: Option<Uuid>,
    pub max_capacity: i32,
    pub current_capacity: i32,
    pub space_time_ids: Vec<Uuid>,
    pub teacher_ids: Vec<Uuid>,
}

impl Section {
    pub fn is_full(&self) -> bool {
        self.current_capacity >= self.max_capacity
    }

    pub fn uses(&self, space_time_id: Uuid) -> bool {
        self.space_time_ids.contains(&space_time_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_day_of_week_from_str() {
        assert_eq!(DayOfWeek::from_str("THURSDAY").unwrap(), DayOfWeek::Thursday);
        assert!(DayOfWeek::from_str("R").is_err());
    }

    #[test]
    fn test_day_of_week_short() {
        assert_eq!(DayOfWeek::Monday.short(), "M");
        assert_eq!(DayOfWeek::Thursday.short(), "R");
        assert_eq!(DayOfWeek::Sunday.short(), "U");
    }

    #[test]
    fn test_slot_range() {
        assert!(RoomType::Theory.slot_range().contains(&6));
        assert!(!RoomType::Theory.slot_range().contains(&7));
        assert!(RoomType::Lab.slot_range().contains(&3));
        assert!(!RoomType::Lab.slot_range().contains(&4));
    }

    #[test]
    fn test_slot_key_display() {
        let key = SlotKey {
            room_number: "GHC 4102".to_string(),
            day_of_week: DayOfWeek::Wednesday,
            time_slot: 2,
        };

        assert_eq!(key.to_string(), "room GHC 4102 on W slot 2");
    }
}
