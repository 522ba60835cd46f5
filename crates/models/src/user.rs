use crate::audit::Audit;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Student,
    Teacher,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub audit: Audit,
    pub university_id: i64,
    pub name: String,
    pub email: String,
}

/// Teaching or administrative staff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    pub audit: Audit,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
}

impl Faculty {
    pub fn can_teach(&self) -> bool {
        self.user_type == UserType::Teacher
    }
}
