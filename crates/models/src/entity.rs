use crate::{
    audit::Audit,
    course::Course,
    notification::Notification,
    schedule::{Section, SpaceTime},
    subject::{Prerequisite, Subject},
    trimester::Trimester,
    user::{Faculty, Student},
};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, AsRefStr)]
pub enum EntityKind {
    Subject,
    Prerequisite,
    Trimester,
    Section,
    SpaceTime,
    Course,
    Notification,
    Student,
    Faculty,
}

/// Any entity the registrar persists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Subject(Subject),
    Prerequisite(Prerequisite),
    Trimester(Trimester),
    Section(Section),
    SpaceTime(SpaceTime),
    Course(Course),
    Notification(Notification),
    Student(Student),
    Faculty(Faculty),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Subject(_) => EntityKind::Subject,
            Self::Prerequisite(_) => EntityKind::Prerequisite,
            Self::Trimester(_) => EntityKind::Trimester,
            Self::Section(_) => EntityKind::Section,
            Self::SpaceTime(_) => EntityKind::SpaceTime,
            Self::Course(_) => EntityKind::Course,
            Self::Notification(_) => EntityKind::Notification,
            Self::Student(_) => EntityKind::Student,
            Self::Faculty(_) => EntityKind::Faculty,
        }
    }

    pub fn audit(&self) -> &Audit {
        match self {
            Self::Subject(e) => &e.audit,
            Self::Prerequisite(e) => &e.audit,
            Self::Trimester(e) => &e.audit,
            Self::Section(e) => &e.audit,
            Self::SpaceTime(e) => &e.audit,
            Self::Course(e) => &e.audit,
            Self::Notification(e) => &e.audit,
            Self::Student(e) => &e.audit,
            Self::Faculty(e) => &e.audit,
        }
    }

    pub fn audit_mut(&mut self) -> &mut Audit {
        match self {
            Self::Subject(e) => &mut e.audit,
            Self::Prerequisite(e) => &mut e.audit,
            Self::Trimester(e) => &mut e.audit,
            Self::Section(e) => &mut e.audit,
            Self::SpaceTime(e) => &mut e.audit,
            Self::Course(e) => &mut e.audit,
            Self::Notification(e) => &mut e.audit,
            Self::Student(e) => &mut e.audit,
            Self::Faculty(e) => &mut e.audit,
        }
    }
}

macro_rules! impl_from_entity {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Entity {
                fn from(entity: $variant) -> Self {
                    Self::$variant(entity)
                }
            }
        )*
    };
}

impl_from_entity!(
    Subject,
    Prerequisite,
    Trimester,
    Section,
    SpaceTime,
    Course,
    Notification,
    Student,
    Faculty,
);
