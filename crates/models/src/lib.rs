pub mod audit;
pub mod course;
pub mod entity;
pub mod notification;
pub mod schedule;
pub mod subject;
pub mod temporal;
pub mod trimester;
pub mod user;

pub use audit::Audit;
pub use entity::{Entity, EntityKind};
