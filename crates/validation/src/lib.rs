pub mod capacity;
pub mod context;
pub mod course;
pub mod error;
pub mod fields;
pub mod graph;
pub mod notification;
pub mod orchestrator;
pub mod rules;
pub mod schedule;
pub mod snapshot;
pub mod subject;
pub mod trimester;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use capacity::SeatChange;
pub use context::{Clock, Context, FixedClock, Lookup, SystemClock};
pub use error::{FieldViolation, ValidationError};
pub use graph::PrerequisiteGraph;
pub use orchestrator::Validator;
pub use rules::Rules;
pub use snapshot::Snapshot;
