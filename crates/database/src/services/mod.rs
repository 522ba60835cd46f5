pub mod snapshot;
pub mod write;

pub use snapshot::SnapshotService;
pub use write::WriteService;
