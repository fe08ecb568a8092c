pub mod snapshot;

pub use snapshot::{SnapshotAccess, SnapshotCollection, SnapshotDriver};
