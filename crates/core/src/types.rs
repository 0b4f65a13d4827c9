/// Projects and files are keyed by random (v4) UUIDs.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Allocate a fresh identifier for a project or file.
pub fn new_id() -> EntityId {
    uuid::Uuid::new_v4()
}
