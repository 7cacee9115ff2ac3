/// Primary key of every table (`BIGSERIAL`). User ids come from the JWT
/// `sub` claim and share the type.
pub type DbId = i64;

/// Stored as `TIMESTAMPTZ`, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
