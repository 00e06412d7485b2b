/// All backend identifiers are 64-bit integers.
pub type Id = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
