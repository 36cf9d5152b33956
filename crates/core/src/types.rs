/// Entity identifiers are opaque strings. Post ids may be supplied by the
/// caller (to correlate with a client-side placeholder); share and user ids
/// are generated server-side.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
