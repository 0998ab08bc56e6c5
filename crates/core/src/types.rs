/// Primary keys for users, projects, and members are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Tasks and comments carry UUID v7 identifiers minted by the board model.
pub type EntityUuid = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
