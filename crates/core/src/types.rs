/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts are whole currency units (no fractional part).
///
/// Catering quotes in this market are priced in whole units, so integer
/// arithmetic is exact and avoids floating-point drift in derived fields.
pub type Money = i64;
