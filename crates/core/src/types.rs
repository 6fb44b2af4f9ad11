/// All entity primary keys are client-generated UUIDs.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (birth dates, release dates) carry no time zone.
pub type Date = chrono::NaiveDate;

/// Generate a new time-ordered identifier for an entity about to be staged.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}
