/// Primary keys are UUID v4 values carried as their hyphenated text form.
///
/// PostgreSQL stores them in a native `UUID` column, SQLite in `TEXT`.
pub type RecordId = String;

/// Generate a fresh random record identifier.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::new_v4().to_string()
}
