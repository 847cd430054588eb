
/// Whether a Postgres instance was provided for this test run.
pub fn db_available() -> bool {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return false;
    }
    std::env::var("DATABASE_URL").is_ok()
}
