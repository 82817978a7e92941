use rusqlite::Connection;

use crate::domain::error::DomainError;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS scan_runs (
            id TEXT PRIMARY KEY,
            started_at TEXT NOT NULL,
            finished_at TEXT NOT NULL,
            symbols_requested INTEGER NOT NULL,
            symbols_analyzed INTEGER NOT NULL,
            symbols_failed INTEGER NOT NULL,
            setups_found INTEGER NOT NULL,
            output_file TEXT
        );

        CREATE TABLE IF NOT EXISTS scan_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            run_id TEXT NOT NULL REFERENCES scan_runs(id),
            symbol TEXT NOT NULL,
            setup TEXT NOT NULL,
            bias TEXT NOT NULL,
            confidence REAL NOT NULL,
            entry_signal INTEGER NOT NULL DEFAULT 0,
            recorded_at TEXT NOT NULL,
            record TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_run ON scan_records(run_id);
        CREATE INDEX IF NOT EXISTS idx_records_symbol ON scan_records(symbol);
        CREATE INDEX IF NOT EXISTS idx_records_bias ON scan_records(bias);
        CREATE INDEX IF NOT EXISTS idx_records_recorded ON scan_records(recorded_at);
        ",
    )
    .map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
