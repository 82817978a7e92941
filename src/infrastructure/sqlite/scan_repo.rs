use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use std::sync::Mutex;

use crate::domain::entities::scan_record::ScanRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::scan_repository::*;

/// Scan history in SQLite. Each record row keeps the full record JSON next
/// to a few indexed columns used for filtering.
pub struct SqliteScanRepo {
    conn: Mutex<Connection>,
}

/// Fixed-width UTC timestamps so text comparison matches time order.
fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::Parse(format!("Invalid timestamp '{s}': {e}")))
}

impl SqliteScanRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl ScanRepository for SqliteScanRepo {
    fn save_run(&self, run: &ScanRun, records: &[ScanRecord]) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(format!("Failed to begin transaction: {e}")))?;

        tx.execute(
            "INSERT INTO scan_runs (id, started_at, finished_at, symbols_requested, symbols_analyzed, symbols_failed, setups_found, output_file)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                run.id,
                timestamp(&run.started_at),
                timestamp(&run.finished_at),
                run.symbols_requested as i64,
                run.symbols_analyzed as i64,
                run.symbols_failed as i64,
                run.setups_found as i64,
                run.output_file,
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save scan run: {e}")))?;

        for record in records {
            let json = serde_json::to_string(record)?;
            tx.execute(
                "INSERT INTO scan_records (run_id, symbol, setup, bias, confidence, entry_signal, recorded_at, record)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    run.id,
                    record.symbol.to_uppercase(),
                    record.setup.to_string(),
                    record.bias().as_str(),
                    record.confidence,
                    record.entry_signal as i32,
                    timestamp(&record.timestamp),
                    json,
                ],
            )
            .map_err(|e| DomainError::Database(format!("Failed to save scan record: {e}")))?;
        }

        tx.commit()
            .map_err(|e| DomainError::Database(format!("Failed to commit scan run: {e}")))
    }

    fn get_run(&self, id: &str) -> Result<Option<ScanRun>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT id, started_at, finished_at, symbols_requested, symbols_analyzed, symbols_failed, setups_found, output_file
                 FROM scan_runs WHERE id = ?1",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query(params![id])
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let started: String = row.get(1)?;
        let finished: String = row.get(2)?;
        Ok(Some(ScanRun {
            id: row.get(0)?,
            started_at: parse_timestamp(&started)?,
            finished_at: parse_timestamp(&finished)?,
            symbols_requested: row.get::<_, i64>(3)? as usize,
            symbols_analyzed: row.get::<_, i64>(4)? as usize,
            symbols_failed: row.get::<_, i64>(5)? as usize,
            setups_found: row.get::<_, i64>(6)? as usize,
            output_file: row.get(7)?,
        }))
    }

    fn list_records(&self, filter: &RecordFilter) -> Result<Vec<ScanRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = String::from("SELECT record FROM scan_records WHERE 1=1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(symbol) = &filter.symbol {
            sql.push_str(&format!(" AND symbol = ?{}", param_values.len() + 1));
            param_values.push(Box::new(symbol.to_uppercase()));
        }
        if let Some(bias) = filter.bias {
            sql.push_str(&format!(" AND bias = ?{}", param_values.len() + 1));
            param_values.push(Box::new(bias.as_str()));
        }
        if filter.entry_only {
            sql.push_str(" AND entry_signal = 1");
        }
        if let Some(since) = &filter.since {
            sql.push_str(&format!(" AND recorded_at >= ?{}", param_values.len() + 1));
            param_values.push(Box::new(timestamp(since)));
        }
        sql.push_str(" ORDER BY recorded_at DESC, id DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT ?{}", param_values.len() + 1));
            param_values.push(Box::new(limit as i64));
        }

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let raw: Vec<String> = stmt
            .query_map(params_refs.as_slice(), |row| row.get(0))
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<_, _>>()?;

        raw.iter()
            .map(|json| serde_json::from_str(json).map_err(DomainError::from))
            .collect()
    }
}
