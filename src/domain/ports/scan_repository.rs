use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::scan_record::ScanRecord;
use crate::domain::error::DomainError;
use crate::domain::values::bias::Bias;

/// Bookkeeping for one scanner run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRun {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub symbols_requested: usize,
    pub symbols_analyzed: usize,
    pub symbols_failed: usize,
    pub setups_found: usize,
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub symbol: Option<String>,
    pub bias: Option<Bias>,
    pub entry_only: bool,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

pub trait ScanRepository: Send + Sync {
    fn save_run(&self, run: &ScanRun, records: &[ScanRecord]) -> Result<(), DomainError>;
    fn get_run(&self, id: &str) -> Result<Option<ScanRun>, DomainError>;
    fn list_records(&self, filter: &RecordFilter) -> Result<Vec<ScanRecord>, DomainError>;
}
