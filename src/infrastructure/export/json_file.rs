use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::entities::scan_record::ScanRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::result_export::ResultExporter;

/// Writes `scan_results_<YYYYmmdd_HHMMSS>.json` into the output directory.
pub struct JsonFileExporter {
    output_dir: PathBuf,
}

impl JsonFileExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn file_name(finished_at: DateTime<Utc>) -> String {
        format!("scan_results_{}.json", finished_at.format("%Y%m%d_%H%M%S"))
    }
}

#[async_trait]
impl ResultExporter for JsonFileExporter {
    async fn export(
        &self,
        records: &[ScanRecord],
        finished_at: DateTime<Utc>,
    ) -> Result<Option<PathBuf>, DomainError> {
        if records.is_empty() {
            warn!("No results to save");
            return Ok(None);
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(Self::file_name(finished_at));
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&path, json).await?;
        info!(path = %path.display(), records = records.len(), "Results saved");
        Ok(Some(path))
    }
}

/// Exporter for runs that should only land in the history database.
pub struct NoExport;

#[async_trait]
impl ResultExporter for NoExport {
    async fn export(
        &self,
        _records: &[ScanRecord],
        _finished_at: DateTime<Utc>,
    ) -> Result<Option<PathBuf>, DomainError> {
        Ok(None)
    }
}
