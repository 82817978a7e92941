use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::scan_record::ScanRecord;
use crate::domain::error::DomainError;

/// Destination for the records of a finished scan.
#[async_trait]
pub trait ResultExporter: Send + Sync {
    /// Returns where the records went, or `None` when nothing was written.
    async fn export(
        &self,
        records: &[ScanRecord],
        finished_at: DateTime<Utc>,
    ) -> Result<Option<PathBuf>, DomainError>;
}
