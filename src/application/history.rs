use std::sync::Arc;

use crate::domain::entities::scan_record::ScanRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::scan_repository::{RecordFilter, ScanRepository, ScanRun};

pub struct HistoryUseCase {
    repo: Arc<dyn ScanRepository>,
}

impl HistoryUseCase {
    pub fn new(repo: Arc<dyn ScanRepository>) -> Self {
        Self { repo }
    }

    pub fn records(&self, filter: &RecordFilter) -> Result<Vec<ScanRecord>, DomainError> {
        self.repo.list_records(filter)
    }

    pub fn run(&self, id: &str) -> Result<ScanRun, DomainError> {
        self.repo
            .get_run(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Scan run not found: {id}")))
    }
}
