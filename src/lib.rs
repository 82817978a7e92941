pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::analyze::AnalyzeUseCase;
use crate::application::filters::ScanFilters;
use crate::application::history::HistoryUseCase;
use crate::application::scan::{ScanReport, ScanUseCase};
use crate::config::ScannerConfig;
use crate::domain::entities::analysis::Analysis;
use crate::domain::entities::scan_record::ScanRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataSource;
use crate::domain::ports::result_export::ResultExporter;
use crate::domain::ports::scan_repository::{RecordFilter, ScanRepository, ScanRun};
use crate::infrastructure::export::json_file::{JsonFileExporter, NoExport};
use crate::infrastructure::market_data::json_files::JsonSnapshotSource;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::scan_repo::SqliteScanRepo;
use rusqlite::Connection;
use std::sync::Arc;

pub struct HybridScan {
    config: ScannerConfig,
    analyze_uc: AnalyzeUseCase,
    scan_uc: ScanUseCase,
    history_uc: HistoryUseCase,
}

impl HybridScan {
    /// Snapshots come from `config.data_dir`.
    pub fn new(db_path: &str, config: ScannerConfig) -> Result<Self, DomainError> {
        let source: Arc<dyn MarketDataSource> =
            Arc::new(JsonSnapshotSource::new(config.data_dir.clone()));
        Self::with_providers(db_path, source, config)
    }

    pub fn with_providers(
        db_path: &str,
        source: Arc<dyn MarketDataSource>,
        config: ScannerConfig,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        let repo: Arc<dyn ScanRepository> = Arc::new(SqliteScanRepo::new(conn));
        let exporter: Arc<dyn ResultExporter> = if config.output_dir.as_os_str().is_empty() {
            Arc::new(NoExport)
        } else {
            Arc::new(JsonFileExporter::new(config.output_dir.clone()))
        };

        Ok(Self {
            analyze_uc: AnalyzeUseCase::new(source.clone()),
            scan_uc: ScanUseCase::new(source, repo.clone(), exporter, config.max_workers),
            history_uc: HistoryUseCase::new(repo),
            config,
        })
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub async fn analyze(&self, symbol: &str) -> Result<Analysis, DomainError> {
        self.analyze_uc.execute(symbol).await
    }

    /// Scans the configured symbols with the configured filters.
    pub async fn scan(&self) -> Result<ScanReport, DomainError> {
        let symbols = self.config.resolve_symbols();
        self.scan_uc.execute(&symbols, &self.config.filters).await
    }

    pub async fn scan_with(
        &self,
        symbols: &[String],
        filters: &ScanFilters,
    ) -> Result<ScanReport, DomainError> {
        self.scan_uc.execute(symbols, filters).await
    }

    pub fn history(&self, filter: &RecordFilter) -> Result<Vec<ScanRecord>, DomainError> {
        self.history_uc.records(filter)
    }

    pub fn scan_run(&self, id: &str) -> Result<ScanRun, DomainError> {
        self.history_uc.run(id)
    }
}
