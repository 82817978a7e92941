//! Batch scan over many symbols.

use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::filters::ScanFilters;
use crate::application::pipeline::analyze_snapshot;
use crate::domain::entities::scan_record::ScanRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataSource;
use crate::domain::ports::result_export::ResultExporter;
use crate::domain::ports::scan_repository::{ScanRepository, ScanRun};
use crate::domain::values::bias::Bias;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub symbols_requested: usize,
    /// Symbols that made it through the whole pipeline, filtered or not.
    pub symbols_analyzed: usize,
    pub symbols_failed: usize,
    /// Records that passed the filters, highest confidence first.
    pub results: Vec<ScanRecord>,
    pub output_file: Option<PathBuf>,
}

impl ScanReport {
    /// Records whose setup leans `bias`, weak variants included.
    pub fn setups(&self, bias: Bias) -> Vec<&ScanRecord> {
        self.results.iter().filter(|r| r.bias() == bias).collect()
    }

    pub fn bullish_setups(&self) -> Vec<&ScanRecord> {
        self.setups(Bias::Bullish)
    }

    pub fn bearish_setups(&self) -> Vec<&ScanRecord> {
        self.setups(Bias::Bearish)
    }

    pub fn neutral_setups(&self) -> Vec<&ScanRecord> {
        self.setups(Bias::Neutral)
    }

    pub fn entry_signals(&self) -> Vec<&ScanRecord> {
        self.results.iter().filter(|r| r.entry_signal).collect()
    }

    fn to_run(&self) -> ScanRun {
        ScanRun {
            id: self.run_id.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at,
            symbols_requested: self.symbols_requested,
            symbols_analyzed: self.symbols_analyzed,
            symbols_failed: self.symbols_failed,
            setups_found: self.results.len(),
            output_file: self
                .output_file
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }
}

enum SymbolOutcome {
    /// Analyzed; `None` when the filters rejected it.
    Analyzed(Option<ScanRecord>),
    Skipped,
}

pub struct ScanUseCase {
    source: Arc<dyn MarketDataSource>,
    repo: Arc<dyn ScanRepository>,
    exporter: Arc<dyn ResultExporter>,
    max_workers: usize,
}

impl ScanUseCase {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        repo: Arc<dyn ScanRepository>,
        exporter: Arc<dyn ResultExporter>,
        max_workers: usize,
    ) -> Self {
        Self {
            source,
            repo,
            exporter,
            max_workers: max_workers.max(1),
        }
    }

    pub async fn execute(
        &self,
        symbols: &[String],
        filters: &ScanFilters,
    ) -> Result<ScanReport, DomainError> {
        let started_at = Utc::now();
        info!(
            symbols = symbols.len(),
            source = self.source.name(),
            "Starting scan"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut tasks = JoinSet::new();
        for symbol in symbols {
            let semaphore = Arc::clone(&semaphore);
            let source = Arc::clone(&self.source);
            let filters = filters.clone();
            let symbol = symbol.clone();

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return Err((symbol, DomainError::Io("scan worker pool closed".into())));
                };
                match analyze_symbol(source.as_ref(), &symbol, &filters).await {
                    Ok(outcome) => Ok((symbol, outcome)),
                    Err(e) => Err((symbol, e)),
                }
            });
        }

        let mut results = Vec::new();
        let mut analyzed = 0;
        let mut failed = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok((symbol, SymbolOutcome::Analyzed(record)))) => {
                    analyzed += 1;
                    if let Some(record) = record {
                        info!(
                            symbol = %symbol,
                            setup = %record.setup,
                            confidence = record.confidence,
                            "Found setup"
                        );
                        results.push(record);
                    }
                }
                Ok(Ok((_, SymbolOutcome::Skipped))) => failed += 1,
                Ok(Err((symbol, e))) => {
                    error!(symbol = %symbol, error = %e, "Error analyzing symbol");
                    failed += 1;
                }
                Err(e) => {
                    error!(error = %e, "Scan task failed");
                    failed += 1;
                }
            }
        }

        sort_results(&mut results);
        let finished_at = Utc::now();
        info!(setups = results.len(), "Scan complete");

        let output_file = match self.exporter.export(&results, finished_at).await {
            Ok(path) => path,
            Err(e) => {
                error!(error = %e, "Error saving results");
                None
            }
        };

        let report = ScanReport {
            run_id: Uuid::new_v4().to_string(),
            started_at,
            finished_at,
            symbols_requested: symbols.len(),
            symbols_analyzed: analyzed,
            symbols_failed: failed,
            results,
            output_file,
        };
        self.repo.save_run(&report.to_run(), &report.results)?;
        Ok(report)
    }
}

async fn analyze_symbol(
    source: &dyn MarketDataSource,
    symbol: &str,
    filters: &ScanFilters,
) -> Result<SymbolOutcome, DomainError> {
    info!(symbol, "Analyzing");
    let snapshot = source.snapshot(symbol).await?;
    let analysis = analyze_snapshot(&snapshot);

    if !analysis.context.success {
        warn!(symbol, "Failed to analyze market context");
        return Ok(SymbolOutcome::Skipped);
    }
    if !analysis.levels.success {
        warn!(symbol, "Failed to map key levels");
        return Ok(SymbolOutcome::Skipped);
    }

    let record = ScanRecord::from_analysis(&analysis, Utc::now());
    Ok(SymbolOutcome::Analyzed(
        filters.passes(&record).then_some(record),
    ))
}

/// Confidence descending, then symbol so completion order never leaks through.
fn sort_results(results: &mut [ScanRecord]) {
    results.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
}
