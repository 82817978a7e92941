use std::sync::Arc;

use tracing::{info, warn};

use crate::application::pipeline::analyze_snapshot;
use crate::domain::entities::analysis::Analysis;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataSource;

/// Single-symbol analysis. Unlike a scan, degraded context or levels are
/// reported rather than skipped.
pub struct AnalyzeUseCase {
    source: Arc<dyn MarketDataSource>,
}

impl AnalyzeUseCase {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }

    pub async fn execute(&self, symbol: &str) -> Result<Analysis, DomainError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(DomainError::InvalidInput("symbol must not be empty".into()));
        }

        let snapshot = self.source.snapshot(symbol).await?;
        let analysis = analyze_snapshot(&snapshot);
        if !analysis.context.success {
            warn!(symbol, "No indicator history, context is unavailable");
        }
        if !analysis.levels.success {
            warn!(symbol, "No option chains, key levels are unavailable");
        }
        info!(
            symbol,
            setup = %analysis.setup.setup,
            confidence = analysis.setup.confidence.value(),
            "Analysis complete"
        );
        Ok(analysis)
    }
}
