use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::entities::indicator::IndicatorSeries;
use crate::domain::entities::options::OptionsSurface;
use crate::domain::entities::snapshot::MarketSnapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataSource;

/// On-disk layout of one snapshot file. `symbol` may be left out; the file
/// name decides.
#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    symbol: Option<String>,
    indicators: IndicatorSeries,
    #[serde(default)]
    options: OptionsSurface,
    #[serde(default)]
    gamma_exposure: Option<f64>,
}

/// Reads `<data_dir>/<SYMBOL>.json` snapshots written by a data collector.
pub struct JsonSnapshotSource {
    data_dir: PathBuf,
}

impl JsonSnapshotSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", symbol.to_uppercase()))
    }
}

#[async_trait]
impl MarketDataSource for JsonSnapshotSource {
    fn name(&self) -> &str {
        "json_snapshots"
    }

    async fn snapshot(&self, symbol: &str) -> Result<MarketSnapshot, DomainError> {
        let path = self.path_for(symbol);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DomainError::DataUnavailable(format!(
                    "No market data for {symbol} at {}",
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let file: SnapshotFile = serde_json::from_str(&raw)
            .map_err(|e| DomainError::Parse(format!("{}: {e}", path.display())))?;
        debug!(
            symbol,
            rows = file.indicators.len(),
            path = %path.display(),
            "Loaded snapshot"
        );

        Ok(MarketSnapshot {
            symbol: file
                .symbol
                .map_or_else(|| symbol.to_uppercase(), |s| s.to_uppercase()),
            indicators: file.indicators,
            options: file.options,
            gamma_exposure: file.gamma_exposure,
        })
    }
}
