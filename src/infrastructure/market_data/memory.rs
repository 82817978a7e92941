use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::entities::snapshot::MarketSnapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataSource;

/// Snapshots held in memory, keyed by upper-cased symbol.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    snapshots: HashMap<String, MarketSnapshot>,
}

impl StaticSource {
    pub fn new(snapshots: impl IntoIterator<Item = MarketSnapshot>) -> Self {
        let mut source = Self::default();
        for snapshot in snapshots {
            source.insert(snapshot);
        }
        source
    }

    pub fn insert(&mut self, snapshot: MarketSnapshot) {
        self.snapshots
            .insert(snapshot.symbol.to_uppercase(), snapshot);
    }
}

#[async_trait]
impl MarketDataSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn snapshot(&self, symbol: &str) -> Result<MarketSnapshot, DomainError> {
        self.snapshots
            .get(&symbol.to_uppercase())
            .cloned()
            .ok_or_else(|| DomainError::DataUnavailable(format!("No market data for {symbol}")))
    }
}
