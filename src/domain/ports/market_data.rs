use async_trait::async_trait;

use crate::domain::entities::snapshot::MarketSnapshot;
use crate::domain::error::DomainError;

/// Supplies price/indicator history and option chains for a symbol.
///
/// Implementations do all blocking work; the analysis pipeline only sees
/// the returned [`MarketSnapshot`].
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    async fn snapshot(&self, symbol: &str) -> Result<MarketSnapshot, DomainError>;
}
