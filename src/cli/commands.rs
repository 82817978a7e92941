use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hybridscan", about = "Options/technical hybrid trade setup scanner")]
pub struct Cli {
    /// Scanner configuration file (defaults to $HYBRIDSCAN_CONFIG or config.json)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full analysis of one symbol
    Analyze {
        symbol: String,
    },
    /// Scan symbols for setups
    Scan {
        /// Comma-separated symbols, overriding the configured list
        #[arg(long, value_delimiter = ',')]
        symbols: Option<Vec<String>>,
        /// Minimum setup confidence (0-100)
        #[arg(long)]
        min_confidence: Option<f64>,
    },
    /// Stored scan records, newest first
    History {
        #[arg(long)]
        symbol: Option<String>,
        /// bullish, bearish or neutral (weak setups included)
        #[arg(long)]
        bias: Option<String>,
        /// Only records with an entry signal
        #[arg(long)]
        entry_only: bool,
        /// YYYY-MM-DD or RFC3339
        #[arg(long)]
        since: Option<String>,
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Print the effective configuration
    Config,
}

pub fn parse_date(s: &Option<String>) -> Result<Option<DateTime<Utc>>, String> {
    match s {
        None => Ok(None),
        Some(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Ok(Some(dt.with_timezone(&Utc)));
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Ok(date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()));
            }
            Err(format!("Invalid date format: {s}. Use YYYY-MM-DD or RFC3339"))
        }
    }
}

/// Splits, trims and upper-cases symbols, dropping empty entries.
pub fn normalize_symbols(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}
