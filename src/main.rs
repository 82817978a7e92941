use clap::Parser;
use hybridscan::cli::commands::{normalize_symbols, parse_date, Cli, Commands};
use hybridscan::config::{ScannerConfig, DEFAULT_CONFIG_PATH, DEFAULT_DB_PATH};
use hybridscan::domain::ports::scan_repository::RecordFilter;
use hybridscan::domain::values::bias::Bias;
use hybridscan::HybridScan;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hybridscan=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("HYBRIDSCAN_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.into());
    let db_path = std::env::var("HYBRIDSCAN_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.into());

    let config = ScannerConfig::load(&config_path);
    let hs = match HybridScan::new(&db_path, config) {
        Ok(hs) => hs,
        Err(e) => {
            eprintln!("Error initializing hybridscan: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(hs, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(hs: HybridScan, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Analyze { symbol } => {
            let analysis = hs.analyze(&symbol.to_uppercase()).await?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Commands::Scan {
            symbols,
            min_confidence,
        } => {
            let symbols = match symbols {
                Some(raw) => normalize_symbols(&raw),
                None => hs.config().resolve_symbols(),
            };
            let mut filters = hs.config().filters.clone();
            if let Some(min) = min_confidence {
                filters.min_confidence = min;
            }

            let report = hs.scan_with(&symbols, &filters).await?;
            for r in &report.results {
                let entry = if r.entry_signal { " ENTRY" } else { "" };
                println!(
                    "{:<6} {:<14} {:>5.1}%  price {:.2}  stop {:.2}  target {:.2}  R/R {:.2}{entry}",
                    r.symbol,
                    r.setup.to_string(),
                    r.confidence,
                    r.current_price,
                    r.stop_loss,
                    r.target_price,
                    r.risk_reward,
                );
            }
            println!(
                "Scanned {} symbols: {} analyzed, {} failed, {} setups ({} bullish, {} bearish, {} neutral, {} with entry signals)",
                report.symbols_requested,
                report.symbols_analyzed,
                report.symbols_failed,
                report.results.len(),
                report.bullish_setups().len(),
                report.bearish_setups().len(),
                report.neutral_setups().len(),
                report.entry_signals().len(),
            );
            if let Some(path) = &report.output_file {
                println!("Results saved to {}", path.display());
            }
        }
        Commands::History {
            symbol,
            bias,
            entry_only,
            since,
            limit,
        } => {
            let bias: Option<Bias> = bias.map(|b| b.parse()).transpose().map_err(|e: String| e)?;
            let records = hs.history(&RecordFilter {
                symbol,
                bias,
                entry_only,
                since: parse_date(&since)?,
                limit: Some(limit),
            })?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(hs.config())?);
        }
    }
    Ok(())
}
