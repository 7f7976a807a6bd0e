//! Command-line interface for stock-pulse

mod render;

use clap::Parser;
use pulse_core::{AnalysisPipeline, PulseConfig};
use pulse_market::LookbackPeriod;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "stock-pulse")]
#[command(about = "Analyze stocks with AI-generated recommendations", long_about = None)]
struct Args {
    /// Stock ticker symbols to analyze (e.g., AAPL MSFT GOOGL)
    #[arg(required = true)]
    tickers: Vec<String>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Lookback period for the return calculation (e.g. 1y, 6mo, ytd)
    #[arg(long, default_value = "1y")]
    period: String,

    /// Chat model to use
    #[arg(long)]
    model: Option<String>,
}

fn init_tracing() {
    // Logs go to stderr so --json output stays pipeable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    let period: LookbackPeriod = args.period.parse()?;
    let mut config = PulseConfig::from_env().with_lookback(period);
    if let Some(model) = args.model {
        config = config.with_model(model);
    }

    if config.validate().is_err() {
        eprintln!("Error: OPENAI_API_KEY environment variable is not set.");
        eprintln!("Please set it in a .env file or export it in your shell.");
        std::process::exit(1);
    }

    let tickers: Vec<String> = args
        .tickers
        .iter()
        .map(|t| t.trim().to_uppercase())
        .collect();

    let pipeline = AnalysisPipeline::from_config(config)?;

    if !args.json {
        render::print_banner();
    }
    info!("Analyzing {} stocks", tickers.len());
    let report = pipeline.run(&tickers).await;

    if args.json {
        println!("{}", render::to_json_document(&report)?);
    } else {
        render::print_report(&report);
    }

    Ok(())
}
