//! tradecost CLI: price commissions and simulated fills.
//!
//! Commands:
//! - `commission`: fee for one order at a given fill price
//! - `fill`: run a CSV batch of orders through slippage and commission
//! - `config`: print the effective cost configuration as TOML
//!
//! Diagnostics (unsupported execution styles, missing prices) are logged
//! through `env_logger`; set `RUST_LOG=debug` to trace every fill.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use tradecost_core::config::CostConfig;
use tradecost_core::domain::{Contract, ExecutionStyle, Order};
use tradecost_core::execution::LogSink;

#[derive(Parser)]
#[command(
    name = "tradecost",
    about = "tradecost CLI: commission and slippage for simulated fills"
)]
struct Cli {
    /// Path to a TOML cost config. Defaults to IB commission with 1 bp slippage.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commission for a single order.
    Commission {
        /// Signed quantity (negative sells).
        #[arg(long, allow_hyphen_values = true)]
        quantity: f64,

        /// Fill price per unit.
        #[arg(long, allow_hyphen_values = true)]
        price: f64,
    },
    /// Simulate fills for a CSV batch and print one JSON transaction per line.
    Fill {
        /// CSV with columns: ticker, quantity, style, style_price, price [, exchange].
        #[arg(long)]
        orders: PathBuf,

        /// Fill time (RFC 3339). Defaults to now.
        #[arg(long)]
        time: Option<String>,
    },
    /// Print the effective configuration.
    Config,
}

/// One CSV row of the `fill` command.
#[derive(Debug, Deserialize)]
struct OrderRow {
    ticker: String,
    quantity: f64,
    style: String,
    style_price: Option<f64>,
    price: Option<f64>,
    #[serde(default)]
    exchange: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Commission { quantity, price } => run_commission(&config, quantity, price),
        Commands::Fill { orders, time } => run_fill(&config, &orders, time),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CostConfig> {
    match path {
        Some(path) => CostConfig::from_file(path)
            .with_context(|| format!("loading cost config from {}", path.display())),
        None => Ok(CostConfig::default()),
    }
}

fn run_commission(config: &CostConfig, quantity: f64, price: f64) -> Result<()> {
    let model = config.commission_model()?;
    let order = Order::market(Contract::equity("CLI", "SMART"), quantity)?;
    let fee = model.calculate_commission(&order, price)?;
    println!("{fee}");
    Ok(())
}

fn run_fill(config: &CostConfig, path: &Path, time: Option<String>) -> Result<()> {
    let time: DateTime<Utc> = match time {
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .with_context(|| format!("invalid --time {s}"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let (orders, prices) = read_orders(path)?;
    let cost = config.build(Arc::new(LogSink))?;
    let transactions = cost.execute(time, &orders, &prices)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for tx in &transactions {
        writeln!(out, "{}", serde_json::to_string(tx)?)?;
    }
    log::info!("{} of {} orders filled", transactions.len(), orders.len());
    Ok(())
}

fn read_orders(path: &Path) -> Result<(Vec<Order>, Vec<f64>)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut orders = Vec::new();
    let mut prices = Vec::new();
    for (line, row) in reader.deserialize::<OrderRow>().enumerate() {
        let row = row.with_context(|| format!("{} row {}", path.display(), line + 1))?;
        let style = parse_style(&row.style, row.style_price)
            .with_context(|| format!("{} row {}", path.display(), line + 1))?;
        let exchange = row.exchange.unwrap_or_else(|| "SMART".to_string());
        orders.push(Order::new(
            Contract::equity(row.ticker, exchange),
            row.quantity,
            style,
        )?);
        prices.push(row.price.unwrap_or(f64::NAN));
    }
    Ok((orders, prices))
}

fn parse_style(style: &str, style_price: Option<f64>) -> Result<ExecutionStyle> {
    Ok(match style.to_ascii_lowercase().as_str() {
        "market" | "mkt" => ExecutionStyle::Market,
        "stop" | "stp" => match style_price {
            Some(stop_price) => ExecutionStyle::Stop { stop_price },
            None => bail!("stop order needs style_price"),
        },
        "limit" | "lmt" => match style_price {
            Some(limit_price) => ExecutionStyle::Limit { limit_price },
            None => bail!("limit order needs style_price"),
        },
        _ => ExecutionStyle::Other {
            name: style.to_string(),
        },
    })
}
