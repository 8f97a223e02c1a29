//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::console_adapter::{ConsoleSpeaker, LineTranscriber};
use crate::adapters::csv_adapter::CsvHistoryAdapter;
use crate::adapters::document_adapter::CsvDocumentAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::quote_adapter::LastCloseQuoteAdapter;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, BacktestResult};
use crate::domain::config_validation::validate_config;
use crate::domain::error::SigtraderError;
use crate::domain::indicator::compute_indicators;
use crate::domain::ohlcv::Interval;
use crate::domain::portfolio::Portfolio;
use crate::domain::risk::{DEFAULT_HISTORY_DAYS, RiskConfig, RiskProfile, analyze_portfolio};
use crate::domain::selector::SelectorConfig;
use crate::domain::signal::{Signal, latest_signal};
use crate::domain::universe::{parse_holdings, parse_symbols};
use crate::logging;
use crate::ports::config_port::ConfigPort;
use crate::ports::history_port::HistoryPort;
use crate::shell::Shell;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_HOLDINGS: &str = "AAPL:10,MSFT:5";
/// Daily bars requested for recommend and backtest.
pub const DEFAULT_BAR_LOOKBACK_DAYS: u32 = 365;

#[derive(Parser, Debug)]
#[command(name = "sigtrader", about = "Technical-signal trading assistant")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the latest Buy/Sell/Hold recommendation for a symbol
    Recommend {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: String,
    },
    /// Backtest the signal rule on a symbol's daily history
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: String,
    },
    /// Analyze portfolio risk and suggest the next trade
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Interactive command loop for one symbol
    Shell {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let _log_guard = logging::init(cli.verbose);

    let result = match cli.command {
        Command::Recommend { config, symbol } => run_recommend(&config, &symbol),
        Command::Backtest { config, symbol } => run_backtest(&config, &symbol),
        Command::Analyze { config } => run_analyze(&config),
        Command::Shell { config, symbol } => run_shell(&config, &symbol),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, SigtraderError> {
    let adapter = FileConfigAdapter::from_file(path)?;
    validate_config(&adapter)?;
    Ok(adapter)
}

pub fn data_dir(config: &dyn ConfigPort) -> PathBuf {
    PathBuf::from(
        config
            .get_string("data", "dir")
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
    )
}

pub fn bar_lookback_days(config: &dyn ConfigPort) -> u32 {
    config.get_positive_u32("data", "lookback_days", DEFAULT_BAR_LOOKBACK_DAYS)
}

pub fn build_backtest_config(config: &dyn ConfigPort) -> BacktestConfig {
    let defaults = BacktestConfig::default();
    BacktestConfig {
        slippage: config.get_double("backtest", "slippage", defaults.slippage),
        transaction_cost: config.get_double(
            "backtest",
            "transaction_cost",
            defaults.transaction_cost,
        ),
        rsi_period: config.get_positive_u32("backtest", "rsi_period", defaults.rsi_period as u32)
            as usize,
        sma_period: config.get_positive_u32("backtest", "sma_period", defaults.sma_period as u32)
            as usize,
    }
}

pub fn build_risk_config(config: &dyn ConfigPort) -> RiskConfig {
    RiskConfig {
        history_days: config.get_positive_u32("portfolio", "history_days", DEFAULT_HISTORY_DAYS),
    }
}

fn selector_bonus(config: &dyn ConfigPort, key: &str, default: i32) -> Result<i32, SigtraderError> {
    let raw = config.get_int("selector", key, i64::from(default));
    i32::try_from(raw)
        .ok()
        .filter(|bonus| *bonus >= 0)
        .ok_or_else(|| {
            SigtraderError::config_invalid(
                "selector",
                key,
                format!("{key} must be between 0 and {}", i32::MAX),
            )
        })
}

pub fn build_selector_config(config: &dyn ConfigPort) -> Result<SelectorConfig, SigtraderError> {
    let defaults = SelectorConfig::default();
    let universe = match config.get_string("selector", "universe") {
        Some(raw) => parse_symbols(&raw)
            .map_err(|e| SigtraderError::config_invalid("selector", "universe", e.to_string()))?,
        None => defaults.universe,
    };

    Ok(SelectorConfig {
        universe,
        low_bonus: selector_bonus(config, "low_bonus", defaults.low_bonus)?,
        high_bonus: selector_bonus(config, "high_bonus", defaults.high_bonus)?,
        lookback_days: config.get_positive_u32("selector", "lookback_days", defaults.lookback_days),
        quantity: config.get_positive_u32("selector", "quantity", defaults.quantity),
    })
}

pub fn build_portfolio(config: &dyn ConfigPort) -> Result<Portfolio, SigtraderError> {
    let raw = config
        .get_string("portfolio", "holdings")
        .unwrap_or_else(|| DEFAULT_HOLDINGS.to_string());
    parse_holdings(&raw)
        .map_err(|e| SigtraderError::config_invalid("portfolio", "holdings", e.to_string()))
}

/// Latest signal on daily bars. `Ok(None)` when there is not enough history.
pub fn recommend_symbol(
    history: &dyn HistoryPort,
    symbol: &str,
    config: &BacktestConfig,
    lookback_days: u32,
) -> Result<Option<Signal>, SigtraderError> {
    let bars = history.fetch_bars(symbol, Interval::Day, lookback_days)?;
    let indicators = compute_indicators(&bars, config.rsi_period, config.sma_period);
    match latest_signal(&bars, &indicators) {
        Ok(signal) => Ok(Some(signal)),
        Err(SigtraderError::InsufficientData { bars, minimum, .. }) => {
            info!(%symbol, bars, minimum, "not enough history for a recommendation");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub fn backtest_symbol(
    history: &dyn HistoryPort,
    symbol: &str,
    config: &BacktestConfig,
    lookback_days: u32,
) -> Result<BacktestResult, SigtraderError> {
    let bars = history.fetch_bars(symbol, Interval::Day, lookback_days)?;
    if bars.is_empty() {
        return Err(SigtraderError::NotFound {
            what: format!("daily history for {}", symbol),
        });
    }
    Ok(backtest_engine::run_backtest(&bars, config))
}

pub fn format_profile(profile: &RiskProfile) -> String {
    let mut out = String::new();
    out.push_str(&format!("Portfolio value:  {:.2}\n", profile.portfolio_value));
    out.push_str(&format!("Risk score:       {:.1}\n", profile.risk_score));
    out.push_str(&format!("Risk level:       {}\n", profile.risk_level));
    out.push_str(&format!(
        "Avg volatility:   {:.2}%\n",
        profile.avg_volatility * 100.0
    ));
    out.push_str(&format!("Avg return:       {:.2}%\n", profile.avg_return * 100.0));
    out.push_str(&format!("Suggestion:       {}\n", profile.suggestion));

    if !profile.holdings.is_empty() {
        out.push_str("\nHoldings:\n");
        for h in &profile.holdings {
            let vol = h
                .volatility
                .map_or("n/a".to_string(), |v| format!("{:.2}%", v * 100.0));
            out.push_str(&format!("  {}: {:.2} (volatility {})\n", h.symbol, h.value, vol));
        }
    }

    out.push_str(&format!("\nNext trade:       {}\n", profile.next_trade));
    out
}

fn run_recommend(config_path: &Path, symbol: &str) -> Result<(), SigtraderError> {
    let config = load_config(config_path)?;
    let history = CsvHistoryAdapter::new(data_dir(&config));
    let bt_config = build_backtest_config(&config);

    match recommend_symbol(&history, symbol, &bt_config, bar_lookback_days(&config))? {
        Some(signal) => println!("{}: {}", symbol, signal),
        None => println!("{}: no data", symbol),
    }
    Ok(())
}

fn run_backtest(config_path: &Path, symbol: &str) -> Result<(), SigtraderError> {
    let config = load_config(config_path)?;
    let history = CsvHistoryAdapter::new(data_dir(&config));
    let bt_config = build_backtest_config(&config);

    let result = backtest_symbol(&history, symbol, &bt_config, bar_lookback_days(&config))?;
    println!("=== Backtest: {} ===", symbol);
    println!(
        "Cumulative return: {:.2}%",
        result.cumulative_return * 100.0
    );
    println!("Bars exposed:      {}", result.exposed_bars);
    Ok(())
}

fn run_analyze(config_path: &Path) -> Result<(), SigtraderError> {
    let config = load_config(config_path)?;
    let dir = data_dir(&config);
    let history = CsvHistoryAdapter::new(dir.clone());
    let quotes = LastCloseQuoteAdapter::new(CsvHistoryAdapter::new(dir));

    let portfolio = build_portfolio(&config)?;
    let profile = analyze_portfolio(
        &portfolio,
        &quotes,
        &history,
        &build_risk_config(&config),
        &build_selector_config(&config)?,
    );
    print!("{}", format_profile(&profile));
    Ok(())
}

fn run_shell(config_path: &Path, symbol: &str) -> Result<(), SigtraderError> {
    let config = load_config(config_path)?;
    let dir = data_dir(&config);
    let history = CsvHistoryAdapter::new(dir.clone());
    let documents = CsvDocumentAdapter::new(dir);
    let bt_config = build_backtest_config(&config);

    let recommendation =
        recommend_symbol(&history, symbol, &bt_config, bar_lookback_days(&config))?;

    let speaker = if config.get_bool("speech", "enabled", true) {
        ConsoleSpeaker::new(io::stdout())
    } else {
        ConsoleSpeaker::muted(io::stdout())
    };
    let mut transcriber = LineTranscriber::new(BufReader::new(io::stdin()));

    let orders = Shell {
        symbol: symbol.to_string(),
        recommendation,
        transcriber: &mut transcriber,
        speaker: &speaker,
        documents: &documents,
    }
    .run();

    info!(orders = orders.len(), "shell finished");
    Ok(())
}
