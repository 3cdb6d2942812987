//! CLI definition and dispatch.

use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::chart_svg::format_price_chart;
use crate::adapters::console_report::{format_recommendation, format_stats_table};
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::price_export::write_combined_csv;
use crate::adapters::prompt::{Prompt, match_horizon, match_risk_profile};
use crate::domain::advisor_config::AdvisorConfig;
use crate::domain::error::AdvisorError;
use crate::domain::price_panel::fetch_panel;
use crate::domain::profile::{Horizon, UserProfile};
use crate::domain::risk::RiskProfile;
use crate::domain::selection::{Recommendation, recommend};
use crate::domain::stats::{StatsTable, build_stats_table};
use crate::logging::init_logging;

/// Exit status when the statistics table is empty and nothing can be suggested.
pub const EXIT_NO_RECOMMENDATION: u8 = 6;

pub const DEFAULT_EXPORT_FILE: &str = "daily_prices_combined.csv";

#[derive(Parser, Debug)]
#[command(
    name = "allocassist",
    about = "Personal investment allocation assistant"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Suggest a portfolio for one investor profile
    Suggest {
        #[arg(short, long)]
        config: PathBuf,
        /// Amount to invest
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// conservative, balanced or aggressive
        #[arg(long)]
        risk: String,
        /// short, medium or long
        #[arg(long)]
        horizon: String,
        /// Desired annual return in percent
        #[arg(long, allow_negative_numbers = true)]
        desired_return: f64,
        /// Print the recommendation as JSON
        #[arg(long)]
        json: bool,
        /// Write a base-100 price chart of the suggestion as SVG
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Print the statistics table for the configured universe
    Stats {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Export aligned daily closes of the universe as one CSV
    Export {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
    /// Ask for a profile on the console, repeatedly
    Interactive {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Suggest {
            config,
            amount,
            risk,
            horizon,
            desired_return,
            json,
            chart,
        } => run_suggest(
            &config,
            amount,
            &risk,
            &horizon,
            desired_return,
            json,
            chart.as_deref(),
        ),
        Command::Stats { config } => run_stats(&config),
        Command::Export { config, output } => run_export(&config, &output),
        Command::Interactive { config } => run_interactive(&config),
        Command::Serve { config } => run_serve(&config),
    };

    result.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Load and validate the INI file, then install logging at its level.
pub fn load_config(path: &Path) -> Result<AdvisorConfig, AdvisorError> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| AdvisorError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let config = AdvisorConfig::from_port(&adapter, Local::now().date_naive())?;
    init_logging(&config.log_level);
    tracing::info!(
        file = %path.display(),
        tickers = config.tickers.len(),
        start = %config.start_date,
        end = %config.end_date,
        "configuration loaded"
    );
    Ok(config)
}

pub fn build_data_port(config: &AdvisorConfig) -> Result<CsvAdapter, AdvisorError> {
    let adapter = CsvAdapter::new(config.prices_dir.clone());
    match &config.names_file {
        Some(path) => adapter.with_names_file(path),
        None => Ok(adapter),
    }
}

fn load_table(config: &AdvisorConfig, data_port: &CsvAdapter) -> Result<StatsTable, AdvisorError> {
    build_stats_table(
        data_port,
        &config.tickers,
        config.start_date,
        config.end_date,
    )
}

fn run_suggest(
    config_path: &Path,
    amount: f64,
    risk: &str,
    horizon: &str,
    desired_return: f64,
    json: bool,
    chart: Option<&Path>,
) -> Result<ExitCode, AdvisorError> {
    let config = load_config(config_path)?;

    // Misspelled labels get the same leniency as the interactive prompt;
    // anything beyond that reaches the selector as an unrecognized label.
    let risk_profile = match_risk_profile(risk).unwrap_or_else(|| {
        tracing::warn!(label = risk, "unrecognized risk profile");
        RiskProfile::from_label(risk)
    });
    let horizon = match_horizon(horizon).unwrap_or_else(|| {
        tracing::warn!(label = horizon, "unrecognized horizon, using medium rules");
        Horizon::from_label(horizon)
    });
    let profile = UserProfile::try_new(amount, risk_profile, horizon, desired_return)?;

    let data_port = build_data_port(&config)?;
    let table = load_table(&config, &data_port)?;

    let recommendation = recommend(&table, &config.asset_classes, &profile)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        print!("{}", format_recommendation(&recommendation, &profile, &data_port));
    }

    let Recommendation::Portfolio { selection, .. } = &recommendation else {
        return Ok(ExitCode::from(EXIT_NO_RECOMMENDATION));
    };

    if let Some(path) = chart {
        let symbols: Vec<String> = selection.symbols().iter().map(|s| s.to_string()).collect();
        let panel = fetch_panel(&data_port, &symbols, config.start_date, config.end_date);
        fs::write(path, format_price_chart(&panel))?;
        tracing::info!(file = %path.display(), "chart written");
    }

    Ok(ExitCode::SUCCESS)
}

fn run_stats(config_path: &Path) -> Result<ExitCode, AdvisorError> {
    let config = load_config(config_path)?;
    let data_port = build_data_port(&config)?;
    let table = load_table(&config, &data_port)?;
    print!("{}", format_stats_table(&table, &data_port));
    Ok(ExitCode::SUCCESS)
}

fn run_export(config_path: &Path, output: &Path) -> Result<ExitCode, AdvisorError> {
    let config = load_config(config_path)?;
    let data_port = build_data_port(&config)?;
    let panel = fetch_panel(&data_port, &config.tickers, config.start_date, config.end_date);
    let file = fs::File::create(output)?;
    write_combined_csv(&panel, io::BufWriter::new(file))?;
    tracing::info!(
        file = %output.display(),
        symbols = panel.symbols.len(),
        rows = panel.rows.len(),
        "combined prices exported"
    );
    Ok(ExitCode::SUCCESS)
}

fn run_interactive(config_path: &Path) -> Result<ExitCode, AdvisorError> {
    let config = load_config(config_path)?;
    let data_port = build_data_port(&config)?;
    let table = load_table(&config, &data_port)?;

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());
    prompt.welcome()?;

    loop {
        let Some(profile) = prompt.read_profile()? else {
            break;
        };
        let recommendation = recommend(&table, &config.asset_classes, &profile)?;
        prompt.say(&format_recommendation(&recommendation, &profile, &data_port))?;
        if !prompt.ask_again()? {
            break;
        }
    }

    prompt.say("Thank you for using the allocation assistant. Goodbye!\n")?;
    io::stdout().flush()?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "web")]
fn run_serve(config_path: &Path) -> Result<ExitCode, AdvisorError> {
    use crate::adapters::web::{AppState, build_router};
    use std::net::SocketAddr;
    use std::sync::Arc;

    let config = load_config(config_path)?;
    let data_port = build_data_port(&config)?;
    let table = load_table(&config, &data_port)?;

    let addr: SocketAddr = config
        .listen
        .parse()
        .map_err(|_| AdvisorError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: format!("invalid socket address: {}", config.listen),
        })?;

    let state = AppState {
        table,
        asset_classes: config.asset_classes.clone(),
        data_port: Arc::new(data_port),
        start_date: config.start_date,
        end_date: config.end_date,
    };
    let router = build_router(state);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "web server listening");
        axum::serve(listener, router).await
    })?;

    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "web"))]
fn run_serve(config_path: &Path) -> Result<ExitCode, AdvisorError> {
    let _ = config_path;
    eprintln!("error: web feature is required for serve");
    Ok(ExitCode::from(1))
}
