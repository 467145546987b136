// Command-line entry point for objective extraction

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use objective_extractor::{
    run_objective, to_csv, to_pretty_json, Model, ModelConfig, Outcome, RunObserver, RunRequest,
    RunState, RunSummary, DEFAULT_MAX_PAGES, MAX_PAGES_LIMIT,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Run steps reach the terminal through the console observer, so the
/// library's debug-level step mirror stays off unless `RUST_LOG` asks for it.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Parser)]
#[command(name = "extractor", about = "Scan a website for the data an objective asks for")]
struct Args {
    /// Website to scan
    #[arg(long)]
    url: String,

    /// What to look for, in plain language
    #[arg(long)]
    objective: String,

    /// Maximum candidate pages to scan
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_PAGES as u64,
        value_parser = clap::value_parser!(u64).range(1..=MAX_PAGES_LIMIT as u64)
    )]
    max_pages: u64,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.1, value_parser = parse_temperature)]
    temperature: f32,

    /// Nucleus sampling mass
    #[arg(long, default_value_t = 0.1, value_parser = parse_top_p)]
    top_p: f32,

    /// Language model identifier (or the short name "maverick" / "scout")
    #[arg(long, default_value_t = Model::Scout, value_parser = parse_model)]
    model: Model,

    /// Write the extracted data as pretty JSON
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Write the extracted data as key,value lines
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Overrides FIRECRAWL_API_KEY
    #[arg(long)]
    firecrawl_api_key: Option<String>,

    /// Overrides SAMBANOVA_API_KEY
    #[arg(long)]
    sambanova_api_key: Option<String>,

    /// Overrides SAMBANOVA_BASE_URL
    #[arg(long)]
    base_url: Option<String>,
}

fn parse_model(s: &str) -> Result<Model, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "maverick" => Ok(Model::Maverick),
        "scout" => Ok(Model::Scout),
        _ => s.parse::<Model>().map_err(|e| e.to_string()),
    }
}

fn parse_temperature(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is outside 0.0..=1.0", value))
    }
}

fn parse_top_p(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{}", e))?;
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(format!("{} is outside (0.0, 1.0]", value))
    }
}

/// Prints each log entry once, as it is appended.
fn console_observer() -> Arc<dyn RunObserver> {
    let printed = AtomicUsize::new(0);
    Arc::new(move |state: &RunState| {
        let start = printed.swap(state.log.len(), Ordering::SeqCst);
        for entry in state.log.iter().skip(start) {
            println!("{} {}", format!("[{:>3}%]", state.percent()).dimmed(), entry);
        }
    })
}

fn write_exports(args: &Args, data: &serde_json::Value) -> Result<()> {
    if let Some(path) = &args.json_out {
        let json = to_pretty_json(data).context("Failed to serialize result")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} {}", "Saved JSON to".green(), path.display());
    }

    if let Some(path) = &args.csv_out {
        match to_csv(data) {
            Some(csv) => {
                std::fs::write(path, csv)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{} {}", "Saved CSV to".green(), path.display());
            }
            None => println!("{}", "CSV export needs an object result; skipped".yellow()),
        }
    }

    Ok(())
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let credentials = config.into_credentials(
        args.firecrawl_api_key.clone(),
        args.sambanova_api_key.clone(),
        args.base_url.clone(),
    );

    let model = ModelConfig::new(args.model)
        .with_temperature(args.temperature)
        .with_top_p(args.top_p);
    let request = RunRequest::new(&args.url, &args.objective)
        .with_max_pages(args.max_pages as usize)
        .with_model_config(model);

    tracing::debug!(?credentials, model = %request.model.model, "Starting run");

    let report = run_objective(&credentials, &request, vec![console_observer()]).await;

    println!();
    let status = report.outcome.to_string();
    let code = match &report.outcome {
        Outcome::Success { data } => {
            println!("{}", status.bright_green().bold());
            println!("{}", to_pretty_json(data).context("Failed to serialize result")?);
            if let Some(summary) = RunSummary::from_report(&report, &request) {
                println!("{}", summary.to_string().bright_blue());
            }
            write_exports(&args, data)?;
            ExitCode::SUCCESS
        }
        Outcome::NoCandidates | Outcome::NotFulfilled => {
            println!("{}", status.yellow().bold());
            ExitCode::from(1)
        }
        Outcome::Failed(_) => {
            eprintln!("{}", status.bright_red().bold());
            ExitCode::from(2)
        }
    };

    Ok(code)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
            ExitCode::from(2)
        }
    }
}
