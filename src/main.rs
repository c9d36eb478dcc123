//! GADBase - Gender and Development demographics tracker
//!
//! A CLI for collecting per-office demographic headcounts, viewing
//! aggregated rollups, and generating AI narrative analyses with Gemini.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (store I/O, configuration, provider failure)

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod store;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use cli::{Args, Command, ReportArgs, SubmitArgs};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{GenderCount, SubmissionRecord};
use report::{ReportError, ReportRequester};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(args.command, Command::InitConfig) {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("GADBase v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .gadbase.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".gadbase.toml");

    if path.exists() {
        eprintln!("⚠️  .gadbase.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .gadbase.toml")?;

    println!("✅ Created .gadbase.toml with default settings.");
    println!("   Edit it to customize the store path and model settings.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the selected command. Returns the exit code.
async fn run(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let mut record_store = store::RecordStore::new(store::FileStore::new(&config.store.path));
    record_store.load();

    match args.command {
        Command::Submit(ref submit) => handle_submit(&mut record_store, submit),
        Command::Stats => handle_stats(&record_store),
        Command::Records => handle_records(&record_store),
        Command::Offices => handle_offices(),
        Command::Report(ref report) => handle_report(&record_store, &config, report).await,
        Command::InitConfig => unreachable!("handled before logging init"),
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .gadbase.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Handle `submit`: build a record from the entered counts and append it.
fn handle_submit(
    record_store: &mut store::RecordStore<store::FileStore>,
    submit: &SubmitArgs,
) -> Result<i32> {
    let office = store::seed::find_office(&submit.office).with_context(|| {
        format!(
            "Unknown office id: {} (see `gadbase offices`)",
            submit.office
        )
    })?;

    // One pair per age bucket, clamped at the point of entry.
    let counts = [
        GenderCount::from_input(&submit.children),
        GenderCount::from_input(&submit.youth),
        GenderCount::from_input(&submit.adults),
        GenderCount::from_input(&submit.seniors),
    ];

    let record = SubmissionRecord::new(&office, counts, submit.notes.clone());
    info!("Submitting record {} for {}", record.id, office.name);

    println!("📋 Submission for {} ({})", office.name, office.region);
    for row in &record.data {
        println!(
            "   {:>5}: {:>6} male | {:>6} female",
            row.age_group, row.male, row.female
        );
    }

    let male: u64 = record.data.iter().map(|d| d.male).sum();
    let female: u64 = record.data.iter().map(|d| d.female).sum();
    println!(
        "   Total: {} male / {} female ({} people)",
        male,
        female,
        male + female
    );

    record_store.append(record)?;

    println!(
        "\n✅ Data submitted to the central database ({} records total).",
        record_store.records().len()
    );
    Ok(0)
}

/// Handle `stats`: print the aggregated dashboard view.
fn handle_stats(record_store: &store::RecordStore<store::FileStore>) -> Result<i32> {
    let stats = analysis::aggregate(record_store.records());

    println!("📊 GAD Database Overview");
    println!("   DB Records: {}", record_store.records().len());
    println!("   Total Population: {}", stats.total_population());
    println!("   Gender Ratio (F): {:.1}%", stats.female_share());
    println!(
        "   {} male / {} female",
        stats.total_male, stats.total_female
    );

    if !stats.age_breakdown.is_empty() {
        println!("\n   Demographics by Age Group:");
        for (group, count) in &stats.age_breakdown {
            println!(
                "     {:>5}: {:>6} male | {:>6} female | {:>6} total",
                group,
                count.male,
                count.female,
                count.total()
            );
        }
    }

    if !stats.office_breakdown.is_empty() {
        println!("\n   Population by Office:");
        for (office, population) in &stats.office_breakdown {
            println!("     {}: {}", office, population);
        }
    }

    Ok(0)
}

/// Handle `records`: list all submissions, most recent first.
fn handle_records(record_store: &store::RecordStore<store::FileStore>) -> Result<i32> {
    let records = record_store.records();

    if records.is_empty() {
        println!("No submission records found.");
        return Ok(0);
    }

    println!("🗂  {} submission records (most recent first):\n", records.len());
    for record in records {
        println!(
            "   {} | {} | {} | {} people",
            record.id,
            format_timestamp(record.timestamp),
            record.office_name,
            record.population()
        );
        if let Some(ref notes) = record.notes {
            println!("      Notes: {}", notes);
        }
    }

    Ok(0)
}

/// Handle `offices`: print the static office reference list.
fn handle_offices() -> Result<i32> {
    println!("🏢 Known offices:\n");
    for office in store::seed::offices() {
        println!("   {} - {} ({})", office.id, office.name, office.region);
    }
    Ok(0)
}

/// Handle `report`: request an AI narrative analysis of the database.
async fn handle_report(
    record_store: &store::RecordStore<store::FileStore>,
    config: &Config,
    report_args: &ReportArgs,
) -> Result<i32> {
    let records = record_store.records();

    // The requester does not special-case emptiness; skip it here.
    if records.is_empty() {
        println!("No records to analyze. Submit data first.");
        return Ok(0);
    }

    println!("🤖 Requesting AI analysis...");
    println!("   Model: {}", config.model.name);
    println!("   Records: {}", records.len());

    let requester = ReportRequester::new(config.model.clone(), report_args.api_key.clone());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("Analyzing data...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = requester.request_report(records).await;
    spinner.finish_and_clear();

    match result {
        Ok(text) => {
            println!("\n✨ Gemini Analysis Report\n");
            println!("{}", text);
            Ok(0)
        }
        Err(e @ ReportError::NotConfigured) => {
            eprintln!("\n⚠️  {}", e);
            Ok(1)
        }
        Err(e @ ReportError::ProviderFailure(_)) => {
            eprintln!("\n❌ {}. Please check your API key configuration.", e);
            Ok(1)
        }
    }
}

/// Format an epoch-millisecond timestamp for display.
fn format_timestamp(timestamp: i64) -> String {
    Utc.timestamp_millis_opt(timestamp)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
