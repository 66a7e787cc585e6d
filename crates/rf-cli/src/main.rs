//! Refocus CLI
//!
//! Inspect and exercise a Refocus settings file: create one with
//! defaults, validate it, manage the source-site list, and check what
//! the engine would decide for a given URL.

use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};

use rf_core::pause::PauseWindow;
use rf_core::policy::{decide, Action};
use rf_core::usage::UsageRecord;
use rf_core::{matcher, Settings};
use rf_coordinator::store::{load_settings_or_default, JsonFileStore, SettingsStore};

#[derive(Parser)]
#[command(name = "rf-cli")]
#[command(about = "Refocus settings inspector and decision checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a settings file with defaults
    Init {
        /// Output settings file
        #[arg(short, long, default_value = "refocus.json")]
        output: String,
    },

    /// Validate a settings file
    Validate {
        /// Settings file to validate
        #[arg(short, long)]
        input: String,
    },

    /// Add a source site (normalized, duplicates rejected)
    AddSite {
        /// Settings file to modify
        #[arg(short, long)]
        input: String,

        /// Site to add (bare hostname or full URL)
        site: String,
    },

    /// Decide what the engine would do for a URL
    Check {
        /// Settings file to read
        #[arg(short, long)]
        input: String,

        /// URL to check
        url: String,

        /// Also record the visit in the usage counters
        #[arg(short, long)]
        track: bool,
    },

    /// Show today's per-site visit counts
    Usage {
        /// Settings file to read
        #[arg(short, long)]
        input: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { output } => cmd_init(&output),
        Commands::Validate { input } => cmd_validate(&input),
        Commands::AddSite { input, site } => cmd_add_site(&input, &site),
        Commands::Check { input, url, track } => cmd_check(&input, &url, track),
        Commands::Usage { input } => cmd_usage(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn cmd_init(output: &str) -> Result<(), String> {
    let store = JsonFileStore::new(output);
    if store.load_settings().map_err(|e| e.to_string())?.is_some() {
        return Err(format!("'{output}' already exists"));
    }
    store
        .save_settings(&Settings::default())
        .map_err(|e| format!("Failed to write '{output}': {e}"))?;
    println!("Wrote default settings to '{output}'");
    Ok(())
}

fn cmd_validate(input: &str) -> Result<(), String> {
    let store = JsonFileStore::new(input);
    let settings = store
        .load_settings()
        .map_err(|e| format!("Invalid settings file: {e}"))?
        .ok_or_else(|| format!("'{input}' does not exist"))?;

    settings.validate().map_err(|e| e.to_string())?;

    println!("Settings '{input}' are valid");
    println!("  Enabled:      {}", settings.is_enabled);
    println!("  Target:       {}", settings.target_url);
    println!("  Mode:         {:?}", settings.redirect_mode);
    println!("  Source sites: {}", settings.source_sites.len());
    for site in &settings.source_sites {
        println!("    {site}");
    }
    if settings.is_paused {
        println!("  Paused until: {} (ms since epoch)", settings.pause_end_time);
    }
    Ok(())
}

fn cmd_add_site(input: &str, site: &str) -> Result<(), String> {
    let store = JsonFileStore::new(input);
    let mut settings = load_settings_or_default(&store);
    let added = settings.add_source_site(site).map_err(|e| e.to_string())?;
    store
        .save_settings(&settings)
        .map_err(|e| format!("Failed to write '{input}': {e}"))?;
    println!("Added '{added}' ({} sites configured)", settings.source_sites.len());
    Ok(())
}

fn cmd_check(input: &str, url: &str, track: bool) -> Result<(), String> {
    let store = JsonFileStore::new(input);
    let settings = load_settings_or_default(&store);

    let now = now_ms();
    let pause = PauseWindow::from_settings(&settings);
    let matched = matcher::matches(url, &settings.source_sites);
    let decision = decide(&settings, &pause, matched, now);

    println!("URL:      {url}");
    println!("Matched:  {matched}");
    let action = match decision.action {
        Action::None => "none".to_string(),
        Action::Redirect => format!(
            "redirect -> {}",
            decision.target_url.as_deref().unwrap_or("?")
        ),
        Action::StartCountdown => format!(
            "countdown -> {}",
            decision.target_url.as_deref().unwrap_or("?")
        ),
        Action::ShowReminder => "reminder only".to_string(),
    };
    println!("Action:   {action}");
    println!("Reminder: {}", decision.show_reminder);

    if track && decision.track_usage {
        let today = chrono::Local::now().date_naive();
        let mut record = store
            .load_usage()
            .map_err(|e| e.to_string())?
            .unwrap_or_else(|| UsageRecord::new(today));
        if let Some(host) = record.record(url, today) {
            println!("Tracked:  {host} -> {} visits today", record.usage[&host]);
        }
        store.save_usage(&record).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn cmd_usage(input: &str) -> Result<(), String> {
    let store = JsonFileStore::new(input);
    let record = store
        .load_usage()
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "no usage recorded yet".to_string())?;

    println!("Usage for {}", record.date);
    let mut entries: Vec<_> = record.usage.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (host, count) in entries {
        println!("  {count:>5}  {host}");
    }
    println!("  {:>5}  total", record.total_visits());
    Ok(())
}
