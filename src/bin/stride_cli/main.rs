// ABOUTME: Stride CLI - command-line front end over the tracker services
// ABOUTME: Loads activities from JSON, runs statistics, zones, records, and trend commands, prints JSON
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors
//!
//! Usage:
//! ```bash
//! # Statistics for every activity in a file
//! stride-cli stats --file activities.json
//!
//! # Configure Karvonen zones for a 35 year old with resting HR 52
//! stride-cli zones configure --age 35 --resting 52 --method karvonen
//!
//! # Current personal records after importing a file
//! stride-cli records --file activities.json
//!
//! # This month against last month
//! stride-cli compare --file activities.json --type month
//!
//! # Weekly distance over the last 12 weeks
//! stride-cli evolution --file activities.json --metric distance --type week --periods 12
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stride_tracker::config::StrideConfig;
use stride_tracker::logging::LoggingConfig;
use stride_tracker::services::ServiceContainer;
use stride_tracker::storage::MemoryStore;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "stride-cli",
    about = "Stride personal fitness tracker",
    long_about = "Activity statistics, heart rate zones, personal records, and period trends over normalized activity files."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Statistics for one activity, or for every activity in the file
    Stats {
        /// JSON file holding an array of activities
        #[arg(long)]
        file: PathBuf,

        /// Activity id (all activities if omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// Heart rate zone commands
    Zones {
        #[command(subcommand)]
        action: ZonesCommand,
    },

    /// Import activities chronologically and print the current personal records
    Records {
        /// JSON file holding an array of activities
        #[arg(long)]
        file: PathBuf,

        /// Only records for this sport
        #[arg(long)]
        sport: Option<String>,
    },

    /// Statistics for the period containing a date
    Period {
        /// JSON file holding an array of activities
        #[arg(long)]
        file: PathBuf,

        /// week, month, or year
        #[arg(long = "type", default_value = "week")]
        period_type: String,

        /// Date inside the period, YYYY-MM-DD (today if omitted)
        #[arg(long)]
        date: Option<String>,
    },

    /// Compare the period containing a date with the period before it
    Compare {
        /// JSON file holding an array of activities
        #[arg(long)]
        file: PathBuf,

        /// week, month, or year
        #[arg(long = "type", default_value = "week")]
        period_type: String,

        /// Date inside the current period, YYYY-MM-DD (today if omitted)
        #[arg(long)]
        date: Option<String>,
    },

    /// Series of one metric over trailing periods
    Evolution {
        /// JSON file holding an array of activities
        #[arg(long)]
        file: PathBuf,

        /// distance, time, speed, heart-rate, or count
        #[arg(long, default_value = "distance")]
        metric: String,

        /// week, month, or year
        #[arg(long = "type", default_value = "week")]
        period_type: String,

        /// Number of periods (STRIDE_EVOLUTION_PERIODS if omitted)
        #[arg(long)]
        periods: Option<usize>,

        /// Date inside the newest period, YYYY-MM-DD (today if omitted)
        #[arg(long)]
        date: Option<String>,
    },

    /// Print the coach commentary prompt for one activity
    Coach {
        /// JSON file holding an array of activities
        #[arg(long)]
        file: PathBuf,

        /// Activity id
        #[arg(long)]
        id: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ZonesCommand {
    /// Configure and persist zone settings
    Configure {
        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// Maximum heart rate override (defaults to 220 - age)
        #[arg(long)]
        max_heart_rate: Option<u32>,

        /// Resting heart rate, required for karvonen
        #[arg(long)]
        resting: Option<u32>,

        /// age or karvonen
        #[arg(long, default_value = "age")]
        method: String,
    },

    /// Show the current zones
    Show,

    /// Forget configured settings
    Reset,

    /// Time in zone for one activity
    Analyze {
        /// JSON file holding an array of activities
        #[arg(long)]
        file: PathBuf,

        /// Activity id
        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let config = StrideConfig::from_env();
    config.validate()?;
    debug!(data_dir = %config.data_dir.display(), "loaded configuration");

    let services = ServiceContainer::from_config(&config, MemoryStore::new())?;

    match cli.command {
        Command::Stats { file, id } => commands::stats(&services, &file, id.as_deref()).await?,
        Command::Zones { action } => match action {
            ZonesCommand::Configure {
                age,
                max_heart_rate,
                resting,
                method,
            } => {
                commands::zones_configure(&services, age, max_heart_rate, resting, &method).await?;
            }
            ZonesCommand::Show => commands::zones_show(&services).await?,
            ZonesCommand::Reset => commands::zones_reset(&services).await?,
            ZonesCommand::Analyze { file, id } => {
                commands::zones_analyze(&services, &file, &id).await?;
            }
        },
        Command::Records { file, sport } => {
            commands::records(&services, &file, sport.as_deref()).await?;
        }
        Command::Period {
            file,
            period_type,
            date,
        } => commands::period(&services, &file, &period_type, date.as_deref()).await?,
        Command::Compare {
            file,
            period_type,
            date,
        } => commands::compare(&services, &file, &period_type, date.as_deref()).await?,
        Command::Evolution {
            file,
            metric,
            period_type,
            periods,
            date,
        } => {
            let periods = periods.unwrap_or(config.evolution_periods);
            commands::evolution(
                &services,
                &file,
                &metric,
                &period_type,
                periods,
                date.as_deref(),
            )
            .await?;
        }
        Command::Coach { file, id } => commands::coach(&services, &file, &id).await?,
    }

    Ok(())
}
