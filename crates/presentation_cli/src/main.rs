//! Weatherdeck CLI
//!
//! Command-line weather dashboard: shows current conditions, the 5-day
//! forecast, air quality, and details for a tracked location, and manages
//! the tracked-location list.

#![allow(clippy::print_stdout)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::services::display::Units;
use application::{LocationService, WeatherService};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use infrastructure::{AppConfig, SqliteLocationStore, WeatherGateway};
use integration_weatherstack::WeatherstackConfig;
use presentation_cli::render::render_dashboard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Weatherdeck CLI
#[derive(Parser)]
#[command(name = "weatherdeck")]
#[command(author, version, about = "Weather dashboard CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard for the selected (or given) location
    Show {
        /// Location to look up; added to the tracked list when new
        location: Option<String>,

        /// Unit system for rendered values
        #[arg(short, long, value_enum, default_value_t = UnitsArg::F)]
        units: UnitsArg,
    },

    /// Manage tracked locations
    Locations {
        #[command(subcommand)]
        command: LocationCommands,
    },
}

#[derive(Subcommand)]
enum LocationCommands {
    /// List tracked locations
    List,

    /// Track a new location (or select an existing match)
    Add {
        /// Free-text location query, e.g. "New York"
        query: String,
    },

    /// Stop tracking a location by id
    Remove {
        /// Location id, e.g. "new-york"
        id: String,
    },

    /// Select a tracked location by id
    Select {
        /// Location id, e.g. "new-york"
        id: String,
    },
}

/// Unit system argument, mirroring the dashboard's °F/°C toggle
#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitsArg {
    /// Fahrenheit, mph, miles
    F,
    /// Celsius, km/h, kilometres
    C,
}

impl From<UnitsArg> for Units {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::F => Self::Imperial,
            UnitsArg::C => Self::Metric,
        }
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter_from_verbosity(
            cli.verbose,
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });

    let store = SqliteLocationStore::open(&config.storage.path)
        .with_context(|| format!("Failed to open location store at {}", config.storage.path))?;
    let locations = LocationService::new(Arc::new(store));

    match cli.command {
        Commands::Show { location, units } => {
            let selected = match location {
                Some(query) => locations
                    .add(&query)
                    .map_err(|e| anyhow::anyhow!("{e}"))?,
                None => locations.selected(),
            };

            let gateway = WeatherGateway::with_config(WeatherstackConfig {
                base_url: config.client.base_url.clone(),
                timeout_ms: config.client.timeout_ms,
            })
            .map_err(|e| anyhow::anyhow!("{e}"))?;
            let weather = WeatherService::with_ttl(
                Arc::new(gateway),
                Duration::from_secs(config.client.cache_ttl_secs),
            );

            let acquired = weather.acquire(&selected.query).await;
            print!(
                "{}",
                render_dashboard(&acquired, &selected, units.into(), Utc::now())
            );
        },

        Commands::Locations { command } => match command {
            LocationCommands::List => {
                let selected_id = locations.selected().id;
                for location in locations.list() {
                    let marker = if location.id == selected_id { "*" } else { " " };
                    println!("{marker} {:<16} {:<16} {}", location.id, location.label, location.temp_hint);
                }
            },
            LocationCommands::Add { query } => {
                let added = locations.add(&query).map_err(|e| anyhow::anyhow!("{e}"))?;
                println!("Tracking {} ({})", added.label, added.id);
            },
            LocationCommands::Remove { id } => {
                locations.remove(&id).map_err(|e| anyhow::anyhow!("{e}"))?;
                println!("Removed {id}");
            },
            LocationCommands::Select { id } => {
                let selected = locations.select(&id).map_err(|e| anyhow::anyhow!("{e}"))?;
                println!("Selected {} ({})", selected.label, selected.id);
            },
        },
    }

    Ok(())
}
