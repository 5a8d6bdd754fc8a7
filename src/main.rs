mod astro;
mod catalog;
mod service;
mod tracker;
mod web;

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::astro::Location;
use crate::tracker::{ObservingTime, SessionStore, Tracker};
use crate::web::Config;

#[derive(Parser)]
#[command(name = "star-tracker")]
#[command(about = "Track hour angle and altitude of deep-sky objects")]
struct Cli {
    /// Config file
    #[arg(short, long, value_name = "FILE", default_value = "star-tracker.yaml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web dashboard and position updates
    Serve,
    /// Search the object catalog
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print positions of the saved tracking list
    Positions {
        /// Observer coordinates as "lat, lon" (defaults to the configured station)
        #[arg(long, value_name = "LAT,LON")]
        location: Option<String>,
        /// Observing time, RFC 3339 or YYYY-MM-DDTHH:MM local (defaults to the saved mode)
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match Config::from_file(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config {}: {}", cli.config, e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Search { query, limit } => search(&config, &query, limit).await,
        Commands::Positions { location, at } => positions(&config, location, at),
    }
}

async fn serve(config: Config) -> ExitCode {
    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn search(config: &Config, query: &str, limit: Option<usize>) -> ExitCode {
    let client = match service::Client::new(&config.service.base_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid service url: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let entries = match client.catalog().await {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Catalog fetch failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let hits = catalog::search(&entries, query, limit);
    if hits.is_empty() {
        println!("No matches for {:?}", query);
    }
    for entry in hits {
        println!(
            "{:<10} {:<12} {}",
            entry.object_id.as_deref().unwrap_or("-"),
            entry.ngc.as_deref().unwrap_or("-"),
            entry.name.as_deref().unwrap_or("-"),
        );
    }
    ExitCode::SUCCESS
}

fn positions(config: &Config, location: Option<String>, at: Option<String>) -> ExitCode {
    let coordinates = location.or_else(|| config.station.as_ref().map(|s| s.coordinates.clone()));
    let Some(coordinates) = coordinates else {
        eprintln!("No location: pass --location or configure a station");
        return ExitCode::FAILURE;
    };
    let location = match Location::from_coordinates(&coordinates) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Invalid location: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let session = match SessionStore::new(config.session.path.clone()).load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading session {}: {}", config.session.path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let observing_time = match at.as_deref().map(ObservingTime::parse_fixed).transpose() {
        Ok(Some(Some(fixed))) => fixed,
        Ok(_) => session.observing_time.clone(),
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let time = observing_time.resolve(Utc::now());

    let tracker = Tracker::new(session, Some(location), None);
    let objects = match tracker.positions_at(time) {
        Ok(objects) => objects,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Positions at {} for {:.4}, {:.4}", time, location.lat, location.lon);
    for obj in objects {
        println!("{:<10} {:<30} HA {:<10} Alt {}", obj.id, obj.name, obj.ha, obj.alt);
    }
    ExitCode::SUCCESS
}
