use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use models::{LocationRef, TrackStatus};
use service::runtime::LibraryServices;

#[derive(Parser)]
#[command(name = "library-inspect")]
#[command(about = "Read and patch inbox tracks and locations in the library document store")]
#[command(version)]
struct Cli {
    /// Emit JSON logs instead of the compact format
    #[arg(long)]
    json_logs: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every inbox track
    Tracks,
    /// Show one inbox track
    Track { id: String },
    /// Show several inbox tracks; unknown ids are skipped
    TracksMany { ids: Vec<String> },
    /// Set the pipeline status of an inbox track
    SetStatus { id: String, status: String },
    /// List every location
    Locations,
    /// Show one location
    Location { id: String },
    /// Resolve a display name for a location id (falls back to --name, then the id)
    LocationName {
        id: Option<String>,
        #[arg(long, default_value = "en")]
        lang: String,
        #[arg(long)]
        name: Option<String>,
    },
}

fn init_logging(json: bool) {
    // .env may carry RUST_LOG / DATABASE_URL
    dotenv().ok();
    if json {
        common::utils::logging::init_logging_json();
    } else {
        common::utils::logging::init_logging_default();
    }
    info!(service = "library-inspect", event = "logger_init", "tracing subscriber initialized");
}

fn load_config() -> anyhow::Result<configs::AppConfig> {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) if e.downcast_ref::<std::io::Error>().is_some() => {
            warn!(error = %e, "config file not readable; using defaults");
            let mut cfg = configs::AppConfig::default();
            cfg.normalize_and_validate()?;
            Ok(cfg)
        }
        Err(e) => Err(e),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let cfg = load_config()?;
    let services = LibraryServices::from_config(&cfg).await?;

    match command {
        Commands::Tracks => print_json(&services.inbox_tracks.get_all().await?),
        Commands::Track { id } => print_json(&services.inbox_tracks.get_one(&id).await?),
        Commands::TracksMany { ids } => print_json(&services.inbox_tracks.get_many(&ids).await?),
        Commands::SetStatus { id, status } => {
            let status: TrackStatus = serde_json::from_value(serde_json::Value::String(status))
                .map_err(|_| anyhow::anyhow!("status must be one of new, ready, processing, error"))?;
            let mut track = services.inbox_tracks.get_one(&id).await?;
            track.status = status;
            services.inbox_tracks.update_one(&id, &track).await?;
            info!(track_id = %id, ?status, "status updated");
            print_json(&track)
        }
        Commands::Locations => print_json(&services.locations.get_all().await?),
        Commands::Location { id } => print_json(&services.locations.get_one(&id).await?),
        Commands::LocationName { id, lang, name } => {
            let reference = LocationRef { id, name };
            print_json(&services.locations.get_name(Some(&reference), &lang).await)
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let run_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "library-inspect", event = "panic", %run_id, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "library-inspect", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "library-inspect", event = "start", %run_id, version, "running command");
    match rt.block_on(run(cli.command)) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "library-inspect", event = "command_failed", %run_id, error = %e, "command failed");
            eprintln!("error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
