//! IMDF Index CLI
//!
//! # Usage
//!
//! ```bash
//! # Classrooms of one building as JSON
//! imdf-index classrooms --data ./imdf --building B1
//!
//! # Dataset statistics
//! imdf-index stats --data ./imdf
//!
//! # Join current sensor readings
//! imdf-index merge --data ./imdf --readings current.json --join building-room
//!
//! # Map layer
//! imdf-index geojson --data ./imdf --readings current.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use imdf_index::config::{ClassifierPolicy, IndexConfig, Preset};
use imdf_index::features::telemetry::JoinStrategy;
use imdf_index::{
    load_dataset, load_readings, merge_readings, to_feature_collection, AirQuality,
    ClassroomIndex, QualityStats, RoomFilter,
};
use imdf_source::DirectorySource;
use serde::Serialize;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "imdf-index")]
#[command(about = "IMDF Index - classroom resolution over IMDF venue data", long_about = None)]
struct Cli {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DatasetArgs {
    /// Directory holding `<kind>.geojson` files
    #[arg(short, long, global = true, default_value = ".")]
    data: PathBuf,

    /// YAML configuration (schema v1)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Preset used when no configuration file is given
    #[arg(long, global = true, value_parser = parse_preset)]
    preset: Option<Preset>,

    /// Classifier policy override (permissive | keyword-filtered)
    #[arg(long, global = true, value_parser = parse_policy)]
    policy: Option<ClassifierPolicy>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print classrooms as JSON
    Classrooms {
        /// Only classrooms of this building id
        #[arg(short, long)]
        building: Option<String>,
    },

    /// Print dataset statistics
    Stats,

    /// Join sensor readings and print room statuses with quality stats
    Merge {
        /// Current-readings JSON document
        #[arg(short, long)]
        readings: PathBuf,

        /// Join key (unit-id | building-room)
        #[arg(short, long, default_value = "unit-id", value_parser = parse_join)]
        join: JoinStrategy,

        /// Only rooms of this building id
        #[arg(short, long)]
        building: Option<String>,

        /// Only rooms in this air quality band
        #[arg(short, long, value_parser = parse_quality)]
        quality: Option<AirQuality>,

        /// Drop rooms without a matched reading
        #[arg(long)]
        with_data: bool,
    },

    /// Print the map FeatureCollection
    Geojson {
        /// Current-readings JSON document
        #[arg(short, long)]
        readings: Option<PathBuf>,

        /// Join key (unit-id | building-room)
        #[arg(short, long, default_value = "unit-id", value_parser = parse_join)]
        join: JoinStrategy,
    },
}

#[derive(Serialize)]
struct MergeOutput<'a> {
    rooms: Vec<&'a imdf_index::RoomStatus>,
    stats: QualityStats,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn parse_preset(s: &str) -> Result<Preset, String> {
    Preset::from_str(s).map_err(|e| e.to_string())
}

fn parse_policy(s: &str) -> Result<ClassifierPolicy, String> {
    ClassifierPolicy::from_str(s).map_err(|e| e.to_string())
}

fn parse_join(s: &str) -> Result<JoinStrategy, String> {
    JoinStrategy::from_str(s).ok_or_else(|| format!("Unknown join strategy: {s}"))
}

fn parse_quality(s: &str) -> Result<AirQuality, String> {
    AirQuality::from_str(s).ok_or_else(|| format!("Unknown air quality: {s}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = resolve_config(&cli.dataset)?;
    let index = open_index(&cli.dataset.data, &config).await?;

    match cli.command {
        Commands::Classrooms { building } => {
            let rooms: Vec<_> = index
                .classrooms()
                .iter()
                .filter(|c| building.is_none() || c.building_id == building)
                .collect();
            print_json(&rooms)?;
        }
        Commands::Stats => {
            print_json(&index.stats())?;
        }
        Commands::Merge {
            readings,
            join,
            building,
            quality,
            with_data,
        } => {
            let snapshot = load_readings(&readings).await?;
            let statuses = merge_readings(index.classrooms(), &snapshot, &join);
            let filter = RoomFilter {
                building_id: building,
                quality,
                require_data: with_data,
            };
            let rooms = filter.apply(&statuses);
            let stats = QualityStats::from_statuses(rooms.iter().copied());
            print_json(&MergeOutput { rooms, stats })?;
        }
        Commands::Geojson { readings, join } => {
            let statuses = match readings {
                Some(path) => {
                    let snapshot = load_readings(&path).await?;
                    Some(merge_readings(index.classrooms(), &snapshot, &join))
                }
                None => None,
            };
            print_json(&to_feature_collection(index.classrooms(), statuses.as_deref()))?;
        }
    }

    Ok(())
}

fn resolve_config(args: &DatasetArgs) -> CliResult<IndexConfig> {
    let mut config = match &args.config {
        Some(path) => IndexConfig::from_yaml(path)?,
        None => IndexConfig::preset(args.preset.unwrap_or_default()),
    };
    if let Some(policy) = args.policy {
        config = config.policy(policy);
    }
    config.validate()?;
    Ok(config)
}

async fn open_index(data: &Path, config: &IndexConfig) -> CliResult<ClassroomIndex> {
    let source = DirectorySource::new(data)?;
    Ok(load_dataset(&source, config).await?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
