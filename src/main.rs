use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use site_rank::config::Config;
use site_rank::model::{
    Coordinates, Criterion, CriterionUpdate, Dataset, LocationId, LocationUpdate, NewLocation,
    Polarity,
};
use site_rank::scoring::{rank_with, RankOptions};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank locations with SAW and WP (default if no subcommand)
    Rank {
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Manage scoring criteria
    Criteria {
        #[command(subcommand)]
        action: CriteriaCommand,
    },
    /// Manage candidate locations
    Locations {
        #[command(subcommand)]
        action: LocationCommand,
    },
    /// Write a timestamped copy of the dataset
    Export { path: PathBuf },
    /// Replace the dataset with one read from a file
    Import { path: PathBuf },
    /// Replace the dataset with the built-in sample data
    Reset,
}

#[derive(Subcommand, Debug)]
enum CriteriaCommand {
    /// List criteria and the weight total
    List,
    /// Add a criterion; every location gets a 0 score for it
    Add {
        id: String,
        name: String,
        weight: f64,
        polarity: Polarity,
    },
    /// Change a criterion's name, weight or polarity
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        polarity: Option<Polarity>,
    },
    /// Change a criterion's id, carrying every location's score over
    Rename { old_id: String, new_id: String },
    /// Remove a criterion and its scores
    Remove { id: String },
    /// Rescale weights so they sum to 1
    Normalize,
}

#[derive(Subcommand, Debug)]
enum LocationCommand {
    /// List locations with their raw scores
    List,
    /// Add a location
    Add {
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long)]
        address: Option<String>,
        /// Raw score as criterion=value (repeatable); missing criteria score 0
        #[arg(long = "score", value_parser = parse_score_arg)]
        scores: Vec<(String, f64)>,
    },
    /// Change a location's name, address or coordinates
    Update {
        id: LocationId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
    },
    /// Set one raw score
    SetScore {
        id: LocationId,
        criterion: String,
        value: f64,
    },
    /// Remove a location
    Remove { id: LocationId },
}

#[derive(Parser, Debug)]
#[command(name = "site-rank")]
#[command(about = "Rank candidate locations against weighted criteria (SAW + WP)", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/site-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to dataset file (overrides data_path from config)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn parse_score_arg(s: &str) -> Result<(String, f64), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected criterion=value, got '{}'", s))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid score '{}': {}", value, e))?;
    Ok((id.trim().to_string(), value))
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "site_rank=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Rank {
        format: OutputFormat::Table,
    });

    // Load and validate config
    let config = match site_rank::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Err(errors) = site_rank::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let data_path = match cli.data.or_else(|| config.data_path.clone()) {
        Some(path) => path,
        None => match site_rank::storage::get_data_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        },
    };
    debug!(path = %data_path.display(), "using dataset");

    if let Err(e) = run(command, &config, &data_path) {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_DATA);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run(command: Commands, config: &Config, data_path: &Path) -> Result<()> {
    let use_colors = config
        .colors()
        .unwrap_or_else(site_rank::output::should_use_colors);

    match command {
        Commands::Rank { format } => {
            let dataset = site_rank::storage::load_dataset(data_path)?;
            let options = RankOptions {
                weight_tolerance: config.weight_tolerance(),
            };
            let report = rank_with(dataset.criteria(), dataset.locations(), &options)?;

            match format {
                OutputFormat::Table => println!(
                    "{}",
                    site_rank::output::format_report(&report, config.precision(), use_colors)
                ),
                OutputFormat::Tsv => println!("{}", site_rank::output::format_tsv(&report)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to serialize report")?
                ),
            }
        }
        Commands::Criteria { action } => run_criteria(action, data_path, use_colors)?,
        Commands::Locations { action } => run_locations(action, data_path, use_colors)?,
        Commands::Export { path } => {
            let dataset = site_rank::storage::load_dataset(data_path)?;
            site_rank::storage::export_dataset(&path, &dataset)?;
            println!("Exported dataset to {}", path.display());
        }
        Commands::Import { path } => {
            let dataset = site_rank::storage::import_dataset(&path)?;
            site_rank::storage::save_dataset(data_path, &dataset)?;
            println!(
                "Imported {} criteria and {} locations",
                dataset.criteria().len(),
                dataset.locations().len()
            );
        }
        Commands::Reset => {
            site_rank::storage::save_dataset(data_path, &Dataset::sample())?;
            println!("Dataset reset to sample data");
        }
    }

    Ok(())
}

fn run_criteria(action: CriteriaCommand, data_path: &Path, use_colors: bool) -> Result<()> {
    let mut dataset = site_rank::storage::load_dataset(data_path)?;

    let message = match action {
        CriteriaCommand::List => {
            println!("{}", site_rank::output::format_criteria(dataset.criteria(), use_colors));
            return Ok(());
        }
        CriteriaCommand::Add {
            id,
            name,
            weight,
            polarity,
        } => {
            dataset.add_criterion(Criterion::new(id.clone(), name, weight, polarity))?;
            format!("Added criterion '{}'", id)
        }
        CriteriaCommand::Update {
            id,
            name,
            weight,
            polarity,
        } => {
            dataset.update_criterion(
                &id,
                CriterionUpdate {
                    name,
                    weight,
                    polarity,
                },
            )?;
            format!("Updated criterion '{}'", id)
        }
        CriteriaCommand::Rename { old_id, new_id } => {
            dataset.rename_criterion(&old_id, &new_id)?;
            format!("Renamed criterion '{}' to '{}'", old_id, new_id)
        }
        CriteriaCommand::Remove { id } => {
            let removed = dataset.remove_criterion(&id)?;
            format!("Removed criterion '{}' ({})", removed.id, removed.name)
        }
        CriteriaCommand::Normalize => {
            dataset.normalize_weights();
            format!(
                "Normalized weights (total {:.3})",
                dataset.criteria().total_weight()
            )
        }
    };

    site_rank::storage::save_dataset(data_path, &dataset)?;
    println!("{}", message);
    Ok(())
}

fn run_locations(action: LocationCommand, data_path: &Path, use_colors: bool) -> Result<()> {
    let mut dataset = site_rank::storage::load_dataset(data_path)?;

    let message = match action {
        LocationCommand::List => {
            println!("{}", site_rank::output::format_locations(&dataset, use_colors));
            return Ok(());
        }
        LocationCommand::Add {
            name,
            lat,
            lng,
            address,
            scores,
        } => {
            let id = dataset.add_location(NewLocation {
                name: name.clone(),
                address,
                coordinates: Coordinates::new(lat, lng),
                scores: scores.into_iter().collect::<BTreeMap<_, _>>(),
            })?;
            format!("Added location {} ({})", id, name)
        }
        LocationCommand::Update {
            id,
            name,
            address,
            lat,
            lng,
        } => {
            let coordinates = lat.zip(lng).map(|(lat, lng)| Coordinates::new(lat, lng));
            dataset.update_location(
                id,
                LocationUpdate {
                    name,
                    address,
                    coordinates,
                },
            )?;
            format!("Updated location {}", id)
        }
        LocationCommand::SetScore {
            id,
            criterion,
            value,
        } => {
            dataset.set_score(id, &criterion, value)?;
            format!("Set {} = {} for location {}", criterion, value, id)
        }
        LocationCommand::Remove { id } => {
            let removed = dataset.remove_location(id)?;
            format!("Removed location {} ({})", removed.id, removed.name)
        }
    };

    site_rank::storage::save_dataset(data_path, &dataset)?;
    println!("{}", message);
    Ok(())
}
