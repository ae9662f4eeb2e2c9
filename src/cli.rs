//! CLI interface for Waybill.
//!
//! Each subcommand is non-interactive: arguments in, plain or JSON output
//! out. `recover` and `classify` are pure and never touch the network.
//! `cars` and `stats` read a JSON listing from `--file` or fetch it from
//! the backend; `agent` always asks the backend.

mod format;

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use waybill::api::ApiClient;
use waybill::config::Config;
use waybill::directory::AgentDirectory;
use waybill::display::{CarView, needs_directory};
use waybill::lifecycle::{LifecycleInput, LifecycleStage, StageCounts, classify, filter_by_stage};
use waybill::model::Car;
use waybill::text::recover;

use format::{format_car, format_recovery, format_stats};

/// Waybill — normalize vehicle-import tracking data.
#[derive(Debug, Parser)]
#[command(name = "waybill", after_long_help = USAGE_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const USAGE_HELP: &str = r#"Examples:
  waybill recover "Ù…Ø«Ø§Ù„"
  cut -f3 export.tsv | waybill recover --check
  waybill classify --purchase-date 2025-01-01 --warehouse-date 2025-02-01
  waybill cars --file cars.json --stage shipping --search mscu
  waybill stats

Backend access reads ~/.waybill/config.toml:
  api-base-url = "https://example.com/api"
  token = "..."
WAYBILL_API_URL and WAYBILL_TOKEN override the file."#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Repair mojibake in text values.
    ///
    /// Recovers each TEXT argument, or each line of stdin when none are given.
    /// Prints one result per line.
    Recover {
        /// Values to recover.
        texts: Vec<String>,

        /// Also print whether the result still looks corrupted, and its direction.
        #[arg(long)]
        check: bool,
    },

    /// Classify a car's lifecycle stage from its logistics fields.
    Classify {
        /// Purchase date (any non-blank value other than `0000-00-00` or `null`).
        #[arg(long)]
        purchase_date: Option<String>,

        /// Warehouse arrival date.
        #[arg(long)]
        warehouse_date: Option<String>,

        /// Container number.
        #[arg(long = "container")]
        container_number: Option<String>,
    },

    /// List cars, ready for display.
    ///
    /// Agent names that can't be recovered are looked up in the backend's
    /// agent directory when cars come from the backend.
    Cars {
        /// Read cars from this JSON file instead of the backend.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Only cars at this lifecycle stage.
        #[arg(long, value_enum)]
        stage: Option<StageArg>,

        /// Only cars matching this text (VIN, lot, container, destination, …).
        #[arg(long)]
        search: Option<String>,

        /// Print JSON instead of one line per car.
        #[arg(long)]
        json: bool,
    },

    /// Count cars per lifecycle stage.
    Stats {
        /// Read cars from this JSON file instead of the backend.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Look up an agent's display name in the backend's agent directory.
    Agent {
        /// Agent id.
        id: String,
    },
}

/// CLI-facing lifecycle stage, mapped to the domain `LifecycleStage`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StageArg {
    /// Purchased, not yet in the warehouse.
    New,
    /// In the warehouse.
    Warehouse,
    /// In a container.
    Shipping,
    /// No lifecycle data yet.
    Unclassified,
}

impl StageArg {
    fn to_domain(self) -> LifecycleStage {
        match self {
            Self::New => LifecycleStage::New,
            Self::Warehouse => LifecycleStage::Warehouse,
            Self::Shipping => LifecycleStage::Shipping,
            Self::Unclassified => LifecycleStage::Unclassified,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Recover { texts, check } => cmd_recover(&texts, check),
        Command::Classify {
            purchase_date,
            warehouse_date,
            container_number,
        } => {
            cmd_classify(&LifecycleInput {
                purchase_date: purchase_date.as_deref(),
                warehouse_date: warehouse_date.as_deref(),
                container_number: container_number.as_deref(),
            });
            Ok(())
        }
        Command::Cars {
            file,
            stage,
            search,
            json,
        } => {
            cmd_cars(
                file.as_deref(),
                stage.map(StageArg::to_domain),
                search.as_deref(),
                json,
            )
            .await
        }
        Command::Stats { file, json } => cmd_stats(file.as_deref(), json).await,
        Command::Agent { id } => cmd_agent(&id).await,
    }
}

fn cmd_recover(texts: &[String], check: bool) -> Result<(), String> {
    let print = |text: &str| {
        let recovered = recover(text);
        if check {
            println!("{}", format_recovery(&recovered));
        } else {
            println!("{recovered}");
        }
    };

    if !texts.is_empty() {
        texts.iter().for_each(|t| print(t.as_str()));
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.map_err(|e| format!("failed to read stdin: {e}"))?;
        print(&line);
    }
    Ok(())
}

fn cmd_classify(input: &LifecycleInput<'_>) {
    println!("{}", classify(input).label());
}

async fn cmd_cars(
    file: Option<&Path>,
    stage: Option<LifecycleStage>,
    search: Option<&str>,
    json: bool,
) -> Result<(), String> {
    let (cars, client) = load_cars(file).await?;

    let staged = match stage {
        Some(stage) => filter_by_stage(&cars, stage),
        None => cars.iter().collect(),
    };
    let selected: Vec<&Car> = staged
        .into_iter()
        .filter(|car| car.matches_query(search.unwrap_or_default()))
        .collect();

    let directory = client.map(AgentDirectory::new);
    if let Some(directory) = &directory
        && needs_directory(selected.iter().copied())
    {
        directory.ensure_loaded().await;
    }

    let views: Vec<CarView> = selected
        .iter()
        .map(|car| {
            CarView::build(car, |id| directory.as_ref().and_then(|d| d.resolve(id)))
        })
        .collect();

    if json {
        let json = serde_json::to_string_pretty(&views)
            .map_err(|e| format!("failed to serialize cars: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    if views.is_empty() {
        println!("No cars");
        return Ok(());
    }
    for view in &views {
        println!("{}", format_car(view));
    }
    Ok(())
}

async fn cmd_stats(file: Option<&Path>, json: bool) -> Result<(), String> {
    let (cars, _) = load_cars(file).await?;
    let counts = StageCounts::tally(&cars);

    if json {
        let json = serde_json::to_string_pretty(&counts)
            .map_err(|e| format!("failed to serialize counts: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", format_stats(&counts));
    }
    Ok(())
}

async fn cmd_agent(id: &str) -> Result<(), String> {
    let directory = AgentDirectory::new(backend_client()?);
    directory.ensure_loaded().await;

    let name = directory
        .resolve(id)
        .ok_or_else(|| format!("no agent with id '{id}' in the directory"))?;
    println!("{name}");
    Ok(())
}

/// Load cars from `file`, or from the backend when no file is given.
///
/// The client is returned when the backend was used, so callers can reach
/// the agent directory through it.
async fn load_cars(file: Option<&Path>) -> Result<(Vec<Car>, Option<ApiClient>), String> {
    if let Some(path) = file {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        let cars = serde_json::from_str(&json)
            .map_err(|e| format!("invalid car listing in {}: {e}", path.display()))?;
        return Ok((cars, None));
    }

    let client = backend_client()?;
    let cars = client
        .fetch_cars()
        .await
        .map_err(|e| format!("failed to fetch cars: {e}"))?;
    Ok((cars, Some(client)))
}

fn backend_client() -> Result<ApiClient, String> {
    let config = Config::load()?;
    ApiClient::new(&config).map_err(|e| format!("failed to build HTTP client: {e}"))
}
