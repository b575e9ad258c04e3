use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use slot_image_matcher::app::ports::CatalogPort;
use slot_image_matcher::app::reconcile_use_case::ReconcileUseCase;
use slot_image_matcher::config::Config;
use slot_image_matcher::constants::{DEFAULT_CONFIG_PATH, DEFAULT_LOG_DIR};
use slot_image_matcher::infra::{DryRunCatalog, FsDirectory, SqliteCatalog};
use slot_image_matcher::matching::{clean_file_name, normalize, score};
use slot_image_matcher::types::{MatchResult, RunSummary};
use slot_image_matcher::{logging, report};

#[derive(Parser)]
#[command(name = "slot_image_matcher")]
#[command(about = "Links slot artwork files to games in the catalog")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match every configured image directory against the catalog
    Run {
        /// Path to the TOML config
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Specific partitions to run (comma-separated keys)
        #[arg(long)]
        partitions: Option<String>,
        /// Score and report without writing image paths
        #[arg(long)]
        dry_run: bool,
    },
    /// Show how file names are cleaned before matching
    Clean {
        #[arg(required = true)]
        file_names: Vec<String>,
    },
    /// Score a file name against a catalog name
    Score {
        file_name: String,
        catalog_name: String,
    },
}

impl Commands {
    /// Only a matching run gets the rolling log directory; `clean` and `score`
    /// leave the working directory untouched.
    fn writes_log_files(&self) -> bool {
        matches!(self, Commands::Run { .. })
    }
}

async fn run(config_path: &Path, partitions: Option<String>, dry_run: bool) -> anyhow::Result<()> {
    let config = Config::load(config_path)?;

    let only: Option<Vec<String>> =
        partitions.map(|list| list.split(',').map(|s| s.trim().to_string()).collect());
    let partitions = config.partitions(only.as_deref())?;

    let sqlite: Arc<dyn CatalogPort> = Arc::new(SqliteCatalog::open(&config.database_path)?);
    let catalog: Arc<dyn CatalogPort> = if dry_run {
        info!("Dry run: catalog will not be modified");
        Arc::new(DryRunCatalog::new(sqlite))
    } else {
        sqlite
    };

    let use_case =
        ReconcileUseCase::new(catalog, Arc::new(FsDirectory)).with_threshold(config.threshold);
    let results = use_case.reconcile(&partitions).await?;

    report::write_review_logs(&results, &config.matched_log, &config.unmatched_log).await?;
    if let Some(path) = &config.summary_json {
        let summary = RunSummary {
            generated_at: chrono::Utc::now(),
            dry_run,
            partitions: results.clone(),
        };
        report::write_summary(&summary, path).await?;
    }

    print_summary(&results);
    info!("Process completed!");
    Ok(())
}

fn print_summary(results: &[MatchResult]) {
    for result in results {
        println!("\n📊 Results for {}:", result.partition_label);
        println!("   Catalog records: {}", result.records_loaded);
        println!("   Files found: {}", result.files_found);
        println!("   Matched: {}", result.accepted.len());
        println!("   Unmatched: {}", result.rejected.len());
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    if cli.command.writes_log_files() {
        logging::init_logging(Path::new(DEFAULT_LOG_DIR));
    }

    match cli.command {
        Commands::Run {
            config,
            partitions,
            dry_run,
        } => {
            if let Err(e) = run(&config, partitions, dry_run).await {
                error!("Error in main process: {:#}", e);
                eprintln!("❌ Matching failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Commands::Clean { file_names } => {
            for name in file_names {
                println!("Original: \"{}\" => Normalized: \"{}\"", name, clean_file_name(&name));
            }
        }
        Commands::Score {
            file_name,
            catalog_name,
        } => {
            let cleaned = clean_file_name(&file_name);
            let normalized = normalize(&catalog_name);
            println!(
                "\"{}\" vs \"{}\" => score: {}",
                cleaned,
                normalized,
                score(&cleaned, &normalized)
            );
        }
    }
}
