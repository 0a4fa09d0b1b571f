//! # docksight
//!
//! CLI para analizar salidas de docking y consultar el historial guardado.
//!
//! ```bash
//! docksight analyze ligand_a.log ligand_b.pdbqt --project kinase --tag batch1
//! docksight list --search aspirin
//! docksight stats
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use docksight::{AnalysisResult, AppConfig, AppError, DockingAnalysisPipeline};
use dock_persistence::{AnalysisStore, JsonFileStore, ListQuery, MetadataUpdate};

#[derive(Parser)]
#[command(name = "docksight")]
#[command(author, version, about = "Docking result analysis with optional attestation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze docking output files (.log / .pdbqt)
    Analyze {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<String>,

        /// Skip the on-chain attestation step
        #[arg(long)]
        no_attestation: bool,

        /// Do not store the result in the analysis history
        #[arg(long)]
        no_save: bool,

        #[arg(long)]
        project: Option<String>,

        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List stored analyses, most recent first
    List {
        #[arg(long)]
        search: Option<String>,

        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        project: Option<String>,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// Print a stored analysis
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Delete a stored analysis
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Aggregate statistics over the stored history
    Stats,

    /// Replace tags, project or notes of a stored analysis
    Annotate {
        #[arg(value_name = "ID")]
        id: String,

        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        project: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("DOCKSIGHT_LOG", config.log_filter.as_str())).init();

    match run(cli.command, config) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Commands, mut config: AppConfig) -> Result<ExitCode, AppError> {
    let problems = config.validate();
    if !problems.is_empty() {
        return Err(AppError::Config(problems.join("; ")));
    }

    match command {
        Commands::Analyze { files,
                            no_attestation,
                            no_save,
                            project,
                            tags,
                            notes, } => {
            if no_attestation {
                config.attestation_enabled = false;
            }
            let pipeline = DockingAnalysisPipeline::from_config(&config);
            let result = pipeline.run(files.as_slice());
            if !no_save {
                save(&config, &result, tags, project, notes)?;
            }
            print_json(&result)?;
            Ok(if result.is_complete() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::List { search,
                         tags,
                         project,
                         limit,
                         offset, } => {
            let store = JsonFileStore::from_config(&config.storage)?;
            let query = ListQuery { search,
                                    tags,
                                    project,
                                    limit,
                                    offset };
            print_json(&store.list(&query)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show { id } => {
            let store = JsonFileStore::from_config(&config.storage)?;
            print_json(&store.get(&id)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Delete { id } => {
            let store = JsonFileStore::from_config(&config.storage)?;
            if !store.delete(&id)? {
                return Err(AppError::NotFound(id));
            }
            info!("deleted {id}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Stats => {
            let store = JsonFileStore::from_config(&config.storage)?;
            print_json(&store.statistics()?)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Annotate { id, tags, project, notes } => {
            let store = JsonFileStore::from_config(&config.storage)?;
            let update = MetadataUpdate { tags: (!tags.is_empty()).then_some(tags),
                                          project,
                                          notes };
            if update.is_empty() {
                return Err(AppError::Config("annotate needs at least one of --tag, --project, --notes".into()));
            }
            if !store.update_metadata(&id, &update)? {
                return Err(AppError::NotFound(id));
            }
            print_json(&store.get(&id)?)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn save(config: &AppConfig,
        result: &AnalysisResult,
        tags: Vec<String>,
        project: Option<String>,
        notes: Option<String>)
        -> Result<(), AppError> {
    let store = JsonFileStore::from_config(&config.storage)?;
    store.save(&result.to_record(tags, project, notes))?;
    info!("saved {} to {}", result.analysis_id, store.root().display());
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
