use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod workspace;

use workspace::Workspace;

#[derive(Parser)]
#[command(name = "timetable", version, about = "Course timetable planner CLI")]
struct Cli {
    /// Data directory (default: ~/.config/timetable, or $TIMETABLE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the course catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Select a section into the current plan
    Select {
        /// Course code, e.g. "COMP 1021"
        code: String,
        /// Section id, e.g. "L1"
        section: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drop a lecture that is waiting for its tutorial/lab
    Cancel,
    /// Remove a course (by code or by any of its section uids)
    Remove {
        /// Course code or section uid, e.g. "COMP 1021" or "COMP 1021-T1"
        target: String,
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Plan management
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Show the week grid layout
    Layout {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> workspace::CliResult {
    let mut ws = Workspace::open(cli.data_dir)?;
    match cli.command {
        Commands::Catalog { action } => commands::catalog::run(&ws, action),
        Commands::Select {
            code,
            section,
            json,
        } => commands::section::select(&ws, &code, &section, json),
        Commands::Cancel => commands::section::cancel(&ws),
        Commands::Remove { target, yes } => commands::section::remove(&ws, &target, yes),
        Commands::Plan { action } => commands::plan::run(&ws, action),
        Commands::Layout { json } => commands::layout::run(&ws, json),
        Commands::Config { action } => commands::config::run(&mut ws, action),
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
