mod cmd;
mod output;
mod root;

use clap::{CommandFactory, Parser, Subcommand};
use dora_core::deployment::{EventStatus, EventType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dora",
    about = "Track deployment events and report delivery metrics",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from dora_metrics.json or .git/)
    #[arg(long, global = true, env = "DORA_ROOT")]
    root: Option<PathBuf>,

    /// Metrics file path (overrides <root>/dora_metrics.json)
    #[arg(long, global = true, env = "DORA_DB")]
    db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a deployment lifecycle event
    Track {
        /// Event type: deployment
        #[arg(long)]
        event: EventType,

        /// Event status: started | success | failure
        #[arg(long)]
        status: EventStatus,

        /// Commit hash the event belongs to
        #[arg(long)]
        commit: String,
    },

    /// Report deployment frequency, lead time, and change failure rate
    Report,

    /// List tracked deployments
    List,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        // No subcommand is not an error: show usage and exit cleanly.
        if let Err(e) = Cli::command().print_help() {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
        println!();
        return;
    };

    let db = root::resolve_db(cli.db.as_deref(), cli.root.as_deref());

    let result = match command {
        Commands::Track {
            event,
            status,
            commit,
        } => cmd::track::run(&db, event, status, &commit, cli.json),
        Commands::Report => cmd::report::run(&db, cli.json),
        Commands::List => cmd::list::run(&db, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
