mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{partner::PartnerSubcommand, process::ProcessSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "whiteglove",
    about = "White-Gloves migration workflow — drive partner processes through a release",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .whiteglove/ or .git/)
    #[arg(long, global = true, env = "WHITEGLOVE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a release snapshot in the current project
    Init {
        /// Release name
        #[arg(long, default_value = "release-1")]
        name: String,

        /// Seed a two-partner demo release
        #[arg(long)]
        sample: bool,
    },

    /// Show partners and processes with their current states
    Status,

    /// List the actions offerable for a selection
    Actions {
        /// Restrict the selection to one partner
        #[arg(long)]
        partner: Option<String>,

        /// Restrict the selection to checked partners
        #[arg(long)]
        checked: bool,
    },

    /// Execute an action across a selection
    Run {
        /// Action name (see 'whiteglove actions')
        action: String,

        /// Restrict the selection to one partner
        #[arg(long)]
        partner: Option<String>,

        /// Restrict the selection to checked partners
        #[arg(long)]
        checked: bool,

        /// Confirm a release-wide action
        #[arg(long)]
        yes: bool,
    },

    /// Manage partners
    Partner {
        #[command(subcommand)]
        subcommand: PartnerSubcommand,
    },

    /// Manage processes
    Process {
        #[command(subcommand)]
        subcommand: ProcessSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { name, sample } => cmd::init::run(&root, &name, sample, cli.json),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Actions { partner, checked } => {
            cmd::actions::run(&root, partner.as_deref(), checked, cli.json)
        }
        Commands::Run {
            action,
            partner,
            checked,
            yes,
        } => cmd::run::run(&root, &action, partner.as_deref(), checked, yes, cli.json),
        Commands::Partner { subcommand } => cmd::partner::run(&root, subcommand, cli.json),
        Commands::Process { subcommand } => cmd::process::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
