mod cmd;
mod logging;
mod prompt;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use markin_core::section::InsertPosition;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "markin",
    version,
    about = "Append timestamped notes to a section of today's markdown note"
)]
struct Cli {
    /// Path to the config file (defaults to $XDG_CONFIG_HOME/markin/.markin.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level regardless of the configured level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a fleeting note to today's note
    Fl(FlArgs),

    /// Write a sample configuration file
    Init,

    /// Validate configuration and print resolved paths
    Doctor(DoctorArgs),

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct FlArgs {
    /// Text of the note
    pub note: String,

    /// Heading to insert under, overriding the configured section
    #[arg(long)]
    pub section: Option<String>,

    /// after-heading, before-end or end-of-section
    #[arg(long)]
    pub position: Option<InsertPosition>,

    /// Append the section when the note does not have it
    #[arg(long)]
    pub create_section: bool,

    /// Never prompt; fail when the section is missing
    #[arg(long)]
    pub batch: bool,
}

#[derive(Debug, Args)]
pub struct DoctorArgs {
    /// Print the resolved configuration as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fl(args) => cmd::fl::run(cli.config.as_deref(), cli.debug, &args),
        Commands::Init => cmd::init::run(cli.config.as_deref(), cli.debug),
        Commands::Doctor(args) => {
            cmd::doctor::run(cli.config.as_deref(), cli.debug, args.json)
        }
        Commands::Completions { shell } => {
            cmd::completions::run(shell, &mut Cli::command());
        }
    }

    logging::flush();
}
