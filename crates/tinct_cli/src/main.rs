//! tinct CLI
//!
//! Checks theme-extension declarations and prints the extended token reference.

mod config;
mod project;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tinct_theme::TokenGroup;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tinct")]
#[command(author, version, about = "Theme-extension configuration for style generators", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate declarations and print a summary
    Check {
        /// Declaration files, or directories containing tinct.toml
        files: Vec<PathBuf>,

        /// Let later files override earlier ones instead of rejecting conflicts
        #[arg(long)]
        ordered: bool,
    },

    /// Print the token reference: declared tokens layered over the built-ins
    Tokens {
        /// Declaration files, or directories containing tinct.toml
        files: Vec<PathBuf>,

        /// Only list one group
        #[arg(short, long, value_enum)]
        group: Option<GroupArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Let later files override earlier ones instead of rejecting conflicts
        #[arg(long)]
        ordered: bool,
    },

    /// Write a starter tinct.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupArg {
    Palette,
    Motion,
}

impl From<GroupArg> for TokenGroup {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::Palette => TokenGroup::Palette,
            GroupArg::Motion => TokenGroup::Motion,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check { files, ordered } => cmd_check(&files, ordered),
        Commands::Tokens {
            files,
            group,
            format,
            ordered,
        } => cmd_tokens(&files, group.map(Into::into), format, ordered),
        Commands::Init { dir } => cmd_init(&dir),
    }
}

fn cmd_check(files: &[PathBuf], ordered: bool) -> Result<()> {
    let config = config::load(files, ordered)?;
    print!("{}", report::summary(&config));
    Ok(())
}

fn cmd_tokens(
    files: &[PathBuf],
    group: Option<TokenGroup>,
    format: OutputFormat,
    ordered: bool,
) -> Result<()> {
    let config = config::load(files, ordered)?;
    let rows = report::reference(&config, group);
    match format {
        OutputFormat::Text => print!("{}", report::reference_text(&rows)),
        OutputFormat::Json => println!("{}", report::reference_json(&rows)?),
    }
    Ok(())
}

fn cmd_init(dir: &Path) -> Result<()> {
    let path = project::init_declaration(dir)?;
    println!("Created {}", path.display());
    println!();
    println!("Next steps:");
    println!("  tinct check {}", path.display());
    Ok(())
}
