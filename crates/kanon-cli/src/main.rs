//! Kanon CLI - validate and normalize managed Kubernetes cluster configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod error;
mod exit_codes;

#[derive(Parser)]
#[command(name = "kanon")]
#[command(author = "Kanon Contributors")]
#[command(version)]
#[command(about = "Validate and normalize managed Kubernetes cluster configuration", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a cluster configuration document
    Validate {
        /// Configuration file (YAML or JSON)
        file: PathBuf,

        /// Overlay file(s) to merge on top of the base document
        #[arg(short = 'f', long = "values")]
        values: Vec<PathBuf>,

        /// Set values on the command line (dotted.key=value)
        #[arg(long = "set")]
        set: Vec<String>,

        /// Emit a machine-readable JSON report
        #[arg(long)]
        json: bool,

        /// Suppress progress output (diagnostics are still printed)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate, then print the canonical (defaults-applied) configuration
    Normalize {
        /// Configuration file (YAML or JSON)
        file: PathBuf,

        /// Overlay file(s) to merge on top of the base document
        #[arg(short = 'f', long = "values")]
        values: Vec<PathBuf>,

        /// Set values on the command line (dotted.key=value)
        #[arg(long = "set")]
        set: Vec<String>,

        /// Write the canonical configuration to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// Dump the validation rule tables
    ShowSchema {
        /// Show only one section's rules
        #[arg(long)]
        section: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Validate {
            file,
            values,
            set,
            json,
            quiet,
        } => commands::validate::run(file, values, set, *json, *quiet),
        Commands::Normalize {
            file,
            values,
            set,
            output,
            json,
        } => commands::normalize::run(file, values, set, output.as_deref(), *json),
        Commands::ShowSchema { section } => commands::schema::run(section.as_deref()),
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
