use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "reqbump",
    about = "Requirements bumper - provision a conda environment and pin upgraded libraries",
    version,
    author
)]
pub struct Cli {
    /// Optional TOML file with session defaults (env_name, conda, python)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the environment, upgrade every library and write the new requirements file
    Upgrade {
        /// Existing requirements file (first line holds the Python version)
        #[arg(value_name = "OLD")]
        old: PathBuf,

        /// Requirements file to write with the resolved versions
        #[arg(value_name = "NEW")]
        new: PathBuf,

        /// Name of the conda environment to create
        #[arg(short, long = "env-name", value_name = "NAME")]
        env_name: Option<String>,

        /// Path to the conda executable
        #[arg(long, value_name = "PATH")]
        conda: Option<String>,

        /// Override the interpreter version read from the requirements file
        #[arg(long, value_name = "VERSION")]
        python: Option<String>,

        /// Confirm each library install before running it
        #[arg(short, long)]
        interactive: bool,
    },

    /// Show the install directives an upgrade would run, without touching any environment
    Plan {
        /// Requirements file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List the interpreter version and library entries of a requirements file
    List {
        /// Requirements file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
