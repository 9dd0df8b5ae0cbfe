mod agents;
mod cli;
mod conda;
mod config;
mod error;
mod provisioner;
mod utils;
mod workflow;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use config::{ConfigFile, SessionConfig, SessionOverrides};
use std::process;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        unsafe {
            std::env::set_var(utils::VERBOSE_ENV, "1");
        }
    }

    let result = match cli.command {
        Commands::Upgrade {
            old,
            new,
            env_name,
            conda,
            python,
            interactive,
        } => ConfigFile::load_optional(cli.config.as_deref())
            .and_then(|file| {
                SessionConfig::resolve(
                    old,
                    new,
                    SessionOverrides {
                        env_name,
                        conda,
                        python,
                        interactive,
                    },
                    file,
                )
            })
            .and_then(|session| workflow::execute_upgrade(&session)),
        Commands::Plan { file } => workflow::execute_plan(&file),
        Commands::List { file } => workflow::execute_list(&file),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
