use crate::agents::{
    LibraryUpgrader, RequirementsDocument, RequirementsParser, RequirementsWriter,
    UpgradeInteraction, UpgradeOutcome, UpgradeReport,
};
use crate::conda::{extract_interpreter_version, VersionChange};
use crate::config::SessionConfig;
use crate::error::{BumpError, Result};
use crate::provisioner::{EnvironmentProvisioner, ProvisionerFactory};
use crate::utils::{is_verbose, PathValidator};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;

/// Execute the upgrade workflow against conda
pub fn execute_upgrade(session: &SessionConfig) -> Result<()> {
    println!("{}", "Starting requirements upgrade...".cyan().bold());

    let mut provisioner = ProvisionerFactory::create_conda(session);
    let interaction = UpgradeInteraction::new(session.interactive);

    let report = match run_upgrade(session, provisioner.as_mut(), interaction) {
        Ok(report) => report,
        Err(BumpError::UserCancelled) => {
            println!(
                "\n{}",
                "Upgrade cancelled by user; no requirements file was written.".yellow()
            );
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    print_upgrade_report(&report);

    if report.is_clean() {
        println!(
            "\n{}",
            "✨ Upgrade process completed successfully!".green().bold()
        );
    } else {
        println!(
            "\n{}",
            format!(
                "Upgrade finished with {} unresolved librar{}",
                report.unresolved_count(),
                if report.unresolved_count() == 1 { "y" } else { "ies" }
            )
            .yellow()
            .bold()
        );
    }
    Ok(())
}

/// Parse, provision, upgrade every library, then write the new document.
///
/// Parse and provisioning failures abort before anything is written. Per
/// library failures only leave that entry unresolved.
pub fn run_upgrade(
    session: &SessionConfig,
    provisioner: &mut dyn EnvironmentProvisioner,
    interaction: UpgradeInteraction,
) -> Result<UpgradeReport> {
    // Step 1: Validate paths and read the old requirements
    println!("\n{}", "1. Reading requirements...".yellow());
    let old_path = PathValidator::validate_input_file(&session.old_requirements_path)?;
    let new_path = PathValidator::validate_output_file(&session.new_requirements_path)?;

    let mut document = RequirementsParser::read(&old_path)?;
    if let Some(version) = &session.python_override {
        document.interpreter_version = validate_python_override(version)?;
    }
    println!(
        "{}",
        format!(
            "✓ Python {} with {} libraries",
            document.interpreter_version,
            document.len()
        )
        .green()
    );

    // Step 2: Create the environment
    println!(
        "\n{}",
        format!(
            "2. Creating environment '{}' (python={})...",
            session.environment_name, document.interpreter_version
        )
        .yellow()
    );
    provisioner.create_environment(&session.environment_name, &document.interpreter_version)?;
    println!("{}", "✓ Environment created".green());

    // Step 3: Activate it
    println!("\n{}", "3. Activating environment...".yellow());
    provisioner.activate_environment(&session.environment_name)?;
    println!("{}", "✓ Environment active".green());

    // Step 4: Upgrade libraries
    println!("\n{}", "4. Upgrading libraries...".yellow());
    let report = upgrade_libraries(&mut document, provisioner, interaction)?;
    println!("{}", "✓ Upgrade completed".green());

    // Step 5: Write the new requirements
    println!(
        "\n{}",
        format!("5. Writing {}...", new_path.display()).yellow()
    );
    RequirementsWriter::write(&new_path, &document)?;
    println!("{}", "✓ Requirements written".green());

    Ok(report)
}

fn upgrade_libraries(
    document: &mut RequirementsDocument,
    provisioner: &mut dyn EnvironmentProvisioner,
    interaction: UpgradeInteraction,
) -> Result<UpgradeReport> {
    let mut report = UpgradeReport::new();

    let pb = ProgressBar::new(document.len() as u64);
    if interaction.is_enabled() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  [{bar:40}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut upgrader = LibraryUpgrader::new(provisioner, interaction);
    for requirement in document.iter_mut() {
        pb.set_message(format!("Installing {}", requirement.name));

        let outcome = match upgrader.upgrade(requirement, &mut report) {
            Ok(outcome) => outcome,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        if let Some(notice) = outcome_notice(&requirement.name, &outcome) {
            // println on a hidden bar is dropped; suspend prints regardless
            pb.suspend(|| println!("{}", notice));
        }
        if let UpgradeOutcome::InstallFailed(reason) = &outcome {
            if is_verbose() {
                pb.suspend(|| eprintln!("[VERBOSE] {}", reason));
            }
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(report)
}

/// Per-library line shown while upgrading; frozen and declined entries stay quiet.
fn outcome_notice(name: &str, outcome: &UpgradeOutcome) -> Option<String> {
    match outcome {
        UpgradeOutcome::Resolved(version) => Some(format!(
            "   {} {} {}",
            "✓".green(),
            name.white().bold(),
            version.green()
        )),
        UpgradeOutcome::InstallFailed(_) => Some(format!(
            "   {} Failed to install {}",
            "✗".red(),
            name.white().bold()
        )),
        UpgradeOutcome::VersionUnknown => Some(format!(
            "   {} Failed to upgrade {} (installed version not found)",
            "✗".red(),
            name.white().bold()
        )),
        UpgradeOutcome::Frozen | UpgradeOutcome::Declined => None,
    }
}

fn validate_python_override(version: &str) -> Result<String> {
    let version = version.trim();
    match extract_interpreter_version(version) {
        Some(extracted) if extracted == version => Ok(extracted),
        _ => Err(BumpError::Config(format!(
            "Python version override '{}' must look like 3.11 or 3.11.4",
            version
        ))),
    }
}

/// Execute the plan workflow - show what an upgrade would install
pub fn execute_plan<P: AsRef<Path>>(file: P) -> Result<()> {
    let file = file.as_ref();
    println!("{}", "Planning requirements upgrade...".cyan().bold());

    println!("\n{}", "1. Reading requirements...".yellow());
    let path = PathValidator::validate_input_file(file)?;
    let document = RequirementsParser::read(&path)?;
    println!("{}", "✓ Requirements loaded".green());

    println!(
        "\n{} {}",
        "Python:".cyan().bold(),
        document.interpreter_version.white().bold()
    );

    if document.is_empty() {
        println!("\n{}", "No libraries listed".yellow());
        return Ok(());
    }

    println!("\n{}", "📦 Install plan:".cyan().bold());
    let mut installs = 0;
    for requirement in document.iter() {
        if requirement.constraint.is_frozen() {
            println!(
                "  • {} {} ({})",
                requirement.name.white().bold(),
                "frozen".dimmed(),
                requirement.constraint.value().green()
            );
        } else {
            installs += 1;
            println!(
                "  • {} {} {}",
                requirement.name.white().bold(),
                "→".dimmed(),
                requirement
                    .constraint
                    .install_directive(&requirement.name)
                    .cyan()
            );
        }
    }

    println!(
        "\n{}",
        format!(
            "{} install(s), {} frozen",
            installs,
            document.len() - installs
        )
        .yellow()
    );
    println!("\n{}", "To apply this plan, run:".dimmed());
    println!(
        "  {}",
        format!("reqbump upgrade {} <NEW>", file.display()).cyan()
    );
    Ok(())
}

/// Execute the list workflow - display every entry of a requirements file
pub fn execute_list<P: AsRef<Path>>(file: P) -> Result<()> {
    println!("{}", "Listing requirements...".cyan().bold());

    let path = PathValidator::validate_input_file(file)?;
    let document = RequirementsParser::read(&path)?;

    println!(
        "\n{} {}",
        "Python:".cyan().bold(),
        document.interpreter_version.white().bold()
    );

    if !document.is_empty() {
        println!("\n{}", "Libraries:".yellow().bold());
        for requirement in document.iter() {
            let detail = match requirement.previous_pin.as_deref() {
                Some(pin) => format!("{} (pinned {})", requirement.constraint, pin),
                None => requirement.constraint.to_string(),
            };
            println!(
                "  {} {} {}",
                requirement.name.cyan(),
                detail,
                format!("[{}]", requirement.constraint.kind()).dimmed()
            );
        }
    }

    println!("\n{}", "Summary:".cyan().bold());
    println!("  {} libraries", document.len().to_string().yellow());
    Ok(())
}

fn print_upgrade_report(report: &UpgradeReport) {
    println!("\n{}", "Upgrade Summary:".cyan().bold());
    println!(
        "{}",
        format!(
            "Resolved: {} ({} upgraded), frozen: {}, unresolved: {}",
            report.resolved.len(),
            report.upgraded_count(),
            report.frozen.len(),
            report.unresolved_count()
        )
        .green()
    );

    if !report.resolved.is_empty() {
        println!("\n{}:", "Resolved libraries".cyan());
        for (name, resolution) in &report.resolved {
            match (resolution.previous.as_deref(), resolution.change()) {
                (Some(previous), Some(change)) => {
                    let label = match change {
                        VersionChange::Upgrade => "upgrade".green(),
                        VersionChange::Unchanged => "unchanged".dimmed(),
                        VersionChange::Downgrade => "downgrade".red(),
                    };
                    println!(
                        "  • {} {} → {} ({})",
                        name.white().bold(),
                        previous.red(),
                        resolution.resolved.green(),
                        label
                    );
                }
                _ => println!(
                    "  • {} {}",
                    name.white().bold(),
                    resolution.resolved.green()
                ),
            }
        }
    }

    if !report.frozen.is_empty() {
        println!("\n{}:", "Frozen (exact version kept)".cyan());
        for name in &report.frozen {
            println!("  • {}", name.dimmed());
        }
    }

    if !report.install_failures.is_empty() {
        println!("\n{}:", "Install failures".red());
        for (name, reason) in &report.install_failures {
            println!("  • {} {}", name.white().bold(), reason.dimmed());
        }
    }

    if !report.lookup_misses.is_empty() {
        println!("\n{}:", "Installed version not found".red());
        for name in &report.lookup_misses {
            println!("  • {}", name.white().bold());
        }
    }

    if !report.declined.is_empty() {
        println!("\n{}:", "Skipped by user".yellow());
        for name in &report.declined {
            println!("  • {}", name.white().bold());
        }
    }
}
