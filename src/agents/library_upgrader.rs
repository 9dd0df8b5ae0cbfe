use crate::agents::interaction::UpgradeInteraction;
use crate::agents::report::UpgradeReport;
use crate::agents::requirement::Requirement;
use crate::error::{BumpError, Result};
use crate::provisioner::{lookup_installed_version, EnvironmentProvisioner};

/// What happened to a single library
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// Exact version already known; nothing was run
    Frozen,
    Resolved(String),
    InstallFailed(String),
    /// Install succeeded but the listing did not report the library
    VersionUnknown,
    Declined,
}

/// Installs one library at a time into the active environment
pub struct LibraryUpgrader<'a> {
    provisioner: &'a mut dyn EnvironmentProvisioner,
    interaction: UpgradeInteraction,
}

impl<'a> LibraryUpgrader<'a> {
    pub fn new(
        provisioner: &'a mut dyn EnvironmentProvisioner,
        interaction: UpgradeInteraction,
    ) -> Self {
        Self {
            provisioner,
            interaction,
        }
    }

    /// Install `requirement` and record the version the environment reports.
    ///
    /// Install and lookup failures are recorded in the report and never
    /// returned; the only error is a user cancelling an interactive run.
    pub fn upgrade(
        &mut self,
        requirement: &mut Requirement,
        report: &mut UpgradeReport,
    ) -> Result<UpgradeOutcome> {
        if requirement.constraint.is_frozen() {
            report.add_frozen(requirement.name.clone());
            return Ok(UpgradeOutcome::Frozen);
        }

        let directive = requirement.constraint.install_directive(&requirement.name);
        if !self
            .interaction
            .confirm_install(&requirement.name, &directive)?
        {
            report.add_declined(requirement.name.clone());
            return Ok(UpgradeOutcome::Declined);
        }

        if let Err(err) = self.provisioner.install(&requirement.name, &directive) {
            let reason = match err {
                BumpError::Install(reason) => reason,
                other => other.to_string(),
            };
            report.add_install_failure(requirement.name.clone(), reason.clone());
            return Ok(UpgradeOutcome::InstallFailed(reason));
        }

        match lookup_installed_version(&mut *self.provisioner, &requirement.name) {
            Some(version) => {
                report.add_resolved(
                    requirement.name.clone(),
                    requirement.baseline().map(str::to_string),
                    version.clone(),
                );
                requirement.resolved = Some(version.clone());
                Ok(UpgradeOutcome::Resolved(version))
            }
            None => {
                report.add_lookup_miss(requirement.name.clone());
                Ok(UpgradeOutcome::VersionUnknown)
            }
        }
    }
}
