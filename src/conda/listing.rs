use crate::error::Result;
use crate::provisioner::InstalledPackage;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Parse the output of `conda list --json`.
pub fn parse_package_listing(output: &str) -> Result<Vec<InstalledPackage>> {
    Ok(serde_json::from_str(output)?)
}

#[derive(Debug, Deserialize)]
struct EnvironmentListing {
    envs: Vec<PathBuf>,
}

/// Whether `conda env list --json` output contains an environment called `name`.
///
/// conda reports prefixes only; a named environment is the prefix whose last
/// component equals the name.
pub fn environment_listed(output: &str, name: &str) -> Result<bool> {
    let listing: EnvironmentListing = serde_json::from_str(output)?;
    Ok(listing
        .envs
        .iter()
        .any(|prefix| prefix_name(prefix) == Some(name)))
}

fn prefix_name(prefix: &Path) -> Option<&str> {
    prefix.file_name().and_then(|n| n.to_str())
}
