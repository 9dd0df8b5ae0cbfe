use crate::conda::{VersionChange, VersionComparator};
use indexmap::IndexMap;

/// A library the upgrade resolved to a concrete version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub previous: Option<String>,
    pub resolved: String,
}

impl Resolution {
    pub fn change(&self) -> Option<VersionChange> {
        self.previous
            .as_deref()
            .map(|previous| VersionComparator::classify(previous, &self.resolved))
    }
}

/// Tracks what happened to every library during an upgrade run
#[derive(Debug, Clone, Default)]
pub struct UpgradeReport {
    pub resolved: IndexMap<String, Resolution>,
    pub frozen: Vec<String>,
    pub install_failures: IndexMap<String, String>,
    pub lookup_misses: Vec<String>,
    pub declined: Vec<String>,
}

impl UpgradeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resolved(&mut self, name: String, previous: Option<String>, resolved: String) {
        self.resolved.insert(name, Resolution { previous, resolved });
    }

    pub fn add_frozen(&mut self, name: String) {
        self.frozen.push(name);
    }

    pub fn add_install_failure(&mut self, name: String, reason: String) {
        self.install_failures.insert(name, reason);
    }

    pub fn add_lookup_miss(&mut self, name: String) {
        self.lookup_misses.push(name);
    }

    pub fn add_declined(&mut self, name: String) {
        self.declined.push(name);
    }

    /// Libraries left without a version in the new document
    pub fn unresolved_count(&self) -> usize {
        self.install_failures.len() + self.lookup_misses.len() + self.declined.len()
    }

    pub fn upgraded_count(&self) -> usize {
        self.resolved
            .values()
            .filter(|r| r.change() == Some(VersionChange::Upgrade))
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.unresolved_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_unresolved_entries() {
        let mut report = UpgradeReport::new();
        report.add_resolved("numpy".into(), Some("1.2".into()), "1.24.0".into());
        report.add_resolved("requests".into(), None, "2.31.0".into());
        report.add_frozen("pandas".into());
        assert!(report.is_clean());

        report.add_install_failure("scipy".into(), "exit code 1".into());
        report.add_lookup_miss("flask".into());
        assert_eq!(report.unresolved_count(), 2);
        assert!(!report.is_clean());
    }

    #[test]
    fn only_newer_versions_count_as_upgrades() {
        let mut report = UpgradeReport::new();
        report.add_resolved("numpy".into(), Some("1.2".into()), "1.24.0".into());
        report.add_resolved("scipy".into(), Some("1.11.0".into()), "1.11.0".into());
        report.add_resolved("requests".into(), None, "2.31.0".into());
        assert_eq!(report.upgraded_count(), 1);
    }
}
