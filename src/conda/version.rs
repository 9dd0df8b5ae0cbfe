use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Matches `major.minor` with an optional `.patch`.
const INTERPRETER_VERSION_PATTERN: &str = r"\d+\.\d+(?:\.\d+)?";

fn interpreter_version_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(INTERPRETER_VERSION_PATTERN).expect("interpreter version pattern is valid")
    })
}

/// Extract the first `major.minor[.patch]` token from a line such as
/// `python_version=3.10.2` or `3.9`.
pub fn extract_interpreter_version(line: &str) -> Option<String> {
    interpreter_version_regex()
        .find(line)
        .map(|m| m.as_str().to_string())
}

/// Version representation for package versions reported by conda
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub original: String,
    pub parsed: VersionType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionType {
    Semantic(semver::Version),
    Numeric(Vec<u64>),
    Unknown(String),
}

impl Version {
    pub fn parse(version: &str) -> Self {
        let version = version.trim();
        let parsed = if let Ok(v) = semver::Version::parse(version) {
            VersionType::Semantic(v)
        } else if let Some(numeric) = Self::parse_numeric(version) {
            VersionType::Numeric(numeric)
        } else {
            VersionType::Unknown(version.to_string())
        };

        Version {
            original: version.to_string(),
            parsed,
        }
    }

    // conda versions are often two components ("1.24") or four ("2.0.0.1")
    fn parse_numeric(version: &str) -> Option<Vec<u64>> {
        let numbers: Option<Vec<u64>> = version.split('.').map(|p| p.parse().ok()).collect();
        numbers.filter(|n| !n.is_empty())
    }

    fn padded(numbers: &[u64], len: usize) -> Vec<u64> {
        let mut padded = numbers.to_vec();
        padded.resize(len, 0);
        padded
    }

    fn release_numbers(&self) -> Option<Vec<u64>> {
        match &self.parsed {
            VersionType::Semantic(v) => Some(vec![v.major, v.minor, v.patch]),
            VersionType::Numeric(n) => Some(n.clone()),
            VersionType::Unknown(_) => None,
        }
    }

    fn is_prerelease(&self) -> bool {
        matches!(&self.parsed, VersionType::Semantic(v) if !v.pre.is_empty())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        if let (VersionType::Semantic(a), VersionType::Semantic(b)) = (&self.parsed, &other.parsed)
        {
            return a.cmp(b);
        }

        match (self.release_numbers(), other.release_numbers()) {
            // a prerelease ranks below the release it precedes
            (Some(a), Some(b)) => {
                let len = a.len().max(b.len());
                Self::padded(&a, len)
                    .cmp(&Self::padded(&b, len))
                    .then_with(|| other.is_prerelease().cmp(&self.is_prerelease()))
            }
            _ => self.original.cmp(&other.original),
        }
    }
}

/// How a resolved version relates to the version pinned before the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChange {
    Upgrade,
    Unchanged,
    Downgrade,
}

pub struct VersionComparator;

impl VersionComparator {
    pub fn classify(previous: &str, resolved: &str) -> VersionChange {
        match Version::parse(resolved).cmp(&Version::parse(previous)) {
            Ordering::Greater => VersionChange::Upgrade,
            Ordering::Equal => VersionChange::Unchanged,
            Ordering::Less => VersionChange::Downgrade,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_version_from_prefixed_line() {
        assert_eq!(
            extract_interpreter_version("python_version=3.10.2").as_deref(),
            Some("3.10.2")
        );
        assert_eq!(extract_interpreter_version("3.9").as_deref(), Some("3.9"));
    }

    #[test]
    fn rejects_line_without_version() {
        assert_eq!(extract_interpreter_version("python"), None);
        assert_eq!(extract_interpreter_version("python 3"), None);
    }

    #[test]
    fn compares_mixed_component_counts() {
        assert!(Version::parse("1.24.0") > Version::parse("1.2"));
        assert!(Version::parse("2.0.0.1") > Version::parse("2.0"));
        assert_eq!(
            Version::parse("1.0").cmp(&Version::parse("1.0.0")),
            Ordering::Equal
        );
    }

    #[test]
    fn classifies_changes() {
        assert_eq!(
            VersionComparator::classify("1.0", "1.24.0"),
            VersionChange::Upgrade
        );
        assert_eq!(
            VersionComparator::classify("2.31.0", "2.31.0"),
            VersionChange::Unchanged
        );
        assert_eq!(
            VersionComparator::classify("3.0", "2.9.1"),
            VersionChange::Downgrade
        );
    }

    #[test]
    fn prerelease_sorts_below_release() {
        assert_eq!(
            VersionComparator::classify("1.0.0", "1.0.0-rc.1"),
            VersionChange::Downgrade
        );
        assert_eq!(
            VersionComparator::classify("1.0", "1.0.0-rc.1"),
            VersionChange::Downgrade
        );
        assert_eq!(
            VersionComparator::classify("1.0.0-rc.1", "1.0"),
            VersionChange::Upgrade
        );
        assert_eq!(
            VersionComparator::classify("0.9", "1.0.0-rc.1"),
            VersionChange::Upgrade
        );
    }
}
