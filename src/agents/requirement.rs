use indexmap::IndexMap;
use std::fmt;

/// How a library's version requirement is expressed in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// No version given; install the latest
    None,
    /// `=x.y`: already resolved, never reinstalled
    Exact(String),
    /// `>=x.y`
    MinInclusive(String),
    /// `>x.y`
    MinExclusive(String),
    /// `<x.y` or `<=x.y`
    Max { version: String, inclusive: bool },
}

impl Constraint {
    /// Classify the text following the library name.
    ///
    /// Returns the constraint and, when the text was a bare version with no
    /// operator (`numpy==1.0`), that version as the previous pin.
    pub fn classify(spec: &str) -> (Self, Option<String>) {
        let spec = spec.trim();
        let value = |prefix: &str| spec[prefix.len()..].trim().to_string();

        let constraint = if spec.starts_with(">=") {
            Constraint::MinInclusive(value(">="))
        } else if spec.starts_with('>') {
            Constraint::MinExclusive(value(">"))
        } else if spec.starts_with("<=") {
            Constraint::Max {
                version: value("<="),
                inclusive: true,
            }
        } else if spec.starts_with('<') {
            Constraint::Max {
                version: value("<"),
                inclusive: false,
            }
        } else if spec.starts_with('=') {
            Constraint::Exact(value("="))
        } else {
            let previous = (!spec.is_empty()).then(|| spec.to_string());
            return (Constraint::None, previous);
        };

        (constraint, None)
    }

    /// The version string with its operator stripped; empty for `None`.
    pub fn value(&self) -> &str {
        match self {
            Constraint::None => "",
            Constraint::Exact(v) | Constraint::MinInclusive(v) | Constraint::MinExclusive(v) => v,
            Constraint::Max { version, .. } => version,
        }
    }

    pub fn operator(&self) -> &'static str {
        match self {
            Constraint::None => "",
            Constraint::Exact(_) => "=",
            Constraint::MinInclusive(_) => ">=",
            Constraint::MinExclusive(_) => ">",
            Constraint::Max {
                inclusive: true, ..
            } => "<=",
            Constraint::Max {
                inclusive: false, ..
            } => "<",
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::None => "none",
            Constraint::Exact(_) => "exact",
            Constraint::MinInclusive(_) => "min-inclusive",
            Constraint::MinExclusive(_) => "min-exclusive",
            Constraint::Max { .. } => "max",
        }
    }

    /// An exact version that is already known is left alone.
    pub fn is_frozen(&self) -> bool {
        matches!(self, Constraint::Exact(v) if !v.is_empty())
    }

    /// The argument handed to the package manager's install operation.
    ///
    /// Operators are passed through untouched; an exact pin uses conda's
    /// single `=` form.
    pub fn install_directive(&self, library: &str) -> String {
        match self {
            Constraint::None => library.to_string(),
            Constraint::Exact(v) if v.is_empty() => library.to_string(),
            _ => format!("{}{}{}", library, self.operator(), self.value()),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::None => f.write_str("latest"),
            other => write!(f, "{}{}", other.operator(), other.value()),
        }
    }
}

/// One library line of a requirements document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub constraint: Constraint,
    /// Bare version found in the input, kept for reporting only
    pub previous_pin: Option<String>,
    /// Version reported by the environment after a successful install
    pub resolved: Option<String>,
}

impl Requirement {
    pub fn new(name: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            name: name.into(),
            constraint,
            previous_pin: None,
            resolved: None,
        }
    }

    /// Version the entry started from, if any.
    pub fn baseline(&self) -> Option<&str> {
        self.previous_pin
            .as_deref()
            .or_else(|| Some(self.constraint.value()).filter(|v| !v.is_empty()))
    }

    /// Version recorded in the new document; empty when unresolved.
    pub fn output_version(&self) -> &str {
        match (&self.resolved, &self.constraint) {
            (Some(resolved), _) => resolved,
            (None, Constraint::Exact(v)) => v,
            _ => "",
        }
    }
}

/// Parsed requirements file: interpreter version plus libraries in first-seen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementsDocument {
    pub interpreter_version: String,
    pub requirements: IndexMap<String, Requirement>,
}

impl RequirementsDocument {
    pub fn new(interpreter_version: impl Into<String>) -> Self {
        Self {
            interpreter_version: interpreter_version.into(),
            requirements: IndexMap::new(),
        }
    }

    /// Insert or replace; a replaced entry keeps its original position.
    pub fn insert(&mut self, requirement: Requirement) {
        self.requirements
            .insert(requirement.name.clone(), requirement);
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.requirements.get(name)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Requirement> {
        self.requirements.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_operators() {
        assert_eq!(
            Constraint::classify(">=1.2").0,
            Constraint::MinInclusive("1.2".into())
        );
        assert_eq!(
            Constraint::classify(">1.2").0,
            Constraint::MinExclusive("1.2".into())
        );
        assert_eq!(
            Constraint::classify("<2").0,
            Constraint::Max {
                version: "2".into(),
                inclusive: false
            }
        );
        assert_eq!(
            Constraint::classify("<=2").0,
            Constraint::Max {
                version: "2".into(),
                inclusive: true
            }
        );
        assert_eq!(Constraint::classify("=1.0").0, Constraint::Exact("1.0".into()));
        assert_eq!(Constraint::classify(""), (Constraint::None, None));
    }

    #[test]
    fn bare_version_becomes_previous_pin() {
        assert_eq!(
            Constraint::classify("1.0"),
            (Constraint::None, Some("1.0".to_string()))
        );
    }

    #[test]
    fn directives_preserve_operator() {
        assert_eq!(Constraint::None.install_directive("requests"), "requests");
        assert_eq!(
            Constraint::MinInclusive("1.4".into()).install_directive("numpy"),
            "numpy>=1.4"
        );
        assert_eq!(
            Constraint::Max {
                version: "2".into(),
                inclusive: false
            }
            .install_directive("scipy"),
            "scipy<2"
        );
        assert_eq!(
            Constraint::Exact("1.0".into()).install_directive("numpy"),
            "numpy=1.0"
        );
        assert_eq!(Constraint::Exact(String::new()).install_directive("numpy"), "numpy");
    }

    #[test]
    fn only_non_empty_exact_is_frozen() {
        assert!(Constraint::Exact("1.0".into()).is_frozen());
        assert!(!Constraint::Exact(String::new()).is_frozen());
        assert!(!Constraint::MinInclusive("1.0".into()).is_frozen());
        assert!(!Constraint::None.is_frozen());
    }

    #[test]
    fn output_version_prefers_resolved() {
        let mut req = Requirement::new("numpy", Constraint::MinInclusive("1.2".into()));
        assert_eq!(req.output_version(), "");
        req.resolved = Some("1.24.0".into());
        assert_eq!(req.output_version(), "1.24.0");

        let frozen = Requirement::new("pandas", Constraint::Exact("2.0.3".into()));
        assert_eq!(frozen.output_version(), "2.0.3");
    }

    #[test]
    fn duplicate_insert_keeps_position() {
        let mut doc = RequirementsDocument::new("3.9");
        doc.insert(Requirement::new("numpy", Constraint::Exact("1.0".into())));
        doc.insert(Requirement::new("requests", Constraint::None));
        doc.insert(Requirement::new("numpy", Constraint::None));

        let names: Vec<_> = doc.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["numpy", "requests"]);
        assert_eq!(doc.get("numpy").unwrap().constraint, Constraint::None);
    }
}
