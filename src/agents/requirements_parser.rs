use crate::agents::requirement::{Constraint, Requirement, RequirementsDocument};
use crate::conda::extract_interpreter_version;
use crate::error::{BumpError, Result};
use std::fs;
use std::path::Path;

const EXACT_DELIMITER: &str = "==";
const OPERATOR_CHARS: &[char] = &['<', '>', '='];
/// `~=` and `!=` are not understood; a line using them is kept whole as the name.
const UNSUPPORTED_MODIFIERS: &[char] = &['~', '!'];

/// Reads requirements documents
pub struct RequirementsParser;

impl RequirementsParser {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<RequirementsDocument> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BumpError::Parse(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse a whole document.
    ///
    /// The first line must carry a `major.minor[.patch]` interpreter version.
    /// Blank lines are skipped and a repeated library replaces the earlier
    /// entry in place.
    pub fn parse(content: &str) -> Result<RequirementsDocument> {
        let mut lines = content.lines();

        let version_line = lines.next().unwrap_or_default().trim();
        let interpreter_version = extract_interpreter_version(version_line).ok_or_else(|| {
            BumpError::Parse(format!(
                "invalid interpreter version specification: '{}'",
                version_line
            ))
        })?;

        let mut document = RequirementsDocument::new(interpreter_version);

        for (index, line) in lines.enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let requirement = Self::parse_line(line).ok_or_else(|| {
                BumpError::Parse(format!("line {}: missing library name in '{}'", index + 2, line))
            })?;
            document.insert(requirement);
        }

        Ok(document)
    }

    /// Parse one library line: `name`, `name==spec`, or `name<op>version`.
    pub fn parse_line(line: &str) -> Option<Requirement> {
        let (name, spec) = match line.split_once(EXACT_DELIMITER) {
            Some(split) => split,
            None => match Self::operator_start(line) {
                Some(index) => line.split_at(index),
                None => (line, ""),
            },
        };

        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let (constraint, previous_pin) = Constraint::classify(spec);
        let mut requirement = Requirement::new(name, constraint);
        requirement.previous_pin = previous_pin;
        Some(requirement)
    }

    fn operator_start(line: &str) -> Option<usize> {
        let index = line.find(OPERATOR_CHARS)?;
        (!line[..index].ends_with(UNSUPPORTED_MODIFIERS)).then_some(index)
    }
}
