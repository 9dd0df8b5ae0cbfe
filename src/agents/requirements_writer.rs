use crate::agents::requirement::RequirementsDocument;
use crate::error::Result;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Serialises resolved requirements.
///
/// Every library is written as a pin (`name==version`), whatever its
/// original constraint; unresolved entries get an empty version.
pub struct RequirementsWriter;

impl RequirementsWriter {
    pub fn render(document: &RequirementsDocument) -> String {
        let mut output = format!("python_version={}\n", document.interpreter_version);
        for requirement in document.iter() {
            let _ = writeln!(
                output,
                "{}=={}",
                requirement.name,
                requirement.output_version()
            );
        }
        output
    }

    pub fn write<P: AsRef<Path>>(path: P, document: &RequirementsDocument) -> Result<()> {
        fs::write(path, Self::render(document))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::requirements_parser::RequirementsParser;

    #[test]
    fn renders_resolved_pins() {
        let mut document = RequirementsParser::parse("3.9\nnumpy>=1.2\nrequests\n").unwrap();
        document.requirements["numpy"].resolved = Some("1.24.0".into());
        document.requirements["requests"].resolved = Some("2.31.0".into());

        assert_eq!(
            RequirementsWriter::render(&document),
            "python_version=3.9\nnumpy==1.24.0\nrequests==2.31.0\n"
        );
    }

    #[test]
    fn unresolved_entry_has_empty_version() {
        let mut document = RequirementsParser::parse("3.9\nnumpy>=1.2\nrequests\n").unwrap();
        document.requirements["numpy"].resolved = Some("1.24.0".into());

        assert_eq!(
            RequirementsWriter::render(&document),
            "python_version=3.9\nnumpy==1.24.0\nrequests==\n"
        );
    }

    #[test]
    fn version_line_round_trips() {
        let document = RequirementsParser::parse("python_version=3.10.2\nnumpy\n").unwrap();
        let rendered = RequirementsWriter::render(&document);
        let reparsed = RequirementsParser::parse(&rendered).unwrap();
        assert_eq!(reparsed.interpreter_version, "3.10.2");
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requirements_new.txt");
        let document = RequirementsParser::parse("3.9\npandas===2.0.3\n").unwrap();

        RequirementsWriter::write(&path, &document).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "python_version=3.9\npandas==2.0.3\n"
        );
    }
}
