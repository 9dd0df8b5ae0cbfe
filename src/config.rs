use crate::error::{BumpError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENV_NAME: &str = "reqbump-env";
pub const DEFAULT_CONDA: &str = "conda";
const CONDA_EXE_ENV: &str = "CONDA_EXE";

/// Session defaults read from an optional TOML file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub env_name: Option<String>,
    #[serde(default)]
    pub conda: Option<String>,
    #[serde(default)]
    pub python: Option<String>,
}

impl ConfigFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BumpError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Values supplied on the command line; they take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct SessionOverrides {
    pub env_name: Option<String>,
    pub conda: Option<String>,
    pub python: Option<String>,
    pub interactive: bool,
}

/// Everything an upgrade run needs, fixed before the run starts
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub old_requirements_path: PathBuf,
    pub new_requirements_path: PathBuf,
    pub environment_name: String,
    pub conda_executable: String,
    pub python_override: Option<String>,
    pub interactive: bool,
}

impl SessionConfig {
    pub fn resolve(
        old_requirements_path: PathBuf,
        new_requirements_path: PathBuf,
        overrides: SessionOverrides,
        file: ConfigFile,
    ) -> Result<Self> {
        let environment_name = overrides
            .env_name
            .or(file.env_name)
            .unwrap_or_else(|| DEFAULT_ENV_NAME.to_string());
        validate_env_name(&environment_name)?;

        let conda_executable = overrides
            .conda
            .or(file.conda)
            .or_else(|| std::env::var(CONDA_EXE_ENV).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_CONDA.to_string());

        Ok(Self {
            old_requirements_path,
            new_requirements_path,
            environment_name,
            conda_executable,
            python_override: overrides.python.or(file.python),
            interactive: overrides.interactive,
        })
    }
}

fn validate_env_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(BumpError::Config("Environment name must not be empty".into()));
    }

    if let Some(ch) = name
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '/' | '\\' | ':' | '#'))
    {
        return Err(BumpError::Config(format!(
            "Environment name '{}' contains invalid character '{}'",
            name, ch
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn paths() -> (PathBuf, PathBuf) {
        (PathBuf::from("old.txt"), PathBuf::from("new.txt"))
    }

    #[test]
    fn cli_values_override_file_values() {
        let (old, new) = paths();
        let file = ConfigFile {
            env_name: Some("from-file".into()),
            conda: Some("/opt/conda/bin/conda".into()),
            python: Some("3.8".into()),
        };
        let overrides = SessionOverrides {
            env_name: Some("from-cli".into()),
            python: Some("3.11".into()),
            ..Default::default()
        };

        let session = SessionConfig::resolve(old, new, overrides, file).unwrap();
        assert_eq!(session.environment_name, "from-cli");
        assert_eq!(session.conda_executable, "/opt/conda/bin/conda");
        assert_eq!(session.python_override.as_deref(), Some("3.11"));
    }

    #[test]
    fn falls_back_to_default_env_name() {
        let (old, new) = paths();
        let session =
            SessionConfig::resolve(old, new, SessionOverrides::default(), ConfigFile::default())
                .unwrap();
        assert_eq!(session.environment_name, DEFAULT_ENV_NAME);
        assert!(session.python_override.is_none());
        assert!(!session.interactive);
    }

    #[test]
    fn rejects_env_name_with_whitespace() {
        let (old, new) = paths();
        let overrides = SessionOverrides {
            env_name: Some("my env".into()),
            ..Default::default()
        };
        let err = SessionConfig::resolve(old, new, overrides, ConfigFile::default()).unwrap_err();
        assert!(matches!(err, BumpError::Config(_)));
    }

    #[test]
    fn loads_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reqbump.toml");
        fs::write(&path, "env_name = \"ci\"\nconda = \"mamba\"\n").unwrap();

        let file = ConfigFile::load(&path).unwrap();
        assert_eq!(file.env_name.as_deref(), Some("ci"));
        assert_eq!(file.conda.as_deref(), Some("mamba"));
        assert!(file.python.is_none());
    }

    #[test]
    fn rejects_unknown_config_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reqbump.toml");
        fs::write(&path, "venv = \"ci\"\n").unwrap();

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, BumpError::Toml(_)));
    }

    #[test]
    fn missing_optional_config_is_default() {
        assert_eq!(ConfigFile::load_optional(None).unwrap(), ConfigFile::default());
    }
}
