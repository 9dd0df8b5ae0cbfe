use crate::conda::listing::{environment_listed, parse_package_listing};
use crate::error::{BumpError, Result};
use crate::provisioner::{EnvironmentProvisioner, InstalledPackage};
use crate::utils::is_verbose;
use std::process::{Command, Output};

/// CondaExecutionAgent drives the `conda` executable
pub struct CondaExecutionAgent {
    conda_path: String,
    active_environment: Option<String>,
}

impl CondaExecutionAgent {
    pub fn new(conda_path: impl Into<String>) -> Self {
        Self {
            conda_path: conda_path.into(),
            active_environment: None,
        }
    }

    fn create_args(name: &str, interpreter_version: &str) -> Vec<String> {
        vec![
            "create".to_string(),
            "-y".to_string(),
            "-n".to_string(),
            name.to_string(),
            format!("python={}", interpreter_version),
        ]
    }

    fn install_args(&self, directive: &str) -> Vec<String> {
        let mut args = vec!["install".to_string(), "-y".to_string()];
        self.push_target(&mut args);
        args.push(directive.to_string());
        args
    }

    fn list_args(&self, library: &str) -> Vec<String> {
        let mut args = vec!["list".to_string()];
        self.push_target(&mut args);
        args.push("--json".to_string());
        args.push(library.to_string());
        args
    }

    fn push_target(&self, args: &mut Vec<String>) {
        if let Some(env) = &self.active_environment {
            args.push("-n".to_string());
            args.push(env.clone());
        }
    }

    fn run_conda(&self, args: &[String]) -> std::io::Result<Output> {
        if is_verbose() {
            eprintln!("[VERBOSE] Executing: {} {}", self.conda_path, args.join(" "));
        }

        Command::new(&self.conda_path).args(args).output()
    }

    fn describe_failure(output: &Output, command: &str) -> String {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        match output.status.code() {
            Some(code) if stderr.is_empty() => format!("{} exited with code {}", command, code),
            Some(code) => format!("{} exited with code {}: {}", command, code, stderr),
            None => format!("{} was terminated by a signal", command),
        }
    }
}

impl EnvironmentProvisioner for CondaExecutionAgent {
    fn create_environment(&mut self, name: &str, interpreter_version: &str) -> Result<()> {
        let args = Self::create_args(name, interpreter_version);
        let output = self.run_conda(&args).map_err(|e| {
            BumpError::Provisioning(format!("Failed to execute '{}': {e}", self.conda_path))
        })?;

        if !output.status.success() {
            return Err(BumpError::Provisioning(Self::describe_failure(
                &output,
                "conda create",
            )));
        }

        Ok(())
    }

    fn activate_environment(&mut self, name: &str) -> Result<()> {
        let args = ["env", "list", "--json"].map(String::from);
        let output = self.run_conda(&args).map_err(|e| {
            BumpError::Provisioning(format!("Failed to execute '{}': {e}", self.conda_path))
        })?;

        if !output.status.success() {
            return Err(BumpError::Provisioning(Self::describe_failure(
                &output,
                "conda env list",
            )));
        }

        let listed = environment_listed(&String::from_utf8_lossy(&output.stdout), name)
            .map_err(|e| BumpError::Provisioning(format!("Unreadable environment list: {e}")))?;
        if !listed {
            return Err(BumpError::Provisioning(format!(
                "Environment '{}' does not exist",
                name
            )));
        }

        self.active_environment = Some(name.to_string());
        Ok(())
    }

    fn install(&mut self, library: &str, directive: &str) -> Result<()> {
        let args = self.install_args(directive);
        let output = self.run_conda(&args).map_err(|e| {
            BumpError::Install(format!("{library}: failed to execute '{}': {e}", self.conda_path))
        })?;

        if !output.status.success() {
            return Err(BumpError::Install(format!(
                "{library}: {}",
                Self::describe_failure(&output, "conda install")
            )));
        }

        Ok(())
    }

    fn list_installed(&mut self, library: &str) -> Result<Vec<InstalledPackage>> {
        let args = self.list_args(library);
        let output = self.run_conda(&args).map_err(|e| {
            BumpError::LookupMiss(format!("{library}: failed to execute '{}': {e}", self.conda_path))
        })?;

        if !output.status.success() {
            return Err(BumpError::LookupMiss(format!(
                "{library}: {}",
                Self::describe_failure(&output, "conda list")
            )));
        }

        parse_package_listing(&String::from_utf8_lossy(&output.stdout))
    }
}
