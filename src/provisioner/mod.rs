use crate::error::Result;
use serde::Deserialize;

pub mod factory;
pub use factory::ProvisionerFactory;

/// One record from the package manager's structured listing.
///
/// Listings carry more fields (channel, build string, ...); only these two
/// are read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
}

/// Capabilities the upgrade workflow needs from an environment manager.
///
/// Every method is a blocking external operation. Only success or failure is
/// observed, except for `list_installed` which returns the parsed records.
pub trait EnvironmentProvisioner {
    /// Create an isolated environment pinned to `interpreter_version`.
    fn create_environment(&mut self, name: &str, interpreter_version: &str) -> Result<()>;

    /// Target `name` for every following install and listing.
    fn activate_environment(&mut self, name: &str) -> Result<()>;

    /// Install one package; `directive` is the library name, optionally
    /// followed by an operator-qualified version.
    fn install(&mut self, library: &str, directive: &str) -> Result<()>;

    /// Structured listing of installed packages whose name matches `library`.
    fn list_installed(&mut self, library: &str) -> Result<Vec<InstalledPackage>>;
}

/// Version of the first record named exactly `library`.
///
/// A failed query and a missing record both come back as `None`.
pub fn lookup_installed_version<P: EnvironmentProvisioner + ?Sized>(
    provisioner: &mut P,
    library: &str,
) -> Option<String> {
    let packages = provisioner.list_installed(library).ok()?;
    packages
        .into_iter()
        .find(|package| package.name == library)
        .map(|package| package.version)
}
