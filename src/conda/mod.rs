pub mod execution;
pub mod listing;
pub mod version;

pub use execution::CondaExecutionAgent;
pub use version::{extract_interpreter_version, VersionChange, VersionComparator};
