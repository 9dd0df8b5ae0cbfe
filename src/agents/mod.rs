pub mod interaction;
pub mod library_upgrader;
pub mod report;
pub mod requirement;
pub mod requirements_parser;
pub mod requirements_writer;

pub use interaction::UpgradeInteraction;
pub use library_upgrader::{LibraryUpgrader, UpgradeOutcome};
pub use report::UpgradeReport;
pub use requirement::RequirementsDocument;
pub use requirements_parser::RequirementsParser;
pub use requirements_writer::RequirementsWriter;
