pub mod path_validator;

pub use path_validator::PathValidator;

/// Set by `--verbose`; checked before printing `[VERBOSE]` diagnostics.
pub const VERBOSE_ENV: &str = "REQBUMP_VERBOSE";

pub fn is_verbose() -> bool {
    std::env::var(VERBOSE_ENV).is_ok()
}
