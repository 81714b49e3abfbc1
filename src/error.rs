use thiserror::Error;

/// Errors raised when user-supplied names (CLI flags, config values) do not
/// map onto one of the known enum variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown framework '{0}' (expected playwright or selenium)")]
    Framework(String),

    #[error("unknown stability label '{0}' (expected High, Medium or Low)")]
    Stability(String),

    #[error("unknown tag universe '{0}' (expected interactive or all)")]
    TagUniverse(String),
}
