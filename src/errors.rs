use thiserror::Error;

/// Failure to read a style keyword or a length from text.
///
/// Only the text boundary produces recoverable errors; contract violations
/// inside the engine are fatal (see [`crate::config::Logger`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid value: {0:?}")]
    InvalidValue(String),
    #[error("Unknown {kind} keyword: {value:?}")]
    UnknownKeyword { kind: &'static str, value: String },
}
