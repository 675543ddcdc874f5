//! Schema error types.

use thiserror::Error;

/// Errors raised while interpreting schema values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A string did not name a known variant.
    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}
