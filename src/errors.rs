//! Crate-level error types.

use thiserror::Error;

/// An error that occurs when a locale identifier can't be recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown gamestring locale: `{0}`")]
pub struct ParseLocaleError(pub(crate) String);

impl ParseLocaleError {
    /// The identifier that failed to parse.
    pub fn identifier(&self) -> &str {
        &self.0
    }
}
