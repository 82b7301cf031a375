//! Setup error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Error raised while assembling a game: an unusable dataset or ruleset.
///
/// Invalid answer submissions are never errors; see
/// [`Advisory`](crate::Advisory) for those.
#[derive(Debug, Clone, Display, Error)]
#[display("Setup error: {} at {}:{}", message, file, line)]
pub struct SetupError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SetupError {
    /// Creates a new setup error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
