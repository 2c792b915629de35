//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::DocviewError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &DocviewError) -> String {
    match e {
        DocviewError::FixtureError(msg) => format!("Could not read fixture: {}", msg),
        other => other.to_string(),
    }
}
