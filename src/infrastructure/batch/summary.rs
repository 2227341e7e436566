use std::fmt;
use std::path::PathBuf;

use crate::domain::DispatchResult;

/// Aggregate outcome of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Members a credential was issued for
    pub processed: usize,
    /// Teams with at least one processed member
    pub teams: usize,
    /// Members that matched the filter but failed validation or signing
    pub skipped: usize,
    pub delivered: usize,
    pub failed: usize,
    /// Recipients whose dispatch failed and why, in roster order
    pub failed_recipients: Vec<(String, DispatchResult)>,
    /// Token file written in file-output mode
    pub output_path: Option<PathBuf>,
    /// Why the token file could not be written
    pub output_error: Option<String>,
}

impl BatchSummary {
    /// True when no member was processed: nothing to do, not an error
    pub fn is_empty(&self) -> bool {
        self.processed == 0
    }

    /// Whether anything went wrong that the operator should act on
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.skipped > 0 || self.output_error.is_some()
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "No tokens generated. Check your filters or data file.")
        } else {
            write!(
                f,
                "Processed {} users from {} teams",
                self.processed, self.teams
            )
        }
    }
}
