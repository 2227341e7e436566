//! Roster file loading

use std::path::Path;

use tracing::info;

use crate::domain::{DomainError, Roster};

/// Read and parse the roster JSON file
pub async fn load_roster(path: impl AsRef<Path>) -> Result<Roster, DomainError> {
    let path = path.as_ref();

    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::input(format!("Error loading data file {}: {}", path.display(), e))
    })?;

    let roster = Roster::from_json(&json)?;
    info!(
        path = %path.display(),
        teams = roster.teams().len(),
        members = roster.member_count(),
        "Loaded roster"
    );

    Ok(roster)
}
