//! Repository registry backed by a newline-delimited list file

use chrono::{DateTime, Utc};
use std::path::Path;

use crate::error::RegistryError;
use crate::types::RepositoryRecord;

/// Read the repository list and build a record for every listed name.
///
/// A missing or unreadable file is an error; an empty file is an empty list.
pub async fn list_repositories(path: impl AsRef<Path>) -> Result<Vec<RepositoryRecord>, RegistryError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RegistryError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(parse_repository_list(&content, Utc::now()))
}

/// Trim each line, drop blanks, and stamp the rest with default metadata
pub fn parse_repository_list(content: &str, now: DateTime<Utc>) -> Vec<RepositoryRecord> {
    content
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| RepositoryRecord::with_defaults(name, now))
        .collect()
}
