use std::path::Path;

use crate::error::ReplayError;

/// A `command,term` pair stored in the replay file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayRecord {
    pub command: String,
    pub term: String,
}

impl ReplayRecord {
    /// Split on commas and keep the first two fields; anything after the second
    /// comma is dropped.
    pub fn parse(contents: &str) -> Option<Self> {
        let mut fields = contents.split(',');
        let command = clean_field(fields.next().unwrap_or_default());
        if command.is_empty() {
            return None;
        }
        let term = clean_field(fields.next().unwrap_or_default());
        Some(Self { command, term })
    }
}

pub async fn read_record(path: &Path) -> Result<ReplayRecord, ReplayError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    ReplayRecord::parse(&contents).ok_or_else(|| ReplayError::Empty {
        path: path.to_path_buf(),
    })
}

fn clean_field(field: &str) -> String {
    let field = field.trim();
    let unquoted = field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(field);
    unquoted.trim().to_string()
}
