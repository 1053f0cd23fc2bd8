//! Error tiers: fatal failures with stable exit codes, and parse errors.
//!
//! Fatal errors terminate the whole run at the point of occurrence.
//! Advisory conditions (name mismatches, skipped inputs) are plain data
//! returned by the modules that detect them and never appear here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort the run. Each variant maps to one stable exit
/// status; external tooling keys off these values, so the mapping must not
/// change between releases.
#[derive(Debug, Error)]
pub enum FatalError {
    /// Input file could not be read.
    #[error("reading {}: {source}", .file.display())]
    ReadInput { file: PathBuf, source: io::Error },

    /// A selection pattern matched nothing.
    #[error("no matching files found")]
    NoMatches,

    /// Document is not well-formed JSON.
    #[error("invalid JSON in {}: {source}", .file.display())]
    DocumentSyntax {
        file: PathBuf,
        source: serde_json::Error,
    },

    /// A `*.json` document does not fit the Rock-on schema.
    #[error("{}: {reason}", .file.display())]
    DocumentSchema { file: PathBuf, reason: String },

    /// Index file missing or unreadable.
    #[error("reading index {}: {source}", .file.display())]
    ReadIndex { file: PathBuf, source: io::Error },

    /// Index is not well-formed JSON.
    #[error("invalid JSON in index {}: {source}", .file.display())]
    IndexSyntax {
        file: PathBuf,
        source: serde_json::Error,
    },

    /// Index content is not a name-to-filename map.
    #[error("index {}: {reason}", .file.display())]
    IndexSchema { file: PathBuf, reason: String },

    /// Canonical serialization failed.
    #[error("serializing {}: {source}", .file.display())]
    Serialize {
        file: PathBuf,
        source: serde_json::Error,
    },

    /// Overwriting a document failed.
    #[error("overwriting {}: {source}", .file.display())]
    WriteDocument { file: PathBuf, source: io::Error },

    /// Overwriting the index failed.
    #[error("overwriting index {}: {source}", .file.display())]
    WriteIndex { file: PathBuf, source: io::Error },
}

impl FatalError {
    /// Stable exit status for each failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            FatalError::ReadInput { .. }
            | FatalError::DocumentSchema { .. }
            | FatalError::IndexSchema { .. }
            | FatalError::Serialize { .. } => 1,
            FatalError::NoMatches => 2,
            FatalError::DocumentSyntax { .. } => 3,
            FatalError::ReadIndex { .. } => 4,
            FatalError::IndexSyntax { .. } => 5,
            FatalError::WriteDocument { .. } => 6,
            FatalError::WriteIndex { .. } => 7,
        }
    }
}

/// Outcome of parsing one document or the index.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The bytes are not JSON at all.
    #[error("not valid JSON: {0}")]
    MalformedSyntax(serde_json::Error),

    /// Well-formed JSON that does not fit the expected shape.
    #[error("{0}")]
    SchemaMismatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes_are_stable() {
        let io = || io::Error::new(io::ErrorKind::Other, "x");
        let js = || serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let f = PathBuf::from("a.json");
        assert_eq!(FatalError::ReadInput { file: f.clone(), source: io() }.exit_code(), 1);
        assert_eq!(FatalError::NoMatches.exit_code(), 2);
        assert_eq!(
            FatalError::DocumentSyntax { file: f.clone(), source: js() }.exit_code(),
            3
        );
        assert_eq!(FatalError::ReadIndex { file: f.clone(), source: io() }.exit_code(), 4);
        assert_eq!(FatalError::IndexSyntax { file: f.clone(), source: js() }.exit_code(), 5);
        assert_eq!(
            FatalError::WriteDocument { file: f.clone(), source: io() }.exit_code(),
            6
        );
        assert_eq!(FatalError::WriteIndex { file: f, source: io() }.exit_code(), 7);
    }
}
