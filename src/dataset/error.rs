use std::path::PathBuf;

use super::loader::ArtifactFormat;

/// Failure to turn a single artifact file into its in-memory structure.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every supported format was tried and none could decode the bytes.
    #[error(
        "{} could not be decoded by any supported format: {}",
        .path.display(),
        describe_attempts(.attempts)
    )]
    Undecodable {
        path: PathBuf,
        attempts: Vec<(ArtifactFormat, String)>,
    },

    #[error("similarity matrix does not align with {titles} pivot titles: {detail}")]
    Misaligned { titles: usize, detail: String },

    #[error("ratings pivot is malformed: {0}")]
    InvalidPivot(String),
}

/// Failure to serialize an artifact to disk.
#[derive(Debug, thiserror::Error)]
#[error("failed to write {} as {format}: {reason}", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    pub format: ArtifactFormat,
    pub reason: String,
}

/// Fatal startup error: one of the artifacts is missing or malformed.
#[derive(Debug, thiserror::Error)]
#[error("data unavailable: the '{artifact}' artifact could not be loaded")]
pub struct DataUnavailable {
    pub artifact: &'static str,
    #[source]
    pub source: LoadError,
}

fn describe_attempts(attempts: &[(ArtifactFormat, String)]) -> String {
    attempts
        .iter()
        .map(|(format, reason)| format!("{}: {}", format, reason))
        .collect::<Vec<_>>()
        .join("; ")
}
