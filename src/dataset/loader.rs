//! Artifact Loader
//!
//! Reads precomputed artifacts from disk. Each file is decoded by trying the
//! supported formats in order ([`FORMATS`]) until one succeeds, so artifacts
//! written in either binary or JSON form load the same way.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};

use super::error::{DataUnavailable, LoadError, WriteError};
use super::types::{CatalogEntry, Dataset, PopularBook, RatingsPivot, SimilarityMatrix};

/// File extension shared by all artifacts.
pub const ARTIFACT_EXTENSION: &str = "dat";

/// Artifact names, in load order.
pub const POPULAR_ARTIFACT: &str = "popular";
pub const PIVOT_ARTIFACT: &str = "pt";
pub const BOOKS_ARTIFACT: &str = "books";
pub const SIMILARITY_ARTIFACT: &str = "similarity_scores";

/// Serialization formats an artifact may be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Bincode,
    Json,
}

/// Decoding order: primary first, then fallback.
pub const FORMATS: [ArtifactFormat; 2] = [ArtifactFormat::Bincode, ArtifactFormat::Json];

impl ArtifactFormat {
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, String> {
        match self {
            ArtifactFormat::Bincode => bincode::deserialize(bytes).map_err(|e| e.to_string()),
            ArtifactFormat::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
        }
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, String> {
        match self {
            ArtifactFormat::Bincode => bincode::serialize(value).map_err(|e| e.to_string()),
            ArtifactFormat::Json => serde_json::to_vec(value).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactFormat::Bincode => write!(f, "bincode"),
            ArtifactFormat::Json => write!(f, "json"),
        }
    }
}

/// A decoded artifact together with the format that decoded it.
#[derive(Debug)]
pub struct LoadedArtifact<T> {
    pub value: T,
    pub format: ArtifactFormat,
}

/// Path of the artifact called `name` inside `dir`.
pub fn artifact_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, ARTIFACT_EXTENSION))
}

/// Reads `path` and decodes it with the first format in [`FORMATS`] that accepts it.
pub fn load_artifact<T: DeserializeOwned>(path: &Path) -> Result<LoadedArtifact<T>, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| {
        tracing::error!("Failed to read {}: {}", path.display(), source);
        LoadError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let mut attempts = Vec::with_capacity(FORMATS.len());
    for format in FORMATS {
        match format.decode(&bytes) {
            Ok(value) => {
                tracing::info!("Successfully loaded {} with {}", path.display(), format);
                return Ok(LoadedArtifact { value, format });
            }
            Err(reason) => {
                tracing::warn!("Failed to load {} with {}: {}", path.display(), format, reason);
                attempts.push((format, reason));
            }
        }
    }

    tracing::error!("No supported format could decode {}", path.display());
    Err(LoadError::Undecodable {
        path: path.to_path_buf(),
        attempts,
    })
}

/// Serializes `value` to `path` in the given format.
///
/// The service itself only reads artifacts; this is the producer side, used
/// to regenerate artifacts and to build test fixtures.
pub fn write_artifact<T: Serialize>(
    path: &Path,
    value: &T,
    format: ArtifactFormat,
) -> Result<(), WriteError> {
    let bytes = format.encode(value).map_err(|reason| WriteError {
        path: path.to_path_buf(),
        format,
        reason,
    })?;

    std::fs::write(path, bytes).map_err(|e| WriteError {
        path: path.to_path_buf(),
        format,
        reason: e.to_string(),
    })?;

    tracing::debug!("Wrote {} as {}", path.display(), format);
    Ok(())
}

/// Loads all four artifacts from `dir` and assembles the [`Dataset`].
///
/// There is no partial success: the first artifact that cannot be loaded
/// aborts the whole operation.
pub fn load_dataset(dir: &Path) -> Result<Dataset, DataUnavailable> {
    tracing::info!("Loading dataset from {}", dir.display());

    let popular: Vec<PopularBook> = load_named(dir, POPULAR_ARTIFACT)?;
    let pivot: RatingsPivot = load_named(dir, PIVOT_ARTIFACT)?;
    pivot.validate().map_err(|source| {
        tracing::error!("Rejected {} artifact: {}", PIVOT_ARTIFACT, source);
        DataUnavailable {
            artifact: PIVOT_ARTIFACT,
            source,
        }
    })?;
    let books: Vec<CatalogEntry> = load_named(dir, BOOKS_ARTIFACT)?;
    let similarity: SimilarityMatrix = load_named(dir, SIMILARITY_ARTIFACT)?;

    let dataset =
        Dataset::new(popular, pivot, books, similarity).map_err(|source| DataUnavailable {
            artifact: SIMILARITY_ARTIFACT,
            source,
        })?;

    tracing::info!(
        "Dataset ready: {} popular, {} titles x {} users, {} catalog rows",
        dataset.popular.len(),
        dataset.pivot.len(),
        dataset.pivot.users.len(),
        dataset.catalog.len()
    );

    Ok(dataset)
}

fn load_named<T: DeserializeOwned>(dir: &Path, artifact: &'static str) -> Result<T, DataUnavailable> {
    load_artifact(&artifact_path(dir, artifact))
        .map(|loaded| loaded.value)
        .map_err(|source| DataUnavailable { artifact, source })
}
