//! Dataset Module
//!
//! Loads the precomputed artifacts the service runs on and keeps them as one
//! immutable bundle.
//!
//! ## Artifacts
//! - **`popular`**: the popularity table shown on the landing page.
//! - **`pt`**: the ratings pivot (one row per title, one column per user).
//! - **`books`**: the book catalog with author and cover image.
//! - **`similarity_scores`**: the N×N similarity matrix aligned with `pt`.
//!
//! ## Submodules
//! - **`loader`**: format fallback and the `load_dataset` entry point.
//! - **`types`**: the in-memory structures and the `Dataset` bundle.
//! - **`error`**: load failures.

pub mod error;
pub mod loader;
pub mod types;

pub use error::{DataUnavailable, LoadError, WriteError};
pub use loader::{ArtifactFormat, LoadedArtifact, load_artifact, load_dataset, write_artifact};
pub use types::{
    Catalog, CatalogEntry, Dataset, PopularBook, RatingsPivot, SimilarityIndex, SimilarityMatrix,
    SimilarityRow,
};
