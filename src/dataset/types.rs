//! Dataset Types
//!
//! In-memory representations of the four precomputed artifacts plus the
//! `Dataset` bundle that the HTTP layer shares across requests.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::error::LoadError;

/// A row of the popularity table shown on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopularBook {
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub num_ratings: u64,
    pub avg_rating: f64,
}

/// A row of the book catalog.
///
/// The catalog is not deduplicated: several editions of the same title
/// produce several rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub title: String,
    pub author: String,
    pub image_url: String,
}

/// Ratings pivoted to one row per book title and one column per user.
///
/// Row order is the canonical index shared with the similarity matrix.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RatingsPivot {
    pub titles: Vec<String>,
    pub users: Vec<String>,
    /// `ratings[row][column]`, `None` where the user did not rate the book.
    pub ratings: Vec<Vec<Option<f64>>>,
}

impl RatingsPivot {
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Checks that titles are unique and that `ratings` is a
    /// `titles.len()` × `users.len()` grid.
    pub fn validate(&self) -> Result<(), LoadError> {
        let mut seen = HashSet::with_capacity(self.titles.len());
        if let Some(duplicate) = self.titles.iter().find(|t| !seen.insert(t.as_str())) {
            return Err(LoadError::InvalidPivot(format!(
                "title '{}' appears more than once",
                duplicate
            )));
        }

        if self.ratings.len() != self.titles.len() {
            return Err(LoadError::InvalidPivot(format!(
                "{} rating rows for {} titles",
                self.ratings.len(),
                self.titles.len()
            )));
        }

        if let Some((row, cells)) = self
            .ratings
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != self.users.len())
        {
            return Err(LoadError::InvalidPivot(format!(
                "row {} has {} cells for {} users",
                row,
                cells.len(),
                self.users.len()
            )));
        }

        Ok(())
    }
}

/// Precomputed N×N pairwise similarity scores, row `i` belonging to pivot row `i`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimilarityMatrix(pub Vec<Vec<f64>>);

impl SimilarityMatrix {
    /// Total number of cells.
    pub fn size(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }
}

/// Catalog rows with a first-occurrence lookup by exact title.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    first_by_title: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut first_by_title = HashMap::with_capacity(entries.len());
        for (row, entry) in entries.iter().enumerate() {
            first_by_title.entry(entry.title.clone()).or_insert(row);
        }

        Self {
            entries,
            first_by_title,
        }
    }

    /// Returns the earliest catalog row whose title matches exactly.
    pub fn first_by_title(&self, title: &str) -> Option<&CatalogEntry> {
        self.first_by_title
            .get(title)
            .map(|&row| &self.entries[row])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A pivot row label paired with its row of similarity scores.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityRow {
    pub title: String,
    pub scores: Vec<f64>,
}

/// Pivot titles and similarity rows joined positionally at load time.
///
/// A matrix with zero total cells (`[]`, `[[], []]`, ...) is accepted: every
/// row then carries no scores and `has_scores` reports `false`.
#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    rows: Vec<SimilarityRow>,
    positions: HashMap<String, usize>,
    has_scores: bool,
}

impl SimilarityIndex {
    /// Pairs every pivot title with the similarity row at the same position.
    ///
    /// # Errors
    /// `LoadError::Misaligned` if the matrix is non-empty and not exactly
    /// `titles.len()` rows of `titles.len()` scores.
    pub fn align(titles: &[String], matrix: SimilarityMatrix) -> Result<Self, LoadError> {
        let n = titles.len();
        let has_scores = matrix.size() > 0;

        if has_scores {
            if matrix.0.len() != n {
                return Err(LoadError::Misaligned {
                    titles: n,
                    detail: format!("matrix has {} rows", matrix.0.len()),
                });
            }
            if let Some((row, scores)) = matrix.0.iter().enumerate().find(|(_, s)| s.len() != n)
            {
                return Err(LoadError::Misaligned {
                    titles: n,
                    detail: format!("row {} has {} scores", row, scores.len()),
                });
            }
        }

        let mut positions = HashMap::with_capacity(n);
        for (row, title) in titles.iter().enumerate() {
            positions.entry(title.clone()).or_insert(row);
        }

        let mut score_rows = matrix.0.into_iter();
        let rows = titles
            .iter()
            .map(|title| SimilarityRow {
                title: title.clone(),
                scores: if has_scores {
                    score_rows.next().unwrap_or_default()
                } else {
                    Vec::new()
                },
            })
            .collect();

        Ok(Self {
            rows,
            positions,
            has_scores,
        })
    }

    /// Position of the first row labelled exactly `title`.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.positions.get(title).copied()
    }

    pub fn row(&self, position: usize) -> Option<&SimilarityRow> {
        self.rows.get(position)
    }

    pub fn has_scores(&self) -> bool {
        self.has_scores
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the service needs, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub popular: Vec<PopularBook>,
    pub pivot: RatingsPivot,
    pub catalog: Catalog,
    pub similarity: SimilarityIndex,
}

impl Dataset {
    /// Assembles a dataset, validating the pivot and aligning the similarity
    /// matrix with its rows.
    pub fn new(
        popular: Vec<PopularBook>,
        pivot: RatingsPivot,
        catalog: Vec<CatalogEntry>,
        similarity: SimilarityMatrix,
    ) -> Result<Self, LoadError> {
        pivot.validate()?;
        let similarity = SimilarityIndex::align(&pivot.titles, similarity)?;

        Ok(Self {
            popular,
            pivot,
            catalog: Catalog::new(catalog),
            similarity,
        })
    }
}
