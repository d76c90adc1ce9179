use serde::{Deserialize, Serialize};

/// One recommended book as shown to the user.
///
/// `author` and `image_url` are absent when the catalog has no row for the
/// recommended title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub author: Option<String>,
    pub image_url: Option<String>,
}

/// A pivot row and its similarity to the query book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredBook {
    pub row: usize,
    pub similarity: f64,
}

/// Recoverable request-time failures. Reported to the caller, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendError {
    #[error("Book not found")]
    BookNotFound,

    #[error("No similarity scores available")]
    EmptySimilarityData,
}

#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    pub user_input: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub data: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The popularity table as five index-aligned columns.
#[derive(Debug, Serialize, Deserialize)]
pub struct PopularResponse {
    pub book_name: Vec<String>,
    pub author: Vec<String>,
    pub image: Vec<String>,
    pub votes: Vec<u64>,
    pub rating: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub popular: usize,
    pub titles: usize,
    pub users: usize,
    pub catalog: usize,
    pub has_similarity: bool,
}
