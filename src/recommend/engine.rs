use super::types::{Recommendation, RecommendError, ScoredBook};
use crate::dataset::types::Dataset;

/// Upper bound on the number of books returned per query.
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Returns up to [`MAX_RECOMMENDATIONS`] books most similar to `title`.
///
/// `title` must match a pivot row label exactly. Results are ordered by
/// similarity descending; equal scores keep pivot order.
pub fn recommend(dataset: &Dataset, title: &str) -> Result<Vec<Recommendation>, RecommendError> {
    let index = &dataset.similarity;

    let position = index.position(title).ok_or(RecommendError::BookNotFound)?;

    if !index.has_scores() {
        return Err(RecommendError::EmptySimilarityData);
    }

    let row = index.row(position).ok_or(RecommendError::BookNotFound)?;

    let recommendations: Vec<Recommendation> = rank(&row.scores, position)
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .filter_map(|scored| index.row(scored.row))
        .map(|similar| hydrate(dataset, &similar.title))
        .collect();

    tracing::debug!("Recommendations for '{}': {:?}", title, recommendations);
    Ok(recommendations)
}

/// Orders every book except `query` by similarity, highest first.
///
/// The sort is stable, so ties keep ascending row order.
pub fn rank(scores: &[f64], query: usize) -> Vec<ScoredBook> {
    let mut ranked: Vec<ScoredBook> = scores
        .iter()
        .enumerate()
        .filter(|(row, _)| *row != query)
        .map(|(row, &similarity)| ScoredBook { row, similarity })
        .collect();

    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    ranked
}

fn hydrate(dataset: &Dataset, title: &str) -> Recommendation {
    match dataset.catalog.first_by_title(title) {
        Some(entry) => Recommendation {
            title: entry.title.clone(),
            author: Some(entry.author.clone()),
            image_url: Some(entry.image_url.clone()),
        },
        None => Recommendation {
            title: title.to_string(),
            author: None,
            image_url: None,
        },
    }
}
