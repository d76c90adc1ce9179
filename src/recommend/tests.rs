//! Recommendation Module Tests
//!
//! Validates ranking, catalog hydration, and the HTTP handlers over a small
//! synthetic dataset.
//!
//! ## Test Scopes
//! - **Ranking**: Descending order, stable ties, self-exclusion.
//! - **Engine**: Cardinality, not-found and empty-matrix outcomes, catalog joins.
//! - **Handlers**: Response bodies for the landing page and the recommend form.

#[cfg(test)]
mod tests {
    use crate::dataset::types::{
        CatalogEntry, Dataset, PopularBook, RatingsPivot, SimilarityMatrix,
    };
    use crate::recommend::engine::{MAX_RECOMMENDATIONS, rank, recommend};
    use crate::recommend::handlers::{
        handle_health, handle_index, handle_recommend_books, handle_recommend_ui,
    };
    use crate::recommend::types::{RecommendError, RecommendForm, RecommendResponse};
    use axum::{Extension, Form};
    use std::sync::Arc;

    const TITLES: [&str; 5] = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"];

    fn pivot(titles: &[&str]) -> RatingsPivot {
        RatingsPivot {
            titles: titles.iter().map(|t| t.to_string()).collect(),
            users: vec!["u1".to_string()],
            ratings: titles.iter().map(|_| vec![Some(7.0)]).collect(),
        }
    }

    fn entry(title: &str, author: &str) -> CatalogEntry {
        CatalogEntry {
            title: title.to_string(),
            author: author.to_string(),
            image_url: format!("http://images.example/{}.jpg", title.to_lowercase()),
        }
    }

    fn matrix() -> SimilarityMatrix {
        SimilarityMatrix(vec![
            vec![1.0, 0.9, 0.2, 0.8, 0.5],
            vec![0.9, 1.0, 0.4, 0.6, 0.6],
            vec![0.2, 0.4, 1.0, 0.1, 0.7],
            vec![0.8, 0.6, 0.1, 1.0, 0.3],
            vec![0.5, 0.6, 0.7, 0.3, 1.0],
        ])
    }

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            entry("Alpha", "Ann"),
            entry("Beta", "Bob"),
            entry("Delta", "Dora"),
            entry("Epsilon", "Eve"),
            // Second edition, must never win
            entry("Delta", "Dora (Reissue)"),
            // No row for Gamma
        ]
    }

    fn dataset() -> Dataset {
        let popular = vec![
            PopularBook {
                title: "Alpha".to_string(),
                author: "Ann".to_string(),
                image_url: "http://images.example/alpha.jpg".to_string(),
                num_ratings: 300,
                avg_rating: 4.5,
            },
            PopularBook {
                title: "Beta".to_string(),
                author: "Bob".to_string(),
                image_url: "http://images.example/beta.jpg".to_string(),
                num_ratings: 250,
                avg_rating: 4.1,
            },
        ];

        Dataset::new(popular, pivot(&TITLES), catalog(), matrix()).unwrap()
    }

    fn titles_of(dataset: &Dataset, query: &str) -> Vec<String> {
        recommend(dataset, query)
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect()
    }

    // ============================================================
    // RANKING
    // ============================================================

    #[test]
    fn test_rank_descending_without_query() {
        let ranked = rank(&[1.0, 0.9, 0.2, 0.8, 0.5], 0);

        let rows: Vec<usize> = ranked.iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_rank_ties_keep_row_order() {
        let ranked = rank(&[0.5, 0.5, 1.0, 0.5], 2);

        let rows: Vec<usize> = ranked.iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![0, 1, 3]);
    }

    #[test]
    fn test_rank_excludes_query_even_when_tied_with_it() {
        // Row 0 is as similar to the query as the query itself
        let ranked = rank(&[1.0, 1.0, 0.3], 1);

        assert!(ranked.iter().all(|s| s.row != 1));
        assert_eq!(ranked[0].row, 0);
    }

    // ============================================================
    // ENGINE
    // ============================================================

    #[test]
    fn test_recommend_end_to_end_example() {
        let dataset = dataset();
        assert_eq!(
            titles_of(&dataset, "Alpha"),
            vec!["Beta", "Delta", "Epsilon", "Gamma"]
        );
    }

    #[test]
    fn test_recommend_never_includes_query() {
        let dataset = dataset();
        for title in TITLES {
            let titles = titles_of(&dataset, title);
            assert!(!titles.contains(&title.to_string()), "{} recommended itself", title);
        }
    }

    #[test]
    fn test_recommend_cardinality() {
        let dataset = dataset();
        for title in TITLES {
            assert_eq!(
                recommend(&dataset, title).unwrap().len(),
                MAX_RECOMMENDATIONS.min(TITLES.len() - 1)
            );
        }

        let small = Dataset::new(
            vec![],
            pivot(&["One", "Two", "Three"]),
            vec![],
            SimilarityMatrix(vec![vec![1.0, 0.2, 0.4], vec![0.2, 1.0, 0.1], vec![0.4, 0.1, 1.0]]),
        )
        .unwrap();
        assert_eq!(recommend(&small, "One").unwrap().len(), 2);

        let single = Dataset::new(vec![], pivot(&["Solo"]), vec![], SimilarityMatrix(vec![vec![1.0]]))
            .unwrap();
        assert!(recommend(&single, "Solo").unwrap().is_empty());
    }

    #[test]
    fn test_recommend_ordering_follows_similarity() {
        let dataset = dataset();
        let scores = matrix();

        for (query, title) in TITLES.iter().enumerate() {
            let results = titles_of(&dataset, title);
            let similarity: Vec<f64> = results
                .iter()
                .map(|t| {
                    let row = TITLES.iter().position(|x| x == t).unwrap();
                    scores.0[query][row]
                })
                .collect();

            for pair in similarity.windows(2) {
                assert!(pair[0] >= pair[1], "Out of order for {}: {:?}", title, similarity);
            }
        }
    }

    #[test]
    fn test_recommend_tie_breaks_by_pivot_order() {
        let dataset = dataset();
        // Delta and Epsilon are both 0.6 from Beta; Delta comes first in the pivot
        assert_eq!(
            titles_of(&dataset, "Beta"),
            vec!["Alpha", "Delta", "Epsilon", "Gamma"]
        );
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let dataset = dataset();
        assert_eq!(
            recommend(&dataset, "Gamma").unwrap(),
            recommend(&dataset, "Gamma").unwrap()
        );
    }

    #[test]
    fn test_recommend_unknown_title() {
        let dataset = dataset();
        assert_eq!(
            recommend(&dataset, "Zeta"),
            Err(RecommendError::BookNotFound)
        );
    }

    #[test]
    fn test_recommend_requires_exact_match() {
        let dataset = dataset();
        assert_eq!(recommend(&dataset, "alpha"), Err(RecommendError::BookNotFound));
        assert_eq!(recommend(&dataset, "Alpha "), Err(RecommendError::BookNotFound));
    }

    #[test]
    fn test_recommend_empty_pivot() {
        let dataset =
            Dataset::new(vec![], RatingsPivot::default(), catalog(), SimilarityMatrix::default())
                .unwrap();
        assert_eq!(recommend(&dataset, "Alpha"), Err(RecommendError::BookNotFound));
    }

    #[test]
    fn test_recommend_empty_similarity_matrix() {
        let dataset =
            Dataset::new(vec![], pivot(&TITLES), catalog(), SimilarityMatrix::default()).unwrap();

        let err = recommend(&dataset, "Alpha").unwrap_err();

        assert_eq!(err, RecommendError::EmptySimilarityData);
        assert_eq!(err.to_string(), "No similarity scores available");
    }

    #[test]
    fn test_recommend_not_found_checked_before_empty_matrix() {
        let dataset =
            Dataset::new(vec![], pivot(&TITLES), catalog(), SimilarityMatrix::default()).unwrap();
        assert_eq!(recommend(&dataset, "Zeta"), Err(RecommendError::BookNotFound));
    }

    #[test]
    fn test_recommend_joins_first_catalog_row() {
        let dataset = dataset();
        let results = recommend(&dataset, "Alpha").unwrap();

        let delta = &results[1];
        assert_eq!(delta.title, "Delta");
        assert_eq!(delta.author.as_deref(), Some("Dora"));
        assert_eq!(delta.image_url.as_deref(), Some("http://images.example/delta.jpg"));
    }

    #[test]
    fn test_recommend_tolerates_missing_catalog_row() {
        let dataset = dataset();
        let results = recommend(&dataset, "Alpha").unwrap();

        let gamma = &results[3];
        assert_eq!(gamma.title, "Gamma");
        assert!(gamma.author.is_none());
        assert!(gamma.image_url.is_none());
    }

    // ============================================================
    // HANDLERS
    // ============================================================

    #[tokio::test]
    async fn test_handle_index_parallel_columns() {
        let body = handle_index(Extension(Arc::new(dataset()))).await.0;

        assert_eq!(body.book_name, vec!["Alpha", "Beta"]);
        assert_eq!(body.author, vec!["Ann", "Bob"]);
        assert_eq!(body.votes, vec![300, 250]);
        assert_eq!(body.rating, vec![4.5, 4.1]);
        assert_eq!(body.image.len(), body.book_name.len());
    }

    #[tokio::test]
    async fn test_handle_recommend_ui_serves_form() {
        let page = handle_recommend_ui().await.0;

        assert!(page.contains("action=\"/recommend_books\""));
        assert!(page.contains("name=\"user_input\""));
    }

    #[tokio::test]
    async fn test_handle_recommend_books_success() {
        let form = RecommendForm {
            user_input: Some("Alpha".to_string()),
        };

        let body = handle_recommend_books(Extension(Arc::new(dataset())), Form(form))
            .await
            .0;

        assert!(body.error.is_none());
        assert_eq!(body.data.len(), 4);
        assert_eq!(body.data[0].title, "Beta");
    }

    #[tokio::test]
    async fn test_handle_recommend_books_not_found() {
        let form = RecommendForm {
            user_input: Some("Nonexistent".to_string()),
        };

        let body = handle_recommend_books(Extension(Arc::new(dataset())), Form(form))
            .await
            .0;

        assert!(body.data.is_empty());
        assert_eq!(body.error.as_deref(), Some("Book not found"));
    }

    #[tokio::test]
    async fn test_handle_recommend_books_missing_field() {
        let form = RecommendForm { user_input: None };

        let body = handle_recommend_books(Extension(Arc::new(dataset())), Form(form))
            .await
            .0;

        assert!(body.data.is_empty());
        assert_eq!(body.error.as_deref(), Some("Book not found"));
    }

    #[tokio::test]
    async fn test_handle_recommend_books_empty_matrix() {
        let dataset =
            Dataset::new(vec![], pivot(&TITLES), catalog(), SimilarityMatrix::default()).unwrap();
        let form = RecommendForm {
            user_input: Some("Alpha".to_string()),
        };

        let body = handle_recommend_books(Extension(Arc::new(dataset)), Form(form))
            .await
            .0;

        assert!(body.data.is_empty());
        assert_eq!(body.error.as_deref(), Some("No similarity scores available"));
    }

    #[tokio::test]
    async fn test_handle_health_counts() {
        let body = handle_health(Extension(Arc::new(dataset()))).await.0;

        assert_eq!(body.popular, 2);
        assert_eq!(body.titles, 5);
        assert_eq!(body.users, 1);
        assert_eq!(body.catalog, 5);
        assert!(body.has_similarity);
    }

    // ============================================================
    // SERIALIZATION
    // ============================================================

    #[test]
    fn test_recommend_response_omits_absent_error() {
        let response = RecommendResponse {
            data: vec![],
            error: None,
        };

        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("error").is_none());
        assert_eq!(json["data"], serde_json::json!([]));
    }
}
