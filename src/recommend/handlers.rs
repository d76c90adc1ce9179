use super::engine::recommend;
use super::types::{
    HealthResponse, PopularResponse, RecommendError, RecommendForm, RecommendResponse,
};
use crate::dataset::types::Dataset;
use axum::response::Html;
use axum::{Extension, Form, Json};
use std::sync::Arc;

pub async fn handle_index(Extension(dataset): Extension<Arc<Dataset>>) -> Json<PopularResponse> {
    let popular = &dataset.popular;

    Json(PopularResponse {
        book_name: popular.iter().map(|b| b.title.clone()).collect(),
        author: popular.iter().map(|b| b.author.clone()).collect(),
        image: popular.iter().map(|b| b.image_url.clone()).collect(),
        votes: popular.iter().map(|b| b.num_ratings).collect(),
        rating: popular.iter().map(|b| b.avg_rating).collect(),
    })
}

pub async fn handle_recommend_ui() -> Html<&'static str> {
    Html(include_str!("recommend.html"))
}

pub async fn handle_recommend_books(
    Extension(dataset): Extension<Arc<Dataset>>,
    Form(form): Form<RecommendForm>,
) -> Json<RecommendResponse> {
    // A missing field can never match a pivot title
    let result = match form.user_input.as_deref() {
        Some(title) => recommend(&dataset, title),
        None => Err(RecommendError::BookNotFound),
    };

    match result {
        Ok(data) => Json(RecommendResponse { data, error: None }),
        Err(e) => {
            tracing::debug!("No recommendations for {:?}: {}", form.user_input, e);
            Json(RecommendResponse {
                data: vec![],
                error: Some(e.to_string()),
            })
        }
    }
}

pub async fn handle_health(Extension(dataset): Extension<Arc<Dataset>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        popular: dataset.popular.len(),
        titles: dataset.pivot.len(),
        users: dataset.pivot.users.len(),
        catalog: dataset.catalog.len(),
        has_similarity: dataset.similarity.has_scores(),
    })
}
