//! Recommendation Module
//!
//! Item-to-item recommendations over the precomputed similarity matrix.
//!
//! ## Overview
//! A query title is matched exactly against the ratings pivot. Its similarity
//! row is ranked, the query itself is dropped, and the top entries are joined
//! with catalog metadata (author, cover image).
//!
//! ## Submodules
//! - **`engine`**: Ranking and catalog lookup.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Result records, errors, and API response bodies.

pub mod engine;
pub mod handlers;
pub mod types;

pub use engine::{MAX_RECOMMENDATIONS, recommend};
pub use types::{Recommendation, RecommendError};

#[cfg(test)]
mod tests;
