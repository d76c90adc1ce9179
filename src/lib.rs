//! Book Recommender Library
//!
//! This library crate defines the core modules of the recommendation service.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! - **`config`**: Command-line and environment configuration for the server.
//! - **`dataset`**: Loads the precomputed artifacts (popularity table, ratings pivot,
//!   catalog, similarity matrix) with a binary-then-JSON format fallback, and aligns
//!   similarity rows with pivot titles into one immutable `Dataset`.
//! - **`recommend`**: Item-to-item lookup over the similarity matrix plus the
//!   HTTP handlers that expose it.

pub mod config;
pub mod dataset;
pub mod recommend;
