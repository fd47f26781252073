//! HTTP client for the Lorebook wiki content API.
//!
//! [`LorebookClient`] wraps the backend's GET endpoints: markdown page
//! retrieval, franchise metadata, and the three search surfaces. Each
//! operation issues exactly one outbound request, validates the response
//! shape structurally, and maps failures onto the small error taxonomy in
//! [`lorebook_core::Error`]. There is deliberately no retry, caching, or
//! request deduplication — failures surface immediately to the rendering
//! layer.

mod classify;
pub mod client;

pub use client::{LorebookClient, MarkdownPage};
