//! Lorebook Core — shared types, errors, and route context.
//!
//! This crate provides the foundational types used across all Lorebook
//! crates. It has no internal Lorebook dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: Wire DTOs returned by the content backend
//! - [`route`]: Navigational context of the page that triggered a fetch

pub mod error;
pub mod route;
pub mod types;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use route::RouteContext;
pub use types::{
    CategorySearchResult, FranchiseMetadata, MarkdownPayload, SearchPage, SearchResultEntry,
};
