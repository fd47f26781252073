//! Wire DTOs returned by the content backend.
//!
//! All entities are transient request/response records: the fetcher
//! validates their shape on receipt and never mutates them afterwards.
//! Shape validation is structural — deserializing a record from an array,
//! a scalar, or an object with missing/mistyped fields fails, unlike the
//! duck-typed checks this contract replaced.

use serde::{Deserialize, Serialize};

/// Metadata for a top-level content collection (a franchise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FranchiseMetadata {
    /// Display title of the franchise.
    pub title: String,

    /// Short description shown in listings and embeds.
    pub description: String,

    /// Icon image reference.
    pub ico_image: String,

    /// Wiki header image reference.
    pub wiki_head_image: String,

    /// Fallback image reference for link embeds.
    pub default_embed_image: String,

    /// Display image reference.
    pub image: String,

    /// Canonical proper name of the franchise.
    pub franchise_proper_name: String,

    /// Number of pages under this franchise. Non-negative by type.
    pub page_count: u64,

    /// Routable path segment for the franchise.
    pub dynamic_path: String,

    /// Whether the franchise is a first-party creation.
    ///
    /// `first_party` is the canonical wire key. Unlike
    /// [`SearchResultEntry::dynamic_path`], which carries an alias for a
    /// legacy backend spelling, this field only ever had one spelling, so
    /// it is a clean break with no input alias.
    pub first_party: bool,

    /// Last-modified timestamp (epoch-based). Monotonicity across edits
    /// is a backend property, not enforced client-side.
    pub last_modified: i64,
}

/// A single search result row.
///
/// The backend historically emitted two otherwise-identical shapes, one
/// keyed `dynamic_path` and one keyed `dynamic_route`. They are unified
/// here on `dynamic_path`, with the legacy key accepted as an input alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultEntry {
    /// Display title of the result.
    pub title: String,

    /// Short description of the result.
    pub description: String,

    /// Image reference for the result.
    pub image: String,

    /// Routable path the result navigates to.
    #[serde(alias = "dynamic_route")]
    pub dynamic_path: String,

    /// Whether the result should be hidden behind a spoiler cover.
    pub spoiler: bool,

    /// Last-modified timestamp (epoch-based).
    pub last_modified: i64,
}

/// A category search result. Same wire shape as [`SearchResultEntry`].
pub type CategorySearchResult = SearchResultEntry;

/// Payload of `/api/get_markdown/{path}` when the path is a search/index
/// page: the result rows plus the owning franchise's metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchPage {
    /// Search result rows for the page.
    pub search_list: Vec<SearchResultEntry>,

    /// Metadata of the franchise the page belongs to.
    pub franchise_data: FranchiseMetadata,
}

/// Payload of `/api/get_markdown/{path}` when the path is a content page:
/// the raw markdown plus the owning franchise's metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkdownPayload {
    /// Raw markdown body of the page.
    pub markdown_string: String,

    /// Metadata of the franchise the page belongs to.
    pub franchise_data: FranchiseMetadata,
}
