//! Markdown parsing and content utilities for Lorebook.
//!
//! This crate turns raw markdown bodies from the content backend into a
//! parsed document representation the rendering layer can consume.
//!
//! # Features
//!
//! - Markdown-to-HTML rendering with heading extraction
//! - Relative-link prefix rewriting for franchise-scoped pages

pub mod markdown;

pub use markdown::{Heading, ParsedDocument, parse_markdown, rewrite_relative_links};
