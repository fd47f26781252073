//! Navigational context of the page that triggered a fetch.
//!
//! The rendering layer resolves pages from dynamic route segments; the
//! fetcher only cares about the path parameters, notably the `franchise`
//! segment used for error classification and relative-link rewriting.

use std::collections::HashMap;

/// Path parameters of the route currently being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
    params: HashMap<String, String>,
}

impl RouteContext {
    /// Create an empty route context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with the `franchise` path parameter set.
    pub fn for_franchise(franchise: impl Into<String>) -> Self {
        Self::new().with_param("franchise", franchise)
    }

    /// Add a path parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up a path parameter by name.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The `franchise` path parameter, if present.
    pub fn franchise(&self) -> Option<&str> {
        self.param("franchise")
    }
}
