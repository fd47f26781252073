//! Shared error classification for route-bound fetches.
//!
//! Two operations (page search and markdown retrieval) run in the context
//! of a navigated route and share the same status interpretation: an
//! explicit backend 404 becomes [`Error::NotFound`], a backend 500 or a
//! route with no franchise segment becomes [`Error::ServerError`], and
//! anything else is left to the caller's own shape validation.

use lorebook_core::{Error, Result, RouteContext};
use reqwest::StatusCode;

/// Classify a response status against the navigated route.
///
/// Returns `Ok(())` when neither the status nor the route demands an
/// immediate failure; callers then apply their own shape validation.
pub(crate) fn classify_status(status: StatusCode, route: &RouteContext) -> Result<()> {
    if status == StatusCode::NOT_FOUND {
        return Err(Error::not_found("page not found"));
    }
    if status == StatusCode::INTERNAL_SERVER_ERROR || route.franchise().is_none() {
        return Err(Error::server_error("backend failure or missing franchise route"));
    }
    Ok(())
}

/// Classify a status and additionally pass through any other non-success
/// code verbatim.
///
/// Used where the contract fails immediately on any error status rather
/// than deferring to shape validation.
pub(crate) fn ensure_success(status: StatusCode, route: &RouteContext) -> Result<()> {
    classify_status(status, route)?;
    if !status.is_success() {
        return Err(Error::upstream(status.as_u16()));
    }
    Ok(())
}
