//! The Lorebook content fetcher.
//!
//! Wraps the backend HTTP endpoints (markdown retrieval, last-changed
//! probes, and the three search surfaces) using [`reqwest`]. One request
//! per call; the calling task suspends until the response or transport
//! failure arrives, and cancellation is whatever dropping the future
//! provides.

use std::time::Duration;

use lorebook_content::{ParsedDocument, parse_markdown, rewrite_relative_links};
use lorebook_core::{
    CategorySearchResult, Error, FranchiseMetadata, MarkdownPayload, Result, RouteContext,
    SearchPage,
};

use crate::classify::{classify_status, ensure_success};

/// HTTP client for a Lorebook content backend.
#[derive(Debug, Clone)]
pub struct LorebookClient {
    http: reqwest::Client,
    base_url: String,
}

/// A fully processed content page: the rendered document, the owning
/// franchise's metadata, and the resolved endpoint path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownPage {
    /// Parsed markdown document ready for rendering.
    pub document: ParsedDocument,

    /// Metadata of the franchise the page belongs to.
    pub franchise_data: FranchiseMetadata,

    /// Endpoint path the page was fetched from.
    pub used_path: String,
}

impl LorebookClient {
    /// Create a new client for a backend instance.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://host:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for connection pooling across clients).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http: client,
            base_url: base_url.into(),
        }
    }

    /// Create a client with a request timeout.
    ///
    /// The fetch contract itself has no timeout policy; this only bounds
    /// how long the underlying transport may hang.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("http client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Fetch a search/index page.
    ///
    /// Sends `GET /api/get_markdown/{path}` and validates the payload as
    /// a [`SearchPage`]. Status classification runs first, so an explicit
    /// backend 404 wins regardless of payload shape.
    pub async fn fetch_search(&self, path: &str, route: &RouteContext) -> Result<SearchPage> {
        let response = self.get(&format!("/api/get_markdown/{path}")).await?;
        classify_status(response.status(), route)?;

        response
            .json::<SearchPage>()
            .await
            .map_err(|e| Error::server_error(format!("malformed search page: {e}")))
    }

    /// Fetch the last-changed timestamp for a page.
    ///
    /// Sends `GET /api/last_changed/{path}`. The body must parse as a
    /// JSON number; anything else is a server error.
    pub async fn fetch_last_changed(&self, path: &str) -> Result<i64> {
        let response = self.get(&format!("/api/last_changed/{path}")).await?;

        response
            .json::<i64>()
            .await
            .map_err(|e| Error::server_error(format!("malformed timestamp: {e}")))
    }

    /// Fetch and render a content page.
    ///
    /// Sends `GET /api/get_markdown/{path}`. Any non-success status fails
    /// immediately with that status (404 and 500 mapped through the shared
    /// classification, everything else passed through verbatim), bypassing
    /// shape validation. On success the payload is validated, the first
    /// franchise-relative link is rewritten, and the markdown is parsed.
    pub async fn fetch_markdown_parse(
        &self,
        path: &str,
        route: &RouteContext,
    ) -> Result<MarkdownPage> {
        let used_path = format!("/api/get_markdown/{path}");
        let response = self.get(&used_path).await?;
        ensure_success(response.status(), route)?;

        let payload = response
            .json::<MarkdownPayload>()
            .await
            .map_err(|e| Error::server_error(format!("malformed markdown page: {e}")))?;

        // ensure_success already rejected routes without a franchise segment.
        let franchise = route
            .franchise()
            .ok_or_else(|| Error::server_error("missing franchise route"))?;

        let markdown = rewrite_relative_links(&payload.markdown_string, franchise);
        let document = parse_markdown(&markdown);

        Ok(MarkdownPage {
            document,
            franchise_data: payload.franchise_data,
            used_path,
        })
    }

    /// Search categories within a franchise.
    ///
    /// Sends `GET /api/search/category/{franchise}?search_input=…`. A JSON
    /// array (possibly empty) is returned unchanged; `null` or any
    /// non-array payload is a server error.
    pub async fn fetch_category_search(
        &self,
        franchise: &str,
        search_input: &str,
    ) -> Result<Vec<CategorySearchResult>> {
        let response = self
            .get_with_query(
                &format!("/api/search/category/{franchise}"),
                &[("search_input", search_input)],
            )
            .await?;

        Self::parse_result_list(response).await
    }

    /// Search pages within a category of a franchise.
    ///
    /// Sends `GET /api/search/cat_contents/{franchise}` with the search
    /// text and category name as query parameters. Same contract as
    /// [`fetch_category_search`](Self::fetch_category_search).
    pub async fn fetch_category_content_search(
        &self,
        franchise: &str,
        category: &str,
        search_input: &str,
    ) -> Result<Vec<CategorySearchResult>> {
        let response = self
            .get_with_query(
                &format!("/api/search/cat_contents/{franchise}"),
                &[("search_input", search_input), ("catalog", category)],
            )
            .await?;

        Self::parse_result_list(response).await
    }

    /// Search across all wikis.
    ///
    /// Sends `GET /api/search/wiki_search?search_input=…` and returns the
    /// matching franchises. Same validation contract as the other search
    /// operations.
    pub async fn fetch_search_wikis(&self, search_input: &str) -> Result<Vec<FranchiseMetadata>> {
        let response = self
            .get_with_query("/api/search/wiki_search", &[("search_input", search_input)])
            .await?;

        response
            .json::<Vec<FranchiseMetadata>>()
            .await
            .map_err(|e| Error::server_error(format!("malformed wiki list: {e}")))
    }

    // ------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------

    /// Issue a GET to `{base_url}{path}`.
    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "GET");
        self.http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::server_error(format!("request failed: {e}")))
    }

    /// Issue a GET to `{base_url}{path}` with query parameters.
    async fn get_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, params = query.len(), "GET");
        self.http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::server_error(format!("request failed: {e}")))
    }

    /// Parse a response body as a list of search result rows.
    async fn parse_result_list(response: reqwest::Response) -> Result<Vec<CategorySearchResult>> {
        response
            .json::<Vec<CategorySearchResult>>()
            .await
            .map_err(|e| Error::server_error(format!("malformed result list: {e}")))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn franchise_json() -> serde_json::Value {
        serde_json::json!({
            "title": "Example",
            "description": "An example franchise",
            "ico_image": "/img/ico.png",
            "wiki_head_image": "/img/head.png",
            "default_embed_image": "/img/embed.png",
            "image": "/img/display.png",
            "franchise_proper_name": "The Example Saga",
            "page_count": 12,
            "dynamic_path": "example",
            "first_party": false,
            "last_modified": 1700000000
        })
    }

    fn result_json(title: &str) -> serde_json::Value {
        serde_json::json!({
            "title": title,
            "description": "desc",
            "image": "/img/r.png",
            "dynamic_path": "example/page",
            "spoiler": false,
            "last_modified": 1700000000
        })
    }

    fn route() -> RouteContext {
        RouteContext::for_franchise("myFranchise")
    }

    // ------------------------------------------------------------------
    // fetch_search
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_fetch_search_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get_markdown/example"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "search_list": [result_json("One"), result_json("Two")],
                "franchise_data": franchise_json()
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let page = client.fetch_search("example", &route()).await.unwrap();

        assert_eq!(page.search_list.len(), 2);
        assert_eq!(page.search_list[0].title, "One");
        assert_eq!(page.franchise_data.dynamic_path, "example");
    }

    #[tokio::test]
    async fn test_fetch_search_bad_shape_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get_markdown/example"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "search_list": "not a list",
                "franchise_data": franchise_json()
            })))
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let err = client.fetch_search("example", &route()).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_fetch_search_404_wins_over_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get_markdown/gone"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"totally": "unrelated"})),
            )
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let err = client.fetch_search("gone", &route()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_search_missing_franchise_route_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get_markdown/example"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "search_list": [],
                "franchise_data": franchise_json()
            })))
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let err = client
            .fetch_search("example", &RouteContext::new())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    // ------------------------------------------------------------------
    // fetch_last_changed
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_fetch_last_changed_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/last_changed/example/page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(1700000123)))
            .expect(1)
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let ts = client.fetch_last_changed("example/page").await.unwrap();
        assert_eq!(ts, 1700000123);
    }

    #[tokio::test]
    async fn test_fetch_last_changed_non_numeric_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/last_changed/example"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!("not a number")),
            )
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let err = client.fetch_last_changed("example").await.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    // ------------------------------------------------------------------
    // fetch_markdown_parse
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_fetch_markdown_parse_rewrites_first_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get_markdown/example/page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "markdown_string": "see [link](./page.md) and [other](./other.md)",
                "franchise_data": franchise_json()
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let page = client
            .fetch_markdown_parse("example/page", &route())
            .await
            .unwrap();

        // First occurrence rewritten, second untouched.
        assert!(page.document.html.contains("myFranchise/page.md"));
        assert!(page.document.html.contains("./other.md"));
        assert_eq!(page.used_path, "/api/get_markdown/example/page");
        assert_eq!(page.franchise_data.title, "Example");
    }

    #[tokio::test]
    async fn test_fetch_markdown_parse_503_passes_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get_markdown/example/page"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(serde_json::json!({
                    "markdown_string": "valid shape, irrelevant",
                    "franchise_data": franchise_json()
                })),
            )
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let err = client
            .fetch_markdown_parse("example/page", &route())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 503);
    }

    #[tokio::test]
    async fn test_fetch_markdown_parse_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get_markdown/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let err = client
            .fetch_markdown_parse("missing", &route())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_markdown_parse_bad_shape_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get_markdown/example/page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "markdown_string": 42,
                "franchise_data": franchise_json()
            })))
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let err = client
            .fetch_markdown_parse("example/page", &route())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    // ------------------------------------------------------------------
    // fetch_category_search
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_fetch_category_search_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search/category/example"))
            .and(query_param("search_input", "sword"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([result_json("Swords")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let results = client
            .fetch_category_search("example", "sword")
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Swords");
    }

    #[tokio::test]
    async fn test_fetch_category_search_empty_array_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search/category/example"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let results = client
            .fetch_category_search("example", "nothing")
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_category_search_null_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search/category/example"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(null)))
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let err = client
            .fetch_category_search("example", "anything")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    // ------------------------------------------------------------------
    // fetch_category_content_search
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_fetch_category_content_search_sends_both_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search/cat_contents/example"))
            .and(query_param("search_input", "dragon"))
            .and(query_param("catalog", "creatures"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([result_json("Dragons")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let results = client
            .fetch_category_content_search("example", "creatures", "dragon")
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_category_content_search_null_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search/cat_contents/example"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(null)))
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let err = client
            .fetch_category_content_search("example", "c", "q")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    // ------------------------------------------------------------------
    // fetch_search_wikis
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_fetch_search_wikis_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search/wiki_search"))
            .and(query_param("search_input", "example"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([franchise_json()])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let wikis = client.fetch_search_wikis("example").await.unwrap();
        assert_eq!(wikis.len(), 1);
        assert_eq!(wikis[0].franchise_proper_name, "The Example Saga");
    }

    #[tokio::test]
    async fn test_fetch_search_wikis_null_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search/wiki_search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(null)))
            .mount(&server)
            .await;

        let client = LorebookClient::new(server.uri());
        let err = client.fetch_search_wikis("anything").await.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    // ------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------

    #[test]
    fn test_client_base_url() {
        let client = LorebookClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_with_timeout() {
        let client =
            LorebookClient::with_timeout("http://localhost:8000", Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_shared_client() {
        let shared = reqwest::Client::new();
        let a = LorebookClient::with_client(shared.clone(), "http://a:8000");
        let b = LorebookClient::with_client(shared, "http://b:8000");
        assert_eq!(a.base_url(), "http://a:8000");
        assert_eq!(b.base_url(), "http://b:8000");
    }
}
