//! Markdown rendering and link rewriting.
//!
//! Pages arrive from the backend as raw markdown strings. Before
//! rendering, franchise-relative links (`](./…`) are rewritten to carry
//! the franchise path segment so navigation resolves from any route
//! depth. Rendering uses `pulldown-cmark` and additionally collects the
//! document's headings for table-of-contents use.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};
use serde::Serialize;

/// A heading collected while rendering a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level, 1 through 6.
    pub level: u8,

    /// Concatenated text content of the heading.
    pub text: String,
}

/// A markdown document rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    /// Rendered HTML body.
    pub html: String,

    /// Headings in document order.
    pub headings: Vec<Heading>,
}

/// Rewrite the first franchise-relative link prefix.
///
/// Replaces the first occurrence of the literal `](./` with
/// `](<franchise>/`. Exactly one occurrence is rewritten — this matches
/// the backend's content conventions as currently understood; see
/// DESIGN.md before making it global.
pub fn rewrite_relative_links(markdown: &str, franchise: &str) -> String {
    markdown.replacen("](./", &format!("]({franchise}/"), 1)
}

/// Parse a markdown string into a [`ParsedDocument`].
///
/// Enables tables, strikethrough, and footnotes on top of CommonMark.
pub fn parse_markdown(markdown: &str) -> ParsedDocument {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let events: Vec<Event<'_>> = Parser::new_ext(markdown, options).collect();

    let headings = collect_headings(&events);

    let mut html_out = String::new();
    html::push_html(&mut html_out, events.into_iter());

    log::debug!(
        "parsed markdown: {} bytes in, {} headings",
        markdown.len(),
        headings.len()
    );

    ParsedDocument {
        html: html_out,
        headings,
    }
}

/// Walk the event stream and collect heading text in document order.
fn collect_headings(events: &[Event<'_>]) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut current: Option<Heading> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some(Heading {
                    level: *level as u8,
                    text: String::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = current.take() {
                    headings.push(heading);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(text);
                }
            }
            _ => {}
        }
    }

    headings
}
