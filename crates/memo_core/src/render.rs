//! Markdown rendering helpers for memo content.
//!
//! # Responsibility
//! - Render memo markdown to an HTML fragment for the viewer.
//! - Derive a plain-text preview for list displays.
//!
//! # Invariants
//! - Raw HTML embedded in memo content is escaped, never passed through.
//! - Link and image destinations with a script-capable scheme are replaced
//!   by an inert `#`.
//! - Preview output never contains newlines.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use regex::Regex;

/// Default preview length used by list displays.
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

/// Schemes that execute or smuggle content when followed from rendered HTML.
const BLOCKED_URL_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!|]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Renders markdown to HTML with tables, strikethrough and task lists.
pub fn markdown_to_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let events = Parser::new_ext(content, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: inert_if_blocked(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: inert_if_blocked(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn inert_if_blocked(url: CowStr<'_>) -> CowStr<'_> {
    if has_blocked_scheme(&url) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// Whether `url` starts with a blocked scheme, ignoring case and the
/// whitespace/control characters browsers strip while parsing schemes.
fn has_blocked_scheme(url: &str) -> bool {
    let normalized = url
        .chars()
        .filter(|ch| !ch.is_whitespace() && !ch.is_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCKED_URL_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}

/// Derives a plain-text summary of markdown content.
///
/// Images are dropped, links keep their label, markdown symbols are removed
/// and whitespace is collapsed. Returns `None` when nothing readable remains.
pub fn derive_preview(content: &str, max_chars: usize) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut preview = trimmed.chars().take(max_chars).collect::<String>();
    if trimmed.chars().count() > max_chars {
        preview.push_str("...");
    }
    Some(preview)
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
