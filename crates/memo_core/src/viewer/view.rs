//! Viewer presentation model.
//!
//! # Responsibility
//! - Project a memo into display-ready strings for the modal.
//! - Render the modal to an HTML fragment.
//!
//! # Invariants
//! - The modified line exists only when `updated_at != created_at`.
//! - Tag chips keep the memo's tag order, duplicates included.
//! - All memo text is escaped before it lands in markup.

use crate::model::category::CategoryBadge;
use crate::model::memo::{Memo, MemoId};
use crate::render::{escape_html, markdown_to_html};
use chrono::{DateTime, FixedOffset, Locale, Offset, Utc};

/// Formatting knobs for timestamp lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerOptions {
    pub locale: Locale,
    /// Wall-clock offset used for display.
    pub offset: FixedOffset,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            locale: Locale::en_US,
            offset: Utc.fix(),
        }
    }
}

/// Formats a timestamp as long-form localized date with weekday, plus hour
/// and minute.
pub fn format_long_datetime(at: DateTime<Utc>, options: &ViewerOptions) -> String {
    let pattern = match options.locale {
        Locale::ko_KR => "%Y년 %-m월 %-d일 %A %p %I:%M",
        Locale::ja_JP => "%Y年%-m月%-d日%A %H:%M",
        Locale::en_US => "%A, %B %-d, %Y %I:%M %p",
        _ => "%A %-d %B %Y %H:%M",
    };
    at.with_timezone(&options.offset)
        .format_localized(pattern, options.locale)
        .to_string()
}

/// Display-ready projection of one memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerView {
    pub memo_id: MemoId,
    pub title: String,
    pub badge: CategoryBadge,
    pub created_line: String,
    pub modified_line: Option<String>,
    pub content_html: String,
    pub tags: Vec<String>,
}

impl ViewerView {
    pub fn build(memo: &Memo, options: &ViewerOptions) -> Self {
        let modified_line = memo.is_edited().then(|| {
            format!(
                "Modified: {}",
                format_long_datetime(memo.updated_at, options)
            )
        });

        Self {
            memo_id: memo.id,
            title: memo.title.clone(),
            badge: CategoryBadge::for_code(&memo.category),
            created_line: format!("Created: {}", format_long_datetime(memo.created_at, options)),
            modified_line,
            content_html: markdown_to_html(&memo.content),
            tags: memo.tags.clone(),
        }
    }

    /// Renders the modal: backdrop, panel, header, meta, content, tags, actions.
    ///
    /// Click targets carry `data-target`/`data-action` attributes matching
    /// [`super::ClickTarget`].
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<div class="memo-viewer-backdrop" data-target="backdrop">"#);
        out.push_str(&format!(
            r#"<div class="memo-viewer-panel" data-target="panel" data-memo-id="{}" role="dialog" aria-modal="true">"#,
            self.memo_id
        ));

        out.push_str(r#"<header class="memo-viewer-header">"#);
        out.push_str(&format!(
            r#"<span class="badge {}">{}</span>"#,
            self.badge.style_class,
            escape_html(&self.badge.label)
        ));
        out.push_str(&format!("<h2>{}</h2>", escape_html(&self.title)));
        out.push_str(r#"<button type="button" data-action="close" aria-label="Close">&times;</button>"#);
        out.push_str("</header>");

        out.push_str(r#"<div class="memo-viewer-meta">"#);
        out.push_str(&format!("<p>{}</p>", escape_html(&self.created_line)));
        if let Some(line) = &self.modified_line {
            out.push_str(&format!("<p>{}</p>", escape_html(line)));
        }
        out.push_str("</div>");

        out.push_str(r#"<article class="memo-viewer-content">"#);
        out.push_str(&self.content_html);
        out.push_str("</article>");

        if !self.tags.is_empty() {
            out.push_str(r#"<ul class="memo-viewer-tags">"#);
            for tag in &self.tags {
                out.push_str(&format!(r#"<li class="tag">#{}</li>"#, escape_html(tag)));
            }
            out.push_str("</ul>");
        }

        out.push_str(r#"<footer class="memo-viewer-actions">"#);
        out.push_str(r#"<button type="button" data-action="edit">Edit</button>"#);
        out.push_str(r#"<button type="button" data-action="delete">Delete</button>"#);
        out.push_str("</footer>");

        out.push_str("</div></div>");
        out
    }
}
