//! Index entries and heading anchors.
//!
//! Anchors follow the convention of the renderer this output targets:
//! spaces become hyphens and nothing else is touched, so `[func] Example`
//! links to `#[func]-Example`.

/// Anchor for a section title.
pub fn anchor(title: &str) -> String {
    title.replace(' ', "-")
}

/// Link to a section title within the document.
pub fn render_toc_link(title: &str) -> String {
    format!("[{}](#{})", title, anchor(title))
}

/// A markdown list item linking to `title`.
pub fn render_toc_item(title: &str) -> String {
    format!("- {}", render_toc_link(title))
}
