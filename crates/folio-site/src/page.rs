//! Post page rendering pipeline.
//!
//! [`PostPage::render`] runs a post through the Markdown renderer, assigns
//! heading anchors, builds the outline and estimates reading time. The
//! result is plain data consumed by the page templates.

use folio_renderer::{plain_text, reading_time_minutes, render};
use folio_toc::{
    ContentRoot, HeadingNode, TocEntry, build_outline, collect_outline_headings,
    ensure_heading_ids, flatten, render_outline,
};

use crate::date::format_date;
use crate::model::Post;

/// Settings that shape a rendered post page.
#[derive(Clone, Debug)]
pub struct PageOptions {
    /// Reading speed for the reading-time estimate.
    pub reading_wpm: u32,
    /// Label shown in the TOC when the post has no headings.
    pub empty_label: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            reading_wpm: 220,
            empty_label: "No headings".to_owned(),
        }
    }
}

/// A post ready for templating.
#[derive(Clone, Debug)]
pub struct PostPage {
    pub id: String,
    pub title: String,
    /// Display date, e.g. `15 Aug 2025`.
    pub date: String,
    pub tags: Vec<String>,
    /// Rendered body with heading anchors.
    pub html: String,
    /// Nested outline.
    pub outline: Vec<HeadingNode>,
    /// Flat TOC entries in link order.
    pub toc: Vec<TocEntry>,
    /// Rendered TOC markup, or the empty-state marker.
    pub toc_html: String,
    /// Estimated reading time in whole minutes (at least 1).
    pub reading_minutes: u32,
}

impl PostPage {
    /// Render `post`.
    #[must_use]
    pub fn render(post: &Post, options: &PageOptions) -> Self {
        let mut root = ContentRoot::new(render(&post.content_md));
        let headings = ensure_heading_ids(&mut root);
        let outline = build_outline(collect_outline_headings(&headings));

        let toc = flatten(&outline);
        let toc_html = render_outline(&outline, &options.empty_label);

        let html = root.into_html();
        let reading_minutes = reading_time_minutes(&plain_text(&html), options.reading_wpm);

        tracing::debug!(
            id = %post.id,
            headings = headings.len(),
            reading_minutes,
            "Rendered post"
        );

        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            date: format_date(&post.date),
            tags: post.tags.clone(),
            toc,
            toc_html,
            html,
            outline,
            reading_minutes,
        }
    }
}
