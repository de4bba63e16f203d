//! Table of contents outline.

use std::fmt::Write;

use folio_renderer::escape_html;

use crate::content::Heading;

/// Outline node: a top-level heading and the sub-headings nested under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingNode {
    /// Anchor id of the heading.
    pub id: String,
    /// Heading level (1-4).
    pub level: u8,
    /// Heading text.
    pub text: String,
    /// Nested sub-headings (level 3 and 4).
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    fn leaf(heading: &Heading) -> Self {
        Self {
            id: heading.id.clone(),
            level: heading.level,
            text: heading.text.clone(),
            children: Vec::new(),
        }
    }
}

/// Table of contents entry.
///
/// Flat view of the outline in link order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-4).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Select the headings that take part in the outline.
///
/// Levels 2-4 are used; when the content has none of those, levels 1-3.
#[must_use]
pub fn collect_outline_headings(headings: &[Heading]) -> Vec<&Heading> {
    let primary: Vec<&Heading> = headings
        .iter()
        .filter(|h| (2..=4).contains(&h.level))
        .collect();
    if !primary.is_empty() {
        return primary;
    }
    headings
        .iter()
        .filter(|h| (1..=3).contains(&h.level))
        .collect()
}

/// Build a two-level outline from headings in document order.
///
/// Level 1 and 2 headings start top-level entries; level 3 and 4 headings
/// nest under the most recent top-level entry. Sub-headings that appear
/// before any top-level heading are dropped.
#[must_use]
pub fn build_outline<'a>(headings: impl IntoIterator<Item = &'a Heading>) -> Vec<HeadingNode> {
    let mut outline: Vec<HeadingNode> = Vec::new();

    for heading in headings {
        match heading.level {
            1 | 2 => outline.push(HeadingNode::leaf(heading)),
            _ => {
                if let Some(parent) = outline.last_mut() {
                    parent.children.push(HeadingNode::leaf(heading));
                }
            }
        }
    }

    outline
}

/// Flatten an outline into entries in link order.
///
/// Each top-level node is followed by its children, matching the order of
/// the links in [`render_outline`] output.
#[must_use]
pub fn flatten(outline: &[HeadingNode]) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    for node in outline {
        entries.push(TocEntry {
            level: node.level,
            title: node.text.clone(),
            id: node.id.clone(),
        });
        for child in &node.children {
            entries.push(TocEntry {
                level: child.level,
                title: child.text.clone(),
                id: child.id.clone(),
            });
        }
    }
    entries
}

/// Render the outline as a nested link list.
///
/// An empty outline renders the empty-state marker with `empty_label`.
#[must_use]
pub fn render_outline(outline: &[HeadingNode], empty_label: &str) -> String {
    if outline.is_empty() {
        return format!(r#"<p class="toc-empty">{}</p>"#, escape_html(empty_label));
    }

    let mut html = String::with_capacity(outline.len() * 96);
    html.push_str("<ul class=\"toc-list\">\n");
    for node in outline {
        html.push_str("<li>");
        push_link(&mut html, node);
        if !node.children.is_empty() {
            html.push_str("\n<ol>\n");
            for child in &node.children {
                html.push_str("<li>");
                push_link(&mut html, child);
                html.push_str("</li>\n");
            }
            html.push_str("</ol>\n");
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>");
    html
}

fn push_link(html: &mut String, node: &HeadingNode) {
    let id = escape_html(&node.id);
    write!(
        html,
        r##"<a href="#{id}" class="lvl-{}" data-toc-link="{id}">{}</a>"##,
        node.level,
        escape_html(&node.text)
    )
    .unwrap();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn heading(level: u8, id: &str) -> Heading {
        Heading {
            level,
            id: id.to_owned(),
            text: id.to_uppercase(),
        }
    }

    #[test]
    fn test_collect_prefers_levels_two_to_four() {
        let headings = vec![heading(1, "t"), heading(2, "a"), heading(4, "b")];
        let ids: Vec<&str> = collect_outline_headings(&headings)
            .iter()
            .map(|h| h.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_collect_falls_back_to_levels_one_to_three() {
        let headings = vec![heading(1, "t"), heading(1, "u")];
        assert_eq!(collect_outline_headings(&headings).len(), 2);
    }

    #[test]
    fn test_collect_empty() {
        assert!(collect_outline_headings(&[]).is_empty());
    }

    #[test]
    fn test_outline_nests_level_three_under_level_two() {
        let headings = vec![
            heading(2, "a"),
            heading(3, "a1"),
            heading(3, "a2"),
            heading(2, "b"),
        ];
        let outline = build_outline(&headings);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].children.len(), 2);
        assert_eq!(outline[0].children[1].id, "a2");
        assert!(outline[1].children.is_empty());
    }

    #[test]
    fn test_outline_nests_level_four() {
        let headings = vec![heading(2, "a"), heading(4, "deep")];
        let outline = build_outline(&headings);
        assert_eq!(outline[0].children[0].id, "deep");
    }

    #[test]
    fn test_orphan_subheadings_are_dropped() {
        let headings = vec![heading(3, "orphan"), heading(2, "a"), heading(3, "child")];
        let outline = build_outline(&headings);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].id, "a");
        assert_eq!(outline[0].children.len(), 1);
    }

    #[test]
    fn test_level_one_starts_top_level_entry() {
        let headings = vec![heading(1, "t"), heading(3, "c")];
        let outline = build_outline(&headings);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].children[0].id, "c");
    }

    #[test]
    fn test_flatten_keeps_link_order() {
        let headings = vec![heading(2, "a"), heading(3, "a1"), heading(2, "b")];
        let ids: Vec<String> = flatten(&build_outline(&headings))
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["a", "a1", "b"]);
    }

    #[test]
    fn test_render_outline() {
        let headings = vec![heading(2, "intro"), heading(3, "why")];
        let html = render_outline(&build_outline(&headings), "No headings");
        assert_eq!(
            html,
            "<ul class=\"toc-list\">\n\
             <li><a href=\"#intro\" class=\"lvl-2\" data-toc-link=\"intro\">INTRO</a>\n\
             <ol>\n\
             <li><a href=\"#why\" class=\"lvl-3\" data-toc-link=\"why\">WHY</a></li>\n\
             </ol>\n\
             </li>\n\
             </ul>"
        );
    }

    #[test]
    fn test_render_outline_escapes_text() {
        let outline = vec![HeadingNode {
            id: "qa".to_owned(),
            level: 2,
            text: "Q & <A>".to_owned(),
            children: Vec::new(),
        }];
        assert!(render_outline(&outline, "").contains(">Q &amp; &lt;A&gt;</a>"));
    }

    #[test]
    fn test_render_empty_outline() {
        assert_eq!(
            render_outline(&[], "No headings"),
            r#"<p class="toc-empty">No headings</p>"#
        );
    }
}
