//! Rendered content with addressable heading elements.

use std::fmt::Write;
use std::sync::LazyLock;

use folio_renderer::{escape_html, plain_text};
use regex::Regex;

use crate::slug::{IdRegistry, slugify};

/// Matches `<h1>`..`<h4>` elements. Headings never nest, so the first
/// closing heading tag ends the element.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<h([1-4])((?:\s[^>]*)?)>(.*?)</h[1-4]>").unwrap());

static ID_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\sid\s*=\s*"([^"]*)""#).unwrap());

/// A heading element as found in the content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingElement {
    /// Heading level (1-4).
    pub level: u8,
    /// Existing `id` attribute, if any.
    pub id: Option<String>,
    /// Visible text content.
    pub text: String,
}

/// A heading with its final, page-unique anchor id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1-4).
    pub level: u8,
    /// Anchor id.
    pub id: String,
    /// Visible text content, trimmed.
    pub text: String,
}

/// Rendered HTML that the TOC is built from.
///
/// Stands in for the content container of a page: headings are discovered
/// by scanning the markup, and their `id` attributes can be rewritten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentRoot {
    html: String,
}

impl ContentRoot {
    /// Wrap rendered HTML.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Current HTML, including any assigned ids.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Consume the root and return its HTML.
    #[must_use]
    pub fn into_html(self) -> String {
        self.html
    }

    /// Heading elements in document order.
    #[must_use]
    pub fn headings(&self) -> Vec<HeadingElement> {
        HEADING_RE
            .captures_iter(&self.html)
            .map(|caps| HeadingElement {
                level: caps[1].parse().unwrap_or(1),
                id: ID_ATTR_RE
                    .captures(&caps[2])
                    .map(|id| id[1].to_owned()),
                text: plain_text(&caps[3]),
            })
            .collect()
    }

    /// Set the `id` of every heading, in document order.
    ///
    /// Existing `id` attributes are replaced; other attributes are kept.
    /// Headings beyond the end of `ids` are left untouched.
    pub fn set_heading_ids(&mut self, ids: &[String]) {
        let mut out = String::with_capacity(self.html.len() + ids.len() * 16);
        let mut last = 0;

        for (caps, id) in HEADING_RE.captures_iter(&self.html).zip(ids) {
            let (Some(whole), Some(attrs)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            let level = &caps[1];
            let kept_attrs = ID_ATTR_RE.replace_all(attrs.as_str(), "");

            out.push_str(&self.html[last..whole.start()]);
            write!(
                out,
                r#"<h{level} id="{}"{kept_attrs}>{}</h{level}>"#,
                escape_html(id),
                &caps[3]
            )
            .unwrap();
            last = whole.end();
        }

        out.push_str(&self.html[last..]);
        self.html = out;
    }
}

/// Give every heading in `root` a non-empty, page-unique id.
///
/// An existing id is kept as the base; otherwise the slug of the heading
/// text is used, falling back to `section-<n>` (1-based position) when the
/// slug is empty. Collisions within the page get `-2`, `-3`, ... suffixes.
///
/// Returns all headings with their final ids, in document order.
pub fn ensure_heading_ids(root: &mut ContentRoot) -> Vec<Heading> {
    let mut registry = IdRegistry::default();

    let headings: Vec<Heading> = root
        .headings()
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let existing = element
                .id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_owned);
            let base = existing
                .or_else(|| Some(slugify(&element.text)).filter(|slug| !slug.is_empty()))
                .unwrap_or_else(|| format!("section-{}", index + 1));

            Heading {
                level: element.level,
                id: registry.claim(&base),
                text: element.text.trim().to_owned(),
            }
        })
        .collect();

    let ids: Vec<String> = headings.iter().map(|h| h.id.clone()).collect();
    root.set_heading_ids(&ids);

    tracing::debug!(count = headings.len(), "Assigned heading ids");
    headings
}
