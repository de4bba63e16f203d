//! Output file names and URLs for generated pages.
//!
//! Post ids are free-form text. Each post gets a file stem that is safe on
//! disk, and links to it percent-encode that stem.

use std::collections::HashSet;
use std::sync::LazyLock;

use folio_toc::slugify;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::{Captures, Regex};

use crate::model::Post;

/// Bytes escaped in a URL path segment: everything but unreserved characters.
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Opening `<a>` and `<img>` tags emitted by the renderer.
static URL_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:a|img)\s[^>]*>").unwrap());

static URL_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\b(src|href)="([^"]*)""#).unwrap());

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// File stems for `posts`, in document order.
///
/// An id made of ASCII letters, digits, `-`, `_` and `.` (not leading) is
/// used as is. Any other id is slugged, and an empty slug becomes
/// `post-<n>` with n the 1-based position. Stems are unique ignoring case;
/// later collisions get `-2`, `-3`, ...
pub(crate) fn post_file_stems(posts: &[Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            let base = file_stem_base(&post.id, i + 1);
            let mut candidate = base.clone();
            let mut n = 2;
            while !seen.insert(candidate.to_lowercase()) {
                candidate = format!("{base}-{n}");
                n += 1;
            }
            if candidate != post.id {
                tracing::debug!(id = %post.id, file = %candidate, "Derived post file name");
            }
            candidate
        })
        .collect()
}

fn file_stem_base(id: &str, position: usize) -> String {
    let safe = !id.starts_with('.')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if safe {
        return id.to_owned();
    }
    let slug = slugify(id);
    if slug.is_empty() {
        format!("post-{position}")
    } else {
        slug
    }
}

/// Site-relative URL of the page written for `stem`.
pub(crate) fn post_href(stem: &str) -> String {
    format!("posts/{}.html", utf8_percent_encode(stem, SEGMENT_ENCODE_SET))
}

/// Prefix relative `src` and `href` values in rendered `html` with `root`.
///
/// Only attributes of `<a>` and `<img>` tags are touched. Absolute URLs,
/// scheme URLs, in-page fragments and bare queries are left alone.
pub(crate) fn rebase_relative_urls(html: &str, root: &str) -> String {
    if root.is_empty() {
        return html.to_owned();
    }
    URL_TAG_RE
        .replace_all(html, |tag: &Captures| {
            URL_ATTR_RE
                .replace_all(&tag[0], |attr: &Captures| {
                    let url = &attr[2];
                    if is_relative(url) {
                        format!(r#"{}="{root}{url}""#, &attr[1])
                    } else {
                        attr[0].to_owned()
                    }
                })
                .into_owned()
        })
        .into_owned()
}

fn is_relative(url: &str) -> bool {
    !(url.is_empty()
        || url.starts_with(['/', '#', '?'])
        || SCHEME_RE.is_match(url))
}
