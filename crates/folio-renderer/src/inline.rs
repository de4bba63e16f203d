//! Inline formatting: images, links, bold, italic and code spans.
//!
//! Substitutions run in a fixed order on a single line: image, link, bold,
//! italic, code. Every pattern is non-greedy and `.` never crosses a
//! newline, so matches stay line-scoped and resolve leftmost-first.
//!
//! Tags emitted by the image and link passes are parked behind placeholders
//! until the emphasis and code passes are done, so their attribute values
//! are never rewritten.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::util::escape_attr;

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap());

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());

static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{1}([0-9]+)\u{1}").unwrap());

/// Delimiter around parked tag indices; never produced by escaping.
const MARK: char = '\u{1}';

/// Tags held out of the emphasis and code passes.
#[derive(Default)]
struct Parked {
    tags: Vec<String>,
}

impl Parked {
    fn park(&mut self, tag: String) -> String {
        self.tags.push(tag);
        format!("{MARK}{}{MARK}", self.tags.len() - 1)
    }

    fn restore(&self, text: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.tags.get(i))
                    .map_or_else(|| caps[0].to_owned(), Clone::clone)
            })
            .into_owned()
    }
}

/// Apply inline substitutions to one escaped line.
pub(crate) fn format_inline(text: &str) -> String {
    let mut parked = Parked::default();

    let imaged = IMAGE_RE.replace_all(text, |caps: &Captures| {
        parked.park(format!(
            r#"<img alt="{}" src="{}">"#,
            escape_attr(&caps[1]),
            escape_attr(&caps[2])
        ))
    });
    let linked = LINK_RE.replace_all(&imaged, |caps: &Captures| {
        let open = parked.park(format!(
            r#"<a href="{}" target="_blank" rel="noopener">"#,
            escape_attr(&caps[2])
        ));
        format!("{open}{}</a>", &caps[1])
    });
    let bold = BOLD_RE.replace_all(&linked, "<strong>${1}</strong>");
    let italic = ITALIC_RE.replace_all(&bold, "<em>${1}</em>");
    let coded = CODE_RE.replace_all(&italic, "<code>${1}</code>");

    parked.restore(&coded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link() {
        assert_eq!(
            format_inline("see [docs](https://example.com) now"),
            r#"see <a href="https://example.com" target="_blank" rel="noopener">docs</a> now"#
        );
    }

    #[test]
    fn test_link_url_quote_is_escaped() {
        assert_eq!(
            format_inline(r#"[x](a" onclick="b)"#),
            r#"<a href="a&quot; onclick=&quot;b" target="_blank" rel="noopener">x</a>"#
        );
    }

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(
            format_inline("**bold** and *italic*"),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn test_bold_is_non_greedy() {
        assert_eq!(
            format_inline("**a** b **c**"),
            "<strong>a</strong> b <strong>c</strong>"
        );
    }

    #[test]
    fn test_italic_inside_bold() {
        assert_eq!(
            format_inline("**very *much* so**"),
            "<strong>very <em>much</em> so</strong>"
        );
    }

    #[test]
    fn test_unpaired_star_is_literal() {
        assert_eq!(format_inline("2 * 3 = 6"), "2 * 3 = 6");
    }

    #[test]
    fn test_code_span() {
        assert_eq!(format_inline("run `cargo`"), "run <code>cargo</code>");
    }

    #[test]
    fn test_empty_code_span_is_literal() {
        assert_eq!(format_inline("``"), "``");
    }

    #[test]
    fn test_image_alone() {
        assert_eq!(
            format_inline("![Cover](img/cover.png)"),
            r#"<img alt="Cover" src="img/cover.png">"#
        );
    }

    #[test]
    fn test_image_with_text() {
        assert_eq!(
            format_inline("Figure: ![a](b.png) **bold**"),
            r#"Figure: <img alt="a" src="b.png"> <strong>bold</strong>"#
        );
    }

    #[test]
    fn test_image_with_empty_alt() {
        assert_eq!(format_inline("![](x.png)"), r#"<img alt="" src="x.png">"#);
    }

    #[test]
    fn test_image_is_not_a_link() {
        let html = format_inline("![logo](l.png) Title");
        assert_eq!(html, r#"<img alt="logo" src="l.png"> Title"#);
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_image_inside_link() {
        assert_eq!(
            format_inline("[![badge](b.svg)](https://ci.example)"),
            r#"<a href="https://ci.example" target="_blank" rel="noopener"><img alt="badge" src="b.svg"></a>"#
        );
    }

    #[test]
    fn test_link_href_keeps_stars() {
        assert_eq!(
            format_inline("[x](https://a.b/*c*/d)"),
            r#"<a href="https://a.b/*c*/d" target="_blank" rel="noopener">x</a>"#
        );
    }

    #[test]
    fn test_link_href_keeps_backticks_and_double_stars() {
        assert_eq!(
            format_inline("[x](/a/`b`/**c**)"),
            r#"<a href="/a/`b`/**c**" target="_blank" rel="noopener">x</a>"#
        );
    }

    #[test]
    fn test_image_src_keeps_underscores_and_stars() {
        assert_eq!(
            format_inline("![*a*](img/*b*.png)"),
            r#"<img alt="*a*" src="img/*b*.png">"#
        );
    }

    #[test]
    fn test_link_label_still_formatted() {
        assert_eq!(
            format_inline("[**docs**](u) and *[i](v)*"),
            concat!(
                r#"<a href="u" target="_blank" rel="noopener"><strong>docs</strong></a>"#,
                r#" and <em><a href="v" target="_blank" rel="noopener">i</a></em>"#
            )
        );
    }
}
