//! Fenced code block extraction.
//!
//! Splits escaped source into text lines and atomic code blocks so the line
//! scanner never applies inline formatting inside a fence.

const FENCE: &str = "```";

/// A unit of input for the line scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// One line of ordinary text (no trailing newline).
    Text(&'a str),
    /// Trimmed content of a fenced code block.
    Code(&'a str),
}

/// Split source text into lines, extracting fenced code blocks.
///
/// Fences pair non-greedily: a block closes at the next triple backtick, not
/// the last one in the document. An unterminated fence consumes the rest of
/// the input. Text sharing a line with a fence marker becomes its own line.
pub(crate) fn split_lines(source: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut rest = source;
    let mut after_code = false;

    while let Some(open) = rest.find(FENCE) {
        push_text(&mut lines, &rest[..open], after_code);

        let body_start = open + FENCE.len();
        match rest[body_start..].find(FENCE) {
            Some(len) => {
                lines.push(Line::Code(rest[body_start..body_start + len].trim()));
                rest = &rest[body_start + len + FENCE.len()..];
                after_code = true;
            }
            None => {
                lines.push(Line::Code(rest[body_start..].trim()));
                return lines;
            }
        }
    }

    push_text(&mut lines, rest, after_code);
    lines
}

/// Push the lines of a text run that sits between code blocks.
///
/// The newline that ends a closing fence line, and the newline before an
/// opening fence, belong to the fence and produce no blank line. A trailing
/// newline at the end of the document is dropped as well.
fn push_text<'a>(lines: &mut Vec<Line<'a>>, text: &'a str, after_code: bool) {
    if text.is_empty() {
        return;
    }

    let mut pieces: Vec<&str> = text.split('\n').collect();
    if after_code && pieces.first().is_some_and(|p| p.is_empty()) {
        pieces.remove(0);
    }
    if pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }

    lines.extend(pieces.into_iter().map(Line::Text));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_lines() {
        assert_eq!(
            split_lines("a\nb\n"),
            vec![Line::Text("a"), Line::Text("b")]
        );
    }

    #[test]
    fn test_blank_lines_are_kept() {
        assert_eq!(
            split_lines("a\n\nb"),
            vec![Line::Text("a"), Line::Text(""), Line::Text("b")]
        );
    }

    #[test]
    fn test_fence_between_paragraphs() {
        assert_eq!(
            split_lines("before\n```\nlet x = 1;\n```\nafter"),
            vec![
                Line::Text("before"),
                Line::Code("let x = 1;"),
                Line::Text("after"),
            ]
        );
    }

    #[test]
    fn test_fence_pairs_non_greedily() {
        assert_eq!(
            split_lines("```\none\n```\nmid\n```\ntwo\n```"),
            vec![Line::Code("one"), Line::Text("mid"), Line::Code("two")]
        );
    }

    #[test]
    fn test_info_string_is_kept_verbatim() {
        assert_eq!(
            split_lines("```rust\nfn main() {}\n```"),
            vec![Line::Code("rust\nfn main() {}")]
        );
    }

    #[test]
    fn test_unterminated_fence_consumes_rest() {
        assert_eq!(
            split_lines("intro\n```\ncode\n# not a heading"),
            vec![Line::Text("intro"), Line::Code("code\n# not a heading")]
        );
    }

    #[test]
    fn test_inline_fence_splits_line() {
        assert_eq!(
            split_lines("see ```x``` here"),
            vec![Line::Text("see "), Line::Code("x"), Line::Text(" here")]
        );
    }

    #[test]
    fn test_blank_line_after_fence_is_kept() {
        assert_eq!(
            split_lines("```\na\n```\n\nb"),
            vec![Line::Code("a"), Line::Text(""), Line::Text("b")]
        );
    }

    #[test]
    fn test_adjacent_fences() {
        assert_eq!(
            split_lines("```\na\n```\n```\nb\n```\n"),
            vec![Line::Code("a"), Line::Code("b")]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(split_lines("").is_empty());
    }
}
