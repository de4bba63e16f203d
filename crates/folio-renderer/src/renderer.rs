//! Line-scanning markdown renderer.

use std::fmt::Write;

use crate::block::{Block, classify};
use crate::fence::{Line, split_lines};
use crate::inline::format_inline;
use crate::util::escape_text;

/// Render markdown to HTML.
///
/// Total function: malformed input degrades to paragraphs of escaped text
/// and never fails. See [`MarkdownRenderer`] for the supported dialect.
#[must_use]
pub fn render(markdown: &str) -> String {
    MarkdownRenderer::new().render(markdown)
}

/// Which kind of list is currently open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OpenList {
    Unordered,
    Ordered,
}

impl OpenList {
    fn open_tag(self) -> &'static str {
        match self {
            Self::Unordered => "<ul>",
            Self::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Self::Unordered => "</ul>",
            Self::Ordered => "</ol>",
        }
    }
}

/// Markdown renderer state.
///
/// Holds the emitted fragments and the currently open list. Fragments are
/// joined with newlines once all lines have been consumed.
///
/// Supported dialect:
/// - `#` to `####` headings (optional single space after the markers)
/// - `>` block quotes, one element per line
/// - fenced code blocks delimited by triple backticks
/// - flat `-`/`*` and `1.`/`1)` lists; `•` and `–` count as `-`
/// - `![alt](src)` images, in any block that takes inline formatting
/// - `[text](url)` links, `**bold**`, `*italic*` and `` `code` ``
#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    fragments: Vec<String>,
    list: Option<OpenList>,
}

impl MarkdownRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the renderer and produce HTML for `markdown`.
    #[must_use]
    pub fn render(mut self, markdown: &str) -> String {
        let normalized = markdown.replace("\r\n", "\n").replace('\r', "\n");
        let escaped = escape_text(&normalized);

        for line in split_lines(&escaped) {
            match line {
                Line::Code(code) => {
                    self.close_list();
                    self.fragments.push(format!("<pre><code>{code}</code></pre>"));
                }
                Line::Text(text) => self.push_text_line(text),
            }
        }
        self.close_list();

        self.fragments.join("\n")
    }

    fn push_text_line(&mut self, text: &str) {
        match classify(text) {
            Block::Blank => {
                self.close_list();
                self.fragments.push(String::new());
            }
            Block::Heading { level, text } => {
                self.close_list();
                self.fragments
                    .push(format!("<h{level}>{}</h{level}>", format_inline(text)));
            }
            Block::Quote(text) => {
                self.close_list();
                self.fragments
                    .push(format!("<blockquote>{}</blockquote>", format_inline(text)));
            }
            Block::OrderedItem(item) => self.push_item(OpenList::Ordered, item),
            Block::UnorderedItem(item) => self.push_item(OpenList::Unordered, item),
            Block::Text(text) => {
                self.close_list();
                let mut paragraph = String::with_capacity(text.len() + 7);
                write!(paragraph, "<p>{}</p>", format_inline(text)).unwrap();
                self.fragments.push(paragraph);
            }
        }
    }

    /// Emit a list item, switching list kind if needed.
    fn push_item(&mut self, kind: OpenList, item: &str) {
        if self.list != Some(kind) {
            self.close_list();
            self.fragments.push(kind.open_tag().to_owned());
            self.list = Some(kind);
        }
        self.fragments
            .push(format!("<li>{}</li>", format_inline(item)));
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.list.take() {
            self.fragments.push(kind.close_tag().to_owned());
        }
    }
}
