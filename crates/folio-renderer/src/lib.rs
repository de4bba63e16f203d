//! Small markdown renderer for Folio posts.
//!
//! The renderer supports a deliberately narrow dialect: headings (`#` to
//! `####`), block quotes, fenced code blocks, flat ordered and unordered lists,
//! images, links, bold, italic and inline code. Anything else passes through
//! as escaped paragraph text.
//!
//! # Architecture
//!
//! Rendering is a single pass over classified lines:
//! - the source is escaped and split into text lines and atomic code blocks
//! - each text line is classified (heading, quote, list item, blank, text)
//! - a small state machine tracks open lists and emits HTML fragments
//!
//! # Example
//!
//! ```
//! use folio_renderer::render;
//!
//! let html = render("## Overview\n\n- one\n- two");
//! assert_eq!(
//!     html,
//!     "<h2>Overview</h2>\n\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>"
//! );
//! ```

mod block;
mod fence;
mod inline;
mod renderer;
mod util;

pub use renderer::{MarkdownRenderer, render};
pub use util::{escape_html, plain_text, reading_time_minutes};
