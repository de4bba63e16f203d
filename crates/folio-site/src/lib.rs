//! Posts model, page templates and static site builder for Folio.
//!
//! [`PostsDocument`] holds the authored posts. [`PostPage`] runs a single
//! post through the renderer and TOC pipeline, and [`SiteBuilder`] writes
//! the whole site:
//!
//! ```text
//! dist/
//! ├── index.html        newest post first
//! ├── post.html         fallback view (first post)
//! └── posts/<file>.html one page per post, named after its id
//! ```

mod builder;
mod date;
mod error;
mod model;
mod page;
mod paths;
pub mod template;

pub use builder::{BuildSummary, SiteBuilder};
pub use date::format_date;
pub use error::SiteError;
pub use model::{Post, PostsDocument, SiteMeta, unique_tags};
pub use page::{PageOptions, PostPage};
pub use template::SiteData;
