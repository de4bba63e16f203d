//! Heading anchors, table of contents and scroll-spy for rendered posts.
//!
//! This crate provides:
//! - [`ContentRoot`]: rendered HTML with addressable heading elements
//! - [`ensure_heading_ids`]: stable, page-unique heading anchors
//! - [`build_outline`] and [`render_outline`]: the nested TOC
//! - [`TocPanel`]: navigation target with an active link and optional drawer
//! - [`IntersectionHost`]: the viewport observer seam, with
//!   [`SimulatedViewport`] as an in-process implementation
//! - [`TocBuilder`]: wires all of the above together
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use folio_toc::{ContentRoot, SimulatedViewport, TocBuilder, TocPanel};
//!
//! let mut root = ContentRoot::new("<h2>Intro</h2><h3>Detail</h3>");
//! let panel = Rc::new(RefCell::new(TocPanel::new(10)));
//! let mut viewport = SimulatedViewport::new(800.0);
//!
//! let outline = TocBuilder::new().build(&mut root, &panel, &mut viewport);
//! assert_eq!(outline.len(), 1);
//! assert_eq!(root.html(), r#"<h2 id="intro">Intro</h2><h3 id="detail">Detail</h3>"#);
//! ```

mod builder;
mod content;
mod observer;
mod outline;
mod panel;
mod script;
mod slug;

pub use builder::TocBuilder;
pub use content::{ContentRoot, Heading, HeadingElement, ensure_heading_ids};
pub use observer::{
    IntersectionCallback, IntersectionEntry, IntersectionHost, Length, ObserverId,
    ObserverOptions, RootMargin, SimulatedViewport, Subscription,
};
pub use outline::{
    HeadingNode, TocEntry, build_outline, collect_outline_headings, flatten, render_outline,
};
pub use panel::{Drawer, Navigation, TocPanel};
pub use script::scroll_spy_script;
pub use slug::slugify;
