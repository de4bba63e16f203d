//! TOC construction and scroll-spy wiring.

use std::cell::RefCell;
use std::rc::Rc;

use crate::content::{ContentRoot, ensure_heading_ids};
use crate::observer::{IntersectionCallback, IntersectionHost, ObserverOptions, Subscription};
use crate::outline::{HeadingNode, build_outline, collect_outline_headings};
use crate::panel::TocPanel;

/// Builds the TOC for a content root and keeps the panel's active link in
/// sync with the viewport.
///
/// Each call to [`build`](Self::build) replaces the previous one: the old
/// observer is disconnected before a new one is registered, so a builder
/// never holds more than one live subscription.
#[derive(Debug, Default)]
pub struct TocBuilder {
    options: ObserverOptions,
    subscription: Option<Subscription>,
}

impl TocBuilder {
    /// Create a builder with scroll-spy observer options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom observer options.
    #[must_use]
    pub fn with_options(mut self, options: ObserverOptions) -> Self {
        self.options = options;
        self
    }

    /// Assign heading ids in `root`, populate `panel` and start observing.
    ///
    /// Returns the outline shown in the panel. When the content has no
    /// outline headings the panel shows its empty state and no observer is
    /// registered.
    pub fn build(
        &mut self,
        root: &mut ContentRoot,
        panel: &Rc<RefCell<TocPanel>>,
        host: &mut dyn IntersectionHost,
    ) -> Vec<HeadingNode> {
        self.release(host);

        let headings = ensure_heading_ids(root);
        let selected = collect_outline_headings(&headings);
        let outline = build_outline(selected.iter().copied());
        let targets: Vec<String> = selected.iter().map(|h| h.id.clone()).collect();

        panel.borrow_mut().populate(&outline);

        if targets.is_empty() {
            tracing::debug!("No outline headings, skipping observer");
            return outline;
        }

        let shared = Rc::clone(panel);
        let callback: IntersectionCallback = Box::new(move |entries| {
            let mut panel = shared.borrow_mut();
            for entry in entries.iter().filter(|entry| entry.is_intersecting) {
                panel.set_active(&entry.target);
            }
        });

        let id = host.observe(targets, self.options, callback);
        self.subscription = Some(Subscription::new(id));

        tracing::debug!(entries = outline.len(), "Built table of contents");
        outline
    }

    /// Disconnect the current observer, if any.
    pub fn release(&mut self, host: &mut dyn IntersectionHost) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe(host);
        }
    }

    /// Whether an observer is currently registered.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.subscription.is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::observer::SimulatedViewport;
    use crate::panel::Drawer;

    fn setup() -> (Rc<RefCell<TocPanel>>, SimulatedViewport) {
        (
            Rc::new(RefCell::new(TocPanel::new(10))),
            SimulatedViewport::new(1000.0),
        )
    }

    #[test]
    fn test_build_two_entry_outline() {
        let (panel, mut viewport) = setup();
        let mut root = ContentRoot::new(
            "<h2>Intro</h2>\n<p>x</p>\n<h3>Details</h3>\n<h2>Wrap Up</h2>",
        );

        let outline = TocBuilder::new().build(&mut root, &panel, &mut viewport);

        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].id, "intro");
        assert_eq!(outline[0].children[0].id, "details");
        assert_eq!(outline[1].id, "wrap-up");
        assert_eq!(panel.borrow().links().len(), 3);
    }

    #[test]
    fn test_build_deduplicates_ids() {
        let (panel, mut viewport) = setup();
        let mut root = ContentRoot::new("<h2>Setup</h2><h2>Setup</h2>");

        let outline = TocBuilder::new().build(&mut root, &panel, &mut viewport);

        let ids: Vec<&str> = outline.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["setup", "setup-2"]);
        assert_eq!(
            root.html(),
            r#"<h2 id="setup">Setup</h2><h2 id="setup-2">Setup</h2>"#
        );
    }

    #[test]
    fn test_build_without_headings_shows_empty_state() {
        let (panel, mut viewport) = setup();
        let mut root = ContentRoot::new("<p>Just text</p>");
        let mut builder = TocBuilder::new();

        let outline = builder.build(&mut root, &panel, &mut viewport);

        assert!(outline.is_empty());
        assert!(panel.borrow().is_empty_state());
        assert!(!builder.is_observing());
        assert_eq!(viewport.observer_count(), 0);
    }

    #[test]
    fn test_build_uses_level_one_fallback() {
        let (panel, mut viewport) = setup();
        let mut root = ContentRoot::new("<h1>Only Title</h1>");

        let outline = TocBuilder::new().build(&mut root, &panel, &mut viewport);

        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].level, 1);
    }

    #[test]
    fn test_rebuild_releases_previous_observer() {
        let (panel, mut viewport) = setup();
        let mut builder = TocBuilder::new();

        let mut first = ContentRoot::new("<h2>A</h2>");
        builder.build(&mut first, &panel, &mut viewport);
        let mut second = ContentRoot::new("<h2>B</h2>");
        builder.build(&mut second, &panel, &mut viewport);

        assert_eq!(viewport.observer_count(), 1);
        assert_eq!(panel.borrow().links()[0].id, "b");
    }

    #[test]
    fn test_rebuild_to_empty_releases_observer() {
        let (panel, mut viewport) = setup();
        let mut builder = TocBuilder::new();

        builder.build(&mut ContentRoot::new("<h2>A</h2>"), &panel, &mut viewport);
        builder.build(&mut ContentRoot::new("<p>none</p>"), &panel, &mut viewport);

        assert_eq!(viewport.observer_count(), 0);
        assert!(!builder.is_observing());
    }

    #[test]
    fn test_scroll_spy_tracks_viewport() {
        let (panel, mut viewport) = setup();
        viewport.place("intro", 0.0, 40.0);
        viewport.place("usage", 1200.0, 40.0);
        viewport.place("faq", 2600.0, 40.0);
        let mut root = ContentRoot::new("<h2>Intro</h2><h2>Usage</h2><h2>FAQ</h2>");

        TocBuilder::new().build(&mut root, &panel, &mut viewport);
        assert_eq!(panel.borrow().active_id(), Some("intro"));

        viewport.scroll_to(1100.0);
        assert_eq!(panel.borrow().active_id(), Some("usage"));

        viewport.scroll_to(2500.0);
        assert_eq!(panel.borrow().active_id(), Some("faq"));

        // Scrolling between headings keeps the last active link.
        viewport.scroll_to(2000.0);
        assert_eq!(panel.borrow().active_id(), Some("faq"));
    }

    #[test]
    fn test_release_stops_scroll_spy() {
        let (panel, mut viewport) = setup();
        viewport.place("a", 0.0, 40.0);
        viewport.place("b", 1200.0, 40.0);
        let mut builder = TocBuilder::new();
        builder.build(
            &mut ContentRoot::new("<h2>A</h2><h2>B</h2>"),
            &panel,
            &mut viewport,
        );

        builder.release(&mut viewport);
        viewport.scroll_to(1100.0);

        assert_eq!(panel.borrow().active_id(), Some("a"));
    }

    #[test]
    fn test_drawer_closes_after_navigation() {
        let mut drawer = Drawer::default();
        drawer.open();
        let panel = Rc::new(RefCell::new(TocPanel::new(10).with_drawer(drawer)));
        let mut viewport = SimulatedViewport::new(1000.0);
        let mut root = ContentRoot::new("<h2>Intro</h2>");

        TocBuilder::new().build(&mut root, &panel, &mut viewport);
        let nav = panel.borrow_mut().click("intro");

        assert_eq!(nav.map(|n| n.anchor), Some("#intro".to_owned()));
        assert!(!panel.borrow().drawer().is_some_and(Drawer::is_open));
    }
}
