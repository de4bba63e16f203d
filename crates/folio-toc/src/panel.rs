//! TOC navigation panel state.

use crate::outline::{HeadingNode, TocEntry, flatten, render_outline};

const DEFAULT_EMPTY_LABEL: &str = "No headings";

/// Mobile slide-in container holding the panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Drawer {
    open: bool,
}

impl Drawer {
    /// Slide the drawer in.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Slide the drawer out; a no-op when already closed.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the drawer is currently shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Result of following a TOC link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// Fragment to navigate to, e.g. `#intro`.
    pub anchor: String,
}

/// Navigation panel listing the outline of the current page.
///
/// At most one link is active at a time. The panel shows a window of
/// `visible_rows` links and scrolls it the minimal amount needed to keep
/// the active link in view.
#[derive(Clone, Debug)]
pub struct TocPanel {
    html: String,
    links: Vec<TocEntry>,
    active: Option<usize>,
    scroll_top: usize,
    visible_rows: usize,
    empty_label: String,
    drawer: Option<Drawer>,
}

impl TocPanel {
    /// Create an empty panel that shows `visible_rows` links at once.
    #[must_use]
    pub fn new(visible_rows: usize) -> Self {
        Self {
            html: String::new(),
            links: Vec::new(),
            active: None,
            scroll_top: 0,
            visible_rows: visible_rows.max(1),
            empty_label: DEFAULT_EMPTY_LABEL.to_owned(),
            drawer: None,
        }
    }

    /// Place the panel inside a drawer.
    #[must_use]
    pub fn with_drawer(mut self, drawer: Drawer) -> Self {
        self.drawer = Some(drawer);
        self
    }

    /// Set the text shown when the page has no headings.
    #[must_use]
    pub fn with_empty_label(mut self, label: impl Into<String>) -> Self {
        self.empty_label = label.into();
        self
    }

    /// Replace the panel contents with `outline`.
    ///
    /// Clears the active link and scrolls the panel back to the top.
    pub fn populate(&mut self, outline: &[HeadingNode]) {
        self.html = render_outline(outline, &self.empty_label);
        self.links = flatten(outline);
        self.active = None;
        self.scroll_top = 0;
    }

    /// Panel markup.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Links in display order.
    #[must_use]
    pub fn links(&self) -> &[TocEntry] {
        &self.links
    }

    /// Whether the panel shows the empty-state marker.
    #[must_use]
    pub fn is_empty_state(&self) -> bool {
        self.links.is_empty()
    }

    /// Mark the link for `id` active and scroll it into view.
    ///
    /// Returns `false`, leaving the panel unchanged, when no link targets
    /// `id`.
    pub fn set_active(&mut self, id: &str) -> bool {
        let Some(index) = self.links.iter().position(|link| link.id == id) else {
            return false;
        };

        self.active = Some(index);
        if index < self.scroll_top {
            self.scroll_top = index;
        } else if index >= self.scroll_top + self.visible_rows {
            self.scroll_top = index + 1 - self.visible_rows;
        }
        true
    }

    /// Id of the active link.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|index| self.links[index].id.as_str())
    }

    /// Links currently scrolled into view.
    #[must_use]
    pub fn visible_links(&self) -> &[TocEntry] {
        let start = self.scroll_top.min(self.links.len());
        let end = (start + self.visible_rows).min(self.links.len());
        &self.links[start..end]
    }

    /// Follow the link for `id`.
    ///
    /// Closes the drawer, if any, and returns the anchor to navigate to.
    pub fn click(&mut self, id: &str) -> Option<Navigation> {
        let link = self.links.iter().find(|link| link.id == id)?;
        let anchor = format!("#{}", link.id);
        if let Some(drawer) = &mut self.drawer {
            drawer.close();
        }
        Some(Navigation { anchor })
    }

    /// The drawer holding the panel, if any.
    #[must_use]
    pub fn drawer(&self) -> Option<&Drawer> {
        self.drawer.as_ref()
    }

    /// Mutable access to the drawer.
    pub fn drawer_mut(&mut self) -> Option<&mut Drawer> {
        self.drawer.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn node(id: &str, level: u8, children: Vec<HeadingNode>) -> HeadingNode {
        HeadingNode {
            id: id.to_owned(),
            level,
            text: id.to_owned(),
            children,
        }
    }

    fn panel_with(ids: &[&str], rows: usize) -> TocPanel {
        let outline: Vec<HeadingNode> = ids.iter().map(|id| node(id, 2, Vec::new())).collect();
        let mut panel = TocPanel::new(rows);
        panel.populate(&outline);
        panel
    }

    fn visible_ids(panel: &TocPanel) -> Vec<&str> {
        panel.visible_links().iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_populate_lists_nested_links() {
        let mut panel = TocPanel::new(10);
        panel.populate(&[node("a", 2, vec![node("a1", 3, Vec::new())]), node("b", 2, Vec::new())]);
        let ids: Vec<&str> = panel.links().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "a1", "b"]);
        assert!(panel.html().starts_with("<ul class=\"toc-list\">"));
    }

    #[test]
    fn test_empty_state_uses_label() {
        let mut panel = TocPanel::new(10).with_empty_label("Nothing here");
        panel.populate(&[]);
        assert!(panel.is_empty_state());
        assert_eq!(panel.html(), r#"<p class="toc-empty">Nothing here</p>"#);
    }

    #[test]
    fn test_set_active_is_exclusive() {
        let mut panel = panel_with(&["a", "b", "c"], 10);
        assert!(panel.set_active("a"));
        assert!(panel.set_active("c"));
        assert_eq!(panel.active_id(), Some("c"));
    }

    #[test]
    fn test_set_active_unknown_id_is_ignored() {
        let mut panel = panel_with(&["a"], 10);
        panel.set_active("a");
        assert!(!panel.set_active("missing"));
        assert_eq!(panel.active_id(), Some("a"));
    }

    #[test]
    fn test_active_link_scrolls_into_view() {
        let mut panel = panel_with(&["a", "b", "c", "d", "e"], 2);
        assert_eq!(visible_ids(&panel), vec!["a", "b"]);

        panel.set_active("d");
        assert_eq!(visible_ids(&panel), vec!["c", "d"]);

        panel.set_active("b");
        assert_eq!(visible_ids(&panel), vec!["b", "c"]);
    }

    #[test]
    fn test_visible_link_does_not_scroll() {
        let mut panel = panel_with(&["a", "b", "c"], 2);
        panel.set_active("b");
        assert_eq!(visible_ids(&panel), vec!["a", "b"]);
    }

    #[test]
    fn test_populate_resets_active_and_scroll() {
        let mut panel = panel_with(&["a", "b", "c"], 1);
        panel.set_active("c");
        panel.populate(&[node("x", 2, Vec::new())]);
        assert_eq!(panel.active_id(), None);
        assert_eq!(visible_ids(&panel), vec!["x"]);
    }

    #[test]
    fn test_drawer_toggle() {
        let mut drawer = Drawer::default();
        assert!(!drawer.is_open());
        drawer.open();
        assert!(drawer.is_open());
        drawer.close();
        drawer.close();
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_click_closes_drawer() {
        let mut drawer = Drawer::default();
        drawer.open();
        let mut panel = TocPanel::new(10).with_drawer(drawer);
        panel.populate(&[node("intro", 2, Vec::new())]);

        let nav = panel.click("intro");

        assert_eq!(
            nav,
            Some(Navigation {
                anchor: "#intro".to_owned()
            })
        );
        assert!(!panel.drawer().is_some_and(Drawer::is_open));
    }

    #[test]
    fn test_click_without_drawer() {
        let mut panel = panel_with(&["a"], 10);
        assert!(panel.click("a").is_some());
        assert!(panel.click("zzz").is_none());
    }
}
