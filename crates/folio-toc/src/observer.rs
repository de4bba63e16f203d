//! Viewport intersection observation.
//!
//! [`IntersectionHost`] is the seam between the TOC builder and whatever
//! reports which headings are on screen. Registration hands back an
//! [`ObserverId`]; [`Subscription`] wraps it so the owner can release the
//! observer explicitly.

use std::collections::HashMap;
use std::fmt;

/// A CSS-style length used in root margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// Absolute pixels.
    Px(f64),
    /// Percentage of the viewport extent along the same axis.
    Percent(f64),
}

impl Length {
    /// Resolve against a viewport extent in pixels.
    #[must_use]
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Margins that grow (positive) or shrink (negative) the observed viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Observer configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    /// Adjustment applied to the viewport before intersecting.
    pub root_margin: RootMargin,
    /// Visible fraction of a target needed to count as intersecting.
    pub threshold: f64,
}

impl ObserverOptions {
    /// Scroll-spy configuration.
    ///
    /// The bottom 70% of the viewport is cut off, so a heading becomes
    /// active once it reaches the upper 30% of the screen.
    #[must_use]
    pub fn scroll_spy() -> Self {
        Self {
            root_margin: RootMargin {
                top: Length::Px(0.0),
                right: Length::Px(0.0),
                bottom: Length::Percent(-70.0),
                left: Length::Px(0.0),
            },
            threshold: 0.1,
        }
    }
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self::scroll_spy()
    }
}

/// One target's intersection state, as delivered to a callback.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry {
    /// Id of the observed element.
    pub target: String,
    /// Whether the target currently meets the threshold.
    pub is_intersecting: bool,
    /// Visible fraction of the target (0.0-1.0).
    pub ratio: f64,
}

/// Identifies one observer registration within a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Callback receiving batches of intersection changes.
pub type IntersectionCallback = Box<dyn FnMut(&[IntersectionEntry])>;

/// Something that can watch elements enter and leave the viewport.
pub trait IntersectionHost {
    /// Start observing `targets` (element ids).
    ///
    /// The host reports every target's initial state once, then only
    /// changes. Callbacks run on the host's event loop, one batch at a time.
    fn observe(
        &mut self,
        targets: Vec<String>,
        options: ObserverOptions,
        callback: IntersectionCallback,
    ) -> ObserverId;

    /// Stop an observer. Unknown ids are ignored.
    fn disconnect(&mut self, id: ObserverId);
}

/// Handle to an active observer registration.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a subscription leaves the observer registered"]
pub struct Subscription {
    id: ObserverId,
}

impl Subscription {
    /// Wrap a registration id returned by [`IntersectionHost::observe`].
    pub fn new(id: ObserverId) -> Self {
        Self { id }
    }

    /// Registration id.
    #[must_use]
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Release the observer.
    pub fn unsubscribe(self, host: &mut dyn IntersectionHost) {
        host.disconnect(self.id);
    }
}

/// Vertical extent of an element in page coordinates.
#[derive(Clone, Copy, Debug)]
struct Span {
    top: f64,
    height: f64,
}

struct Registration {
    id: ObserverId,
    targets: Vec<String>,
    options: ObserverOptions,
    callback: IntersectionCallback,
    intersecting: HashMap<String, bool>,
}

/// In-process [`IntersectionHost`] over a laid-out page.
///
/// Elements are placed with [`place`](Self::place); scrolling with
/// [`scroll_to`](Self::scroll_to) recomputes intersections against the
/// margin-adjusted viewport and notifies observers of targets whose state
/// changed. Elements that were never placed are not intersecting.
pub struct SimulatedViewport {
    height: f64,
    scroll_y: f64,
    layout: HashMap<String, Span>,
    observers: Vec<Registration>,
    next_id: u64,
}

impl SimulatedViewport {
    /// Create a viewport of the given height, scrolled to the top.
    #[must_use]
    pub fn new(height: f64) -> Self {
        Self {
            height,
            scroll_y: 0.0,
            layout: HashMap::new(),
            observers: Vec::new(),
            next_id: 0,
        }
    }

    /// Position an element at `top` (page coordinates) with `height`.
    pub fn place(&mut self, id: impl Into<String>, top: f64, height: f64) {
        self.layout.insert(id.into(), Span { top, height });
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Number of live observer registrations.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Scroll to `y` and deliver intersection changes.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);

        for registration in &mut self.observers {
            let mut changed = Vec::new();
            for target in &registration.targets {
                let entry = intersect(
                    &self.layout,
                    self.height,
                    self.scroll_y,
                    target,
                    &registration.options,
                );
                let previous = registration
                    .intersecting
                    .insert(target.clone(), entry.is_intersecting);
                if previous != Some(entry.is_intersecting) {
                    changed.push(entry);
                }
            }
            if !changed.is_empty() {
                (registration.callback)(&changed);
            }
        }
    }
}

impl IntersectionHost for SimulatedViewport {
    fn observe(
        &mut self,
        targets: Vec<String>,
        options: ObserverOptions,
        mut callback: IntersectionCallback,
    ) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;

        let initial: Vec<IntersectionEntry> = targets
            .iter()
            .map(|target| {
                intersect(
                    &self.layout,
                    self.height,
                    self.scroll_y,
                    target,
                    &options,
                )
            })
            .collect();
        let intersecting = initial
            .iter()
            .map(|entry| (entry.target.clone(), entry.is_intersecting))
            .collect();

        if !initial.is_empty() {
            callback(&initial);
        }

        self.observers.push(Registration {
            id,
            targets,
            options,
            callback,
            intersecting,
        });
        tracing::debug!(observer = id.0, "Observer registered");
        id
    }

    fn disconnect(&mut self, id: ObserverId) {
        self.observers.retain(|registration| registration.id != id);
        tracing::debug!(observer = id.0, "Observer disconnected");
    }
}

/// Compute one target's intersection with the margin-adjusted viewport.
fn intersect(
    layout: &HashMap<String, Span>,
    height: f64,
    scroll_y: f64,
    target: &str,
    options: &ObserverOptions,
) -> IntersectionEntry {
    let root_top = scroll_y - options.root_margin.top.resolve(height);
    let root_bottom = scroll_y + height + options.root_margin.bottom.resolve(height);

    let ratio = layout.get(target).map_or(0.0, |span| {
        let visible =
            (root_bottom.min(span.top + span.height) - root_top.max(span.top)).max(0.0);
        if span.height > 0.0 {
            (visible / span.height).min(1.0)
        } else if span.top >= root_top && span.top <= root_bottom {
            1.0
        } else {
            0.0
        }
    });

    IntersectionEntry {
        target: target.to_owned(),
        is_intersecting: ratio > 0.0 && ratio >= options.threshold,
        ratio,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<Vec<IntersectionEntry>>>>, IntersectionCallback) {
        let batches = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&batches);
        let callback: IntersectionCallback =
            Box::new(move |entries| sink.borrow_mut().push(entries.to_vec()));
        (batches, callback)
    }

    #[test]
    fn test_root_margin_display() {
        assert_eq!(
            ObserverOptions::scroll_spy().root_margin.to_string(),
            "0px 0px -70% 0px"
        );
    }

    #[test]
    fn test_length_resolve() {
        assert!((Length::Percent(-70.0).resolve(1000.0) + 700.0).abs() < f64::EPSILON);
        assert!((Length::Px(12.0).resolve(1000.0) - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_observe_reports_initial_state() {
        let mut viewport = SimulatedViewport::new(1000.0);
        viewport.place("top", 100.0, 40.0);
        viewport.place("below", 500.0, 40.0);
        let (batches, callback) = recorder();

        viewport.observe(
            vec!["top".to_owned(), "below".to_owned()],
            ObserverOptions::scroll_spy(),
            callback,
        );

        let batches = batches.borrow();
        assert_eq!(batches.len(), 1);
        assert!(batches[0][0].is_intersecting);
        // 500 is past the top 30% of a 1000px viewport
        assert!(!batches[0][1].is_intersecting);
    }

    #[test]
    fn test_scroll_reports_only_changes() {
        let mut viewport = SimulatedViewport::new(1000.0);
        viewport.place("a", 100.0, 40.0);
        viewport.place("b", 1500.0, 40.0);
        let (batches, callback) = recorder();
        viewport.observe(
            vec!["a".to_owned(), "b".to_owned()],
            ObserverOptions::scroll_spy(),
            callback,
        );

        viewport.scroll_to(1300.0);

        let batches = batches.borrow();
        assert_eq!(batches.len(), 2);
        let targets: Vec<(&str, bool)> = batches[1]
            .iter()
            .map(|e| (e.target.as_str(), e.is_intersecting))
            .collect();
        assert_eq!(targets, vec![("a", false), ("b", true)]);
    }

    #[test]
    fn test_scroll_without_changes_is_silent() {
        let mut viewport = SimulatedViewport::new(1000.0);
        viewport.place("a", 100.0, 40.0);
        let (batches, callback) = recorder();
        viewport.observe(vec!["a".to_owned()], ObserverOptions::scroll_spy(), callback);

        viewport.scroll_to(10.0);

        assert_eq!(batches.borrow().len(), 1);
    }

    #[test]
    fn test_threshold_requires_minimal_visibility() {
        let mut viewport = SimulatedViewport::new(1000.0);
        // Root bottom sits at 300; only 2px of a 40px heading are inside.
        viewport.place("edge", 298.0, 40.0);
        let (batches, callback) = recorder();
        viewport.observe(vec!["edge".to_owned()], ObserverOptions::scroll_spy(), callback);

        let entry = &batches.borrow()[0][0];
        assert!(!entry.is_intersecting);
        assert!(entry.ratio > 0.0);
    }

    #[test]
    fn test_unplaced_target_is_not_intersecting() {
        let mut viewport = SimulatedViewport::new(1000.0);
        let (batches, callback) = recorder();
        viewport.observe(vec!["ghost".to_owned()], ObserverOptions::scroll_spy(), callback);
        assert!(!batches.borrow()[0][0].is_intersecting);
    }

    #[test]
    fn test_disconnect_stops_notifications() {
        let mut viewport = SimulatedViewport::new(1000.0);
        viewport.place("a", 2000.0, 40.0);
        let (batches, callback) = recorder();
        let subscription = Subscription::new(viewport.observe(
            vec!["a".to_owned()],
            ObserverOptions::scroll_spy(),
            callback,
        ));
        assert_eq!(viewport.observer_count(), 1);

        subscription.unsubscribe(&mut viewport);
        viewport.scroll_to(1900.0);

        assert_eq!(viewport.observer_count(), 0);
        assert_eq!(batches.borrow().len(), 1);
    }

    #[test]
    fn test_negative_scroll_clamps_to_top() {
        let mut viewport = SimulatedViewport::new(500.0);
        viewport.scroll_to(-20.0);
        assert!(viewport.scroll_y().abs() < f64::EPSILON);
    }
}
