//! Browser-side scroll-spy for statically rendered pages.
//!
//! Static pages carry the TOC markup already; this script only wires the
//! active-link tracking and drawer behavior that [`TocBuilder`] provides
//! in-process.
//!
//! [`TocBuilder`]: crate::TocBuilder

use crate::observer::ObserverOptions;

const TEMPLATE: &str = r"(function () {
  var links = document.querySelectorAll('[data-toc-link]');
  var drawer = document.querySelector('[data-toc-drawer]');
  links.forEach(function (a) {
    a.addEventListener('click', function () {
      if (drawer) { drawer.classList.remove('open'); }
    });
  });
  document.querySelectorAll('[data-toc-open]').forEach(function (b) {
    b.addEventListener('click', function () { if (drawer) { drawer.classList.add('open'); } });
  });
  document.querySelectorAll('[data-toc-close]').forEach(function (b) {
    b.addEventListener('click', function () { if (drawer) { drawer.classList.remove('open'); } });
  });
  var ids = Array.prototype.map.call(links, function (a) { return a.getAttribute('data-toc-link'); });
  var targets = ids.map(function (id) { return document.getElementById(id); }).filter(Boolean);
  if (!targets.length || !('IntersectionObserver' in window)) { return; }
  function activate(id) {
    var current = null;
    links.forEach(function (a) {
      var on = a.getAttribute('data-toc-link') === id;
      a.classList.toggle('active', on);
      if (on && !current && a.closest('[data-toc]')) { current = a; }
    });
    if (current) { current.scrollIntoView({ block: 'nearest' }); }
  }
  var observer = new IntersectionObserver(function (entries) {
    entries.forEach(function (e) { if (e.isIntersecting) { activate(e.target.id); } });
  }, { rootMargin: '__ROOT_MARGIN__', threshold: __THRESHOLD__ });
  targets.forEach(function (t) { observer.observe(t); });
})();";

/// Scroll-spy script configured with `options`.
#[must_use]
pub fn scroll_spy_script(options: &ObserverOptions) -> String {
    TEMPLATE
        .replace("__ROOT_MARGIN__", &options.root_margin.to_string())
        .replace("__THRESHOLD__", &options.threshold.to_string())
}
