//! Heading slugs and page-scoped id deduplication.

use std::collections::HashSet;

/// Thai letters, vowels, tone marks and digits.
const THAI_RANGE: std::ops::RangeInclusive<char> = '\u{0E01}'..='\u{0E59}';

/// Convert heading text to an identifier-safe slug.
///
/// Lowercases, drops everything except ASCII letters and digits, Thai
/// characters, whitespace and hyphens, turns whitespace runs into a single
/// hyphen, collapses hyphen runs and trims hyphens from both ends. May return
/// an empty string.
///
/// # Examples
///
/// ```
/// use folio_toc::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("What's New?"), "whats-new");
/// assert_eq!(slugify("ภาพรวม ระบบ"), "ภาพรวม-ระบบ");
/// assert_eq!(slugify("!!!"), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for c in lowered.chars() {
        if c.is_whitespace() || c == '-' {
            pending_dash = true;
        } else if is_slug_char(c) {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        }
    }

    slug
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || THAI_RANGE.contains(&c)
}

/// Ids already handed out within one page.
#[derive(Debug, Default)]
pub(crate) struct IdRegistry {
    seen: HashSet<String>,
}

impl IdRegistry {
    /// Reserve `base`, or `base-2`, `base-3`, ... if it is taken.
    pub(crate) fn claim(&mut self, base: &str) -> String {
        let mut candidate = base.to_owned();
        let mut n = 2;
        while self.seen.contains(&candidate) {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        self.seen.insert(candidate.clone());
        candidate
    }
}
