//! Escaping and text helpers shared by the renderer and page templates.

/// Escape HTML special characters.
///
/// Escapes the five characters that matter inside both text and attribute
/// values. Use this for data interpolated into page templates.
///
/// # Examples
///
/// ```
/// use folio_renderer::escape_html;
///
/// assert_eq!(escape_html("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#x27;y&#x27;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape the three reserved characters of markdown source text.
///
/// Quotes are left alone so prose renders unchanged; attribute values built
/// from source text go through [`escape_attr`] as well.
pub(crate) fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Make already text-escaped content safe inside a double-quoted attribute.
pub(crate) fn escape_attr(s: &str) -> String {
    s.replace('"', "&quot;")
}

/// Extract the visible text of an HTML fragment.
///
/// Tags are dropped and the entities produced by this crate are decoded,
/// which matches what a browser reports as the fragment's text content.
///
/// # Examples
///
/// ```
/// use folio_renderer::plain_text;
///
/// assert_eq!(plain_text("<h2>Q &amp; A</h2>"), "Q & A");
/// ```
#[must_use]
pub fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    decode_entities(&text)
}

/// Decode the small set of named and numeric entities the renderer emits.
fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_owned();
    }
    // `&amp;` goes last so `&amp;lt;` decodes to the literal `&lt;`.
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Estimate reading time in whole minutes.
///
/// Counts whitespace-separated words and divides by `words_per_minute`,
/// rounding to the nearest minute. Never returns less than one minute.
///
/// # Examples
///
/// ```
/// use folio_renderer::reading_time_minutes;
///
/// assert_eq!(reading_time_minutes("just a few words", 220), 1);
/// ```
#[must_use]
pub fn reading_time_minutes(text: &str, words_per_minute: u32) -> u32 {
    let words = text.split_whitespace().count();
    let wpm = usize::try_from(words_per_minute.max(1)).unwrap_or(usize::MAX);
    // Round half up without going through floats.
    let minutes = (2 * words + wpm) / (2 * wpm);
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}
