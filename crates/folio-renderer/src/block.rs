//! Line classification.
//!
//! Operates on escaped text, so a quote marker arrives as `&gt;`.

/// Escaped form of the block quote marker.
const QUOTE_MARKER: &str = "&gt;";

/// Deepest heading level the renderer recognizes.
const MAX_HEADING_LEVEL: usize = 4;

/// Alternate bullet glyphs normalized to `-` items.
const BULLET_GLYPHS: [char; 2] = ['•', '–'];

/// Shape of a single text line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Block<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// `#` through `####` heading.
    Heading { level: u8, text: &'a str },
    /// Single-line block quote.
    Quote(&'a str),
    /// `1.` or `1)` list item.
    OrderedItem(&'a str),
    /// `-` or `*` list item (including normalized bullet glyphs).
    UnorderedItem(&'a str),
    /// Anything else: paragraph or image line.
    Text(&'a str),
}

/// Classify one escaped line of text.
pub(crate) fn classify(line: &str) -> Block<'_> {
    if line.trim().is_empty() {
        return Block::Blank;
    }

    if let Some(block) = heading(line) {
        return block;
    }

    if let Some(rest) = line.strip_prefix(QUOTE_MARKER) {
        return Block::Quote(strip_one_space(rest));
    }

    let trimmed = line.trim_start();

    if let Some(item) = ordered_item(trimmed) {
        return Block::OrderedItem(item);
    }

    if let Some(item) = unordered_item(trimmed) {
        return Block::UnorderedItem(item);
    }

    Block::Text(line)
}

/// Match `#`..`####` at the very start of the line.
///
/// A run of more than four `#` is a level-4 heading whose text keeps the
/// surplus markers.
fn heading(line: &str) -> Option<Block<'_>> {
    let hashes = line
        .bytes()
        .take(MAX_HEADING_LEVEL)
        .take_while(|&b| b == b'#')
        .count();
    if hashes == 0 {
        return None;
    }

    let level = u8::try_from(hashes).ok()?;
    Some(Block::Heading {
        level,
        text: strip_one_space(&line[hashes..]),
    })
}

/// `<digits><. or )><whitespace><text>`
fn ordered_item(trimmed: &str) -> Option<&str> {
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = trimmed[digits..]
        .strip_prefix('.')
        .or_else(|| trimmed[digits..].strip_prefix(')'))?;
    list_item_text(rest)
}

/// `<-, *, • or –><whitespace><text>`
fn unordered_item(trimmed: &str) -> Option<&str> {
    let rest = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('*'))
        .or_else(|| trimmed.strip_prefix(BULLET_GLYPHS))?;
    list_item_text(rest)
}

/// Item text after a list marker; the marker must be followed by whitespace.
fn list_item_text(rest: &str) -> Option<&str> {
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Drop a single leading whitespace character, if present.
fn strip_one_space(text: &str) -> &str {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => text,
    }
}
