//! Quote-aware helpers shared by the splitter and the token matchers.
//!
//! Quoted strings run from a `'` or `"` to the next occurrence of the same
//! character. There is no escape processing. A quote character with no
//! matching closer later in the text is an ordinary character.

#[inline]
pub(crate) fn is_quote(b: u8) -> bool {
    b == b'\'' || b == b'"'
}

/// Byte index of the quote that closes the one at `open`, if any.
#[inline]
pub(crate) fn closing_quote(bytes: &[u8], open: usize) -> Option<usize> {
    let quote = bytes[open];
    bytes[open + 1..]
        .iter()
        .position(|&b| b == quote)
        .map(|rel| open + 1 + rel)
}

/// Find positions of a delimiter byte in `s`, skipping occurrences inside
/// closed single- or double-quoted regions.
///
/// The callback receives the byte index of each unquoted delimiter found.
/// Return `true` from the callback to stop early.
pub(crate) fn for_each_unquoted(s: &str, delimiter: u8, mut cb: impl FnMut(usize) -> bool) {
    let bytes = s.as_bytes();
    let last_single = bytes.iter().rposition(|&b| b == b'\'');
    let last_double = bytes.iter().rposition(|&b| b == b'"');

    let mut quote: Option<u8> = None;

    for (idx, &b) in bytes.iter().enumerate() {
        match (quote, b) {
            (Some(open), _) if open == b => quote = None,
            (Some(_), _) => {}
            (None, b'\'') if last_single.is_some_and(|last| last > idx) => quote = Some(b),
            (None, b'"') if last_double.is_some_and(|last| last > idx) => quote = Some(b),
            (None, _) if b == delimiter => {
                if cb(idx) {
                    return;
                }
            }
            (None, _) => {}
        }
    }
}

/// Split `s` on every unquoted `delimiter`.
///
/// Returns `(segment, byte_offset_within_s)` pairs; there is always at least
/// one segment.
pub(crate) fn split_unquoted(s: &str, delimiter: u8) -> Vec<(&str, usize)> {
    let mut segments = Vec::with_capacity(4);
    let mut start = 0;

    for_each_unquoted(s, delimiter, |idx| {
        segments.push((&s[start..idx], start));
        start = idx + 1;
        false
    });

    segments.push((&s[start..], start));
    segments
}

/// Byte index of the first unquoted `delimiter` in `s`.
pub(crate) fn find_unquoted(s: &str, delimiter: u8) -> Option<usize> {
    let mut found = None;
    for_each_unquoted(s, delimiter, |idx| {
        found = Some(idx);
        true
    });
    found
}
