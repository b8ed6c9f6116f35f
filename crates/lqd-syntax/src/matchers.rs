//! Shape recognizers for filter-argument tokens.
//!
//! Both matchers take the full text plus a byte offset and report where a
//! match starting exactly at that offset ends. Neither allocates.

use crate::quotes::closing_quote;
use crate::quotes::is_quote;

/// Bytes that end a bare fragment.
#[inline]
fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b',' || b == b'|'
}

#[inline]
pub(crate) fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// End (exclusive) of the quoted-or-bare fragment starting at `at`.
///
/// A fragment is either a closed quoted string, or a run of non-separator
/// bytes that may embed closed quoted strings (`foo'a b'`). A bare run cannot
/// start with `:`, so a stray colon between arguments never becomes a token
/// of its own, while `http://example.com` stays one token.
pub(crate) fn match_fragment(text: &str, at: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let &first = bytes.get(at)?;

    if is_quote(first) {
        return closing_quote(bytes, at).map(|close| close + 1);
    }
    if is_separator(first) || first == b':' {
        return None;
    }

    let mut pos = at;
    while pos < bytes.len() {
        let b = bytes[pos];
        if is_separator(b) {
            break;
        }
        if is_quote(b) {
            match closing_quote(bytes, pos) {
                Some(close) => {
                    pos = close + 1;
                    continue;
                }
                None => break,
            }
        }
        pos += 1;
    }

    (pos > at).then_some(pos)
}

/// A `key: value` pair matched by [`match_keyword_pair`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct KeywordMatch {
    /// End of the key; the key starts at the offset passed to the matcher.
    pub key_end: usize,
    pub value_start: usize,
    pub end: usize,
}

/// Match `<word chars> ':' <ws>* <fragment>` starting at `at`.
///
/// Whitespace is allowed after the colon but not before it.
pub(crate) fn match_keyword_pair(text: &str, at: usize) -> Option<KeywordMatch> {
    let bytes = text.as_bytes();

    let key_end = at + bytes.get(at..)?.iter().take_while(|&&b| is_word_byte(b)).count();
    if key_end == at || bytes.get(key_end) != Some(&b':') {
        return None;
    }

    let value_start = skip_whitespace(bytes, key_end + 1);
    let end = match_fragment(text, value_start)?;

    Some(KeywordMatch {
        key_end,
        value_start,
        end,
    })
}

#[inline]
pub(crate) fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}
