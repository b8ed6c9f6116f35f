use crate::matchers::match_fragment;
use crate::matchers::match_keyword_pair;

/// One raw filter argument, classified but not yet parsed.
///
/// Offsets are byte positions within the scanned argument text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgToken<'a> {
    Positional {
        text: &'a str,
        offset: usize,
    },
    Keyword {
        key: &'a str,
        value: &'a str,
        value_offset: usize,
    },
}

/// Scan the text following a filter's `:` into argument tokens.
///
/// At every position a keyword pair is tried before a plain fragment. When
/// neither matches, one character is skipped, which is how stray separators
/// such as `:` between quoted arguments get dropped.
#[must_use]
pub fn scan_filter_args(text: &str) -> FilterArgScanner<'_> {
    FilterArgScanner { text, pos: 0 }
}

pub struct FilterArgScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for FilterArgScanner<'a> {
    type Item = ArgToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;

        while self.pos < text.len() {
            let start = self.pos;

            if let Some(pair) = match_keyword_pair(text, start) {
                self.pos = pair.end;
                return Some(ArgToken::Keyword {
                    key: &text[start..pair.key_end],
                    value: &text[pair.value_start..pair.end],
                    value_offset: pair.value_start,
                });
            }

            if let Some(end) = match_fragment(text, start) {
                self.pos = end;
                return Some(ArgToken::Positional {
                    text: &text[start..end],
                    offset: start,
                });
            }

            let skipped = text[start..].chars().next().unwrap_or(' ');
            if !skipped.is_whitespace() && skipped != ',' {
                tracing::debug!(%skipped, offset = start, "Skipping stray character in filter arguments");
            }
            self.pos += skipped.len_utf8();
        }

        None
    }
}
