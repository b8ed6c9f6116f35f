//! Anchored grammar checks applied only under the strict discipline.
//!
//! ```text
//! arguments  := ws* item (ws* ',' ws* item)* ws*
//! item       := keyword-pair | fragment
//! name       := ws* fragment ws*
//! identifier := [A-Za-z_-] [A-Za-z0-9_-]* '?'?   (no leading or trailing '-')
//! ```

use crate::error::MalformedKind;
use crate::error::ParseError;
use crate::matchers::match_fragment;
use crate::matchers::match_keyword_pair;
use crate::matchers::skip_whitespace;

/// Check that the whole of a filter's argument text is a comma-separated list
/// of fragments and keyword pairs.
///
/// `filter` and `filter_position` identify the filter segment the arguments
/// belong to; they are what the error reports.
pub(crate) fn validate_filter_args(
    args: &str,
    filter: &str,
    filter_position: usize,
) -> Result<(), ParseError> {
    if conforms_to_argument_grammar(args) {
        Ok(())
    } else {
        Err(ParseError::malformed(
            MalformedKind::FilterArguments,
            filter,
            filter_position,
        ))
    }
}

fn conforms_to_argument_grammar(args: &str) -> bool {
    let bytes = args.as_bytes();
    let mut pos = skip_whitespace(bytes, 0);

    loop {
        let item_end = match match_keyword_pair(args, pos) {
            Some(pair) => Some(pair.end),
            None => match_fragment(args, pos),
        };
        let Some(item_end) = item_end else {
            return false;
        };

        pos = skip_whitespace(bytes, item_end);
        match bytes.get(pos) {
            None => return true,
            Some(b',') => pos = skip_whitespace(bytes, pos + 1),
            Some(_) => return false,
        }
    }
}

/// Check that a trimmed, non-empty name is exactly one fragment.
pub(crate) fn validate_name(name: &str, position: usize) -> Result<(), ParseError> {
    if match_fragment(name, 0) == Some(name.len()) {
        return Ok(());
    }

    let kind = match name.chars().next() {
        None => MalformedKind::EmptyName,
        Some(ch @ (':' | ',' | '\'' | '"')) => MalformedKind::InvalidCharacter(ch),
        Some(_) => MalformedKind::TrailingText,
    };
    Err(ParseError::malformed(kind, name, position))
}

/// Check one identifier: a lookup segment or a filter name.
pub(crate) fn validate_identifier(segment: &str) -> Result<(), MalformedKind> {
    let Some(first) = segment.chars().next() else {
        return Err(MalformedKind::EmptySegment);
    };

    if segment.chars().any(char::is_whitespace) {
        return Err(MalformedKind::Whitespace);
    }
    if first.is_ascii_digit() {
        return Err(MalformedKind::LeadingDigit);
    }
    if first == '-' {
        return Err(MalformedKind::LeadingDash);
    }

    let core = segment.strip_suffix('?').unwrap_or(segment);
    if let Some(bad) = core
        .chars()
        .find(|&ch| !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'))
    {
        return Err(MalformedKind::InvalidCharacter(bad));
    }
    if core.is_empty() {
        return Err(MalformedKind::InvalidCharacter('?'));
    }
    if core.ends_with('-') {
        return Err(MalformedKind::TrailingDash);
    }

    Ok(())
}
