use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The specific grammar rule a fragment broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MalformedKind {
    /// The variable or filter name is blank.
    EmptyName,
    /// An identifier segment is blank, as in `a..b`.
    EmptySegment,
    LeadingDigit,
    LeadingDash,
    TrailingDash,
    Whitespace,
    /// A character outside the identifier alphabet, e.g. `:` or `/`.
    InvalidCharacter(char),
    /// The text after a filter's `:` is not a comma-separated argument list.
    FilterArguments,
    /// More than one fragment where exactly one is allowed.
    TrailingText,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedKind::EmptyName => f.write_str("name cannot be empty"),
            MalformedKind::EmptySegment => f.write_str("lookup segment cannot be empty"),
            MalformedKind::LeadingDigit => f.write_str("identifier cannot start with a digit"),
            MalformedKind::LeadingDash => f.write_str("identifier cannot start with a dash"),
            MalformedKind::TrailingDash => f.write_str("identifier cannot end with a dash"),
            MalformedKind::Whitespace => f.write_str("identifier cannot contain whitespace"),
            MalformedKind::InvalidCharacter(ch) => {
                write!(f, "unexpected character '{ch}' in identifier")
            }
            MalformedKind::FilterArguments => f.write_str("invalid filter arguments"),
            MalformedKind::TrailingText => f.write_str("unexpected trailing text"),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
pub enum ParseError {
    /// Markup that does not conform to the strict grammar.
    ///
    /// `position` is the byte offset of `fragment` within the markup that was
    /// handed to the parser.
    #[error("Malformed expression at position {position}: {kind} in '{fragment}'")]
    MalformedExpression {
        kind: MalformedKind,
        fragment: String,
        position: usize,
    },
}

impl ParseError {
    pub(crate) fn malformed(kind: MalformedKind, fragment: &str, position: usize) -> Self {
        Self::MalformedExpression {
            kind,
            fragment: fragment.to_string(),
            position,
        }
    }

    #[must_use]
    pub fn kind(&self) -> MalformedKind {
        match self {
            Self::MalformedExpression { kind, .. } => *kind,
        }
    }

    #[must_use]
    pub fn fragment(&self) -> &str {
        match self {
            Self::MalformedExpression { fragment, .. } => fragment,
        }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::MalformedExpression { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_fragment_and_position() {
        let err = ParseError::malformed(MalformedKind::LeadingDigit, "2foo", 1);
        insta::assert_snapshot!(
            err.to_string(),
            @"Malformed expression at position 1: identifier cannot start with a digit in '2foo'"
        );
    }

    #[test]
    fn invalid_character_is_quoted() {
        let err = ParseError::malformed(MalformedKind::InvalidCharacter(':'), "http://x", 0);
        insta::assert_snapshot!(
            err.to_string(),
            @"Malformed expression at position 0: unexpected character ':' in identifier in 'http://x'"
        );
    }

    #[test]
    fn accessors() {
        let err = ParseError::malformed(MalformedKind::FilterArguments, "'a': 'b'", 12);
        assert_eq!(err.kind(), MalformedKind::FilterArguments);
        assert_eq!(err.fragment(), "'a': 'b'");
        assert_eq!(err.position(), 12);
    }
}
