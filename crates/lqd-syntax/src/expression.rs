use std::fmt;

use serde::Serialize;

use crate::context::Discipline;
use crate::error::ParseError;
use crate::quotes::is_quote;
use crate::strict::validate_identifier;

/// A literal value or a reference into the render context.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Expression {
    /// The text between the quotes, verbatim.
    StringLiteral(String),
    IntegerLiteral(i64),
    FloatLiteral(f64),
    BooleanLiteral(bool),
    VariableLookup(VariableLookup),
}

impl Expression {
    /// Classify a single token without identifier validation.
    ///
    /// ```
    /// use lqd_syntax::Expression;
    ///
    /// assert_eq!(Expression::parse("1000"), Expression::IntegerLiteral(1000));
    /// assert_eq!(Expression::parse("'med'"), Expression::StringLiteral("med".into()));
    /// ```
    #[must_use]
    pub fn parse(token: &str) -> Self {
        classify(token).unwrap_or_else(|| Expression::VariableLookup(VariableLookup::parse(token)))
    }

    /// Classify a single token, rejecting lookups whose segments are not
    /// valid identifiers.
    pub fn parse_strict(token: &str) -> Result<Self, ParseError> {
        parse_expression(token, Discipline::Strict, 0)
    }

    /// The lookup, when this expression reads from the render context.
    #[must_use]
    pub fn as_lookup(&self) -> Option<&VariableLookup> {
        match self {
            Expression::VariableLookup(lookup) => Some(lookup),
            _ => None,
        }
    }

    /// Whether the value is fixed at parse time.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        !matches!(self, Expression::VariableLookup(_))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::StringLiteral(text) if text.contains('\'') => write!(f, "\"{text}\""),
            Expression::StringLiteral(text) => write!(f, "'{text}'"),
            Expression::IntegerLiteral(value) => write!(f, "{value}"),
            Expression::FloatLiteral(value) => write!(f, "{value:?}"),
            Expression::BooleanLiteral(value) => write!(f, "{value}"),
            Expression::VariableLookup(lookup) => write!(f, "{lookup}"),
        }
    }
}

impl From<VariableLookup> for Expression {
    fn from(lookup: VariableLookup) -> Self {
        Expression::VariableLookup(lookup)
    }
}

/// A root name plus a dotted chain of sub-keys: `a.b.c` is `a` then `[b, c]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VariableLookup {
    name: String,
    lookups: Vec<String>,
}

impl VariableLookup {
    #[must_use]
    pub fn new(name: impl Into<String>, lookups: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lookups,
        }
    }

    /// Split `markup` on `.` with no further interpretation.
    #[must_use]
    pub fn parse(markup: &str) -> Self {
        let mut segments = markup.split('.');
        let name = segments.next().unwrap_or_default().to_string();
        let lookups = segments.map(str::to_string).collect();
        Self { name, lookups }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn lookups(&self) -> &[String] {
        &self.lookups
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.lookups.iter().map(String::as_str))
    }
}

impl fmt::Display for VariableLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for lookup in &self.lookups {
            write!(f, ".{lookup}")?;
        }
        Ok(())
    }
}

/// Parse one isolated token found at byte `position` of the markup.
pub(crate) fn parse_expression(
    token: &str,
    discipline: Discipline,
    position: usize,
) -> Result<Expression, ParseError> {
    if let Some(literal) = classify(token) {
        return Ok(literal);
    }

    let lookup = VariableLookup::parse(token);
    if discipline.is_strict() {
        for segment in lookup.segments() {
            validate_identifier(segment)
                .map_err(|kind| ParseError::malformed(kind, token, position))?;
        }
    }
    Ok(Expression::VariableLookup(lookup))
}

/// Recognize the literal shapes, in priority order.
fn classify(token: &str) -> Option<Expression> {
    if let Some(text) = unquote(token) {
        return Some(Expression::StringLiteral(text.to_string()));
    }

    if is_integer_shape(token) {
        // Out-of-range integers degrade to floats rather than failing.
        return Some(match token.parse::<i64>() {
            Ok(value) => Expression::IntegerLiteral(value),
            Err(_) => Expression::FloatLiteral(token.parse::<f64>().ok()?),
        });
    }

    if is_float_shape(token) {
        return token.parse::<f64>().ok().map(Expression::FloatLiteral);
    }

    match token {
        "true" => Some(Expression::BooleanLiteral(true)),
        "false" => Some(Expression::BooleanLiteral(false)),
        _ => None,
    }
}

fn unquote(token: &str) -> Option<&str> {
    let bytes = token.as_bytes();
    let (&first, &last) = (bytes.first()?, bytes.last()?);
    if bytes.len() >= 2 && is_quote(first) && first == last {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

fn digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_integer_shape(token: &str) -> bool {
    digits(token.strip_prefix('-').unwrap_or(token))
}

fn is_float_shape(token: &str) -> bool {
    let unsigned = token.strip_prefix('-').unwrap_or(token);
    unsigned
        .split_once('.')
        .is_some_and(|(whole, fraction)| digits(whole) && digits(fraction))
}
