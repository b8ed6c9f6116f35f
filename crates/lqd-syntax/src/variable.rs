use lqd_conf::ErrorMode;
use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;

use crate::context::Discipline;
use crate::context::ParseContext;
use crate::error::MalformedKind;
use crate::error::ParseError;
use crate::expression::parse_expression;
use crate::expression::Expression;
use crate::quotes::find_unquoted;
use crate::quotes::split_unquoted;
use crate::scanner::scan_filter_args;
use crate::scanner::ArgToken;
use crate::strict::validate_filter_args;
use crate::strict::validate_identifier;
use crate::strict::validate_name;

/// The parsed contents of one output tag, e.g. `user.name | default: 'Guest'`.
///
/// Carries no trace of the error mode it was parsed under and never changes
/// after construction, so one instance can back any number of renders.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParsedVariable {
    name: Option<Expression>,
    filters: Vec<FilterCall>,
    raw: String,
}

impl ParsedVariable {
    /// The expression before the first `|`; `None` when it was blank.
    #[must_use]
    pub fn name(&self) -> Option<&Expression> {
        self.name.as_ref()
    }

    #[must_use]
    pub fn filters(&self) -> &[FilterCall] {
        &self.filters
    }

    /// The markup exactly as it was handed to the parser.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// One `| name: args` step of a filter pipeline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilterCall {
    name: String,
    positional_args: Vec<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword_args: Option<KeywordArgs>,
}

impl FilterCall {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        positional_args: Vec<Expression>,
        keyword_args: Option<KeywordArgs>,
    ) -> Self {
        Self {
            name: name.into(),
            positional_args,
            keyword_args,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn positional_args(&self) -> &[Expression] {
        &self.positional_args
    }

    /// Present only when the filter was given at least one keyword argument.
    #[must_use]
    pub fn keyword_args(&self) -> Option<&KeywordArgs> {
        self.keyword_args.as_ref()
    }
}

/// Keyword arguments in first-seen order.
///
/// Inserting an existing key replaces its value in place. Equality compares
/// entries by key and ignores order.
#[derive(Clone, Debug, Default)]
pub struct KeywordArgs {
    entries: Vec<(String, Expression)>,
}

impl KeywordArgs {
    pub fn insert(&mut self, key: impl Into<String>, value: Expression) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Expression> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expression)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl PartialEq for KeywordArgs {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Into<String>> FromIterator<(K, Expression)> for KeywordArgs {
    fn from_iter<I: IntoIterator<Item = (K, Expression)>>(iter: I) -> Self {
        let mut args = KeywordArgs::default();
        for (key, value) in iter {
            args.insert(key, value);
        }
        args
    }
}

impl Serialize for KeywordArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse the markup of an output tag under the context's error mode.
///
/// Lax and warn modes always succeed. Strict mode fails on the first grammar
/// violation.
pub fn parse_variable(markup: &str, context: &ParseContext) -> Result<ParsedVariable, ParseError> {
    match context.error_mode() {
        ErrorMode::Lax => Ok(parse_lax(markup)),
        ErrorMode::Strict => parse_with(markup, Discipline::Strict),
        ErrorMode::Warn => Ok(parse_variable_with_warning(markup).0),
    }
}

/// Parse with the strict grammar, falling back to lax parsing on failure.
///
/// The strict error, if any, is returned alongside the lax result.
pub fn parse_variable_with_warning(markup: &str) -> (ParsedVariable, Option<ParseError>) {
    match parse_with(markup, Discipline::Strict) {
        Ok(variable) => (variable, None),
        Err(error) => {
            tracing::warn!(%error, markup, "Falling back to lax parsing");
            (parse_lax(markup), Some(error))
        }
    }
}

fn parse_lax(markup: &str) -> ParsedVariable {
    parse_with(markup, Discipline::Lax).unwrap_or_else(|_| ParsedVariable {
        name: None,
        filters: Vec::new(),
        raw: markup.to_string(),
    })
}

fn parse_with(markup: &str, discipline: Discipline) -> Result<ParsedVariable, ParseError> {
    let mut segments = split_unquoted(markup, b'|').into_iter();
    let (name_segment, name_offset) = segments.next().unwrap_or((markup, 0));

    let name = parse_name(name_segment, name_offset, discipline)?;

    let mut filters = Vec::with_capacity(segments.len());
    for (segment, offset) in segments {
        if let Some(filter) = parse_filter(segment, offset, discipline)? {
            filters.push(filter);
        }
    }

    tracing::trace!(markup, filters = filters.len(), ?discipline, "Parsed variable");

    Ok(ParsedVariable {
        name,
        filters,
        raw: markup.to_string(),
    })
}

/// Trimmed view of `segment` plus the absolute offset where it starts.
fn trimmed(segment: &str, offset: usize) -> (&str, usize) {
    let leading = segment.len() - segment.trim_start().len();
    (segment.trim(), offset + leading)
}

fn parse_name(
    segment: &str,
    offset: usize,
    discipline: Discipline,
) -> Result<Option<Expression>, ParseError> {
    let (name, position) = trimmed(segment, offset);

    if name.is_empty() {
        if discipline.is_strict() {
            return Err(ParseError::malformed(MalformedKind::EmptyName, name, position));
        }
        return Ok(None);
    }

    if discipline.is_strict() {
        validate_name(name, position)?;
    }

    parse_expression(name, discipline, position).map(Some)
}

fn parse_filter(
    segment: &str,
    offset: usize,
    discipline: Discipline,
) -> Result<Option<FilterCall>, ParseError> {
    let (filter, filter_position) = trimmed(segment, offset);
    let (name_part, args) = match find_unquoted(segment, b':') {
        Some(colon) => (&segment[..colon], Some((&segment[colon + 1..], offset + colon + 1))),
        None => (segment, None),
    };
    let (name, name_position) = trimmed(name_part, offset);

    if name.is_empty() {
        if discipline.is_strict() {
            return Err(ParseError::malformed(
                MalformedKind::EmptyName,
                filter,
                filter_position,
            ));
        }
        tracing::debug!(filter, "Skipping filter with empty name");
        return Ok(None);
    }

    if discipline.is_strict() {
        validate_identifier(name)
            .map_err(|kind| ParseError::malformed(kind, name, name_position))?;
    }

    let mut positional_args = Vec::new();
    let mut keyword_args: Option<KeywordArgs> = None;

    if let Some((args, args_offset)) = args {
        if discipline.is_strict() {
            validate_filter_args(args, filter, filter_position)?;
        }

        for token in scan_filter_args(args) {
            match token {
                ArgToken::Positional { text, offset } => {
                    positional_args.push(parse_expression(
                        text,
                        discipline,
                        args_offset + offset,
                    )?);
                }
                ArgToken::Keyword {
                    key,
                    value,
                    value_offset,
                } => {
                    let value = parse_expression(value, discipline, args_offset + value_offset)?;
                    keyword_args
                        .get_or_insert_with(KeywordArgs::default)
                        .insert(key, value);
                }
            }
        }
    }

    Ok(Some(FilterCall {
        name: name.to_string(),
        positional_args,
        keyword_args,
    }))
}
