//! Parsing for the markup inside template output tags.
//!
//! The text between `{{` and `}}`, such as
//! `product.title | truncate: 20, ellipsis: '…' | upcase`, becomes a
//! [`ParsedVariable`]: a name [`Expression`] followed by an ordered list of
//! [`FilterCall`]s with positional and keyword arguments.
//!
//! ## Error modes
//!
//! The [`ParseContext`] selects one of three [`ErrorMode`]s:
//!
//! - **lax** (default): malformed separators are skipped and whatever can be
//!   extracted is kept. Never fails.
//! - **strict**: the name, filter names and argument lists must match the
//!   grammar exactly; the first violation is a [`ParseError`].
//! - **warn**: strict first, then lax, logging the strict error.
//!
//! ## Pipeline
//!
//! 1. The markup is split on unquoted `|`.
//! 2. The first segment is parsed as the name expression.
//! 3. Each filter segment is split on its first unquoted `:` into a filter
//!    name and argument text. Under strict mode the argument text is checked
//!    against the anchored argument grammar before anything is extracted.
//! 4. The argument text is scanned into positional and `key: value` tokens,
//!    each of which is parsed as an [`Expression`].
//!
//! ## Example
//!
//! ```
//! use lqd_syntax::{parse_variable, Expression, ParseContext, VariableLookup};
//!
//! let var = parse_variable("hello | strftime: '%Y'", &ParseContext::lax()).unwrap();
//! assert_eq!(var.name(), Some(&Expression::VariableLookup(VariableLookup::parse("hello"))));
//! assert_eq!(var.filters()[0].name(), "strftime");
//! assert_eq!(
//!     var.filters()[0].positional_args(),
//!     [Expression::StringLiteral("%Y".to_string())]
//! );
//! ```

mod context;
mod error;
mod expression;
mod matchers;
mod quotes;
mod scanner;
mod strict;
mod variable;

pub use context::ParseContext;
pub use error::MalformedKind;
pub use error::ParseError;
pub use expression::Expression;
pub use expression::VariableLookup;
pub use lqd_conf::ErrorMode;
pub use scanner::scan_filter_args;
pub use scanner::ArgToken;
pub use scanner::FilterArgScanner;
pub use variable::parse_variable;
pub use variable::parse_variable_with_warning;
pub use variable::FilterCall;
pub use variable::KeywordArgs;
pub use variable::ParsedVariable;
