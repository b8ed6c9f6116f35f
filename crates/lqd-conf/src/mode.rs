use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// How strictly output-tag markup is checked while parsing.
///
/// ```toml
/// # lqd.toml
/// error_mode = "strict"
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMode {
    /// Best-effort extraction; malformed markup never fails.
    #[default]
    Lax,
    /// Strict grammar first, falling back to lax with a warning.
    Warn,
    /// Grammar violations are syntax errors.
    Strict,
}

impl ErrorMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorMode::Lax => "lax",
            ErrorMode::Warn => "warn",
            ErrorMode::Strict => "strict",
        }
    }
}

impl fmt::Display for ErrorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown error mode '{0}', expected one of: lax, warn, strict")]
pub struct UnknownErrorMode(String);

impl FromStr for ErrorMode {
    type Err = UnknownErrorMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lax" => Ok(ErrorMode::Lax),
            "warn" => Ok(ErrorMode::Warn),
            "strict" => Ok(ErrorMode::Strict),
            _ => Err(UnknownErrorMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lax() {
        assert_eq!(ErrorMode::default(), ErrorMode::Lax);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Strict".parse::<ErrorMode>(), Ok(ErrorMode::Strict));
        assert_eq!(" warn ".parse::<ErrorMode>(), Ok(ErrorMode::Warn));
        assert_eq!("lax".parse::<ErrorMode>(), Ok(ErrorMode::Lax));
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = "pedantic".parse::<ErrorMode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown error mode 'pedantic', expected one of: lax, warn, strict"
        );
    }

    #[test]
    fn display_matches_from_str() {
        for mode in [ErrorMode::Lax, ErrorMode::Warn, ErrorMode::Strict] {
            assert_eq!(mode.to_string().parse::<ErrorMode>(), Ok(mode));
        }
    }
}
