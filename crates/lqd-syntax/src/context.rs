use lqd_conf::ErrorMode;
use lqd_conf::Settings;

/// Read-only options for one or more parse calls.
///
/// A context holds no resources and can be shared freely between threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParseContext {
    error_mode: ErrorMode,
}

impl ParseContext {
    #[must_use]
    pub fn new(error_mode: ErrorMode) -> Self {
        Self { error_mode }
    }

    #[must_use]
    pub fn lax() -> Self {
        Self::new(ErrorMode::Lax)
    }

    #[must_use]
    pub fn strict() -> Self {
        Self::new(ErrorMode::Strict)
    }

    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.error_mode)
    }

    #[must_use]
    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }
}

/// The grammar a single parsing pass enforces.
///
/// Warn mode runs a strict pass and, on failure, a lax one, so the passes
/// themselves only ever see one of these two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Discipline {
    Lax,
    Strict,
}

impl Discipline {
    #[inline]
    pub(crate) fn is_strict(self) -> bool {
        self == Discipline::Strict
    }
}
