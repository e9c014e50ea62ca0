//! C1: the diagnostics sink.
//!
//! Two append-only sequences accumulate problems found while walking the
//! tree. Nothing here ever aborts the walk; a node that fails validation
//! still gets a (possibly unchanged) replacement so the walk can keep
//! looking for more problems.

use std::borrow::Cow;
use std::fmt;

/// A single error or warning, tied to a source line when the originating
/// node carried a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: Option<u32>,
    pub message: Cow<'static, str>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {line}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Per-compilation accumulator for errors and warnings. Never shared across
/// compilations; owned by the [`crate::context::TransformContext`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, line: Option<u32>, message: impl Into<Cow<'static, str>>) {
        self.errors.push(Diagnostic {
            line,
            message: message.into(),
        });
    }

    pub fn warn(&mut self, line: Option<u32>, message: impl Into<Cow<'static, str>>) {
        self.warnings.push(Diagnostic {
            line,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// A compilation that recorded any error must be rejected by the
    /// caller after transformation completes (§7).
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
