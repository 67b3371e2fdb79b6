//! Diagnostics produced by the checker and the analyzer
//!
//! - [`messages`]: the [`CheckError`] / [`CheckWarning`] message enums
//! - [`sink`]: where formatted diagnostics go ([`DiagnosticSink`])
//! - [`reporter`]: counting, ordering and the sticky failure flag
//!
//! Every diagnostic renders as `<phase> <severity> (line N): <message>`, for
//! example `type error (line 4): undeclared identifier 'x'`. Errors and
//! warnings are kept in one stream, in traversal order.

pub mod messages;
pub mod reporter;
pub mod sink;

pub use messages::{CheckError, CheckWarning, ErrorCategory};
pub use reporter::Reporter;
pub use sink::{DiagnosticSink, NullSink, StderrSink};

use crate::ast::SourceLocation;
use std::fmt;

/// Which pass raised a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    TypeCheck,
    Semantic,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::TypeCheck => write!(f, "type"),
            Phase::Semantic => write!(f, "semantic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Message payload, split by severity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Error(CheckError),
    Warning(CheckWarning),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub phase: Phase,
    pub message: Message,
    pub location: SourceLocation,
}

impl Diagnostic {
    pub fn error(phase: Phase, error: CheckError, location: SourceLocation) -> Self {
        Diagnostic {
            phase,
            message: Message::Error(error),
            location,
        }
    }

    pub fn warning(phase: Phase, warning: CheckWarning, location: SourceLocation) -> Self {
        Diagnostic {
            phase,
            message: Message::Warning(warning),
            location,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.message {
            Message::Error(_) => Severity::Error,
            Message::Warning(_) => Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn as_error(&self) -> Option<&CheckError> {
        match &self.message {
            Message::Error(e) => Some(e),
            Message::Warning(_) => None,
        }
    }

    pub fn as_warning(&self) -> Option<&CheckWarning> {
        match &self.message {
            Message::Warning(w) => Some(w),
            Message::Error(_) => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Message::Error(e) => write!(
                f,
                "{} error (line {}): {}",
                self.phase, self.location.line, e
            ),
            Message::Warning(w) => write!(
                f,
                "{} warning (line {}): {}",
                self.phase, self.location.line, w
            ),
        }
    }
}
