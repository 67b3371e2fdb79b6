use super::sink::{DiagnosticSink, StderrSink};
use super::{CheckError, CheckWarning, Diagnostic, Message, Phase};
use crate::ast::SourceLocation;
use std::fmt;

/// Records diagnostics in order, forwards them to a sink, and keeps the
/// error/warning counters. `has_errors` is sticky until [`reset`](Reporter::reset).
pub struct Reporter {
    sink: Box<dyn DiagnosticSink>,
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
    has_errors: bool,
}

impl Reporter {
    pub fn new() -> Self {
        Self::with_sink(StderrSink)
    }

    pub fn with_sink(sink: impl DiagnosticSink + 'static) -> Self {
        Reporter {
            sink: Box::new(sink),
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
            has_errors: false,
        }
    }

    pub fn set_sink(&mut self, sink: impl DiagnosticSink + 'static) {
        self.sink = Box::new(sink);
    }

    pub fn error(&mut self, phase: Phase, error: CheckError, location: SourceLocation) {
        self.error_count += 1;
        self.has_errors = true;
        self.push(Diagnostic::error(phase, error, location));
    }

    /// Report unless the same error was already reported for this line by
    /// either pass. Returns whether it was reported.
    pub fn error_once(&mut self, phase: Phase, error: CheckError, location: SourceLocation) -> bool {
        let seen = self.diagnostics.iter().any(|d| {
            d.location.line == location.line && matches!(&d.message, Message::Error(e) if *e == error)
        });
        if seen {
            tracing::debug!(%error, line = location.line, "suppressed duplicate diagnostic");
            return false;
        }
        self.error(phase, error, location);
        true
    }

    pub fn warning(&mut self, phase: Phase, warning: CheckWarning, location: SourceLocation) {
        self.warning_count += 1;
        self.push(Diagnostic::warning(phase, warning, location));
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        self.sink.emit(&diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Clear counters and history; the sink is kept
    pub fn reset(&mut self) {
        self.diagnostics.clear();
        self.error_count = 0;
        self.warning_count = 0;
        self.has_errors = false;
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &CheckError> {
        self.diagnostics.iter().filter_map(Diagnostic::as_error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &CheckWarning> {
        self.diagnostics.iter().filter_map(Diagnostic::as_warning)
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("diagnostics", &self.diagnostics)
            .field("error_count", &self.error_count)
            .field("warning_count", &self.warning_count)
            .field("has_errors", &self.has_errors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullSink;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_counts_and_sticky_flag() {
        let mut reporter = Reporter::with_sink(NullSink);
        reporter.warning(Phase::TypeCheck, CheckWarning::PrecisionLoss, SourceLocation::at_line(1));
        assert!(!reporter.has_errors());

        reporter.error(Phase::Semantic, CheckError::DivisionByZero, SourceLocation::at_line(2));
        reporter.warning(Phase::Semantic, CheckWarning::DeadCode, SourceLocation::at_line(3));
        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.warning_count(), 2);
        assert_eq!(reporter.diagnostics().len(), 3);

        reporter.reset();
        assert!(!reporter.has_errors());
        assert!(reporter.diagnostics().is_empty());
    }

    #[test]
    fn test_error_once_deduplicates_per_line() {
        let mut reporter = Reporter::with_sink(NullSink);
        let loc = SourceLocation::at_line(5);
        reporter.error(Phase::TypeCheck, CheckError::ReturnOutsideFunction, loc);
        assert!(!reporter.error_once(Phase::Semantic, CheckError::ReturnOutsideFunction, loc));
        assert!(reporter.error_once(
            Phase::Semantic,
            CheckError::ReturnOutsideFunction,
            SourceLocation::at_line(6)
        ));
        assert_eq!(reporter.error_count(), 2);
    }

    #[test]
    fn test_sink_receives_in_order() {
        let lines = Rc::new(RefCell::new(Vec::<String>::new()));
        let mut reporter = Reporter::with_sink(Rc::clone(&lines));
        reporter.error(Phase::TypeCheck, CheckError::AssignRequiresLvalue, SourceLocation::at_line(1));
        reporter.warning(Phase::Semantic, CheckWarning::DeadCode, SourceLocation::at_line(2));

        assert_eq!(
            *lines.borrow(),
            vec![
                "type error (line 1): left side of assignment must be an lvalue".to_string(),
                "semantic warning (line 2): unreachable code".to_string(),
            ]
        );
    }
}
