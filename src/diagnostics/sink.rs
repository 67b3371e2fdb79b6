use super::Diagnostic;

/// Destination for formatted diagnostics
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: &Diagnostic);
}

/// Writes each diagnostic as one line on stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        eprintln!("{}", diagnostic);
    }
}

/// Discards everything; the [`Reporter`](super::Reporter) still records it
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _diagnostic: &Diagnostic) {}
}

impl DiagnosticSink for Vec<String> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.to_string());
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

/// Shared sink, for callers that want to read diagnostics back while the
/// checker still owns the writer
impl<S: DiagnosticSink> DiagnosticSink for std::rc::Rc<std::cell::RefCell<S>> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.borrow_mut().emit(diagnostic);
    }
}
