//! Analyzer configuration

/// Switches for the optional parts of semantic analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Replace constant integer sub-expressions with literals
    pub constant_folding: bool,
    /// Warn when `main` does not return `int`
    pub check_main_signature: bool,
    /// Warn about variables that are never read
    pub warn_unused_variables: bool,
}

impl AnalyzerOptions {
    pub fn new() -> Self {
        AnalyzerOptions {
            constant_folding: true,
            check_main_signature: true,
            warn_unused_variables: false,
        }
    }

    pub fn with_constant_folding(mut self, enabled: bool) -> Self {
        self.constant_folding = enabled;
        self
    }

    pub fn with_main_signature_check(mut self, enabled: bool) -> Self {
        self.check_main_signature = enabled;
        self
    }

    pub fn with_unused_variable_warnings(mut self, enabled: bool) -> Self {
        self.warn_unused_variables = enabled;
        self
    }
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self::new()
    }
}
