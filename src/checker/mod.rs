//! Type checker
//!
//! A recursive walk over the AST that computes the type of every expression,
//! writes it into the node's [`ty`](crate::ast::Expr::ty) slot, and drives
//! scope entry/exit for function bodies, branches and loops.
//!
//! - [`expressions`]: literals, names, operators, indexing, calls
//! - [`statements`]: control flow, returns, assignment
//! - [`declarations`]: variables, prototypes and function bodies
//!
//! # Error Policy
//!
//! A rule that finds a violation reports it and yields [`Type::Error`].
//! Outer rules treat an `Error` operand as already reported and stay silent,
//! so one mistake produces one diagnostic.

pub mod declarations;
pub mod expressions;
pub mod statements;

use crate::ast::{Program, SourceLocation};
use crate::diagnostics::{
    CheckError, CheckWarning, Diagnostic, DiagnosticSink, Phase, Reporter,
};
use crate::symbols::SymbolTable;
use crate::types::Type;

/// Owns the symbol table and diagnostic stream for one program
#[derive(Debug)]
pub struct TypeChecker {
    /// Scope tree; retained after checking for dumps and replay
    symbols: SymbolTable,

    reporter: Reporter,

    /// Return type of the function whose body is being checked
    current_return_type: Option<Type>,

    /// Next free byte offset in the current frame
    frame_offset: i32,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            symbols: SymbolTable::new(),
            reporter: Reporter::new(),
            current_return_type: None,
            frame_offset: 0,
        }
    }

    /// Checker that reports into `sink` instead of stderr
    pub fn with_sink(sink: impl DiagnosticSink + 'static) -> Self {
        TypeChecker {
            reporter: Reporter::with_sink(sink),
            ..Self::new()
        }
    }

    /// Check every top-level declaration. Returns `true` if no errors were
    /// reported. Starts from a fresh symbol table, so re-running on the same
    /// input gives the same verdict.
    pub fn check_program(&mut self, program: &mut Program) -> bool {
        self.reset();
        tracing::info!(
            declarations = program.declarations.len(),
            "type check started"
        );

        for decl in &mut program.declarations {
            self.check_stmt(decl);
        }

        tracing::info!(
            errors = self.reporter.error_count(),
            warnings = self.reporter.warning_count(),
            "type check finished"
        );
        !self.reporter.has_errors()
    }

    fn reset(&mut self) {
        self.symbols = SymbolTable::new();
        self.reporter.reset();
        self.current_return_type = None;
        self.frame_offset = 0;
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.reporter.diagnostics()
    }

    pub fn error_count(&self) -> usize {
        self.reporter.error_count()
    }

    pub fn warning_count(&self) -> usize {
        self.reporter.warning_count()
    }

    pub fn has_errors(&self) -> bool {
        self.reporter.has_errors()
    }

    pub(crate) fn reporter_mut(&mut self) -> &mut Reporter {
        &mut self.reporter
    }

    fn error(&mut self, error: CheckError, location: SourceLocation) {
        self.reporter.error(Phase::TypeCheck, error, location);
    }

    fn warning(&mut self, warning: CheckWarning, location: SourceLocation) {
        self.reporter.warning(Phase::TypeCheck, warning, location);
    }

    /// Reserve frame space for a variable and return its offset
    fn allocate(&mut self, ty: &Type) -> i32 {
        let offset = self.frame_offset;
        self.frame_offset = self.frame_offset.saturating_add(ty.size_in_bytes());
        offset
    }

    /// Assignment rule: general compatibility, warning on `int <- float`
    fn check_assignment_compatibility(
        &mut self,
        target: &Type,
        value: &Type,
        location: SourceLocation,
    ) -> bool {
        if !target.is_compatible(value) {
            return false;
        }
        if matches!((target, value), (Type::Int, Type::Float)) {
            self.warning(CheckWarning::PrecisionLoss, location);
        }
        true
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the checker over a whole program
pub fn type_check_program(checker: &mut TypeChecker, program: &mut Program) -> bool {
    checker.check_program(program)
}
