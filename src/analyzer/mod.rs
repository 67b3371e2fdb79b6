//! Semantic analysis
//!
//! Runs the [`TypeChecker`] and then walks the program a second time over the
//! same retained scope tree:
//!
//! - [`folding`]: integer constant folding, division by zero
//! - [`flow`]: dead code after `return`/`break`/`continue`, return coverage
//! - [`checks`]: declaration shape, duplicate parameters, `const` targets,
//!   control context, call targets, `main`, unused variables
//!
//! # Scope Replay
//!
//! The second walk does not rebuild the symbol table. It rewinds the
//! checker's table and re-enters each retained scope in creation order at the
//! same places the checker entered it. Rewinding hides every symbol; each
//! declaration reveals its name again where the checker inserted it, so names
//! resolve exactly as they did during type checking.
//!
//! # Verdict
//!
//! Both passes share one [`Reporter`](crate::diagnostics::Reporter): the
//! verdict is `true` only if neither pass reported an error.

pub mod checks;
pub mod flow;
pub mod folding;

pub use flow::{check_all_paths_return, is_unreachable_after};
pub use folding::{constant_fold, evaluate_constant_expr, is_constant_expr};

use crate::ast::{BinOp, Expr, ExprKind, Program, SourceLocation, Stmt};
use crate::checker::TypeChecker;
use crate::config::AnalyzerOptions;
use crate::diagnostics::{CheckError, CheckWarning, Diagnostic, DiagnosticSink, Phase};
use crate::symbols::SymbolTable;

#[derive(Debug)]
pub struct SemanticAnalyzer {
    checker: TypeChecker,
    options: AnalyzerOptions,

    // Walk state, saved and restored around function and loop bodies
    in_function: bool,
    in_loop: bool,
    has_return: bool,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::from_checker(TypeChecker::new(), AnalyzerOptions::default())
    }

    pub fn with_options(options: AnalyzerOptions) -> Self {
        Self::from_checker(TypeChecker::new(), options)
    }

    /// Analyzer that reports into `sink` instead of stderr
    pub fn with_sink(sink: impl DiagnosticSink + 'static) -> Self {
        Self::from_checker(TypeChecker::with_sink(sink), AnalyzerOptions::default())
    }

    fn from_checker(checker: TypeChecker, options: AnalyzerOptions) -> Self {
        SemanticAnalyzer {
            checker,
            options,
            in_function: false,
            in_loop: false,
            has_return: false,
        }
    }

    pub fn set_options(&mut self, options: AnalyzerOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Type check, then analyze. Folding rewrites `program` in place.
    pub fn analyze_program(&mut self, program: &mut Program) -> bool {
        tracing::info!(
            declarations = program.declarations.len(),
            "semantic analysis started"
        );

        self.checker.check_program(program);

        self.in_function = false;
        self.in_loop = false;
        self.has_return = false;
        self.checker.symbols_mut().rewind();

        for decl in &mut program.declarations {
            self.analyze_stmt(decl);
        }
        self.checker.symbols_mut().reveal_all();

        if self.options.warn_unused_variables {
            self.check_unused_variables();
        }

        tracing::info!(
            errors = self.checker.error_count(),
            warnings = self.checker.warning_count(),
            "semantic analysis finished"
        );
        !self.checker.has_errors()
    }

    pub fn checker(&self) -> &TypeChecker {
        &self.checker
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.checker.symbols()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.checker.diagnostics()
    }

    pub fn error_count(&self) -> usize {
        self.checker.error_count()
    }

    pub fn warning_count(&self) -> usize {
        self.checker.warning_count()
    }

    pub fn has_errors(&self) -> bool {
        self.checker.has_errors()
    }

    fn error(&mut self, error: CheckError, location: SourceLocation) {
        self.checker
            .reporter_mut()
            .error(Phase::Semantic, error, location);
    }

    /// Report a check that the type checker may already have made
    fn error_once(&mut self, error: CheckError, location: SourceLocation) {
        self.checker
            .reporter_mut()
            .error_once(Phase::Semantic, error, location);
    }

    fn warning(&mut self, warning: CheckWarning, location: SourceLocation) {
        self.checker
            .reporter_mut()
            .warning(Phase::Semantic, warning, location);
    }

    fn analyze_stmt(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Compound { statements, .. } => self.analyze_block(statements),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.analyze_expr(condition);

                self.checker.symbols_mut().revisit_scope();
                self.analyze_stmt(then_branch);
                self.checker.symbols_mut().exit_scope();

                if let Some(else_branch) = else_branch {
                    self.checker.symbols_mut().revisit_scope();
                    self.analyze_stmt(else_branch);
                    self.checker.symbols_mut().exit_scope();
                }
            }

            Stmt::While {
                condition, body, ..
            } => {
                self.analyze_expr(condition);

                self.checker.symbols_mut().revisit_scope();
                self.analyze_loop_body(body);
                self.checker.symbols_mut().exit_scope();
            }

            Stmt::For {
                init,
                condition,
                step,
                body,
                ..
            } => {
                self.checker.symbols_mut().revisit_scope();
                if let Some(init) = init {
                    self.analyze_stmt(init);
                }
                if let Some(condition) = condition {
                    self.analyze_expr(condition);
                }
                if let Some(step) = step {
                    self.analyze_expr(step);
                }
                self.analyze_loop_body(body);
                self.checker.symbols_mut().exit_scope();
            }

            Stmt::Return { value, location } => {
                if !self.in_function {
                    self.error_once(CheckError::ReturnOutsideFunction, *location);
                }
                self.has_return = true;
                if let Some(value) = value {
                    self.analyze_expr(value);
                }
            }

            Stmt::Break { location } => self.check_jump("break", *location),

            Stmt::Continue { location } => self.check_jump("continue", *location),

            Stmt::Expr { expr, .. } => self.analyze_expr(expr),

            Stmt::VarDecl { decl, location } => {
                // In scope for its own initializer
                self.checker.symbols_mut().reveal(&decl.name);
                self.check_var_decl_shape(decl, *location);
                if let Some(init) = &mut decl.init {
                    self.analyze_expr(init);
                }
            }

            Stmt::FuncDecl { decl, location } => {
                let location = *location;
                self.checker.symbols_mut().reveal(&decl.name);
                self.check_main_signature(decl, location);
                self.check_duplicate_params(decl);

                let Some(body) = &mut decl.body else {
                    return;
                };

                self.checker.symbols_mut().revisit_scope();
                for param in &decl.params {
                    self.checker.symbols_mut().reveal(&param.name);
                }

                let saved = (self.in_function, self.in_loop, self.has_return);
                self.in_function = true;
                self.in_loop = false;
                self.has_return = false;

                self.analyze_stmt(body);
                self.check_return_coverage(&decl.name, &decl.return_type, body, location);

                (self.in_function, self.in_loop, self.has_return) = saved;
                self.checker.symbols_mut().exit_scope();
            }

            Stmt::Assign { target, value, location } => {
                self.check_const_target(target, *location);
                if target.as_identifier().is_none() {
                    self.analyze_expr(target);
                }
                self.analyze_expr(value);
            }
        }
    }

    /// Analyze each statement; warn once at the first statement that
    /// follows an unconditional jump
    fn analyze_block(&mut self, statements: &mut [Stmt]) {
        let mut reported = false;
        for i in 0..statements.len() {
            self.analyze_stmt(&mut statements[i]);

            if !reported && i + 1 < statements.len() && is_unreachable_after(&statements[i]) {
                self.warning(CheckWarning::DeadCode, *statements[i + 1].location());
                reported = true;
            }
        }
    }

    fn analyze_loop_body(&mut self, body: &mut Stmt) {
        let saved = std::mem::replace(&mut self.in_loop, true);
        self.analyze_stmt(body);
        self.in_loop = saved;
    }

    fn analyze_expr(&mut self, expr: &mut Expr) {
        let location = expr.location;

        match &mut expr.kind {
            ExprKind::Literal(_) | ExprKind::Identifier(_) => return,

            ExprKind::Binary { op, left, right } => {
                self.analyze_expr(left);
                self.analyze_expr(right);
                if matches!(op, BinOp::Div | BinOp::Mod)
                    && evaluate_constant_expr(right) == Some(0)
                {
                    self.error(CheckError::DivisionByZero, location);
                }
            }

            ExprKind::Unary { operand, .. } => self.analyze_expr(operand),

            ExprKind::ArrayAccess { array, index } => {
                self.analyze_expr(array);
                self.analyze_expr(index);
            }

            ExprKind::Call { name, args } => {
                self.check_call_target(name, location);
                for arg in args {
                    self.analyze_expr(arg);
                }
            }
        }

        if self.options.constant_folding {
            folding::fold_node(expr);
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Run both passes over a whole program
pub fn semantic_analyze_program(analyzer: &mut SemanticAnalyzer, program: &mut Program) -> bool {
    analyzer.analyze_program(program)
}
