//! Structural checks run during the second walk

use super::{check_all_paths_return, SemanticAnalyzer};
use crate::ast::{Expr, FuncDecl, SourceLocation, Stmt, VarDecl};
use crate::diagnostics::{CheckError, CheckWarning};
use crate::symbols::SymbolKind;
use crate::types::Type;

impl SemanticAnalyzer {
    /// Arrays need a positive length and nothing may be declared `void`
    pub(crate) fn check_var_decl_shape(&mut self, decl: &VarDecl, location: SourceLocation) {
        match &decl.var_type {
            Type::Array { size, .. } if *size <= 0 => self.error(
                CheckError::NonPositiveArraySize {
                    name: decl.name.clone(),
                    size: *size,
                },
                location,
            ),
            Type::Void => self.error(
                CheckError::VoidVariable {
                    name: decl.name.clone(),
                },
                location,
            ),
            _ => {}
        }
    }

    /// Every repeat of an earlier parameter name is reported
    pub(crate) fn check_duplicate_params(&mut self, decl: &FuncDecl) {
        for (i, param) in decl.params.iter().enumerate() {
            if decl.params[..i].iter().any(|p| p.name == param.name) {
                self.error(
                    CheckError::DuplicateParameter {
                        function: decl.name.clone(),
                        param: param.name.clone(),
                    },
                    param.location,
                );
            }
        }
    }

    pub(crate) fn check_main_signature(&mut self, decl: &FuncDecl, location: SourceLocation) {
        if !self.options.check_main_signature || decl.name != "main" || decl.body.is_none() {
            return;
        }
        if !decl.return_type.equals(&Type::Int) {
            self.warning(
                CheckWarning::MainReturnType {
                    found: decl.return_type.to_string(),
                },
                location,
            );
        }
    }

    /// One warning at most per non-void function
    pub(crate) fn check_return_coverage(
        &mut self,
        name: &str,
        return_type: &Type,
        body: &Stmt,
        location: SourceLocation,
    ) {
        if return_type.is_void() || return_type.is_error() || check_all_paths_return(body) {
            return;
        }
        let warning = if self.has_return {
            CheckWarning::MissingReturn {
                name: name.to_string(),
            }
        } else {
            CheckWarning::NoReturnStatement {
                name: name.to_string(),
            }
        };
        self.warning(warning, location);
    }

    pub(crate) fn check_const_target(&mut self, target: &Expr, location: SourceLocation) {
        let Some(name) = target.as_identifier() else {
            return;
        };
        let is_const = self
            .checker
            .symbols()
            .lookup(name)
            .is_some_and(|sym| sym.is_const());
        if is_const {
            self.error(
                CheckError::AssignToConst {
                    name: name.to_string(),
                },
                location,
            );
        }
    }

    pub(crate) fn check_call_target(&mut self, name: &str, location: SourceLocation) {
        let kind = self.checker.symbols().lookup(name).map(|sym| sym.kind);
        match kind {
            None => self.error_once(
                CheckError::UndeclaredFunction {
                    name: name.to_string(),
                },
                location,
            ),
            Some(SymbolKind::Func) => {}
            Some(_) => self.error_once(
                CheckError::NotAFunction {
                    name: name.to_string(),
                },
                location,
            ),
        }
    }

    pub(crate) fn check_jump(&mut self, keyword: &'static str, location: SourceLocation) {
        if !self.in_loop {
            self.error(CheckError::JumpOutsideLoop { keyword }, location);
        }
    }

    /// Variables never read by an identifier expression, in scope order
    pub(crate) fn check_unused_variables(&mut self) {
        let symbols = self.checker.symbols();
        let unused: Vec<(String, SourceLocation)> = symbols
            .walk()
            .into_iter()
            .flat_map(move |(_, id)| symbols.scope(id).symbols())
            .filter(|sym| sym.kind == SymbolKind::Var && !sym.is_used)
            .map(|sym| (sym.name.clone(), sym.declared_at))
            .collect();

        for (name, location) in unused {
            self.warning(CheckWarning::UnusedVariable { name }, location);
        }
    }
}
