//! Statement checking
//!
//! Scopes are entered here for `if`/`else` branches, `while` bodies and whole
//! `for` loops. Compound statements run in the caller's scope.

use super::TypeChecker;
use crate::ast::{Expr, ExprKind, SourceLocation, Stmt};
use crate::diagnostics::CheckError;
use crate::symbols::SymbolKind;
use crate::types::Type;

impl TypeChecker {
    /// Check one statement or declaration. Expression statements yield the
    /// expression's type, everything else `void` (or `error` on failure).
    pub fn check_stmt(&mut self, stmt: &mut Stmt) -> Type {
        match stmt {
            Stmt::Compound { statements, .. } => {
                for s in statements {
                    self.check_stmt(s);
                }
                Type::Void
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.check_condition(condition, "if");

                self.symbols.enter_scope();
                self.check_stmt(then_branch);
                self.symbols.exit_scope();

                if let Some(else_branch) = else_branch {
                    self.symbols.enter_scope();
                    self.check_stmt(else_branch);
                    self.symbols.exit_scope();
                }
                Type::Void
            }

            Stmt::While {
                condition, body, ..
            } => {
                self.check_condition(condition, "while");

                self.symbols.enter_scope();
                self.check_stmt(body);
                self.symbols.exit_scope();
                Type::Void
            }

            Stmt::For {
                init,
                condition,
                step,
                body,
                ..
            } => {
                self.symbols.enter_scope();
                if let Some(init) = init {
                    self.check_stmt(init);
                }
                if let Some(condition) = condition {
                    self.check_condition(condition, "for");
                }
                if let Some(step) = step {
                    self.check_expr(step);
                }
                self.check_stmt(body);
                self.symbols.exit_scope();
                Type::Void
            }

            Stmt::Return { value, location } => self.check_return(value.as_mut(), *location),

            Stmt::Break { .. } | Stmt::Continue { .. } => Type::Void,

            Stmt::Expr { expr, .. } => self.check_expr(expr),

            Stmt::VarDecl { decl, location } => self.check_var_decl(decl, *location),

            Stmt::FuncDecl { decl, location } => self.check_func_decl(decl, *location),

            Stmt::Assign {
                target,
                value,
                location,
            } => self.check_assign(target, value, *location),
        }
    }

    fn check_condition(&mut self, condition: &mut Expr, construct: &'static str) {
        let ty = self.check_expr(condition);
        if !ty.is_error() && !ty.is_boolean() {
            self.error(
                CheckError::ConditionType {
                    construct,
                    found: ty.to_string(),
                },
                condition.location,
            );
        }
    }

    fn check_return(&mut self, value: Option<&mut Expr>, location: SourceLocation) -> Type {
        let expected = self.current_return_type.clone();
        if expected.is_none() {
            self.error(CheckError::ReturnOutsideFunction, location);
        }

        let found = value.map(|v| self.check_expr(v));

        let Some(expected) = expected else {
            return Type::Error;
        };

        match found {
            Some(found) if found.is_error() => Type::Error,
            Some(found) => {
                if expected.is_compatible(&found) {
                    Type::Void
                } else {
                    self.error(
                        CheckError::ReturnType {
                            expected: expected.to_string(),
                            found: found.to_string(),
                        },
                        location,
                    );
                    Type::Error
                }
            }
            None if expected.is_void() => Type::Void,
            None => {
                self.error(
                    CheckError::MissingReturnValue {
                        expected: expected.to_string(),
                    },
                    location,
                );
                Type::Error
            }
        }
    }

    fn check_assign(&mut self, target: &mut Expr, value: &mut Expr, location: SourceLocation) -> Type {
        if !target.is_lvalue() {
            self.error(CheckError::AssignRequiresLvalue, location);
            self.check_expr(target);
            self.check_expr(value);
            return Type::Error;
        }

        let target_ty = self.check_assign_target(target);
        let value_ty = self.check_expr(value);

        if target_ty.is_error() || value_ty.is_error() {
            return Type::Error;
        }

        if let Some(name) = target.as_identifier() {
            if matches!(
                self.symbols.lookup(name).map(|s| s.kind),
                Some(SymbolKind::Func)
            ) {
                self.error(
                    CheckError::NotAVariable {
                        name: name.to_string(),
                    },
                    location,
                );
                return Type::Error;
            }
        }

        if !self.check_assignment_compatibility(&target_ty, &value_ty, location) {
            self.error(
                CheckError::AssignmentType {
                    expected: target_ty.to_string(),
                    found: value_ty.to_string(),
                },
                location,
            );
            return Type::Error;
        }

        if let Some(name) = target.as_identifier() {
            if let Some(sym) = self.symbols.lookup_mut(name) {
                sym.update_definition(true);
            }
        }
        target_ty
    }

    /// A plain name being written is neither a read nor a use-before-define
    fn check_assign_target(&mut self, target: &mut Expr) -> Type {
        let name = match &target.kind {
            ExprKind::Identifier(name) => name,
            _ => return self.check_expr(target),
        };

        let ty = match self.symbols.lookup(name) {
            Some(sym) => sym.ty.clone(),
            None => {
                self.error(
                    CheckError::UndeclaredIdentifier {
                        name: name.to_string(),
                    },
                    target.location,
                );
                Type::Error
            }
        };
        target.ty = Some(ty.clone());
        ty
    }
}
