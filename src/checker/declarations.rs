//! Variable and function declarations
//!
//! Variables get a frame offset when they are inserted. A function body is
//! checked in a fresh scope holding its parameters, with its own frame and
//! its return type installed for `return` statements.

use super::TypeChecker;
use crate::ast::{FuncDecl, SourceLocation, VarDecl};
use crate::diagnostics::CheckError;
use crate::symbols::SymbolKind;
use crate::types::Type;

impl TypeChecker {
    pub(crate) fn check_var_decl(&mut self, decl: &mut VarDecl, location: SourceLocation) -> Type {
        if self.symbols.lookup_current_scope(&decl.name).is_some() {
            self.error(
                CheckError::Redeclaration {
                    name: decl.name.clone(),
                },
                location,
            );
            if let Some(init) = &mut decl.init {
                self.check_expr(init);
            }
            return Type::Error;
        }

        let offset = self.allocate(&decl.var_type);
        if let Some(sym) = self
            .symbols
            .insert(&decl.name, SymbolKind::Var, decl.var_type.clone())
        {
            sym.update_var_info(decl.is_const, offset);
            sym.declared_at = location;
        }

        let Some(init) = &mut decl.init else {
            return Type::Void;
        };

        let init_ty = self.check_expr(init);
        if init_ty.is_error() {
            return Type::Error;
        }
        if !self.check_assignment_compatibility(&decl.var_type, &init_ty, location) {
            self.error(
                CheckError::InitializerType {
                    name: decl.name.clone(),
                    expected: decl.var_type.to_string(),
                    found: init_ty.to_string(),
                },
                location,
            );
            return Type::Error;
        }

        if let Some(sym) = self.symbols.lookup_current_scope_mut(&decl.name) {
            sym.update_definition(true);
        }
        Type::Void
    }

    pub(crate) fn check_func_decl(&mut self, decl: &mut FuncDecl, location: SourceLocation) -> Type {
        let has_body = decl.body.is_some();
        let mut result = decl.return_type.clone();

        let previous = self.symbols.lookup_current_scope(&decl.name).map(|sym| {
            (
                sym.kind,
                sym.return_type().clone(),
                sym.func_info.param_count(),
                sym.is_defined,
            )
        });

        match previous {
            None => {
                if let Some(sym) = self
                    .symbols
                    .insert(&decl.name, SymbolKind::Func, decl.signature())
                {
                    sym.update_func_info(decl.param_types());
                    sym.update_definition(has_body);
                    sym.declared_at = location;
                }
            }

            Some((kind, ..)) if kind != SymbolKind::Func => {
                self.error(
                    CheckError::ConflictingKind {
                        name: decl.name.clone(),
                    },
                    location,
                );
                result = Type::Error;
            }

            Some((_, previous_return, previous_count, was_defined)) => {
                if !previous_return.equals(&decl.return_type) {
                    self.error(
                        CheckError::ReturnTypeConflict {
                            name: decl.name.clone(),
                            previous: previous_return.to_string(),
                            current: decl.return_type.to_string(),
                        },
                        location,
                    );
                    result = Type::Error;
                }
                if previous_count != decl.params.len() {
                    self.error(
                        CheckError::ParamCountConflict {
                            name: decl.name.clone(),
                            previous: previous_count,
                            current: decl.params.len(),
                        },
                        location,
                    );
                    result = Type::Error;
                }
                if has_body {
                    if was_defined {
                        self.error(
                            CheckError::FunctionRedefinition {
                                name: decl.name.clone(),
                            },
                            location,
                        );
                        result = Type::Error;
                    } else if let Some(sym) = self.symbols.lookup_current_scope_mut(&decl.name) {
                        sym.update_definition(true);
                    }
                }
            }
        }

        if let Some(body) = &mut decl.body {
            tracing::debug!(function = %decl.name, "checking function body");
            self.symbols.enter_scope();

            for param in &decl.params {
                if let Some(sym) =
                    self.symbols
                        .insert(&param.name, SymbolKind::Param, param.param_type.clone())
                {
                    sym.update_definition(true);
                    sym.declared_at = param.location;
                }
            }

            let saved_return = self.current_return_type.replace(decl.return_type.clone());
            let saved_offset = std::mem::replace(&mut self.frame_offset, 0);

            self.check_stmt(body);

            self.frame_offset = saved_offset;
            self.current_return_type = saved_return;
            self.symbols.exit_scope();
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Param, Program, Stmt};
    use crate::diagnostics::NullSink;

    fn loc(line: usize) -> SourceLocation {
        SourceLocation::at_line(line)
    }

    fn check(decls: Vec<Stmt>) -> TypeChecker {
        let mut tc = TypeChecker::with_sink(NullSink);
        tc.check_program(&mut Program::new(decls));
        tc
    }

    fn body(stmts: Vec<Stmt>, line: usize) -> Option<Stmt> {
        Some(Stmt::compound(stmts, loc(line)))
    }

    #[test]
    fn test_redeclaration_keeps_table_usable() {
        let tc = check(vec![
            Stmt::var("x", Type::Int, None, loc(1)),
            Stmt::var("x", Type::Int, None, loc(2)),
            Stmt::var("y", Type::Char, Some(Expr::char(1, loc(3))), loc(3)),
        ]);
        assert_eq!(tc.error_count(), 1);
        assert_eq!(
            tc.diagnostics()[0].to_string(),
            "type error (line 2): redeclaration of 'x' in the same scope"
        );
        assert!(tc.symbols().lookup("y").is_some_and(|s| s.is_defined));
        assert!(matches!(tc.symbols().lookup("x").map(|s| &s.ty), Some(Type::Int)));
    }

    #[test]
    fn test_initializer_rules() {
        let tc = check(vec![
            Stmt::var("a", Type::Int, Some(Expr::float(2.5, loc(1))), loc(1)),
            Stmt::var("b", Type::Float, Some(Expr::char(1, loc(2))), loc(2)),
            Stmt::var("c", Type::Char, Some(Expr::int(1, loc(3))), loc(3)),
        ]);
        assert_eq!(tc.error_count(), 1);
        assert_eq!(tc.warning_count(), 1);
        assert_eq!(tc.diagnostics()[1].line(), 2);
        assert!(tc.symbols().lookup("a").is_some_and(|s| s.is_defined));
        assert!(tc.symbols().lookup("b").is_some_and(|s| !s.is_defined));
    }

    #[test]
    fn test_offsets_are_sequential_per_frame() {
        let tc = check(vec![
            Stmt::var("g", Type::Int, None, loc(1)),
            Stmt::var("buf", Type::array(Type::Char, 10), None, loc(2)),
            Stmt::var("h", Type::Float, None, loc(3)),
            Stmt::func(
                "f",
                Type::Void,
                vec![],
                body(vec![Stmt::var("local", Type::Int, None, loc(5))], 4),
                loc(4),
            ),
        ]);
        let offset = |name: &str| tc.symbols().lookup(name).map(|s| s.var_info.offset);
        assert_eq!(offset("g"), Some(0));
        assert_eq!(offset("buf"), Some(4));
        assert_eq!(offset("h"), Some(14));

        let body_scope = tc.symbols().scope(tc.symbols().global_scope()).children[0];
        let local = tc.symbols().scope(body_scope).lookup("local").expect("local declared");
        assert_eq!(local.var_info.offset, 0);
    }

    #[test]
    fn test_prototype_then_definition() {
        let params = || vec![Param::new("a", Type::Int, loc(1))];
        let tc = check(vec![
            Stmt::func("f", Type::Int, params(), None, loc(1)),
            Stmt::func(
                "f",
                Type::Int,
                params(),
                body(vec![Stmt::ret(Some(Expr::ident("a", loc(3))), loc(3))], 2),
                loc(2),
            ),
        ]);
        assert!(!tc.has_errors());
        let f = tc.symbols().lookup("f").expect("f declared");
        assert!(f.is_defined);
        assert_eq!(f.func_info.param_count(), 1);
        assert!(f.ty.equals(&Type::function(Type::Int, vec![Type::Int])));
    }

    #[test]
    fn test_signature_conflicts() {
        let tc = check(vec![
            Stmt::func("f", Type::Int, vec![], body(vec![Stmt::ret(Some(Expr::int(0, loc(1))), loc(1))], 1), loc(1)),
            Stmt::func("f", Type::Char, vec![Param::new("p", Type::Int, loc(2))], None, loc(2)),
            Stmt::func("f", Type::Int, vec![], body(vec![Stmt::ret(Some(Expr::int(0, loc(3))), loc(3))], 3), loc(3)),
            Stmt::var("v", Type::Int, None, loc(4)),
            Stmt::func("v", Type::Int, vec![], None, loc(5)),
        ]);
        let messages: Vec<String> = tc.diagnostics().iter().map(|d| d.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "type error (line 2): conflicting return type for 'f': previously 'int', now 'char'",
                "type error (line 2): conflicting parameter count for 'f': previously 0, now 1",
                "type error (line 3): redefinition of function 'f'",
                "type error (line 5): 'v' was previously declared as a non-function",
            ]
        );
    }

    #[test]
    fn test_return_type_restored_after_body() {
        let tc = check(vec![
            Stmt::func("f", Type::Void, vec![], body(vec![], 1), loc(1)),
            Stmt::ret(None, loc(2)),
        ]);
        assert_eq!(tc.error_count(), 1);
        assert!(matches!(
            tc.diagnostics()[0].as_error(),
            Some(CheckError::ReturnOutsideFunction)
        ));
    }
}
