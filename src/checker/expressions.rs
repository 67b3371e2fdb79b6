//! Expression typing
//!
//! Each rule computes a [`Type`], stores it in the node and returns it:
//!
//! - Literals carry their own type
//! - Identifiers resolve through the symbol table and are marked used
//! - Binary operators: arithmetic promotes to `float` if either side is
//!   `float`, relational/equality/logical yield `bool`
//! - Unary operators, array subscripts and calls
//!
//! An operand that is already [`Type::Error`] short-circuits the enclosing
//! rule without a second report.

use super::TypeChecker;
use crate::ast::{BinOp, Expr, ExprKind, SourceLocation, UnOp};
use crate::diagnostics::{CheckError, CheckWarning};
use crate::symbols::SymbolKind;
use crate::types::Type;

impl TypeChecker {
    /// Type an expression and annotate it in place
    pub fn check_expr(&mut self, expr: &mut Expr) -> Type {
        let location = expr.location;

        let ty = match &mut expr.kind {
            ExprKind::Literal(lit) => lit.literal_type(),

            ExprKind::Identifier(name) => self.check_identifier(name, location),

            ExprKind::Binary { op, left, right } => {
                let left_ty = self.check_expr(left);
                let right_ty = self.check_expr(right);
                self.check_binary(*op, &left_ty, &right_ty, location)
            }

            ExprKind::Unary { op, operand } => self.check_unary(*op, operand, location),

            ExprKind::ArrayAccess { array, index } => {
                let array_ty = self.check_expr(array);
                let index_ty = self.check_expr(index);
                self.check_array_access(&array_ty, &index_ty, location)
            }

            ExprKind::Call { name, args } => self.check_call(name, args, location),
        };

        expr.ty = Some(ty.clone());
        ty
    }

    fn check_identifier(&mut self, name: &str, location: SourceLocation) -> Type {
        let resolved = self.symbols.lookup_mut(name).map(|sym| {
            sym.is_used = true;
            (
                sym.ty.clone(),
                sym.kind == SymbolKind::Var && !sym.is_defined,
            )
        });

        let Some((ty, undefined)) = resolved else {
            self.error(
                CheckError::UndeclaredIdentifier {
                    name: name.to_string(),
                },
                location,
            );
            return Type::Error;
        };

        if undefined {
            self.warning(
                CheckWarning::UsedBeforeDefined {
                    name: name.to_string(),
                },
                location,
            );
        }
        ty
    }

    fn check_binary(
        &mut self,
        op: BinOp,
        left: &Type,
        right: &Type,
        location: SourceLocation,
    ) -> Type {
        if left.is_error() || right.is_error() {
            return Type::Error;
        }

        let operands = |l: &Type, r: &Type| (op.symbol(), l.to_string(), r.to_string());

        if op.is_arithmetic() {
            if !left.is_arithmetic() || !right.is_arithmetic() {
                let (op, left, right) = operands(left, right);
                self.error(CheckError::ArithmeticOperands { op, left, right }, location);
                return Type::Error;
            }
            if matches!(left, Type::Float) || matches!(right, Type::Float) {
                return Type::Float;
            }
            return Type::Int;
        }

        let ok = if op.is_relational() {
            left.is_arithmetic() && right.is_arithmetic()
        } else if op.is_equality() {
            left.is_compatible(right)
        } else {
            left.is_boolean() && right.is_boolean()
        };

        if !ok {
            let (op_sym, l, r) = operands(left, right);
            let error = if op.is_relational() {
                CheckError::RelationalOperands {
                    op: op_sym,
                    left: l,
                    right: r,
                }
            } else if op.is_equality() {
                CheckError::EqualityOperands {
                    op: op_sym,
                    left: l,
                    right: r,
                }
            } else {
                CheckError::LogicalOperands {
                    op: op_sym,
                    left: l,
                    right: r,
                }
            };
            self.error(error, location);
            return Type::Error;
        }

        Type::Bool
    }

    fn check_unary(&mut self, op: UnOp, operand: &mut Expr, location: SourceLocation) -> Type {
        let operand_ty = self.check_expr(operand);

        match op {
            UnOp::Inc | UnOp::Dec => {
                // Lvalue-ness is syntactic, so it is reported even for an
                // operand that failed to type
                let is_lvalue = operand.is_lvalue();
                if !is_lvalue {
                    self.error(CheckError::IncDecRequiresLvalue { op: op.symbol() }, location);
                }
                if operand_ty.is_error() {
                    return Type::Error;
                }
                if !operand_ty.is_integer() {
                    self.unary_mismatch(op, "integer", &operand_ty, location);
                    return Type::Error;
                }
                if is_lvalue {
                    operand_ty
                } else {
                    Type::Error
                }
            }

            UnOp::Neg => {
                if operand_ty.is_error() {
                    return Type::Error;
                }
                if !operand_ty.is_arithmetic() {
                    self.unary_mismatch(op, "arithmetic", &operand_ty, location);
                    return Type::Error;
                }
                operand_ty
            }

            UnOp::Not => {
                if operand_ty.is_error() {
                    return Type::Error;
                }
                if !operand_ty.is_boolean() {
                    self.unary_mismatch(op, "boolean", &operand_ty, location);
                    return Type::Error;
                }
                Type::Bool
            }

            UnOp::AddrOf => {
                if operand_ty.is_error() {
                    return Type::Error;
                }
                Type::pointer(operand_ty)
            }

            UnOp::Deref => match operand_ty {
                Type::Pointer { pointee } => *pointee,
                Type::Error => Type::Error,
                other => {
                    self.unary_mismatch(op, "pointer", &other, location);
                    Type::Error
                }
            },
        }
    }

    fn unary_mismatch(
        &mut self,
        op: UnOp,
        expected: &'static str,
        found: &Type,
        location: SourceLocation,
    ) {
        self.error(
            CheckError::UnaryOperand {
                op: op.symbol(),
                expected,
                found: found.to_string(),
            },
            location,
        );
    }

    fn check_array_access(
        &mut self,
        array: &Type,
        index: &Type,
        location: SourceLocation,
    ) -> Type {
        let element = match array {
            Type::Array { element, .. } => Some((**element).clone()),
            Type::Error => None,
            other => {
                self.error(
                    CheckError::NotAnArray {
                        found: other.to_string(),
                    },
                    location,
                );
                None
            }
        };

        if !index.is_error() && !index.is_integer() {
            self.error(
                CheckError::NonIntegerIndex {
                    found: index.to_string(),
                },
                location,
            );
            return Type::Error;
        }

        match element {
            Some(ty) if !index.is_error() => ty,
            _ => Type::Error,
        }
    }

    fn check_call(&mut self, name: &str, args: &mut [Expr], location: SourceLocation) -> Type {
        let callee = self.symbols.lookup_mut(name).map(|sym| {
            sym.is_used = true;
            (
                sym.kind,
                sym.return_type().clone(),
                sym.func_info.param_types.clone(),
            )
        });

        let signature = match callee {
            None => {
                self.error(
                    CheckError::UndeclaredFunction {
                        name: name.to_string(),
                    },
                    location,
                );
                None
            }
            Some((kind, _, _)) if kind != SymbolKind::Func => {
                self.error(
                    CheckError::NotAFunction {
                        name: name.to_string(),
                    },
                    location,
                );
                None
            }
            Some((_, return_type, params)) => Some((return_type, params)),
        };

        // Arguments are typed even when the callee is bad, so every node
        // ends up annotated
        let arg_types: Vec<Type> = args.iter_mut().map(|arg| self.check_expr(arg)).collect();

        let Some((return_type, params)) = signature else {
            return Type::Error;
        };

        if params.len() != arg_types.len() {
            self.error(
                CheckError::ArgumentCount {
                    name: name.to_string(),
                    expected: params.len(),
                    actual: arg_types.len(),
                },
                location,
            );
            return Type::Error;
        }

        for (position, (param, arg)) in params.iter().zip(&arg_types).enumerate() {
            if arg.is_error() || param.is_compatible(arg) {
                continue;
            }
            self.error(
                CheckError::ArgumentType {
                    name: name.to_string(),
                    position: position + 1,
                    expected: param.to_string(),
                    found: arg.to_string(),
                },
                location,
            );
        }

        return_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Param, Program, Stmt};
    use crate::diagnostics::NullSink;

    fn loc(line: usize) -> SourceLocation {
        SourceLocation::at_line(line)
    }

    fn checker() -> TypeChecker {
        TypeChecker::with_sink(NullSink)
    }

    #[test]
    fn test_arithmetic_promotion() {
        let mut tc = checker();
        let mut e = Expr::binary(BinOp::Add, Expr::int(1, loc(1)), Expr::float(2.0, loc(1)), loc(1));
        assert!(matches!(tc.check_expr(&mut e), Type::Float));

        let mut e = Expr::binary(BinOp::Mul, Expr::char(3, loc(1)), Expr::int(2, loc(1)), loc(1));
        assert!(matches!(tc.check_expr(&mut e), Type::Int));
        assert!(matches!(e.ty, Some(Type::Int)));
        assert!(!tc.has_errors());
    }

    #[test]
    fn test_comparisons_yield_bool() {
        let mut tc = checker();
        let mut lt = Expr::binary(BinOp::Lt, Expr::int(1, loc(1)), Expr::float(2.0, loc(1)), loc(1));
        assert!(matches!(tc.check_expr(&mut lt), Type::Bool));

        let mut eq = Expr::binary(BinOp::Eq, Expr::int(1, loc(1)), Expr::char(1, loc(1)), loc(1));
        assert!(matches!(tc.check_expr(&mut eq), Type::Bool));

        let mut and = Expr::binary(BinOp::And, Expr::bool(true, loc(1)), Expr::int(0, loc(1)), loc(1));
        assert!(matches!(tc.check_expr(&mut and), Type::Bool));
        assert!(!tc.has_errors());
    }

    #[test]
    fn test_float_char_equality_rejected() {
        let mut tc = checker();
        let mut e = Expr::binary(BinOp::Eq, Expr::float(1.0, loc(3)), Expr::char(1, loc(3)), loc(3));
        assert!(tc.check_expr(&mut e).is_error());
        assert_eq!(tc.error_count(), 1);
    }

    #[test]
    fn test_errors_do_not_cascade() {
        let mut tc = checker();
        // (y + 1) * 2 with y undeclared: one error only
        let inner = Expr::binary(BinOp::Add, Expr::ident("y", loc(2)), Expr::int(1, loc(2)), loc(2));
        let mut e = Expr::binary(BinOp::Mul, inner, Expr::int(2, loc(2)), loc(2));
        assert!(tc.check_expr(&mut e).is_error());
        assert_eq!(tc.error_count(), 1);
        assert_eq!(
            tc.diagnostics()[0].to_string(),
            "type error (line 2): undeclared identifier 'y'"
        );
    }

    #[test]
    fn test_increment_needs_lvalue_and_integer() {
        let mut tc = checker();
        let mut e = Expr::unary(UnOp::Inc, Expr::int(1, loc(1)), loc(1));
        assert!(tc.check_expr(&mut e).is_error());
        assert_eq!(tc.error_count(), 1);

        // Both violations are reported independently
        let mut e = Expr::unary(UnOp::Dec, Expr::float(1.0, loc(2)), loc(2));
        assert!(tc.check_expr(&mut e).is_error());
        assert_eq!(tc.error_count(), 3);
    }

    #[test]
    fn test_address_of_and_deref() {
        let mut tc = checker();
        let mut program = Program::new(vec![Stmt::var("x", Type::Int, Some(Expr::int(1, loc(1))), loc(1))]);
        tc.check_program(&mut program);

        let mut addr = Expr::unary(UnOp::AddrOf, Expr::ident("x", loc(2)), loc(2));
        let ty = tc.check_expr(&mut addr);
        assert!(ty.equals(&Type::pointer(Type::Int)));

        let mut deref = Expr::unary(UnOp::Deref, addr, loc(2));
        assert!(matches!(tc.check_expr(&mut deref), Type::Int));

        let mut bad = Expr::unary(UnOp::Deref, Expr::ident("x", loc(3)), loc(3));
        assert!(tc.check_expr(&mut bad).is_error());
        assert_eq!(tc.error_count(), 1);
    }

    #[test]
    fn test_array_access() {
        let mut tc = checker();
        let mut program = Program::new(vec![
            Stmt::var("a", Type::array(Type::Char, 4), None, loc(1)),
            Stmt::var("n", Type::Int, Some(Expr::int(0, loc(1))), loc(1)),
        ]);
        tc.check_program(&mut program);

        let mut ok = Expr::index(Expr::ident("a", loc(2)), Expr::ident("n", loc(2)), loc(2));
        assert!(matches!(tc.check_expr(&mut ok), Type::Char));

        let mut not_array = Expr::index(Expr::ident("n", loc(3)), Expr::int(0, loc(3)), loc(3));
        assert!(tc.check_expr(&mut not_array).is_error());

        let mut float_index = Expr::index(Expr::ident("a", loc(4)), Expr::float(1.0, loc(4)), loc(4));
        assert!(tc.check_expr(&mut float_index).is_error());
        assert_eq!(tc.error_count(), 2);
    }

    #[test]
    fn test_call_rules() {
        let mut tc = checker();
        let params = vec![
            Param::new("a", Type::Int, loc(1)),
            Param::new("b", Type::Float, loc(1)),
        ];
        let mut program = Program::new(vec![Stmt::func("f", Type::Char, params, None, loc(1))]);
        tc.check_program(&mut program);

        // Compatible, not equal, arguments are accepted
        let mut call = Expr::call("f", vec![Expr::char(1, loc(2)), Expr::int(2, loc(2))], loc(2));
        assert!(matches!(tc.check_expr(&mut call), Type::Char));
        assert!(!tc.has_errors());

        let mut short = Expr::call("f", vec![Expr::int(1, loc(3))], loc(3));
        assert!(tc.check_expr(&mut short).is_error());
        assert_eq!(
            tc.diagnostics()[0].to_string(),
            "type error (line 3): function 'f' expects 2 argument(s), got 1"
        );

        let mut wrong = Expr::call(
            "f",
            vec![Expr::string("s", loc(4)), Expr::bool(true, loc(4))],
            loc(4),
        );
        assert!(matches!(tc.check_expr(&mut wrong), Type::Char));
        assert_eq!(tc.error_count(), 3);
    }

    #[test]
    fn test_call_to_variable() {
        let mut tc = checker();
        let mut program = Program::new(vec![Stmt::var("g", Type::Int, None, loc(1))]);
        tc.check_program(&mut program);

        let mut call = Expr::call("g", vec![], loc(2));
        assert!(tc.check_expr(&mut call).is_error());
        assert_eq!(
            tc.diagnostics()[0].to_string(),
            "type error (line 2): 'g' is not a function"
        );
    }
}
