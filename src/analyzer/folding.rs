//! Integer constant evaluation and folding
//!
//! Only integer-valued literals (`int`, `char`, `bool`) are constants. Float
//! and string literals never fold. Arithmetic wraps on overflow, comparisons
//! and logical operators produce `0` or `1`, and a zero divisor makes the
//! whole expression unevaluable so it is left in the tree.

use crate::ast::{BinOp, Expr, ExprKind, Literal, UnOp};
use crate::types::Type;

/// Literal, or an operator tree over constant operands
pub fn is_constant_expr(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Literal(lit) => lit.as_int().is_some(),
        ExprKind::Binary { left, right, .. } => is_constant_expr(left) && is_constant_expr(right),
        ExprKind::Unary {
            op: UnOp::Neg | UnOp::Not,
            operand,
        } => is_constant_expr(operand),
        _ => false,
    }
}

/// Value of a constant expression, or `None` if it is not constant or
/// divides by zero
pub fn evaluate_constant_expr(expr: &Expr) -> Option<i32> {
    match &expr.kind {
        ExprKind::Literal(lit) => lit.as_int(),
        ExprKind::Binary { op, left, right } => {
            let l = evaluate_constant_expr(left)?;
            let r = evaluate_constant_expr(right)?;
            evaluate_binary(*op, l, r)
        }
        ExprKind::Unary { op, operand } => {
            let v = evaluate_constant_expr(operand)?;
            match op {
                UnOp::Neg => Some(v.wrapping_neg()),
                UnOp::Not => Some((v == 0) as i32),
                _ => None,
            }
        }
        _ => None,
    }
}

#[inline]
fn evaluate_binary(op: BinOp, l: i32, r: i32) -> Option<i32> {
    let value = match op {
        BinOp::Add => l.wrapping_add(r),
        BinOp::Sub => l.wrapping_sub(r),
        BinOp::Mul => l.wrapping_mul(r),
        BinOp::Div => {
            if r == 0 {
                return None;
            }
            l.wrapping_div(r)
        }
        BinOp::Mod => {
            if r == 0 {
                return None;
            }
            l.wrapping_rem(r)
        }
        BinOp::Lt => (l < r) as i32,
        BinOp::Le => (l <= r) as i32,
        BinOp::Gt => (l > r) as i32,
        BinOp::Ge => (l >= r) as i32,
        BinOp::Eq => (l == r) as i32,
        BinOp::Ne => (l != r) as i32,
        BinOp::And => (l != 0 && r != 0) as i32,
        BinOp::Or => (l != 0 || r != 0) as i32,
    };
    Some(value)
}

/// Replace this operator node with a literal if it evaluates. The literal
/// keeps the node's checked type (`int`, `char` or `bool`; untyped nodes
/// become `int`). Nodes typed `error` and `char` results outside the `char`
/// range stay as they are. Children are not visited. Returns whether a
/// replacement happened.
pub(crate) fn fold_node(expr: &mut Expr) -> bool {
    if !matches!(expr.kind, ExprKind::Binary { .. } | ExprKind::Unary { .. }) {
        return false;
    }
    if matches!(expr.ty, Some(Type::Error)) || !is_constant_expr(expr) {
        return false;
    }
    let Some(value) = evaluate_constant_expr(expr) else {
        return false;
    };

    let literal = match &expr.ty {
        None | Some(Type::Int) => Literal::Int(value),
        Some(Type::Bool) => Literal::Bool(value != 0),
        Some(Type::Char) => match i8::try_from(value) {
            Ok(c) => Literal::Char(c),
            Err(_) => return false,
        },
        Some(_) => return false,
    };

    let folded = Expr {
        ty: Some(literal.literal_type()),
        kind: ExprKind::Literal(literal),
        location: expr.location,
    };
    let replaced = std::mem::replace(expr, folded);
    tracing::debug!(line = replaced.location.line, value, "folded constant expression");
    true
}

/// Fold every constant operator sub-tree, innermost first. Returns whether
/// anything changed; a second call on the result returns `false`.
pub fn constant_fold(expr: &mut Expr) -> bool {
    let mut changed = match &mut expr.kind {
        ExprKind::Binary { left, right, .. } => {
            let l = constant_fold(left);
            let r = constant_fold(right);
            l || r
        }
        ExprKind::Unary { operand, .. } => constant_fold(operand),
        ExprKind::ArrayAccess { array, index } => {
            let a = constant_fold(array);
            let i = constant_fold(index);
            a || i
        }
        ExprKind::Call { args, .. } => {
            let mut any = false;
            for arg in args {
                any |= constant_fold(arg);
            }
            any
        }
        ExprKind::Literal(_) | ExprKind::Identifier(_) => false,
    };
    changed |= fold_node(expr);
    changed
}
