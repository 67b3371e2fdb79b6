// Property tests for the type lattice and constant folding

use csema::analyzer::{constant_fold, evaluate_constant_expr};
use csema::ast::{BinOp, Expr, SourceLocation};
use csema::types::Type;
use proptest::prelude::*;

fn leaf_type() -> impl Strategy<Value = Type> {
    prop_oneof![
        Just(Type::Void),
        Just(Type::Int),
        Just(Type::Float),
        Just(Type::Char),
        Just(Type::Bool),
    ]
}

fn any_type() -> impl Strategy<Value = Type> {
    leaf_type().prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Type::pointer),
            (inner.clone(), -1i32..16).prop_map(|(t, n)| Type::array(t, n)),
            (inner.clone(), prop::collection::vec(inner, 0..4))
                .prop_map(|(ret, params)| Type::function(ret, params)),
        ]
    })
}

fn arith_op() -> impl Strategy<Value = BinOp> {
    prop_oneof![
        Just(BinOp::Add),
        Just(BinOp::Sub),
        Just(BinOp::Mul),
        Just(BinOp::Lt),
        Just(BinOp::Eq),
        Just(BinOp::And),
        Just(BinOp::Or),
    ]
}

fn constant_expr() -> impl Strategy<Value = Expr> {
    let leaf = any::<i32>().prop_map(|v| Expr::int(v, SourceLocation::at_line(1)));
    leaf.prop_recursive(4, 32, 2, |inner| {
        (arith_op(), inner.clone(), inner)
            .prop_map(|(op, l, r)| Expr::binary(op, l, r, SourceLocation::at_line(1)))
    })
}

proptest! {
    #[test]
    fn test_clone_is_equal_and_independent(t in any_type()) {
        let copy = t.clone();
        prop_assert!(copy.equals(&t));

        // Dropping the original leaves the copy intact
        let rendered = t.to_string();
        drop(t);
        prop_assert_eq!(copy.to_string(), rendered);
    }

    #[test]
    fn test_equality_is_symmetric(a in any_type(), b in any_type()) {
        prop_assert_eq!(a.equals(&b), b.equals(&a));
        prop_assert_eq!(a.is_compatible(&b), b.is_compatible(&a));
    }

    #[test]
    fn test_equal_implies_compatible(t in any_type()) {
        prop_assert!(t.is_compatible(&t.clone()));
    }

    #[test]
    fn test_error_never_compatible(t in any_type()) {
        prop_assert!(!Type::Error.equals(&t));
        prop_assert!(!Type::Error.is_compatible(&t));
        prop_assert!(!Type::pointer(Type::Error).equals(&Type::pointer(t)));
    }

    #[test]
    fn test_folding_matches_evaluation(e in constant_expr()) {
        let expected = evaluate_constant_expr(&e);
        let mut folded = e;
        constant_fold(&mut folded);
        prop_assert_eq!(folded.as_int_literal(), expected);
        prop_assert!(!constant_fold(&mut folded));
    }
}

#[test]
fn test_compatibility_exceptions_both_orders() {
    assert!(Type::Int.is_compatible(&Type::Float));
    assert!(Type::Float.is_compatible(&Type::Int));
    assert!(Type::Int.is_compatible(&Type::Char));
    assert!(Type::Char.is_compatible(&Type::Int));
    assert!(!Type::Float.is_compatible(&Type::Char));
    assert!(!Type::Char.is_compatible(&Type::Float));
}
