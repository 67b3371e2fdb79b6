//! Reachability and return coverage

use crate::ast::Stmt;

/// Whether control can never fall through to the statement after `stmt`
pub fn is_unreachable_after(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return { .. } | Stmt::Break { .. } | Stmt::Continue { .. } => true,
        Stmt::If {
            then_branch,
            else_branch: Some(else_branch),
            ..
        } => is_unreachable_after(then_branch) && is_unreachable_after(else_branch),
        Stmt::Compound { statements, .. } => statements.last().is_some_and(is_unreachable_after),
        _ => false,
    }
}

/// Whether every path through `stmt` ends in a `return`
pub fn check_all_paths_return(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return { .. } => true,
        Stmt::If {
            then_branch,
            else_branch: Some(else_branch),
            ..
        } => check_all_paths_return(then_branch) && check_all_paths_return(else_branch),
        Stmt::Compound { statements, .. } => statements.iter().any(check_all_paths_return),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, SourceLocation};

    fn loc(line: usize) -> SourceLocation {
        SourceLocation::at_line(line)
    }

    fn ret() -> Stmt {
        Stmt::ret(Some(Expr::int(1, loc(1))), loc(1))
    }

    fn cond() -> Expr {
        Expr::bool(true, loc(1))
    }

    #[test]
    fn test_unreachable_after() {
        assert!(is_unreachable_after(&ret()));
        assert!(is_unreachable_after(&Stmt::Break { location: loc(1) }));
        assert!(!is_unreachable_after(&Stmt::if_else(cond(), ret(), None, loc(1))));
        assert!(is_unreachable_after(&Stmt::if_else(cond(), ret(), Some(ret()), loc(1))));
        assert!(is_unreachable_after(&Stmt::compound(
            vec![Stmt::expr(Expr::int(0, loc(1)), loc(1)), ret()],
            loc(1)
        )));
        assert!(!is_unreachable_after(&Stmt::compound(vec![], loc(1))));
        assert!(!is_unreachable_after(&Stmt::while_loop(cond(), ret(), loc(1))));
    }

    #[test]
    fn test_all_paths_return() {
        assert!(check_all_paths_return(&ret()));
        assert!(!check_all_paths_return(&Stmt::if_else(cond(), ret(), None, loc(1))));
        assert!(check_all_paths_return(&Stmt::if_else(
            cond(),
            Stmt::compound(vec![ret()], loc(1)),
            Some(ret()),
            loc(1)
        )));
        // Any returning statement in a block counts
        assert!(check_all_paths_return(&Stmt::compound(
            vec![ret(), Stmt::expr(Expr::int(0, loc(2)), loc(2))],
            loc(1)
        )));
        assert!(!check_all_paths_return(&Stmt::Break { location: loc(1) }));
        assert!(!check_all_paths_return(&Stmt::while_loop(cond(), ret(), loc(1))));
    }
}
