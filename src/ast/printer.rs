//! Indented tree dump of an AST, one node per line
//!
//! Each line shows the node kind, its key fields, the annotated type once the
//! checker has run, and the source line:
//!
//! ```text
//! FuncDecl main -> int (line 1)
//!   Compound (line 1)
//!     Return (line 2)
//!       Literal 0 : int (line 2)
//! ```

use super::nodes::*;
use std::fmt::Write;

/// Render a whole program
pub fn dump_program(program: &Program) -> String {
    let mut out = String::new();
    out.push_str("Program\n");
    for decl in &program.declarations {
        write_stmt(&mut out, decl, 1);
    }
    out
}

/// Render a single statement subtree
pub fn dump_stmt(stmt: &Stmt) -> String {
    let mut out = String::new();
    write_stmt(&mut out, stmt, 0);
    out
}

/// Render a single expression subtree
pub fn dump_expr(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr, 0);
    out
}

fn pad(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

fn format_literal(lit: &Literal) -> String {
    match lit {
        Literal::Int(n) => n.to_string(),
        Literal::Float(x) => format!("{:?}", x),
        Literal::Char(c) => {
            let byte = *c as u8;
            if byte.is_ascii_graphic() || byte == b' ' {
                format!("'{}'", byte as char)
            } else {
                format!("'\\x{:02x}'", byte)
            }
        }
        Literal::Bool(b) => b.to_string(),
        Literal::Str(s) => format!("{:?}", s),
    }
}

fn write_expr(out: &mut String, expr: &Expr, indent: usize) {
    pad(out, indent);
    let head = match &expr.kind {
        ExprKind::Literal(lit) => format!("Literal {}", format_literal(lit)),
        ExprKind::Identifier(name) => format!("Identifier {}", name),
        ExprKind::Binary { op, .. } => format!("Binary {}", op.symbol()),
        ExprKind::Unary { op, .. } => format!("Unary {}", op.symbol()),
        ExprKind::ArrayAccess { .. } => "ArrayAccess".to_string(),
        ExprKind::Call { name, args } => format!("Call {} ({} args)", name, args.len()),
    };
    out.push_str(&head);
    if let Some(ty) = &expr.ty {
        let _ = write!(out, " : {}", ty);
    }
    let _ = writeln!(out, " (line {})", expr.location.line);

    match &expr.kind {
        ExprKind::Literal(_) | ExprKind::Identifier(_) => {}
        ExprKind::Binary { left, right, .. } => {
            write_expr(out, left, indent + 1);
            write_expr(out, right, indent + 1);
        }
        ExprKind::Unary { operand, .. } => write_expr(out, operand, indent + 1),
        ExprKind::ArrayAccess { array, index } => {
            write_expr(out, array, indent + 1);
            write_expr(out, index, indent + 1);
        }
        ExprKind::Call { args, .. } => {
            for arg in args {
                write_expr(out, arg, indent + 1);
            }
        }
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt, indent: usize) {
    pad(out, indent);
    let line = stmt.line();
    match stmt {
        Stmt::Compound { statements, .. } => {
            let _ = writeln!(out, "Compound (line {})", line);
            for s in statements {
                write_stmt(out, s, indent + 1);
            }
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            let _ = writeln!(out, "If (line {})", line);
            write_expr(out, condition, indent + 1);
            write_stmt(out, then_branch, indent + 1);
            if let Some(else_branch) = else_branch {
                pad(out, indent);
                out.push_str("Else\n");
                write_stmt(out, else_branch, indent + 1);
            }
        }
        Stmt::While {
            condition, body, ..
        } => {
            let _ = writeln!(out, "While (line {})", line);
            write_expr(out, condition, indent + 1);
            write_stmt(out, body, indent + 1);
        }
        Stmt::For {
            init,
            condition,
            step,
            body,
            ..
        } => {
            let _ = writeln!(out, "For (line {})", line);
            if let Some(init) = init {
                write_stmt(out, init, indent + 1);
            }
            if let Some(condition) = condition {
                write_expr(out, condition, indent + 1);
            }
            if let Some(step) = step {
                write_expr(out, step, indent + 1);
            }
            write_stmt(out, body, indent + 1);
        }
        Stmt::Return { value, .. } => {
            let _ = writeln!(out, "Return (line {})", line);
            if let Some(value) = value {
                write_expr(out, value, indent + 1);
            }
        }
        Stmt::Break { .. } => {
            let _ = writeln!(out, "Break (line {})", line);
        }
        Stmt::Continue { .. } => {
            let _ = writeln!(out, "Continue (line {})", line);
        }
        Stmt::Expr { expr, .. } => {
            let _ = writeln!(out, "ExprStmt (line {})", line);
            write_expr(out, expr, indent + 1);
        }
        Stmt::VarDecl { decl, .. } => {
            let qualifier = if decl.is_const { "const " } else { "" };
            let _ = writeln!(
                out,
                "VarDecl {}{} {} (line {})",
                qualifier, decl.var_type, decl.name, line
            );
            if let Some(init) = &decl.init {
                write_expr(out, init, indent + 1);
            }
        }
        Stmt::FuncDecl { decl, .. } => {
            let params = decl
                .params
                .iter()
                .map(|p| format!("{} {}", p.param_type, p.name))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                out,
                "FuncDecl {}({}) -> {} (line {})",
                decl.name, params, decl.return_type, line
            );
            if let Some(body) = &decl.body {
                write_stmt(out, body, indent + 1);
            }
        }
        Stmt::Assign { target, value, .. } => {
            let _ = writeln!(out, "Assign (line {})", line);
            write_expr(out, target, indent + 1);
            write_expr(out, value, indent + 1);
        }
    }
}
