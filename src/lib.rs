//! # Introduction
//!
//! csema is the semantic core for a small subset of C: a structural type
//! system, a scoped symbol table, a type checker that annotates every
//! expression with its type, and a semantic analyzer that folds constants and
//! reports dead code, missing returns and structural mistakes.
//!
//! ## Pipeline
//!
//! ```text
//! Parser → AST → TypeChecker → SemanticAnalyzer → annotated, folded AST
//!                      ↘              ↙
//!                 SymbolTable + Diagnostics
//! ```
//!
//! 1. [`ast`]: the node shapes a parser hands over, plus a debug printer.
//! 2. [`types`]: the [`types::Type`] lattice with structural equality and
//!    the `int ↔ float` / `int ↔ char` compatibility rules.
//! 3. [`symbols`]: arena-backed scope tree; scopes survive after exit so the
//!    whole tree can be dumped or replayed.
//! 4. [`checker`]: first pass; computes and stores expression types.
//! 5. [`analyzer`]: second pass over the same scope tree.
//! 6. [`diagnostics`]: errors and warnings, rendered as
//!    `<phase> <severity> (line N): <message>`.
//!
//! ## Supported C subset
//!
//! Types: `int`, `float`, `char`, `bool`, `void`, pointers, arrays, functions.
//! Control flow: `if/else`, `while`, `for`, `break`, `continue`, `return`.
//!
//! ## Example
//!
//! ```
//! use csema::ast::{Expr, Program, SourceLocation, Stmt};
//! use csema::diagnostics::NullSink;
//! use csema::types::Type;
//! use csema::SemanticAnalyzer;
//!
//! let at = SourceLocation::at_line;
//! let body = Stmt::compound(vec![Stmt::ret(Some(Expr::int(0, at(2))), at(2))], at(1));
//! let mut program = Program::new(vec![Stmt::func("main", Type::Int, vec![], Some(body), at(1))]);
//!
//! let mut analyzer = SemanticAnalyzer::with_sink(NullSink);
//! assert!(analyzer.analyze_program(&mut program));
//! assert_eq!(analyzer.warning_count(), 0);
//! ```

pub mod analyzer;
pub mod ast;
pub mod checker;
pub mod config;
pub mod diagnostics;
pub mod symbols;
pub mod types;

pub use analyzer::{semantic_analyze_program, SemanticAnalyzer};
pub use checker::{type_check_program, TypeChecker};
pub use config::AnalyzerOptions;
