//! Abstract syntax tree consumed by the semantic core
//!
//! The tree is produced by an external parser; this crate only reads it,
//! writes resolved types into each [`Expr::ty`] slot, and (during constant
//! folding) replaces constant sub-expressions with literal nodes.
//!
//! - [`nodes`]: node definitions and constructors
//! - [`printer`]: indented debug dump

pub mod nodes;
pub mod printer;

pub use nodes::*;
