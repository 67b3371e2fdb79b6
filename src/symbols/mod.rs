//! Scoped symbol table
//!
//! - [`Symbol`]: a named entity with its type and kind-specific payload
//! - [`Scope`]: one lexical level, append-only during its lifetime
//! - [`SymbolTable`]: the scope tree plus a cursor on the current scope
//!
//! # Lookup Rules
//!
//! [`SymbolTable::lookup`] walks from the current scope outwards and returns
//! the first match, so inner declarations shadow outer ones.
//! [`SymbolTable::lookup_current_scope`] only inspects the innermost scope and
//! is what re-declaration checks use.

pub mod scope;
pub mod symbol;
pub mod table;

pub use scope::{Scope, ScopeId};
pub use symbol::{FuncInfo, Symbol, SymbolKind, VarInfo};
pub use table::SymbolTable;
