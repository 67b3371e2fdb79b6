use super::symbol::{Symbol, SymbolKind};
use crate::types::Type;
use rustc_hash::FxHashMap;

/// Index of a scope inside its [`SymbolTable`](super::SymbolTable) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(crate) usize);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One lexical level: an append-only set of symbols plus tree links
#[derive(Debug, Clone)]
pub struct Scope {
    pub level: usize,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    symbols: Vec<Symbol>,
    by_name: FxHashMap<String, usize>,
    /// Symbols `[0, visible)` answer lookups; lowered to zero for replay
    visible: usize,
    /// Next child to re-enter during a replay walk
    revisit_cursor: usize,
}

impl Scope {
    pub fn new(level: usize, parent: Option<ScopeId>) -> Self {
        Scope {
            level,
            parent,
            children: Vec::new(),
            symbols: Vec::new(),
            by_name: FxHashMap::default(),
            visible: 0,
            revisit_cursor: 0,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.visible_index(name).map(|i| &self.symbols[i])
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        match self.visible_index(name) {
            Some(i) => Some(&mut self.symbols[i]),
            None => None,
        }
    }

    fn visible_index(&self, name: &str) -> Option<usize> {
        self.by_name
            .get(name)
            .copied()
            .filter(|&i| i < self.visible)
    }

    /// Returns `None` if `name` already exists in this scope, hidden or not.
    /// Inserting makes every symbol of the scope visible.
    pub fn insert(&mut self, name: &str, kind: SymbolKind, ty: Type) -> Option<&mut Symbol> {
        if self.by_name.contains_key(name) {
            return None;
        }
        let index = self.symbols.len();
        self.symbols.push(Symbol::new(name, kind, ty, self.level));
        self.by_name.insert(name.to_string(), index);
        self.visible = self.symbols.len();
        Some(&mut self.symbols[index])
    }

    /// Make `name` and every symbol inserted before it visible again.
    /// Returns `false` if the scope never held `name`.
    pub(crate) fn reveal(&mut self, name: &str) -> bool {
        match self.by_name.get(name) {
            Some(&i) => {
                self.visible = self.visible.max(i + 1);
                true
            }
            None => false,
        }
    }

    pub(crate) fn hide_all(&mut self) {
        self.visible = 0;
    }

    pub(crate) fn reveal_all(&mut self) {
        self.visible = self.symbols.len();
    }

    /// Symbols in insertion order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub(crate) fn next_revisit(&mut self) -> Option<ScopeId> {
        let child = self.children.get(self.revisit_cursor).copied();
        if child.is_some() {
            self.revisit_cursor += 1;
        }
        child
    }

    pub(crate) fn reset_revisit(&mut self) {
        self.revisit_cursor = 0;
    }
}
