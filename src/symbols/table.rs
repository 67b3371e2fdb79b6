use super::scope::{Scope, ScopeId};
use super::symbol::{Symbol, SymbolKind};
use crate::types::Type;
use std::fmt;

/// Tree of lexical scopes with a cursor on the innermost open one.
///
/// Scopes live in an arena and are never removed: exiting a scope only moves
/// the cursor back to the parent, so the whole history remains available for
/// [`dump`](SymbolTable::dump) and for replay via
/// [`rewind`](SymbolTable::rewind) / [`revisit_scope`](SymbolTable::revisit_scope).
///
/// During replay a name only resolves once it has been [revealed](SymbolTable::reveal)
/// again, so lookups see the scope as it was at that point of the first walk.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    current: ScopeId,
    current_level: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::new(0, None)],
            current: ScopeId(0),
            current_level: 0,
        }
    }

    pub fn global_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Open a new child of the current scope and make it current
    pub fn enter_scope(&mut self) {
        let id = ScopeId(self.scopes.len());
        let level = self.current_level + 1;
        self.scopes.push(Scope::new(level, Some(self.current)));
        self.scopes[self.current.0].children.push(id);
        self.current = id;
        self.current_level = level;
        tracing::trace!(scope = id.0, level, "enter scope");
    }

    /// Return to the parent scope; a no-op at the global scope
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current.0].parent {
            tracing::trace!(scope = self.current.0, "exit scope");
            self.current = parent;
            self.current_level -= 1;
        }
    }

    /// Move the cursor back to the global scope, restart replay order and
    /// hide every symbol until its declaration is replayed
    pub fn rewind(&mut self) {
        for scope in &mut self.scopes {
            scope.reset_revisit();
            scope.hide_all();
        }
        self.current = ScopeId(0);
        self.current_level = 0;
    }

    /// Replay the declaration of `name` in the current scope. Returns
    /// `false` if the first walk never inserted it there.
    pub fn reveal(&mut self, name: &str) -> bool {
        self.scopes[self.current.0].reveal(name)
    }

    /// End a replay: every retained symbol is visible again
    pub fn reveal_all(&mut self) {
        for scope in &mut self.scopes {
            scope.reveal_all();
        }
    }

    /// Re-enter the next retained child of the current scope, in creation
    /// order. Opens a fresh scope when every child has been revisited.
    pub fn revisit_scope(&mut self) {
        match self.scopes[self.current.0].next_revisit() {
            Some(child) => {
                self.current = child;
                self.current_level = self.scopes[child.0].level;
                tracing::trace!(scope = child.0, "revisit scope");
            }
            None => self.enter_scope(),
        }
    }

    /// Insert into the current scope. Returns `None` if the name already
    /// exists there; shadowing an outer name is allowed.
    pub fn insert(&mut self, name: &str, kind: SymbolKind, ty: Type) -> Option<&mut Symbol> {
        self.scopes[self.current.0].insert(name, kind, ty)
    }

    /// Innermost-to-outermost lookup
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        let id = self.resolve(name)?;
        self.scopes[id.0].lookup(name)
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        let id = self.resolve(name)?;
        self.scopes[id.0].lookup_mut(name)
    }

    pub fn lookup_current_scope(&self, name: &str) -> Option<&Symbol> {
        self.scopes[self.current.0].lookup(name)
    }

    pub fn lookup_current_scope_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.scopes[self.current.0].lookup_mut(name)
    }

    /// Scope holding the visible declaration of `name`
    fn resolve(&self, name: &str) -> Option<ScopeId> {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            let scope = &self.scopes[id.0];
            if scope.lookup(name).is_some() {
                return Some(id);
            }
            cursor = scope.parent;
        }
        None
    }

    /// Every scope in depth-first order with its nesting depth
    pub fn walk(&self) -> Vec<(usize, ScopeId)> {
        let mut out = Vec::with_capacity(self.scopes.len());
        let mut stack = vec![(0, ScopeId(0))];
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            for child in self.scopes[id.0].children.iter().rev() {
                stack.push((depth + 1, *child));
            }
        }
        out
    }

    /// Debug dump of the whole scope tree
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current level: {}", self.current_level)?;
        for (depth, id) in self.walk() {
            let scope = &self.scopes[id.0];
            writeln!(
                f,
                "{}Scope level {} (symbols: {})",
                "  ".repeat(depth),
                scope.level,
                scope.symbol_count()
            )?;
            for symbol in scope.symbols() {
                writeln!(f, "{}- {}", "  ".repeat(depth + 1), symbol)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadowing_and_restore() {
        let mut table = SymbolTable::new();
        table.insert("x", SymbolKind::Var, Type::Int);

        table.enter_scope();
        assert_eq!(table.current_level(), 1);
        table.insert("x", SymbolKind::Var, Type::Float);
        let inner = table.lookup("x").expect("x visible");
        assert!(matches!(inner.ty, Type::Float));
        assert_eq!(inner.scope_level, 1);

        table.exit_scope();
        assert_eq!(table.current_level(), 0);
        let outer = table.lookup("x").expect("x visible");
        assert!(matches!(outer.ty, Type::Int));
    }

    #[test]
    fn test_exit_at_root_is_noop() {
        let mut table = SymbolTable::new();
        table.exit_scope();
        table.exit_scope();
        assert_eq!(table.current_level(), 0);
        assert_eq!(table.current_scope(), table.global_scope());
    }

    #[test]
    fn test_duplicate_in_same_scope_only() {
        let mut table = SymbolTable::new();
        assert!(table.insert("a", SymbolKind::Var, Type::Int).is_some());
        assert!(table.insert("a", SymbolKind::Var, Type::Int).is_none());
        table.enter_scope();
        assert!(table.lookup_current_scope("a").is_none());
        assert!(table.lookup("a").is_some());
        assert!(table.insert("a", SymbolKind::Var, Type::Char).is_some());
    }

    #[test]
    fn test_scope_tree_is_retained() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.insert("inner", SymbolKind::Var, Type::Int);
        table.exit_scope();
        table.enter_scope();
        table.exit_scope();

        assert_eq!(table.scope_count(), 3);
        assert_eq!(table.scope(table.global_scope()).children.len(), 2);
        assert!(table.lookup("inner").is_none());
    }

    #[test]
    fn test_replay_follows_creation_order() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        table.insert("first", SymbolKind::Var, Type::Int);
        table.enter_scope();
        table.insert("nested", SymbolKind::Var, Type::Int);
        table.exit_scope();
        table.exit_scope();
        table.enter_scope();
        table.insert("second", SymbolKind::Var, Type::Int);
        table.exit_scope();

        table.rewind();
        table.revisit_scope();
        assert!(table.reveal("first"));
        assert!(table.lookup("first").is_some());
        table.revisit_scope();
        assert!(table.reveal("nested"));
        assert!(table.lookup("nested").is_some());
        assert_eq!(table.current_level(), 2);
        table.exit_scope();
        table.exit_scope();
        table.revisit_scope();
        assert!(table.reveal("second"));
        assert!(table.lookup("second").is_some());
        assert!(table.lookup("first").is_none());
        table.exit_scope();

        // Past the recorded children a fresh scope is opened
        let before = table.scope_count();
        table.revisit_scope();
        assert_eq!(table.scope_count(), before + 1);
    }

    #[test]
    fn test_replay_hides_later_declarations() {
        // int x; { x; const int x; }
        let mut table = SymbolTable::new();
        table.insert("x", SymbolKind::Var, Type::Int);
        table.enter_scope();
        table
            .insert("x", SymbolKind::Var, Type::Int)
            .expect("fresh name")
            .update_var_info(true, 0);
        table.exit_scope();

        table.rewind();
        assert!(table.lookup("x").is_none());
        assert!(table.reveal("x"));
        table.revisit_scope();
        let before = table.lookup("x").expect("outer x visible");
        assert_eq!(before.scope_level, 0);
        assert!(table.lookup_current_scope("x").is_none());

        assert!(table.reveal("x"));
        assert!(table.lookup("x").expect("inner x visible").is_const());
        assert!(!table.reveal("y"));
        table.exit_scope();

        table.rewind();
        table.reveal_all();
        assert!(table.lookup("x").is_some());
        assert_eq!(table.scope(ScopeId(1)).symbol_count(), 1);
    }

    #[test]
    fn test_mutators() {
        let mut table = SymbolTable::new();
        let sym = table
            .insert("f", SymbolKind::Func, Type::function(Type::Int, vec![]))
            .expect("fresh name");
        sym.update_func_info(vec![Type::Int, Type::Char]);
        sym.update_var_info(true, 12);
        sym.update_definition(true);

        let f = table.lookup("f").expect("f visible");
        assert_eq!(f.func_info.param_count(), 2);
        assert!(f.func_info.is_declared);
        assert!(!f.var_info.is_const);
        assert!(f.is_defined);

        let v = table
            .insert("v", SymbolKind::Var, Type::Int)
            .expect("fresh name");
        v.update_var_info(true, 8);
        v.update_func_info(vec![Type::Int]);
        let v = table.lookup("v").expect("v visible");
        assert!(v.is_const());
        assert_eq!(v.var_info.offset, 8);
        assert!(!v.func_info.is_declared);
    }

    #[test]
    fn test_dump_format() {
        let mut table = SymbolTable::new();
        table
            .insert("x", SymbolKind::Var, Type::Int)
            .expect("fresh name")
            .update_definition(true);
        table.enter_scope();
        table.insert("p", SymbolKind::Param, Type::pointer(Type::Char));
        table.exit_scope();

        let expected = "Current level: 0\n\
                        Scope level 0 (symbols: 1)\n\
                        \x20\x20- x: var int [defined]\n\
                        \x20\x20Scope level 1 (symbols: 1)\n\
                        \x20\x20\x20\x20- p: param char* [declared]\n";
        assert_eq!(table.dump(), expected);
    }
}
