use crate::ast::SourceLocation;
use crate::types::Type;
use std::fmt;

/// What a name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Func,
    Param,
    Type,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SymbolKind::Var => "var",
            SymbolKind::Func => "func",
            SymbolKind::Param => "param",
            SymbolKind::Type => "type",
        };
        write!(f, "{}", s)
    }
}

/// Variable-only payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarInfo {
    pub is_const: bool,
    /// Byte offset within the enclosing frame
    pub offset: i32,
}

/// Function-only payload
#[derive(Debug, Clone, Default)]
pub struct FuncInfo {
    pub param_types: Vec<Type>,
    pub is_declared: bool,
}

impl FuncInfo {
    pub fn param_count(&self) -> usize {
        self.param_types.len()
    }
}

/// A named entity owned by exactly one scope
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: Type,
    pub scope_level: usize,
    /// Declared vs. has a value (variables) or a body (functions)
    pub is_defined: bool,
    /// Set when an identifier expression resolves to this symbol
    pub is_used: bool,
    pub declared_at: SourceLocation,
    pub var_info: VarInfo,
    pub func_info: FuncInfo,
}

impl Symbol {
    pub fn new(name: &str, kind: SymbolKind, ty: Type, scope_level: usize) -> Self {
        Symbol {
            name: name.to_string(),
            kind,
            ty,
            scope_level,
            is_defined: false,
            is_used: false,
            declared_at: SourceLocation::default(),
            var_info: VarInfo::default(),
            func_info: FuncInfo::default(),
        }
    }

    pub fn update_definition(&mut self, is_defined: bool) {
        self.is_defined = is_defined;
    }

    /// No-op unless this is a variable
    pub fn update_var_info(&mut self, is_const: bool, offset: i32) {
        if self.kind == SymbolKind::Var {
            self.var_info = VarInfo { is_const, offset };
        }
    }

    /// No-op unless this is a function; marks the function declared
    pub fn update_func_info(&mut self, param_types: Vec<Type>) {
        if self.kind == SymbolKind::Func {
            self.func_info = FuncInfo {
                param_types,
                is_declared: true,
            };
        }
    }

    pub fn is_function(&self) -> bool {
        self.kind == SymbolKind::Func
    }

    pub fn is_const(&self) -> bool {
        self.kind == SymbolKind::Var && self.var_info.is_const
    }

    /// Return type for functions, the symbol type otherwise
    pub fn return_type(&self) -> &Type {
        match &self.ty {
            Type::Function { return_type, .. } => return_type,
            other => other,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_defined {
            "defined"
        } else {
            "declared"
        };
        write!(f, "{}: {} {} [{}]", self.name, self.kind, self.ty, status)
    }
}
