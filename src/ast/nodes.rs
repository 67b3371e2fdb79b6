// AST definitions consumed by the checker and analyzer

use crate::types::Type;

/// Source location information for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Location with an unknown column
    pub fn at_line(line: usize) -> Self {
        Self { line, column: 0 }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Relational
    Lt,
    Le,
    Gt,
    Ge,
    // Equality
    Eq,
    Ne,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod
        )
    }

    pub fn is_relational(self) -> bool {
        matches!(self, BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge)
    }

    pub fn is_equality(self) -> bool {
        matches!(self, BinOp::Eq | BinOp::Ne)
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,    // -x
    Not,    // !x
    Inc,    // ++x
    Dec,    // --x
    AddrOf, // &x
    Deref,  // *x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
            UnOp::Inc => "++",
            UnOp::Dec => "--",
            UnOp::AddrOf => "&",
            UnOp::Deref => "*",
        }
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i32),
    Float(f32),
    Char(i8),
    Bool(bool),
    Str(String),
}

impl Literal {
    /// The type a literal carries from construction
    pub fn literal_type(&self) -> Type {
        match self {
            Literal::Int(_) => Type::Int,
            Literal::Float(_) => Type::Float,
            Literal::Char(_) => Type::Char,
            Literal::Bool(_) => Type::Bool,
            Literal::Str(_) => Type::pointer(Type::Char),
        }
    }

    /// Integer value for constant evaluation; `None` for floats and strings
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Literal::Int(n) => Some(*n),
            Literal::Char(c) => Some(*c as i32),
            Literal::Bool(b) => Some(*b as i32),
            Literal::Float(_) | Literal::Str(_) => None,
        }
    }
}

/// Expression node with its type slot
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: SourceLocation,
    /// Filled in by the type checker
    pub ty: Option<Type>,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, location: SourceLocation) -> Self {
        let ty = match &kind {
            ExprKind::Literal(lit) => Some(lit.literal_type()),
            _ => None,
        };
        Expr { kind, location, ty }
    }

    pub fn int(value: i32, location: SourceLocation) -> Self {
        Expr::new(ExprKind::Literal(Literal::Int(value)), location)
    }

    pub fn float(value: f32, location: SourceLocation) -> Self {
        Expr::new(ExprKind::Literal(Literal::Float(value)), location)
    }

    pub fn char(value: i8, location: SourceLocation) -> Self {
        Expr::new(ExprKind::Literal(Literal::Char(value)), location)
    }

    pub fn bool(value: bool, location: SourceLocation) -> Self {
        Expr::new(ExprKind::Literal(Literal::Bool(value)), location)
    }

    pub fn string(value: impl Into<String>, location: SourceLocation) -> Self {
        Expr::new(ExprKind::Literal(Literal::Str(value.into())), location)
    }

    pub fn ident(name: impl Into<String>, location: SourceLocation) -> Self {
        Expr::new(ExprKind::Identifier(name.into()), location)
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr, location: SourceLocation) -> Self {
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            location,
        )
    }

    pub fn unary(op: UnOp, operand: Expr, location: SourceLocation) -> Self {
        Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            location,
        )
    }

    pub fn index(array: Expr, index: Expr, location: SourceLocation) -> Self {
        Expr::new(
            ExprKind::ArrayAccess {
                array: Box::new(array),
                index: Box::new(index),
            },
            location,
        )
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>, location: SourceLocation) -> Self {
        Expr::new(
            ExprKind::Call {
                name: name.into(),
                args,
            },
            location,
        )
    }

    /// Identifier, array access or pointer dereference
    pub fn is_lvalue(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Identifier(_)
                | ExprKind::ArrayAccess { .. }
                | ExprKind::Unary {
                    op: UnOp::Deref,
                    ..
                }
        )
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_int_literal(&self) -> Option<i32> {
        match &self.kind {
            ExprKind::Literal(Literal::Int(n)) => Some(*n),
            _ => None,
        }
    }
}

/// Function parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub param_type: Type,
    pub location: SourceLocation,
}

impl Param {
    pub fn new(name: impl Into<String>, param_type: Type, location: SourceLocation) -> Self {
        Param {
            name: name.into(),
            param_type,
            location,
        }
    }
}

/// Variable declaration
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub var_type: Type,
    pub is_const: bool,
    pub init: Option<Expr>,
}

/// Function declaration or definition (`body` is `None` for prototypes)
#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub name: String,
    pub return_type: Type,
    pub params: Vec<Param>,
    pub body: Option<Box<Stmt>>,
}

impl FuncDecl {
    pub fn param_types(&self) -> Vec<Type> {
        self.params.iter().map(|p| p.param_type.clone()).collect()
    }

    pub fn signature(&self) -> Type {
        Type::function(self.return_type.clone(), self.param_types())
    }
}

/// Statements and declarations
#[derive(Debug, Clone)]
pub enum Stmt {
    Compound {
        statements: Vec<Stmt>,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    For {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        step: Option<Expr>,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    Return {
        value: Option<Expr>,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
    Expr {
        expr: Expr,
        location: SourceLocation,
    },
    VarDecl {
        decl: VarDecl,
        location: SourceLocation,
    },
    FuncDecl {
        decl: FuncDecl,
        location: SourceLocation,
    },
    Assign {
        target: Expr,
        value: Expr,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this node
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::Compound { location, .. } => location,
            Stmt::If { location, .. } => location,
            Stmt::While { location, .. } => location,
            Stmt::For { location, .. } => location,
            Stmt::Return { location, .. } => location,
            Stmt::Break { location } => location,
            Stmt::Continue { location } => location,
            Stmt::Expr { location, .. } => location,
            Stmt::VarDecl { location, .. } => location,
            Stmt::FuncDecl { location, .. } => location,
            Stmt::Assign { location, .. } => location,
        }
    }

    pub fn line(&self) -> usize {
        self.location().line
    }

    pub fn compound(statements: Vec<Stmt>, location: SourceLocation) -> Self {
        Stmt::Compound {
            statements,
            location,
        }
    }

    pub fn if_else(
        condition: Expr,
        then_branch: Stmt,
        else_branch: Option<Stmt>,
        location: SourceLocation,
    ) -> Self {
        Stmt::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
            location,
        }
    }

    pub fn while_loop(condition: Expr, body: Stmt, location: SourceLocation) -> Self {
        Stmt::While {
            condition,
            body: Box::new(body),
            location,
        }
    }

    pub fn for_loop(
        init: Option<Stmt>,
        condition: Option<Expr>,
        step: Option<Expr>,
        body: Stmt,
        location: SourceLocation,
    ) -> Self {
        Stmt::For {
            init: init.map(Box::new),
            condition,
            step,
            body: Box::new(body),
            location,
        }
    }

    pub fn ret(value: Option<Expr>, location: SourceLocation) -> Self {
        Stmt::Return { value, location }
    }

    pub fn expr(expr: Expr, location: SourceLocation) -> Self {
        Stmt::Expr { expr, location }
    }

    pub fn var(
        name: impl Into<String>,
        var_type: Type,
        init: Option<Expr>,
        location: SourceLocation,
    ) -> Self {
        Stmt::VarDecl {
            decl: VarDecl {
                name: name.into(),
                var_type,
                is_const: false,
                init,
            },
            location,
        }
    }

    pub fn const_var(
        name: impl Into<String>,
        var_type: Type,
        init: Option<Expr>,
        location: SourceLocation,
    ) -> Self {
        Stmt::VarDecl {
            decl: VarDecl {
                name: name.into(),
                var_type,
                is_const: true,
                init,
            },
            location,
        }
    }

    pub fn func(
        name: impl Into<String>,
        return_type: Type,
        params: Vec<Param>,
        body: Option<Stmt>,
        location: SourceLocation,
    ) -> Self {
        Stmt::FuncDecl {
            decl: FuncDecl {
                name: name.into(),
                return_type,
                params,
                body: body.map(Box::new),
            },
            location,
        }
    }

    pub fn assign(target: Expr, value: Expr, location: SourceLocation) -> Self {
        Stmt::Assign {
            target,
            value,
            location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub declarations: Vec<Stmt>, // Global declarations and statements, in source order
}

impl Program {
    pub fn new(declarations: Vec<Stmt>) -> Self {
        Program { declarations }
    }
}
