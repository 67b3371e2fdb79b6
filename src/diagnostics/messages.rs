//! Error and warning messages
//!
//! Every problem the checker or analyzer can find is a variant of
//! [`CheckError`] or [`CheckWarning`]. Errors make the program-level verdict
//! fail; warnings are only reported and counted.

use thiserror::Error;

/// Coarse grouping of errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    UnresolvedName,
    KindMismatch,
    TypeIncompatibility,
    ArityMismatch,
    DuplicateDeclaration,
    InvalidDeclaration,
    LvalueViolation,
    ConstViolation,
    ControlContextViolation,
    ConstantEvaluation,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("undeclared identifier '{name}'")]
    UndeclaredIdentifier { name: String },

    #[error("undeclared function '{name}'")]
    UndeclaredFunction { name: String },

    #[error("'{name}' is not a function")]
    NotAFunction { name: String },

    #[error("'{name}' is not a variable")]
    NotAVariable { name: String },

    #[error("'{name}' was previously declared as a non-function")]
    ConflictingKind { name: String },

    #[error("arithmetic operator '{op}' requires arithmetic operands, found '{left}' and '{right}'")]
    ArithmeticOperands {
        op: &'static str,
        left: String,
        right: String,
    },

    #[error("relational operator '{op}' requires arithmetic operands, found '{left}' and '{right}'")]
    RelationalOperands {
        op: &'static str,
        left: String,
        right: String,
    },

    #[error("equality operator '{op}' requires compatible operands, found '{left}' and '{right}'")]
    EqualityOperands {
        op: &'static str,
        left: String,
        right: String,
    },

    #[error("logical operator '{op}' requires boolean operands, found '{left}' and '{right}'")]
    LogicalOperands {
        op: &'static str,
        left: String,
        right: String,
    },

    #[error("unary '{op}' requires an operand of type {expected}, found '{found}'")]
    UnaryOperand {
        op: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("operand of '{op}' must be an lvalue")]
    IncDecRequiresLvalue { op: &'static str },

    #[error("left side of assignment must be an lvalue")]
    AssignRequiresLvalue,

    #[error("subscripted value of type '{found}' is not an array")]
    NotAnArray { found: String },

    #[error("array index must be an integer, found '{found}'")]
    NonIntegerIndex { found: String },

    #[error("function '{name}' expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("argument {position} of '{name}' expects '{expected}', found '{found}'")]
    ArgumentType {
        name: String,
        position: usize,
        expected: String,
        found: String,
    },

    #[error("redeclaration of '{name}' in the same scope")]
    Redeclaration { name: String },

    #[error("conflicting return type for '{name}': previously '{previous}', now '{current}'")]
    ReturnTypeConflict {
        name: String,
        previous: String,
        current: String,
    },

    #[error("conflicting parameter count for '{name}': previously {previous}, now {current}")]
    ParamCountConflict {
        name: String,
        previous: usize,
        current: usize,
    },

    #[error("redefinition of function '{name}'")]
    FunctionRedefinition { name: String },

    #[error("duplicate parameter '{param}' in function '{function}'")]
    DuplicateParameter { function: String, param: String },

    #[error("cannot initialize '{name}' of type '{expected}' with a value of type '{found}'")]
    InitializerType {
        name: String,
        expected: String,
        found: String,
    },

    #[error("cannot assign a value of type '{found}' to '{expected}'")]
    AssignmentType { expected: String, found: String },

    #[error("condition of '{construct}' must be boolean, found '{found}'")]
    ConditionType {
        construct: &'static str,
        found: String,
    },

    #[error("return type mismatch: function returns '{expected}', found '{found}'")]
    ReturnType { expected: String, found: String },

    #[error("function returning '{expected}' must return a value")]
    MissingReturnValue { expected: String },

    #[error("return statement outside of a function")]
    ReturnOutsideFunction,

    #[error("'{keyword}' statement outside of a loop")]
    JumpOutsideLoop { keyword: &'static str },

    #[error("array '{name}' must have a positive size, found {size}")]
    NonPositiveArraySize { name: String, size: i32 },

    #[error("variable '{name}' declared void")]
    VoidVariable { name: String },

    #[error("cannot assign to const variable '{name}'")]
    AssignToConst { name: String },

    #[error("division by zero")]
    DivisionByZero,
}

impl CheckError {
    pub fn category(&self) -> ErrorCategory {
        use CheckError::*;
        match self {
            UndeclaredIdentifier { .. } | UndeclaredFunction { .. } => {
                ErrorCategory::UnresolvedName
            }
            NotAFunction { .. } | NotAVariable { .. } | ConflictingKind { .. } => {
                ErrorCategory::KindMismatch
            }
            ArithmeticOperands { .. }
            | RelationalOperands { .. }
            | EqualityOperands { .. }
            | LogicalOperands { .. }
            | UnaryOperand { .. }
            | NotAnArray { .. }
            | NonIntegerIndex { .. }
            | ArgumentType { .. }
            | ReturnTypeConflict { .. }
            | InitializerType { .. }
            | AssignmentType { .. }
            | ConditionType { .. }
            | ReturnType { .. }
            | MissingReturnValue { .. } => ErrorCategory::TypeIncompatibility,
            ArgumentCount { .. } | ParamCountConflict { .. } => ErrorCategory::ArityMismatch,
            Redeclaration { .. } | FunctionRedefinition { .. } | DuplicateParameter { .. } => {
                ErrorCategory::DuplicateDeclaration
            }
            NonPositiveArraySize { .. } | VoidVariable { .. } => {
                ErrorCategory::InvalidDeclaration
            }
            IncDecRequiresLvalue { .. } | AssignRequiresLvalue => ErrorCategory::LvalueViolation,
            AssignToConst { .. } => ErrorCategory::ConstViolation,
            ReturnOutsideFunction | JumpOutsideLoop { .. } => {
                ErrorCategory::ControlContextViolation
            }
            DivisionByZero => ErrorCategory::ConstantEvaluation,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckWarning {
    #[error("variable '{name}' is used before it is defined")]
    UsedBeforeDefined { name: String },

    #[error("implicit conversion from 'float' to 'int' may lose precision")]
    PrecisionLoss,

    #[error("unreachable code")]
    DeadCode,

    #[error("not all control paths in function '{name}' return a value")]
    MissingReturn { name: String },

    #[error("function '{name}' never returns a value")]
    NoReturnStatement { name: String },

    #[error("'main' should return 'int', found '{found}'")]
    MainReturnType { found: String },

    #[error("unused variable '{name}'")]
    UnusedVariable { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = CheckError::ArgumentCount {
            name: "f".to_string(),
            expected: 2,
            actual: 1,
        };
        assert_eq!(err.to_string(), "function 'f' expects 2 argument(s), got 1");
        assert_eq!(err.category(), ErrorCategory::ArityMismatch);

        let warn = CheckWarning::MissingReturn {
            name: "g".to_string(),
        };
        assert_eq!(
            warn.to_string(),
            "not all control paths in function 'g' return a value"
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            CheckError::UndeclaredFunction {
                name: "foo".to_string()
            }
            .category(),
            ErrorCategory::UnresolvedName
        );
        assert_eq!(
            CheckError::ReturnOutsideFunction.category(),
            ErrorCategory::ControlContextViolation
        );
        assert_eq!(
            CheckError::VoidVariable {
                name: "v".to_string()
            }
            .category(),
            ErrorCategory::InvalidDeclaration
        );
    }
}
