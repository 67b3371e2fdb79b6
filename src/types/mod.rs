//! Structural type lattice
//!
//! [`Type`] describes every value the checked language can produce:
//!
//! - Primitives: `void`, `int`, `float`, `char`, `bool`
//! - Compounds: arrays, pointers and function signatures, each owning its
//!   nested types outright
//! - [`Type::Error`]: the placeholder substituted wherever a rule failed
//!
//! # Equality and Compatibility
//!
//! [`Type::equals`] is structural and recursive. `Error` never equals
//! anything, itself included; use [`Type::is_error`] for identity checks.
//!
//! [`Type::is_compatible`] adds exactly two implicit conversions on top of
//! equality: `int <-> float` and `int <-> char`. No other pair converts,
//! `float <-> char` included.

use std::fmt;

/// A value type. Compound variants exclusively own their children, so
/// `clone()` is a deep copy.
#[derive(Debug, Clone)]
pub enum Type {
    Void,
    Int,
    Float,
    Char,
    Bool,
    Error,
    Array {
        element: Box<Type>,
        /// `-1` when the length is unspecified
        size: i32,
    },
    Function {
        return_type: Box<Type>,
        params: Vec<Type>,
    },
    Pointer {
        pointee: Box<Type>,
    },
}

/// Length marker for arrays declared without a size (`int a[]`)
pub const UNSPECIFIED_SIZE: i32 = -1;

impl Type {
    pub fn array(element: Type, size: i32) -> Self {
        Type::Array {
            element: Box::new(element),
            size,
        }
    }

    pub fn function(return_type: Type, params: Vec<Type>) -> Self {
        Type::Function {
            return_type: Box::new(return_type),
            params,
        }
    }

    pub fn pointer(pointee: Type) -> Self {
        Type::Pointer {
            pointee: Box::new(pointee),
        }
    }

    /// Wrap `self` in a pointer
    pub fn pointer_to(self) -> Self {
        Type::pointer(self)
    }

    /// Structural equality. `Error` is unequal to everything.
    pub fn equals(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Void, Type::Void)
            | (Type::Int, Type::Int)
            | (Type::Float, Type::Float)
            | (Type::Char, Type::Char)
            | (Type::Bool, Type::Bool) => true,
            (
                Type::Array { element: a, size: n },
                Type::Array { element: b, size: m },
            ) => n == m && a.equals(b),
            (
                Type::Function {
                    return_type: ra,
                    params: pa,
                },
                Type::Function {
                    return_type: rb,
                    params: pb,
                },
            ) => {
                ra.equals(rb)
                    && pa.len() == pb.len()
                    && pa.iter().zip(pb).all(|(a, b)| a.equals(b))
            }
            (Type::Pointer { pointee: a }, Type::Pointer { pointee: b }) => a.equals(b),
            _ => false,
        }
    }

    /// Equality plus the `int <-> float` and `int <-> char` conversions
    pub fn is_compatible(&self, other: &Type) -> bool {
        if self.equals(other) {
            return true;
        }
        matches!(
            (self, other),
            (Type::Int, Type::Float)
                | (Type::Float, Type::Int)
                | (Type::Int, Type::Char)
                | (Type::Char, Type::Int)
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// `int`, `float` or `char`
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Type::Int | Type::Float | Type::Char)
    }

    /// `int` or `char`
    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Int | Type::Char)
    }

    /// Usable as a condition: `bool` or any integer type
    pub fn is_boolean(&self) -> bool {
        matches!(self, Type::Bool) || self.is_integer()
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Type::Pointer { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    /// Storage footprint in bytes, used for frame offsets
    pub fn size_in_bytes(&self) -> i32 {
        match self {
            Type::Int | Type::Float => 4,
            Type::Char | Type::Bool => 1,
            Type::Pointer { .. } | Type::Function { .. } => 8,
            Type::Array { element, size } => {
                if *size > 0 {
                    element.size_in_bytes().saturating_mul(*size)
                } else {
                    0
                }
            }
            Type::Void | Type::Error => 0,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Char => write!(f, "char"),
            Type::Bool => write!(f, "bool"),
            Type::Error => write!(f, "error"),
            Type::Array { element, size } => {
                if *size == UNSPECIFIED_SIZE {
                    write!(f, "{}[]", element)
                } else {
                    write!(f, "{}[{}]", element, size)
                }
            }
            Type::Pointer { pointee } => write!(f, "{}*", pointee),
            Type::Function { return_type, .. } => write!(f, "{}(...)", return_type),
        }
    }
}
