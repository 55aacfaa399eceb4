//! # Static types for Seasonlang
//!
//! Every expression has one of four types, compared structurally:
//!
//! ```text
//! INT  BOOL  SEASON  (T1*T2)
//! ```
//!
//! The [`TypeChecker`] assigns a type to each expression and validates each
//! statement before evaluation. Range validity of `seasonof` is left to the
//! evaluator.

pub mod checker;

pub use checker::TypeChecker;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::error::ScopeError;

/// Source-level type representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// 64-bit signed integer
    Int,
    /// Boolean
    Bool,
    /// One of the four seasons
    Season,
    /// Pair of independently typed components
    Product(Box<Type>, Box<Type>),
}

impl Type {
    /// Name used for product types in diagnostics
    pub const PRODUCT_NAME: &'static str = "PROD";

    /// Builds a product type
    pub fn product(fst: Type, snd: Type) -> Self {
        Type::Product(Box::new(fst), Box::new(snd))
    }

    /// Fails unless `found` is structurally equal to `self`
    pub fn check_equal(&self, found: &Type) -> Result<(), TypeError> {
        if self == found {
            Ok(())
        } else {
            Err(TypeError::mismatch(self.clone(), found.clone()))
        }
    }

    /// First component of a product type
    pub fn fst(&self) -> Result<&Type, TypeError> {
        match self {
            Type::Product(fst, _) => Ok(fst.as_ref()),
            other => Err(TypeError::NotAProduct {
                found: other.clone(),
            }),
        }
    }

    /// Second component of a product type
    pub fn snd(&self) -> Result<&Type, TypeError> {
        match self {
            Type::Product(_, snd) => Ok(snd.as_ref()),
            other => Err(TypeError::NotAProduct {
                found: other.clone(),
            }),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "INT"),
            Type::Bool => write!(f, "BOOL"),
            Type::Season => write!(f, "SEASON"),
            Type::Product(fst, snd) => write!(f, "({}*{})", fst, snd),
        }
    }
}

/// Static type errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// An expression has a different type than its context requires
    ///
    /// **Example:** `1 + true`, `if (1) { ... }`, `var x = 1; x = false`
    #[error("found {found}, expected {expected}")]
    Mismatch {
        /// Type required by the context
        expected: Type,
        /// Type inferred for the expression
        found: Type,
    },

    /// `fst`/`snd` applied to a non-product
    #[error("found {found}, expected {}", Type::PRODUCT_NAME)]
    NotAProduct {
        /// Type of the projected expression
        found: Type,
    },

    /// Undeclared variable or redeclaration in the same scope
    #[error(transparent)]
    Scope(#[from] ScopeError),
}

impl TypeError {
    /// Creates a type mismatch error with expected and found types
    pub fn mismatch(expected: Type, found: Type) -> Self {
        TypeError::Mismatch { expected, found }
    }
}
