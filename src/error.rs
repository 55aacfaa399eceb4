//! Error types for the Seasonlang pipeline
//!
//! Each stage has its own error type and the stages never share one:
//! the scanner raises [`LexError`], the parser [`ParseError`] (wrapping any
//! lexical failure it runs into), the type checker
//! [`TypeError`](crate::types::TypeError) and the evaluator [`RuntimeError`].
//! [`Error`] is the union handed back to the host.

use thiserror::Error;

use crate::lexer::TokenKind;
use crate::parser::Ident;
use crate::types::TypeError;

/// Failures of the scope chain, shared by the type checker and the evaluator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// Lookup or update of a name that no enclosing scope declares
    ///
    /// **Example:** `x = 1` when `x` was never declared with `var`
    #[error("Undeclared variable {0}")]
    Undeclared(Ident),

    /// Second declaration of a name in the same scope
    ///
    /// **Example:** `var x = 1; var x = 2`
    /// **Prevention:** open a block `{ ... }` to shadow instead
    #[error("Variable {0} already declared")]
    AlreadyDeclared(Ident),
}

/// Lexical errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The remaining input matches no lexical category
    #[error("on line {line} unrecognized token starting at '{fragment}'")]
    Unrecognized {
        /// Line number where the fragment starts (1-indexed)
        line: usize,
        /// Rest of the line from the offending character on
        fragment: String,
    },

    /// Decimal literal too large for a 64-bit integer
    #[error("on line {line} integer literal {lexeme} is out of range")]
    IntegerOverflow {
        /// Line number of the literal
        line: usize,
        /// Literal text
        lexeme: String,
    },
}

/// Syntax errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The scanner failed while the parser was advancing
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A specific token kind was required but another one was found
    #[error("on line {line}: expecting {expected}, found {found}('{lexeme}')")]
    Mismatch {
        /// Line of the offending token
        line: usize,
        /// Token kind the grammar required
        expected: TokenKind,
        /// Token kind actually found
        found: TokenKind,
        /// Text of the offending token
        lexeme: String,
    },

    /// The token cannot start the statement or expression being parsed
    #[error("on line {line}: unexpected token {found}('{lexeme}')")]
    Unexpected {
        /// Line of the offending token
        line: usize,
        /// Token kind found
        found: TokenKind,
        /// Text of the offending token
        lexeme: String,
    },

    /// Blocks, parentheses, pairs or prefix operators nest too deeply, or an
    /// operator chain builds too tall an expression
    ///
    /// **Limits:** [`MAX_NESTING_DEPTH`](crate::parser::MAX_NESTING_DEPTH) and
    /// [`MAX_EXPRESSION_HEIGHT`](crate::parser::MAX_EXPRESSION_HEIGHT)
    #[error("on line {line}: nesting exceeds the limit of {limit} levels")]
    TooDeep {
        /// Line where the limit was crossed
        line: usize,
        /// The limit that was crossed
        limit: usize,
    },
}

/// Dynamic (evaluation-time) errors
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Undeclared variable or redeclaration in the same scope
    #[error(transparent)]
    Scope(#[from] ScopeError),

    /// `seasonof` applied to an integer outside `0..=3`
    #[error("index {0} out of range for season (0..3)")]
    SeasonOutOfRange(i64),

    /// An operand had the wrong kind of value
    ///
    /// Only reachable when the static type check was skipped.
    #[error("expecting {expected}, found {found}")]
    Expecting {
        /// Description of the expected kind, e.g. "an integer"
        expected: &'static str,
        /// Rendering of the value actually found
        found: String,
    },

    /// Writing `print` output to the sink failed
    #[error("cannot write program output: {0}")]
    Output(#[from] std::io::Error),
}

/// Seasonlang errors as reported to the host
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the program text failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lexical or syntactic failure
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),

    /// Static type error
    #[error("Static error: {0}")]
    Static(#[from] TypeError),

    /// Evaluation failure
    #[error("Dynamic error: {0}")]
    Dynamic(#[from] RuntimeError),
}

/// Result type for Seasonlang operations
pub type Result<T> = std::result::Result<T, Error>;
