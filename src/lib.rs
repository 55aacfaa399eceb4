//! # Seasonlang - A Small Imperative Teaching Language
//!
//! Reference interpreter for a tiny imperative language with integers,
//! booleans, a four-valued season enum, ordered pairs, blocks, conditionals
//! and bounded counting loops. Programs are optionally type checked before a
//! tree-walking evaluation pass.
//!
//! ## Quick Start
//!
//! ```rust
//! use seasonlang::{evaluate, parse_source, type_check};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let program = parse_source("var i = 0; for i to 3 { print i }")?;
//! type_check(&program)?;
//!
//! let mut output = Vec::new();
//! evaluate(&program, &mut output)?;
//!
//! assert_eq!(String::from_utf8(output)?, "0\n1\n2\n3\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - **Values**: integers `42`, booleans `true`/`false`, seasons
//!   `Winter`/`Spring`/`Summer`/`Fall`, pairs `<<1, Fall>>`
//! - **Statements**: `var x = e`, `x = e`, `print e`,
//!   `if (e) { ... } else { ... }`, `for x to e { ... }`, `{ ... }`
//! - **Operators**: `&&`, `==`, `<`, `+`, `*` (lowest to highest), prefix
//!   `-`, `!`, `#` (season to int), `seasonof` (int to season), `fst`, `snd`
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → AST → TypeChecker (optional) → Evaluator → Output
//! ```
//!
//! - [`Scanner`] - Produces tokens on demand
//! - [`Parser`] - Recursive descent into a [`Program`]
//! - [`TypeChecker`] - Static pass over an [`Environment<Type>`]
//! - [`Evaluator`] - Dynamic pass over an [`Environment<Value>`]
//!
//! ## Error Handling
//!
//! Each stage fails fast with its own error type, and [`Error`] tags them
//! for the host:
//!
//! ```rust
//! use seasonlang::{run, RunOptions};
//!
//! let mut output = Vec::new();
//! let err = run("print seasonof 5".as_bytes(), &mut output, &RunOptions::default()).unwrap_err();
//! assert_eq!(err.to_string(), "Dynamic error: index 5 out of range for season (0..3)");
//! ```

pub mod environment;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod season;
pub mod types;

use std::io::{Read, Write};

// Re-export main types
pub use environment::Environment;
pub use error::{Error, LexError, ParseError, Result, RuntimeError, ScopeError};
pub use lexer::{Literal, Scanner, Token, TokenKind};
pub use parser::{
    BinaryOp, Block, Expression, Ident, Parser, Program, Statement, StatementSeq, UnaryOp,
    MAX_EXPRESSION_HEIGHT, MAX_NESTING_DEPTH,
};
pub use runtime::{Evaluator, Value};
pub use season::Season;
pub use types::{Type, TypeChecker, TypeError};

/// Version of the Seasonlang interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host-selected pipeline settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Run the static type checker before evaluation
    pub type_check: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions { type_check: true }
    }
}

/// Parses program text held in memory
pub fn parse_source(source: &str) -> std::result::Result<Program, ParseError> {
    Parser::from_source(source).parse_program()
}

/// Reads the whole program from `source` and parses it
pub fn parse_program<R: Read>(source: R) -> Result<Program> {
    let scanner = Scanner::from_reader(source)?;
    Ok(Parser::new(scanner).parse_program()?)
}

/// Statically checks a parsed program
pub fn type_check(program: &Program) -> std::result::Result<(), TypeError> {
    TypeChecker::new().check_program(program)
}

/// Evaluates a parsed program, writing `print` output to `sink`
pub fn evaluate<W: Write>(program: &Program, sink: W) -> std::result::Result<(), RuntimeError> {
    Evaluator::new(sink).execute(program)
}

/// Runs the full pipeline: parse, optionally type check, then evaluate.
/// Nothing is printed when parsing or type checking fails.
pub fn run<R: Read, W: Write>(source: R, sink: W, options: &RunOptions) -> Result<()> {
    let program = parse_program(source)?;
    if options.type_check {
        type_check(&program)?;
    } else {
        tracing::debug!("type check skipped");
    }
    evaluate(&program, sink)?;
    Ok(())
}
