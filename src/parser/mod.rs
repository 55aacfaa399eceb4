//! Seasonlang parser module
//!
//! Builds the abstract syntax tree from the scanner's token stream.

mod ast;
#[allow(clippy::module_inception)]
mod parser;

pub use ast::{
    BinaryOp, Block, Expression, Ident, Program, Statement, StatementIter, StatementSeq, UnaryOp,
};
pub use parser::{Parser, MAX_EXPRESSION_HEIGHT, MAX_NESTING_DEPTH};
