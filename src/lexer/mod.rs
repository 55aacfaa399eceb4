//! Lexical analysis for Seasonlang
//!
//! Converts source text into a lazily produced stream of classified tokens.

mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Literal, Token, TokenKind};
