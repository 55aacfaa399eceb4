use serde::{Deserialize, Serialize};

use crate::season::Season;

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The lexical category of the token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Semantic payload of `NUM`, `BOOL` and `SEASON` tokens
    pub literal: Option<Literal>,
}

impl Token {
    /// Creates a new token without a literal payload
    pub fn new(kind: TokenKind, lexeme: String, line: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            literal: None,
        }
    }

    /// Creates a literal token carrying its decoded value
    pub fn with_literal(kind: TokenKind, lexeme: String, line: usize, literal: Literal) -> Self {
        Token {
            kind,
            lexeme,
            line,
            literal: Some(literal),
        }
    }

    /// Creates the end-of-input marker
    pub fn eof(line: usize) -> Self {
        Token::new(TokenKind::Eof, String::new(), line)
    }
}

/// Decoded value of a literal token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Literal {
    /// Payload of a `NUM` token
    Int(i64),
    /// Payload of a `BOOL` token
    Bool(bool),
    /// Payload of a `SEASON` token
    Season(Season),
}

/// All lexical categories of Seasonlang
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals and names
    /// Identifier
    Ident,
    /// Natural number literal
    Num,
    /// `true` or `false`
    Bool,
    /// `Winter`, `Spring`, `Summer` or `Fall`
    Season,

    // Keywords
    /// `print`
    Print,
    /// `var`
    Var,
    /// `if`
    If,
    /// `else`
    Else,
    /// `for`
    For,
    /// `to`
    To,
    /// `fst`
    Fst,
    /// `snd`
    Snd,
    /// `seasonof`
    SeasonOf,

    // Symbols
    /// `+`
    Plus,
    /// `*`
    Times,
    /// `=`
    Assign,
    /// `==`
    Eq,
    /// `<<`
    StartPair,
    /// `>>`
    EndPair,
    /// `(`
    OpenPar,
    /// `)`
    ClosePar,
    /// `;`
    StmtSep,
    /// `,`
    ExpSep,
    /// `{`
    OpenBlock,
    /// `}`
    CloseBlock,
    /// `-`
    Minus,
    /// `!`
    Not,
    /// `&&`
    And,
    /// `#`
    SeasonNum,
    /// `<`
    Less,

    // Special
    /// End of input marker
    Eof,
}

impl TokenKind {
    /// Reclassifies an identifier lexeme that is a reserved word.
    /// Boolean and season names map to their literal kinds.
    pub fn keyword(s: &str) -> Option<TokenKind> {
        let kind = match s {
            "print" => TokenKind::Print,
            "var" => TokenKind::Var,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "to" => TokenKind::To,
            "fst" => TokenKind::Fst,
            "snd" => TokenKind::Snd,
            "seasonof" => TokenKind::SeasonOf,
            "true" | "false" => TokenKind::Bool,
            "Winter" | "Spring" | "Summer" | "Fall" => TokenKind::Season,
            _ => return None,
        };
        Some(kind)
    }

    /// Upper-case category name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Ident => "IDENT",
            TokenKind::Num => "NUM",
            TokenKind::Bool => "BOOL",
            TokenKind::Season => "SEASON",
            TokenKind::Print => "PRINT",
            TokenKind::Var => "VAR",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::To => "TO",
            TokenKind::Fst => "FST",
            TokenKind::Snd => "SND",
            TokenKind::SeasonOf => "SEASONOF",
            TokenKind::Plus => "PLUS",
            TokenKind::Times => "TIMES",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Eq => "EQ",
            TokenKind::StartPair => "START_PAIR",
            TokenKind::EndPair => "END_PAIR",
            TokenKind::OpenPar => "OPEN_PAR",
            TokenKind::ClosePar => "CLOSE_PAR",
            TokenKind::StmtSep => "STMT_SEP",
            TokenKind::ExpSep => "EXP_SEP",
            TokenKind::OpenBlock => "OPEN_BLOCK",
            TokenKind::CloseBlock => "CLOSE_BLOCK",
            TokenKind::Minus => "MINUS",
            TokenKind::Not => "NOT",
            TokenKind::And => "AND",
            TokenKind::SeasonNum => "SEASON_NUM",
            TokenKind::Less => "LESS",
            TokenKind::Eof => "EOF",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_detection() {
        assert_eq!(TokenKind::keyword("print"), Some(TokenKind::Print));
        assert_eq!(TokenKind::keyword("seasonof"), Some(TokenKind::SeasonOf));
        assert_eq!(TokenKind::keyword("true"), Some(TokenKind::Bool));
        assert_eq!(TokenKind::keyword("Fall"), Some(TokenKind::Season));
        assert_eq!(TokenKind::keyword("fall"), None);
        assert_eq!(TokenKind::keyword("printer"), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TokenKind::StmtSep.to_string(), "STMT_SEP");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
    }
}
