use std::io::Read;

use super::token::{Literal, Token, TokenKind};
use crate::error::LexError;
use crate::season::Season;

/// On-demand scanner for Seasonlang source text.
///
/// Tokens are produced one at a time through [`Scanner::next_token`] (or the
/// `Iterator` impl), so the parser never needs the whole stream up front.
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Start position of current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Set once the end marker has been handed out
    finished: bool,
}

impl Scanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            finished: false,
        }
    }

    /// Creates a scanner over everything readable from `reader`
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Scanner::new(&source))
    }

    /// Scans all tokens from source code and returns them as a vector,
    /// ending with the `EOF` marker
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, LexError> {
        let tokens = self.by_ref().collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = tokens.len(), "scanned tokens");
        Ok(tokens)
    }

    /// Returns the next token, skipping whitespace and `//` comments.
    /// At end of input the `EOF` marker is returned, repeatedly if asked again.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            if self.is_at_end() {
                self.finished = true;
                return Ok(Token::eof(self.line));
            }
            self.start = self.current;
            if let Some(token) = self.scan_token()? {
                return Ok(token);
            }
        }
    }

    /// Scans one lexeme; `None` for skipped input
    fn scan_token(&mut self) -> Result<Option<Token>, LexError> {
        let c = self.advance();

        let kind = match c {
            '\n' => {
                self.line += 1;
                return Ok(None);
            }
            c if c.is_ascii_whitespace() => return Ok(None),

            '/' if self.match_char('/') => {
                self.skip_line_comment();
                return Ok(None);
            }

            '+' => TokenKind::Plus,
            '*' => TokenKind::Times,
            '(' => TokenKind::OpenPar,
            ')' => TokenKind::ClosePar,
            ';' => TokenKind::StmtSep,
            ',' => TokenKind::ExpSep,
            '{' => TokenKind::OpenBlock,
            '}' => TokenKind::CloseBlock,
            '-' => TokenKind::Minus,
            '!' => TokenKind::Not,
            '#' => TokenKind::SeasonNum,
            '=' => {
                if self.match_char('=') {
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            '<' => {
                if self.match_char('<') {
                    TokenKind::StartPair
                } else {
                    TokenKind::Less
                }
            }
            '>' if self.match_char('>') => TokenKind::EndPair,
            '&' if self.match_char('&') => TokenKind::And,

            c if c.is_ascii_digit() => return self.scan_number(c).map(Some),
            c if c.is_ascii_alphabetic() => return Ok(Some(self.scan_identifier_or_keyword())),

            _ => return Err(self.unrecognized()),
        };

        Ok(Some(self.make_token(kind)))
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
    }

    /// Decimal naturals: `0` alone, or a non-zero digit followed by digits
    fn scan_number(&mut self, first: char) -> Result<Token, LexError> {
        if first != '0' {
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.lexeme();
        let value: i64 = text.parse().map_err(|_| LexError::IntegerOverflow {
            line: self.line,
            lexeme: text.clone(),
        })?;

        Ok(Token::with_literal(
            TokenKind::Num,
            text,
            self.line,
            Literal::Int(value),
        ))
    }

    fn scan_identifier_or_keyword(&mut self) -> Token {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text = self.lexeme();
        match TokenKind::keyword(&text) {
            Some(TokenKind::Bool) => {
                let value = text == "true";
                Token::with_literal(TokenKind::Bool, text, self.line, Literal::Bool(value))
            }
            Some(TokenKind::Season) => match Season::from_name(&text) {
                Some(season) => Token::with_literal(
                    TokenKind::Season,
                    text,
                    self.line,
                    Literal::Season(season),
                ),
                None => Token::new(TokenKind::Ident, text, self.line),
            },
            Some(kind) => Token::new(kind, text, self.line),
            None => Token::new(TokenKind::Ident, text, self.line),
        }
    }

    /// Error for the input starting at the current lexeme, up to end of line
    fn unrecognized(&self) -> LexError {
        let fragment: String = self.source[self.start..]
            .iter()
            .take_while(|&&c| c != '\n')
            .collect();
        LexError::Unrecognized {
            line: self.line,
            fragment,
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.current += 1;
            true
        }
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme(), self.line)
    }
}

impl Iterator for Scanner {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source)
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_statement() {
        let tokens = Scanner::new("var x = 1;").scan_tokens().unwrap();

        assert_eq!(tokens.len(), 6); // var x = 1 ; EOF
        assert_eq!(tokens[0].kind, TokenKind::Var);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[2].kind, TokenKind::Assign);
        assert_eq!(tokens[3].literal, Some(Literal::Int(1)));
        assert_eq!(tokens[4].kind, TokenKind::StmtSep);
        assert_eq!(tokens[5].kind, TokenKind::Eof);
    }

    #[test]
    fn test_longest_match_symbols() {
        assert_eq!(
            kinds("== = << < >> &&"),
            vec![
                TokenKind::Eq,
                TokenKind::Assign,
                TokenKind::StartPair,
                TokenKind::Less,
                TokenKind::EndPair,
                TokenKind::And,
                TokenKind::Eof,
            ]
        );
        // No whitespace needed between adjacent symbols
        assert_eq!(
            kinds("<<1,2>>"),
            vec![
                TokenKind::StartPair,
                TokenKind::Num,
                TokenKind::ExpSep,
                TokenKind::Num,
                TokenKind::EndPair,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_and_literals() {
        let tokens = Scanner::new("true Summer seasonof fst snd printx")
            .scan_tokens()
            .unwrap();

        assert_eq!(tokens[0].literal, Some(Literal::Bool(true)));
        assert_eq!(tokens[1].literal, Some(Literal::Season(Season::Summer)));
        assert_eq!(tokens[2].kind, TokenKind::SeasonOf);
        assert_eq!(tokens[3].kind, TokenKind::Fst);
        assert_eq!(tokens[4].kind, TokenKind::Snd);
        assert_eq!(tokens[5].kind, TokenKind::Ident);
    }

    #[test]
    fn test_leading_zero_splits_number() {
        let tokens = Scanner::new("007").scan_tokens().unwrap();
        let values: Vec<_> = tokens.iter().filter_map(|t| t.literal).collect();
        assert_eq!(
            values,
            vec![Literal::Int(0), Literal::Int(0), Literal::Int(7)]
        );
    }

    #[test]
    fn test_comment_and_line_numbers() {
        let tokens = Scanner::new("// header\nprint 1; // trailing\n\nprint 2")
            .scan_tokens()
            .unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Print);
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[3].kind, TokenKind::Print);
        assert_eq!(tokens[3].line, 4);
    }

    #[test]
    fn test_unrecognized_reports_rest_of_line() {
        let err = Scanner::new("print 1;\nvar y = 2 $ 3; x\nprint y")
            .scan_tokens()
            .unwrap_err();

        assert_eq!(
            err,
            LexError::Unrecognized {
                line: 2,
                fragment: "$ 3; x".to_string(),
            }
        );
    }

    #[test]
    fn test_lone_ampersand_and_gt_are_rejected() {
        assert!(Scanner::new("a & b").scan_tokens().is_err());
        assert!(Scanner::new("a > b").scan_tokens().is_err());
    }

    #[test]
    fn test_integer_overflow() {
        let err = Scanner::new("99999999999999999999").scan_tokens().unwrap_err();
        assert!(matches!(err, LexError::IntegerOverflow { line: 1, .. }));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut scanner = Scanner::new("  ");
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Eof);
        assert!(scanner.next().is_none());
    }
}
