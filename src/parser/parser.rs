use super::ast::{BinaryOp, Block, Expression, Ident, Program, Statement, StatementSeq, UnaryOp};
use crate::error::{LexError, ParseError};
use crate::lexer::{Literal, Scanner, Token, TokenKind};
use crate::season::Season;

/// Recursive-descent parser with one token of lookahead.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// Prog    ::= StmtSeq EOF
/// StmtSeq ::= Stmt (';' StmtSeq?)?
/// Stmt    ::= 'var' IDENT '=' Exp | IDENT '=' Exp | 'print' Exp
///           | 'if' '(' Exp ')' Block ('else' Block)? | 'for' IDENT 'to' Exp Block | Block
/// Block   ::= '{' StmtSeq '}'
/// Exp     ::= Eq ('&&' Eq)*
/// Eq      ::= Less ('==' Less)*
/// Less    ::= Add ('<' Add)*
/// Add     ::= Mul ('+' Mul)*
/// Mul     ::= Atom ('*' Atom)*
/// Atom    ::= '<<' Exp ',' Exp '>>' | 'fst' Atom | 'snd' Atom | '-' Atom | '!' Atom
///           | '#' Atom | 'seasonof' Atom | BOOL | NUM | SEASON | IDENT | '(' Exp ')'
/// ```
///
/// Nesting is bounded: see [`MAX_NESTING_DEPTH`] and [`MAX_EXPRESSION_HEIGHT`].
pub struct Parser<I> {
    tokens: I,
    /// Lookahead token
    current: Token,
    /// Blocks, parentheses, pairs and prefix operators currently open
    depth: usize,
}

/// Deepest nesting of blocks, parentheses, pairs and prefix operators
pub const MAX_NESTING_DEPTH: usize = 128;

/// Tallest expression tree, counting every operator on the path to a leaf
pub const MAX_EXPRESSION_HEIGHT: usize = 512;

/// An expression together with the height of its tree
struct Subtree {
    expr: Expression,
    height: usize,
}

impl Subtree {
    fn leaf(expr: Expression) -> Self {
        Subtree { expr, height: 1 }
    }
}

impl Parser<Scanner> {
    /// Creates a parser reading directly from source text
    pub fn from_source(source: &str) -> Self {
        Parser::new(Scanner::new(source))
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// Creates a parser over a token stream; nothing is read until
    /// [`Parser::parse_program`] runs
    pub fn new(tokens: I) -> Self {
        Parser {
            tokens,
            current: Token::eof(1),
            depth: 0,
        }
    }

    /// Parses the whole token stream into a program.
    /// The end marker must be the very last token consumed.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        self.advance()?;
        let body = self.parse_statement_seq()?;
        self.expect(TokenKind::Eof)?;

        tracing::debug!(statements = body.len(), "parsed program");
        Ok(Program { body })
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Right-associative: `s1; s2; s3` is `More(s1, More(s2, Single(s3)))`.
    /// A separator directly before `}` or the end of input is accepted and dropped.
    fn parse_statement_seq(&mut self) -> Result<StatementSeq, ParseError> {
        let first = self.parse_statement()?;
        let mut rest = Vec::new();
        while self.check(TokenKind::StmtSep) {
            self.advance()?;
            if self.check(TokenKind::CloseBlock) || self.check(TokenKind::Eof) {
                break;
            }
            rest.push(self.parse_statement()?);
        }
        Ok(StatementSeq::new(first, rest))
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current.kind {
            TokenKind::Print => self.parse_print(),
            TokenKind::Var => self.parse_var(),
            TokenKind::Ident => self.parse_assign(),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::OpenBlock => Ok(Statement::Block(self.parse_block()?)),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_print(&mut self) -> Result<Statement, ParseError> {
        self.consume(TokenKind::Print)?;
        Ok(Statement::Print(self.parse_expression()?))
    }

    fn parse_var(&mut self) -> Result<Statement, ParseError> {
        self.consume(TokenKind::Var)?;
        let name = self.parse_ident()?;
        self.consume(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        Ok(Statement::VarDecl { name, value })
    }

    fn parse_assign(&mut self) -> Result<Statement, ParseError> {
        let name = self.parse_ident()?;
        self.consume(TokenKind::Assign)?;
        let value = self.parse_expression()?;
        Ok(Statement::Assign { name, value })
    }

    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        self.consume(TokenKind::If)?;
        self.consume(TokenKind::OpenPar)?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::ClosePar)?;
        let then_block = self.parse_block()?;

        let else_block = if self.check(TokenKind::Else) {
            self.advance()?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_block,
            else_block,
        })
    }

    fn parse_for(&mut self) -> Result<Statement, ParseError> {
        self.consume(TokenKind::For)?;
        let variable = self.parse_ident()?;
        self.consume(TokenKind::To)?;
        let bound = self.parse_expression()?;
        let body = self.parse_block()?;
        Ok(Statement::For {
            variable,
            bound,
            body,
        })
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.nested(|parser| {
            parser.consume(TokenKind::OpenBlock)?;
            let body = parser.parse_statement_seq()?;
            parser.consume(TokenKind::CloseBlock)?;
            Ok(Block { body })
        })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        Ok(self.parse_conjunction()?.expr)
    }

    fn parse_conjunction(&mut self) -> Result<Subtree, ParseError> {
        self.parse_left_assoc(TokenKind::And, BinaryOp::And, Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<Subtree, ParseError> {
        self.parse_left_assoc(TokenKind::Eq, BinaryOp::Eq, Self::parse_less)
    }

    fn parse_less(&mut self) -> Result<Subtree, ParseError> {
        self.parse_left_assoc(TokenKind::Less, BinaryOp::Lt, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Subtree, ParseError> {
        self.parse_left_assoc(TokenKind::Plus, BinaryOp::Add, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Subtree, ParseError> {
        self.parse_left_assoc(TokenKind::Times, BinaryOp::Mul, Self::parse_atom)
    }

    /// `operand (op operand)*`, folded to the left
    fn parse_left_assoc(
        &mut self,
        token: TokenKind,
        op: BinaryOp,
        operand: fn(&mut Self) -> Result<Subtree, ParseError>,
    ) -> Result<Subtree, ParseError> {
        let mut left = operand(self)?;
        while self.check(token) {
            self.advance()?;
            let right = operand(self)?;
            let height = self.check_height(left.height.max(right.height) + 1)?;
            left = Subtree {
                expr: Expression::binary(op, left.expr, right.expr),
                height,
            };
        }
        Ok(left)
    }

    fn parse_atom(&mut self) -> Result<Subtree, ParseError> {
        match self.current.kind {
            TokenKind::Num => {
                let value = match self.current.literal {
                    Some(Literal::Int(n)) => n,
                    _ => return Err(self.unexpected()),
                };
                self.advance()?;
                Ok(Subtree::leaf(Expression::IntLiteral(value)))
            }
            TokenKind::Bool => {
                let value = match self.current.literal {
                    Some(Literal::Bool(b)) => b,
                    _ => return Err(self.unexpected()),
                };
                self.advance()?;
                Ok(Subtree::leaf(Expression::BoolLiteral(value)))
            }
            TokenKind::Season => {
                let value: Season = match self.current.literal {
                    Some(Literal::Season(s)) => s,
                    _ => return Err(self.unexpected()),
                };
                self.advance()?;
                Ok(Subtree::leaf(Expression::SeasonLiteral(value)))
            }
            TokenKind::Ident => Ok(Subtree::leaf(Expression::Variable(self.parse_ident()?))),
            TokenKind::StartPair => self.parse_pair(),
            TokenKind::OpenPar => self.nested(|parser| {
                parser.advance()?;
                let inner = parser.parse_conjunction()?;
                parser.consume(TokenKind::ClosePar)?;
                Ok(inner)
            }),
            TokenKind::Minus => self.parse_prefix(UnaryOp::Neg),
            TokenKind::Not => self.parse_prefix(UnaryOp::Not),
            TokenKind::SeasonNum => self.parse_prefix(UnaryOp::SeasonToInt),
            TokenKind::SeasonOf => self.parse_prefix(UnaryOp::IntToSeason),
            TokenKind::Fst => self.parse_prefix(UnaryOp::Fst),
            TokenKind::Snd => self.parse_prefix(UnaryOp::Snd),
            _ => Err(self.unexpected()),
        }
    }

    /// Prefix operators bind to a single atom
    fn parse_prefix(&mut self, op: UnaryOp) -> Result<Subtree, ParseError> {
        self.nested(|parser| {
            parser.advance()?;
            let operand = parser.parse_atom()?;
            let height = parser.check_height(operand.height + 1)?;
            Ok(Subtree {
                expr: Expression::unary(op, operand.expr),
                height,
            })
        })
    }

    fn parse_pair(&mut self) -> Result<Subtree, ParseError> {
        self.nested(|parser| {
            parser.consume(TokenKind::StartPair)?;
            let left = parser.parse_conjunction()?;
            parser.consume(TokenKind::ExpSep)?;
            let right = parser.parse_conjunction()?;
            parser.consume(TokenKind::EndPair)?;
            let height = parser.check_height(left.height.max(right.height) + 1)?;
            Ok(Subtree {
                expr: Expression::pair(left.expr, right.expr),
                height,
            })
        })
    }

    fn parse_ident(&mut self) -> Result<Ident, ParseError> {
        self.expect(TokenKind::Ident)?;
        let name = Ident::new(std::mem::take(&mut self.current.lexeme));
        self.advance()?;
        Ok(name)
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    /// Moves to the next token; lexical errors surface as parse errors
    fn advance(&mut self) -> Result<(), ParseError> {
        let line = self.current.line;
        self.current = match self.tokens.next() {
            Some(token) => token?,
            None => Token::eof(line),
        };
        Ok(())
    }

    /// Runs `parse` one nesting level deeper
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.too_deep(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn check_height(&self, height: usize) -> Result<usize, ParseError> {
        if height > MAX_EXPRESSION_HEIGHT {
            return Err(self.too_deep(MAX_EXPRESSION_HEIGHT));
        }
        Ok(height)
    }

    fn too_deep(&self, limit: usize) -> ParseError {
        ParseError::TooDeep {
            line: self.current.line,
            limit,
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Fails unless the lookahead has the expected kind
    fn expect(&self, expected: TokenKind) -> Result<(), ParseError> {
        if self.check(expected) {
            Ok(())
        } else {
            Err(ParseError::Mismatch {
                line: self.current.line,
                expected,
                found: self.current.kind,
                lexeme: self.current.lexeme.clone(),
            })
        }
    }

    fn consume(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        self.expect(expected)?;
        self.advance()
    }

    fn unexpected(&self) -> ParseError {
        ParseError::Unexpected {
            line: self.current.line,
            found: self.current.kind,
            lexeme: self.current.lexeme.clone(),
        }
    }
}
