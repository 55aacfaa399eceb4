use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::season::Season;

/// Complete Seasonlang program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level statements, evaluated in the outermost scope
    pub body: StatementSeq,
}

/// Non-empty sequence of statements, as a right-leaning cons list.
///
/// Every trait impl walks the list with [`StatementSeq::iter`] instead of
/// recursing, so the length of a program never bounds the native stack.
pub enum StatementSeq {
    /// Last statement of a sequence
    Single(Box<Statement>),
    /// A statement followed by the rest of the sequence
    More(Box<Statement>, Box<StatementSeq>),
}

impl StatementSeq {
    /// Builds the list for `first` followed by `rest`, in source order
    pub fn new(first: Statement, rest: Vec<Statement>) -> Self {
        let mut reversed = rest.into_iter().rev();
        match reversed.next() {
            None => StatementSeq::Single(Box::new(first)),
            Some(last) => {
                let tail = reversed.fold(StatementSeq::Single(Box::new(last)), |seq, stmt| {
                    StatementSeq::More(Box::new(stmt), Box::new(seq))
                });
                StatementSeq::More(Box::new(first), Box::new(tail))
            }
        }
    }

    /// First statement of the sequence
    pub fn first(&self) -> &Statement {
        match self {
            StatementSeq::Single(stmt) | StatementSeq::More(stmt, _) => stmt.as_ref(),
        }
    }

    /// Iterates over the statements in source order
    pub fn iter(&self) -> StatementIter<'_> {
        StatementIter { next: Some(self) }
    }

    /// Number of statements in the sequence
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false: sequences hold at least one statement
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Detaches a tail that is itself a `More`, leaving a one-statement
    /// placeholder behind
    fn unlink_tail(&mut self) -> Option<StatementSeq> {
        match self {
            StatementSeq::More(_, rest) if matches!(**rest, StatementSeq::More(..)) => {
                let placeholder = StatementSeq::Single(Box::new(Statement::Print(
                    Expression::IntLiteral(0),
                )));
                Some(std::mem::replace(rest.as_mut(), placeholder))
            }
            _ => None,
        }
    }
}

impl Drop for StatementSeq {
    fn drop(&mut self) {
        let mut next = self.unlink_tail();
        while let Some(mut seq) = next {
            next = seq.unlink_tail();
        }
    }
}

impl Clone for StatementSeq {
    fn clone(&self) -> Self {
        StatementSeq::new(self.first().clone(), self.iter().skip(1).cloned().collect())
    }
}

impl PartialEq for StatementSeq {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl fmt::Debug for StatementSeq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Serialized as a flat array of statements
impl Serialize for StatementSeq {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for StatementSeq {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut statements = Vec::<Statement>::deserialize(deserializer)?.into_iter();
        match statements.next() {
            Some(first) => Ok(StatementSeq::new(first, statements.collect())),
            None => Err(de::Error::invalid_length(0, &"at least one statement")),
        }
    }
}

/// Source-order iterator over a [`StatementSeq`]
pub struct StatementIter<'a> {
    next: Option<&'a StatementSeq>,
}

impl<'a> Iterator for StatementIter<'a> {
    type Item = &'a Statement;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next.take()? {
            StatementSeq::Single(stmt) => Some(stmt.as_ref()),
            StatementSeq::More(stmt, rest) => {
                self.next = Some(rest.as_ref());
                Some(stmt.as_ref())
            }
        }
    }
}

/// Braced statement sequence opening its own scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Statements inside the braces
    pub body: StatementSeq,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Variable declaration: var x = expr
    VarDecl {
        /// Name being declared in the current scope
        name: Ident,
        /// Initializer expression
        value: Expression,
    },

    /// Assignment to a declared variable: x = expr
    Assign {
        /// Name of the variable to assign to
        name: Ident,
        /// Expression value to assign
        value: Expression,
    },

    /// print expr
    Print(Expression),

    /// If statement
    If {
        /// Condition expression to evaluate
        condition: Expression,
        /// Block to execute if condition is true
        then_block: Block,
        /// Optional block to execute if condition is false
        else_block: Option<Block>,
    },

    /// Counting loop: for x to bound { ... }
    For {
        /// Already-declared integer variable used as the counter
        variable: Ident,
        /// Inclusive upper bound, re-evaluated before every iteration
        bound: Expression,
        /// Loop body
        body: Block,
    },

    /// Nested block
    Block(Block),
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    // Literals
    /// Integer literal expression
    IntLiteral(i64),
    /// Boolean literal expression
    BoolLiteral(bool),
    /// Season literal expression
    SeasonLiteral(Season),

    /// Variable reference
    Variable(Ident),

    /// Pair construction: <<left, right>>
    Pair {
        /// First component
        left: Box<Expression>,
        /// Second component
        right: Box<Expression>,
    },

    /// Unary operation
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expression>,
    },

    /// Binary operation
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
    },
}

impl Expression {
    /// Builds a unary node
    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Builds a binary node
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Builds a pair node
    pub fn pair(left: Expression, right: Expression) -> Self {
        Expression::Pair {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition operator (+)
    Add,
    /// Multiplication operator (*)
    Mul,
    /// Equality operator (==)
    Eq,
    /// Less than operator (<)
    Lt,
    /// Logical AND operator (&&)
    And,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Negation operator (-x)
    Neg,
    /// Logical NOT operator (!x)
    Not,
    /// Season ordinal (#x)
    SeasonToInt,
    /// Season from ordinal (seasonof x)
    IntToSeason,
    /// First projection (fst x)
    Fst,
    /// Second projection (snd x)
    Snd,
}

/// Variable name; two identifiers are equal iff their names are equal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ident(String);

impl Ident {
    /// Creates an identifier from a name
    pub fn new(name: impl Into<String>) -> Self {
        Ident(name.into())
    }

    /// The identifier's name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Source-like rendering, fully parenthesized so precedence is explicit

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.body)
    }
}

impl fmt::Display for StatementSeq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, stmt) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ {} }}", self.body)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::VarDecl { name, value } => write!(f, "var {} = {}", name, value),
            Statement::Assign { name, value } => write!(f, "{} = {}", name, value),
            Statement::Print(expr) => write!(f, "print {}", expr),
            Statement::If {
                condition,
                then_block,
                else_block,
            } => {
                write!(f, "if ({}) {}", condition, then_block)?;
                if let Some(block) = else_block {
                    write!(f, " else {}", block)?;
                }
                Ok(())
            }
            Statement::For {
                variable,
                bound,
                body,
            } => write!(f, "for {} to {} {}", variable, bound, body),
            Statement::Block(block) => write!(f, "{}", block),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::IntLiteral(n) => write!(f, "{}", n),
            Expression::BoolLiteral(b) => write!(f, "{}", b),
            Expression::SeasonLiteral(s) => write!(f, "{}", s),
            Expression::Variable(id) => write!(f, "{}", id),
            Expression::Pair { left, right } => write!(f, "<<{}, {}>>", left, right),
            Expression::Unary { op, operand } => match op {
                UnaryOp::Neg | UnaryOp::Not | UnaryOp::SeasonToInt => {
                    write!(f, "{}{}", op, operand)
                }
                _ => write!(f, "{} {}", op, operand),
            },
            Expression::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Eq => write!(f, "=="),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::And => write!(f, "&&"),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
            UnaryOp::SeasonToInt => write!(f, "#"),
            UnaryOp::IntToSeason => write!(f, "seasonof"),
            UnaryOp::Fst => write!(f, "fst"),
            UnaryOp::Snd => write!(f, "snd"),
        }
    }
}
