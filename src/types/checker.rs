//! # Type Checker for Seasonlang Programs
//!
//! Infers a [`Type`] for every expression and validates every statement,
//! failing on the first error. Names are tracked in an
//! [`Environment<Type>`] private to the checker.

use super::{Type, TypeError};
use crate::environment::Environment;
use crate::parser::{
    BinaryOp, Block, Expression, Ident, Program, Statement, StatementSeq, UnaryOp,
};

/// Type checker for Seasonlang programs
pub struct TypeChecker {
    env: Environment<Type>,
}

impl TypeChecker {
    /// Creates a new type checker with an empty global scope
    pub fn new() -> Self {
        TypeChecker {
            env: Environment::new(),
        }
    }

    /// Type check a complete program
    pub fn check_program(&mut self, program: &Program) -> Result<(), TypeError> {
        self.check_sequence(&program.body)?;
        tracing::debug!("type check passed");
        Ok(())
    }

    fn check_sequence(&mut self, seq: &StatementSeq) -> Result<(), TypeError> {
        seq.iter().try_for_each(|stmt| self.check_statement(stmt))
    }

    /// Checks the block's statements in a fresh scope, popped on every exit path
    fn check_block(&mut self, block: &Block) -> Result<(), TypeError> {
        self.env.enter_scope();
        let result = self.check_sequence(&block.body);
        self.env.exit_scope();
        result
    }

    /// Type check a statement
    fn check_statement(&mut self, stmt: &Statement) -> Result<(), TypeError> {
        match stmt {
            Statement::VarDecl { name, value } => {
                let ty = self.infer_type(value)?;
                self.env.declare(name.clone(), ty)?;
            }
            Statement::Assign { name, value } => {
                let declared = self.env.lookup(name)?.clone();
                let found = self.infer_type(value)?;
                declared.check_equal(&found)?;
            }
            Statement::Print(expr) => {
                self.infer_type(expr)?;
            }
            Statement::If {
                condition,
                then_block,
                else_block,
            } => {
                self.expect(condition, Type::Bool)?;
                self.check_block(then_block)?;
                if let Some(block) = else_block {
                    self.check_block(block)?;
                }
            }
            Statement::For {
                variable,
                bound,
                body,
            } => {
                self.expect_variable(variable, Type::Int)?;
                self.expect(bound, Type::Int)?;
                self.check_block(body)?;
            }
            Statement::Block(block) => self.check_block(block)?,
        }
        Ok(())
    }

    /// Infer the type of an expression
    pub fn infer_type(&mut self, expr: &Expression) -> Result<Type, TypeError> {
        match expr {
            // === Literals ===
            Expression::IntLiteral(_) => Ok(Type::Int),
            Expression::BoolLiteral(_) => Ok(Type::Bool),
            Expression::SeasonLiteral(_) => Ok(Type::Season),

            // === Variables ===
            Expression::Variable(name) => Ok(self.env.lookup(name)?.clone()),

            // === Pairs ===
            Expression::Pair { left, right } => {
                let fst = self.infer_type(left)?;
                let snd = self.infer_type(right)?;
                Ok(Type::product(fst, snd))
            }

            // === Unary Operations ===
            Expression::Unary { op, operand } => self.check_unary_op(*op, operand),

            // === Binary Operations ===
            Expression::Binary { op, left, right } => self.check_binary_op(*op, left, right),
        }
    }

    fn check_unary_op(&mut self, op: UnaryOp, operand: &Expression) -> Result<Type, TypeError> {
        match op {
            UnaryOp::Neg => self.expect(operand, Type::Int).map(|_| Type::Int),
            UnaryOp::Not => self.expect(operand, Type::Bool).map(|_| Type::Bool),
            UnaryOp::SeasonToInt => self.expect(operand, Type::Season).map(|_| Type::Int),
            // 0..=3 is enforced at run time
            UnaryOp::IntToSeason => self.expect(operand, Type::Int).map(|_| Type::Season),
            UnaryOp::Fst => Ok(self.infer_type(operand)?.fst()?.clone()),
            UnaryOp::Snd => Ok(self.infer_type(operand)?.snd()?.clone()),
        }
    }

    fn check_binary_op(
        &mut self,
        op: BinaryOp,
        left: &Expression,
        right: &Expression,
    ) -> Result<Type, TypeError> {
        match op {
            BinaryOp::Add | BinaryOp::Mul => {
                self.expect(left, Type::Int)?;
                self.expect(right, Type::Int)?;
                Ok(Type::Int)
            }
            BinaryOp::And => {
                self.expect(left, Type::Bool)?;
                self.expect(right, Type::Bool)?;
                Ok(Type::Bool)
            }
            // Any type, as long as both sides agree
            BinaryOp::Eq | BinaryOp::Lt => {
                let left_type = self.infer_type(left)?;
                let right_type = self.infer_type(right)?;
                left_type.check_equal(&right_type)?;
                Ok(Type::Bool)
            }
        }
    }

    fn expect(&mut self, expr: &Expression, expected: Type) -> Result<(), TypeError> {
        let found = self.infer_type(expr)?;
        expected.check_equal(&found)
    }

    fn expect_variable(&self, name: &Ident, expected: Type) -> Result<(), TypeError> {
        let found = self.env.lookup(name)?;
        expected.check_equal(found)
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}
