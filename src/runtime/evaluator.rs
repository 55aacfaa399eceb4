use std::io::Write;

use super::Value;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::parser::{
    BinaryOp, Block, Expression, Ident, Program, Statement, StatementSeq, UnaryOp,
};
use crate::season::Season;

/// Tree-walking evaluator.
///
/// Statements run for effect; `print` output goes to the sink `W`.
/// Variables live in an [`Environment<Value>`] owned by the evaluator.
pub struct Evaluator<W> {
    env: Environment<Value>,
    out: W,
}

impl<W: Write> Evaluator<W> {
    /// Creates an evaluator printing to `out`
    pub fn new(out: W) -> Self {
        Evaluator {
            env: Environment::new(),
            out,
        }
    }

    /// Runs a whole program in the global scope
    pub fn execute(&mut self, program: &Program) -> Result<(), RuntimeError> {
        self.execute_sequence(&program.body)?;
        self.out.flush()?;
        tracing::debug!("evaluation finished");
        Ok(())
    }

    fn execute_sequence(&mut self, seq: &StatementSeq) -> Result<(), RuntimeError> {
        seq.iter().try_for_each(|stmt| self.execute_statement(stmt))
    }

    /// Runs the block in a nested scope; the scope is popped even on error
    fn execute_block(&mut self, block: &Block) -> Result<(), RuntimeError> {
        self.env.enter_scope();
        let result = self.execute_sequence(&block.body);
        self.env.exit_scope();
        result
    }

    fn execute_statement(&mut self, stmt: &Statement) -> Result<(), RuntimeError> {
        match stmt {
            Statement::VarDecl { name, value } => {
                let value = self.evaluate(value)?;
                self.env.declare(name.clone(), value)?;
            }
            Statement::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.env.update(name, value)?;
            }
            Statement::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{}", value)?;
            }
            Statement::If {
                condition,
                then_block,
                else_block,
            } => {
                if self.evaluate(condition)?.as_bool()? {
                    self.execute_block(then_block)?;
                } else if let Some(block) = else_block {
                    self.execute_block(block)?;
                }
            }
            Statement::For {
                variable,
                bound,
                body,
            } => self.execute_for(variable, bound, body)?,
            Statement::Block(block) => self.execute_block(block)?,
        }
        Ok(())
    }

    /// `for x to bound { ... }`: the counter starts at the current value of `x`
    /// and the bound is re-evaluated before every test. `x` is set to the
    /// counter before each pass and to the final counter after the loop.
    /// A counter that reaches `i64::MAX` ends the loop there.
    fn execute_for(
        &mut self,
        variable: &Ident,
        bound: &Expression,
        body: &Block,
    ) -> Result<(), RuntimeError> {
        let mut counter = self.env.lookup(variable)?.as_int()?;
        while counter <= self.evaluate(bound)?.as_int()? {
            self.env.update(variable, Value::Int(counter))?;
            self.execute_block(body)?;
            counter = match counter.checked_add(1) {
                Some(next) => next,
                None => break,
            };
        }
        self.env.update(variable, Value::Int(counter))?;
        Ok(())
    }

    /// Evaluates an expression to a value
    pub fn evaluate(&mut self, expr: &Expression) -> Result<Value, RuntimeError> {
        match expr {
            Expression::IntLiteral(n) => Ok(Value::Int(*n)),
            Expression::BoolLiteral(b) => Ok(Value::Bool(*b)),
            Expression::SeasonLiteral(s) => Ok(Value::Season(*s)),
            Expression::Variable(name) => Ok(self.env.lookup(name)?.clone()),
            Expression::Pair { left, right } => {
                let fst = self.evaluate(left)?;
                let snd = self.evaluate(right)?;
                Ok(Value::pair(fst, snd))
            }
            Expression::Unary { op, operand } => self.evaluate_unary(*op, operand),
            Expression::Binary { op, left, right } => self.evaluate_binary(*op, left, right),
        }
    }

    fn evaluate_unary(&mut self, op: UnaryOp, operand: &Expression) -> Result<Value, RuntimeError> {
        let value = self.evaluate(operand)?;
        match op {
            UnaryOp::Neg => Ok(Value::Int(value.as_int()?.wrapping_neg())),
            UnaryOp::Not => Ok(Value::Bool(!value.as_bool()?)),
            UnaryOp::SeasonToInt => Ok(Value::Int(value.as_season()?.ordinal())),
            UnaryOp::IntToSeason => {
                let ordinal = value.as_int()?;
                Season::from_ordinal(ordinal)
                    .map(Value::Season)
                    .ok_or(RuntimeError::SeasonOutOfRange(ordinal))
            }
            UnaryOp::Fst => Ok(value.as_pair()?.0.clone()),
            UnaryOp::Snd => Ok(value.as_pair()?.1.clone()),
        }
    }

    fn evaluate_binary(
        &mut self,
        op: BinaryOp,
        left: &Expression,
        right: &Expression,
    ) -> Result<Value, RuntimeError> {
        let left = self.evaluate(left)?;
        match op {
            BinaryOp::Add => {
                let a = left.as_int()?;
                let b = self.evaluate(right)?.as_int()?;
                Ok(Value::Int(a.wrapping_add(b)))
            }
            BinaryOp::Mul => {
                let a = left.as_int()?;
                let b = self.evaluate(right)?.as_int()?;
                Ok(Value::Int(a.wrapping_mul(b)))
            }
            // Short-circuit: the right operand is skipped when the left is false
            BinaryOp::And => {
                if !left.as_bool()? {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.evaluate(right)?.as_bool()?))
            }
            BinaryOp::Eq => {
                let right = self.evaluate(right)?;
                Ok(Value::Bool(left == right))
            }
            BinaryOp::Lt => {
                let right = self.evaluate(right)?;
                Ok(Value::Bool(left.less(&right)?))
            }
        }
    }
}
