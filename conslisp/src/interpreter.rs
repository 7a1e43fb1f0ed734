use crate::env::Environment;
use crate::error::EvalResult;
use crate::eval::eval;
use crate::expr::LispExpr;
use crate::parser::Parser;
use std::rc::Rc;

/// Owns a root environment holding the builtin library.
///
/// Dropping the interpreter clears the root frame, so procedures defined at
/// top level (which capture that frame) are released with it, unless some
/// value handed out by the interpreter still needs the frame.
pub struct Interpreter {
    env: Rc<Environment>,
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter{env: Rc::new(Environment::with_builtins())}
    }

    pub fn env(&self) -> &Rc<Environment> { &self.env }

    pub fn eval_str(&self, source: &str) -> EvalResult<LispExpr> {
        let expr = Parser::parse_str(source)?;
        eval(&expr, &self.env)
    }

    /// Evaluate every top-level expression, returning the last value.
    pub fn run(&self, source: &str) -> EvalResult<LispExpr> {
        let mut last = LispExpr::Empty;
        for expr in Parser::parse_all(source)? {
            last = eval(&expr, &self.env)?;
        }
        Ok(last)
    }
}

impl Default for Interpreter {
    fn default() -> Self { Interpreter::new() }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        Environment::clear_if_unshared(&self.env);
    }
}
