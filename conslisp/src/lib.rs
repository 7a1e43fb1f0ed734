mod builtin;
mod env;
mod error;
mod eval;
mod expr;
mod interpreter;
mod parser;
mod procedure;

pub use builtin::builtins;
pub use env::Environment;
pub use error::{EvalErr, EvalResult};
pub use eval::eval;
pub use expr::{Atom, LispExpr};
pub use interpreter::Interpreter;
pub use parser::Parser;
pub use procedure::{Fp, Procedure};

#[cfg(test)]
mod eval_test;
