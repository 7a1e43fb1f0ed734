use crate::env::Environment;
use crate::error::EvalResult;
use crate::eval::eval;
use crate::expr::LispExpr;
use log::debug;
use std::{fmt, ptr};
use std::rc::Rc;

/// Native implementation of a builtin, called with the evaluated argument list.
pub type Fp = Rc<dyn Fn(&LispExpr) -> EvalResult<LispExpr>>;

enum Body {
    Lisp(LispExpr),
    Builtin(Fp),
}

pub struct Procedure {
    name: String,
    params: LispExpr,
    body: Body,
    env: Option<Rc<Environment>>,
}

// closures are only equal to themselves
impl PartialEq for Procedure {
    fn eq(&self, other: &Procedure) -> bool { ptr::eq(self, other) }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.body {
            Body::Lisp(_) => {
                let params: Vec<String> = self.params.to_vec().unwrap_or_default()
                    .iter().map(|p| p.to_string()).collect();
                write!(f, "(lambda ({}) ...)", params.join(" "))
            },
            Body::Builtin(_) => write!(f, "<builtin {}>", self.name),
        }
    }
}

impl Procedure {
    /// `params` must already be a proper list of symbols.
    pub fn new(params: LispExpr, body: LispExpr, env: Rc<Environment>) -> Procedure {
        Procedure{name: format!("lambda"), params, body: Body::Lisp(body), env: Some(env)}
    }

    pub fn builtin(name: &str, fp: Fp) -> Procedure {
        Procedure{name: name.to_string(), params: LispExpr::nil(), body: Body::Builtin(fp), env: None}
    }

    /// Whether this is a lisp closure over exactly `env`.
    pub fn captures(&self, env: &Rc<Environment>) -> bool {
        self.env.as_ref().map_or(false, |captured| Rc::ptr_eq(captured, env))
    }

    pub fn call(&self, args: &LispExpr) -> EvalResult<LispExpr> {
        debug!("apply {:?} to {}", self, args);
        match self.body {
            Body::Builtin(ref fp) => fp(args),
            Body::Lisp(ref expr) => {
                let env = Rc::new(Environment::nested(self.env.clone()));
                env.bind_parameters(&self.params, args)?;
                eval(expr, &env)
            }
        }
    }
}
