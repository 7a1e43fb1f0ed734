use crate::error::{EvalErr, EvalResult};
use crate::procedure::Procedure;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, PartialEq, Debug)]
pub enum Atom {
    Number(f64),
    Symbol(String),
    Boolean(bool),
    Nil,
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Atom::Number(n) => write!(f, "{}", n),
            Atom::Symbol(s) => write!(f, "{}", s),
            Atom::Boolean(true) => write!(f, "#t"),
            Atom::Boolean(false) => write!(f, "#f"),
            Atom::Nil => write!(f, "nil"),
        }
    }
}

/// An s-expression. Lists are right-chained `Pair`s ending in the Nil atom.
#[derive(Clone, PartialEq, Debug)]
pub enum LispExpr {
    Atomic(Atom),
    Pair(Rc<LispExpr>, Rc<LispExpr>),
    Closure(Rc<Procedure>),
    /// Result of forms evaluated only for their side effect.
    Empty,
}

impl fmt::Display for LispExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LispExpr::Atomic(atom) => write!(f, "{}", atom),
            LispExpr::Pair(car, cdr) => write!(f, "({},{})", car, cdr),
            LispExpr::Closure(_) => write!(f, "<closure>"),
            LispExpr::Empty => write!(f, "<empty>"),
        }
    }
}

impl LispExpr {
    pub fn num(n: f64) -> LispExpr { LispExpr::Atomic(Atom::Number(n)) }

    pub fn sym(s: &str) -> LispExpr { LispExpr::Atomic(Atom::Symbol(s.to_string())) }

    pub fn boolean(b: bool) -> LispExpr { LispExpr::Atomic(Atom::Boolean(b)) }

    pub fn nil() -> LispExpr { LispExpr::Atomic(Atom::Nil) }

    pub fn cons(car: LispExpr, cdr: LispExpr) -> LispExpr {
        LispExpr::Pair(Rc::new(car), Rc::new(cdr))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, LispExpr::Atomic(Atom::Nil))
    }

    /// `#f` and nil are false, everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            LispExpr::Atomic(Atom::Boolean(b)) => *b,
            LispExpr::Atomic(Atom::Nil) => false,
            _ => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            LispExpr::Atomic(Atom::Number(_)) => "number",
            LispExpr::Atomic(Atom::Symbol(_)) => "symbol",
            LispExpr::Atomic(Atom::Boolean(_)) => "boolean",
            LispExpr::Atomic(Atom::Nil) => "nil",
            LispExpr::Pair(..) => "pair",
            LispExpr::Closure(_) => "closure",
            LispExpr::Empty => "empty",
        }
    }

    pub fn as_number(&self) -> EvalResult<f64> {
        match self {
            LispExpr::Atomic(Atom::Number(n)) => Ok(*n),
            other => Err(EvalErr::TypeMismatch(
                format!("expected number, found {} {}", other.type_name(), other))),
        }
    }

    pub fn as_symbol(&self) -> EvalResult<&str> {
        self.symbol_name().ok_or_else(|| EvalErr::TypeMismatch(
            format!("expected symbol, found {} {}", self.type_name(), self)))
    }

    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            LispExpr::Atomic(Atom::Symbol(s)) => Some(s),
            _ => None,
        }
    }

    pub fn car(&self) -> EvalResult<LispExpr> {
        match self {
            LispExpr::Pair(car, _) => Ok((**car).clone()),
            other => Err(EvalErr::TypeMismatch(
                format!("car expects a pair, found {} {}", other.type_name(), other))),
        }
    }

    pub fn cdr(&self) -> EvalResult<LispExpr> {
        match self {
            LispExpr::Pair(_, cdr) => Ok((**cdr).clone()),
            other => Err(EvalErr::TypeMismatch(
                format!("cdr expects a pair, found {} {}", other.type_name(), other))),
        }
    }

    /// New list with `item` after the last element of this one.
    pub fn append(&self, item: LispExpr) -> EvalResult<LispExpr> {
        match self {
            LispExpr::Atomic(Atom::Nil) => Ok(LispExpr::cons(item, LispExpr::nil())),
            LispExpr::Pair(car, cdr) =>
                Ok(LispExpr::Pair(car.clone(), Rc::new(cdr.append(item)?))),
            other => Err(EvalErr::Structural(
                format!("can't append to {} {}", other.type_name(), other))),
        }
    }

    pub fn to_vec(&self) -> EvalResult<Vec<LispExpr>> {
        let mut items = Vec::new();
        let mut cursor = self;
        loop {
            match cursor {
                LispExpr::Pair(car, cdr) => {
                    items.push((**car).clone());
                    cursor = &**cdr;
                },
                LispExpr::Atomic(Atom::Nil) => return Ok(items),
                other => return Err(EvalErr::Structural(
                    format!("improper list ending in {} {}", other.type_name(), other))),
            }
        }
    }
}

impl FromIterator<LispExpr> for LispExpr {
    fn from_iter<I: IntoIterator<Item=LispExpr>>(iter: I) -> Self {
        let items: Vec<LispExpr> = iter.into_iter().collect();
        items.into_iter().rev()
            .fold(LispExpr::nil(), |tail, item| LispExpr::cons(item, tail))
    }
}
