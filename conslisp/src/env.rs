use crate::builtin::builtins;
use crate::error::{EvalErr, EvalResult};
use crate::expr::LispExpr;
use crate::procedure::Procedure;
use log::trace;
use std::cell::RefCell;
use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

/// A frame of bindings chained to the frame it was created in.
#[derive(Default)]
pub struct Environment {
    syms: RefCell<HashMap<String, LispExpr>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment::default()
    }

    /// Root frame pre-populated with the builtin library.
    pub fn with_builtins() -> Environment {
        Environment{syms: RefCell::new(builtins()), outer: None}
    }

    pub fn nested(outer: Option<Rc<Environment>>) -> Environment {
        Environment{syms: RefCell::new(HashMap::new()), outer}
    }

    pub fn get(&self, name: &str) -> EvalResult<LispExpr> {
        if let Some(value) = self.syms.borrow().get(name) {
            return Ok(value.clone());
        }
        match self.outer {
            Some(ref outer) => outer.get(name),
            None => Err(EvalErr::UnknownSym(name.to_string())),
        }
    }

    // binds in this frame only, outer frames are never touched
    pub fn set(&self, name: &str, value: LispExpr) {
        trace!("bind {} = {}", name, value);
        self.syms.borrow_mut().insert(name.to_string(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.syms.borrow().contains_key(name)
    }

    pub fn bind_parameters(&self, params: &LispExpr, args: &LispExpr) -> EvalResult<()> {
        let params = params.to_vec()?;
        let args = args.to_vec()?;
        if params.len() != args.len() {
            return Err(EvalErr::ArityMismatch{expected: params.len(), got: args.len()});
        }
        for (param, arg) in params.iter().zip(args.into_iter()) {
            self.set(param.as_symbol()?, arg);
        }
        Ok(())
    }

    /// Drop every binding in this frame. Breaks the cycles formed by
    /// closures stored in the frame they captured.
    pub fn clear(&self) {
        let syms = mem::take(&mut *self.syms.borrow_mut());
        drop(syms);
    }

    /// Clear `frame` only when every other reference to it comes from
    /// closures bound inside it that nothing else holds. Frames still
    /// reachable from outside are left intact (and leak if cyclic).
    pub fn clear_if_unshared(frame: &Rc<Environment>) -> bool {
        // distinct closures over this frame, with how many bindings hold each
        let mut cyclic: Vec<(Rc<Procedure>, usize)> = Vec::new();
        for value in frame.syms.borrow().values() {
            if let LispExpr::Closure(p) = value {
                if !p.captures(frame) { continue; }
                match cyclic.iter_mut().find(|(q, _)| Rc::ptr_eq(p, q)) {
                    Some((_, bindings)) => *bindings += 1,
                    None => cyclic.push((p.clone(), 1)),
                }
            }
        }
        // our own clone accounts for one count on each closure
        if cyclic.iter().any(|(p, bindings)| Rc::strong_count(p) != bindings + 1) {
            trace!("frame kept: a bound closure escaped");
            return false;
        }
        if Rc::strong_count(frame) != 1 + cyclic.len() {
            trace!("frame kept: referenced from outside");
            return false;
        }
        frame.clear();
        true
    }
}
