use crate::env::Environment;
use crate::error::{EvalErr, EvalResult};
use crate::expr::{Atom, LispExpr};
use crate::procedure::Procedure;
use log::debug;
use std::rc::Rc;

// operands of a special form, checked against the expected count
fn operands(form: &str, tail: &LispExpr, count: usize) -> EvalResult<Vec<LispExpr>> {
    let ops = tail.to_vec()?;
    if ops.len() != count {
        return Err(EvalErr::InvalidForm(form.to_string()));
    }
    Ok(ops)
}

pub fn eval(expr: &LispExpr, env: &Rc<Environment>) -> EvalResult<LispExpr> {
    debug!("eval {}", expr);
    match expr {
        LispExpr::Atomic(Atom::Symbol(sym)) => env.get(sym),
        LispExpr::Atomic(atom) => Ok(LispExpr::Atomic(atom.clone())),
        LispExpr::Pair(head, tail) => match head.symbol_name() {
            Some("define") => eval_define(tail, env),
            Some("if") => eval_if(tail, env),
            Some("quote") => Ok(operands("quote", tail, 1)?.swap_remove(0)),
            Some("lambda") => eval_lambda(tail, env),
            _ => apply(head, tail, env),
        },
        LispExpr::Closure(_) | LispExpr::Empty => Err(EvalErr::TypeMismatch(
            format!("{} is a value, not an expression", expr.type_name()))),
    }
}

fn eval_define(tail: &LispExpr, env: &Rc<Environment>) -> EvalResult<LispExpr> {
    let ops = operands("define", tail, 2)?;
    let var = ops[0].symbol_name()
        .ok_or_else(|| EvalErr::InvalidForm(format!("define")))?;
    let value = eval(&ops[1], env)?;
    env.set(var, value);
    Ok(LispExpr::Empty)
}

fn eval_if(tail: &LispExpr, env: &Rc<Environment>) -> EvalResult<LispExpr> {
    let ops = operands("if", tail, 3)?;
    let (test, conseq, alt) = (&ops[0], &ops[1], &ops[2]);
    if eval(test, env)?.is_truthy() {
        eval(conseq, env)
    } else {
        eval(alt, env)
    }
}

fn eval_lambda(tail: &LispExpr, env: &Rc<Environment>) -> EvalResult<LispExpr> {
    let ops = operands("lambda", tail, 2)?;
    let (params, body) = (&ops[0], &ops[1]);
    let param_list = params.to_vec()
        .map_err(|_| EvalErr::InvalidForm(format!("lambda")))?;
    if param_list.iter().any(|p| p.symbol_name().is_none()) {
        return Err(EvalErr::InvalidForm(format!("lambda")));
    }
    let procedure = Procedure::new(params.clone(), body.clone(), env.clone());
    Ok(LispExpr::Closure(Rc::new(procedure)))
}

fn apply(head: &LispExpr, tail: &LispExpr, env: &Rc<Environment>) -> EvalResult<LispExpr> {
    let procedure = match eval(head, env)? {
        LispExpr::Closure(procedure) => procedure,
        other => return Err(EvalErr::TypeMismatch(
            format!("{} {} is not callable", other.type_name(), other))),
    };
    let args = tail.to_vec()?.iter()
        .map(|arg| eval(arg, env))
        .collect::<EvalResult<LispExpr>>()?;
    let result = procedure.call(&args)?;
    debug!("result {}", result);
    Ok(result)
}
