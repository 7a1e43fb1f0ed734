use crate::error::{EvalErr, EvalResult};
use crate::expr::LispExpr;
use crate::procedure::{Fp, Procedure};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::rc::Rc;

fn exactly(args: &LispExpr, count: usize) -> EvalResult<Vec<LispExpr>> {
    let args = args.to_vec()?;
    if args.len() != count {
        return Err(EvalErr::ArityMismatch{expected: count, got: args.len()});
    }
    Ok(args)
}

// left fold seeded with the first argument
fn foldop<T>(op: T, args: &LispExpr) -> EvalResult<LispExpr>
        where T: Fn(f64, f64) -> f64 {
    let args = args.to_vec()?;
    let (base, rest) = match args.split_first() {
        Some((base, rest)) => (base.as_number()?, rest),
        None => return Err(EvalErr::ArityMismatch{expected: 1, got: 0}),
    };
    let mut acc = base;
    for arg in rest {
        acc = op(acc, arg.as_number()?);
    }
    Ok(LispExpr::num(acc))
}

// binary, extra arguments are ignored
fn cmpop<T>(op: T, args: &LispExpr) -> EvalResult<LispExpr>
        where T: Fn(f64, f64) -> bool {
    let args = args.to_vec()?;
    if args.len() < 2 {
        return Err(EvalErr::ArityMismatch{expected: 2, got: args.len()});
    }
    Ok(LispExpr::boolean(op(args[0].as_number()?, args[1].as_number()?)))
}

fn unary<T>(op: T, args: &LispExpr) -> EvalResult<LispExpr>
        where T: Fn(f64) -> f64 {
    let args = exactly(args, 1)?;
    Ok(LispExpr::num(op(args[0].as_number()?)))
}

fn map(args: &LispExpr) -> EvalResult<LispExpr> {
    let args = exactly(args, 2)?;
    let procedure = match args[0] {
        LispExpr::Closure(ref p) => p.clone(),
        ref other => return Err(EvalErr::TypeMismatch(
            format!("map expects a closure, found {} {}", other.type_name(), other))),
    };
    args[1].to_vec()?.into_iter()
        .map(|item| procedure.call(&LispExpr::cons(item, LispExpr::nil())))
        .collect()
}

fn register<F>(procs: &mut HashMap<String, LispExpr>, name: &str, f: F)
        where F: Fn(&LispExpr) -> EvalResult<LispExpr> + 'static {
    let fp: Fp = Rc::new(f);
    let p = Procedure::builtin(name, fp);
    procs.insert(name.to_string(), LispExpr::Closure(Rc::new(p)));
}

pub fn builtins() -> HashMap<String, LispExpr> {
    let mut procs: HashMap<String, LispExpr> = HashMap::new();

    register(&mut procs, "+", |args| foldop(|a, b| a + b, args));
    register(&mut procs, "-", |args| foldop(|a, b| a - b, args));
    register(&mut procs, "*", |args| foldop(|a, b| a * b, args));
    register(&mut procs, "/", |args| foldop(|a, b| a / b, args));
    register(&mut procs, "max", |args| foldop(|a, b| if a > b { a } else { b }, args));
    register(&mut procs, "min", |args| foldop(|a, b| if a < b { a } else { b }, args));

    register(&mut procs, ">", |args| cmpop(|a, b| a > b, args));
    register(&mut procs, "<", |args| cmpop(|a, b| a < b, args));
    register(&mut procs, ">=", |args| cmpop(|a, b| a >= b, args));
    register(&mut procs, "<=", |args| cmpop(|a, b| a <= b, args));
    register(&mut procs, "=", |args| cmpop(|a, b| a == b, args));

    register(&mut procs, "abs", |args| unary(f64::abs, args));
    register(&mut procs, "round", |args| unary(f64::round, args));

    register(&mut procs, "car", |args| exactly(args, 1)?[0].car());
    register(&mut procs, "cdr", |args| exactly(args, 1)?[0].cdr());
    register(&mut procs, "cons", |args| {
        let args = exactly(args, 2)?;
        Ok(LispExpr::cons(args[0].clone(), args[1].clone()))
    });
    register(&mut procs, "append", |args| {
        let args = exactly(args, 2)?;
        args[0].append(args[1].clone())
    });
    register(&mut procs, "map", map);
    register(&mut procs, "list", |args| Ok(args.clone()));
    register(&mut procs, "null?", |args| Ok(LispExpr::boolean(exactly(args, 1)?[0].is_nil())));

    procs.insert(format!("pi"), LispExpr::num(PI));
    procs
}
