use crate::env::Environment;
use crate::error::{EvalErr, EvalResult};
use crate::eval::eval;
use crate::expr::LispExpr;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use std::rc::Rc;

fn root() -> Rc<Environment> {
    Rc::new(Environment::with_builtins())
}

fn eval_in(env: &Rc<Environment>, source: &str) -> EvalResult<LispExpr> {
    eval(&Parser::parse_str(source)?, env)
}

fn nums(items: &[f64]) -> LispExpr {
    items.iter().map(|n| LispExpr::num(*n)).collect()
}

#[test]
fn test_arith() {
    let env = root();
    assert_eq!(eval_in(&env, "(+ 1 2)"), Ok(LispExpr::num(3.0)));
    assert_eq!(eval_in(&env, "(* (+ 1 2) (- 10 4))"), Ok(LispExpr::num(18.0)));
}

#[test]
fn test_if() {
    let env = root();
    assert_eq!(eval_in(&env, "(if (> 3 2) 1 2)"), Ok(LispExpr::num(1.0)));
    assert_eq!(eval_in(&env, "(if (> 2 3) 1 2)"), Ok(LispExpr::num(2.0)));
    assert_eq!(eval_in(&env, "(if 0 1 2)"), Ok(LispExpr::num(1.0)));
    assert_eq!(eval_in(&env, "(if nil 1 2)"), Ok(LispExpr::num(2.0)));
    assert_eq!(eval_in(&env, "(if #f 1 2)"), Ok(LispExpr::num(2.0)));
    assert_eq!(eval_in(&env, "(if (quote ()) 1 2)"), Ok(LispExpr::num(2.0)));
    // the branch not taken is never evaluated
    assert_eq!(eval_in(&env, "(if #t 1 undefined)"), Ok(LispExpr::num(1.0)));
}

#[test]
fn test_define() {
    let env = root();
    assert_eq!(eval_in(&env, "(define x 5)"), Ok(LispExpr::Empty));
    assert_eq!(eval_in(&env, "x"), Ok(LispExpr::num(5.0)));
    let sibling = root();
    assert_eq!(eval_in(&sibling, "x"), Err(EvalErr::UnknownSym(format!("x"))));
    eval_in(&env, "(define x (+ x 1))").unwrap();
    assert_eq!(eval_in(&env, "x"), Ok(LispExpr::num(6.0)));
}

#[test]
fn test_define_binds_locally() {
    let env = root();
    eval_in(&env, "(define x 1)").unwrap();
    eval_in(&env, "(define f (lambda () (define x 2)))").unwrap();
    assert_eq!(eval_in(&env, "(f)"), Ok(LispExpr::Empty));
    assert_eq!(eval_in(&env, "x"), Ok(LispExpr::num(1.0)));
}

#[test]
fn test_quote() {
    let env = root();
    assert_eq!(eval_in(&env, "(quote (1 2 3))"), Ok(nums(&[1.0, 2.0, 3.0])));
    eval_in(&env, "(define a 10)").unwrap();
    eval_in(&env, "(define b 20)").unwrap();
    let quoted: LispExpr = vec![LispExpr::sym("a"), LispExpr::sym("b")].into_iter().collect();
    assert_eq!(eval_in(&env, "(quote (a b))"), Ok(quoted));
    assert_eq!(eval_in(&env, "(quote undefined)"), Ok(LispExpr::sym("undefined")));
}

#[test]
fn test_map_lambda() {
    let env = root();
    assert_eq!(eval_in(&env, "(map (lambda (x) (* x x)) (list 1 2 3))"),
               Ok(nums(&[1.0, 4.0, 9.0])));
}

#[test]
fn test_errors() {
    let env = root();
    assert_eq!(eval_in(&env, "undefined-name"),
               Err(EvalErr::UnknownSym(format!("undefined-name"))));
    assert!(matches!(eval_in(&env, "(1 2)"), Err(EvalErr::TypeMismatch(_))));
    assert_eq!(eval_in(&env, "(+ 1 nope)"), Err(EvalErr::UnknownSym(format!("nope"))));
    assert!(matches!(eval_in(&env, "(+ 1"), Err(EvalErr::Malformed(_))));
    assert!(matches!(eval(&LispExpr::Empty, &env), Err(EvalErr::TypeMismatch(_))));
    let plus = eval_in(&env, "+").unwrap();
    assert!(matches!(eval(&plus, &env), Err(EvalErr::TypeMismatch(_))));
}

#[test]
fn test_invalid_forms() {
    let env = root();
    let tests = vec![
        ("(define 1 2)", "define"),
        ("(define x)", "define"),
        ("(if 1 2)", "if"),
        ("(quote)", "quote"),
        ("(quote 1 2)", "quote"),
        ("(lambda (1) 1)", "lambda"),
        ("(lambda x x)", "lambda"),
        ("(lambda (x))", "lambda"),
    ];
    for (input, form) in tests.into_iter() {
        assert_eq!(eval_in(&env, input), Err(EvalErr::InvalidForm(form.to_string())),
                   "evaluating {:?}", input);
    }
}

#[test]
fn test_idempotent_eval() {
    let env = root();
    let expr = Parser::parse_str("(* (+ 1 2) (- 10 4) (/ 9 3))").unwrap();
    let first = eval(&expr, &env);
    assert_eq!(first, Ok(LispExpr::num(54.0)));
    assert_eq!(eval(&expr, &env), first);
    assert!(!env.contains("x"));
}

#[test]
fn test_lambda_application() {
    let env = root();
    assert_eq!(eval_in(&env, "((lambda (x y) (+ x y)) 3 4)"), Ok(LispExpr::num(7.0)));
    assert_eq!(eval_in(&env, "((lambda () 42))"), Ok(LispExpr::num(42.0)));
    assert_eq!(eval_in(&env, "((lambda (x) x) 1 2)"),
               Err(EvalErr::ArityMismatch{expected: 1, got: 2}));
    assert_eq!(eval_in(&env, "((lambda (x y) x) 1)"),
               Err(EvalErr::ArityMismatch{expected: 2, got: 1}));
}

#[test]
fn test_lexical_scope() {
    let env = root();
    eval_in(&env, "(define x 10)").unwrap();
    eval_in(&env, "(define getx (lambda () x))").unwrap();
    eval_in(&env, "(define f (lambda (x) (getx)))").unwrap();
    assert_eq!(eval_in(&env, "(f 99)"), Ok(LispExpr::num(10.0)));
}

#[test]
fn test_closure_outlives_frame() {
    let env = root();
    eval_in(&env, "(define adder (lambda (n) (lambda (x) (+ x n))))").unwrap();
    eval_in(&env, "(define add3 (adder 3))").unwrap();
    assert_eq!(eval_in(&env, "(add3 4)"), Ok(LispExpr::num(7.0)));
    assert_eq!(eval_in(&env, "((adder 10) 5)"), Ok(LispExpr::num(15.0)));
    assert!(!env.contains("n"));
}

#[test]
fn test_recursion() {
    let env = root();
    eval_in(&env, "(define fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1))))))").unwrap();
    assert_eq!(eval_in(&env, "(fact 5)"), Ok(LispExpr::num(120.0)));
    eval_in(&env, "(define len (lambda (l) (if (null? l) 0 (+ 1 (len (cdr l))))))").unwrap();
    assert_eq!(eval_in(&env, "(len (list 1 2 3 4))"), Ok(LispExpr::num(4.0)));
}

#[test]
fn test_interpreter_run() {
    let interp = Interpreter::new();
    assert_eq!(interp.run("(define sq (lambda (x) (* x x))) (sq 7)"), Ok(LispExpr::num(49.0)));
    assert_eq!(interp.eval_str("(sq 3)"), Ok(LispExpr::num(9.0)));
    assert_eq!(interp.run(""), Ok(LispExpr::Empty));
    assert_eq!(interp.run("(define y 1) (+ y zzz) (define z 2)"),
               Err(EvalErr::UnknownSym(format!("zzz"))));
    assert!(interp.env().contains("y"));
    assert!(!interp.env().contains("z"));
}

#[test]
fn test_interpreter_releases_root() {
    let interp = Interpreter::new();
    interp.run("(define fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1))))))").unwrap();
    let frame = Rc::downgrade(interp.env());
    drop(interp);
    assert!(frame.upgrade().is_none());
}

#[test]
fn test_escaped_closure_survives_interpreter() {
    let interp = Interpreter::new();
    let inc = interp.eval_str("(lambda (x) (+ x 1))").unwrap();
    let frame = Rc::downgrade(interp.env());
    drop(interp);
    let inc = match inc {
        LispExpr::Closure(p) => p,
        other => panic!("expected a closure, got {:?}", other),
    };
    assert_eq!(inc.call(&LispExpr::cons(LispExpr::num(1.0), LispExpr::nil())),
               Ok(LispExpr::num(2.0)));
    assert!(frame.upgrade().is_some());
}

#[test]
fn test_escaped_bound_closure_survives_interpreter() {
    let interp = Interpreter::new();
    interp.run("(define fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1))))))").unwrap();
    let fact = match interp.eval_str("fact").unwrap() {
        LispExpr::Closure(p) => p,
        other => panic!("expected a closure, got {:?}", other),
    };
    drop(interp);
    assert_eq!(fact.call(&LispExpr::cons(LispExpr::num(4.0), LispExpr::nil())),
               Ok(LispExpr::num(24.0)));
}

#[test]
fn test_frame_clear_counts_aliases() {
    let interp = Interpreter::new();
    interp.run("(define f (lambda (x) x)) (define g f)").unwrap();
    let frame = Rc::downgrade(interp.env());
    drop(interp);
    assert!(frame.upgrade().is_none());
}
