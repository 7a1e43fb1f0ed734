use conslisp::{eval, Interpreter, LispExpr, Parser};
use log::debug;
use std::io::{self, Read};
use std::{env, process};

// program text comes from the arguments, or stdin when there are none
fn read_program() -> io::Result<String> {
    let args: Vec<String> = env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args.join(" "));
    }
    let mut source = String::new();
    io::stdin().read_to_string(&mut source)?;
    Ok(source)
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn")).init();

    let source = match read_program() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Read error: {}", e);
            process::exit(2);
        }
    };
    let exprs = match Parser::parse_all(&source) {
        Ok(exprs) => exprs,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            process::exit(1);
        }
    };
    debug!("read {} top-level expressions", exprs.len());
    let interp = Interpreter::new();
    for expr in exprs.iter() {
        match eval(expr, interp.env()) {
            Ok(LispExpr::Empty) => (),
            Ok(res) => println!("{}", res),
            Err(e) => {
                eprintln!("Eval error: {}", e);
                process::exit(1);
            }
        }
    }
}
