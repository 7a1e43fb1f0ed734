use crate::error::{EvalErr, EvalResult};
use crate::expr::LispExpr;
use lexers::{Scanner, SexprTokenizer};
use log::trace;


pub struct Parser;

impl Parser {
    /// Read the first expression in `source`, later tokens are left unread.
    pub fn parse_str(source: &str) -> EvalResult<LispExpr> {
        Self::parse(&mut SexprTokenizer::scanner(source))
    }

    pub fn parse_all(source: &str) -> EvalResult<Vec<LispExpr>> {
        let mut lex = SexprTokenizer::scanner(source);
        let mut exprs = Vec::new();
        while !lex.is_done() {
            exprs.push(Self::parse(&mut lex)?);
        }
        Ok(exprs)
    }

    pub fn parse(lex: &mut Scanner<String>) -> EvalResult<LispExpr> {
        let token = match lex.next() {
            None => return Err(EvalErr::Malformed(format!("unexpected end of input"))),
            Some(token) => token,
        };
        trace!("token {:?} at {}", token, lex.pos());
        match &token[..] {
            ")" => Err(EvalErr::Malformed(format!("unexpected ')'"))),
            "(" => {
                let mut items = Vec::new();
                while lex.peek().as_deref() != Some(")") { // EOF errors in parse
                    items.push(Self::parse(lex)?);
                }
                lex.next(); // get over that ')'
                Ok(items.into_iter().collect())
            },
            word => Ok(Self::atom(word)),
        }
    }

    fn atom(word: &str) -> LispExpr {
        match word {
            "#t" => return LispExpr::boolean(true),
            "#f" => return LispExpr::boolean(false),
            "nil" => return LispExpr::nil(),
            _ => (),
        }
        if looks_numeric(word) {
            if let Ok(n) = word.parse::<i64>() {
                return LispExpr::num(n as f64);
            }
            if let Ok(n) = word.parse::<f64>() {
                return LispExpr::num(n);
            }
        }
        LispExpr::sym(word)
    }
}

// optional sign then a digit, or a '.' followed by a digit.
// Keeps words like 'inf' or 'NaN' as symbols.
fn looks_numeric(word: &str) -> bool {
    let unsigned = word.strip_prefix(&['+', '-'][..]).unwrap_or(word);
    let mut chars = unsigned.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => matches!(chars.next(), Some(c) if c.is_ascii_digit()),
        _ => false,
    }
}
