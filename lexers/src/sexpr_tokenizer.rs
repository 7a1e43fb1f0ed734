#![deny(warnings)]

use crate::scanner::Scanner;


/// Splits s-expression source into paren and word tokens.
///
/// There are no string literals, escapes or comments: parens are padded
/// with spaces and the result is split on whitespace.
pub struct SexprTokenizer;

impl SexprTokenizer {
    pub fn tokenize(source: &str) -> Vec<String> {
        source
            .replace('(', " ( ")
            .replace(')', " ) ")
            .split_whitespace()
            .map(|t| t.to_string())
            .collect()
    }

    pub fn scanner(source: &str) -> Scanner<String> {
        Scanner::new(Self::tokenize(source))
    }
}

///////////////////////////////////////////////////////////////////////////////
