use thiserror::Error;

#[derive(Error, PartialEq, Debug)]
pub enum EvalErr {
    /// Reader ran out of tokens or hit an unmatched `)`.
    #[error("malformed input: {0}")]
    Malformed(String),
    #[error("unbound symbol '{0}'")]
    UnknownSym(String),
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// A list primitive was asked to extend something that isn't a list.
    #[error("structural error: {0}")]
    Structural(String),
    #[error("arity mismatch: expected {expected} argument(s), got {got}")]
    ArityMismatch { expected: usize, got: usize },
    #[error("invalid {0} form")]
    InvalidForm(String),
}

pub type EvalResult<T> = Result<T, EvalErr>;
