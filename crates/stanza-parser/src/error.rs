//! Parse errors.
//!
//! Parsing stops at the first error; there is no recovery or multi-error
//! reporting. Every variant carries the offending token's 1-based source
//! line. Registry failures (unknown symbols, arity and type mismatches)
//! pass through transparently.

use stanza_lang::LangError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Language(#[from] LangError),

    #[error("line {line}: undeclared variable {name}")]
    UndeclaredVariable { name: String, line: u32 },

    #[error("line {line}: list elements must share one type, found {found} after {expected}")]
    MixedListTypes {
        expected: String,
        found: String,
        line: u32,
    },

    #[error("line {line}: list is missing its closing bracket")]
    UnclosedList { line: u32 },

    #[error("line {line}: unmatched parenthesis")]
    UnmatchedParenthesis { line: u32 },

    #[error("line {line}: statement ended before its parenthesis was closed")]
    MissingClosingParenthesis { line: u32 },

    #[error("line {line}: illegal token {token}")]
    IllegalToken { token: String, line: u32 },
}
