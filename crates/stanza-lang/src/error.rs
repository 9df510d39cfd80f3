//! Registry resolution errors.

use thiserror::Error;

/// Errors raised while resolving tokens against the registry. All are
/// parse-time failures and carry the offending token's source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LangError {
    #[error("line {line}: unknown literal '{literal}'")]
    UnknownLiteral { literal: String, line: u32 },

    #[error("line {line}: unknown operator '{symbol}'")]
    UnknownOperator { symbol: String, line: u32 },

    #[error("line {line}: operator {symbol} expected {expected} operands, got {found}")]
    OperandCountMismatch {
        symbol: String,
        expected: usize,
        found: usize,
        line: u32,
    },

    #[error("line {line}: operand {index} of operator {symbol} expects {expected}, got {found}")]
    OperandTypeMismatch {
        symbol: String,
        index: usize,
        expected: String,
        found: String,
        line: u32,
    },
}
