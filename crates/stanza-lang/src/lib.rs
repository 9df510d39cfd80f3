// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Language registry for Stanza.
//!
//! A [`Language`] holds the vocabulary a host grants to its programs:
//!
//! - an ordered list of *literal evaluators*, each trying to read a bare
//!   word as a typed constant (first success wins)
//! - a table of *operators*, each a host function whose calling signature
//!   was captured at bind time
//!
//! The parser consults the registry as it recognizes tokens:
//! [`Language::resolve_literal`] classifies words,
//! [`Language::resolve_operator`] arity- and type-checks applications and
//! produces the AST node that will invoke the bound function.
//!
//! # Binding
//!
//! ```
//! use stanza_lang::Language;
//!
//! struct Ctx { log: Vec<String> }
//!
//! fn plus(ctx: &mut Ctx, a: i64, b: i64) -> i64 {
//!     ctx.log.push(format!("added {a} and {b}"));
//!     a + b
//! }
//!
//! let mut lang = Language::<Ctx>::new();
//! lang.bind_operator("+", plus);
//! lang.bind_literal_evaluator(|text: &str| text.parse::<i64>());
//! ```
//!
//! Once binding is complete the registry is read-only; it can be shared by
//! reference across threads and outlives any number of parsed programs.

mod bind;
mod error;

pub use bind::{IntoOperator, OperatorDef};
pub use error::LangError;

use indexmap::IndexMap;
use tracing::{debug, trace};

use stanza_ast::{Node, ScriptType, Value, ValueType};
use stanza_lexer::Token;

type LiteralEvaluator = Box<dyn Fn(&str) -> Option<Value> + Send + Sync>;

struct LiteralBinding {
    declared: ValueType,
    evaluate: LiteralEvaluator,
}

/// The host-defined vocabulary: literal evaluators and operators, generic
/// over the host context type `C`.
pub struct Language<C> {
    operators: IndexMap<String, OperatorDef<C>>,
    literals: Vec<LiteralBinding>,
}

impl<C> Default for Language<C> {
    fn default() -> Self {
        Language {
            operators: IndexMap::new(),
            literals: Vec::new(),
        }
    }
}

impl<C: 'static> Language<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a literal evaluator.
    ///
    /// The evaluator should try to read `text` as a `T` and fail cheaply
    /// (no partial effects) when the word is not in the form it expects, so
    /// the next evaluator can be tried. Evaluators are consulted in binding
    /// order; duplicates and overlaps are allowed, order is precedence.
    pub fn bind_literal_evaluator<T, E, F>(&mut self, evaluator: F)
    where
        T: ScriptType,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let declared = T::value_type();
        debug!(ty = %declared, "literal evaluator bound");
        self.literals.push(LiteralBinding {
            declared,
            evaluate: Box::new(move |text: &str| evaluator(text).ok().map(T::into_value)),
        });
    }

    /// Register `function` as the operator named `symbol`, replacing any
    /// previous binding of the same symbol.
    ///
    /// `function` may take a leading `&mut C` context parameter (threaded
    /// through every invocation, invisible in program syntax), up to eight
    /// [`ScriptType`] operands, and may return a [`ScriptType`] result;
    /// without a return value the operator is a void statement.
    pub fn bind_operator<F, M>(&mut self, symbol: impl Into<String>, function: F)
    where
        F: IntoOperator<C, M>,
    {
        let symbol = symbol.into();
        let def = function.into_operator();
        debug!(
            symbol = %symbol,
            arity = def.arity(),
            result = ?def.result(),
            "operator bound"
        );
        self.operators.insert(symbol, def);
    }

    /// Classify a bare word token through the literal evaluators, first
    /// success wins.
    pub fn resolve_literal(&self, token: &Token<'_>) -> Result<Node<C>, LangError> {
        for binding in &self.literals {
            if let Some(value) = (binding.evaluate)(token.text) {
                trace!(literal = token.text, ty = %binding.declared, "literal resolved");
                return Ok(Node::constant(binding.declared.clone(), value));
            }
        }
        Err(LangError::UnknownLiteral {
            literal: token.text.to_string(),
            line: token.line,
        })
    }

    /// Check an operator application and produce its AST node.
    ///
    /// Fails if the symbol is unknown, the operand count differs from the
    /// bound arity, or any operand's declared type fails exact, sequence or
    /// capability matching for its position.
    pub fn resolve_operator(
        &self,
        token: &Token<'_>,
        operands: Vec<Node<C>>,
    ) -> Result<Node<C>, LangError> {
        let symbol = token.text;
        let Some(def) = self.operators.get(symbol) else {
            return Err(LangError::UnknownOperator {
                symbol: symbol.to_string(),
                line: token.line,
            });
        };

        if def.arity() != operands.len() {
            return Err(LangError::OperandCountMismatch {
                symbol: symbol.to_string(),
                expected: def.arity(),
                found: operands.len(),
                line: token.line,
            });
        }

        for (index, (param, operand)) in def.params().iter().zip(&operands).enumerate() {
            if !param.admits(operand.ty()) {
                return Err(LangError::OperandTypeMismatch {
                    symbol: symbol.to_string(),
                    index,
                    expected: param.to_string(),
                    found: describe(operand.ty()),
                    line: token.line,
                });
            }
        }

        trace!(symbol, operands = operands.len(), "operator application resolved");
        Ok(Node::apply(
            symbol,
            def.result.clone(),
            std::sync::Arc::clone(&def.invoke),
            operands,
        ))
    }

    /// Look up a bound operator's definition.
    pub fn operator(&self, symbol: &str) -> Option<&OperatorDef<C>> {
        self.operators.get(symbol)
    }

    /// Bound operator symbols, in binding order.
    pub fn operator_symbols(&self) -> impl Iterator<Item = &str> {
        self.operators.keys().map(String::as_str)
    }

    /// Number of bound literal evaluators.
    pub fn literal_evaluators(&self) -> usize {
        self.literals.len()
    }
}

fn describe(ty: Option<&ValueType>) -> String {
    match ty {
        Some(ty) => ty.to_string(),
        None => "no value".to_string(),
    }
}
