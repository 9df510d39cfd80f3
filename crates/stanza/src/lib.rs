// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Toolkit for small, embeddable, line-oriented scripting languages.
//!
//! A host program declares a vocabulary of typed literals and operators,
//! then lexes, parses and executes text programs written against that
//! vocabulary, threading a host-supplied mutable context through every
//! operator call. There is no control flow, no user-defined functions and
//! no module system in the scripted language; it is deliberately tiny.
//!
//! All checking happens while the program is built: operator arity and
//! operand types are validated at parse time against signatures captured
//! when the host bound its functions. Evaluation itself has no error
//! channel; a bound operator that cannot complete reports through the
//! context (an error-log field, say) by convention.
//!
//! # Example
//!
//! A line that starts with a variable is an assignment to it; any other
//! line applies an operator. Operators may take the context, which remains
//! invisible in program syntax.
//!
//! ```
//! use stanza::{literals, Language, Seq, Val};
//!
//! #[derive(Default)]
//! struct Context {
//!     log: Vec<String>,
//! }
//!
//! fn smallest(ctx: &mut Context, numbers: Seq<i64>) -> i64 {
//!     ctx.log.push(format!("taking the min of {} numbers", numbers.len()));
//!     numbers.into_iter().min().unwrap_or(i64::MAX)
//! }
//!
//! fn plus(ctx: &mut Context, a: i64, b: i64) -> i64 {
//!     ctx.log.push(format!("added {a} and {b}"));
//!     a + b
//! }
//!
//! fn echo(ctx: &mut Context, value: Val) {
//!     ctx.log.push(format!("{value:?}"));
//! }
//!
//! // Define the language: operators and literal evaluators.
//! let mut lang = Language::<Context>::new();
//! lang.bind_operator("min", smallest);
//! lang.bind_operator("+", plus);
//! lang.bind_operator("echo", echo);
//! lang.bind_literal_evaluator(literals::parse_int);
//!
//! // Parse a program against the language...
//! let source = "$a min [2 3 4]\n\
//!               $b + $a 4\n\
//!               echo $b";
//! let mut program = stanza::parse(source, &lang).expect("program parses");
//!
//! // ...and run it against a context, any number of times.
//! let mut ctx = Context::default();
//! program.run(&mut ctx);
//! assert_eq!(ctx.log.last().unwrap(), "6");
//! ```
//!
//! # Crates
//!
//! The pipeline is split the way the stages depend on one another:
//! [`stanza_lexer`] (characters → tokens), [`stanza_ast`] (values, types,
//! nodes, programs), [`stanza_lang`] (the registry), [`stanza_parser`]
//! (tokens → program). This crate re-exports the lot and adds stock
//! literal evaluators in [`literals`].

pub mod literals;

pub use stanza_ast::{
    AnyValue, AtomValue, Capability, Node, NodeKind, OpFn, ParamSig, Program, ScriptType, Seq,
    TypeKey, Val, Value, ValueType, VarSlot, VarTable,
};
pub use stanza_lang::{IntoOperator, LangError, Language, OperatorDef};
pub use stanza_lexer::{Lexer, Token, TokenKind};
pub use stanza_parser::{parse, ParseError, Parser};
