// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! AST types, runtime values and the type foundation for Stanza.
//!
//! This crate contains everything the parser produces and the evaluator
//! consumes:
//!
//! - `types` — declared-type model: [`TypeKey`], [`ValueType`], [`ParamSig`]
//!   and the capability markers
//! - `value` — runtime values ([`Value`]) and the [`ScriptType`] trait host
//!   value types implement, with the [`Seq`] and [`Val`] parameter wrappers
//! - `node` — AST nodes and their evaluation
//! - `vars` — the per-program variable table
//! - `program` — the built, runnable [`Program`]
//!
//! Expected types are captured from [`ScriptType`] impls when a host binds
//! its vocabulary; matching at resolve time is identifier and capability
//! comparison, never runtime introspection.

pub mod node;
pub mod program;
pub mod types;
pub mod value;
pub mod vars;

// Re-export commonly used types
pub use node::{Node, NodeKind, OpFn};
pub use program::Program;
pub use types::{AnyValue, Capability, ParamSig, TypeKey, ValueType};
pub use value::{AtomValue, ScriptType, Seq, Val, Value};
pub use vars::{VarSlot, VarTable};
