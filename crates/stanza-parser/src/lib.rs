// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Recursive descent parser for Stanza programs.
//!
//! The parser consumes tokens from [`stanza_lexer::Lexer`] one at a time,
//! validates literals and operator applications against a
//! [`stanza_lang::Language`] as it recognizes them, and produces a
//! [`stanza_ast::Program`]: a root AST node plus a statically resolved
//! variable table.
//!
//! ## Grammar
//!
//! - Each logical statement occupies one line, or spans several if its
//!   operand list is wrapped in a single `( ... )` pair
//! - `$name <expr>` assigns; `<operator> <operand>*` applies and discards
//! - `# ...` comments and blank lines are ignored between statements
//! - `[e1 e2 ...]` is a homogeneous (possibly nested, possibly empty) list
//!
//! ## Errors
//!
//! Parsing stops at the first error and returns it with the offending line
//! number; there is no recovery. See [`ParseError`].
//!
//! # Examples
//!
//! ```
//! use stanza_lang::Language;
//! use stanza_parser::parse;
//!
//! struct Ctx;
//!
//! let mut lang = Language::<Ctx>::new();
//! lang.bind_operator("nop", |_: &mut Ctx| {});
//! lang.bind_literal_evaluator(|text: &str| text.parse::<i64>());
//!
//! let mut program = parse("# no-op\nnop", &lang).unwrap();
//! program.run(&mut Ctx);
//! ```

mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;

use stanza_ast::Program;
use stanza_lang::Language;
use stanza_lexer::Lexer;

/// Lex and parse `source` against `language`.
pub fn parse<C: 'static>(source: &str, language: &Language<C>) -> Result<Program<C>, ParseError> {
    Parser::new(Lexer::new(source), language).parse()
}
