//! The recursive descent parser.

use stanza_ast::{Node, Program, ValueType, VarTable};
use stanza_lang::Language;
use stanza_lexer::{Lexer, Token, TokenKind};
use tracing::debug;

use crate::error::ParseError;

/// Single-token-lookahead recursive descent parser, driven by
/// statement-level dispatch.
///
/// The parser pulls tokens from the lexer on demand, consults the
/// [`Language`] registry to validate literals and operator applications as
/// it recognizes them, and resolves variable scope statically: a variable
/// can only be read once an assignment to it has been parsed.
pub struct Parser<'lang, 'src, C> {
    lexer: Lexer<'src>,
    language: &'lang Language<C>,
    current: Token<'src>,
    variables: VarTable,
}

impl<'lang, 'src, C: 'static> Parser<'lang, 'src, C> {
    pub fn new(mut lexer: Lexer<'src>, language: &'lang Language<C>) -> Self {
        let current = lexer.next_token();
        Parser {
            lexer,
            language,
            current,
            variables: VarTable::new(),
        }
    }

    /// Run the parser to completion, producing the [`Program`] or the first
    /// error.
    pub fn parse(mut self) -> Result<Program<C>, ParseError> {
        let mut statements = Vec::new();

        loop {
            match self.current.kind {
                // `$name <expr>`: assignment. The variable's declared type
                // becomes the expression's declared type.
                TokenKind::Variable => {
                    let name = self.current.text.to_string();
                    let expr = self.parse_expression()?;
                    self.variables.declare(name.clone(), expr.ty().cloned());
                    statements.push(Node::assign(name, expr));
                }
                // A bare operator application; its result, if any, is
                // discarded.
                TokenKind::Word => {
                    statements.push(self.parse_operation()?);
                }
                TokenKind::Newline | TokenKind::Comment => {}
                TokenKind::Eof => {
                    debug!(
                        statements = statements.len(),
                        variables = self.variables.len(),
                        "program parsed"
                    );
                    return Ok(Program::new(Node::root(statements), self.variables));
                }
                _ => return Err(self.illegal_token()),
            }
            self.advance();
        }
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// The right-hand side of an assignment: a variable reference, an
    /// operator application, or a list literal.
    fn parse_expression(&mut self) -> Result<Node<C>, ParseError> {
        self.advance();
        match self.current.kind {
            TokenKind::Variable => self.read_variable(),
            TokenKind::Word => self.parse_operation(),
            TokenKind::LBracket => self.parse_list(),
            _ => Err(self.illegal_token()),
        }
    }

    /// An operator application: operands follow the operator token until a
    /// statement terminator, unless wrapped in a single `( ... )` pair, in
    /// which case newlines inside the pair do not terminate the statement.
    fn parse_operation(&mut self) -> Result<Node<C>, ParseError> {
        let operator = self.current;
        self.advance();

        let mut operands = Vec::new();
        let mut paren_open = false;
        let mut paren_seen = false;

        loop {
            match self.current.kind {
                TokenKind::Variable => operands.push(self.read_variable()?),
                TokenKind::Word => {
                    operands.push(self.language.resolve_literal(&self.current)?);
                }
                TokenKind::LBracket => operands.push(self.parse_list()?),
                TokenKind::LParen => {
                    // one pair per statement
                    if paren_seen {
                        return Err(ParseError::UnmatchedParenthesis {
                            line: self.current.line,
                        });
                    }
                    paren_open = true;
                    paren_seen = true;
                }
                TokenKind::RParen => {
                    if !paren_open {
                        return Err(ParseError::UnmatchedParenthesis {
                            line: self.current.line,
                        });
                    }
                    paren_open = false;
                }
                TokenKind::Newline if paren_open => {}
                TokenKind::Eof if paren_open => {
                    return Err(ParseError::MissingClosingParenthesis {
                        line: self.current.line,
                    });
                }
                TokenKind::Newline | TokenKind::Eof => {
                    return Ok(self.language.resolve_operator(&operator, operands)?);
                }
                _ => return Err(self.illegal_token()),
            }
            self.advance();
        }
    }

    /// A `[ ... ]` list literal: elements are literal words or nested lists,
    /// unified to a single element type. `[]` produces the untyped-empty
    /// marker.
    fn parse_list(&mut self) -> Result<Node<C>, ParseError> {
        self.advance();

        let mut element: Option<ValueType> = None;
        let mut items = Vec::new();

        loop {
            match self.current.kind {
                TokenKind::Word => {
                    let node = self.language.resolve_literal(&self.current)?;
                    self.unify_element(&mut element, &node)?;
                    items.push(node);
                }
                TokenKind::LBracket => {
                    let node = self.parse_list()?;
                    self.unify_element(&mut element, &node)?;
                    items.push(node);
                }
                TokenKind::RBracket => return Ok(Node::list(element, items)),
                TokenKind::Newline | TokenKind::Eof => {
                    return Err(ParseError::UnclosedList {
                        line: self.current.line,
                    });
                }
                _ => return Err(self.illegal_token()),
            }
            self.advance();
        }
    }

    fn unify_element(
        &self,
        element: &mut Option<ValueType>,
        node: &Node<C>,
    ) -> Result<(), ParseError> {
        let ty = node
            .ty()
            .expect("BUG: list elements always carry a type")
            .clone();
        match element {
            Some(expected) if *expected != ty => Err(ParseError::MixedListTypes {
                expected: expected.to_string(),
                found: ty.to_string(),
                line: self.current.line,
            }),
            Some(_) => Ok(()),
            None => {
                *element = Some(ty);
                Ok(())
            }
        }
    }

    /// A variable in read position must already have been assigned to.
    fn read_variable(&self) -> Result<Node<C>, ParseError> {
        let name = self.current.text;
        match self.variables.slot(name) {
            Some(slot) => Ok(Node::read_var(name, slot.declared().cloned())),
            None => Err(ParseError::UndeclaredVariable {
                name: name.to_string(),
                line: self.current.line,
            }),
        }
    }

    fn illegal_token(&self) -> ParseError {
        ParseError::IllegalToken {
            token: describe_token(&self.current),
            line: self.current.line,
        }
    }
}

fn describe_token(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::Newline => "newline".to_string(),
        _ => format!("'{}'", token.text),
    }
}
