// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for Stanza programs.
//!
//! This crate tokenizes line-oriented program text on demand: the parser pulls
//! one token at a time with [`Lexer::next_token`].
//!
//! # Design
//!
//! - `Token` — a token kind, its raw text (borrowed from the source), and the
//!   1-based line it was read from
//! - Newlines are significant statement terminators, never whitespace
//! - Comments (`#` to end of line) are emitted as tokens; skipping them is the
//!   parser's decision
//! - `(` `)` `[` `]` are self-delimiting single-character tokens, even when
//!   adjacent to word characters
//! - Once the input is exhausted, `next_token` returns [`TokenKind::Eof`]
//!   forever
//!
//! # Examples
//!
//! ```
//! use stanza_lexer::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("$a min [2 3]").collect();
//! assert_eq!(tokens[0].kind, TokenKind::Variable);
//! assert_eq!(tokens[0].text, "$a");
//! ```

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A bare literal word. Classification (number, quoted string, ...) is
    /// entirely the registered literal evaluators' concern.
    Word,
    /// A newline, terminating the current statement.
    Newline,
    /// A variable reference starting with `$`; the text includes the `$`.
    Variable,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// A `#` comment running to the end of its line (newline excluded).
    Comment,
    /// End of input; produced repeatedly once reached.
    Eof,
    /// A character the grammar has no use for (non-printable input).
    Invalid,
}

/// A single token: kind, source line, and the raw text it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// 1-based source line the token starts on. A newline token carries the
    /// line it terminates.
    pub line: u32,
    pub text: &'src str,
}

/// Streaming lexer over program source.
///
/// The cursor state is a byte position and a line counter; tokens borrow
/// their text from the source string.
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            done: false,
        }
    }

    /// Produce the next token. Returns an [`TokenKind::Eof`] token once the
    /// input is exhausted, and keeps returning it on every later call.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_blank();

        let line = self.line;
        let start = self.pos;

        let Some(ch) = self.peek() else {
            return Token {
                kind: TokenKind::Eof,
                line,
                text: "",
            };
        };

        let kind = match ch {
            '(' => {
                self.bump();
                TokenKind::LParen
            }
            ')' => {
                self.bump();
                TokenKind::RParen
            }
            '[' => {
                self.bump();
                TokenKind::LBracket
            }
            ']' => {
                self.bump();
                TokenKind::RBracket
            }
            '\n' => {
                self.bump();
                TokenKind::Newline
            }
            '#' => {
                self.scan_line();
                TokenKind::Comment
            }
            '$' => {
                self.bump();
                self.scan_word();
                TokenKind::Variable
            }
            c if is_word_char(c) => {
                self.scan_word();
                TokenKind::Word
            }
            _ => {
                self.bump();
                TokenKind::Invalid
            }
        };

        Token {
            kind,
            line,
            text: &self.source[start..self.pos],
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
            }
        }
    }

    /// Skip spaces, tabs and any other whitespace that is not a newline.
    fn skip_blank(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() && ch != '\n' {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Consume the rest of the current line, newline excluded.
    fn scan_line(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.bump();
        }
    }

    /// Consume the longest run of word characters.
    fn scan_word(&mut self) {
        while let Some(ch) = self.peek() {
            if is_word_char(ch) {
                self.bump();
            } else {
                break;
            }
        }
    }
}

/// Word characters are printable, non-space and self-delimit at brackets and
/// parentheses.
fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && !matches!(c, '(' | ')' | '[' | ']')
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    /// Yields every token including a single final Eof, then `None`.
    fn next(&mut self) -> Option<Token<'src>> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.done = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(TokenKind, &str)> {
        Lexer::new(source).map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn words_and_variables() {
        assert_eq!(
            lex("echo $a"),
            vec![
                (TokenKind::Word, "echo"),
                (TokenKind::Variable, "$a"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn brackets_self_delimit_without_spaces() {
        assert_eq!(
            lex("min[1 2]"),
            vec![
                (TokenKind::Word, "min"),
                (TokenKind::LBracket, "["),
                (TokenKind::Word, "1"),
                (TokenKind::Word, "2"),
                (TokenKind::RBracket, "]"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn parens_self_delimit_without_spaces() {
        assert_eq!(
            lex("+(4)"),
            vec![
                (TokenKind::Word, "+"),
                (TokenKind::LParen, "("),
                (TokenKind::Word, "4"),
                (TokenKind::RParen, ")"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn newline_is_a_token_not_whitespace() {
        assert_eq!(
            lex("a\nb"),
            vec![
                (TokenKind::Word, "a"),
                (TokenKind::Newline, "\n"),
                (TokenKind::Word, "b"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        assert_eq!(
            lex("# a comment [with] brackets\nx"),
            vec![
                (TokenKind::Comment, "# a comment [with] brackets"),
                (TokenKind::Newline, "\n"),
                (TokenKind::Word, "x"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn hash_inside_a_word_is_not_a_comment() {
        assert_eq!(lex("a#b"), vec![(TokenKind::Word, "a#b"), (TokenKind::Eof, "")]);
    }

    #[test]
    fn quoted_text_arrives_as_a_plain_word() {
        // Quoting is the literal evaluators' concern, not the lexer's.
        assert_eq!(
            lex("\"abc\""),
            vec![(TokenKind::Word, "\"abc\""), (TokenKind::Eof, "")]
        );
    }

    #[test]
    fn line_numbers_are_one_based() {
        let lines: Vec<(TokenKind, u32)> = Lexer::new("a\nb\n\nc")
            .map(|t| (t.kind, t.line))
            .collect();
        assert_eq!(
            lines,
            vec![
                (TokenKind::Word, 1),
                (TokenKind::Newline, 1),
                (TokenKind::Word, 2),
                (TokenKind::Newline, 2),
                (TokenKind::Newline, 3),
                (TokenKind::Word, 4),
                (TokenKind::Eof, 4),
            ]
        );
    }

    #[test]
    fn eof_repeats_forever() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Word);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn non_printable_input_is_invalid() {
        assert_eq!(
            lex("a \u{0} b"),
            vec![
                (TokenKind::Word, "a"),
                (TokenKind::Invalid, "\u{0}"),
                (TokenKind::Word, "b"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn carriage_return_and_tab_are_blank() {
        assert_eq!(
            lex("a\t b\r\n"),
            vec![
                (TokenKind::Word, "a"),
                (TokenKind::Word, "b"),
                (TokenKind::Newline, "\n"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn lone_dollar_is_a_variable_token() {
        assert_eq!(lex("$"), vec![(TokenKind::Variable, "$"), (TokenKind::Eof, "")]);
    }
}
