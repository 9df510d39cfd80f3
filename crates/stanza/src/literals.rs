//! Stock literal evaluators.
//!
//! Each evaluator is an ordinary `fn(&str) -> Result<T, E>` suitable for
//! [`Language::bind_literal_evaluator`](stanza_lang::Language::bind_literal_evaluator).
//! They fail cheaply on words that are not in their form, so later
//! evaluators can be tried. `parse_string` accepts everything; bind it last.

use std::fmt;
use std::num::ParseIntError;

use rand::Rng;
use thiserror::Error;

use stanza_ast::ScriptType;

/// Rejection reasons for the stock evaluators that pattern-match their
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("not a quoted string")]
    NotQuoted,
    #[error("not a rational")]
    NotRational,
    #[error("not a random int marker")]
    NotRandomInt,
}

/// Decimal integer literals.
pub fn parse_int(text: &str) -> Result<i64, ParseIntError> {
    text.parse()
}

/// Plain string literals; accepts every word unchanged.
pub fn parse_string(text: &str) -> Result<String, std::convert::Infallible> {
    Ok(text.to_string())
}

/// Double-quoted string literals; the quotes are stripped.
pub fn parse_quoted_string(text: &str) -> Result<String, LiteralError> {
    let inner = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or(LiteralError::NotQuoted)?;
    if inner.contains('"') {
        return Err(LiteralError::NotQuoted);
    }
    Ok(inner.to_string())
}

/// `<numerator>/<denominator>` rational literals, e.g. `355/113`.
pub fn parse_rational(text: &str) -> Result<Rational, LiteralError> {
    let (numerator, denominator) = text.split_once('/').ok_or(LiteralError::NotRational)?;
    if numerator.is_empty()
        || denominator.is_empty()
        || !numerator.bytes().all(|b| b.is_ascii_digit())
        || !denominator.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(LiteralError::NotRational);
    }
    let numerator = numerator.parse().map_err(|_| LiteralError::NotRational)?;
    let denominator = denominator.parse().map_err(|_| LiteralError::NotRational)?;
    Ok(Rational::new(numerator, denominator))
}

/// The marker `?int` draws a random integer once, at parse time; every run
/// of the program then sees the same constant.
pub fn parse_random_int(text: &str) -> Result<i64, LiteralError> {
    if text != "?int" {
        return Err(LiteralError::NotRandomInt);
    }
    Ok(rand::thread_rng().gen())
}

/// An exact rational in reduced canonical form: the denominator is positive
/// and shares no factor with the numerator. A zero denominator normalizes
/// to `0/1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        if denominator == 0 {
            return Rational {
                numerator: 0,
                denominator: 1,
            };
        }
        let sign = if (numerator < 0) != (denominator < 0) {
            -1
        } else {
            1
        };
        let numerator = numerator.unsigned_abs();
        let denominator = denominator.unsigned_abs();
        let divisor = gcd(numerator, denominator);
        Rational {
            numerator: sign * (numerator / divisor) as i64,
            denominator: (denominator / divisor) as i64,
        }
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl ScriptType for Rational {
    fn type_name() -> &'static str {
        "rational"
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a.max(1)
    } else {
        gcd(b, a % b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_literals() {
        for (input, expected) in [("", None), ("0", Some(0)), ("1", Some(1)), ("-4", Some(-4)), ("not a number", None)] {
            assert_eq!(parse_int(input).ok(), expected, "input {input:?}");
        }
    }

    #[test]
    fn string_literals_accept_everything() {
        for input in ["", "a string", "1"] {
            assert_eq!(parse_string(input).unwrap(), input);
        }
    }

    #[test]
    fn quoted_string_literals() {
        assert_eq!(parse_quoted_string("\"quoted string\""), Ok("quoted string".into()));
        assert_eq!(parse_quoted_string("\"\""), Ok(String::new()));
        for input in ["", "not quoted", "\"", "\"a\"b\"", "\"open"] {
            assert_eq!(parse_quoted_string(input), Err(LiteralError::NotQuoted), "input {input:?}");
        }
    }

    #[test]
    fn rational_literals() {
        let cases = [
            ("", None),
            (" 1/1", None),
            ("1/1", Some((1, 1))),
            ("2/2", Some((1, 1))),
            ("4/5", Some((4, 5))),
            ("0/0", Some((0, 1))),
            ("40/0", Some((0, 1))),
            ("0/5", Some((0, 1))),
            ("355/113", Some((355, 113))),
            ("-1/2", None),
            ("1/", None),
            ("/2", None),
        ];
        for (input, expected) in cases {
            let expected = expected.map(|(n, d)| Rational::new(n, d));
            assert_eq!(parse_rational(input).ok(), expected, "input {input:?}");
        }
    }

    #[test]
    fn rationals_reduce_to_canonical_form() {
        assert_eq!(Rational::new(2, 2), Rational::new(1, 1));
        assert_eq!(Rational::new(-4, -6), Rational::new(2, 3));
        assert_eq!(Rational::new(4, -6), Rational::new(-2, 3));
        assert_eq!(Rational::new(1, 2).to_string(), "1/2");
        assert_eq!(Rational::new(3, -9).to_string(), "-1/3");
    }

    #[test]
    fn rational_display_round_trips_through_the_evaluator() {
        let r = parse_rational("6/4").unwrap();
        assert_eq!(r.to_string(), "3/2");
        assert_eq!(parse_rational(&r.to_string()), Ok(r));
    }

    #[test]
    fn random_int_marker() {
        assert_eq!(parse_random_int("invalid"), Err(LiteralError::NotRandomInt));
        assert_eq!(parse_random_int("?integer"), Err(LiteralError::NotRandomInt));
        assert!(parse_random_int("?int").is_ok());
    }
}
