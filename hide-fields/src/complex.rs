//! A minimal complex number leaf.
//!
//! `Complex<f32>` and `Complex<f64>` are scalar leaves like any other number:
//! they can be hidden and synthesized from text such as `"1.5-2i"`.

use std::{fmt, str::FromStr};

/// A complex number with real part `re` and imaginary part `im`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex<T> {
    /// Real part.
    pub re: T,
    /// Imaginary part.
    pub im: T,
}

impl<T> Complex<T> {
    /// Creates a complex number from its parts.
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl<T: fmt::Display> fmt::Display for Complex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let im = self.im.to_string();
        if im.starts_with('-') {
            write!(f, "({}{im}i)", self.re)
        } else {
            write!(f, "({}+{im}i)", self.re)
        }
    }
}

/// Error returned when text is not a complex number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid complex number syntax")]
pub struct ParseComplexError;

fn parse_part(text: &str) -> Result<f64, ParseComplexError> {
    text.parse().map_err(|_| ParseComplexError)
}

/// Parses an imaginary coefficient, where a bare sign means one.
fn parse_imaginary(text: &str) -> Result<f64, ParseComplexError> {
    match text {
        "" | "+" => Ok(1.0),
        "-" => Ok(-1.0),
        _ => parse_part(text),
    }
}

/// Finds the sign that separates the real and imaginary parts.
///
/// Signs at the start of the text or directly after an exponent marker
/// belong to a number, not to the separator.
fn split_index(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    (1..bytes.len()).rev().find(|&index| {
        matches!(bytes[index], b'+' | b'-') && !matches!(bytes[index - 1], b'e' | b'E')
    })
}

impl FromStr for Complex<f64> {
    type Err = ParseComplexError;

    /// Accepts `a`, `bi`, `a+bi` and `a-bi`, optionally in parentheses.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text
            .strip_prefix('(')
            .and_then(|inner| inner.strip_suffix(')'))
            .unwrap_or(text);
        if text.is_empty() {
            return Err(ParseComplexError);
        }

        let Some(body) = text.strip_suffix('i') else {
            return Ok(Self::new(parse_part(text)?, 0.0));
        };

        match split_index(body) {
            Some(index) => Ok(Self::new(
                parse_part(&body[..index])?,
                parse_imaginary(&body[index..])?,
            )),
            None => Ok(Self::new(0.0, parse_imaginary(body)?)),
        }
    }
}
