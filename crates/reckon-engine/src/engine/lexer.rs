//! Tokenizer for formula text.

use super::error::ParseError;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    /// A cell address exactly as written, e.g. "B12".
    Cell(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// A token together with the byte offset where it starts.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub offset: usize,
}

pub(crate) fn tokenize(text: &str) -> Result<Vec<Spanned>, ParseError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;
        let token = match c {
            b' ' | b'\t' | b'\r' | b'\n' => {
                i += 1;
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'0'..=b'9' | b'.' => {
                i = scan_number(bytes, i)?;
                let literal = &text[start..i];
                let value = literal
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        ParseError::new(start, format!("invalid number literal '{}'", literal))
                    })?;
                tokens.push(Spanned {
                    token: Token::Number(value),
                    offset: start,
                });
                continue;
            }
            b'A'..=b'Z' => {
                while i < bytes.len() && bytes[i].is_ascii_uppercase() {
                    i += 1;
                }
                let digits_start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if digits_start == i {
                    return Err(ParseError::new(
                        start,
                        format!("expected a row number after '{}'", &text[start..i]),
                    ));
                }
                tokens.push(Spanned {
                    token: Token::Cell(text[start..i].to_string()),
                    offset: start,
                });
                continue;
            }
            _ => {
                let ch = text[start..].chars().next().unwrap_or('?');
                return Err(ParseError::new(
                    start,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };
        tokens.push(Spanned {
            token,
            offset: start,
        });
        i += 1;
    }

    Ok(tokens)
}

/// Scan `digits [. digits] [e [+-] digits]` (or `. digits ...`) starting at
/// `start`, returning the end offset.
fn scan_number(bytes: &[u8], start: usize) -> Result<usize, ParseError> {
    let mut i = start;
    let mut mantissa_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return Err(ParseError::new(start, "expected digits in number"));
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let exp_start = i;
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if digits_start == i {
            return Err(ParseError::new(exp_start, "expected digits in exponent"));
        }
    }
    Ok(i)
}
