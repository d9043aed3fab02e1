//! Recursive-descent parser producing an [`Expr`] tree.
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('+' | '-') unary | atom
//! atom  := NUMBER | CELL | '(' expr ')'
//! ```

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::error::ParseError;
use super::lexer::{Spanned, Token, tokenize};
use super::position::Position;

pub(crate) fn parse_expression(text: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: text.len(),
    };
    if tokens.is_empty() {
        return Err(ParseError::new(0, "empty formula"));
    }
    let expr = parser.expr()?;
    if let Some(extra) = parser.peek() {
        return Err(ParseError::new(extra.offset, "unexpected trailing input"));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    end: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Spanned> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.peek().and_then(|t| match t.token {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            _ => None,
        }) {
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek().and_then(|t| match t.token {
            Token::Star => Some(BinaryOp::Mul),
            Token::Slash => Some(BinaryOp::Div),
            _ => None,
        }) {
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek().map(|t| &t.token) {
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Minus) => UnaryOp::Minus,
            _ => return self.atom(),
        };
        self.pos += 1;
        Ok(Expr::Unary(op, Box::new(self.unary()?)))
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        let Some(spanned) = self.next() else {
            return Err(ParseError::new(self.end, "unexpected end of formula"));
        };
        match &spanned.token {
            Token::Number(n) => Ok(Expr::Number(*n)),
            Token::Cell(name) => Ok(Expr::Cell(Position::parse(name).unwrap_or(Position::NONE))),
            Token::LParen => {
                let inner = self.expr()?;
                match self.next() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(ParseError::new(other.offset, "expected ')'")),
                    None => Err(ParseError::new(self.end, "missing ')'")),
                }
            }
            _ => Err(ParseError::new(spanned.offset, "expected a number, cell or '('")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(name: &str) -> Box<Expr> {
        Box::new(Expr::Cell(Position::parse(name).unwrap()))
    }

    #[test]
    fn test_precedence_and_associativity() {
        let expr = parse_expression("1-A1*B2-3").unwrap();
        assert_eq!(
            expr,
            Expr::Binary(
                BinaryOp::Sub,
                Box::new(Expr::Binary(
                    BinaryOp::Sub,
                    Box::new(Expr::Number(1.0)),
                    Box::new(Expr::Binary(BinaryOp::Mul, cell("A1"), cell("B2"))),
                )),
                Box::new(Expr::Number(3.0)),
            )
        );
    }

    #[test]
    fn test_unary_chain() {
        let expr = parse_expression("-+2").unwrap();
        assert_eq!(
            expr,
            Expr::Unary(
                UnaryOp::Minus,
                Box::new(Expr::Unary(UnaryOp::Plus, Box::new(Expr::Number(2.0))))
            )
        );
    }

    #[test]
    fn test_malformed_cell_becomes_none() {
        assert_eq!(parse_expression("A0").unwrap(), Expr::Cell(Position::NONE));
        assert_eq!(
            parse_expression("ABCD1").unwrap(),
            Expr::Cell(Position::NONE)
        );
    }

    #[test]
    fn test_syntax_errors() {
        assert!(parse_expression("").is_err());
        assert!(parse_expression("1+").is_err());
        assert!(parse_expression("(1").is_err());
        assert!(parse_expression("1)").is_err());
        assert!(parse_expression("*2").is_err());
        assert!(parse_expression("1 2").is_err());
        assert!(parse_expression("()").is_err());
    }
}
