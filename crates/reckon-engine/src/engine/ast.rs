//! Expression tree for parsed formulas.

use std::fmt::{self, Write};

use super::error::FormulaError;
use super::position::Position;

/// Supplies the numeric value of a cited cell during evaluation.
pub trait Resolver {
    fn resolve(&self, pos: Position) -> Result<f64, FormulaError>;
}

impl<F> Resolver for F
where
    F: Fn(Position) -> Result<f64, FormulaError>,
{
    fn resolve(&self, pos: Position) -> Result<f64, FormulaError> {
        self(pos)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, FormulaError> {
        let result = match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => {
                if rhs == 0.0 {
                    return Err(FormulaError::Div0);
                }
                lhs / rhs
            }
        };
        finite(result)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    /// A cited cell; [`Position::NONE`] or any other invalid position
    /// evaluates to `#REF!`.
    Cell(Position),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

const ATOM_PRECEDENCE: u8 = 3;

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary(op, _, _) => op.precedence(),
            _ => ATOM_PRECEDENCE,
        }
    }

    /// Evaluate left to right; the first fault encountered wins.
    pub fn evaluate(&self, resolver: &dyn Resolver) -> Result<f64, FormulaError> {
        match self {
            Expr::Number(n) => finite(*n),
            Expr::Cell(pos) => {
                if !pos.is_valid() {
                    return Err(FormulaError::Ref);
                }
                resolver.resolve(*pos)
            }
            Expr::Unary(op, operand) => {
                let value = operand.evaluate(resolver)?;
                Ok(match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Minus => -value,
                })
            }
            Expr::Binary(op, lhs, rhs) => {
                let lhs = lhs.evaluate(resolver)?;
                let rhs = rhs.evaluate(resolver)?;
                op.apply(lhs, rhs)
            }
        }
    }

    /// Every cited position in source order, duplicates and invalid ones included.
    pub fn cells(&self, out: &mut Vec<Position>) {
        match self {
            Expr::Number(_) => {}
            Expr::Cell(pos) => out.push(*pos),
            Expr::Unary(_, operand) => operand.cells(out),
            Expr::Binary(_, lhs, rhs) => {
                lhs.cells(out);
                rhs.cells(out);
            }
        }
    }

    fn render(&self, out: &mut String) -> fmt::Result {
        match self {
            Expr::Number(n) => write_literal(*n, out),
            Expr::Cell(pos) => write!(out, "{}", pos),
            Expr::Unary(op, operand) => {
                out.write_char(match op {
                    UnaryOp::Plus => '+',
                    UnaryOp::Minus => '-',
                })?;
                render_child(operand, operand.precedence() < ATOM_PRECEDENCE, out)
            }
            Expr::Binary(op, lhs, rhs) => {
                let own = op.precedence();
                render_child(lhs, lhs.precedence() < own, out)?;
                out.write_char(op.symbol())?;
                let rhs_parens = rhs.precedence() < own
                    || (rhs.precedence() == own && matches!(op, BinaryOp::Sub | BinaryOp::Div));
                render_child(rhs, rhs_parens, out)
            }
        }
    }
}

fn render_child(child: &Expr, parens: bool, out: &mut String) -> fmt::Result {
    if parens {
        out.write_char('(')?;
        child.render(out)?;
        out.write_char(')')
    } else {
        child.render(out)
    }
}

/// Shortest text that parses back to exactly `value`.
fn write_literal(value: f64, out: &mut String) -> fmt::Result {
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-5..1e16).contains(&magnitude) {
        write!(out, "{}", value)
    } else {
        write!(out, "{:e}", value)
    }
}

fn finite(value: f64) -> Result<f64, FormulaError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::Div0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(&mut out)?;
        f.write_str(&out)
    }
}
