use super::ast::{Expr, Resolver};
use super::error::{FormulaError, ParseError};
use super::parser::parse_expression;
use super::position::Position;

/// A parsed formula: the expression tree plus its distinct valid references.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    expr: Expr,
    referenced: Vec<Position>,
}

impl Formula {
    /// Parse formula text (without the leading `=`).
    pub fn parse(text: &str) -> Result<Formula, ParseError> {
        let expr = parse_expression(text)?;
        let mut referenced = Vec::new();
        expr.cells(&mut referenced);
        referenced.retain(Position::is_valid);
        referenced.sort();
        referenced.dedup();
        Ok(Formula { expr, referenced })
    }

    pub fn evaluate(&self, resolver: &dyn Resolver) -> Result<f64, FormulaError> {
        self.expr.evaluate(resolver)
    }

    /// Cited positions, sorted and deduplicated, invalid ones left out.
    pub fn referenced_cells(&self) -> &[Position] {
        &self.referenced
    }

    /// Canonical text of the formula, without the leading `=`.
    pub fn expression(&self) -> String {
        self.expr.to_string()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_cells(_: Position) -> Result<f64, FormulaError> {
        Ok(0.0)
    }

    fn eval(text: &str) -> Result<f64, FormulaError> {
        Formula::parse(text).unwrap().evaluate(&no_cells)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("1+2*3"), Ok(7.0));
        assert_eq!(eval("(1+2)*3"), Ok(9.0));
        assert_eq!(eval("10-4-3"), Ok(3.0));
        assert_eq!(eval("8/2/2"), Ok(2.0));
        assert_eq!(eval("-(2+3)"), Ok(-5.0));
        assert_eq!(eval("+4"), Ok(4.0));
    }

    #[test]
    fn test_division_faults() {
        assert_eq!(eval("1/0"), Err(FormulaError::Div0));
        assert_eq!(eval("0/0"), Err(FormulaError::Div0));
        assert_eq!(eval("1e308*10"), Err(FormulaError::Div0));
    }

    #[test]
    fn test_invalid_reference_is_ref_error() {
        assert_eq!(eval("A0+1"), Err(FormulaError::Ref));
        assert_eq!(eval("XFE1"), Err(FormulaError::Ref));
        assert_eq!(eval("A16385*0"), Err(FormulaError::Ref));
    }

    #[test]
    fn test_first_fault_wins() {
        let resolver = |pos: Position| {
            if pos == Position::new(0, 0) {
                Err(FormulaError::Value)
            } else {
                Ok(1.0)
            }
        };
        let formula = Formula::parse("1/0+A1").unwrap();
        assert_eq!(formula.evaluate(&resolver), Err(FormulaError::Div0));
        let formula = Formula::parse("A1+1/0").unwrap();
        assert_eq!(formula.evaluate(&resolver), Err(FormulaError::Value));
    }

    #[test]
    fn test_resolver_supplies_cells() {
        let resolver = |pos: Position| Ok::<f64, FormulaError>((pos.row * 10 + pos.col) as f64);
        let formula = Formula::parse("B3+C1").unwrap();
        assert_eq!(formula.evaluate(&resolver), Ok(21.0 + 2.0));
    }

    #[test]
    fn test_referenced_cells_sorted_distinct_valid() {
        let formula = Formula::parse("C1+A2+B1+A2+XFE1+A0").unwrap();
        assert_eq!(
            formula.referenced_cells(),
            &[Position::new(0, 1), Position::new(0, 2), Position::new(1, 0)]
        );
        assert!(Formula::parse("1+2").unwrap().referenced_cells().is_empty());
    }

    #[test]
    fn test_canonical_expression() {
        let cases = [
            ("1 + 2", "1+2"),
            ("(1+2)+3", "1+2+3"),
            ("1+(2+3)", "1+2+3"),
            ("1-(2-3)", "1-(2-3)"),
            ("1-(2+3)", "1-(2+3)"),
            ("(1*2)+3", "1*2+3"),
            ("(1+2)*3", "(1+2)*3"),
            ("2/(3*4)", "2/(3*4)"),
            ("2*(3/4)", "2*3/4"),
            ("-(1+2)", "-(1+2)"),
            ("-(A1)", "-A1"),
            ("((B2))", "B2"),
            ("1.50", "1.5"),
            ("0.1234567*1000000", "0.1234567*1000000"),
            ("1e20+1.5e-7", "1e20+1.5e-7"),
            ("2.5E-3", "0.0025"),
            ("A0+1", "#REF!+1"),
        ];
        for (input, expected) in cases {
            assert_eq!(Formula::parse(input).unwrap().expression(), expected, "{input}");
        }
    }
}
