//! reckon_engine - Cell addresses, formula grammar and evaluation.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    #[test]
    fn test_parse_evaluate_and_render() {
        let formula = Formula::parse(" ( A1 + 2 ) * B1 ").unwrap();
        assert_eq!(formula.expression(), "(A1+2)*B1");
        assert_eq!(
            formula.referenced_cells(),
            &[Position::new(0, 0), Position::new(0, 1)]
        );

        let resolver = |pos: Position| -> Result<f64, FormulaError> {
            Ok(if pos.col == 0 { 1.0 } else { 4.0 })
        };
        assert_eq!(formula.evaluate(&resolver), Ok(12.0));
    }

    #[test]
    fn test_rendered_text_reparses_to_same_value() {
        let resolver = |pos: Position| -> Result<f64, FormulaError> { Ok(pos.row as f64 + 2.0) };
        for text in ["1-(2-A3)", "-(A1+A2)/A4", "A1/(A2/A3)", "2*(3+A1)-+A2"] {
            let formula = Formula::parse(text).unwrap();
            let reparsed = Formula::parse(&formula.expression()).unwrap();
            assert_eq!(reparsed.expression(), formula.expression());
            assert_eq!(reparsed.evaluate(&resolver), formula.evaluate(&resolver));
        }
    }

    #[test]
    fn test_syntax_error_is_distinct_from_evaluation_error() {
        assert!(Formula::parse("1+").is_err());
        let formula = Formula::parse("1/0").unwrap();
        let zero = |_: Position| -> Result<f64, FormulaError> { Ok(0.0) };
        assert_eq!(formula.evaluate(&zero), Err(FormulaError::Div0));
    }

    #[test]
    fn test_formula_error_display() {
        assert_eq!(FormulaError::Ref.to_string(), "#REF!");
        assert_eq!(FormulaError::Value.to_string(), "#VALUE!");
        assert_eq!(FormulaError::Div0.to_string(), "#DIV/0!");
        assert_eq!(FormulaError::Div0.as_str(), "#DIV/0!");
    }
}
