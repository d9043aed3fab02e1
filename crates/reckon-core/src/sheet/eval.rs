//! Formula cells: evaluation against the sheet, with a memoized result.

use std::cell::OnceCell;

use reckon_engine::engine::{Formula, FormulaError, ParseError, Position, Resolver};

use super::Sheet;
use super::cell::{Content, FORMULA_SIGN, unescape};

/// A parsed formula plus its cached result.
///
/// The cache is filled through a shared reference on first read and emptied
/// only through `&mut`, i.e. by the sheet while it holds exclusive access.
#[derive(Clone, Debug)]
pub struct FormulaCell {
    formula: Formula,
    cache: OnceCell<Result<f64, FormulaError>>,
}

impl FormulaCell {
    pub fn new(expression: &str) -> Result<FormulaCell, ParseError> {
        Ok(FormulaCell {
            formula: Formula::parse(expression)?,
            cache: OnceCell::new(),
        })
    }

    /// The cached result, evaluating first if nothing is cached.
    /// Faults are returned (and cached) as values.
    pub fn evaluate(&self, sheet: &Sheet) -> Result<f64, FormulaError> {
        *self
            .cache
            .get_or_init(|| self.formula.evaluate(&SheetResolver { sheet }))
    }

    pub fn cached(&self) -> Option<Result<f64, FormulaError>> {
        self.cache.get().copied()
    }

    pub fn reset_cache(&mut self) {
        self.cache.take();
    }

    pub fn text(&self) -> String {
        format!("{}{}", FORMULA_SIGN, self.formula.expression())
    }

    pub fn referenced_cells(&self) -> &[Position] {
        self.formula.referenced_cells()
    }

}

/// Reads cited cells as numbers.
struct SheetResolver<'a> {
    sheet: &'a Sheet,
}

impl Resolver for SheetResolver<'_> {
    fn resolve(&self, pos: Position) -> Result<f64, FormulaError> {
        if !pos.is_valid() {
            return Err(FormulaError::Ref);
        }
        let Some(cell) = self.sheet.get(pos) else {
            return Ok(0.0);
        };
        match cell.content() {
            Content::Empty => Ok(0.0),
            Content::Text(text) => text_to_number(unescape(text)),
            Content::Formula(formula) => formula.evaluate(self.sheet),
        }
    }
}

/// Interpret cell text as a number for arithmetic.
///
/// Empty text is zero. Otherwise the text must be an optional sign followed
/// by ASCII digits only; anything else (fractions, exponents, whitespace) is
/// `#VALUE!`.
pub(crate) fn text_to_number(text: &str) -> Result<f64, FormulaError> {
    if text.is_empty() {
        return Ok(0.0);
    }
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormulaError::Value);
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(FormulaError::Value),
    }
}
