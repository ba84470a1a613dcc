//! Rhai engine creation and formula evaluation.
//!
//! Rhai is the arithmetic back end: by the time an expression reaches it,
//! every cell reference has been replaced with a number. All of Rhai's
//! failure modes collapse into [`EvalError::EvaluationFailed`].

use rhai::Engine;

use super::cell_ref::CellRef;
use super::error::{EvalError, EvalResult};
use super::format::dynamic_to_number;
use super::preprocess::preprocess_formula;
use super::{AST, Dynamic};

/// Create a Rhai engine with built-ins registered.
pub fn create_engine() -> Engine {
    let mut engine = Engine::new();
    crate::builtins::register_builtins(&mut engine);
    engine
}

/// Evaluates formulas with the built-ins and any user-defined functions.
pub struct FormulaEvaluator {
    engine: Engine,
    custom_ast: Option<AST>,
}

impl FormulaEvaluator {
    pub fn new() -> Self {
        FormulaEvaluator {
            engine: create_engine(),
            custom_ast: None,
        }
    }

    /// Create an evaluator with user functions compiled from `custom_script`.
    ///
    /// Returns the Rhai compile error message if the script does not compile.
    pub fn with_functions(custom_script: &str) -> Result<Self, String> {
        let engine = create_engine();
        let ast = engine
            .compile(custom_script)
            .map_err(|e| format!("Error in custom functions: {}", e))?;
        Ok(FormulaEvaluator {
            engine,
            custom_ast: Some(ast),
        })
    }

    pub fn has_custom_functions(&self) -> bool {
        self.custom_ast.is_some()
    }

    /// Evaluate a fully numeric expression.
    pub fn eval_arithmetic(&self, expression: &str) -> EvalResult<f64> {
        let result: Dynamic = match &self.custom_ast {
            Some(custom_ast) => {
                let formula_ast = self
                    .engine
                    .compile_expression(expression)
                    .map_err(|e| EvalError::EvaluationFailed(e.to_string()))?;
                let merged = custom_ast.merge(&formula_ast);
                self.engine.eval_ast::<Dynamic>(&merged)
            }
            None => self.engine.eval_expression::<Dynamic>(expression),
        }
        .map_err(|e| EvalError::EvaluationFailed(e.to_string()))?;

        dynamic_to_number(&result)
    }

    /// Evaluate raw formula text (with its leading `=`).
    ///
    /// `resolve` supplies the value of every referenced cell; its failures are
    /// returned unchanged.
    pub fn evaluate<F>(&self, raw: &str, resolve: F) -> EvalResult<f64>
    where
        F: FnMut(&CellRef) -> EvalResult<f64>,
    {
        let expression = preprocess_formula(raw, resolve)?;
        log::debug!("evaluating {:?} as {:?}", raw, expression);
        self.eval_arithmetic(&expression)
    }
}

impl Default for FormulaEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_refs(r: &CellRef) -> EvalResult<f64> {
        panic!("unexpected reference {}", r)
    }

    #[test]
    fn test_evaluate_plain_arithmetic() {
        let evaluator = FormulaEvaluator::new();
        assert_eq!(evaluator.evaluate("=1+2*3", no_refs), Ok(7.0));
        assert_eq!(evaluator.evaluate("= 7/2", no_refs), Ok(3.5));
        assert_eq!(evaluator.evaluate("=(1+2)*3", no_refs), Ok(9.0));
        assert_eq!(evaluator.evaluate("=SQRT(9)", no_refs), Ok(3.0));
    }

    #[test]
    fn test_evaluate_exponent_literals() {
        let evaluator = FormulaEvaluator::new();
        assert_eq!(evaluator.evaluate("=1.5e3", no_refs), Ok(1500.0));
        assert_eq!(evaluator.evaluate("=2.5e-1*4", no_refs), Ok(1.0));
        assert_eq!(evaluator.evaluate("=1e3/8", no_refs), Ok(125.0));
    }

    #[test]
    fn test_evaluate_power_operator() {
        let evaluator = FormulaEvaluator::new();
        assert_eq!(evaluator.evaluate("=2^3", no_refs), Ok(8.0));
        assert_eq!(evaluator.evaluate("=B1^2 + 1", |_| Ok(-3.0)), Ok(10.0));
        assert_eq!(evaluator.evaluate("=4^0.5", no_refs), Ok(2.0));
    }

    #[test]
    fn test_evaluate_substitutes_references() {
        let evaluator = FormulaEvaluator::new();
        let result = evaluator.evaluate("=A1+B1", |r| Ok(if r.col == 0 { 2.0 } else { -5.0 }));
        assert_eq!(result, Ok(-3.0));
    }

    #[test]
    fn test_evaluate_failures_collapse_to_evaluation_failed() {
        let evaluator = FormulaEvaluator::new();
        for raw in ["=1/0", "=1+", "=", "=\"text\"", "=true", "=undefined_fn(1)"] {
            assert!(
                matches!(evaluator.evaluate(raw, no_refs), Err(EvalError::EvaluationFailed(_))),
                "expected EvaluationFailed for {raw:?}"
            );
        }
    }

    #[test]
    fn test_evaluate_propagates_resolve_errors() {
        let evaluator = FormulaEvaluator::new();
        let err = evaluator
            .evaluate("=A1+1", |r| Err(EvalError::CircularReference(r.clone())))
            .unwrap_err();
        assert_eq!(err, EvalError::CircularReference(CellRef::new(0, 0)));
    }

    #[test]
    fn test_custom_functions_are_callable() {
        let evaluator =
            FormulaEvaluator::with_functions("fn double(x) { x * 2.0 }").expect("compiles");
        assert!(evaluator.has_custom_functions());
        assert_eq!(evaluator.evaluate("=double(A1)", |_| Ok(21.0)), Ok(42.0));
    }

    #[test]
    fn test_custom_functions_compile_error_is_reported() {
        let err = FormulaEvaluator::with_functions("fn broken( {").err().expect("error");
        assert!(err.starts_with("Error in custom functions"));
    }
}
