use super::Dynamic;
use super::error::{EvalError, EvalResult};

/// Convert an evaluator result into a finite number.
pub fn dynamic_to_number(value: &Dynamic) -> EvalResult<f64> {
    let n = if let Ok(n) = value.as_float() {
        n
    } else if let Ok(n) = value.as_int() {
        n as f64
    } else {
        return Err(EvalError::EvaluationFailed(format!(
            "expression returned {} instead of a number",
            value.type_name()
        )));
    };

    if n.is_finite() {
        Ok(n)
    } else {
        Err(EvalError::EvaluationFailed(format!("non-finite result: {}", n)))
    }
}

/// Format a number for display.
///
/// Integral values print without a fraction; everything else prints the
/// shortest decimal that reads back to the same value.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Avoid "-0".
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_dynamic_to_number_rejects_non_numeric() {
        assert_eq!(dynamic_to_number(&Dynamic::from(4_i64)), Ok(4.0));
        assert_eq!(dynamic_to_number(&Dynamic::from(1.5_f64)), Ok(1.5));
        assert!(dynamic_to_number(&Dynamic::from("x".to_string())).is_err());
        assert!(dynamic_to_number(&Dynamic::from(true)).is_err());
        assert!(dynamic_to_number(&Dynamic::from(f64::INFINITY)).is_err());
        assert!(dynamic_to_number(&Dynamic::UNIT).is_err());
    }
}
