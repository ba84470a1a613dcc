//! Built-in spreadsheet functions (Rust).
//!
//! Conventions:
//! - Spreadsheet-facing built-in names are ALL CAPS (e.g. `SUM`, `AVG`).
//! - Names never contain digits, otherwise reference extraction would read
//!   them as cell addresses.
//! - Formulas reach Rhai with float literals, but user functions may still
//!   return integers, so scalar built-ins accept both.

use rhai::{Array, Dynamic, Engine, EvalAltResult, Position};

pub struct Builtin {
    pub name: &'static str,
    pub description: &'static str,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "ABS",
        description: "Absolute value",
    },
    Builtin {
        name: "SQRT",
        description: "Square root",
    },
    Builtin {
        name: "POW",
        description: "Raise a base to an exponent",
    },
    Builtin {
        name: "ROUND",
        description: "Round to the nearest integer, or to a number of decimal places",
    },
    Builtin {
        name: "FLOOR",
        description: "Round down",
    },
    Builtin {
        name: "CEIL",
        description: "Round up",
    },
    Builtin {
        name: "MIN",
        description: "Smaller of two values",
    },
    Builtin {
        name: "MAX",
        description: "Larger of two values",
    },
    Builtin {
        name: "SUM",
        description: "Sum of an array of values, e.g. SUM([A1, A2, A3])",
    },
    Builtin {
        name: "AVG",
        description: "Average of an array of values, e.g. AVG([A1, A2, A3])",
    },
];

fn to_f64(value: &Dynamic) -> Result<f64, Box<EvalAltResult>> {
    if let Ok(n) = value.as_float() {
        Ok(n)
    } else if let Ok(n) = value.as_int() {
        Ok(n as f64)
    } else {
        Err(Box::new(EvalAltResult::ErrorMismatchDataType(
            "number".to_string(),
            value.type_name().to_string(),
            Position::NONE,
        )))
    }
}

fn array_to_f64(values: &Array) -> Result<Vec<f64>, Box<EvalAltResult>> {
    values.iter().map(to_f64).collect()
}

/// Register all numeric built-ins on an engine.
pub fn register_builtins(engine: &mut Engine) {
    engine.register_fn("ABS", |x: f64| -> f64 { x.abs() });
    engine.register_fn("ABS", |x: i64| -> f64 { (x as f64).abs() });

    engine.register_fn("SQRT", |x: f64| -> f64 { x.sqrt() });
    engine.register_fn("SQRT", |x: i64| -> f64 { (x as f64).sqrt() });

    // POW(base, exp): handle all type combinations since user functions can
    // return ints
    engine.register_fn("POW", |base: f64, exp: f64| -> f64 { base.powf(exp) });
    engine.register_fn("POW", |base: f64, exp: i64| -> f64 {
        base.powf(exp as f64)
    });
    engine.register_fn("POW", |base: i64, exp: f64| -> f64 {
        (base as f64).powf(exp)
    });
    engine.register_fn("POW", |base: i64, exp: i64| -> f64 {
        (base as f64).powf(exp as f64)
    });

    engine.register_fn("ROUND", |x: f64| -> f64 { x.round() });
    engine.register_fn("ROUND", |x: f64, digits: f64| -> f64 {
        let factor = 10f64.powi(digits as i32);
        (x * factor).round() / factor
    });
    engine.register_fn("FLOOR", |x: f64| -> f64 { x.floor() });
    engine.register_fn("CEIL", |x: f64| -> f64 { x.ceil() });

    engine.register_fn("MIN", |a: f64, b: f64| -> f64 { a.min(b) });
    engine.register_fn("MAX", |a: f64, b: f64| -> f64 { a.max(b) });

    engine.register_fn("SUM", |values: Array| -> Result<f64, Box<EvalAltResult>> {
        Ok(array_to_f64(&values)?.iter().sum())
    });
    engine.register_fn("AVG", |values: Array| -> Result<f64, Box<EvalAltResult>> {
        let nums = array_to_f64(&values)?;
        if nums.is_empty() {
            return Err("AVG of an empty array".into());
        }
        Ok(nums.iter().sum::<f64>() / nums.len() as f64)
    });
}
