//! gridcalc_engine - Formula engine + Rhai integration.

pub mod builtins;
pub mod engine;
