//! Rounding functions.

use crate::builtin::{arg_or, Arity, Builtin};

build_unary! {
    "floor" Floor; f64::floor,
    "ceil" Ceil; f64::ceil,

    // halves round up, toward positive infinity
    "round" Round; |n: f64| (n + 0.5).floor(),
}

/// Truncates a number toward zero, keeping the given number of decimal places (0 by default).
#[derive(Debug)]
pub struct Chop;

impl Chop {
    pub fn eval_static(n: f64, decimals: f64) -> f64 {
        let scale = 10f64.powf(decimals);
        (n * scale).trunc() / scale
    }
}

impl Builtin for Chop {
    fn name(&self) -> &'static str {
        "chop"
    }

    fn arity(&self) -> Arity {
        Arity::between(1, 2)
    }

    fn eval(&self, args: &[f64]) -> f64 {
        Self::eval_static(arg_or(args, 0, f64::NAN), arg_or(args, 1, 0.0))
    }
}
