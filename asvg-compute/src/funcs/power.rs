//! Power, root and logarithm functions.

use crate::builtin::{arg_or, Arity, Builtin};

build_unary! {
    "sqrt" Sqrt; f64::sqrt,
    "exp" Exp; f64::exp,
    "ln" Ln; f64::ln,
    "log" Log; f64::ln,
}

/// Raises the first argument to the power of the second.
#[derive(Debug)]
pub struct Pow;

impl Pow {
    pub fn eval_static(base: f64, exponent: f64) -> f64 {
        base.powf(exponent)
    }
}

impl Builtin for Pow {
    fn name(&self) -> &'static str {
        "pow"
    }

    fn arity(&self) -> Arity {
        Arity::exactly(2)
    }

    fn eval(&self, args: &[f64]) -> f64 {
        Self::eval_static(arg_or(args, 0, f64::NAN), arg_or(args, 1, f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    #[test]
    fn log_is_natural() {
        assert_float_absolute_eq!(Log::eval_static(std::f64::consts::E), 1.0);
        assert_float_absolute_eq!(Ln::eval_static(1.0), 0.0);
    }

    #[test]
    fn pow() {
        assert_float_absolute_eq!(Pow::eval_static(2.0, 10.0), 1024.0);
        assert_float_absolute_eq!(Pow::eval_static(-8.0, 2.0), 64.0);
        assert!(Pow::eval_static(-8.0, 0.5).is_nan());
    }
}
