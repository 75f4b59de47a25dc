//! Factorials and binomial coefficients.

use crate::builtin::{arg_or, Arity, Builtin};

/// The largest number of multiplications performed by [`Factorial`] or [`Ncr`] before giving up.
const MAX_TERMS: usize = 1_000_000;

/// The factorial function, with an optional step for double and triple factorials.
///
/// `factorial(x, step)` multiplies `x` by `x - step`, `x - 2 * step`, ... for as long as the term
/// stays positive. The result is `1` when `x` is zero and `NaN` when `x` is negative.
#[derive(Debug)]
pub struct Factorial;

impl Factorial {
    pub fn eval_static(x: f64, step: f64) -> f64 {
        if x.is_nan() || x < 0.0 || step.is_nan() || step <= 0.0 {
            return f64::NAN;
        }
        if x == 0.0 {
            return 1.0;
        }

        let mut result = x;
        let mut term = x - step;
        let mut count = 0;
        while term > 0.0 {
            result *= term;
            term -= step;

            // once infinite or zero, the result can no longer change
            if !result.is_normal() {
                return result;
            }

            count += 1;
            if count > MAX_TERMS {
                return f64::NAN;
            }
        }
        result
    }
}

impl Builtin for Factorial {
    fn name(&self) -> &'static str {
        "factorial"
    }

    fn arity(&self) -> Arity {
        Arity::between(1, 2)
    }

    fn eval(&self, args: &[f64]) -> f64 {
        Self::eval_static(arg_or(args, 0, f64::NAN), arg_or(args, 1, 1.0))
    }
}

/// The binomial coefficient `C(n, k)`, computed as the product of `(n - i) / (k - i)` for each
/// `i` in `0..k`.
#[derive(Debug)]
pub struct Ncr;

impl Ncr {
    pub fn eval_static(n: f64, k: f64) -> f64 {
        if !k.is_finite() || k > MAX_TERMS as f64 {
            return f64::NAN;
        }

        let mut result = 1.0;
        let mut i = 0.0;
        while i < k {
            result *= (n - i) / (k - i);
            i += 1.0;
        }
        result
    }
}

impl Builtin for Ncr {
    fn name(&self) -> &'static str {
        "C"
    }

    fn arity(&self) -> Arity {
        Arity::exactly(2)
    }

    fn eval(&self, args: &[f64]) -> f64 {
        Self::eval_static(arg_or(args, 0, f64::NAN), arg_or(args, 1, f64::NAN))
    }
}
