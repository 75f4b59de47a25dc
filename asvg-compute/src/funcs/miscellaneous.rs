//! Miscellaneous functions.

use crate::builtin::{arg_or, Arity, Builtin};
use crate::funcs::round::Floor;
use rand::Rng;

build_unary! {
    "abs" Abs; f64::abs,
    "sign" Sign; |n: f64| {
        if n.is_nan() {
            n
        } else if n == 0.0 {
            0.0
        } else if n < 0.0 {
            -1.0
        } else {
            1.0
        }
    },
}

/// Folds every argument with `f`, returning `NaN` if any argument is `NaN`.
fn fold_args(args: &[f64], init: f64, f: fn(f64, f64) -> f64) -> f64 {
    args.iter().try_fold(init, |acc, &n| {
        if n.is_nan() {
            None
        } else {
            Some(f(acc, n))
        }
    })
        .unwrap_or(f64::NAN)
}

/// The smallest of the arguments, or infinity if there are none.
#[derive(Debug)]
pub struct Min;

impl Builtin for Min {
    fn name(&self) -> &'static str {
        "min"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(0)
    }

    fn eval(&self, args: &[f64]) -> f64 {
        fold_args(args, f64::INFINITY, f64::min)
    }
}

/// The largest of the arguments, or negative infinity if there are none.
#[derive(Debug)]
pub struct Max;

impl Builtin for Max {
    fn name(&self) -> &'static str {
        "max"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(0)
    }

    fn eval(&self, args: &[f64]) -> f64 {
        fold_args(args, f64::NEG_INFINITY, f64::max)
    }
}

/// A uniformly distributed random number in `[0, 1)`.
#[derive(Debug)]
pub struct Random;

impl Random {
    pub fn eval_static() -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

impl Builtin for Random {
    fn name(&self) -> &'static str {
        "random"
    }

    fn arity(&self) -> Arity {
        Arity::exactly(0)
    }

    fn eval(&self, _: &[f64]) -> f64 {
        Self::eval_static()
    }
}

/// A uniformly distributed random number between `min` and `max` (inclusive), with the given
/// number of decimal places (0 by default).
#[derive(Debug)]
pub struct Ran;

impl Ran {
    pub fn eval_static(min: f64, max: f64, decimals: f64) -> f64 {
        let scale = 10f64.powf(decimals);
        let value = (max + 1.0 / scale - min) * Random::eval_static() + min;
        Floor::eval_static(value * scale) / scale
    }
}

impl Builtin for Ran {
    fn name(&self) -> &'static str {
        "ran"
    }

    fn arity(&self) -> Arity {
        Arity::between(2, 3)
    }

    fn eval(&self, args: &[f64]) -> f64 {
        Self::eval_static(
            arg_or(args, 0, f64::NAN),
            arg_or(args, 1, f64::NAN),
            arg_or(args, 2, 0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    #[test]
    fn sign() {
        assert_float_absolute_eq!(Sign::eval_static(-3.0), -1.0);
        assert_float_absolute_eq!(Sign::eval_static(0.0), 0.0);
        assert_float_absolute_eq!(Sign::eval_static(0.1), 1.0);
    }

    #[test]
    fn min_max() {
        assert_float_absolute_eq!(Min.eval(&[3.0, -1.0, 2.0]), -1.0);
        assert_float_absolute_eq!(Max.eval(&[3.0, -1.0, 2.0]), 3.0);
        assert!(Max.eval(&[1.0, f64::NAN]).is_nan());
        assert_eq!(Min.eval(&[]), f64::INFINITY);
    }

    #[test]
    fn ran_stays_in_range() {
        for _ in 0..200 {
            let n = Ran::eval_static(-5.0, 5.0, 0.0);
            assert!((-5.0..=5.0).contains(&n));
            assert_eq!(n, n.trunc());

            let m = Ran::eval_static(0.0, 1.0, 1.0);
            assert!((0.0..=1.0 + 1e-9).contains(&m));
        }
    }
}
