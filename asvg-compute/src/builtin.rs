use std::fmt::Debug;

/// The number of arguments a builtin function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// The minimum number of arguments.
    pub min: usize,

    /// The maximum number of arguments, or [`None`] if the function is variadic.
    pub max: Option<usize>,
}

impl Arity {
    /// Exactly `n` arguments.
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    /// Between `min` and `max` arguments, inclusive.
    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    /// At least `min` arguments.
    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }
}

/// A function from the builtin library.
///
/// Arguments are checked against [`Builtin::arity`] when an expression is compiled, so
/// [`Builtin::eval`] can assume it receives an acceptable number of arguments. Missing optional
/// arguments are filled in with their defaults by the implementation.
pub trait Builtin: Debug + Send + Sync {
    /// The name of the function.
    fn name(&self) -> &'static str;

    /// The number of arguments the function accepts.
    fn arity(&self) -> Arity;

    /// Evaluates the function.
    fn eval(&self, args: &[f64]) -> f64;
}

/// Returns the argument at `index`, or `default` if it was not given.
pub fn arg_or(args: &[f64], index: usize, default: f64) -> f64 {
    args.get(index).copied().unwrap_or(default)
}
