//! All built-in functions available to expressions.
//!
//! Each function is implemented as a unit `struct` with an associated `eval_static` method, which
//! can be used to evaluate the function directly from Rust code. The [`Builtin`] trait is also
//! implemented for each function, so that it can be called by name from a compiled expression.
//!
//! # Example
//!
//! ```
//! use asvg_compute::funcs::{combinatoric::Factorial, trigonometry::Sin};
//!
//! assert_eq!(Factorial::eval_static(5.0, 1.0), 120.0);
//! assert_eq!(Sin::eval_static(0.0), 0.0);
//! ```

#[macro_use]
mod helper;

pub mod combinatoric;
pub mod miscellaneous;
pub mod power;
pub mod round;
pub mod trigonometry;

use crate::builtin::Builtin;
use once_cell::sync::Lazy;
use std::{collections::HashMap, sync::Arc};

/// Every builtin function, keyed by name.
pub static BUILTINS: Lazy<HashMap<&'static str, Arc<dyn Builtin>>> = Lazy::new(all);

/// Returns the builtin function with the given name, if it exists.
pub fn get(name: &str) -> Option<Arc<dyn Builtin>> {
    BUILTINS.get(name).cloned()
}

/// Returns a list of all builtin functions.
pub fn all() -> HashMap<&'static str, Arc<dyn Builtin>> {
    use combinatoric::*;
    use miscellaneous::*;
    use power::*;
    use round::*;
    use trigonometry::*;

    macro_rules! build {
        ($($name:literal $upname:ident),* $(,)?) => {
            [
                $(
                    ($name, Arc::new($upname) as Arc<dyn Builtin>),
                )*
            ]
                .into_iter()
                .collect()
        };
    }

    build! {
        // combinatoric
        "factorial" Factorial,
        "C" Ncr,

        // miscellaneous
        "abs" Abs,
        "sign" Sign,
        "min" Min,
        "max" Max,
        "random" Random,
        "ran" Ran,

        // power
        "pow" Pow,
        "sqrt" Sqrt,
        "exp" Exp,
        "ln" Ln,
        "log" Log,

        // round
        "floor" Floor,
        "ceil" Ceil,
        "round" Round,
        "chop" Chop,

        // trigonometry
        "sin" Sin,
        "cos" Cos,
        "tan" Tan,
        "sec" Sec,
        "csc" Csc,
        "cot" Cot,
        "arcsin" Asin,
        "arccos" Acos,
        "arctan" Atan,
        "asin" Asin,
        "acos" Acos,
        "atan" Atan,
        "arcsec" Asec,
        "arccsc" Acsc,
        "arccot" Acot,
        "sinh" Sinh,
        "cosh" Cosh,
        "tanh" Tanh,
        "sech" Sech,
        "csch" Csch,
        "coth" Coth,
        "arcsinh" Asinh,
        "arccosh" Acosh,
        "arctanh" Atanh,
        "arcsech" Asech,
        "arccsch" Acsch,
        "arccoth" Acoth,
    }
}
