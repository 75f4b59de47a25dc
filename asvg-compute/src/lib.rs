//! Numerical evaluation of normalized math expressions.
//!
//! An expression is rewritten (see [`asvg_parser::rewrite`]), parsed, and then compiled against an
//! ordered list of parameter names into a [`CompiledExpr`](compile::CompiledExpr). Names are
//! resolved once, at compile time; evaluating the compiled expression is a pure function of its
//! arguments.
//!
//! ```
//! use asvg_compute::{compile::compile, ctxt::Ctxt};
//!
//! let f = compile("3x^2 + 1", &["x"], &Ctxt::default()).unwrap();
//! assert_eq!(f.eval(&[2.0]), 13.0);
//! ```

pub mod builtin;
pub mod compile;
pub mod consts;
pub mod ctxt;
pub mod funcs;
