//! Text front end for asvg drawing scripts.
//!
//! - [`tokenizer`] splits source text into tokens.
//! - [`rewrite`] normalizes calculator-style shorthand (`2x`, `x^2`, `n!`, `sin^-1`) into plain
//!   function-call notation.
//! - [`parser`] parses a normalized expression into an [`Expr`](parser::expr::Expr) tree.
//! - [`script`] parses a drawing script into a list of statements.

pub mod parser;
pub mod rewrite;
pub mod script;
pub mod tokenizer;
