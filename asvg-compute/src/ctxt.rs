use crate::{consts, funcs};
use levenshtein::levenshtein;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A context to use when compiling an expression, containing the named values that can be used
/// within the expression.
///
/// Values in the context are copied into the compiled expression, so changing the context
/// afterwards does not affect expressions that were already compiled.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, f64>,
}

impl Default for Ctxt {
    fn default() -> Self {
        Self {
            vars: consts::ALL
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        }
    }
}

impl Ctxt {
    /// Creates a new empty context.
    ///
    /// The empty context does not contain any constants. Consider using the [`Default`]
    /// implementation instead.
    pub fn new() -> Ctxt {
        Ctxt {
            vars: HashMap::new(),
        }
    }

    /// Add a variable to the context.
    pub fn add_var(&mut self, name: &str, value: f64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Get the value of a variable in the context.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    /// Returns the variables in the context.
    pub fn get_vars(&self) -> &HashMap<String, f64> {
        &self.vars
    }

    /// Returns all variables in the context with a name similar to the given name.
    pub fn get_similar_vars(&self, name: &str) -> Vec<&str> {
        let mut similar = self.vars
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .map(String::as_str)
            .collect::<Vec<_>>();
        similar.sort_unstable();
        similar
    }

    /// Returns all builtin functions with a name similar to the given name.
    pub fn get_similar_funcs(&self, name: &str) -> Vec<&'static str> {
        let mut similar = funcs::BUILTINS
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .copied()
            .collect::<Vec<_>>();
        similar.sort_unstable();
        similar
    }
}
