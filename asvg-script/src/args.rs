//! Evaluation of command arguments.
//!
//! Arguments are evaluated lazily, when a command asks for them with the type it expects. This
//! way, the first argument of `plot` can be read as the source text of a function of `x`, which
//! could not be evaluated as a number.

use asvg_compute::{compile::evaluate, ctxt::Ctxt};
use asvg_error::Error;
use asvg_graph::UnitPoint;
use asvg_parser::{rewrite::ExponentPolicy, script::Arg};
use crate::{
    error::{MissingArgument, WrongType},
    value::Value,
};
use std::{collections::HashMap, ops::Range, str::FromStr};

/// Returns true if the text is a single name, such as `p1`.
fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The environment arguments are evaluated in.
#[derive(Debug)]
pub struct Env<'a> {
    /// The script variables.
    pub vars: &'a HashMap<String, Value>,

    /// The numeric values visible to math expressions.
    pub ctxt: Ctxt,

    /// How `^` and `!` are resolved in math expressions.
    pub policy: ExponentPolicy,
}

impl Env<'_> {
    /// Evaluates an argument.
    ///
    /// Raw text is `null`, `true`, `false`, the name of a variable, or else a math expression
    /// evaluated to a number. Errors in a math expression are reported on the whole argument.
    pub fn eval(&self, arg: &Arg) -> Result<Value, Error> {
        match arg {
            Arg::Str { value, .. } => Ok(Value::Str(value.clone())),
            Arg::List { items, .. } => Ok(Value::List(
                items.iter().map(|item| self.eval(item)).collect::<Result<_, _>>()?,
            )),
            Arg::Raw { source, span } => match source.as_str() {
                "null" => Ok(Value::Null),
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                name if is_name(name) && self.vars.contains_key(name) => Ok(self.vars[name].clone()),
                _ => evaluate(source, &self.ctxt, self.policy)
                    .map(Value::Number)
                    .map_err(|err| err.relocate(span.clone())),
            },
        }
    }

    /// Returns the source text of a math expression given as an argument: the text of a string,
    /// the text of a raw argument, or the string held by the variable a raw argument names.
    fn source(&self, arg: &Arg) -> Option<String> {
        match arg {
            Arg::Str { value, .. } => Some(value.clone()),
            Arg::Raw { source, .. } => match self.vars.get(source.as_str()) {
                Some(Value::Str(s)) => Some(s.clone()),
                Some(_) => None,
                None => Some(source.clone()),
            },
            Arg::List { .. } => None,
        }
    }
}

/// The source text of the function given to `plot` or `slopefield`.
#[derive(Clone, Debug, PartialEq)]
pub enum FunctionSource {
    /// A single expression.
    Explicit(String),

    /// A pair of expressions `[x(t), y(t)]`.
    Parametric(String, String),
}

/// The arguments of a command call.
#[derive(Debug)]
pub struct Args<'a> {
    /// The name of the command.
    pub name: &'a str,

    /// The arguments, as parsed.
    pub args: &'a [Arg],

    /// The span of the whole call.
    pub span: Range<usize>,

    pub env: &'a Env<'a>,
}

impl Args<'_> {
    /// Returns the span of the argument at `index`, or of the whole call if it was not given.
    pub fn span(&self, index: usize) -> Range<usize> {
        self.args.get(index).map_or_else(|| self.span.clone(), Arg::span)
    }

    /// Returns true if the argument at `index` was given and is not `null`.
    pub fn is_given(&self, index: usize) -> Result<bool, Error> {
        Ok(self.value(index)? != Value::Null)
    }

    /// Evaluates the argument at `index`. Arguments that were not given are `null`.
    pub fn value(&self, index: usize) -> Result<Value, Error> {
        match self.args.get(index) {
            Some(arg) => self.env.eval(arg),
            None => Ok(Value::Null),
        }
    }

    fn wrong_type(&self, index: usize, expected: &'static str, found: &Value) -> Error {
        Error::new(vec![self.span(index)], WrongType {
            context: self.name.to_string(),
            expected,
            found: found.describe(),
        })
    }

    fn missing(&self, index: usize) -> Error {
        Error::new(vec![self.span.clone()], MissingArgument {
            name: self.name.to_string(),
            index,
            expected: index + 1,
            given: self.args.len(),
        })
    }

    /// Evaluates an optional argument, converting it with `convert` unless it is `null`.
    fn opt<T>(
        &self,
        index: usize,
        expected: &'static str,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<Option<T>, Error> {
        let value = self.value(index)?;
        if value == Value::Null {
            return Ok(None);
        }
        match convert(&value) {
            Some(converted) => Ok(Some(converted)),
            None => Err(self.wrong_type(index, expected, &value)),
        }
    }

    pub fn opt_number(&self, index: usize) -> Result<Option<f64>, Error> {
        self.opt(index, "a number", Value::as_number)
    }

    pub fn number(&self, index: usize) -> Result<f64, Error> {
        self.opt_number(index)?.ok_or_else(|| self.missing(index))
    }

    pub fn opt_point(&self, index: usize) -> Result<Option<UnitPoint>, Error> {
        self.opt(index, "a point `[x, y]`", Value::as_point)
    }

    pub fn point(&self, index: usize) -> Result<UnitPoint, Error> {
        self.opt_point(index)?.ok_or_else(|| self.missing(index))
    }

    pub fn points(&self, index: usize) -> Result<Vec<UnitPoint>, Error> {
        self.opt(index, "a list of points", Value::as_points)?
            .ok_or_else(|| self.missing(index))
    }

    /// Evaluates an optional argument as text. Numbers are formatted.
    pub fn opt_string(&self, index: usize) -> Result<Option<String>, Error> {
        self.opt(index, "a string", |value| match value {
            Value::Str(s) => Some(s.clone()),
            Value::Number(_) => Some(value.to_string()),
            _ => None,
        })
    }

    /// Evaluates an argument as any text to display.
    pub fn text(&self, index: usize) -> Result<String, Error> {
        self.opt(index, "text", |value| Some(value.to_string()))?
            .ok_or_else(|| self.missing(index))
    }

    /// Evaluates an optional argument as text, then parses it. Parse errors are reported on the
    /// argument.
    pub fn opt_parse<T>(&self, index: usize) -> Result<Option<T>, Error>
    where
        T: FromStr<Err = Error>,
    {
        match self.opt_string(index)? {
            Some(s) => s.parse().map(Some).map_err(|err: Error| err.relocate(self.span(index))),
            None => Ok(None),
        }
    }

    /// Reads the argument at `index` as the source text of a function.
    pub fn function(&self, index: usize) -> Result<FunctionSource, Error> {
        let arg = self.args.get(index).ok_or_else(|| self.missing(index))?;
        if let Arg::List { items, .. } = arg {
            if let [x, y] = items.as_slice() {
                if let (Some(x), Some(y)) = (self.env.source(x), self.env.source(y)) {
                    return Ok(FunctionSource::Parametric(x, y));
                }
            }
        } else if let Some(source) = self.env.source(arg) {
            return Ok(FunctionSource::Explicit(source));
        }

        let found = self.value(index).unwrap_or(Value::Null);
        Err(self.wrong_type(index, "an expression, or a pair of expressions", &found))
    }
}

#[cfg(test)]
mod tests {
    use asvg_error::Category;
    use asvg_parser::script::{parse_script, Stmt};
    use pretty_assertions::assert_eq;
    use super::*;

    fn call_args(src: &str) -> Vec<Arg> {
        match parse_script(src).unwrap().stmts.remove(0) {
            Stmt::Call(call) => call.args,
            other => panic!("expected a call, found {:?}", other),
        }
    }

    fn env(vars: &HashMap<String, Value>) -> Env<'_> {
        let mut ctxt = Ctxt::default();
        for (name, value) in vars {
            if let Value::Number(n) = value {
                ctxt.add_var(name, *n);
            }
        }
        Env { vars, ctxt, policy: ExponentPolicy::default() }
    }

    #[test]
    fn evaluate_raw_arguments() {
        let mut vars = HashMap::new();
        vars.insert("a".to_string(), Value::Number(2.0));
        vars.insert("p".to_string(), Value::List(vec![Value::Number(1.0), Value::Number(2.0)]));
        let env = env(&vars);

        let parsed = call_args("f(2a + 1, p, null, true, 'hi', [a, -a])");
        let values = parsed.iter().map(|arg| env.eval(arg).unwrap()).collect::<Vec<_>>();
        assert_eq!(values, vec![
            Value::Number(5.0),
            Value::List(vec![Value::Number(1.0), Value::Number(2.0)]),
            Value::Null,
            Value::Bool(true),
            Value::Str("hi".to_string()),
            Value::List(vec![Value::Number(2.0), Value::Number(-2.0)]),
        ]);
    }

    #[test]
    fn math_errors_cover_the_argument() {
        let vars = HashMap::new();
        let env = env(&vars);
        let parsed = call_args("f(1, 2 + q)");
        let err = env.eval(&parsed[1]).unwrap_err();
        assert_eq!(err.category(), Category::Evaluation);
        assert_eq!(err.spans, vec![5..10]);
    }

    #[test]
    fn typed_access() {
        let vars = HashMap::new();
        let env = env(&vars);
        let parsed = call_args("line([0, 1], 3, null)");
        let args = Args { name: "line", args: &parsed, span: 0..21, env: &env };

        assert_eq!(args.point(0).unwrap(), UnitPoint(0.0, 1.0));
        assert_eq!(args.opt_point(2).unwrap(), None);
        assert_eq!(args.opt_point(5).unwrap(), None);
        assert_eq!(args.opt_string(1).unwrap(), Some("3".to_string()));

        let err = args.point(1).unwrap_err();
        assert_eq!(err.kind.message(), "expected a point `[x, y]`, found a number");
        assert_eq!(err.spans, vec![13..14]);

        let err = args.point(2).unwrap_err();
        assert_eq!(err.kind.message(), "missing argument #3 for the `line` command");
    }

    #[test]
    fn function_sources() {
        let mut vars = HashMap::new();
        vars.insert("f".to_string(), Value::Str("x^2".to_string()));
        let env = env(&vars);
        let parsed = call_args("plot(2x^2, f, [cos(t), \"sin(t)\"], [1, 2, 3])");
        let args = Args { name: "plot", args: &parsed, span: 0..44, env: &env };

        assert_eq!(args.function(0).unwrap(), FunctionSource::Explicit("2x^2".to_string()));
        assert_eq!(args.function(1).unwrap(), FunctionSource::Explicit("x^2".to_string()));
        assert_eq!(
            args.function(2).unwrap(),
            FunctionSource::Parametric("cos(t)".to_string(), "sin(t)".to_string()),
        );
        assert!(args.function(3).is_err());
    }
}
