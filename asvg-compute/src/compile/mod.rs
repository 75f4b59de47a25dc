//! Compilation of expressions into [`CompiledExpr`]s.
//!
//! Compiling resolves every name in an expression exactly once: parameters become argument
//! slots, variables from the [`Ctxt`] become constants, and function names become references to
//! [`Builtin`]s whose arity has been checked. The result is an immutable tree that can be
//! evaluated any number of times, from any number of threads.

pub mod error;

use asvg_error::Error;
use asvg_parser::{
    parser::{
        binary::Binary,
        call::Call,
        expr::Expr,
        literal::Literal,
        paren::Paren,
        token::op::{BinOpKind, UnaryOpKind},
        unary::Unary,
        Parser,
    },
    rewrite::{normalize_with, ExponentPolicy},
};
use crate::{builtin::Builtin, ctxt::Ctxt, funcs, funcs::combinatoric::Factorial};
use error::{MissingArgument, TooManyArguments, UndefinedFunction, UndefinedVariable};
use levenshtein::levenshtein;
use std::sync::Arc;

/// A node in a compiled expression tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// A constant value.
    Const(f64),

    /// The argument at the given index.
    Param(usize),

    /// Negation of the operand.
    Neg(Box<Node>),

    /// Factorial of the operand.
    Factorial(Box<Node>),

    /// A binary operation.
    Binary(BinOpKind, Box<Node>, Box<Node>),

    /// A call to a builtin function.
    Call(Arc<dyn Builtin>, Vec<Node>),
}

impl Node {
    /// Evaluates the node with the given arguments. Missing arguments evaluate to `NaN`.
    pub fn eval(&self, args: &[f64]) -> f64 {
        match self {
            Node::Const(value) => *value,
            Node::Param(index) => args.get(*index).copied().unwrap_or(f64::NAN),
            Node::Neg(operand) => -operand.eval(args),
            Node::Factorial(operand) => Factorial::eval_static(operand.eval(args), 1.0),
            Node::Binary(op, lhs, rhs) => {
                let (lhs, rhs) = (lhs.eval(args), rhs.eval(args));
                match op {
                    BinOpKind::Exp => lhs.powf(rhs),
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs / rhs,
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                }
            },
            Node::Call(builtin, call_args) => {
                let values = call_args.iter()
                    .map(|arg| arg.eval(args))
                    .collect::<Vec<_>>();
                builtin.eval(&values)
            },
        }
    }
}

/// The names visible while compiling an expression.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// The declared parameters, in argument order.
    pub params: &'a [&'a str],

    /// The context providing named values.
    pub ctxt: &'a Ctxt,
}

impl Scope<'_> {
    /// Resolves a name to a parameter slot or a constant.
    fn resolve(&self, name: &str) -> Option<Node> {
        self.params.iter()
            .position(|param| *param == name)
            .map(Node::Param)
            .or_else(|| self.ctxt.get_var(name).map(Node::Const))
    }

    /// Returns the parameters and variables with a name similar to the given name.
    fn similar_names(&self, name: &str) -> Vec<String> {
        let mut similar = self.params.iter()
            .filter(|param| levenshtein(param, name) < 2)
            .map(|param| param.to_string())
            .collect::<Vec<_>>();
        similar.extend(self.ctxt.get_similar_vars(name).into_iter().map(str::to_string));
        similar.sort_unstable();
        similar.dedup();
        similar
    }
}

/// Any type that can be compiled into a [`Node`].
pub trait Compile {
    /// Compiles the value within the given scope.
    fn compile(&self, scope: &Scope) -> Result<Node, Error>;
}

impl Compile for Expr {
    fn compile(&self, scope: &Scope) -> Result<Node, Error> {
        match self {
            Expr::Literal(literal) => literal.compile(scope),
            Expr::Paren(paren) => paren.compile(scope),
            Expr::Call(call) => call.compile(scope),
            Expr::Unary(unary) => unary.compile(scope),
            Expr::Binary(binary) => binary.compile(scope),
        }
    }
}

impl Compile for Literal {
    fn compile(&self, scope: &Scope) -> Result<Node, Error> {
        match self {
            Literal::Number(num) => Ok(Node::Const(num.value)),
            Literal::Symbol(sym) => scope.resolve(&sym.name)
                .ok_or_else(|| Error::new(vec![sym.span.clone()], UndefinedVariable {
                    name: sym.name.clone(),
                    suggestions: scope.similar_names(&sym.name),
                })),
        }
    }
}

impl Compile for Paren {
    fn compile(&self, scope: &Scope) -> Result<Node, Error> {
        self.expr.compile(scope)
    }
}

impl Compile for Call {
    fn compile(&self, scope: &Scope) -> Result<Node, Error> {
        let name = &self.name.name;
        let builtin = funcs::get(name)
            .ok_or_else(|| Error::new(vec![self.name.span.clone()], UndefinedFunction {
                name: name.clone(),
                suggestions: scope.ctxt.get_similar_funcs(name)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            }))?;

        let arity = builtin.arity();
        let given = self.args.len();
        if given < arity.min {
            return Err(Error::new(self.outer_span().to_vec(), MissingArgument {
                name: name.clone(),
                index: given,
                expected: arity.min,
                given,
            }));
        }
        if let Some(max) = arity.max.filter(|max| given > *max) {
            let mut spans = self.outer_span().to_vec();
            spans.extend(self.args.iter().skip(max).map(Expr::span));
            return Err(Error::new(spans, TooManyArguments {
                name: name.clone(),
                expected: max,
                given,
            }));
        }

        let args = self.args.iter()
            .map(|arg| arg.compile(scope))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Node::Call(builtin, args))
    }
}

impl Compile for Unary {
    fn compile(&self, scope: &Scope) -> Result<Node, Error> {
        let operand = self.operand.compile(scope)?;
        Ok(match self.op.kind {
            UnaryOpKind::Neg => match operand {
                Node::Const(value) => Node::Const(-value),
                operand => Node::Neg(Box::new(operand)),
            },
            UnaryOpKind::Pos => operand,
            UnaryOpKind::Factorial => Node::Factorial(Box::new(operand)),
        })
    }
}

impl Compile for Binary {
    fn compile(&self, scope: &Scope) -> Result<Node, Error> {
        let lhs = self.lhs.compile(scope)?;
        let rhs = self.rhs.compile(scope)?;
        Ok(Node::Binary(self.op.kind, Box::new(lhs), Box::new(rhs)))
    }
}

/// A compiled expression: a pure function of its declared parameters.
#[derive(Debug, Clone)]
pub struct CompiledExpr {
    /// The normalized source the expression was compiled from.
    source: String,

    /// The declared parameters, in argument order.
    params: Vec<String>,

    /// The root of the expression tree.
    root: Node,
}

impl CompiledExpr {
    /// Evaluates the expression. `args` holds one value per declared parameter, in order.
    pub fn eval(&self, args: &[f64]) -> f64 {
        self.root.eval(args)
    }

    /// Returns the normalized source the expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the declared parameters.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Returns the root of the expression tree.
    pub fn root(&self) -> &Node {
        &self.root
    }
}

/// Compiles an already parsed expression. `source` is the normalized text it was parsed from.
pub fn compile_expr(expr: &Expr, source: &str, params: &[&str], ctxt: &Ctxt) -> Result<CompiledExpr, Error> {
    let root = expr.compile(&Scope { params, ctxt })?;
    Ok(CompiledExpr {
        source: source.to_string(),
        params: params.iter().map(|param| param.to_string()).collect(),
        root,
    })
}

/// Normalizes shorthand notation with the given [`ExponentPolicy`], then parses and compiles the
/// result.
///
/// The spans of errors raised after normalization point into the normalized text, which the
/// rewriter reports through [`CompiledExpr::source`] on success.
pub fn compile_with(
    src: &str,
    params: &[&str],
    ctxt: &Ctxt,
    policy: ExponentPolicy,
) -> Result<CompiledExpr, Error> {
    let normalized = normalize_with(src, policy)?;
    let expr = Parser::new(&normalized).try_parse_full::<Expr>()?;
    compile_expr(&expr, &normalized, params, ctxt)
}

/// Normalizes, parses and compiles shorthand notation with the default [`ExponentPolicy`].
pub fn compile(src: &str, params: &[&str], ctxt: &Ctxt) -> Result<CompiledExpr, Error> {
    compile_with(src, params, ctxt, ExponentPolicy::default())
}

/// Evaluates an expression without parameters.
pub fn evaluate(src: &str, ctxt: &Ctxt, policy: ExponentPolicy) -> Result<f64, Error> {
    Ok(compile_with(src, &[], ctxt, policy)?.eval(&[]))
}

#[cfg(test)]
mod tests {
    use asvg_error::Category;
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval(src: &str) -> f64 {
        evaluate(src, &Ctxt::default(), ExponentPolicy::default()).unwrap()
    }

    #[test]
    fn single_parameter() {
        let f = compile("3x^2 - 2x + 1", &["x"], &Ctxt::default()).unwrap();
        assert_eq!(f.source(), "3*pow(x,2)-2*x+1");
        assert_float_absolute_eq!(f.eval(&[2.0]), 9.0);
        assert_float_absolute_eq!(f.eval(&[-1.0]), 6.0);
    }

    #[test]
    fn two_parameters() {
        let f = compile("x y - y", &["x", "y"], &Ctxt::default());
        // `xy` is not split into a product of names
        assert!(f.is_err());

        let f = compile("x*y - y", &["x", "y"], &Ctxt::default()).unwrap();
        assert_float_absolute_eq!(f.eval(&[3.0, 2.0]), 4.0);
    }

    #[test]
    fn power_chains() {
        assert_float_absolute_eq!(eval("2^3^2"), 64.0);
        let standard = evaluate("2^3^2", &Ctxt::default(), ExponentPolicy::Standard).unwrap();
        assert_float_absolute_eq!(standard, 512.0);
    }

    #[test]
    fn factorials() {
        assert_float_absolute_eq!(eval("5!"), 120.0);
        assert_float_absolute_eq!(eval("factorial(7, 2)"), 105.0);
        assert_float_absolute_eq!(eval("0!"), 1.0);
        assert!(eval("factorial(-1)").is_nan());
        let standard = evaluate("3!^2", &Ctxt::default(), ExponentPolicy::Standard).unwrap();
        assert_float_absolute_eq!(standard, 36.0);
    }

    #[test]
    fn constants_and_shorthand() {
        assert_float_absolute_eq!(eval("2pi"), std::f64::consts::TAU);
        assert_float_absolute_eq!(eval("e^2"), std::f64::consts::E.powi(2));
        assert_float_absolute_eq!(eval("sin^-1(1)"), std::f64::consts::FRAC_PI_2);
        assert_float_absolute_eq!(eval("C(5, 2) + chop(2.79, 1)"), 12.7);
    }

    #[test]
    fn non_finite_results_are_values() {
        assert_eq!(eval("1/0"), f64::INFINITY);
        assert!(eval("sqrt(-1)").is_nan());
        assert_eq!(eval("ln(0)"), f64::NEG_INFINITY);
    }

    #[test]
    fn context_variables() {
        let mut ctxt = Ctxt::default();
        ctxt.add_var("a", 4.0);
        let f = compile("a x", &["x"], &ctxt);
        assert!(f.is_err());
        let f = compile("a*x", &["x"], &ctxt).unwrap();
        assert_float_absolute_eq!(f.eval(&[0.5]), 2.0);

        // parameters shadow variables
        let g = compile("a", &["a"], &ctxt).unwrap();
        assert_float_absolute_eq!(g.eval(&[1.0]), 1.0);
    }

    #[test]
    fn undefined_names() {
        let err = compile("y + 1", &["x"], &Ctxt::default()).unwrap_err();
        assert_eq!(err.category(), Category::Evaluation);
        assert_eq!(err.spans, vec![0..1]);
        assert_eq!(err.to_string(), "evaluation error: `y` is not defined");

        let err = compile("sinn(x)", &["x"], &Ctxt::default()).unwrap_err();
        assert_eq!(err.to_string(), "evaluation error: the `sinn` function does not exist");
    }

    #[test]
    fn wrong_argument_counts() {
        let err = compile("pow(x)", &["x"], &Ctxt::default()).unwrap_err();
        assert_eq!(err.to_string(), "evaluation error: missing argument #2 for the `pow` function");

        let err = compile("sin(x, 1, 2)", &["x"], &Ctxt::default()).unwrap_err();
        assert_eq!(err.spans, vec![0..4, 9..10, 6..7, 8..9]);
    }

    #[test]
    fn parse_errors_are_evaluation_errors() {
        let err = compile("x +", &["x"], &Ctxt::default()).unwrap_err();
        assert_eq!(err.category(), Category::Evaluation);
    }
}
