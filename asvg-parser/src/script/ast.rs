use crate::parser::literal::LitSym;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed drawing script: an ordered list of statements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Script {
    /// The statements, in execution order.
    pub stmts: Vec<Stmt>,
}

/// A single statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stmt {
    /// A command call, such as `line([0,0], [1,1])`.
    Call(CallStmt),

    /// An assignment, such as `stroke = "red"`.
    Assign(AssignStmt),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn span(&self) -> Range<usize> {
        match self {
            Stmt::Call(call) => call.span.clone(),
            Stmt::Assign(assign) => assign.span.clone(),
        }
    }
}

/// A command call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallStmt {
    /// The name of the command.
    pub name: LitSym,

    /// The arguments, in order.
    pub args: Vec<Arg>,

    /// The region of the source code that this statement was parsed from.
    pub span: Range<usize>,
}

/// An assignment to a style attribute, viewport setting, or script variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignStmt {
    /// The name being assigned.
    pub target: LitSym,

    /// The assigned value.
    pub value: Arg,

    /// The region of the source code that this statement was parsed from.
    pub span: Range<usize>,
}

/// An argument to a command, or the value of an assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Arg {
    /// A quoted string, with escapes resolved.
    Str {
        value: String,
        span: Range<usize>,
    },

    /// A bracketed list, such as a point `[1, 2]` or a list of points.
    List {
        items: Vec<Arg>,
        span: Range<usize>,
    },

    /// Unquoted text, such as `2`, `pi/2`, `p1` or `x^2`. It is interpreted by the script
    /// interpreter, usually as shorthand math.
    Raw {
        source: String,
        span: Range<usize>,
    },
}

impl Arg {
    /// Returns the span of the argument.
    pub fn span(&self) -> Range<usize> {
        match self {
            Arg::Str { span, .. } | Arg::List { span, .. } | Arg::Raw { span, .. } => span.clone(),
        }
    }
}
