//! Operator tokens.

use asvg_error::Error;
use crate::{
    parser::{error, Associativity, Parse, Parser, Precedence},
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reads the next token and maps it to an operator kind through `table`. On a mismatch, the error
/// lists every token in the table.
fn parse_kind<K: Copy>(
    input: &mut Parser,
    table: &'static [(TokenKind, K)],
    expected: &'static [TokenKind],
) -> Result<(K, Range<usize>), Error> {
    let token = input.next_token()?;
    match table.iter().find(|(kind, _)| *kind == token.kind) {
        Some((_, op)) => Ok((*op, token.span)),
        None => Err(Error::new(vec![token.span], error::UnexpectedToken {
            expected,
            found: token.kind,
        })),
    }
}

/// A prefix `-` or `+`, or a postfix `!`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    Factorial,
    Neg,
    Pos,
}

const UNARY_OPS: &[(TokenKind, UnaryOpKind)] = &[
    (TokenKind::Factorial, UnaryOpKind::Factorial),
    (TokenKind::Sub, UnaryOpKind::Neg),
    (TokenKind::Add, UnaryOpKind::Pos),
];

impl UnaryOpKind {
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Factorial => Precedence::Factorial,
            Self::Neg | Self::Pos => Precedence::Neg,
        }
    }

    /// Postfix operators associate to the left, prefix operators to the right.
    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Factorial => Associativity::Left,
            Self::Neg | Self::Pos => Associativity::Right,
        }
    }
}

/// A unary operator and where it appears in the source.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOp {
    pub kind: UnaryOpKind,
    pub span: Range<usize>,
}

impl UnaryOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let (kind, span) = parse_kind(input, UNARY_OPS, &[
            TokenKind::Factorial,
            TokenKind::Sub,
            TokenKind::Add,
        ])?;
        Ok(Self { kind, span })
    }
}

/// An infix arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

const BINARY_OPS: &[(TokenKind, BinOpKind)] = &[
    (TokenKind::Exp, BinOpKind::Exp),
    (TokenKind::Mul, BinOpKind::Mul),
    (TokenKind::Div, BinOpKind::Div),
    (TokenKind::Add, BinOpKind::Add),
    (TokenKind::Sub, BinOpKind::Sub),
];

impl BinOpKind {
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Term,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Exp => Precedence::Exp,
        }
    }

    /// Only `^` is right-associative.
    pub fn associativity(&self) -> Associativity {
        if *self == Self::Exp {
            Associativity::Right
        } else {
            Associativity::Left
        }
    }
}

/// A binary operator and where it appears in the source.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinOp {
    pub kind: BinOpKind,
    pub span: Range<usize>,
}

impl BinOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let (kind, span) = parse_kind(input, BINARY_OPS, &[
            TokenKind::Exp,
            TokenKind::Mul,
            TokenKind::Div,
            TokenKind::Add,
            TokenKind::Sub,
        ])?;
        Ok(Self { kind, span })
    }
}
