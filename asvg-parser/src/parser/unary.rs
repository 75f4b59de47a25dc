use asvg_error::Error;
use std::ops::Range;
use crate::{
    parser::{
        binary::Binary,
        expr::{Expr, Primary},
        error,
        token::op::UnaryOp,
        Associativity,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parses a unary operator, failing without consuming anything unless it is a prefix operator
/// (for [`Associativity::Right`]) or a postfix operator (for [`Associativity::Left`]).
fn unary_op(input: &mut Parser, associativity: Associativity) -> Result<UnaryOp, Error> {
    input.try_parse_then::<UnaryOp, _>(|op, input| {
        if op.associativity() == associativity {
            return Ok(());
        }
        Err(Error::new(vec![op.span.clone()], error::UnexpectedToken {
            expected: &[],
            found: input.prev_token().map_or(TokenKind::Symbol, |token| token.kind),
        }))
    })
}

/// A prefix or postfix operation, such as `-x` or `5!`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    pub operand: Box<Expr>,
    pub op: UnaryOp,

    /// The span of the operand and operator together.
    pub span: Range<usize>,
}

impl Unary {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses one or more postfix operators after a primary operand, such as `3!!`.
    fn parse_postfix(input: &mut Parser) -> Result<Self, Error> {
        let operand = Expr::from(input.try_parse::<Primary>()?);
        let start = operand.span().start;
        let op = unary_op(input, Associativity::Left)?;

        let mut unary = Self {
            span: start..op.span.end,
            operand: Box::new(operand),
            op,
        };
        while let Ok(op) = unary_op(input, Associativity::Left) {
            unary = Self {
                span: start..op.span.end,
                operand: Box::new(Expr::Unary(unary)),
                op,
            };
        }
        Ok(unary)
    }

    /// Parses a prefix operator and its operand. The operand extends over every following
    /// operator that binds more tightly than the prefix operator, so `-2^2` is `-(2^2)`.
    fn parse_prefix(input: &mut Parser) -> Result<Self, Error> {
        let op = unary_op(input, Associativity::Right)?;
        let lhs = Self::parse_or_lower(input)?;
        let operand = Binary::parse_expr(input, lhs, op.precedence())?;
        Ok(Self {
            span: op.span.start..operand.span().end,
            operand: Box::new(operand),
            op,
        })
    }

    /// Parses a unary expression, or else a primary expression.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        match input.try_parse::<Self>() {
            Ok(unary) => Ok(Expr::Unary(unary)),
            Err(_) => Primary::parse(input).map(Expr::from),
        }
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.try_parse_with_fn(Self::parse_prefix)
            .or_else(|_| input.try_parse_with_fn(Self::parse_postfix))
    }
}
