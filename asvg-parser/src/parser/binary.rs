use asvg_error::Error;
use std::ops::Range;
use super::{
    expr::Expr,
    token::op::BinOp,
    unary::Unary,
    Associativity,
    Parser,
    Precedence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An infix operation, such as `x * 2`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    pub lhs: Box<Expr>,
    pub op: BinOp,
    pub rhs: Box<Expr>,

    /// The region of the source code that this operation was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Peeks at the operator following the cursor, without consuming it.
    fn peek_op<'s>(input: &Parser<'s>) -> Option<(BinOp, Parser<'s>)> {
        let mut ahead = input.clone();
        let op = ahead.try_parse::<BinOp>().ok()?;
        Some((op, ahead))
    }

    /// Extends `lhs` with every following operator that binds at least as tightly as
    /// `min_precedence`, using precedence climbing.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, min_precedence: Precedence) -> Result<Expr, Error> {
        while let Some((op, ahead)) = Self::peek_op(input) {
            if op.precedence() < min_precedence {
                break;
            }
            input.set_cursor(&ahead);

            // tighter operators, and `^` after `^`, take the right operand first
            let mut rhs = Unary::parse_or_lower(input)?;
            while let Some((next, _)) = Self::peek_op(input) {
                let takes_rhs = next.precedence() > op.precedence()
                    || (next.precedence() == op.precedence() && next.associativity() == Associativity::Right);
                if !takes_rhs {
                    break;
                }
                rhs = Self::parse_expr(input, rhs, next.precedence())?;
            }

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}
