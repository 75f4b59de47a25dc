use asvg_error::Error;
use std::ops::Range;
use super::{
    error,
    expr::Expr,
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An expression in parentheses, such as `(x + 1)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    pub expr: Box<Expr>,

    /// The span of the expression, parentheses included.
    pub span: Range<usize>,
}

impl Paren {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.try_parse::<OpenParen>()?;
        if input.clone().try_parse::<CloseParen>().is_ok() {
            return Err(input.error(error::EmptyParenthesis));
        }

        let expr = input.try_parse::<Expr>()?;
        match input.try_parse::<CloseParen>() {
            Ok(close) => Ok(Self {
                expr: Box::new(expr),
                span: open.span.start..close.span.end,
            }),
            Err(_) => Err(Error::new(vec![open.span], error::UnclosedParenthesis { opening: true })),
        }
    }
}
