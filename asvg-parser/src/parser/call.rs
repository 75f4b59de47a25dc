use asvg_error::Error;
use std::ops::Range;
use super::{
    error,
    expr::Expr,
    literal::LitSym,
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A call to a builtin function, such as `pow(x,-2)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    pub name: LitSym,
    pub args: Vec<Expr>,

    /// From the start of the name to the closing parenthesis.
    pub span: Range<usize>,

    /// From the opening to the closing parenthesis.
    pub paren_span: Range<usize>,
}

impl Call {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The spans of `name(` and of `)`, used to point at a call without covering its arguments.
    pub fn outer_span(&self) -> [Range<usize>; 2] {
        let Range { start: open, end: close } = self.paren_span;
        [self.name.span.start..open + 1, close - 1..close]
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open = input.try_parse::<OpenParen>()?;

        let empty = input.current_token().is_some_and(|token| token.kind == TokenKind::CloseParen);
        let args = if empty {
            vec![]
        } else {
            input.try_parse_delimited::<Expr>(TokenKind::Comma)?
        };

        let Ok(close) = input.try_parse::<CloseParen>() else {
            return Err(Error::new(vec![open.span], error::UnclosedParenthesis { opening: true }));
        };

        Ok(Self {
            span: name.span.start..close.span.end,
            paren_span: open.span.start..close.span.end,
            name,
            args,
        })
    }
}
