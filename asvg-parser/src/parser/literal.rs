use asvg_error::Error;
use std::ops::Range;
use super::{
    error,
    token::{Name, Num},
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal, represented as `f64`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The value of the number literal.
    pub value: f64,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let num = input.try_parse::<Num>()?;

        // `3.` is a valid literal, but not a valid `f64` string
        let value = num.lexeme
            .trim_end_matches('.')
            .parse()
            .map_err(|_| Error::new(vec![num.span.clone()], error::UnexpectedToken {
                expected: &[crate::tokenizer::TokenKind::Num],
                found: crate::tokenizer::TokenKind::Symbol,
            }))?;
        Ok(Self {
            value,
            span: num.span,
        })
    }
}

/// A symbol / identifier literal. Symbols are used to represent variables, constants, and
/// functions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Name>()?;
        Ok(Self {
            name: token.lexeme,
            span: token.span,
        })
    }
}

/// Represents a literal value.
///
/// A literal is any value that is written directly into the source code.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol / identifier literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(name) => name.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.try_parse::<LitNum>().map(Literal::Number)
            .or_else(|_| input.try_parse::<LitSym>().map(Literal::Symbol))
    }
}
