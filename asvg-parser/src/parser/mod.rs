//! Parser for normalized math expressions.
//!
//! The parser works on the token stream of [`tokenize_complete`]. Each syntax node implements
//! [`Parse`], and nodes are combined by asking the [`Parser`] to try a node at the cursor: on
//! failure, the cursor is restored, so alternatives can be tried in turn.

pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use asvg_error::{Error, ErrorKind};
use crate::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A cursor over the tokens of a piece of source text.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    tokens: Box<[Token<'source>]>,

    /// Index of the next token to read.
    cursor: usize,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Moves the cursor to where `ahead`, a clone of this parser used for lookahead, stopped.
    pub fn set_cursor(&mut self, ahead: &Self) {
        self.cursor = ahead.cursor;
    }

    /// Builds an error located at the token under the cursor.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// An empty span just past the last token.
    pub fn eof_span(&self) -> Range<usize> {
        match self.tokens.last() {
            Some(last) => last.span.end..last.span.end,
            None => 0..0,
        }
    }

    /// The span of the token under the cursor, or [`Parser::eof_span`] once every token is read.
    pub fn span(&self) -> Range<usize> {
        match self.tokens.get(self.cursor) {
            Some(token) => token.span.clone(),
            None => self.eof_span(),
        }
    }

    /// The token just before the cursor, if any.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        let index = self.cursor.checked_sub(1)?;
        self.tokens.get(index)
    }

    /// Skips whitespace, then peeks at the token under the cursor.
    pub fn current_token(&mut self) -> Option<&Token<'source>> {
        self.skip_whitespace();
        self.tokens.get(self.cursor)
    }

    /// Returns true if only whitespace is left.
    pub fn is_eof(&mut self) -> bool {
        self.current_token().is_none()
    }

    pub fn skip_whitespace(&mut self) {
        self.skip_while(Token::is_whitespace);
    }

    /// Skips whitespace and line breaks.
    pub fn skip_newlines(&mut self) {
        self.skip_while(|token| token.is_whitespace() || token.kind == TokenKind::NewLine);
    }

    fn skip_while(&mut self, mut skip: impl FnMut(&Token<'source>) -> bool) {
        while self.tokens.get(self.cursor).is_some_and(&mut skip) {
            self.cursor += 1;
        }
    }

    /// Reads the next token that is not whitespace.
    ///
    /// Fails with [`error::UnexpectedEof`] when the stream is exhausted.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.skip_whitespace();
        let token = self.next_raw_token().ok_or_else(|| self.error(error::UnexpectedEof))?;
        Ok(token)
    }

    /// Reads the next token, whitespace included.
    pub fn next_raw_token(&mut self) -> Option<Token<'source>> {
        let token = self.tokens.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(token)
    }

    /// Parses a `T` at the cursor. The cursor is left untouched if parsing fails.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Parses one or more `T`s separated by `delimiter`. The cursor is left untouched if any of
    /// them fails to parse.
    pub fn try_parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        self.try_parse_with_fn(|input| {
            let mut values = vec![input.try_parse::<T>()?];
            while input.current_token().is_some_and(|token| token.kind == delimiter) {
                input.cursor += 1;
                values.push(input.try_parse::<T>()?);
            }
            Ok(values)
        })
    }

    /// Runs `f` at the cursor, restoring the cursor if it fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        let result = f(self);
        if result.is_err() {
            self.cursor = start;
        }
        result
    }

    /// Parses a `T` at the cursor and checks it with `predicate`. The cursor is left untouched
    /// if either step fails.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        self.try_parse_with_fn(|input| {
            let value = T::parse(input)?;
            predicate(&value, input)?;
            Ok(value)
        })
    }

    /// Parses a `T` that must span the rest of the source, apart from trailing whitespace.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.is_eof() {
            Ok(value)
        } else {
            Err(self.error(error::ExpectedEof))
        }
    }
}

/// A syntax node that can be read from a [`Parser`].
pub trait Parse: Sized {
    /// Reads the node at the cursor of `input`, advancing past it on success.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// Which side of an operator chain groups first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`. Postfix operators, such as `!`, are left-associative.
    Left,

    /// `a ^ b ^ c` is `a ^ (b ^ c)`. Prefix operators, such as unary `-`, are
    /// right-associative.
    Right,
}

/// Operator precedence, from loosest to tightest binding.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    /// The loosest precedence, used to parse a whole expression.
    Any,

    /// `+` and `-`.
    Term,

    /// `*` and `/`.
    Factor,

    /// Unary `-` and `+`.
    Neg,

    /// `^`.
    Exp,

    /// Postfix `!`.
    Factorial,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use binary::Binary;
    use call::Call;
    use expr::Expr;
    use literal::{Literal, LitNum, LitSym};
    use paren::Paren;
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};
    use unary::Unary;

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Literal(Literal::Number(LitNum {
            value: 16.0,
            span: 0..2,
        })));
    }

    #[test]
    fn literal_float() {
        let mut parser = Parser::new("3.14");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Literal(Literal::Number(LitNum {
            value: 3.14,
            span: 0..4,
        })));
    }

    #[test]
    fn literal_leading_dot() {
        let mut parser = Parser::new(".5");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Literal(Literal::Number(LitNum {
            value: 0.5,
            span: 0..2,
        })));
    }

    #[test]
    fn binary_left_associativity() {
        let mut parser = Parser::new("3*x/2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                    value: 3.0,
                    span: 0..1,
                }))),
                op: BinOp {
                    kind: BinOpKind::Mul,
                    span: 1..2,
                },
                rhs: Box::new(Expr::Literal(Literal::Symbol(LitSym {
                    name: "x".to_string(),
                    span: 2..3,
                }))),
                span: 0..3,
            })),
            op: BinOp {
                kind: BinOpKind::Div,
                span: 3..4,
            },
            rhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                value: 2.0,
                span: 4..5,
            }))),
            span: 0..5,
        }));
    }

    #[test]
    fn binary_precedence() {
        let mut parser = Parser::new("1+2*3");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                value: 1.0,
                span: 0..1,
            }))),
            op: BinOp {
                kind: BinOpKind::Add,
                span: 1..2,
            },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                    value: 2.0,
                    span: 2..3,
                }))),
                op: BinOp {
                    kind: BinOpKind::Mul,
                    span: 3..4,
                },
                rhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                    value: 3.0,
                    span: 4..5,
                }))),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn exponent_right_associativity() {
        let mut parser = Parser::new("2^3^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                value: 2.0,
                span: 0..1,
            }))),
            op: BinOp {
                kind: BinOpKind::Exp,
                span: 1..2,
            },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                    value: 3.0,
                    span: 2..3,
                }))),
                op: BinOp {
                    kind: BinOpKind::Exp,
                    span: 3..4,
                },
                rhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                    value: 2.0,
                    span: 4..5,
                }))),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn negation_below_exponent() {
        let mut parser = Parser::new("-x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(Expr::Literal(Literal::Symbol(LitSym {
                    name: "x".to_string(),
                    span: 1..2,
                }))),
                op: BinOp {
                    kind: BinOpKind::Exp,
                    span: 2..3,
                },
                rhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                    value: 2.0,
                    span: 3..4,
                }))),
                span: 1..4,
            })),
            op: UnaryOp {
                kind: UnaryOpKind::Neg,
                span: 0..1,
            },
            span: 0..4,
        }));
    }

    #[test]
    fn factorial_binds_tighter_than_exponent() {
        let mut parser = Parser::new("2^3!");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                value: 2.0,
                span: 0..1,
            }))),
            op: BinOp {
                kind: BinOpKind::Exp,
                span: 1..2,
            },
            rhs: Box::new(Expr::Unary(Unary {
                operand: Box::new(Expr::Literal(Literal::Number(LitNum {
                    value: 3.0,
                    span: 2..3,
                }))),
                op: UnaryOp {
                    kind: UnaryOpKind::Factorial,
                    span: 3..4,
                },
                span: 2..4,
            })),
            span: 0..4,
        }));
    }

    #[test]
    fn call_with_paren_argument() {
        let mut parser = Parser::new("pow((E),x)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Call(Call {
            name: LitSym {
                name: "pow".to_string(),
                span: 0..3,
            },
            args: vec![
                Expr::Paren(Paren {
                    expr: Box::new(Expr::Literal(Literal::Symbol(LitSym {
                        name: "E".to_string(),
                        span: 5..6,
                    }))),
                    span: 4..7,
                }),
                Expr::Literal(Literal::Symbol(LitSym {
                    name: "x".to_string(),
                    span: 8..9,
                })),
            ],
            span: 0..10,
            paren_span: 3..10,
        }));
    }

    #[test]
    fn call_without_arguments() {
        let mut parser = Parser::new("random()");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Call(Call {
            name: LitSym {
                name: "random".to_string(),
                span: 0..6,
            },
            args: vec![],
            span: 0..8,
            paren_span: 6..8,
        }));
    }

    #[test]
    fn unclosed_parenthesis() {
        let mut parser = Parser::new("(1+2");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
        assert_eq!(err.kind.message(), "unclosed parenthesis");
    }

    #[test]
    fn empty_parenthesis() {
        let mut parser = Parser::new("2*()");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.kind.message(), "missing expression inside parenthesis");
    }

    #[test]
    fn trailing_operator() {
        let mut parser = Parser::new("1+");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.kind.message(), "unexpected end of expression");
    }

    #[test]
    fn trailing_garbage() {
        let mut parser = Parser::new("pow(2,sin)(x)");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.kind.message(), "expected end of expression");
        assert_eq!(err.spans, vec![10..11]);
    }
}
