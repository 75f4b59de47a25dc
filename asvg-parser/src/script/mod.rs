//! Parser for drawing scripts.
//!
//! A script is a sequence of statements separated by new lines or `;`. Each statement is either
//! a command call (`dot([1,2], "open")`) or an assignment (`fill = "red"`). `//` starts a comment
//! that runs to the end of the line.
//!
//! Arguments are kept close to their source form: strings and lists are parsed, while anything
//! else is kept as raw text, since it may be shorthand math that only the rewriter understands
//! (`plot(2x^2)`).

pub mod ast;
pub mod error;

use asvg_error::Error;
use crate::{
    parser::{literal::LitSym, Parse, Parser},
    tokenizer::TokenKind,
};
pub use ast::{Arg, AssignStmt, CallStmt, Script, Stmt};

/// Parses a complete script.
pub fn parse_script(src: &str) -> Result<Script, Error> {
    let mut input = Parser::new(src);
    input.try_parse_full::<Script>()
}

/// Returns true if the token kind separates statements.
fn is_separator(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::NewLine | TokenKind::Semicolon)
}

/// Advances past statement separators and whitespace.
fn skip_separators(input: &mut Parser) {
    while input.current_token().is_some_and(|token| is_separator(token.kind)) {
        let _ = input.next_raw_token();
    }
}

impl Parse for Script {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let mut stmts = Vec::new();
        loop {
            skip_separators(input);
            if input.is_eof() {
                break;
            }

            stmts.push(input.try_parse::<Stmt>()?);

            match input.current_token() {
                None => break,
                Some(token) if is_separator(token.kind) => continue,
                Some(_) => return Err(input.error(error::ExpectedSeparator)),
            }
        }

        Ok(Self { stmts })
    }
}

impl Parse for Stmt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()
            .map_err(|_| {
                let found = input.current_token().map(|token| token.kind);
                input.error(error::ExpectedStatement { found })
            })?;

        let Ok(token) = input.next_token() else {
            return Err(input.error(error::ExpectedStatement { found: None }));
        };
        match token.kind {
            TokenKind::OpenParen => {
                let args = parse_args(input, token.span.clone(), TokenKind::CloseParen)?;
                let end = input.prev_token().map_or(token.span.end, |token| token.span.end);
                Ok(Stmt::Call(CallStmt {
                    span: name.span.start..end,
                    name,
                    args,
                }))
            },
            TokenKind::Assign => {
                let value = parse_arg(input)?;
                Ok(Stmt::Assign(AssignStmt {
                    span: name.span.start..value.span().end,
                    target: name,
                    value,
                }))
            },
            kind => Err(Error::new(vec![token.span], error::ExpectedStatement { found: Some(kind) })),
        }
    }
}

/// Parses a comma-separated list of arguments after an opening delimiter, up to and including the
/// closing delimiter. New lines are allowed anywhere inside the list.
fn parse_args(input: &mut Parser, open_span: std::ops::Range<usize>, close: TokenKind) -> Result<Vec<Arg>, Error> {
    let opening = if close == TokenKind::CloseParen { '(' } else { '[' };
    let unclosed = || Error::new(vec![open_span.clone()], error::UnclosedDelimiter { opening });

    let mut args = Vec::new();
    input.skip_newlines();
    if input.current_token().is_some_and(|token| token.kind == close) {
        let _ = input.next_raw_token();
        return Ok(args);
    }

    loop {
        input.skip_newlines();
        args.push(parse_arg(input)?);
        input.skip_newlines();

        let Some(token) = input.current_token().cloned() else {
            return Err(unclosed());
        };
        match token.kind {
            TokenKind::Comma => {
                let _ = input.next_raw_token();
            },
            kind if kind == close => {
                let _ = input.next_raw_token();
                return Ok(args);
            },
            _ => return Err(unclosed()),
        }
    }
}

/// Parses a single argument.
fn parse_arg(input: &mut Parser) -> Result<Arg, Error> {
    let Some(token) = input.current_token().cloned() else {
        return Err(input.error(error::ExpectedArgument));
    };

    match token.kind {
        TokenKind::Str => {
            let _ = input.next_raw_token();
            Ok(Arg::Str {
                value: unescape(token.lexeme),
                span: token.span,
            })
        },
        TokenKind::OpenSquare => {
            let _ = input.next_raw_token();
            let items = parse_args(input, token.span.clone(), TokenKind::CloseSquare)?;
            let end = input.prev_token().map_or(token.span.end, |token| token.span.end);
            Ok(Arg::List {
                items,
                span: token.span.start..end,
            })
        },
        _ => parse_raw(input),
    }
}

/// Collects the raw text of an argument, up to the next top-level `,`, closing delimiter, or
/// statement separator.
fn parse_raw(input: &mut Parser) -> Result<Arg, Error> {
    let mut source = String::new();
    let mut span: Option<std::ops::Range<usize>> = None;
    let mut depth = 0usize;

    loop {
        let mut ahead = input.clone();
        let Some(token) = ahead.next_raw_token() else {
            break;
        };

        match token.kind {
            TokenKind::OpenParen | TokenKind::OpenSquare => depth += 1,
            TokenKind::CloseParen | TokenKind::CloseSquare if depth == 0 => break,
            TokenKind::CloseParen | TokenKind::CloseSquare => depth -= 1,
            TokenKind::Comma | TokenKind::NewLine | TokenKind::Semicolon if depth == 0 => break,
            TokenKind::Symbol if token.lexeme.starts_with(['"', '\'']) => {
                return Err(Error::new(vec![token.span], error::UnterminatedString));
            },
            _ => (),
        }

        input.set_cursor(&ahead);
        if token.kind == TokenKind::Comment {
            continue;
        }
        source.push_str(token.lexeme);
        if !token.is_whitespace() && token.kind != TokenKind::NewLine {
            span = Some(match span {
                Some(span) => span.start..token.span.end,
                None => token.span.clone(),
            });
        }
    }

    match span {
        Some(span) => Ok(Arg::Raw {
            source: source.trim().to_string(),
            span,
        }),
        None => Err(input.error(error::ExpectedArgument)),
    }
}

/// Removes the quotes around a string literal and resolves backslash escapes.
fn unescape(lexeme: &str) -> String {
    let inner = &lexeme[1..lexeme.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use asvg_error::Category;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str, span: std::ops::Range<usize>) -> LitSym {
        LitSym { name: name.to_string(), span }
    }

    fn raw(source: &str, span: std::ops::Range<usize>) -> Arg {
        Arg::Raw { source: source.to_string(), span }
    }

    #[test]
    fn call_with_points() {
        let script = parse_script("line([0,0], [1,2])").unwrap();
        assert_eq!(script.stmts, vec![Stmt::Call(CallStmt {
            name: sym("line", 0..4),
            args: vec![
                Arg::List {
                    items: vec![raw("0", 6..7), raw("0", 8..9)],
                    span: 5..10,
                },
                Arg::List {
                    items: vec![raw("1", 13..14), raw("2", 15..16)],
                    span: 12..17,
                },
            ],
            span: 0..18,
        })]);
    }

    #[test]
    fn assignments_and_separators() {
        let script = parse_script("stroke = \"red\"; strokewidth = 2\n\n// comment\nfill = 'blue'\n").unwrap();
        assert_eq!(script.stmts, vec![
            Stmt::Assign(AssignStmt {
                target: sym("stroke", 0..6),
                value: Arg::Str { value: "red".to_string(), span: 9..14 },
                span: 0..14,
            }),
            Stmt::Assign(AssignStmt {
                target: sym("strokewidth", 16..27),
                value: raw("2", 30..31),
                span: 16..31,
            }),
            Stmt::Assign(AssignStmt {
                target: sym("fill", 44..48),
                value: Arg::Str { value: "blue".to_string(), span: 51..57 },
                span: 44..57,
            }),
        ]);
    }

    #[test]
    fn raw_math_keeps_nested_commas() {
        let script = parse_script("plot(pow(x, 2) + 1, -1, 1)").unwrap();
        let Stmt::Call(call) = &script.stmts[0] else {
            panic!("expected a call");
        };
        assert_eq!(call.args, vec![
            raw("pow(x, 2) + 1", 5..18),
            raw("-1", 20..22),
            raw("1", 24..25),
        ]);
    }

    #[test]
    fn empty_call_and_multiline_arguments() {
        let script = parse_script("axes()\npath([\n  [0,0],\n  [1,1]\n])").unwrap();
        assert_eq!(script.stmts.len(), 2);
        let Stmt::Call(call) = &script.stmts[1] else {
            panic!("expected a call");
        };
        let Arg::List { items, .. } = &call.args[0] else {
            panic!("expected a list");
        };
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn string_escapes() {
        let script = parse_script(r#"text([0,0], "a \"b\"\n")"#).unwrap();
        let Stmt::Call(call) = &script.stmts[0] else {
            panic!("expected a call");
        };
        assert_eq!(call.args[1], Arg::Str { value: "a \"b\"\n".to_string(), span: 12..23 });
    }

    #[test]
    fn missing_separator() {
        let err = parse_script("axes() grid(1,1)").unwrap_err();
        assert_eq!(err.category(), Category::Syntax);
        assert_eq!(err.spans, vec![7..11]);
    }

    #[test]
    fn unclosed_call() {
        let err = parse_script("line([0,0], [1,1]").unwrap_err();
        assert_eq!(err.kind.message(), "unclosed `(`");
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn empty_argument() {
        let err = parse_script("line(, [1,1])").unwrap_err();
        assert_eq!(err.kind.message(), "missing argument");
    }

    #[test]
    fn unterminated_string() {
        let err = parse_script("text([0,0], \"abc)").unwrap_err();
        assert_eq!(err.kind.message(), "unterminated string");
    }

    #[test]
    fn not_a_statement() {
        let err = parse_script("42").unwrap_err();
        assert_eq!(err.category(), Category::Syntax);
        assert_eq!(err.kind.message(), "expected a command or an assignment");
    }
}
