pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Lexes the input lazily, yielding token kinds.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Lexes the whole input up front, so the parser can backtrack freely.
///
/// Characters no rule matches become [`TokenKind::Symbol`] tokens, so the lexemes always
/// concatenate back to the input.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();
    while let Some(kind) = lexer.next() {
        tokens.push(Token {
            kind: kind.unwrap_or(TokenKind::Symbol),
            span: lexer.span(),
            lexeme: lexer.slice(),
        });
    }
    tokens.into()
}
