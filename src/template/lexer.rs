use logos::{Lexer, Logos};

/// Tokens of a base template.
///
/// Only `{{NAME}}` with an upper-case name is structural; every other byte
/// (CSS and script braces included) is literal text.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum TemplateToken<'s> {
    #[regex(r"\{\{[A-Z][A-Z0-9_]*\}\}", placeholder_name)]
    Placeholder(&'s str),

    #[regex(r"[^{]+")]
    Text,

    #[token("{")]
    Brace,
}

fn placeholder_name<'s>(lex: &mut Lexer<'s, TemplateToken<'s>>) -> &'s str {
    let s = lex.slice();
    &s[2..s.len() - 2]
}

/// A lexed template piece with its byte offset in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece<'s> {
    Text(&'s str),
    Placeholder { name: &'s str, offset: usize },
}

/// Split a template into literal text runs and placeholder tokens.
///
/// Adjacent literal tokens are merged into one run.
pub fn lex(source: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut text_start: Option<usize> = None;
    let mut lexer = TemplateToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(TemplateToken::Placeholder(name)) => {
                if let Some(start) = text_start.take() {
                    pieces.push(Piece::Text(&source[start..span.start]));
                }
                pieces.push(Piece::Placeholder {
                    name,
                    offset: span.start,
                });
            }
            // Text, lone braces, and anything unmatched stay literal.
            Ok(TemplateToken::Text) | Ok(TemplateToken::Brace) | Err(()) => {
                text_start.get_or_insert(span.start);
            }
        }
    }

    if let Some(start) = text_start {
        pieces.push(Piece::Text(&source[start..]));
    }
    pieces
}
