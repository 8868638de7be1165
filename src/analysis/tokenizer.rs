use logos::{FilterResult, Lexer, Logos};
use std::fmt;
use std::ops::Range;

use super::parse_error::{ParseError, ParseResult};

/// Tokens of the TypeScript subset needed to read interface declarations.
///
/// Everything outside an interface body is only skimmed for balanced delimiters, so the
/// vocabulary is small: a handful of keywords, identifiers, literals and punctuation.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token<'src> {
    /// Never produced: block and doc comments are skipped by the callback
    #[token("/*", block_comment)]
    BlockComment,

    // Keywords
    #[token("interface")]
    Interface,

    #[token("export")]
    Export,

    #[token("declare")]
    Declare,

    #[token("default")]
    Default,

    #[token("extends")]
    Extends,

    #[token("readonly")]
    Readonly,

    #[token("keyof")]
    Keyof,

    #[token("typeof")]
    Typeof,

    #[regex(r"[\p{XID_Start}_$][\p{XID_Continue}$]*", |lex| lex.slice())]
    Ident(&'src str),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| lex.slice())]
    String(&'src str),

    #[regex(r"`([^`\\]|\\.)*`", |lex| lex.slice())]
    Template(&'src str),

    #[regex(r"[0-9][0-9_]*(\.[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),

    // Delimiters
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    // Punctuation
    #[token("=>")]
    Arrow,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("?")]
    Question,

    #[token(".")]
    Dot,

    #[token("|")]
    Pipe,

    #[token("&")]
    Ampersand,

    #[token("=")]
    Equals,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("!")]
    Bang,

    #[token("@")]
    At,

    #[token("#")]
    Hash,

    #[token("^")]
    Caret,

    #[token("~")]
    Tilde,
}

impl<'src> Token<'src> {
    /// Text usable as a property name: identifiers and every keyword
    pub fn as_name(&self) -> Option<&'src str> {
        match self {
            Token::Ident(s) => Some(s),
            Token::Interface => Some("interface"),
            Token::Export => Some("export"),
            Token::Declare => Some("declare"),
            Token::Default => Some("default"),
            Token::Extends => Some("extends"),
            Token::Readonly => Some("readonly"),
            Token::Keyof => Some("keyof"),
            Token::Typeof => Some("typeof"),
            _ => None,
        }
    }
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::BlockComment => write!(f, "comment"),
            Token::Interface => write!(f, "keyword 'interface'"),
            Token::Export => write!(f, "keyword 'export'"),
            Token::Declare => write!(f, "keyword 'declare'"),
            Token::Default => write!(f, "keyword 'default'"),
            Token::Extends => write!(f, "keyword 'extends'"),
            Token::Readonly => write!(f, "keyword 'readonly'"),
            Token::Keyof => write!(f, "keyword 'keyof'"),
            Token::Typeof => write!(f, "keyword 'typeof'"),
            Token::Ident(s) => write!(f, "identifier '{}'", s),
            Token::String(s) => write!(f, "string {}", s),
            Token::Template(_) => write!(f, "template literal"),
            Token::Number(n) => write!(f, "number {}", n),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::LAngle => write!(f, "'<'"),
            Token::RAngle => write!(f, "'>'"),
            Token::Arrow => write!(f, "'=>'"),
            Token::Colon => write!(f, "':'"),
            Token::Semicolon => write!(f, "';'"),
            Token::Comma => write!(f, "','"),
            Token::Question => write!(f, "'?'"),
            Token::Dot => write!(f, "'.'"),
            Token::Pipe => write!(f, "'|'"),
            Token::Ampersand => write!(f, "'&'"),
            Token::Equals => write!(f, "'='"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Percent => write!(f, "'%'"),
            Token::Bang => write!(f, "'!'"),
            Token::At => write!(f, "'@'"),
            Token::Hash => write!(f, "'#'"),
            Token::Caret => write!(f, "'^'"),
            Token::Tilde => write!(f, "'~'"),
        }
    }
}

/// Skip past the closing `*/`; an unterminated comment is a lexer error
fn block_comment<'src>(lex: &mut Lexer<'src, Token<'src>>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(())
        }
    }
}

pub type Spanned<'src> = (Token<'src>, Range<usize>);

/// Tokenize a TypeScript source string.
///
/// Unlike a best-effort highlighter, an unrecognised character is an error: a file the
/// generator cannot read must not silently produce a domain without fields.
pub fn tokenize(source: &str) -> ParseResult<Vec<Spanned<'_>>> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(ParseError::lexer_error(span.start)),
        }
    }
    Ok(tokens)
}
