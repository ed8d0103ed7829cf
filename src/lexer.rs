//! Token scanner for member bodies.
//!
//! The normalizer only needs to know where one token ends and the next
//! begins. The scanner knows the lexical shapes shared by C-family languages
//! and Rust (identifiers, numbers, string and character literals, lifetimes,
//! comments, operators) and nothing about grammar. Anything it cannot
//! classify comes back as [`TokenKind::Unknown`] instead of failing.
//!
//! # Example
//!
//! ```rust
//! use hashstamp::lexer::{lex, TokenKind};
//!
//! let kinds: Vec<_> = lex("x += 1; // bump").map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Ident,
//!         TokenKind::Punct,
//!         TokenKind::Number,
//!         TokenKind::Punct,
//!         TokenKind::LineComment,
//!     ]
//! );
//! ```

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"\s+")]
pub enum TokenKind {
    #[regex(r"//[^\n]*")]
    LineComment,

    /// Block comment; an unclosed one runs to the end of input.
    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    #[regex(r#"r"[^"]*""#)]
    #[regex(r##"r#"([^"]|"+[^"#])*"+#"##)]
    StringLit,

    #[regex(r"'([^'\\\n]|\\[^\n]|\\x[0-9a-fA-F]{2}|\\u[0-9a-fA-F]{4}|\\u\{[0-9a-fA-F]{1,6}\})'")]
    CharLit,

    #[regex(r"'[A-Za-z_][A-Za-z0-9_]*")]
    Lifetime,

    #[regex(r"[0-9][0-9A-Za-z_]*(\.[0-9][0-9A-Za-z_]*)?")]
    Number,

    #[regex(r"[_\p{XID_Start}]\p{XID_Continue}*")]
    Ident,

    // No `>>` or `>>=`: `List<List<int>>` lexes like `List<List<int> >`.
    #[token("::")]
    #[token("->")]
    #[token("=>")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("&&")]
    #[token("||")]
    #[token("++")]
    #[token("--")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<")]
    #[token("<<=")]
    #[token("..")]
    #[token("...")]
    #[token("..=")]
    #[token("??")]
    #[token("??=")]
    #[token("?.")]
    #[regex(r"[!-/:-@\[-\^`{-~]")]
    Punct,

    /// A character the scanner has no rule for. Kept as its own token.
    Unknown,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::StringLit | TokenKind::CharLit)
    }
}

fn block_comment(lexer: &mut logos::Lexer<TokenKind>) -> bool {
    let remainder = lexer.remainder();
    let consumed = match remainder.find("*/") {
        Some(end) => end + 2,
        None => remainder.len(),
    };
    lexer.bump(consumed);
    true
}

/// A token together with the source text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
}

/// Scan `source` into lexemes. Never fails.
pub fn lex(source: &str) -> impl Iterator<Item = Lexeme<'_>> {
    let mut inner = TokenKind::lexer(source);
    std::iter::from_fn(move || {
        let kind = inner.next()?.unwrap_or(TokenKind::Unknown);
        Some(Lexeme {
            kind,
            text: inner.slice(),
        })
    })
}
