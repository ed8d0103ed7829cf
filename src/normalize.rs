//! Body normalization.
//!
//! Turns a member's raw body into its canonical text: the one string that is
//! hashed. Two bodies that differ only in indentation, spacing, or line-ending
//! style produce the same canonical text; any other difference survives.
//!
//! # Canonical form
//!
//! 1. Each statement is scanned into tokens ([`crate::lexer`]).
//! 2. Comments are dropped unless [`NormalizeConfig::keep_comments`] is set.
//! 3. Tokens are joined with a single ASCII space. String and character
//!    literals keep their content byte-for-byte, except that `\r\n` becomes `\n`.
//! 4. Statements are joined with `\n` in declared order; statements that render
//!    empty are left out.
//! 5. An expression body loses any trailing `;`.
//! 6. The result is trimmed.
//!
//! An absent body normalizes to the empty string.
//!
//! # Examples
//!
//! ```rust
//! use hashstamp::{normalize, BodyContent, NormalizeConfig};
//!
//! let cfg = NormalizeConfig::default();
//! let tidy = BodyContent::Statements(vec!["var x = a + b;".into(), "return x;".into()]);
//! let messy = BodyContent::Statements(vec![
//!     "var   x=a\r\n    + b;".into(),
//!     "\treturn x ;".into(),
//! ]);
//!
//! assert_eq!(normalize(Some(&tidy), &cfg), "var x = a + b ;\nreturn x ;");
//! assert_eq!(normalize(Some(&tidy), &cfg), normalize(Some(&messy), &cfg));
//! assert_eq!(normalize(None, &cfg), "");
//! ```

use std::borrow::Cow;

use crate::config::NormalizeConfig;
use crate::descriptor::BodyContent;
use crate::lexer::{Lexeme, TokenKind, lex};

/// Produce the canonical text for a body.
pub fn normalize(body: Option<&BodyContent>, cfg: &NormalizeConfig) -> String {
    let text = match body {
        None => return String::new(),
        Some(BodyContent::Statements(statements)) => {
            let mut canonical = String::new();
            for statement in statements {
                let rendered = render_tokens(statement, cfg, false);
                if rendered.is_empty() {
                    continue;
                }
                if !canonical.is_empty() {
                    canonical.push('\n');
                }
                canonical.push_str(&rendered);
            }
            canonical
        }
        Some(BodyContent::Expression(expression)) => render_tokens(expression, cfg, true),
    };

    let trimmed = text.trim();
    if trimmed.len() == text.len() {
        text
    } else {
        trimmed.to_string()
    }
}

/// Render one fragment as space-separated tokens.
fn render_tokens(fragment: &str, cfg: &NormalizeConfig, strip_trailing_semis: bool) -> String {
    let mut lexemes: Vec<Lexeme<'_>> = lex(fragment)
        .filter(|t| cfg.keep_comments || !t.kind.is_comment())
        .collect();

    if strip_trailing_semis {
        while lexemes
            .last()
            .is_some_and(|t| t.kind == TokenKind::Punct && t.text == ";")
        {
            lexemes.pop();
        }
    }

    let mut rendered = String::with_capacity(fragment.len());
    for lexeme in &lexemes {
        if !rendered.is_empty() {
            rendered.push(' ');
        }
        rendered.push_str(&token_text(lexeme));
    }
    rendered
}

fn token_text<'a>(lexeme: &Lexeme<'a>) -> Cow<'a, str> {
    match lexeme.kind {
        kind if kind.is_literal() && lexeme.text.contains("\r\n") => {
            Cow::Owned(lexeme.text.replace("\r\n", "\n"))
        }
        TokenKind::BlockComment => Cow::Owned(collapse_whitespace(lexeme.text)),
        TokenKind::LineComment => Cow::Borrowed(lexeme.text.trim_end()),
        _ => Cow::Borrowed(lexeme.text),
    }
}

/// Collapses repeated whitespace, trims edges, and normalizes newlines to
/// single spaces.
///
/// ```rust
/// use hashstamp::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  hello \r\n\t world  "), "hello world");
/// assert_eq!(collapse_whitespace("   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
