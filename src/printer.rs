// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// The `Display` implementations of tokens write their HTML annotation:
//
// - errors:            <b class="err" title="DESCRIPTION">TEXT</b>
// - groups:            <b class="gN">TEXT</b>
// - other metas:       <b>TEXT</b>
// - character classes: <i>...</i>
// - range hyphens:     <u>-</u>
// - literals:          the text itself
//
// All source text is written entity-escaped.

use std::fmt::{Display, Formatter, Result};

use crate::{
    error::ErrorKind,
    token::{CharClass, ClassToken, GroupStyle, Token, TokenWithRange},
};

/// Escapes `&`, `<` and `>` as HTML entities.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Writes the annotation of the whole token stream.
pub fn print_tokens(token_with_ranges: &[TokenWithRange]) -> String {
    token_with_ranges
        .iter()
        .map(|token_with_range| token_with_range.token.to_string())
        .collect()
}

fn write_error(f: &mut Formatter<'_>, text: &str, kind: &ErrorKind) -> Result {
    write!(
        f,
        "<b class=\"err\" title=\"{}\">{}</b>",
        kind,
        escape_html(text)
    )
}

fn write_meta(f: &mut Formatter<'_>, text: &str) -> Result {
    write!(f, "<b>{}</b>", escape_html(text))
}

impl Display for GroupStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "g{}", self.depth())
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Token::Literal(s) => f.write_str(&escape_html(s)),
            Token::Metasequence(s) => write_meta(f, s),
            Token::BackReference(number) => write!(f, "<b>\\{}</b>", number),
            Token::Quantifier(s, Some(style)) => {
                write!(f, "<b class=\"{}\">{}</b>", style, escape_html(s))
            }
            Token::Quantifier(s, None) => write_meta(f, s),
            Token::Alternator(Some(style)) => write!(f, "<b class=\"{}\">|</b>", style),
            Token::Alternator(None) => f.write_str("<b>|</b>"),
            Token::GroupStart {
                kind,
                style,
                unclosed,
            } => {
                write!(f, "<b class=\"{}\">", style)?;
                if *unclosed {
                    write_error(f, kind.opening(), &ErrorKind::UnbalancedLeftParen)?;
                } else {
                    f.write_str(kind.opening())?;
                }
                f.write_str("</b>")
            }
            Token::GroupEnd(style) => write!(f, "<b class=\"{}\">)</b>", style),
            Token::CharClass(char_class) => write!(f, "<i>{}</i>", char_class),
            Token::Error(s, kind) => write_error(f, s, kind),
        }
    }
}

impl Display for ClassToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ClassToken::Literal(s) => f.write_str(&escape_html(s)),
            ClassToken::Metasequence(s) => write_meta(f, s),
            ClassToken::Shorthand(letter) => write!(f, "<b>\\{}</b>", letter),
            ClassToken::RangeHyphen => f.write_str("<u>-</u>"),
            ClassToken::Error(s, kind) => write_error(f, s, kind),
        }
    }
}

impl Display for CharClass {
    /// Writes the charset without the `<i>` wrapper.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.closed {
            f.write_str(self.opening())?;
        } else {
            write_error(f, self.opening(), &ErrorKind::UnclosedClass)?;
        }

        for item in &self.items {
            write!(f, "{}", item.token)?;
        }

        if self.closed {
            f.write_str("]")?;
        }

        Ok(())
    }
}
