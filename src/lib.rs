// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

mod charcode;
mod charwithposition;
mod peekableiter;

pub mod charclass;
pub mod error;
pub mod lexer;
pub mod location;
pub mod options;
pub mod printer;
pub mod token;

pub use charclass::lex_charset_from_str;
pub use error::{ColorizerError, ErrorKind};
pub use lexer::lex_from_str;
pub use options::ColorizerOptions;
pub use token::{CharClass, ClassToken, GroupKind, GroupStyle, Token, TokenWithRange};

use charclass::{lex_charset_parts, split_charset};
use location::Location;
use printer::{escape_html, print_tokens};

/// Annotates a regular expression pattern with HTML markup.
///
/// Every char of the pattern is kept, in order, and wrapped (possibly
/// entity-escaped) in markup according to its syntactic role. Syntax
/// errors are annotated inline, so this never fails.
///
/// ```
/// assert_eq!(regex_colorizer::annotate("a+"), "a<b>+</b>");
/// assert_eq!(
///     regex_colorizer::annotate("+"),
///     r#"<b class="err" title="Quantifiers must be preceded by a token that can be repeated">+</b>"#
/// );
/// ```
pub fn annotate(pattern: &str) -> String {
    print_tokens(&lex_from_str(pattern))
}

/// Annotates a single character class span such as `[^a-z]`.
///
/// The result has no `<i>` wrapper. Text that does not start with `[` is
/// returned entity-escaped, and text after the closing `]` is appended
/// entity-escaped.
pub fn annotate_class(class_span: &str) -> String {
    match split_charset(class_span) {
        Some(parts) => format!(
            "{}{}",
            lex_charset_parts(&parts, &Location::new_position(0, 0, 0)),
            escape_html(parts.rest)
        ),
        None => escape_html(class_span),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{annotate, annotate_class};

    #[test]
    fn test_annotate() {
        assert_eq!(annotate("abc"), "abc");
        assert_eq!(annotate(r"\1"), r"<b>\1</b>");
        assert_eq!(
            annotate("a{2,1}"),
            r#"a<b class="err" title="Interval quantifier range is reversed">{2,1}</b>"#
        );
    }

    #[test]
    fn test_annotate_class() {
        assert_eq!(annotate_class("[a-c]"), "[a<u>-</u>c]");
        assert_eq!(
            annotate_class("[z-a]"),
            r#"[z<b class="err" title="Reversed or invalid range">-</b>a]"#
        );
        assert_eq!(annotate_class("[a]b<"), "[a]b&lt;");
        assert_eq!(annotate_class("a<b"), "a&lt;b");
        assert_eq!(
            annotate_class("[]"),
            r#"<b class="err" title="Unclosed character class">[</b>]"#
        );
    }
}
