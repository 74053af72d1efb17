// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

/// The kinds of syntax error a pattern can be annotated with.
///
/// These never abort a scan, they are attached to the offending token
/// and rendered inline.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ErrorKind {
    UnclosedClass,
    IncompleteToken,
    InvalidRange,
    InvalidGroupType,
    UnbalancedLeftParen,
    UnbalancedRightParen,
    IntervalOverflow,
    IntervalReversed,
    Unquantifiable,
    ImproperEmptyAlternative,
}

impl ErrorKind {
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::UnclosedClass => "Unclosed character class",
            ErrorKind::IncompleteToken => "Incomplete regex token",
            ErrorKind::InvalidRange => "Reversed or invalid range",
            ErrorKind::InvalidGroupType => "Invalid or unsupported group type",
            ErrorKind::UnbalancedLeftParen => "Unclosed grouping",
            ErrorKind::UnbalancedRightParen => "No matching opening parenthesis",
            ErrorKind::IntervalOverflow => "Interval quantifier cannot use value over 65,535",
            ErrorKind::IntervalReversed => "Interval quantifier range is reversed",
            ErrorKind::Unquantifiable => {
                "Quantifiers must be preceded by a token that can be repeated"
            }
            ErrorKind::ImproperEmptyAlternative => {
                "Empty alternative effectively truncates the regex here"
            }
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Failures outside the annotation itself, e.g. bad options or I/O
/// in the command-line adapter.
#[derive(Debug, thiserror::Error)]
pub enum ColorizerError {
    #[error("Invalid class name \"{0}\", expect a CSS identifier such as \"regex\".")]
    InvalidClassName(String),

    #[error("Can not read patterns: {0}")]
    Io(#[from] std::io::Error),
}
