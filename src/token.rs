// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::{error::ErrorKind, location::Location};

/// Rotating style index of a group, from 1 to 5.
///
/// It is a presentation counter for nested groups, not the nesting depth:
/// it wraps from 5 to 1 when groups open and from 1 to 5 when they close.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct GroupStyle(u8);

impl GroupStyle {
    pub const MAX_DEPTH: u8 = 5;

    /// Returns `None` when `depth` is outside `1..=5`.
    pub fn new(depth: u8) -> Option<Self> {
        if (1..=Self::MAX_DEPTH).contains(&depth) {
            Some(Self(depth))
        } else {
            None
        }
    }

    // the style before any group opens, so the first opening rotates to 1
    pub(crate) fn initial() -> Self {
        Self(Self::MAX_DEPTH)
    }

    pub fn depth(&self) -> u8 {
        self.0
    }

    pub fn rotate_up(self) -> Self {
        if self.0 == Self::MAX_DEPTH {
            Self(1)
        } else {
            Self(self.0 + 1)
        }
    }

    pub fn rotate_down(self) -> Self {
        if self.0 == 1 {
            Self(Self::MAX_DEPTH)
        } else {
            Self(self.0 - 1)
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GroupKind {
    Capturing,         // (
    NonCapturing,      // (?:
    LookAhead,         // (?=
    LookAheadNegative, // (?!
}

impl GroupKind {
    pub fn opening(&self) -> &'static str {
        match self {
            GroupKind::Capturing => "(",
            GroupKind::NonCapturing => "(?:",
            GroupKind::LookAhead => "(?=",
            GroupKind::LookAheadNegative => "(?!",
        }
    }

    /// Lookaheads can not be quantified.
    pub fn is_lookahead(&self) -> bool {
        matches!(self, GroupKind::LookAhead | GroupKind::LookAheadNegative)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Literal(String),      // plain text, including escaped literals such as `\.`
    Metasequence(String), // `\d`, `\n`, `\x41`, `\012`, `^`, `$`, `.`
    BackReference(usize), // `\1`

    // `?`, `*?`, `{2,3}` etc., in the style of the group it follows (if any)
    Quantifier(String, Option<GroupStyle>),

    // `|`, in the style of the enclosing group (if any)
    Alternator(Option<GroupStyle>),

    GroupStart {
        kind: GroupKind,
        style: GroupStyle,
        unclosed: bool,
    },
    GroupEnd(GroupStyle),

    CharClass(CharClass),

    Error(String, ErrorKind),
}

#[derive(Debug, PartialEq, Clone)]
pub struct TokenWithRange {
    pub token: Token,
    pub range: Location,
}

impl TokenWithRange {
    pub fn new(token: Token, range: Location) -> Self {
        Self { token, range }
    }
}

/// A character class `[...]` with its annotated content.
#[derive(Debug, PartialEq, Clone)]
pub struct CharClass {
    pub negative: bool, // opened with `[^`
    pub items: Vec<ClassTokenWithRange>,
    pub closed: bool, // has the closing `]`
}

impl CharClass {
    pub fn opening(&self) -> &'static str {
        if self.negative {
            "[^"
        } else {
            "["
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum ClassToken {
    Literal(String),      // a run of plain chars, or a hyphen that is not a range
    Metasequence(String), // single char escapes, e.g. `\n`, `\x41`, `\]`
    Shorthand(char),      // `\d`, `\D`, `\s`, `\S`, `\w`, `\W`
    RangeHyphen,          // `-` between two range endpoints
    Error(String, ErrorKind),
}

#[derive(Debug, PartialEq, Clone)]
pub struct ClassTokenWithRange {
    pub token: ClassToken,
    pub range: Location,
}

impl ClassTokenWithRange {
    pub fn new(token: ClassToken, range: Location) -> Self {
        Self { token, range }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{GroupKind, GroupStyle};

    #[test]
    fn test_group_style_rotation() {
        let style = GroupStyle::initial().rotate_up();
        assert_eq!(style.depth(), 1);

        let deepest = (0..4).fold(style, |s, _| s.rotate_up());
        assert_eq!(deepest.depth(), 5);
        assert_eq!(deepest.rotate_up().depth(), 1);

        assert_eq!(style.rotate_down().depth(), 5);
        assert_eq!(deepest.rotate_down().depth(), 4);

        assert_eq!(GroupStyle::new(0), None);
        assert_eq!(GroupStyle::new(6), None);
        assert_eq!(GroupStyle::new(3).map(|s| s.depth()), Some(3));
    }

    #[test]
    fn test_group_kind() {
        assert_eq!(GroupKind::Capturing.opening(), "(");
        assert_eq!(GroupKind::NonCapturing.opening(), "(?:");
        assert!(!GroupKind::NonCapturing.is_lookahead());
        assert!(GroupKind::LookAhead.is_lookahead());
        assert!(GroupKind::LookAheadNegative.is_lookahead());
    }
}
