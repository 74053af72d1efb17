// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Syntax Summary (ECMAScript flavor):
//
// Meta characters and their meanings:
//
// - [ ]      Character set, lexed by the `charclass` module
// - [^ ]     Negated character set
// - {m}      Exact repetition (m times)
// - {m,n}    Repetition range (m to n times)
// - {m,}     At least m repetitions
// - (xyz)    Capturing group
// - (?:xyz)  Non-capturing group
// - (?=xyz)  Positive lookahead
// - (?!xyz)  Negative lookahead
// - *        Zero or more repetitions
// - +        One or more repetitions
// - ?        Optional, or lazy repetition after another quantifier
// - |        Logical OR
// - ^        Start-of-line assertion
// - $        End-of-line assertion
// - .        Any character except newline
// - \        Escape character for special symbols
//
// Escaped characters:
//
// - \0 \012  Null and octal char codes (up to \377)
// - \xhh     Hex char code
// - \uhhhh   Unicode char code
// - \cX      Control char
// - \n \r \t \f \v
//
// Preset character sets: \d \D \s \S \w \W
// Boundary assertions: \b \B
//
// Backreferences:
// - \number  a backreference when at least `number` capturing groups
//            are opened before it, otherwise an octal escape and/or
//            literal digits, e.g. `\10` is backreference 1 followed by
//            the digit 0 if only one group is opened.
//
// Lookbehind and named groups are not supported, `(?` followed by
// anything other than `:`, `=` and `!` is an invalid group type.
//
// The lexer never fails: every malformed token is turned into an
// `Token::Error` and lexing continues with the next char.

use crate::{
    charclass::lex_charset_at,
    charcode::{is_octal_digit, is_pattern_meta_char, octal_tail_limit},
    charwithposition::{CharWithPosition, CharsWithPositionIter},
    error::ErrorKind,
    location::Location,
    peekableiter::PeekableIter,
    token::{GroupKind, GroupStyle, Token, TokenWithRange},
};

// the lookahead buffer grows past this when needed
pub const LEXER_PEEK_CHAR_INITIAL_CAPACITY: usize = 6;

/// The largest value an interval quantifier bound may use.
pub const INTERVAL_BOUND_MAX: u32 = 65535;

pub fn lex_from_str(s: &str) -> Vec<TokenWithRange> {
    let mut chars = s.chars();
    let mut char_position_iter = CharsWithPositionIter::new(&mut chars);
    let mut peekable_char_position_iter =
        PeekableIter::new(&mut char_position_iter, LEXER_PEEK_CHAR_INITIAL_CAPACITY);
    let lexer = Lexer::new(&mut peekable_char_position_iter);
    lexer.lex()
}

/// How a `\` followed by digits `1`-`9` is interpreted.
#[derive(Debug, PartialEq)]
pub enum NumericEscape<'a> {
    BackReference {
        number: usize,
        trailing_digits: &'a str,
    },
    Octal {
        digits: &'a str, // without the leading `\`
        trailing_digits: &'a str,
    },
}

/// Resolves the backreference/octal ambiguity of `\` followed by `digits`.
///
/// While the number exceeds the capturing groups opened so far, its last
/// digit is dropped. What remains (if anything) is a backreference.
/// Otherwise the digits form an octal escape (e.g. `\12`, `\377`, `\8`)
/// followed by literal digits.
pub fn resolve_numeric_escape(digits: &str, capturing_group_count: usize) -> NumericEscape<'_> {
    let mut end = digits.len();

    // digits too long for `usize` always exceed the count
    while end > 0
        && digits[..end]
            .parse::<usize>()
            .map_or(true, |number| number > capturing_group_count)
    {
        end -= 1;
    }

    if end > 0 {
        if let Ok(number) = digits[..end].parse::<usize>() {
            return NumericEscape::BackReference {
                number,
                trailing_digits: &digits[end..],
            };
        }
    }

    let first = digits.chars().next().unwrap_or('0');
    let octal_length = 1 + digits
        .chars()
        .skip(1)
        .take(octal_tail_limit(first))
        .take_while(|c| is_octal_digit(*c))
        .count();
    let octal_length = octal_length.min(digits.len());

    NumericEscape::Octal {
        digits: &digits[..octal_length],
        trailing_digits: &digits[octal_length..],
    }
}

/// Checks the bounds of an interval quantifier such as `{2,5}?`.
///
/// Returns `None` for other quantifiers and for valid intervals.
pub fn check_interval(notation: &str) -> Option<ErrorKind> {
    let inner = notation.strip_prefix('{')?;
    let (bounds, _) = inner.split_once('}')?;

    let (lower, upper) = match bounds.split_once(',') {
        Some((lower, upper)) => (lower, Some(upper).filter(|u| !u.is_empty())),
        None => (bounds, None),
    };

    // a bound too long for `u32` exceeds the maximum as well
    let parse_bound = |s: &str| s.parse::<u32>().ok().filter(|n| *n <= INTERVAL_BOUND_MAX);

    let lower = match parse_bound(lower) {
        Some(n) => n,
        None => return Some(ErrorKind::IntervalOverflow),
    };

    match upper.map(parse_bound) {
        Some(None) => Some(ErrorKind::IntervalOverflow),
        Some(Some(upper)) if upper < lower => Some(ErrorKind::IntervalReversed),
        _ => None,
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum LastTokenKind {
    None, // nothing lexed yet
    Alternator,
    Other,
}

/// What the next token needs to know about the previous one.
#[derive(Debug, Clone, Copy)]
struct LastToken {
    quantifiable: bool,
    kind: LastTokenKind,
    // the style of a group closed right before, for its quantifier
    style: Option<GroupStyle>,
}

impl LastToken {
    fn quantifiable(quantifiable: bool) -> Self {
        Self {
            quantifiable,
            kind: LastTokenKind::Other,
            style: None,
        }
    }
}

struct OpenGroup {
    token_index: usize,
    kind: GroupKind,
}

struct Lexer<'a> {
    upstream: &'a mut PeekableIter<'a, CharWithPosition>,
    last_position: Location, // last position consumed

    token_with_ranges: Vec<TokenWithRange>,
    last_token: LastToken,
    open_groups: Vec<OpenGroup>,
    group_style: GroupStyle,
    capturing_group_count: usize,
}

impl<'a> Lexer<'a> {
    fn new(upstream: &'a mut PeekableIter<'a, CharWithPosition>) -> Self {
        Self {
            upstream,
            last_position: Location::new_position(0, 0, 0),
            token_with_ranges: vec![],
            last_token: LastToken {
                quantifiable: false,
                kind: LastTokenKind::None,
                style: None,
            },
            open_groups: vec![],
            group_style: GroupStyle::initial(),
            capturing_group_count: 0,
        }
    }

    fn peek_char(&mut self, offset: usize) -> Option<char> {
        self.upstream.peek(offset).map(|c| c.character)
    }

    fn peek_char_and_equals(&mut self, offset: usize, expected_char: char) -> bool {
        self.peek_char(offset) == Some(expected_char)
    }

    fn peek_char_and_matches(&mut self, offset: usize, predicate: fn(char) -> bool) -> bool {
        matches!(self.peek_char(offset), Some(c) if predicate(c))
    }

    /// Counts the chars from `offset` on that satisfy `predicate`.
    fn peek_run_length(&mut self, offset: usize, predicate: fn(char) -> bool) -> usize {
        let mut length = 0;
        while self.peek_char_and_matches(offset + length, predicate) {
            length += 1;
        }
        length
    }

    /// Consumes `count` chars and returns their text and range.
    fn consume(&mut self, count: usize) -> (String, Location) {
        let mut text = String::new();
        let mut first_position: Option<Location> = None;

        for _ in 0..count {
            let Some(CharWithPosition {
                character,
                position,
            }) = self.upstream.next()
            else {
                break;
            };

            first_position.get_or_insert(position);
            self.last_position = position;
            text.push(character);
        }

        let range = match first_position {
            Some(start) => {
                Location::from_position_pair_with_end_included(&start, &self.last_position)
            }
            None => Location::from_position_and_length(&self.last_position, 0),
        };

        (text, range)
    }

    fn push_token(&mut self, token: Token, range: Location) {
        log::trace!("token at {}..{}: {:?}", range.index, range.end_index(), token);
        self.token_with_ranges.push(TokenWithRange::new(token, range));
    }
}

impl Lexer<'_> {
    fn lex(mut self) -> Vec<TokenWithRange> {
        while let Some(current_char) = self.peek_char(0) {
            match current_char {
                '[' => {
                    self.lex_charset();
                }
                '\\' => {
                    self.lex_escaping();
                }
                '(' => {
                    self.lex_group_start();
                }
                ')' => {
                    self.lex_group_end();
                }
                '?' | '*' | '+' => {
                    let length = if self.peek_char_and_equals(1, '?') {
                        2 // lazy
                    } else {
                        1
                    };
                    self.lex_quantifier(length);
                }
                '{' => match self.peek_interval_length() {
                    Some(length) => self.lex_quantifier(length),
                    None => {
                        // not an interval, e.g. `{`, `{a}`, `{,3}`
                        self.lex_literal(1);
                    }
                },
                '|' => {
                    self.lex_alternator();
                }
                '^' | '$' => {
                    let (text, range) = self.consume(1);
                    self.push_token(Token::Metasequence(text), range);
                    self.last_token = LastToken::quantifiable(false);
                }
                '.' => {
                    let (text, range) = self.consume(1);
                    self.push_token(Token::Metasequence(text), range);
                    self.last_token = LastToken::quantifiable(true);
                }
                _ => {
                    let length = self.peek_run_length(0, |c| !is_pattern_meta_char(c));
                    self.lex_literal(length);
                }
            }
        }

        self.mark_unclosed_groups();
        self.token_with_ranges
    }

    fn lex_literal(&mut self, length: usize) {
        let (text, range) = self.consume(length);
        self.push_token(Token::Literal(text), range);
        self.last_token = LastToken::quantifiable(true);
    }

    fn lex_charset(&mut self) {
        // [.....]?  //
        // ^      ^__// to here
        // |_________// current char, validated
        //
        // also `[^.....]` and `[]...]`

        let mut length = 1;

        if self.peek_char_and_equals(length, '^') {
            length += 1;
        }

        if self.peek_char_and_equals(length, ']') {
            length += 1; // literal ']'
        }

        while let Some(current_char) = self.peek_char(length) {
            length += 1;

            match current_char {
                ']' => break,
                '\\' if self.peek_char(length).is_some() => {
                    length += 1; // escaped char
                }
                _ => {}
            }
        }

        let (text, range) = self.consume(length);

        match lex_charset_at(&text, &range) {
            Some(char_class) => self.push_token(Token::CharClass(char_class), range),
            None => self.push_token(Token::Literal(text), range),
        }

        self.last_token = LastToken::quantifiable(true);
    }

    fn lex_escaping(&mut self) {
        // \xxxx?  //
        // ^    ^__// to here
        // |_______// current char, validated

        let Some(first) = self.peek_char(1) else {
            // `\` | EOF
            let (text, range) = self.consume(1);
            self.push_token(Token::Error(text, ErrorKind::IncompleteToken), range);
            return;
        };

        match first {
            '1'..='9' => {
                self.lex_numeric_escaping();
                return;
            }
            '0' => {
                // null char, optionally followed by octal digits, e.g. `\012`
                let tail_limit = match self.peek_char(2) {
                    Some(c) if is_octal_digit(c) => 1 + octal_tail_limit(c),
                    _ => 0,
                };
                let tail_length = (0..tail_limit)
                    .take_while(|offset| self.peek_char_and_matches(2 + offset, is_octal_digit))
                    .count();
                self.lex_metasequence(2 + tail_length, true);
            }
            'x' => self.lex_char_code_escaping(2, |c| c.is_ascii_hexdigit()),
            'u' => self.lex_char_code_escaping(4, |c| c.is_ascii_hexdigit()),
            'c' => self.lex_char_code_escaping(1, |c| c.is_ascii_alphabetic()),
            'b' | 'B' => {
                // boundary assertions can not be quantified
                self.lex_metasequence(2, false);
            }
            'd' | 'D' | 'f' | 'n' | 'r' | 's' | 'S' | 't' | 'v' | 'w' | 'W' => {
                self.lex_metasequence(2, true);
            }
            _ => {
                // escaped literal char, e.g. `\.`, `\\`, `\k`
                self.lex_literal(2);
            }
        }
    }

    fn lex_metasequence(&mut self, length: usize, quantifiable: bool) {
        let (text, range) = self.consume(length);
        self.push_token(Token::Metasequence(text), range);
        self.last_token = LastToken::quantifiable(quantifiable);
    }

    /// `\xhh`, `\uhhhh` and `\cX`, where exactly `count` chars must follow
    /// the letter, otherwise the two chars `\x`, `\u` or `\c` are an
    /// incomplete token.
    fn lex_char_code_escaping(&mut self, count: usize, predicate: fn(char) -> bool) {
        if (2..2 + count).all(|offset| self.peek_char_and_matches(offset, predicate)) {
            self.lex_metasequence(2 + count, true);
        } else {
            let (text, range) = self.consume(2);
            self.push_token(Token::Error(text, ErrorKind::IncompleteToken), range);
            self.last_token = LastToken::quantifiable(false);
        }
    }

    fn lex_numeric_escaping(&mut self) {
        // \123456N  //
        // ^      ^__// to here
        // |_________// current char, validated

        let digit_count = self.peek_run_length(1, |c| c.is_ascii_digit());
        let (text, range) = self.consume(1 + digit_count);
        let digits = &text[1..];

        let (head_length, head_token, trailing_digits) =
            match resolve_numeric_escape(digits, self.capturing_group_count) {
                NumericEscape::BackReference {
                    number,
                    trailing_digits,
                } => (
                    text.len() - trailing_digits.len(),
                    Token::BackReference(number),
                    trailing_digits.to_owned(),
                ),
                NumericEscape::Octal {
                    digits,
                    trailing_digits,
                } => (
                    1 + digits.len(),
                    Token::Metasequence(format!("\\{}", digits)),
                    trailing_digits.to_owned(),
                ),
            };

        // all chars are ASCII, so byte lengths equal char lengths
        let (head_range, trailing_range) = range.split_at(head_length);

        self.push_token(head_token, head_range);

        if !trailing_digits.is_empty() {
            self.push_token(Token::Literal(trailing_digits), trailing_range);
        }

        self.last_token = LastToken::quantifiable(true);
    }

    fn lex_group_start(&mut self) {
        // (?:...  //
        // ^  ^____// to here
        // |_______// current char, validated

        let kind = if self.peek_char_and_equals(1, '?') {
            match self.peek_char(2) {
                Some(':') => Some(GroupKind::NonCapturing),
                Some('=') => Some(GroupKind::LookAhead),
                Some('!') => Some(GroupKind::LookAheadNegative),
                _ => None,
            }
        } else {
            Some(GroupKind::Capturing)
        };

        match kind {
            Some(kind) => {
                let (_, range) = self.consume(kind.opening().len());

                if kind == GroupKind::Capturing {
                    self.capturing_group_count += 1;
                }

                self.group_style = self.group_style.rotate_up();
                self.open_groups.push(OpenGroup {
                    token_index: self.token_with_ranges.len(),
                    kind,
                });

                self.push_token(
                    Token::GroupStart {
                        kind,
                        style: self.group_style,
                        unclosed: false,
                    },
                    range,
                );
            }
            None => {
                // e.g. `(?<name>`, `(?<=`, `(?` | EOF
                // not counted towards the group depth or count
                let (text, range) = self.consume(2);
                self.push_token(Token::Error(text, ErrorKind::InvalidGroupType), range);
            }
        }

        self.last_token = LastToken::quantifiable(false);
    }

    fn lex_group_end(&mut self) {
        let (text, range) = self.consume(1);

        match self.open_groups.pop() {
            Some(open_group) => {
                let style = self.group_style;
                self.push_token(Token::GroupEnd(style), range);

                // quantified lookaheads are flagged
                self.last_token = LastToken {
                    quantifiable: !open_group.kind.is_lookahead(),
                    kind: LastTokenKind::Other,
                    style: Some(style),
                };

                self.group_style = self.group_style.rotate_down();
            }
            None => {
                self.push_token(Token::Error(text, ErrorKind::UnbalancedRightParen), range);
                self.last_token = LastToken::quantifiable(false);
            }
        }
    }

    /// Returns the length of the interval quantifier at the current
    /// position, e.g. `{3}`, `{3,}`, `{3,5}` and `{3,5}?`.
    fn peek_interval_length(&mut self) -> Option<usize> {
        // {123,456}?  //
        // ^         ^_// to here
        // |___________// current char, validated

        let lower_length = self.peek_run_length(1, |c| c.is_ascii_digit());
        if lower_length == 0 {
            return None;
        }

        let mut length = 1 + lower_length;

        if self.peek_char_and_equals(length, ',') {
            length += 1;
            length += self.peek_run_length(length, |c| c.is_ascii_digit());
        }

        if !self.peek_char_and_equals(length, '}') {
            return None;
        }

        length += 1;

        if self.peek_char_and_equals(length, '?') {
            length += 1; // lazy
        }

        Some(length)
    }

    fn lex_quantifier(&mut self, length: usize) {
        let (text, range) = self.consume(length);

        let token = if self.last_token.quantifiable {
            match check_interval(&text) {
                Some(kind) => Token::Error(text, kind),
                None => Token::Quantifier(text, self.last_token.style),
            }
        } else {
            Token::Error(text, ErrorKind::Unquantifiable)
        };

        self.push_token(token, range);
        self.last_token = LastToken::quantifiable(false);
    }

    fn lex_alternator(&mut self) {
        let (text, range) = self.consume(1);

        // a `|` at the very start, or two top-level `|` in a row, leave an
        // empty alternative which effectively truncates the pattern
        let empty_alternative = match self.last_token.kind {
            LastTokenKind::None => true,
            LastTokenKind::Alternator => self.open_groups.is_empty(),
            LastTokenKind::Other => false,
        };

        let token = if empty_alternative {
            Token::Error(text, ErrorKind::ImproperEmptyAlternative)
        } else if self.open_groups.is_empty() {
            Token::Alternator(None)
        } else {
            Token::Alternator(Some(self.group_style))
        };

        self.push_token(token, range);
        self.last_token = LastToken {
            quantifiable: false,
            kind: LastTokenKind::Alternator,
            style: None,
        };
    }

    /// Flags the openings of the groups that are never closed.
    fn mark_unclosed_groups(&mut self) {
        if !self.open_groups.is_empty() {
            log::debug!("{} unclosed group(s)", self.open_groups.len());
        }

        for open_group in self.open_groups.drain(..) {
            if let Some(TokenWithRange {
                token: Token::GroupStart { unclosed, .. },
                ..
            }) = self.token_with_ranges.get_mut(open_group.token_index)
            {
                *unclosed = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        error::ErrorKind,
        location::Location,
        token::{GroupKind, GroupStyle, Token, TokenWithRange},
    };

    use super::{check_interval, lex_from_str, resolve_numeric_escape, NumericEscape};

    fn lex_from_str_without_location(s: &str) -> Vec<Token> {
        lex_from_str(s).into_iter().map(|e| e.token).collect()
    }

    fn style(depth: u8) -> GroupStyle {
        GroupStyle::new(depth).unwrap()
    }

    fn literal(s: &str) -> Token {
        Token::Literal(s.to_owned())
    }

    fn meta(s: &str) -> Token {
        Token::Metasequence(s.to_owned())
    }

    fn quantifier(s: &str, depth: Option<u8>) -> Token {
        Token::Quantifier(s.to_owned(), depth.map(style))
    }

    fn error(s: &str, kind: ErrorKind) -> Token {
        Token::Error(s.to_owned(), kind)
    }

    fn group_start(kind: GroupKind, depth: u8) -> Token {
        Token::GroupStart {
            kind,
            style: style(depth),
            unclosed: false,
        }
    }

    #[test]
    fn test_resolve_numeric_escape() {
        assert_eq!(
            resolve_numeric_escape("1", 1),
            NumericEscape::BackReference {
                number: 1,
                trailing_digits: ""
            }
        );

        assert_eq!(
            resolve_numeric_escape("10", 1),
            NumericEscape::BackReference {
                number: 1,
                trailing_digits: "0"
            }
        );

        assert_eq!(
            resolve_numeric_escape("12", 12),
            NumericEscape::BackReference {
                number: 12,
                trailing_digits: ""
            }
        );

        assert_eq!(
            resolve_numeric_escape("1", 0),
            NumericEscape::Octal {
                digits: "1",
                trailing_digits: ""
            }
        );

        assert_eq!(
            resolve_numeric_escape("3777", 2),
            NumericEscape::Octal {
                digits: "377",
                trailing_digits: "7"
            }
        );

        assert_eq!(
            resolve_numeric_escape("478", 0),
            NumericEscape::Octal {
                digits: "47",
                trailing_digits: "8"
            }
        );

        assert_eq!(
            resolve_numeric_escape("81", 0),
            NumericEscape::Octal {
                digits: "8",
                trailing_digits: "1"
            }
        );

        assert_eq!(
            resolve_numeric_escape("19", 0),
            NumericEscape::Octal {
                digits: "1",
                trailing_digits: "9"
            }
        );

        // far beyond `usize`
        assert_eq!(
            resolve_numeric_escape("2999999999999999999999999", 2),
            NumericEscape::BackReference {
                number: 2,
                trailing_digits: "999999999999999999999999"
            }
        );
    }

    #[test]
    fn test_check_interval() {
        assert_eq!(check_interval("*"), None);
        assert_eq!(check_interval("+?"), None);
        assert_eq!(check_interval("{3}"), None);
        assert_eq!(check_interval("{3,}"), None);
        assert_eq!(check_interval("{3,3}?"), None);
        assert_eq!(check_interval("{0,65535}"), None);
        assert_eq!(check_interval("{65536}"), Some(ErrorKind::IntervalOverflow));
        assert_eq!(check_interval("{1,65536}"), Some(ErrorKind::IntervalOverflow));
        assert_eq!(
            check_interval("{99999999999999999999,}"),
            Some(ErrorKind::IntervalOverflow)
        );
        assert_eq!(check_interval("{2,1}"), Some(ErrorKind::IntervalReversed));
        assert_eq!(check_interval("{70000,1}"), Some(ErrorKind::IntervalOverflow));
    }

    #[test]
    fn test_lex_literals_and_metasequences() {
        assert_eq!(lex_from_str_without_location(""), vec![]);

        assert_eq!(
            lex_from_str_without_location("ab c]}-"),
            vec![literal("ab c]}-")]
        );

        assert_eq!(
            lex_from_str_without_location("^a.b$"),
            vec![
                meta("^"),
                literal("a"),
                meta("."),
                literal("b"),
                meta("$")
            ]
        );

        // escaped literal chars
        assert_eq!(
            lex_from_str_without_location(r"\.\\\k\<"),
            vec![literal(r"\."), literal(r"\\"), literal(r"\k"), literal(r"\<")]
        );

        // a `{` that does not start an interval
        assert_eq!(
            lex_from_str_without_location("a{b}{,2}"),
            vec![
                literal("a"),
                literal("{"),
                literal("b}"),
                literal("{"),
                literal(",2}")
            ]
        );

        // location
        assert_eq!(
            lex_from_str("文\nb*"),
            vec![
                TokenWithRange::new(literal("文\nb"), Location::new_range(0, 0, 0, 3)),
                TokenWithRange::new(quantifier("*", None), Location::new_range(3, 1, 1, 1)),
            ]
        );
    }

    #[test]
    fn test_lex_escapes() {
        assert_eq!(
            lex_from_str_without_location(r"\d\D\s\S\w\W\f\n\r\t\v"),
            vec![
                meta(r"\d"),
                meta(r"\D"),
                meta(r"\s"),
                meta(r"\S"),
                meta(r"\w"),
                meta(r"\W"),
                meta(r"\f"),
                meta(r"\n"),
                meta(r"\r"),
                meta(r"\t"),
                meta(r"\v"),
            ]
        );

        assert_eq!(
            lex_from_str_without_location(r"\0\012\0777\x4Fé\cJ"),
            vec![
                meta(r"\0"),
                meta(r"\012"),
                meta(r"\077"),
                literal("7"),
                meta(r"\x4F"),
                literal("é"),
                meta(r"\cJ"),
            ]
        );

        // incomplete tokens only cover the escape letter
        assert_eq!(
            lex_from_str_without_location(r"\x4G\u123\c?"),
            vec![
                error(r"\x", ErrorKind::IncompleteToken),
                literal("4G"),
                error(r"\u", ErrorKind::IncompleteToken),
                literal("123"),
                error(r"\c", ErrorKind::IncompleteToken),
                error("?", ErrorKind::Unquantifiable),
            ]
        );

        assert_eq!(
            lex_from_str_without_location(r"a\"),
            vec![literal("a"), error(r"\", ErrorKind::IncompleteToken)]
        );

        // boundary assertions are not quantifiable
        assert_eq!(
            lex_from_str_without_location(r"\b+\w+"),
            vec![
                meta(r"\b"),
                error("+", ErrorKind::Unquantifiable),
                meta(r"\w"),
                quantifier("+", None),
            ]
        );
    }

    #[test]
    fn test_lex_backreferences() {
        assert_eq!(
            lex_from_str_without_location(r"\1(a)\1\10\2"),
            vec![
                meta(r"\1"),
                group_start(GroupKind::Capturing, 1),
                literal("a"),
                Token::GroupEnd(style(1)),
                Token::BackReference(1),
                Token::BackReference(1),
                literal("0"),
                meta(r"\2"),
            ]
        );

        // non-capturing groups are not counted
        assert_eq!(
            lex_from_str_without_location(r"(?:a)\1"),
            vec![
                group_start(GroupKind::NonCapturing, 1),
                literal("a"),
                Token::GroupEnd(style(1)),
                meta(r"\1"),
            ]
        );

        // location of the trailing digits
        assert_eq!(
            lex_from_str(r"()\19"),
            vec![
                TokenWithRange::new(
                    group_start(GroupKind::Capturing, 1),
                    Location::new_range(0, 0, 0, 1)
                ),
                TokenWithRange::new(Token::GroupEnd(style(1)), Location::new_range(1, 0, 1, 1)),
                TokenWithRange::new(Token::BackReference(1), Location::new_range(2, 0, 2, 2)),
                TokenWithRange::new(literal("9"), Location::new_range(4, 0, 4, 1)),
            ]
        );
    }

    #[test]
    fn test_lex_groups() {
        assert_eq!(
            lex_from_str_without_location("(a(?:b(?=c(?!d))))"),
            vec![
                group_start(GroupKind::Capturing, 1),
                literal("a"),
                group_start(GroupKind::NonCapturing, 2),
                literal("b"),
                group_start(GroupKind::LookAhead, 3),
                literal("c"),
                group_start(GroupKind::LookAheadNegative, 4),
                literal("d"),
                Token::GroupEnd(style(4)),
                Token::GroupEnd(style(3)),
                Token::GroupEnd(style(2)),
                Token::GroupEnd(style(1)),
            ]
        );

        // the style wraps around after five levels
        let tokens = lex_from_str_without_location("((((((a))))))");
        assert_eq!(tokens[5], group_start(GroupKind::Capturing, 1));
        assert_eq!(tokens[7], Token::GroupEnd(style(1)));
        assert_eq!(tokens[8], Token::GroupEnd(style(5)));

        // sibling groups after a closed group
        assert_eq!(
            lex_from_str_without_location("()()"),
            vec![
                group_start(GroupKind::Capturing, 1),
                Token::GroupEnd(style(1)),
                group_start(GroupKind::Capturing, 1),
                Token::GroupEnd(style(1)),
            ]
        );
    }

    #[test]
    fn test_lex_invalid_groups() {
        assert_eq!(
            lex_from_str_without_location("(?<n>a)"),
            vec![
                error("(?", ErrorKind::InvalidGroupType),
                literal("<n>a"),
                error(")", ErrorKind::UnbalancedRightParen),
            ]
        );

        assert_eq!(
            lex_from_str_without_location("(?"),
            vec![error("(?", ErrorKind::InvalidGroupType)]
        );

        assert_eq!(
            lex_from_str_without_location("a)"),
            vec![literal("a"), error(")", ErrorKind::UnbalancedRightParen)]
        );

        // unclosed groups are flagged after lexing
        assert_eq!(
            lex_from_str_without_location("((a)"),
            vec![
                Token::GroupStart {
                    kind: GroupKind::Capturing,
                    style: style(1),
                    unclosed: true,
                },
                group_start(GroupKind::Capturing, 2),
                literal("a"),
                Token::GroupEnd(style(2)),
            ]
        );
    }

    #[test]
    fn test_lex_quantifiers() {
        assert_eq!(
            lex_from_str_without_location("a?b*?c+d{2}e{2,}?f{2,3}"),
            vec![
                literal("a"),
                quantifier("?", None),
                literal("b"),
                quantifier("*?", None),
                literal("c"),
                quantifier("+", None),
                literal("d"),
                quantifier("{2}", None),
                literal("e"),
                quantifier("{2,}?", None),
                literal("f"),
                quantifier("{2,3}", None),
            ]
        );

        // quantifiers after groups use the style of the group
        assert_eq!(
            lex_from_str_without_location("(a)+"),
            vec![
                group_start(GroupKind::Capturing, 1),
                literal("a"),
                Token::GroupEnd(style(1)),
                quantifier("+", Some(1)),
            ]
        );

        // lookaheads and quantifiers are not quantifiable
        assert_eq!(
            lex_from_str_without_location("(?=a)*b+*a???"),
            vec![
                group_start(GroupKind::LookAhead, 1),
                literal("a"),
                Token::GroupEnd(style(1)),
                error("*", ErrorKind::Unquantifiable),
                literal("b"),
                quantifier("+", None),
                error("*", ErrorKind::Unquantifiable),
                literal("a"),
                quantifier("??", None),
                error("?", ErrorKind::Unquantifiable),
            ]
        );

        assert_eq!(
            lex_from_str_without_location("a{2,1}b{65536}|{1}"),
            vec![
                literal("a"),
                error("{2,1}", ErrorKind::IntervalReversed),
                literal("b"),
                error("{65536}", ErrorKind::IntervalOverflow),
                Token::Alternator(None),
                error("{1}", ErrorKind::Unquantifiable),
            ]
        );

        // charsets are quantifiable
        assert_eq!(
            lex_from_str_without_location("[a]{3}").get(1),
            Some(&quantifier("{3}", None))
        );
    }

    #[test]
    fn test_lex_alternators() {
        assert_eq!(
            lex_from_str_without_location("|a||b(c||d)"),
            vec![
                error("|", ErrorKind::ImproperEmptyAlternative),
                literal("a"),
                Token::Alternator(None),
                error("|", ErrorKind::ImproperEmptyAlternative),
                literal("b"),
                group_start(GroupKind::Capturing, 1),
                literal("c"),
                Token::Alternator(Some(style(1))),
                Token::Alternator(Some(style(1))),
                literal("d"),
                Token::GroupEnd(style(1)),
            ]
        );

        // an alternator right after a group opening is fine
        assert_eq!(
            lex_from_str_without_location("(|a)"),
            vec![
                group_start(GroupKind::Capturing, 1),
                Token::Alternator(Some(style(1))),
                literal("a"),
                Token::GroupEnd(style(1)),
            ]
        );
    }

    #[test]
    fn test_lex_charset() {
        let tokens = lex_from_str(r"a[^\]b-]c");

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].token, literal("a"));
        assert_eq!(tokens[1].range, Location::new_range(1, 0, 1, 7));
        assert!(matches!(
            &tokens[1].token,
            Token::CharClass(c) if c.negative && c.closed && c.items.len() == 3
        ));
        assert_eq!(tokens[2].token, literal("c"));

        // unclosed charset runs to the end of the pattern
        let tokens = lex_from_str("[a(b");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(
            &tokens[0].token,
            Token::CharClass(c) if !c.closed
        ));
    }
}
