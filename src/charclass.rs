// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Character classes have their own syntax rules which are different
// (sometimes quite subtly) from the surrounding pattern, so a class span
// is lexed separately:
//
// - [ ]      charset
// - [^ ]     negative charset
// - []...]   a `]` right after the opening is a literal char
// - a-z      range, the hyphen is a range operator between two endpoints
// - -a, a-   a hyphen at the start, or at the end of a closed charset,
//            is a literal char
// - \d \D \s \S \w \W
//            shorthand classes, they can not be range endpoints
// - \cX \xhh \uhhhh \0 \12 \377 \n \t ...
//            escaped chars, they can be range endpoints
//
// e.g.
//
// - `[a-zA-Z]`  `zA` is lexed as one literal run, it closes the
//               first range and opens the second one
// - `[a-b-c]`   the second hyphen is a literal char
// - `[z-a]`     reversed range
// - `[\d-z]`    invalid range

use crate::{
    charcode::{
        is_octal_digit, is_shorthand_class_letter, last_utf16_unit, octal_tail_limit,
        token_char_code,
    },
    charwithposition::{CharWithPosition, CharsWithPositionIter},
    error::ErrorKind,
    location::Location,
    peekableiter::PeekableIter,
    token::{CharClass, ClassToken, ClassTokenWithRange},
};

// the lookahead buffer grows past this when needed
pub const CLASS_LEXER_PEEK_CHAR_INITIAL_CAPACITY: usize = 6;

/// The three parts of a charset span, plus any text after its closing `]`.
#[derive(Debug, PartialEq)]
pub struct CharsetParts<'a> {
    pub opening: &'a str, // `[` or `[^`
    pub content: &'a str,
    pub closing: &'a str, // `]` or empty
    pub rest: &'a str,
}

/// Splits a charset span into its parts.
///
/// Returns `None` if the text does not start with `[`.
/// A `]` directly after the opening belongs to the content, so
/// `[]` and `[^]` are unclosed charsets with the content `]`.
pub fn split_charset(s: &str) -> Option<CharsetParts<'_>> {
    let body_start = match s.strip_prefix('[')? {
        after if after.starts_with('^') => 2,
        _ => 1,
    };

    let (opening, body) = s.split_at(body_start);
    let mut chars = body.char_indices().peekable();

    if let Some((_, ']')) = chars.peek() {
        chars.next(); // consume the leading literal ']'
    }

    let mut content_end = body.len();
    let mut closing_end = body.len();

    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next(); // consume the escaped char (if any)
            }
            ']' => {
                content_end = idx;
                closing_end = idx + 1;
                break;
            }
            _ => {}
        }
    }

    Some(CharsetParts {
        opening,
        content: &body[..content_end],
        closing: &body[content_end..closing_end],
        rest: &body[closing_end..],
    })
}

/// Lexes and annotates a charset span, e.g. `[^a-z\d]`.
pub fn lex_charset_from_str(s: &str) -> Option<CharClass> {
    lex_charset_at(s, &Location::new_position(0, 0, 0))
}

/// Lexes a charset span whose first char is located at `start` of
/// the enclosing pattern.
pub(crate) fn lex_charset_at(s: &str, start: &Location) -> Option<CharClass> {
    split_charset(s).map(|parts| lex_charset_parts(&parts, start))
}

/// Lexes the opening and content of an already split charset span.
pub(crate) fn lex_charset_parts(parts: &CharsetParts<'_>, start: &Location) -> CharClass {
    let closed = !parts.closing.is_empty();

    let mut chars = parts.opening.chars().chain(parts.content.chars());
    let mut char_position_iter = CharsWithPositionIter::new_at(&mut chars, *start);
    let mut peekable_char_position_iter =
        PeekableIter::new(&mut char_position_iter, CLASS_LEXER_PEEK_CHAR_INITIAL_CAPACITY);
    let mut lexer = ClassLexer::new(&mut peekable_char_position_iter);

    lexer.consume(parts.opening.len()); // `[` or `[^`, both ASCII
    let lexemes = lexer.lex(parts.content.chars().count());
    let items = annotate_lexemes(&lexemes, closed);

    CharClass {
        negative: parts.opening.len() == 2,
        items,
        closed,
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum LexemeKind {
    Literal, // a run of chars other than `\` and `-`
    Hyphen,
    Escape,
}

#[derive(Debug, PartialEq)]
struct Lexeme {
    kind: LexemeKind,
    text: String,
    range: Location,
}

impl Lexeme {
    /// The letter of a shorthand class escape, e.g. `d` of `\d`.
    fn shorthand_letter(&self) -> Option<char> {
        if self.kind != LexemeKind::Escape {
            return None;
        }

        let mut chars = self.text.chars().skip(1);
        match (chars.next(), chars.next()) {
            (Some(c), None) if is_shorthand_class_letter(c) => Some(c),
            _ => None,
        }
    }

    /// The low surrogate of an escaped char outside the BMP, e.g. `\😀`.
    fn escaped_low_surrogate(&self) -> Option<u32> {
        if self.kind != LexemeKind::Escape {
            return None;
        }

        let mut chars = self.text.chars().skip(1);
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.len_utf16() == 2 => Some(last_utf16_unit(c)),
            _ => None,
        }
    }
}

struct ClassLexer<'a> {
    upstream: &'a mut PeekableIter<'a, CharWithPosition>,
    last_position: Location, // last position consumed
}

impl<'a> ClassLexer<'a> {
    fn new(upstream: &'a mut PeekableIter<'a, CharWithPosition>) -> Self {
        Self {
            upstream,
            last_position: Location::new_position(0, 0, 0),
        }
    }

    fn peek_char(&mut self, offset: usize) -> Option<char> {
        self.upstream.peek(offset).map(|c| c.character)
    }

    fn peek_char_and_matches(&mut self, offset: usize, predicate: fn(char) -> bool) -> bool {
        matches!(self.peek_char(offset), Some(c) if predicate(c))
    }

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
}

impl ClassLexer<'_> {
    fn lex(&mut self, content_length: usize) -> Vec<Lexeme> {
        let mut lexemes = vec![];
        let mut remaining = content_length;

        while remaining > 0 {
            let (kind, length) = match self.peek_char(0) {
                Some('\\') => (LexemeKind::Escape, self.escape_length()),
                Some('-') => (LexemeKind::Hyphen, 1),
                Some(_) => (LexemeKind::Literal, self.literal_run_length(remaining)),
                None => break,
            };

            let length = length.min(remaining);
            let (text, range) = self.consume(length);
            remaining -= length;

            lexemes.push(Lexeme { kind, text, range });
        }

        lexemes
    }

    fn escape_length(&mut self) -> usize {
        // \xxxx?  //
        // ^    ^__// to here
        // |_______// current char, validated

        match self.peek_char(1) {
            None => 1,
            Some(first) if is_octal_digit(first) => {
                let tail_limit = octal_tail_limit(first);
                let tail_length = (0..tail_limit)
                    .take_while(|offset| self.peek_char_and_matches(2 + offset, is_octal_digit))
                    .count();
                2 + tail_length
            }
            Some('x') if self.hex_digits_follow(2, 2) => 4,
            Some('u') if self.hex_digits_follow(2, 4) => 6,
            Some('c') if self.peek_char_and_matches(2, |c| c.is_ascii_alphabetic()) => 3,
            Some(_) => 2,
        }
    }

    fn hex_digits_follow(&mut self, offset: usize, count: usize) -> bool {
        (offset..offset + count).all(|idx| self.peek_char_and_matches(idx, |c| c.is_ascii_hexdigit()))
    }

    fn literal_run_length(&mut self, limit: usize) -> usize {
        let mut length = 0;
        while length < limit
            && self.peek_char_and_matches(length, |c| c != '\\' && c != '-')
        {
            length += 1;
        }
        length
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum LastTokenKind {
    None,
    RangeHyphen,
    Shorthand,
    Other,
}

#[derive(Debug, Clone, Copy)]
struct LastToken {
    rangeable: bool,
    kind: LastTokenKind,
    char_code: Option<u32>,
}

impl LastToken {
    fn new(rangeable: bool, kind: LastTokenKind, char_code: Option<u32>) -> Self {
        Self {
            rangeable,
            kind,
            char_code,
        }
    }

    fn is_range_hyphen(&self) -> bool {
        self.kind == LastTokenKind::RangeHyphen
    }
}

fn annotate_lexemes(lexemes: &[Lexeme], closed: bool) -> Vec<ClassTokenWithRange> {
    let mut items = Vec::with_capacity(lexemes.len());
    let mut last_token = LastToken::new(false, LastTokenKind::None, None);

    for (idx, lexeme) in lexemes.iter().enumerate() {
        // a token right after a range hyphen closes that range, so it can
        // not open another one
        let rangeable = !last_token.is_range_hyphen();

        let token = match lexeme.kind {
            LexemeKind::Escape => match lexeme.text.as_str() {
                r"\c" | r"\u" | r"\x" => {
                    last_token = LastToken::new(rangeable, LastTokenKind::Other, None);
                    ClassToken::Error(lexeme.text.clone(), ErrorKind::IncompleteToken)
                }
                r"\" => {
                    // end of the charset (and of the pattern), the last token
                    // does not matter anymore
                    ClassToken::Error(lexeme.text.clone(), ErrorKind::IncompleteToken)
                }
                text => match lexeme.shorthand_letter() {
                    Some(letter) => {
                        last_token = LastToken::new(rangeable, LastTokenKind::Shorthand, None);
                        ClassToken::Shorthand(letter)
                    }
                    None => {
                        last_token = match lexeme.escaped_low_surrogate() {
                            // only the high surrogate is escaped, the low one
                            // follows as a literal char that can open a range
                            Some(low) => LastToken::new(true, LastTokenKind::Other, Some(low)),
                            None => LastToken::new(
                                rangeable,
                                LastTokenKind::Other,
                                token_char_code(text),
                            ),
                        };
                        ClassToken::Metasequence(text.to_owned())
                    }
                },
            },
            LexemeKind::Hyphen if last_token.rangeable => match lexemes.get(idx + 1) {
                Some(next) => {
                    let token = if is_invalid_range(&last_token, next) {
                        ClassToken::Error(lexeme.text.clone(), ErrorKind::InvalidRange)
                    } else {
                        ClassToken::RangeHyphen
                    };

                    log::trace!("range hyphen at {}: {:?}", lexeme.range.index, token);

                    last_token = LastToken::new(false, LastTokenKind::RangeHyphen, None);
                    token
                }
                None if closed => {
                    // a hyphen at the end of a closed charset is a literal char
                    ClassToken::Literal(lexeme.text.clone())
                }
                None => {
                    // a hyphen at the end of the pattern, it may still
                    // become a range
                    ClassToken::RangeHyphen
                }
            },
            LexemeKind::Hyphen => {
                // a hyphen at the start of the charset or after a
                // non-rangeable token
                last_token = LastToken::new(rangeable, LastTokenKind::Other, None);
                ClassToken::Literal(lexeme.text.clone())
            }
            LexemeKind::Literal => {
                // lengths and codes are in UTF-16 code units
                let multiple_chars = lexeme.text.encode_utf16().nth(1).is_some();
                let char_code = lexeme.text.chars().last().map(last_utf16_unit);
                last_token =
                    LastToken::new(multiple_chars || rangeable, LastTokenKind::Other, char_code);
                ClassToken::Literal(lexeme.text.clone())
            }
        };

        items.push(ClassTokenWithRange::new(token, lexeme.range));
    }

    items
}

/// Checks a hyphen between `last_token` and `next`, e.g. `z-a` (reversed),
/// `\d-z` or `a-\d` (shorthand class endpoint).
fn is_invalid_range(last_token: &LastToken, next: &Lexeme) -> bool {
    let reversed = match (last_token.char_code, token_char_code(&next.text)) {
        (Some(start), Some(end)) => start > end,
        _ => false,
    };

    reversed
        || last_token.kind == LastTokenKind::Shorthand
        || next.shorthand_letter().is_some()
}
