// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::location::Location;

#[derive(Debug, PartialEq)]
pub struct CharWithPosition {
    pub character: char,
    pub position: Location,
}

impl CharWithPosition {
    /// Creates a new `CharWithPosition` instance with the given character and position.
    pub fn new(character: char, position: Location) -> Self {
        Self {
            character,
            position,
        }
    }
}

pub struct CharsWithPositionIter<'a> {
    upstream: &'a mut dyn Iterator<Item = char>,
    current_position: Location,
}

impl<'a> CharsWithPositionIter<'a> {
    /// Creates a new `CharsWithPositionIter` starting at the beginning of the text.
    pub fn new(upstream: &'a mut dyn Iterator<Item = char>) -> Self {
        Self::new_at(upstream, Location::new_position(0, 0, 0))
    }

    /// Creates a new `CharsWithPositionIter` whose first char is at `start`.
    ///
    /// Used when a fragment of a larger text (e.g. a character class span
    /// of a pattern) is lexed on its own.
    pub fn new_at(upstream: &'a mut dyn Iterator<Item = char>, start: Location) -> Self {
        Self {
            upstream,
            current_position: Location::new_position(start.index, start.line, start.column),
        }
    }
}

impl Iterator for CharsWithPositionIter<'_> {
    type Item = CharWithPosition;

    /// Advances the iterator and returns the next `CharWithPosition`.
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.upstream.next()?;
        let last_position = self.current_position;

        self.current_position.index += 1;

        if c == '\n' {
            self.current_position.line += 1;
            self.current_position.column = 0;
        } else {
            self.current_position.column += 1;
        }

        Some(CharWithPosition::new(c, last_position))
    }
}
