// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Location {
    pub index: usize,  // The character index in the pattern
    pub line: usize,   // The line number (0-based index)
    pub column: usize, // The column number (0-based index)
    pub length: usize, // The length of the text range in chars; 0 for a single position
}

impl Location {
    /// Create a new `Location` representing a single position.
    pub fn new_position(index: usize, line: usize, column: usize) -> Self {
        Self {
            index,
            line,
            column,
            length: 0,
        }
    }

    /// Create a new `Location` representing a range of text.
    pub fn new_range(index: usize, line: usize, column: usize, length: usize) -> Self {
        Self {
            index,
            line,
            column,
            length,
        }
    }

    /// Create a range `Location` from a starting position and a length.
    pub fn from_position_and_length(position: &Location, length: usize) -> Self {
        Self::new_range(position.index, position.line, position.column, length)
    }

    /// Create a range `Location` from two positions: start and end (inclusive).
    pub fn from_position_pair_with_end_included(
        position_start: &Location,
        position_end_included: &Location,
    ) -> Self {
        Self::new_range(
            position_start.index,
            position_start.line,
            position_start.column,
            position_end_included.index - position_start.index + 1,
        )
    }

    /// The index just past the end of this range.
    pub fn end_index(&self) -> usize {
        self.index + self.length
    }

    /// Split a single-line range into a head of `length` chars and the tail.
    ///
    /// Only used for runs of ASCII digits and the like, which never contain
    /// line breaks, so the column moves along with the index.
    pub fn split_at(&self, length: usize) -> (Location, Location) {
        let head_length = length.min(self.length);
        let head = Self::new_range(self.index, self.line, self.column, head_length);
        let tail = Self::new_range(
            self.index + head_length,
            self.line,
            self.column + head_length,
            self.length - head_length,
        );
        (head, tail)
    }
}
