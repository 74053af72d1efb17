// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::collections::VecDeque;

/// An iterator adapter that can look any number of items ahead.
///
/// Peeked items are buffered, `initial_capacity` only sizes the buffer
/// for the usual lookahead distance.
pub struct PeekableIter<'a, T> {
    upstream: &'a mut dyn Iterator<Item = T>,
    buffer: VecDeque<T>,
}

impl<'a, T> PeekableIter<'a, T> {
    pub fn new(upstream: &'a mut dyn Iterator<Item = T>, initial_capacity: usize) -> Self {
        Self {
            upstream,
            buffer: VecDeque::with_capacity(initial_capacity),
        }
    }

    /// Returns the item `offset` positions ahead without consuming anything.
    pub fn peek(&mut self, offset: usize) -> Option<&T> {
        while self.buffer.len() <= offset {
            let item = self.upstream.next()?;
            self.buffer.push_back(item);
        }

        self.buffer.get(offset)
    }
}

impl<T> Iterator for PeekableIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.buffer.pop_front() {
            Some(item) => Some(item),
            None => self.upstream.next(),
        }
    }
}
