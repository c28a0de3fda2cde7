/* Description: Anchored and unanchored matching of strings against an automaton.

Copyright (C) 2024 Danny McClanahan <dmcC2@hypnicjerk.ai>
SPDX-License-Identifier: GPL-3.0-or-later

This file is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as
published by the Free Software Foundation; either version 3 of the
License, or (at your option) any later version.

This file is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>. */

//! Anchored and unanchored matching of strings against an automaton.
//!
//! All offsets are byte offsets into the searched string, and always fall on
//! `char` boundaries.

use core::ops;

use crate::{Automaton, MatchError, NFACache, NFAEvaluator, SimpleEvaluator};

/// A half-open byte range `start..end` of a haystack.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
  pub start: usize,
  pub end: usize,
}

impl Span {
  pub const fn len(&self) -> usize { self.end - self.start }

  pub const fn is_empty(&self) -> bool { self.start == self.end }

  pub const fn range(&self) -> ops::Range<usize> { self.start..self.end }
}

/* Byte length of the first `n` chars of `s`. */
fn byte_len_of_chars(s: &str, n: usize) -> usize {
  s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

impl Automaton<char> {
  /// Whether the whole of `input` is accepted.
  ///
  /// Leaves the frontier wherever the run stopped.
  pub fn is_match(&mut self, input: &str) -> bool {
    let eval = NFAEvaluator::from_nfa(&self.nfa);
    eval.accepts_all(&mut self.cache, input.chars())
  }

  /// The longest accepted prefix of `input`.
  pub fn longest_match(&mut self, input: &str) -> Result<Span, MatchError> {
    let eval = NFAEvaluator::from_nfa(&self.nfa);
    longest_prefix(eval, &mut self.cache, input, 0)
  }

  /// Iterate over leftmost-longest, non-overlapping matches in `haystack`.
  ///
  /// An empty match is reported wherever no longer match begins, after which
  /// the search moves forward by one `char`.
  pub fn find_iter<'s, 'h>(&'s mut self, haystack: &'h str) -> Matches<'s, 'h> {
    Matches {
      eval: NFAEvaluator::from_nfa(&self.nfa),
      cache: &mut self.cache,
      haystack,
      pos: Some(0),
    }
  }
}

fn longest_prefix(
  eval: NFAEvaluator<'_, char>,
  cache: &mut NFACache,
  haystack: &str,
  start: usize,
) -> Result<Span, MatchError> {
  let rest = &haystack[start..];
  let n = eval.evaluate(cache, rest.chars())?;
  let end = start + byte_len_of_chars(rest, n);
  #[cfg(feature = "tracing")]
  tracing::debug!(start, end, "found match");
  Ok(Span { start, end })
}

/// Iterator returned by [`Automaton::find_iter`].
pub struct Matches<'s, 'h> {
  eval: NFAEvaluator<'s, char>,
  cache: &'s mut NFACache,
  haystack: &'h str,
  /* None once the end of the haystack has been searched. */
  pos: Option<usize>,
}

impl<'s, 'h> Matches<'s, 'h> {
  fn advance_one(&mut self, from: usize) {
    self.pos = self.haystack[from..]
      .chars()
      .next()
      .map(|c| from + c.len_utf8());
  }
}

impl<'s, 'h> Iterator for Matches<'s, 'h> {
  type Item = Span;

  fn next(&mut self) -> Option<Span> {
    while let Some(pos) = self.pos {
      match longest_prefix(self.eval, self.cache, self.haystack, pos) {
        Ok(span) if span.is_empty() => {
          self.advance_one(pos);
          return Some(span);
        },
        Ok(span) => {
          self.pos = Some(span.end);
          return Some(span);
        },
        Err(MatchError::NoMatch { .. }) => self.advance_one(pos),
      }
    }
    None
  }
}
