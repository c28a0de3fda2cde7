/* Description: Build and simulate nondeterministic finite automata over symbol streams.

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

//! Build and simulate nondeterministic finite automata over symbol streams.
//!
//! [`Automaton`] bundles one graph with one frontier, for callers which only
//! ever run a single simulation at a time:
//!
//! ```
//! use nfa_engine::Automaton;
//!
//! let mut a = Automaton::new();
//! a.add_state(0, true, false);
//! a.add_transition(0, 'a', 1);
//! a.add_transition(0, 'a', 2);
//! a.add_transition(1, 'b', 3);
//! a.add_transition(2, 'b', 3);
//! a.add_state(3, false, true);
//!
//! a.reset();
//! a.apply('a');
//! assert!(a.has_transitions('b'));
//! a.apply('b');
//! assert!(a.accepts());
//! ```
//!
//! To run several simulations over the same graph at once, build a
//! [`Universe`] directly and give each run its own [`NFACache`].

#![warn(rustdoc::missing_crate_level_docs)]
// #![warn(missing_docs)]
/* Ensure any doctest warnings fails the doctest! */
#![doc(test(attr(deny(warnings))))]

pub use nfa_engine_automata::{
  alphabet::Symbol,
  nfa::{Node, State, Universe},
  simple_eval::{
    nfa::{NFACache, NFAEvaluator},
    MatchError, SearchState, SimpleEvaluator,
  },
};

pub mod scan;

/// A transition graph together with a single execution frontier.
///
/// The frontier is empty until the first [`Self::reset`].
#[derive(Debug, Clone)]
pub struct Automaton<Sym=char> {
  nfa: Universe<Sym>,
  cache: NFACache,
}

impl<Sym> Automaton<Sym> {
  pub fn new() -> Self { Self::from_universe(Universe::new()) }

  pub fn from_universe(nfa: Universe<Sym>) -> Self {
    Self {
      nfa,
      cache: NFACache::new(),
    }
  }

  pub fn universe(&self) -> &Universe<Sym> { &self.nfa }

  pub fn into_universe(self) -> Universe<Sym> { self.nfa }

  pub fn frontier(&self) -> &NFACache { &self.cache }

  /// See [`Universe::add_state`].
  pub fn add_state(&mut self, state: i64, is_start: bool, is_accept: bool) {
    self.nfa.add_state(State(state), is_start, is_accept);
  }

  /// Load a fresh copy of the start set into the frontier.
  pub fn reset(&mut self) { self.cache.reset(&self.nfa); }

  pub fn accepts(&self) -> bool { self.cache.accepts(&self.nfa) }
}

impl<Sym> Default for Automaton<Sym> {
  fn default() -> Self { Self::new() }
}

impl<Sym> Automaton<Sym>
where Sym: Symbol
{
  /// See [`Universe::add_transition`].
  pub fn add_transition(&mut self, source: i64, label: Sym, dest: i64) {
    self.nfa.add_transition(State(source), label, State(dest));
  }

  pub fn apply(&mut self, sym: Sym) { self.cache.apply(&self.nfa, sym); }

  pub fn has_transitions(&self, sym: Sym) -> bool { self.cache.has_transitions(&self.nfa, sym) }
}
