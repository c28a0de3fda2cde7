/* Description: Left-to-right evaluation (simulation) methods.

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

//! Left-to-right evaluation (simulation) methods.
//!
//! An evaluator holds a read-only automaton, while all per-run state lives in
//! a separate cache. A single evaluator can therefore drive any number of
//! caches, one per concurrent run.

/// Mutable per-run state for some evaluator `Eval`.
pub trait SearchState<Eval: ?Sized> {
  type Args;

  fn create(args: Self::Args) -> Self;
  fn reset(&mut self, eval: &Eval);
}

pub trait SimpleEvaluator<Cache: SearchState<Self>> {
  type Tok;
  type Success;
  type Err;

  /// Create a cache which has already been reset against `self`.
  fn create_cache(&self, args: Cache::Args) -> Cache {
    let mut cache = Cache::create(args);
    cache.reset(self);
    cache
  }

  fn evaluate(
    &self,
    cache: &mut Cache,
    tokens: impl Iterator<Item=Self::Tok>,
  ) -> Result<Self::Success, Self::Err>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, displaydoc::Display, thiserror::Error)]
pub enum MatchError {
  /// no prefix of the input was accepted after consuming {consumed} symbols
  NoMatch { consumed: usize },
}

pub mod nfa {
  use core::mem;

  use indexmap::IndexSet;

  use super::{MatchError, SearchState, SimpleEvaluator};
  use crate::{
    alphabet::Symbol,
    log::{debug, trace},
    nfa::{self, FxBuildHasher, State},
  };

  /// Drives an [`NFACache`] over a borrowed [`nfa::Universe`].
  #[derive(Copy, Clone)]
  pub struct NFAEvaluator<'n, Sym> {
    nfa: &'n nfa::Universe<Sym>,
  }

  impl<'n, Sym> NFAEvaluator<'n, Sym> {
    pub const fn from_nfa(nfa: &'n nfa::Universe<Sym>) -> Self { Self { nfa } }

    pub const fn nfa(&self) -> &'n nfa::Universe<Sym> { self.nfa }
  }

  impl<'n, Sym> NFAEvaluator<'n, Sym>
  where Sym: Symbol
  {
    /// Reset `cache`, feed it every token, and report whether the final
    /// frontier accepts.
    ///
    /// Returns early once the frontier becomes empty, since no later token
    /// could revive it.
    pub fn accepts_all(&self, cache: &mut NFACache, tokens: impl IntoIterator<Item=Sym>) -> bool {
      cache.reset(self.nfa);
      for tok in tokens.into_iter() {
        cache.apply(self.nfa, tok);
        if cache.is_empty() {
          return false;
        }
      }
      cache.accepts(self.nfa)
    }
  }

  /// The set of currently active states.
  ///
  /// Starts out empty; call [`Self::reset`] to load the start set. Iteration
  /// order follows insertion order, so runs are deterministic.
  #[derive(Debug, Clone)]
  pub struct NFACache {
    current_states: IndexSet<State, FxBuildHasher>,
    /* Scratch space for apply(), swapped with current_states on every step. */
    next_states: IndexSet<State, FxBuildHasher>,
  }

  impl NFACache {
    pub fn new() -> Self { Self::with_capacity(0) }

    pub fn with_capacity(n: usize) -> Self {
      Self {
        current_states: IndexSet::with_capacity_and_hasher(n, FxBuildHasher::default()),
        next_states: IndexSet::with_capacity_and_hasher(n, FxBuildHasher::default()),
      }
    }

    pub fn current_states(&self) -> impl ExactSizeIterator<Item=State>+'_ {
      self.current_states.iter().copied()
    }

    pub fn contains(&self, state: State) -> bool { self.current_states.contains(&state) }

    pub fn len(&self) -> usize { self.current_states.len() }

    pub fn is_empty(&self) -> bool { self.current_states.is_empty() }

    pub fn drain(&mut self) -> impl Iterator<Item=State>+'_ { self.current_states.drain(..) }

    /// Replace the frontier with a fresh copy of `nfa`'s start set.
    pub fn reset<Sym>(&mut self, nfa: &nfa::Universe<Sym>) {
      self.current_states.clear();
      self.current_states.extend(nfa.start_states());
      trace!(active = self.current_states.len(), "reset frontier");
    }

    /// Advance every active state by `sym` at once.
    ///
    /// States without a transition for `sym` drop out; if none have one, the
    /// frontier becomes empty.
    pub fn apply<Sym>(&mut self, nfa: &nfa::Universe<Sym>, sym: Sym)
    where Sym: Symbol {
      self.next_states.clear();
      for state in self.current_states.iter().copied() {
        self.next_states.extend(nfa.destinations(state, sym));
      }
      mem::swap(&mut self.current_states, &mut self.next_states);
      trace!(
        before = self.next_states.len(),
        after = self.current_states.len(),
        "applied symbol"
      );
    }

    /// Whether any active state is an accept state.
    pub fn accepts<Sym>(&self, nfa: &nfa::Universe<Sym>) -> bool {
      self.current_states.iter().any(|s| nfa.is_accept(*s))
    }

    /// Whether [`Self::apply`] with `sym` would leave a non-empty frontier.
    pub fn has_transitions<Sym>(&self, nfa: &nfa::Universe<Sym>, sym: Sym) -> bool
    where Sym: Symbol {
      self
        .current_states
        .iter()
        .any(|s| nfa.has_transitions_from(*s, sym))
    }
  }

  impl Default for NFACache {
    fn default() -> Self { Self::new() }
  }

  impl<'n, Sym> SearchState<NFAEvaluator<'n, Sym>> for NFACache {
    /// Initial capacity of the frontier.
    type Args = usize;

    fn create(args: Self::Args) -> Self { Self::with_capacity(args) }

    fn reset(&mut self, eval: &NFAEvaluator<'n, Sym>) { NFACache::reset(self, eval.nfa); }
  }

  impl<'n, Sym> SimpleEvaluator<NFACache> for NFAEvaluator<'n, Sym>
  where Sym: Symbol
  {
    type Tok = Sym;
    /// Length of the longest accepted prefix.
    type Success = usize;
    type Err = MatchError;

    /// Find the longest prefix of `tokens` which the automaton accepts.
    ///
    /// Stops reading as soon as no active state can advance on the next token,
    /// so `tokens` may be an unbounded stream. An accepting start frontier
    /// matches the empty prefix.
    fn evaluate(
      &self,
      cache: &mut NFACache,
      tokens: impl Iterator<Item=Self::Tok>,
    ) -> Result<Self::Success, Self::Err> {
      cache.reset(self.nfa);

      let mut longest: Option<usize> = if cache.accepts(self.nfa) {
        Some(0)
      } else {
        None
      };
      let mut consumed: usize = 0;
      for tok in tokens {
        if !cache.has_transitions(self.nfa, tok) {
          break;
        }
        cache.apply(self.nfa, tok);
        consumed += 1;
        if cache.accepts(self.nfa) {
          longest = Some(consumed);
        }
      }

      debug!(consumed, longest = ?longest, "evaluated prefix");
      longest.ok_or(MatchError::NoMatch { consumed })
    }
  }

}
