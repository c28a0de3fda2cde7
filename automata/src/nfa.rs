/* Description: Non-deterministic finite automaton structure.

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

//! Non-deterministic finite automaton structure.
//!
//! A [`Universe`] maps sparse [`State`] ids to their outgoing transitions,
//! each label leading to a *set* of destinations. Construction is additive
//! only: states and transitions can be added but never removed.

use core::{fmt, hash::BuildHasherDefault};

use hashbrown::{HashMap, HashSet};
use rustc_hash::FxHasher;

use crate::alphabet::Symbol;

pub(crate) type FxBuildHasher = BuildHasherDefault<FxHasher>;

type StateSet = HashSet<State, FxBuildHasher>;

/// A state id. Ids are sparse and may be negative.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[repr(transparent)]
pub struct State(pub i64);

static_assertions::assert_eq_size!(State, i64);

impl From<i64> for State {
  fn from(x: i64) -> Self { Self(x) }
}

impl From<State> for i64 {
  fn from(x: State) -> Self { x.0 }
}

#[derive(Clone)]
pub struct Node<Sym> {
  trans: HashMap<Sym, StateSet, FxBuildHasher>,
}

impl<Sym> Node<Sym> {
  pub fn new() -> Self {
    Self {
      trans: HashMap::with_hasher(FxBuildHasher::default()),
    }
  }

  /// Whether this state has no outgoing transitions at all.
  pub fn is_empty(&self) -> bool { self.trans.is_empty() }

  pub fn labels(&self) -> impl Iterator<Item=&Sym>+'_ { self.trans.keys() }

  /// Number of distinct `(label, destination)` pairs leaving this state.
  pub fn num_transitions(&self) -> usize { self.trans.values().map(|dests| dests.len()).sum() }
}

impl<Sym> Default for Node<Sym> {
  fn default() -> Self { Self::new() }
}

impl<Sym> Node<Sym>
where Sym: Symbol
{
  pub fn destinations(&self, sym: Sym) -> impl Iterator<Item=State>+'_ {
    self
      .trans
      .get(&sym)
      .into_iter()
      .flat_map(|dests| dests.iter().copied())
  }

  pub fn has_transitions(&self, sym: Sym) -> bool {
    self
      .trans
      .get(&sym)
      .is_some_and(|dests| !dests.is_empty())
  }

  fn insert(&mut self, sym: Sym, dest: State) -> bool {
    self.trans.entry(sym).or_default().insert(dest)
  }
}

impl<Sym> PartialEq for Node<Sym>
where Sym: Symbol
{
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Self { trans: t1 }, Self { trans: t2 }) => t1.eq(t2),
    }
  }
}

impl<Sym> Eq for Node<Sym> where Sym: Symbol {}

impl<Sym> fmt::Debug for Node<Sym>
where Sym: fmt::Debug
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Node {{ trans: {:?} }}", &self.trans)
  }
}

/// The transition graph along with its start and accept sets.
///
/// Every state named by [`Self::add_state`] or used as either endpoint of
/// [`Self::add_transition`] has an entry, so [`Self::lookup_state`] only
/// returns `None` for ids which were never mentioned at all.
#[derive(Clone)]
pub struct Universe<Sym> {
  states: HashMap<State, Node<Sym>, FxBuildHasher>,
  start: StateSet,
  accept: StateSet,
}

impl<Sym> Universe<Sym> {
  pub fn new() -> Self {
    Self {
      states: HashMap::with_hasher(FxBuildHasher::default()),
      start: StateSet::with_hasher(FxBuildHasher::default()),
      accept: StateSet::with_hasher(FxBuildHasher::default()),
    }
  }

  #[inline(always)]
  pub fn lookup_state(&self, state: State) -> Option<&Node<Sym>> { self.states.get(&state) }

  #[inline(always)]
  pub fn is_start(&self, state: State) -> bool { self.start.contains(&state) }

  #[inline(always)]
  pub fn is_accept(&self, state: State) -> bool { self.accept.contains(&state) }

  pub fn states(&self) -> impl Iterator<Item=State>+'_ { self.states.keys().copied() }

  pub fn start_states(&self) -> impl Iterator<Item=State>+'_ { self.start.iter().copied() }

  pub fn accept_states(&self) -> impl Iterator<Item=State>+'_ { self.accept.iter().copied() }

  pub fn num_states(&self) -> usize { self.states.len() }

  pub fn num_transitions(&self) -> usize { self.states.values().map(Node::num_transitions).sum() }

  fn ensure_state(&mut self, state: State) -> &mut Node<Sym> {
    self.states.entry(state).or_default()
  }

  /// Register `state`, marking it as a start and/or accept state.
  ///
  /// Flags only accumulate: passing `false` never clears a flag set by an
  /// earlier call.
  pub fn add_state(&mut self, state: State, is_start: bool, is_accept: bool) {
    self.ensure_state(state);
    if is_start {
      self.start.insert(state);
    }
    if is_accept {
      self.accept.insert(state);
    }
  }
}

impl<Sym> Default for Universe<Sym> {
  fn default() -> Self { Self::new() }
}

impl<Sym> Universe<Sym>
where Sym: Symbol
{
  /// Record an edge `source --label--> dest`.
  ///
  /// Both endpoints are registered as states if they weren't already.
  pub fn add_transition(&mut self, source: State, label: Sym, dest: State) {
    self.ensure_state(dest);
    self.ensure_state(source).insert(label, dest);
  }

  /// All states reachable from `state` in one step under `sym`.
  pub fn destinations(&self, state: State, sym: Sym) -> impl Iterator<Item=State>+'_ {
    self
      .lookup_state(state)
      .into_iter()
      .flat_map(move |node| node.destinations(sym))
  }

  pub fn has_transitions_from(&self, state: State, sym: Sym) -> bool {
    self
      .lookup_state(state)
      .is_some_and(|node| node.has_transitions(sym))
  }
}

impl<Sym> Extend<(State, Sym, State)> for Universe<Sym>
where Sym: Symbol
{
  fn extend<T: IntoIterator<Item=(State, Sym, State)>>(&mut self, iter: T) {
    for (source, label, dest) in iter.into_iter() {
      self.add_transition(source, label, dest);
    }
  }
}

impl<Sym> FromIterator<(State, Sym, State)> for Universe<Sym>
where Sym: Symbol
{
  fn from_iter<T: IntoIterator<Item=(State, Sym, State)>>(iter: T) -> Self {
    let mut ret = Self::new();
    ret.extend(iter);
    ret
  }
}

impl<Sym> PartialEq for Universe<Sym>
where Sym: Symbol
{
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (
        Self {
          states: s1,
          start: st1,
          accept: a1,
        },
        Self {
          states: s2,
          start: st2,
          accept: a2,
        },
      ) => s1.eq(s2) && st1.eq(st2) && a1.eq(a2),
    }
  }
}

impl<Sym> Eq for Universe<Sym> where Sym: Symbol {}

impl<Sym> fmt::Debug for Universe<Sym>
where Sym: fmt::Debug
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
      f,
      "Universe {{ states: {:?}, start: {:?}, accept: {:?} }}",
      &self.states, &self.start, &self.accept
    )
  }
}

#[cfg(test)]
mod test {
  use proptest::prelude::*;

  use super::*;

  fn sorted(it: impl Iterator<Item=State>) -> Vec<State> {
    let mut v: Vec<State> = it.collect();
    v.sort();
    v
  }

  #[test]
  fn add_state_twice_is_idempotent() {
    let mut once = Universe::<char>::new();
    once.add_state(State(3), true, false);

    let mut twice = Universe::<char>::new();
    twice.add_state(State(3), true, false);
    twice.add_state(State(3), true, false);

    assert_eq!(once, twice);
    assert_eq!(twice.num_states(), 1);
  }

  #[test]
  fn flags_are_unioned() {
    let mut u = Universe::<char>::new();
    u.add_state(State(5), true, false);
    u.add_state(State(5), false, true);
    assert!(u.is_start(State(5)));
    assert!(u.is_accept(State(5)));

    /* Passing false afterwards does not clear anything. */
    u.add_state(State(5), false, false);
    assert!(u.is_start(State(5)));
    assert!(u.is_accept(State(5)));
  }

  #[test]
  fn add_transition_registers_both_endpoints() {
    let mut u = Universe::new();
    u.add_transition(State(0), 'a', State(7));

    let dest = u.lookup_state(State(7)).unwrap();
    assert!(dest.is_empty());
    assert_eq!(sorted(u.states()), vec![State(0), State(7)]);
    assert!(!u.is_start(State(7)));
    assert!(!u.is_accept(State(7)));
  }

  #[test]
  fn duplicate_transition_is_idempotent() {
    let mut once = Universe::new();
    once.add_transition(State(0), 'a', State(1));

    let mut twice = Universe::new();
    twice.add_transition(State(0), 'a', State(1));
    twice.add_transition(State(0), 'a', State(1));

    assert_eq!(once, twice);
    assert_eq!(twice.num_transitions(), 1);
  }

  #[test]
  fn one_label_many_destinations() {
    let mut u = Universe::new();
    u.add_transition(State(0), 'a', State(1));
    u.add_transition(State(0), 'a', State(2));
    u.add_transition(State(0), 'b', State(2));

    assert_eq!(sorted(u.destinations(State(0), 'a')), vec![State(1), State(2)]);
    assert_eq!(sorted(u.destinations(State(0), 'b')), vec![State(2)]);
    assert_eq!(u.num_transitions(), 3);
    assert!(u.has_transitions_from(State(0), 'a'));
    assert!(!u.has_transitions_from(State(0), 'c'));
  }

  #[test]
  fn unknown_state_has_nothing() {
    let mut u = Universe::new();
    u.add_transition(State(0), 'a', State(1));

    assert!(u.lookup_state(State(99)).is_none());
    assert_eq!(u.destinations(State(99), 'a').count(), 0);
    assert!(!u.has_transitions_from(State(99), 'a'));
    assert!(!u.is_start(State(99)));
    assert!(!u.is_accept(State(99)));
  }

  #[test]
  fn sparse_and_negative_ids() {
    let mut u = Universe::new();
    u.add_state(State(-40), true, false);
    u.add_transition(State(-40), 'x', State(i64::MAX));
    u.add_state(State(i64::MAX), false, true);

    assert_eq!(u.num_states(), 2);
    assert_eq!(
      sorted(u.destinations(State(-40), 'x')),
      vec![State(i64::MAX)]
    );
    assert_eq!(sorted(u.start_states()), vec![State(-40)]);
    assert_eq!(sorted(u.accept_states()), vec![State(i64::MAX)]);
  }

  #[test]
  fn disconnected_flags_are_legal() {
    let mut u = Universe::<char>::new();
    u.add_state(State(1), true, true);
    u.add_state(State(2), false, true);
    assert_eq!(u.num_states(), 2);
    assert_eq!(u.num_transitions(), 0);
  }

  #[test]
  fn collect_from_triples() {
    let u: Universe<char> = [
      (State(0), 'a', State(1)),
      (State(0), 'a', State(2)),
      (State(1), 'b', State(3)),
    ]
    .into_iter()
    .collect();

    let mut manual = Universe::new();
    manual.add_transition(State(0), 'a', State(1));
    manual.add_transition(State(0), 'a', State(2));
    manual.add_transition(State(1), 'b', State(3));

    assert_eq!(u, manual);
  }

  proptest! {
    #[test]
    fn every_endpoint_is_a_state(
      edges in prop::collection::vec((any::<State>(), any::<u8>(), any::<State>()), 0..64),
    ) {
      let u: Universe<u8> = edges.iter().copied().collect();
      for (src, label, dest) in edges.iter().copied() {
        prop_assert!(u.lookup_state(src).is_some());
        prop_assert!(u.lookup_state(dest).is_some());
        prop_assert!(u.destinations(src, label).any(|s| s == dest));
      }
    }

    #[test]
    fn insertion_order_does_not_matter(
      edges in prop::collection::vec((any::<State>(), any::<u8>(), any::<State>()), 0..32),
    ) {
      let forward: Universe<u8> = edges.iter().copied().collect();
      let backward: Universe<u8> = edges.iter().rev().copied().collect();
      prop_assert_eq!(forward, backward);
    }
  }
}
