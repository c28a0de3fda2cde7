/* Description: Sparse labeled transition graphs and subset-construction simulation.

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

//! Sparse labeled transition graphs and subset-construction simulation.
//!
//! The graph ([`nfa::Universe`]) is built once and then only read. Each run
//! over it keeps its own frontier ([`simple_eval::nfa::NFACache`]), so any
//! number of runs may share one graph.

#![warn(rustdoc::missing_crate_level_docs)]
// #![warn(missing_docs)]
/* Ensure any doctest warnings fails the doctest! */
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(not(test), no_std)]

/* Logging is compiled out entirely unless the "tracing" feature is on. */
mod log {
  cfg_if::cfg_if! {
    if #[cfg(feature = "tracing")] {
      pub(crate) use tracing::{debug, trace};
    } else {
      macro_rules! trace {
        ($($args:tt)*) => {};
      }
      macro_rules! debug {
        ($($args:tt)*) => {};
      }
      pub(crate) use {debug, trace};
    }
  }
}

pub mod nfa;
pub mod simple_eval;

pub mod alphabet {
  use core::hash::Hash;

  /// Anything usable as a transition label.
  ///
  /// Labels are compared by equality only; no range or ordering is assumed.
  pub trait Symbol: Hash+Eq+Copy {}

  impl<T> Symbol for T where T: Hash+Eq+Copy {}
}
