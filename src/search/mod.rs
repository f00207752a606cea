// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::moves::Move;
use crate::position::Position;

mod random_searcher;

pub use random_searcher::RandomSearcher;

pub struct SearchResult {
    pub best_move: Move,
    pub candidates: usize,
}

pub trait Searcher {
    /// Picks a move for the side to move, or `None` if it has no legal
    /// moves. The position is left as it was found.
    fn search(&mut self, pos: &mut Position) -> Option<SearchResult>;
}
