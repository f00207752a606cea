// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::move_generator::{MoveGenerator, MoveVec};
use crate::position::Position;
use crate::search::{SearchResult, Searcher};

/// Chooses uniformly at random among the legal moves.
pub struct RandomSearcher<R> {
    rng: R,
}

impl RandomSearcher<ThreadRng> {
    pub fn new() -> RandomSearcher<ThreadRng> {
        RandomSearcher::with_rng(rand::thread_rng())
    }
}

impl<R: Rng> RandomSearcher<R> {
    pub fn with_rng(rng: R) -> RandomSearcher<R> {
        RandomSearcher { rng }
    }
}

impl<R: Rng> Searcher for RandomSearcher<R> {
    fn search(&mut self, pos: &mut Position) -> Option<SearchResult> {
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_legal_moves(pos, &mut moves);
        let best_move = *moves.choose(&mut self.rng)?;
        trace!("picked {} out of {} legal moves", best_move, moves.len());
        Some(SearchResult {
            best_move,
            candidates: moves.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::RandomSearcher;
    use crate::move_generator::{MoveGenerator, MoveVec};
    use crate::moves::Move;
    use crate::position::Position;
    use crate::search::Searcher;
    use crate::types::Square;

    fn seeded() -> RandomSearcher<StdRng> {
        RandomSearcher::with_rng(StdRng::seed_from_u64(0xdead_beef))
    }

    #[test]
    fn picks_a_legal_move() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.clone();
        let mut legal = MoveVec::new();
        MoveGenerator::new().generate_legal_moves(&mut pos, &mut legal);

        let mut searcher = seeded();
        for _ in 0..32 {
            let result = searcher.search(&mut pos).unwrap();
            assert!(legal.contains(&result.best_move));
            assert_eq!(48, result.candidates);
        }
        assert_eq!(before, pos);
    }

    #[test]
    fn only_move_is_chosen() {
        let mut pos = Position::from_fen("7k/8/8/8/8/8/r7/1r5K w - - 0 1").unwrap();
        let result = seeded().search(&mut pos).unwrap();
        assert_eq!(1, result.candidates);
        assert_eq!(Move::quiet(Square::H1, Square::G1), result.best_move);
    }

    #[test]
    fn no_moves_when_mated() {
        let mut pos =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(seeded().search(&mut pos).is_none());
    }

    #[test]
    fn no_moves_when_stalemated() {
        let mut pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(RandomSearcher::new().search(&mut pos).is_none());
    }
}
