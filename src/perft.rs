// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::position::Position;

/// Counts the leaf nodes of the legal move tree rooted at `pos`, `depth`
/// plies deep. The position is walked with make/unmake and is returned to
/// its original state.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveVec::new();
    MoveGenerator::new().generate_moves(pos, &mut moves);
    let side_to_move = pos.side_to_move();
    let mut nodes = 0;
    for mov in moves {
        pos.make_move(mov);
        if !pos.is_check(side_to_move) {
            nodes += perft(pos, depth - 1);
        }
        pos.unmake_move();
    }

    nodes
}

/// Splits a perft count by root move: for every legal move from `pos`, the
/// number of leaves `depth - 1` plies below it. The counts sum to
/// `perft(pos, depth)`.
pub fn perft_divide(pos: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut moves = MoveVec::new();
    MoveGenerator::new().generate_legal_moves(pos, &mut moves);
    moves
        .into_iter()
        .map(|mov| {
            pos.make_move(mov);
            let nodes = perft(pos, depth - 1);
            pos.unmake_move();
            debug!("divide {}: {}", mov, nodes);
            (mov, nodes)
        })
        .collect()
}
