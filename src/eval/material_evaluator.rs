// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::eval::BoardEvaluator;
use crate::position::Position;
use crate::types::{Color, PieceKind, PIECE_KINDS};

const PAWN_WEIGHT: i32 = 100;
const KNIGHT_WEIGHT: i32 = 320;
const BISHOP_WEIGHT: i32 = 330;
const ROOK_WEIGHT: i32 = 500;
const QUEEN_WEIGHT: i32 = 900;
const KING_WEIGHT: i32 = 20000;

/// Counts material and nothing else.
#[derive(Copy, Clone, Debug, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> MaterialEvaluator {
        MaterialEvaluator
    }

    pub fn weight(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => PAWN_WEIGHT,
            PieceKind::Knight => KNIGHT_WEIGHT,
            PieceKind::Bishop => BISHOP_WEIGHT,
            PieceKind::Rook => ROOK_WEIGHT,
            PieceKind::Queen => QUEEN_WEIGHT,
            PieceKind::King => KING_WEIGHT,
        }
    }
}

impl BoardEvaluator for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> i32 {
        PIECE_KINDS
            .iter()
            .map(|&kind| {
                evaluate_metric(MaterialEvaluator::weight(kind), |c| {
                    pos.pieces_of_kind(c, kind).count() as i32
                })
            })
            .sum()
    }
}

fn evaluate_metric<F>(weight: i32, func: F) -> i32
where
    F: Fn(Color) -> i32,
{
    let white = func(Color::White);
    let black = func(Color::Black);
    weight * (white - black)
}
