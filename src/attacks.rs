// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack sets for every piece kind. Knights and kings read from tables
//! built once on first use; pawns use bitboard shifts; bishops, rooks and
//! queens cast rays against the current occupancy every time they are asked.
use crate::bitboard::Bitboard;
use crate::types::{Color, Direction, Square, TableIndex, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};

const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// A table of precomputed attacks for a piece whose reach does not depend
/// on the rest of the board.
struct LeaperTable {
    table: [Bitboard; 64],
}

impl LeaperTable {
    /// Builds the table from a list of (rank, file) deltas, dropping any
    /// destination that lands outside the board on either axis.
    fn new(deltas: &[(i32, i32)]) -> LeaperTable {
        let mut lt = LeaperTable {
            table: [Bitboard::none(); 64],
        };

        for sq in Square::all() {
            let rank = sq.rank() as i32;
            let file = sq.file() as i32;
            let mut board = Bitboard::none();
            for &(rank_delta, file_delta) in deltas {
                let target_rank = rank + rank_delta;
                let target_file = file + file_delta;
                if target_rank < 0 || target_rank > 7 || target_file < 0 || target_file > 7 {
                    continue;
                }

                board.set(Square::from_index((target_rank * 8 + target_file) as usize));
            }

            lt.table[sq.as_index()] = board;
        }

        lt
    }

    fn attacks(&self, sq: Square) -> Bitboard {
        self.table[sq.as_index()]
    }
}

lazy_static! {
    static ref KING_TABLE: LeaperTable = LeaperTable::new(&KING_DELTAS);
    static ref KNIGHT_TABLE: LeaperTable = LeaperTable::new(&KNIGHT_DELTAS);
}

/// Forces construction of the knight and king tables. Calling this is never
/// required, since the tables build themselves on first use, but doing it up
/// front keeps the cost out of the first move generation.
pub fn initialize() {
    lazy_static::initialize(&KING_TABLE);
    lazy_static::initialize(&KNIGHT_TABLE);
}

/// Walks from `sq` in `dir` one square at a time, adding each square to the
/// result. The walk ends at the board edge or on the first occupied square,
/// which is included so that the caller can decide whether it is a capture.
fn ray_attacks(sq: Square, occupancy: Bitboard, dir: Direction) -> Bitboard {
    let mut attacks = Bitboard::none();
    let mut cursor = sq;
    while let Some(next) = cursor.checked_towards(dir) {
        attacks.set(next);
        if occupancy.test(next) {
            break;
        }

        cursor = next;
    }

    attacks
}

fn slider_attacks(sq: Square, occupancy: Bitboard, dirs: &[Direction]) -> Bitboard {
    dirs.iter()
        .fold(Bitboard::none(), |acc, &dir| acc | ray_attacks(sq, occupancy, dir))
}

/// Squares a pawn of the given color standing on `sq` attacks diagonally.
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    let pawn = Bitboard::from_square(sq);
    match color {
        Color::White => pawn.north_east() | pawn.north_west(),
        Color::Black => pawn.south_east() | pawn.south_west(),
    }
}

pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(sq, occupancy, &BISHOP_DIRECTIONS)
}

pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_TABLE.attacks(sq)
}

pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(sq, occupancy, &ROOK_DIRECTIONS)
}

pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

pub fn king_attacks(sq: Square) -> Bitboard {
    KING_TABLE.attacks(sq)
}
