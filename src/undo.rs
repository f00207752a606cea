// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::moves::Move;
use crate::types::{CastleStatus, Color, PieceKind, Square};

/// Everything `Position::make_move` overwrites, saved so that
/// `Position::unmake_move` can put it back. One record is pushed per applied
/// move and popped when that move is taken back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UndoRecord {
    pub mov: Move,
    pub castle_status: CastleStatus,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_clock: u32,
    pub captured: Option<PieceKind>,
    pub mover: Color,
}
