// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A bitboard chess core: position representation, move generation,
//! reversible make/unmake, FEN, coordinate move notation and perft.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod attacks;
mod bitboard;
pub mod eval;
mod move_generator;
mod moves;
mod perft;
mod position;
pub mod search;
mod types;
mod undo;

pub use bitboard::{Bitboard, BitboardIterator};
pub use move_generator::{MoveGenerator, MoveVec};
pub use moves::{Move, MoveParseError, UciMove};
pub use perft::{perft, perft_divide};
pub use position::{FenParseError, Position, START_POSITION_FEN};
pub use types::{CastleStatus, Color, Direction, File, Piece, PieceKind, Rank, Square};
pub use undo::UndoRecord;
