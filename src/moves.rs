// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of a `Move` and of the
//! coordinate notation used to exchange moves with the outside world.
//!
//! A move is a plain value: source square, destination square, an optional
//! promotion piece and three flags (capture, en-passant, castle). Castles
//! are encoded as the king's move; the rook's move is implied.
//!
//! ## Notation
//! Moves are written as the source square followed by the destination
//! square, with an optional lowercase promotion letter: `e2e4`, `e7e8q`,
//! `e1g1` for a white kingside castle.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

use crate::types::{File, PieceKind, Rank, Square};

bitflags! {
    pub struct MoveFlags: u8 {
        const NONE = 0;
        const CAPTURE = 0b0000_0001;
        const EN_PASSANT = 0b0000_0010;
        const CASTLE = 0b0000_0100;
    }
}

/// A move, as produced by the move generator and consumed by
/// `Position::make_move`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
    promotion: Option<PieceKind>,
    flags: MoveFlags,
}

impl Move {
    /// Constructs a new quiet move from the source square to the destination
    /// square.
    pub fn quiet(source: Square, destination: Square) -> Move {
        Move {
            source,
            destination,
            promotion: None,
            flags: MoveFlags::NONE,
        }
    }

    /// Constructs a new capture move from the source square to the destination
    /// square.
    pub fn capture(source: Square, destination: Square) -> Move {
        let mut mov = Move::quiet(source, destination);
        mov.flags |= MoveFlags::CAPTURE;
        mov
    }

    /// Constructs an en-passant capture. The destination is the en-passant
    /// square, not the square of the captured pawn.
    pub fn en_passant(source: Square, destination: Square) -> Move {
        let mut mov = Move::capture(source, destination);
        mov.flags |= MoveFlags::EN_PASSANT;
        mov
    }

    /// Constructs a pawn move to the last rank that promotes to the given
    /// piece kind.
    pub fn promotion(source: Square, destination: Square, promoted: PieceKind) -> Move {
        assert!(
            promoted != PieceKind::Pawn && promoted != PieceKind::King,
            "invalid promotion piece"
        );
        let mut mov = Move::quiet(source, destination);
        mov.promotion = Some(promoted);
        mov
    }

    /// Constructs a promoting pawn capture.
    pub fn promotion_capture(source: Square, destination: Square, promoted: PieceKind) -> Move {
        let mut mov = Move::promotion(source, destination, promoted);
        mov.flags |= MoveFlags::CAPTURE;
        mov
    }

    /// Constructs a castle, given as the king's source and destination.
    pub fn castle(source: Square, destination: Square) -> Move {
        let mut mov = Move::quiet(source, destination);
        mov.flags |= MoveFlags::CASTLE;
        mov
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn promotion_piece(self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn is_quiet(self) -> bool {
        self.flags.is_empty() && self.promotion.is_none()
    }

    pub fn is_capture(self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    pub fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    pub fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    pub fn is_castle(self) -> bool {
        self.flags.contains(MoveFlags::CASTLE)
    }

    pub fn is_kingside_castle(self) -> bool {
        self.is_castle() && self.destination.file() == File::G
    }

    pub fn is_queenside_castle(self) -> bool {
        self.is_castle() && self.destination.file() == File::C
    }

    /// Returns the coordinate-notation form of this move.
    /// # Example
    /// ```
    /// use bitmove::{Move, Square};
    ///
    /// let mov = Move::quiet(Square::E2, Square::E4);
    /// assert_eq!("e2e4", mov.as_uci());
    /// ```
    pub fn as_uci(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.source, self.destination, kind.as_char()),
            None => format!("{}{}", self.source, self.destination),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_uci())
    }
}

/// Errors produced when a move string is not valid coordinate notation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    InvalidLength(usize),
    InvalidFile(char),
    InvalidRank(char),
    InvalidPromotion(char),
    EmptySource(Square),
    MissingPromotion,
    IllegalMove(Square, Square),
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength(len) => {
                write!(f, "move must be 4 or 5 characters, got {}", len)
            }
            MoveParseError::InvalidFile(c) => write!(f, "invalid file '{}'", c),
            MoveParseError::InvalidRank(c) => write!(f, "invalid rank '{}'", c),
            MoveParseError::InvalidPromotion(c) => write!(f, "invalid promotion piece '{}'", c),
            MoveParseError::EmptySource(sq) => write!(f, "no piece on source square {}", sq),
            MoveParseError::MissingPromotion => write!(f, "pawn move to last rank needs a promotion"),
            MoveParseError::IllegalMove(from, to) => {
                write!(f, "no legal move from {} to {}", from, to)
            }
        }
    }
}

impl Error for MoveParseError {}

/// The raw content of a move string: two squares and maybe a promotion.
/// Turning this into a `Move` needs a position to tell captures, castles and
/// en-passant apart; see `Position::move_from_uci`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UciMove {
    pub source: Square,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}

impl UciMove {
    pub fn parse(text: &str) -> Result<UciMove, MoveParseError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(MoveParseError::InvalidLength(chars.len()));
        }

        let source = parse_square(chars[0], chars[1])?;
        let destination = parse_square(chars[2], chars[3])?;
        let promotion = match chars.get(4) {
            Some(&c) => Some(
                PieceKind::from_promotion_char(c).ok_or(MoveParseError::InvalidPromotion(c))?,
            ),
            None => None,
        };

        Ok(UciMove {
            source,
            destination,
            promotion,
        })
    }
}

/// Parses a square from its file letter and rank digit.
pub fn parse_square(file: char, rank: char) -> Result<Square, MoveParseError> {
    let file = File::try_from(file).map_err(|_| MoveParseError::InvalidFile(file))?;
    let rank = Rank::try_from(rank).map_err(|_| MoveParseError::InvalidRank(rank))?;
    Ok(Square::of(rank, file))
}
