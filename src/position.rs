// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Write};

use crate::bitboard::Bitboard;
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::{Move, MoveParseError, UciMove};
use crate::types::TableIndex;
use crate::types::{CastleStatus, Color, Direction, File, Piece, PieceKind, Rank, Square};
use crate::types::{COLORS, FILES, RANKS};
use crate::undo::UndoRecord;

pub const START_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    WrongFieldCount(usize),
    WrongRankCount(usize),
    InvalidDigit(char),
    RankDoesNotSumToEight(Rank),
    UnknownPiece(char),
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    InvalidHalfmove,
    InvalidFullmove,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::WrongFieldCount(n) => write!(f, "expected 6 fields, found {}", n),
            FenParseError::WrongRankCount(n) => write!(f, "expected 8 ranks, found {}", n),
            FenParseError::InvalidDigit(c) => write!(f, "invalid empty-square count '{}'", c),
            FenParseError::RankDoesNotSumToEight(rank) => {
                write!(f, "rank {} does not describe exactly 8 files", rank)
            }
            FenParseError::UnknownPiece(c) => write!(f, "unknown piece '{}'", c),
            FenParseError::InvalidSideToMove => write!(f, "invalid side to move"),
            FenParseError::InvalidCastle => write!(f, "invalid castling availability"),
            FenParseError::InvalidEnPassant => write!(f, "invalid en-passant square"),
            FenParseError::InvalidHalfmove => write!(f, "invalid halfmove clock"),
            FenParseError::InvalidFullmove => write!(f, "invalid fullmove number"),
        }
    }
}

impl Error for FenParseError {}

/// A chess position: where every piece stands, whose turn it is, and the
/// bookkeeping needed to apply moves and take them back.
///
/// Pieces live in twelve bitboards, one per kind and color, and no square
/// is ever set in more than one of them. A square-indexed mailbox mirrors
/// the bitboards so that `piece_at` does not have to probe all twelve; both
/// are only ever written through `set_piece` and `remove_piece`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    boards_by_piece: [Bitboard; 12],
    mailbox: [Option<Piece>; 64],
    en_passant_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_clock: u32,
    side_to_move: Color,
    castle_status: CastleStatus,
    history: Vec<UndoRecord>,
}

//
// Board state getters
//

impl Position {
    /// Constructs an empty board with White to move and no castling rights.
    pub fn new() -> Position {
        Position {
            boards_by_piece: [Bitboard::none(); 12],
            mailbox: [None; 64],
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_clock: 1,
            side_to_move: Color::White,
            castle_status: CastleStatus::NONE,
            history: Vec::new(),
        }
    }

    pub fn from_start_position() -> Position {
        let mut pos = Position::new();
        pos.initialize();
        pos
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_clock(&self) -> u32 {
        self.fullmove_clock
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::kingside(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::queenside(color))
    }

    /// Number of applied moves that `unmake_move` can still take back.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// All squares occupied by the given color, derived from its six boards.
    pub fn pieces(&self, color: Color) -> Bitboard {
        let offset = color.as_index() * 6;
        self.boards_by_piece[offset..offset + 6]
            .iter()
            .fold(Bitboard::none(), |acc, &board| acc | board)
    }

    pub fn occupancy(&self) -> Bitboard {
        self.pieces(Color::White) | self.pieces(Color::Black)
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.boards_by_piece[Piece::new(kind, color).board_index()]
    }

    pub fn pawns(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Pawn)
    }

    pub fn bishops(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Bishop)
    }

    pub fn knights(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Knight)
    }

    pub fn rooks(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Rook)
    }

    pub fn queens(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Queen)
    }

    pub fn kings(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::King)
    }
}

//
// Move application and board manipulation
//

impl Position {
    /// Resets this position to the standard starting position, discarding
    /// all history.
    pub fn initialize(&mut self) {
        *self = Position::new();
        for (&file, &kind) in FILES.iter().zip(BACK_RANK.iter()) {
            for &color in &COLORS {
                self.set_piece(Square::of(color.home_rank(), file), Piece::new(kind, color));
                self.set_piece(
                    Square::of(color.pawn_rank(), file),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }

        self.castle_status = CastleStatus::WHITE | CastleStatus::BLACK;
    }

    /// Places a piece on a square, replacing whatever stood there.
    pub fn set_piece(&mut self, square: Square, piece: Piece) {
        self.remove_piece(square);
        self.boards_by_piece[piece.board_index()].set(square);
        self.mailbox[square.as_index()] = Some(piece);
    }

    /// Clears a square, returning the piece that stood on it. Clearing an
    /// empty square does nothing.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        for board in self.boards_by_piece.iter_mut() {
            board.unset(square);
        }

        self.mailbox[square.as_index()].take()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.as_index()]
    }

    /// Applies a move to this position and saves the previous state so that
    /// `unmake_move` can restore it exactly.
    ///
    /// Only moves produced for this exact position by the move generator (or
    /// by `move_from_uci`, which only returns generated moves) are accepted.
    /// Anything else is a contract violation: a move by the wrong side
    /// panics, other malformed moves leave the position in an unspecified
    /// state.
    pub fn make_move(&mut self, mov: Move) {
        let mover = self.side_to_move;
        let moving_piece = self
            .piece_at(mov.source())
            .expect("invalid move: no piece at source square");
        assert_eq!(mover, moving_piece.color, "invalid move: wrong side to move");

        // En-passant is the only capture whose victim is not on the
        // destination square.
        let captured = if mov.is_en_passant() {
            self.remove_piece(en_passant_victim(mov.destination(), mover))
                .map(|piece| piece.kind)
        } else {
            self.remove_piece(mov.destination()).map(|piece| piece.kind)
        };
        debug_assert!(
            !mov.is_capture() || captured.is_some(),
            "invalid move: no piece at capture target"
        );

        self.history.push(UndoRecord {
            mov,
            castle_status: self.castle_status,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_clock: self.fullmove_clock,
            captured,
            mover,
        });

        if moving_piece.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if mover == Color::Black {
            self.fullmove_clock += 1;
        }

        let placed_kind = mov.promotion_piece().unwrap_or(moving_piece.kind);
        self.remove_piece(mov.source());
        self.set_piece(mov.destination(), Piece::new(placed_kind, mover));

        if mov.is_castle() {
            let (rook_home, rook_post) = castle_rook_squares(mov.destination());
            let rook = self
                .remove_piece(rook_home)
                .expect("invalid move: castle without rook");
            self.set_piece(rook_post, rook);
        }

        // Castle rights only ever shrink. The king leaving home loses both
        // sides, a rook leaving its corner loses its side, and a rook
        // captured in its corner costs the opponent that side.
        match moving_piece.kind {
            PieceKind::King if mov.source() == king_home(mover) => {
                self.castle_status &= !CastleStatus::both(mover);
            }
            PieceKind::Rook if mov.source() == kingside_rook(mover) => {
                self.castle_status &= !CastleStatus::kingside(mover);
            }
            PieceKind::Rook if mov.source() == queenside_rook(mover) => {
                self.castle_status &= !CastleStatus::queenside(mover);
            }
            _ => {}
        }

        if captured == Some(PieceKind::Rook) {
            let enemy = mover.toggle();
            if mov.destination() == kingside_rook(enemy) {
                self.castle_status &= !CastleStatus::kingside(enemy);
            } else if mov.destination() == queenside_rook(enemy) {
                self.castle_status &= !CastleStatus::queenside(enemy);
            }
        }

        self.en_passant_square = if moving_piece.kind == PieceKind::Pawn
            && mov.source().rank() == mover.pawn_rank()
            && mov.destination() == mov.source().towards(mover.forward()).towards(mover.forward())
        {
            Some(mov.source().towards(mover.forward()))
        } else {
            None
        };

        self.side_to_move = mover.toggle();
    }

    /// Takes back the most recently applied move.
    ///
    /// Panics if there is no move to take back; that is a bug in the caller,
    /// which must pair every `make_move` with exactly one `unmake_move`.
    pub fn unmake_move(&mut self) {
        let record = match self.history.pop() {
            Some(record) => record,
            None => panic!("unmake_move called with no move to take back"),
        };

        self.side_to_move = record.mover;
        self.fullmove_clock = record.fullmove_clock;
        self.halfmove_clock = record.halfmove_clock;
        self.castle_status = record.castle_status;
        self.en_passant_square = record.en_passant_square;

        let mov = record.mov;
        let moved = self
            .remove_piece(mov.destination())
            .expect("corrupt history: destination square is empty");
        let original = if mov.is_promotion() {
            Piece::new(PieceKind::Pawn, record.mover)
        } else {
            moved
        };
        self.set_piece(mov.source(), original);

        if let Some(kind) = record.captured {
            let victim_square = if mov.is_en_passant() {
                en_passant_victim(mov.destination(), record.mover)
            } else {
                mov.destination()
            };
            self.set_piece(victim_square, Piece::new(kind, record.mover.toggle()));
        }

        if mov.is_castle() {
            let (rook_home, rook_post) = castle_rook_squares(mov.destination());
            let rook = self
                .remove_piece(rook_post)
                .expect("corrupt history: castled rook is missing");
            self.set_piece(rook_home, rook);
        }
    }
}

//
// Board analysis (check detection, legality)
//

impl Position {
    /// Returns whether any piece of color `by` attacks the given square.
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        MoveGenerator::new().is_square_attacked(self, square, by)
    }

    /// Returns whether the given color's king is attacked.
    pub fn is_check(&self, color: Color) -> bool {
        self.kings(color)
            .iter()
            .any(|king| self.is_square_attacked(king, color.toggle()))
    }

    /// Move legality test. Returns true if this move is a legal move from
    /// the given position. If the move is known to be pseudolegal,
    /// `is_legal_given_pseudolegal` skips the generation step.
    pub fn is_legal(&mut self, mov: Move) -> bool {
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(self, &mut moves);
        if !moves.contains(&mov) {
            return false;
        }

        self.is_legal_given_pseudolegal(mov)
    }

    /// Legality test for moves that are already known to be pseudolegal:
    /// plays the move, checks whether the mover's own king is attacked, and
    /// takes the move back.
    pub fn is_legal_given_pseudolegal(&mut self, mov: Move) -> bool {
        let side = self.side_to_move;
        self.make_move(mov);
        let legal = !self.is_check(side);
        self.unmake_move();
        legal
    }
}

//
// FEN and move notation.
//
// Positions can be created by parsing FEN and FEN can be produced from
// particular positions. Parsing builds a complete new position before
// anything is handed back, so a malformed string never leaves a
// half-written board behind.
//

impl Position {
    /// Constructs a new position from a FEN representation of a board position.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position, FenParseError> {
        let fields: Vec<&str> = fen.as_ref().split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenParseError::WrongFieldCount(fields.len()));
        }

        let mut pos = Position::new();
        parse_placement(&mut pos, fields[0])?;
        pos.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenParseError::InvalidSideToMove),
        };
        pos.castle_status = parse_castle_status(fields[2])?;
        pos.en_passant_square = parse_en_passant(fields[3])?;
        pos.halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| FenParseError::InvalidHalfmove)?;
        pos.fullmove_clock = match fields[5].parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => return Err(FenParseError::InvalidFullmove),
        };

        Ok(pos)
    }

    /// Replaces this position with the one described by `fen`. On error the
    /// position is left exactly as it was.
    pub fn set_fen<S: AsRef<str>>(&mut self, fen: S) -> Result<(), FenParseError> {
        let pos = Position::from_fen(fen.as_ref())?;
        debug!("position set from fen: {}", fen.as_ref());
        *self = pos;
        Ok(())
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                match self.piece_at(Square::of(rank, file)) {
                    Some(piece) => {
                        if empty_squares != 0 {
                            write!(&mut buf, "{}", empty_squares).unwrap();
                            empty_squares = 0;
                        }
                        write!(&mut buf, "{}", piece).unwrap();
                    }
                    None => empty_squares += 1,
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        write!(&mut buf, " {} ", self.side_to_move).unwrap();
        if self.castle_status.is_empty() {
            buf.push('-');
        } else {
            let rights = [
                (CastleStatus::WHITE_KINGSIDE, 'K'),
                (CastleStatus::WHITE_QUEENSIDE, 'Q'),
                (CastleStatus::BLACK_KINGSIDE, 'k'),
                (CastleStatus::BLACK_QUEENSIDE, 'q'),
            ];
            for &(flag, chr) in &rights {
                if self.castle_status.contains(flag) {
                    buf.push(chr);
                }
            }
        }

        match self.en_passant_square {
            Some(square) => write!(&mut buf, " {}", square).unwrap(),
            None => buf.push_str(" -"),
        }

        write!(&mut buf, " {} {}", self.halfmove_clock, self.fullmove_clock).unwrap();
        buf
    }

    /// Resolves a move in coordinate notation (`e2e4`, `e7e8q`) against this
    /// position. The notation is matched against the legal moves here, so the
    /// result carries the capture, en-passant and castle flags that the
    /// notation leaves implicit and is always safe to pass to `make_move`.
    pub fn move_from_uci(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let UciMove {
            source,
            destination,
            promotion,
        } = UciMove::parse(text)?;
        let moving_piece = self
            .piece_at(source)
            .ok_or(MoveParseError::EmptySource(source))?;
        if moving_piece.kind == PieceKind::Pawn
            && destination.rank() == moving_piece.color.promotion_rank()
            && promotion.is_none()
        {
            return Err(MoveParseError::MissingPromotion);
        }

        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_legal_moves(self, &mut moves);
        moves
            .into_iter()
            .find(|mov| {
                mov.source() == source
                    && mov.destination() == destination
                    && mov.promotion_piece() == promotion
            })
            .ok_or(MoveParseError::IllegalMove(source, destination))
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

//
// FEN field parsers
//

fn parse_placement(pos: &mut Position, placement: &str) -> Result<(), FenParseError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::WrongRankCount(ranks.len()));
    }

    // FEN lists the eighth rank first.
    for (&rank, descriptor) in RANKS.iter().rev().zip(ranks) {
        let mut file = 0;
        for c in descriptor.chars() {
            if let Some(run) = c.to_digit(10) {
                if run < 1 || run > 8 {
                    return Err(FenParseError::InvalidDigit(c));
                }

                file += run as usize;
            } else {
                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
                if file >= 8 {
                    return Err(FenParseError::RankDoesNotSumToEight(rank));
                }

                pos.set_piece(Square::of(rank, File::from_index(file)), piece);
                file += 1;
            }

            if file > 8 {
                return Err(FenParseError::RankDoesNotSumToEight(rank));
            }
        }

        if file != 8 {
            return Err(FenParseError::RankDoesNotSumToEight(rank));
        }
    }

    Ok(())
}

fn parse_castle_status(field: &str) -> Result<CastleStatus, FenParseError> {
    if field == "-" {
        return Ok(CastleStatus::NONE);
    }

    let mut status = CastleStatus::NONE;
    for c in field.chars() {
        let flag = match c {
            'K' => CastleStatus::WHITE_KINGSIDE,
            'Q' => CastleStatus::WHITE_QUEENSIDE,
            'k' => CastleStatus::BLACK_KINGSIDE,
            'q' => CastleStatus::BLACK_QUEENSIDE,
            _ => return Err(FenParseError::InvalidCastle),
        };

        if status.contains(flag) {
            return Err(FenParseError::InvalidCastle);
        }
        status |= flag;
    }

    Ok(status)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenParseError> {
    if field == "-" {
        return Ok(None);
    }

    let chars: Vec<char> = field.chars().collect();
    if chars.len() != 2 {
        return Err(FenParseError::InvalidEnPassant);
    }

    let file = File::try_from(chars[0]).map_err(|_| FenParseError::InvalidEnPassant)?;
    let rank = Rank::try_from(chars[1]).map_err(|_| FenParseError::InvalidEnPassant)?;
    Ok(Some(Square::of(rank, file)))
}

//
// Helper functions
//

fn king_home(color: Color) -> Square {
    Square::of(color.home_rank(), File::E)
}

fn kingside_rook(color: Color) -> Square {
    Square::of(color.home_rank(), File::H)
}

fn queenside_rook(color: Color) -> Square {
    Square::of(color.home_rank(), File::A)
}

/// Given a castling king's destination, returns where its rook starts and
/// where it ends up.
fn castle_rook_squares(king_destination: Square) -> (Square, Square) {
    let rank = king_destination.rank();
    if king_destination.file() == File::G {
        (Square::of(rank, File::H), Square::of(rank, File::F))
    } else {
        (Square::of(rank, File::A), Square::of(rank, File::D))
    }
}

/// The square of the pawn captured by an en-passant move landing on
/// `destination`: one step back toward the mover's side of the board.
fn en_passant_victim(destination: Square, mover: Color) -> Square {
    let back = match mover.forward() {
        Direction::North => Direction::South,
        _ => Direction::North,
    };
    destination.towards(back)
}
