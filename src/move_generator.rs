// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arrayvec::ArrayVec;

use crate::attacks;
use crate::bitboard::Bitboard;
use crate::moves::Move;
use crate::position::Position;
use crate::types::{Color, Direction, File, Square, PROMOTION_KINDS};

/// Fixed-capacity move list. No reachable position has anywhere near 256
/// pseudolegal moves.
pub type MoveVec = ArrayVec<[Move; 256]>;

/// Pseudolegal and legal move generation, plus the attack query that both
/// check detection and castling rely on.
#[derive(Copy, Clone, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Generates pseudolegal moves for the side to move. Moves that leave the
    /// mover's own king attacked are included; filter them with
    /// `Position::is_legal_given_pseudolegal` or use `generate_legal_moves`.
    pub fn generate_moves(&self, pos: &Position, moves: &mut MoveVec) {
        self.generate_moves_for(pos, pos.side_to_move(), moves);
    }

    /// Generates pseudolegal moves for the given color, regardless of whose
    /// turn it is.
    pub fn generate_moves_for(&self, pos: &Position, color: Color, moves: &mut MoveVec) {
        self.add_pawns(pos, color, moves);
        self.add_knights(pos, color, moves);
        self.add_sliding_pieces(pos, color, moves, attacks::bishop_attacks, |c| pos.bishops(c));
        self.add_sliding_pieces(pos, color, moves, attacks::rook_attacks, |c| pos.rooks(c));
        self.add_sliding_pieces(pos, color, moves, attacks::queen_attacks, |c| pos.queens(c));
        self.add_kings(pos, color, moves);
    }

    /// Generates only the moves that do not leave the mover's king attacked.
    /// The position is used as scratch space but is identical afterwards.
    pub fn generate_legal_moves(&self, pos: &mut Position, moves: &mut MoveVec) {
        let mut pseudolegal = MoveVec::new();
        self.generate_moves(pos, &mut pseudolegal);
        for mov in pseudolegal {
            if pos.is_legal_given_pseudolegal(mov) {
                moves.push(mov);
            }
        }
    }

    /// Returns whether any piece of color `by` attacks `square`. Attacks are
    /// computed outward from the target: a piece attacks the square exactly
    /// when the same piece placed on the square would attack it back.
    pub fn is_square_attacked(&self, pos: &Position, square: Square, by: Color) -> bool {
        let occupancy = pos.occupancy();
        let diagonal = pos.bishops(by) | pos.queens(by);
        let orthogonal = pos.rooks(by) | pos.queens(by);

        !(attacks::pawn_attacks(square, by.toggle()) & pos.pawns(by)).empty()
            || !(attacks::knight_attacks(square) & pos.knights(by)).empty()
            || !(attacks::king_attacks(square) & pos.kings(by)).empty()
            || !(attacks::bishop_attacks(square, occupancy) & diagonal).empty()
            || !(attacks::rook_attacks(square, occupancy) & orthogonal).empty()
    }

    fn add_pawns(&self, pos: &Position, color: Color, moves: &mut MoveVec) {
        let enemy_piece_map = pos.pieces(color.toggle());
        let piece_map = pos.occupancy();
        let forward = color.forward();
        let promo_rank = color.promotion_rank();

        for pawn in pos.pawns(color) {
            // a pawn on its last rank would have promoted
            if pawn.rank() == promo_rank {
                continue;
            }

            // non-capturing moves
            let target = pawn.towards(forward);
            if !piece_map.test(target) {
                if target.rank() == promo_rank {
                    add_promotions(pawn, target, false, moves);
                } else {
                    moves.push(Move::quiet(pawn, target));
                }

                // double-pawn pushes, for pawns still on their starting square
                if pawn.rank() == color.pawn_rank() {
                    let two_push_target = target.towards(forward);
                    if !piece_map.test(two_push_target) {
                        moves.push(Move::quiet(pawn, two_push_target));
                    }
                }
            }

            // non-ep capturing moves
            for attack_sq in attacks::pawn_attacks(pawn, color) & enemy_piece_map {
                if attack_sq.rank() == promo_rank {
                    add_promotions(pawn, attack_sq, true, moves);
                } else {
                    moves.push(Move::capture(pawn, attack_sq));
                }
            }
        }

        // en-passant: the capturing pawns are the ones an enemy pawn standing
        // on the target square would attack
        if let Some(ep_square) = pos.en_passant_square() {
            let victim = ep_square.checked_towards(opposite(forward));
            let victim_present = victim.map_or(false, |sq| pos.pawns(color.toggle()).test(sq));
            if victim_present && !piece_map.test(ep_square) {
                for pawn in attacks::pawn_attacks(ep_square, color.toggle()) & pos.pawns(color) {
                    moves.push(Move::en_passant(pawn, ep_square));
                }
            }
        }
    }

    fn add_knights(&self, pos: &Position, color: Color, moves: &mut MoveVec) {
        for knight in pos.knights(color) {
            add_targets(pos, color, knight, attacks::knight_attacks(knight), moves);
        }
    }

    fn add_sliding_pieces<F, B>(
        &self,
        pos: &Position,
        color: Color,
        moves: &mut MoveVec,
        atks: F,
        board: B,
    ) where
        F: Fn(Square, Bitboard) -> Bitboard,
        B: FnOnce(Color) -> Bitboard,
    {
        let occupancy = pos.occupancy();
        for piece in board(color) {
            add_targets(pos, color, piece, atks(piece, occupancy), moves);
        }
    }

    fn add_kings(&self, pos: &Position, color: Color, moves: &mut MoveVec) {
        for king in pos.kings(color) {
            add_targets(pos, color, king, attacks::king_attacks(king), moves);
        }

        let king = Square::of(color.home_rank(), File::E);
        if !pos.kings(color).test(king) {
            return;
        }

        let enemy = color.toggle();
        let piece_map = pos.occupancy();
        let rooks = pos.rooks(color);
        if pos.can_castle_kingside(color) {
            let one = king.towards(Direction::East);
            let two = one.towards(Direction::East);
            let rook = two.towards(Direction::East);
            if rooks.test(rook)
                && !piece_map.test(one)
                && !piece_map.test(two)
                && !self.is_square_attacked(pos, king, enemy)
                && !self.is_square_attacked(pos, one, enemy)
                && !self.is_square_attacked(pos, two, enemy)
            {
                moves.push(Move::castle(king, two));
            }
        }

        if pos.can_castle_queenside(color) {
            let one = king.towards(Direction::West);
            let two = one.towards(Direction::West);
            let three = two.towards(Direction::West);
            let rook = three.towards(Direction::West);
            // three can be attacked, but it can't be occupied. this is because
            // the rook needs to move "across" three, but the king does not.
            if rooks.test(rook)
                && !piece_map.test(one)
                && !piece_map.test(two)
                && !piece_map.test(three)
                && !self.is_square_attacked(pos, king, enemy)
                && !self.is_square_attacked(pos, one, enemy)
                && !self.is_square_attacked(pos, two, enemy)
            {
                moves.push(Move::castle(king, two));
            }
        }
    }
}

/// Pushes a quiet move or a capture from `source` to every square in
/// `targets` not held by the mover's own pieces.
fn add_targets(pos: &Position, color: Color, source: Square, targets: Bitboard, moves: &mut MoveVec) {
    let enemy_piece_map = pos.pieces(color.toggle());
    let allied_piece_map = pos.pieces(color);
    for target in targets & !allied_piece_map {
        if enemy_piece_map.test(target) {
            moves.push(Move::capture(source, target));
        } else {
            moves.push(Move::quiet(source, target));
        }
    }
}

fn add_promotions(source: Square, target: Square, capture: bool, moves: &mut MoveVec) {
    for &kind in &PROMOTION_KINDS {
        if capture {
            moves.push(Move::promotion_capture(source, target, kind));
        } else {
            moves.push(Move::promotion(source, target, kind));
        }
    }
}

fn opposite(dir: Direction) -> Direction {
    match dir {
        Direction::North => Direction::South,
        Direction::South => Direction::North,
        Direction::East => Direction::West,
        Direction::West => Direction::East,
        Direction::NorthEast => Direction::SouthWest,
        Direction::SouthWest => Direction::NorthEast,
        Direction::NorthWest => Direction::SouthEast,
        Direction::SouthEast => Direction::NorthWest,
    }
}

#[cfg(test)]
mod tests {
    use super::{MoveGenerator, MoveVec};
    use crate::moves::Move;
    use crate::position::Position;
    use crate::types::{Color, PieceKind, Square};

    fn pseudolegal(fen: &str) -> MoveVec {
        let pos = Position::from_fen(fen).unwrap();
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(&pos, &mut moves);
        moves
    }

    fn legal(fen: &str) -> MoveVec {
        let mut pos = Position::from_fen(fen).unwrap();
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_legal_moves(&mut pos, &mut moves);
        moves
    }

    #[test]
    fn start_position() {
        assert_eq!(20, pseudolegal(crate::position::START_POSITION_FEN).len());
    }

    #[test]
    fn blocked_pawn_has_no_pushes() {
        let moves = pseudolegal("8/8/8/8/8/4p3/4P3/8 w - - 0 1");
        assert!(moves.is_empty());
    }

    #[test]
    fn double_push_needs_both_squares_empty() {
        let moves = pseudolegal("8/8/8/8/4p3/8/4P3/8 w - - 0 1");
        assert_eq!(1, moves.len());
        assert!(moves.contains(&Move::quiet(Square::E2, Square::E3)));
    }

    #[test]
    fn promotions_expand_to_four_kinds() {
        let moves = pseudolegal("3r4/4P3/8/8/8/8/8/8 w - - 0 1");
        assert_eq!(8, moves.len());
        for &kind in &[PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight] {
            assert!(moves.contains(&Move::promotion(Square::E7, Square::E8, kind)));
            assert!(moves.contains(&Move::promotion_capture(Square::E7, Square::D8, kind)));
        }
    }

    #[test]
    fn en_passant_from_both_sides() {
        let moves = pseudolegal("8/8/8/3PpP2/8/8/8/8 w - e6 0 1");
        assert!(moves.contains(&Move::en_passant(Square::D5, Square::E6)));
        assert!(moves.contains(&Move::en_passant(Square::F5, Square::E6)));
    }

    #[test]
    fn en_passant_on_the_edge_does_not_wrap() {
        let moves = pseudolegal("8/8/8/8/Pp5P/8/8/8 b - a3 0 1");
        assert_eq!(
            vec![Move::quiet(Square::B4, Square::B3), Move::en_passant(Square::B4, Square::A3)],
            moves.to_vec()
        );
    }

    #[test]
    fn knight_captures_and_quiets() {
        let moves = pseudolegal("8/8/8/8/8/1p6/2P5/N7 w - - 0 1");
        assert!(moves.contains(&Move::capture(Square::A1, Square::B3)));
        assert!(!moves.contains(&Move::quiet(Square::A1, Square::C2)));
        assert!(!moves.contains(&Move::capture(Square::A1, Square::C2)));
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let moves = pseudolegal("8/8/8/3p4/8/8/3R4/3K4 w - - 0 1");
        assert!(moves.contains(&Move::capture(Square::D2, Square::D5)));
        assert!(!moves.contains(&Move::quiet(Square::D2, Square::D6)));
        assert!(!moves.contains(&Move::quiet(Square::D2, Square::D1)));
    }

    #[test]
    fn generate_for_other_color() {
        let pos = Position::from_start_position();
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves_for(&pos, Color::Black, &mut moves);
        assert_eq!(20, moves.len());
        assert!(moves.contains(&Move::quiet(Square::G8, Square::F6)));
    }

    #[test]
    fn castle_both_sides() {
        let moves = pseudolegal("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(moves.contains(&Move::castle(Square::E1, Square::G1)));
        assert!(moves.contains(&Move::castle(Square::E1, Square::C1)));
    }

    #[test]
    fn no_castle_through_attack() {
        let moves = pseudolegal("5r2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!moves.contains(&Move::castle(Square::E1, Square::G1)));
        assert!(moves.contains(&Move::castle(Square::E1, Square::C1)));
    }

    #[test]
    fn no_castle_out_of_check() {
        let moves = pseudolegal("4r3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn queenside_b_file_may_be_attacked() {
        let moves = pseudolegal("1r6/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(moves.contains(&Move::castle(Square::E1, Square::C1)));
    }

    #[test]
    fn queenside_b_file_must_be_empty() {
        let moves = pseudolegal("8/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn attack_queries() {
        let pos = Position::from_fen("8/8/8/3q4/8/8/6P1/8 w - - 0 1").unwrap();
        let gen = MoveGenerator::new();
        assert!(gen.is_square_attacked(&pos, Square::D1, Color::Black));
        assert!(gen.is_square_attacked(&pos, Square::A2, Color::Black));
        assert!(!gen.is_square_attacked(&pos, Square::H1, Color::Black));
        assert!(gen.is_square_attacked(&pos, Square::A8, Color::Black));
        assert!(!gen.is_square_attacked(&pos, Square::E3, Color::Black));
        assert!(gen.is_square_attacked(&pos, Square::H3, Color::White));
        assert!(gen.is_square_attacked(&pos, Square::F3, Color::White));
        assert!(!gen.is_square_attacked(&pos, Square::G3, Color::White));
    }

    #[test]
    fn legal_moves_escape_check() {
        let moves = legal("4k3/8/8/8/8/8/3q4/4K3 w - - 0 1");
        assert_eq!(2, moves.len());
        assert!(moves.contains(&Move::capture(Square::E1, Square::D2)));
        assert!(moves.contains(&Move::quiet(Square::E1, Square::F1)));
    }

    #[test]
    fn checkmate_has_no_legal_moves() {
        let moves = legal("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(moves.is_empty());
    }
}
