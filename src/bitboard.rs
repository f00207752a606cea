// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Definitions of the `Bitboard` type, which is conceptually a set of
//! squares on the chess board. A position keeps one bitboard per piece type
//! and color, and the move generator uses them for occupancy and attack sets.
//!
//! A bitboard is a single 64-bit integer and it behaves like a set, using
//! bitwise operations for the normal set operations (union, intersection,
//! set complement, etc.). Bit `n` corresponds to square `n`, so a1 is the
//! least significant bit and h8 the most significant.
use std::fmt;
use std::iter::Iterator;
use std::ops;

use crate::types::{Square, TableIndex};

const FILE_A_BITS: u64 = 0x0101_0101_0101_0101;
const FILE_H_BITS: u64 = 0x8080_8080_8080_8080;

/// A set of squares, stored one bit per square.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Constructs a new bitboard from the given bits.
    pub const fn from_bits(bits: u64) -> Bitboard {
        Bitboard { bits }
    }

    /// Constructs a new bitboard with all bits set to one, representing
    /// a complete set.
    pub const fn all() -> Bitboard {
        Bitboard::from_bits(!0)
    }

    /// Constructs a new bitboard with all bits zeroed, representing
    /// the empty set.
    pub const fn none() -> Bitboard {
        Bitboard::from_bits(0)
    }

    /// Constructs a bitboard containing exactly one square.
    pub fn from_square(square: Square) -> Bitboard {
        Bitboard::from_bits(1u64 << square.as_index())
    }

    pub fn test(self, square: Square) -> bool {
        self.bits & (1u64 << square.as_index()) != 0
    }

    pub fn set(&mut self, square: Square) {
        self.bits |= 1u64 << square.as_index();
    }

    pub fn unset(&mut self, square: Square) {
        self.bits &= !(1u64 << square.as_index());
    }

    pub fn toggle(&mut self, square: Square) {
        self.bits ^= 1u64 << square.as_index();
    }

    pub const fn and(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits & other.bits)
    }

    pub const fn or(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits | other.bits)
    }

    pub const fn xor(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits ^ other.bits)
    }

    pub const fn complement(self) -> Bitboard {
        Bitboard::from_bits(!self.bits)
    }

    /// Produces an iterator over the squares contained in this bitboard,
    /// lowest square first.
    pub fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }

    /// Retrieves the number of squares contained in the set represented
    /// by this bitboard.
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    pub const fn empty(self) -> bool {
        self.bits == 0
    }

    /// Retrieves the lowest square in the set, if any.
    pub fn first(self) -> Option<Square> {
        self.iter().next()
    }

    //
    // Directional shifts. North and south move whole ranks and fall off the
    // top or bottom of the board on their own. Anything with an east or west
    // component first drops the squares on the edge file it moves away from,
    // otherwise those bits would reappear on the far side of the next rank.
    //

    pub const fn north(self) -> Bitboard {
        Bitboard::from_bits(self.bits << 8)
    }

    pub const fn south(self) -> Bitboard {
        Bitboard::from_bits(self.bits >> 8)
    }

    pub const fn east(self) -> Bitboard {
        Bitboard::from_bits((self.bits & !FILE_H_BITS) << 1)
    }

    pub const fn west(self) -> Bitboard {
        Bitboard::from_bits((self.bits & !FILE_A_BITS) >> 1)
    }

    pub const fn north_east(self) -> Bitboard {
        Bitboard::from_bits((self.bits & !FILE_H_BITS) << 9)
    }

    pub const fn north_west(self) -> Bitboard {
        Bitboard::from_bits((self.bits & !FILE_A_BITS) << 7)
    }

    pub const fn south_east(self) -> Bitboard {
        Bitboard::from_bits((self.bits & !FILE_H_BITS) >> 7)
    }

    pub const fn south_west(self) -> Bitboard {
        Bitboard::from_bits((self.bits & !FILE_A_BITS) >> 9)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Bitboard({:#018x})", self.bits)
    }
}

impl ops::BitAnd for Bitboard {
    type Output = Bitboard;

    fn bitand(self, rhs: Bitboard) -> Bitboard {
        self.and(rhs)
    }
}

impl ops::BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.bits &= rhs.bits;
    }
}

impl ops::BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(self, rhs: Bitboard) -> Bitboard {
        self.or(rhs)
    }
}

impl ops::BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.bits |= rhs.bits;
    }
}

impl ops::BitXor for Bitboard {
    type Output = Bitboard;

    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        self.xor(rhs)
    }
}

impl ops::Not for Bitboard {
    type Output = Bitboard;

    fn not(self) -> Bitboard {
        self.complement()
    }
}

/// BitboardIterator walks the set squares of a bitboard by repeatedly
/// extracting and clearing the lowest set bit. Once drained it stays empty;
/// iterate the original bitboard again to start over.
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }

        let next = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(Square::from_index(next))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    fn into_iter(self) -> BitboardIterator {
        self.iter()
    }
}
