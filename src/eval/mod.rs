// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::position::Position;

mod material_evaluator;

pub use material_evaluator::MaterialEvaluator;

/// A static evaluation of a position, in centipawns from White's point of
/// view: positive favors White, negative favors Black.
pub trait BoardEvaluator: Default {
    fn evaluate(&self, pos: &Position) -> i32;
}
