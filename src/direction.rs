// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::rng::RandomSource;
use crate::types::direction::Direction;

/// At or above this progress, both directions are equally likely.
const HIGH_PROGRESS: u8 = 80;

/// At or above this progress, the reverse direction is sometimes shown.
const MID_PROGRESS: u8 = 60;

const HIGH_REVERSE_PROBABILITY: f64 = 0.5;

const MID_REVERSE_PROBABILITY: f64 = 0.3;

/// The probability that a card with the given progress is shown from the
/// language being learned.
pub fn reverse_probability(progress: u8) -> f64 {
    if progress >= HIGH_PROGRESS {
        HIGH_REVERSE_PROBABILITY
    } else if progress >= MID_PROGRESS {
        MID_REVERSE_PROBABILITY
    } else {
        0.0
    }
}

/// Draws the direction to show a card in. Mixing in the reverse direction
/// makes recall harder as the card is mastered.
pub fn select_direction(progress: u8, rng: &mut impl RandomSource) -> Direction {
    let p = reverse_probability(progress);
    if p > 0.0 && rng.next_unit() < p {
        Direction::LearningToKnown
    } else {
        Direction::KnownToLearning
    }
}
