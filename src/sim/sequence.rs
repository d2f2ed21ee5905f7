//! Round sequence generation

use rand::Rng;

use super::state::Direction;

/// Draw `length` directions uniformly, with replacement.
///
/// Repeats (including back-to-back ones) are allowed.
pub fn generate_sequence<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<Direction> {
    (0..length).map(|_| rng.random::<Direction>()).collect()
}
