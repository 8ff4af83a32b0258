//! Repopulation of empty cells by their neighbours.

use crate::config::{
    MAX_BREED_AGE, MIN_BREED_AGE, REDUCED_FERTILITY_AGE, REDUCED_FERTILITY_PER_YEAR_MULTIPLIER,
    REQUIRED_PARENTS,
};
use crate::random::RandomSource;

/// Whether a neighbour of this age may act as a parent.
pub fn is_eligible_parent(age: u32) -> bool {
    age > MIN_BREED_AGE && age < MAX_BREED_AGE
}

/// A single parent's contribution to the breeding chance, in percent.
///
/// Full fertility up to [`REDUCED_FERTILITY_AGE`], then declining by a
/// rounded-up fraction per year. Not clamped: very old ages go negative.
pub fn fertility(age: u32) -> i64 {
    if age <= REDUCED_FERTILITY_AGE {
        100
    } else {
        let decline =
            (f64::from(age - REDUCED_FERTILITY_AGE) * REDUCED_FERTILITY_PER_YEAR_MULTIPLIER).ceil();
        100 - decline as i64
    }
}

/// Floored mean fertility of the eligible parents, or `None` when there are
/// fewer than [`REQUIRED_PARENTS`] of them.
pub fn breeding_chance(neighbors: &[u32]) -> Option<i64> {
    let (count, total) = neighbors
        .iter()
        .copied()
        .filter(|&age| is_eligible_parent(age))
        .fold((0i64, 0i64), |(count, total), age| {
            (count + 1, total + fertility(age))
        });

    if (count as usize) < REQUIRED_PARENTS {
        return None;
    }
    Some(total.div_euclid(count))
}

/// New age for an empty cell: `1` if it is born this tick, `0` otherwise.
///
/// Draws from `rng` only when enough eligible parents are present.
pub fn breed<S>(neighbors: &[u32], rng: &mut S) -> u32
where
    S: RandomSource + ?Sized,
{
    let Some(chance) = breeding_chance(neighbors) else {
        return 0;
    };
    if i64::from(rng.percent()) <= chance {
        1
    } else {
        0
    }
}
