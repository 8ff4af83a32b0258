//! Death of living cells.

use crate::config::{
    ADULT_MORTALITY_CHANCE, CHILD_MORTALITY_CUTOFF, CHILD_MORTALITY_MULTIPLIER, CROWDED_MAXIMUM,
    CROWDED_MORTALITY_MULTIPLIER, ELDERLY_MORTALITY_CUTOFF, ELDERLY_MORTALITY_MULTIPLIER,
    LONELINESS_MINIMUM, LONELINESS_MORTALITY_MULTIPLIER,
};
use crate::random::RandomSource;

/// Life stage used to pick the mortality modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeStage {
    Child,
    Adult,
    Elderly,
}

impl LifeStage {
    pub fn of(age: u32) -> Self {
        if age < CHILD_MORTALITY_CUTOFF {
            Self::Child
        } else if age > ELDERLY_MORTALITY_CUTOFF {
            Self::Elderly
        } else {
            Self::Adult
        }
    }
}

/// Probability that a cell of `age` with `neighbor_count` living neighbours
/// dies this tick.
///
/// Children and the elderly pay an age penalty plus a loneliness penalty;
/// adults only pay for overcrowding. The result is not clamped to `1.0`.
pub fn mortality_chance(age: u32, neighbor_count: usize) -> f64 {
    let stage = LifeStage::of(age);
    let mut mortality = ADULT_MORTALITY_CHANCE;

    match stage {
        LifeStage::Child => {
            mortality += f64::from(CHILD_MORTALITY_CUTOFF - age) * CHILD_MORTALITY_MULTIPLIER;
        }
        LifeStage::Elderly => {
            mortality += f64::from(age - ELDERLY_MORTALITY_CUTOFF) * ELDERLY_MORTALITY_MULTIPLIER;
        }
        LifeStage::Adult => {
            if neighbor_count > CROWDED_MAXIMUM {
                mortality +=
                    (neighbor_count - CROWDED_MAXIMUM) as f64 * CROWDED_MORTALITY_MULTIPLIER;
            }
        }
    }

    if neighbor_count < LONELINESS_MINIMUM && stage != LifeStage::Adult {
        mortality += (LONELINESS_MINIMUM - neighbor_count) as f64 * LONELINESS_MORTALITY_MULTIPLIER;
    }

    mortality
}

/// Rolls for the death of a living cell. Always consumes exactly one draw.
pub fn dies<S>(age: u32, neighbor_count: usize, rng: &mut S) -> bool
where
    S: RandomSource + ?Sized,
{
    rng.unit() < mortality_chance(age, neighbor_count)
}
