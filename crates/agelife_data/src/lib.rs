//! Plain data types shared between the simulation engine and its hosts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of display age classes (`age-0` through `age-10`, plus `age-100`).
pub const AGE_CLASS_COUNT: usize = 12;

/// Coarse grouping of a cell age into roughly ten-year bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgeClass(u8);

impl AgeClass {
    /// Everything at or above this age lands in the same class.
    pub const CENTENARIAN_AGE: u32 = 100;

    pub fn from_age(age: u32) -> Self {
        if age >= Self::CENTENARIAN_AGE {
            Self(100)
        } else {
            Self(age.div_ceil(10) as u8)
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Histogram slot: 0..=10 for the decade bands, 11 for the 100+ band.
    pub fn index(self) -> usize {
        if self.0 == 100 {
            AGE_CLASS_COUNT - 1
        } else {
            self.0 as usize
        }
    }

    pub fn label(self) -> String {
        format!("age-{}", self.0)
    }
}

/// Living cells only, keyed by row then column.
pub type SparseSnapshot = BTreeMap<usize, BTreeMap<usize, u32>>;

/// Aggregate view of one generation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PopulationStats {
    pub generation: u64,
    pub population: usize,
    pub empty: usize,
    pub mean_age: f64,
    pub max_age: u32,
    pub age_classes: [usize; AGE_CLASS_COUNT],
}

impl PopulationStats {
    /// Builds stats from an iterator over every cell age, empty cells included.
    pub fn from_ages<I>(generation: u64, ages: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut stats = Self {
            generation,
            ..Self::default()
        };
        let mut total: u64 = 0;
        for age in ages {
            if age == 0 {
                stats.empty += 1;
                continue;
            }
            stats.population += 1;
            total += u64::from(age);
            stats.max_age = stats.max_age.max(age);
            stats.age_classes[AgeClass::from_age(age).index()] += 1;
        }
        if stats.population > 0 {
            stats.mean_age = total as f64 / stats.population as f64;
        }
        stats
    }

    pub fn occupancy(&self) -> f64 {
        let cells = self.population + self.empty;
        if cells == 0 {
            0.0
        } else {
            self.population as f64 / cells as f64
        }
    }
}
