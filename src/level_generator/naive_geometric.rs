//! Geometric level generator simulating each trial.

use rand::prelude::*;

use crate::level_generator::LevelGenerator;
use crate::level_generator::geometric::{GeometricError, check_probability};

/// A level generator which draws one uniform variate per level.
///
/// Starting from level 0, the level number is incremented for as long as each
/// draw is below `$p$`, stopping at the first failed draw or once `max_level`
/// is reached. The probability of a level number of at least `$n$` is
/// therefore `$p^n$`.
///
/// This needs on average `$1/(1-p)$` draws per call, compared to a single draw
/// for [`Geometric`][crate::Geometric]. It is mostly useful as a reference
/// implementation.
#[derive(Debug)]
pub struct NaiveGeometric {
    /// The largest level number that will be produced.
    max_level: usize,
    /// The probability that a node present on one level is promoted to the
    /// next.
    p: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl NaiveGeometric {
    /// Create a new generator producing level numbers in
    /// `$[0, \text{max\_level}]$` with promotion probability `p`.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1.
    #[inline]
    pub fn new(max_level: usize, p: f64) -> Result<Self, GeometricError> {
        check_probability(p)?;
        Ok(NaiveGeometric {
            max_level,
            p,
            rng: SmallRng::from_rng(&mut rand::rng()),
        })
    }

    /// Same as [`NaiveGeometric::new`], with a reproducible random number
    /// generator seeded by `seed`.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1.
    #[inline]
    pub fn with_seed(max_level: usize, p: f64, seed: u64) -> Result<Self, GeometricError> {
        check_probability(p)?;
        Ok(NaiveGeometric {
            max_level,
            p,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// The largest level number this generator produces.
    #[inline]
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.max_level
    }
}

impl LevelGenerator for NaiveGeometric {
    #[inline]
    fn next_level(&mut self) -> usize {
        let mut level = 0;
        while level < self.max_level && self.rng.random::<f64>() < self.p {
            level += 1;
        }
        level
    }
}
