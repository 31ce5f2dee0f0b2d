//! Geometric level generator using inverse transform sampling.

use rand::prelude::*;
use thiserror::Error;

use crate::level_generator::{DEFAULT_MAX_LEVEL, DEFAULT_P, LevelGenerator};

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when creating a [`Geometric`] or
/// [`NaiveGeometric`][crate::NaiveGeometric] level generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum GeometricError {
    /// The probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// Validate the parameter of a geometric distribution.
pub(crate) fn check_probability(p: f64) -> Result<(), GeometricError> {
    if 0.0 < p && p < 1.0 {
        Ok(())
    } else {
        Err(GeometricError::InvalidProbability)
    }
}

/// A level generator sampling a geometric distribution in constant time.
///
/// A uniform variate `$u \in [0, 1)$` is mapped through the inverse of the
/// geometric cumulative distribution function:
///
/// ```math
/// n = \left\lfloor \frac{\ln(1 - u)}{\ln(1 - p)} \right\rfloor
/// ```
///
/// and the result is clamped to `max_level`. Under this parametrisation the
/// probability of a level number of at least `$n$` is `$(1 - p)^n$`, so `$p$`
/// acts as the per-level probability of stopping.
#[derive(Debug)]
pub struct Geometric {
    /// The largest level number that will be produced.
    max_level: usize,
    /// `$\ln(1 - p)$`, computed once through `ln_1p` so that it stays non-zero
    /// for tiny `$p$`.
    ln_q: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl Geometric {
    /// Create a new geometric level generator producing level numbers in
    /// `$[0, \text{max\_level}]$`.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1.
    #[inline]
    pub fn new(max_level: usize, p: f64) -> Result<Self, GeometricError> {
        check_probability(p)?;
        Ok(Self::from_parts(max_level, p, SmallRng::from_rng(&mut rand::rng())))
    }

    /// Create a new geometric level generator whose random number generator is
    /// seeded with `seed`, so that the produced sequence is reproducible.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1.
    #[inline]
    pub fn with_seed(max_level: usize, p: f64, seed: u64) -> Result<Self, GeometricError> {
        check_probability(p)?;
        Ok(Self::from_parts(max_level, p, SmallRng::seed_from_u64(seed)))
    }

    #[expect(clippy::float_arithmetic, reason = "Computing ln(1 - p) is fine")]
    fn from_parts(max_level: usize, p: f64, rng: SmallRng) -> Self {
        Geometric {
            max_level,
            ln_q: (-p).ln_1p(),
            rng,
        }
    }

    /// The largest level number this generator produces.
    #[inline]
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.max_level
    }
}

impl Default for Geometric {
    #[inline]
    fn default() -> Self {
        Self::from_parts(DEFAULT_MAX_LEVEL, DEFAULT_P, SmallRng::from_rng(&mut rand::rng()))
    }
}

impl LevelGenerator for Geometric {
    #[inline]
    #[expect(clippy::float_arithmetic, reason = "Computing inverse CDF")]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "float to int casts saturate and the value is clamped below"
    )]
    #[expect(clippy::as_conversions, reason = "No other way to do this")]
    fn next_level(&mut self) -> usize {
        let u = self.rng.random::<f64>();
        let level = ((-u).ln_1p() / self.ln_q).floor() as usize;
        level.min(self.max_level)
    }
}
