//! Weighted review score.
//!
//! Every applicant receives two integer review ratings in `[0, 5]`: passion and
//! experience. They are collapsed into one weighted score which later acts as
//! the sampling weight, so the score must always be strictly positive.

use crate::core::AdmissionError;

/// Lowest accepted review rating.
pub const MIN_RATING: i32 = 0;
/// Highest accepted review rating.
pub const MAX_RATING: i32 = 5;
/// Offset added to every weighted score so the minimum score stays above zero.
pub const BASE_CONSTANT: f64 = 0.1;
/// Relative tolerance used when checking that the weights add up to 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Combines passion and experience ratings into a single weighted score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCalculator {
    passion_weight: f64,
    experience_weight: f64,
    base_constant: f64,
}

impl ScoreCalculator {
    /// Build a calculator. Fails with [`AdmissionError::ImproperWeights`] unless
    /// the two weights sum to 1.0 within [`WEIGHT_TOLERANCE`].
    pub fn new(passion_weight: f64, experience_weight: f64) -> Result<Self, AdmissionError> {
        if !equal_within_tolerance(passion_weight + experience_weight, 1.0, WEIGHT_TOLERANCE) {
            return Err(AdmissionError::ImproperWeights {
                passion: passion_weight,
                experience: experience_weight,
            });
        }
        Ok(Self {
            passion_weight,
            experience_weight,
            base_constant: BASE_CONSTANT,
        })
    }

    /// Passion weight.
    pub const fn passion_weight(&self) -> f64 {
        self.passion_weight
    }

    /// Experience weight.
    pub const fn experience_weight(&self) -> f64 {
        self.experience_weight
    }

    /// Offset applied to every score.
    pub const fn base_constant(&self) -> f64 {
        self.base_constant
    }

    /// `passion * wp + experience * we + base`.
    pub fn compute_weighted_score(&self, passion: i32, experience: i32) -> Result<f64, AdmissionError> {
        check_rating("passion", passion)?;
        check_rating("experience", experience)?;

        Ok(f64::from(passion) * self.passion_weight
            + f64::from(experience) * self.experience_weight
            + self.base_constant)
    }
}

fn check_rating(field: &'static str, value: i32) -> Result<(), AdmissionError> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(())
    } else {
        Err(AdmissionError::ScoreOutOfBounds { field, value })
    }
}

/// Compare `a` and `b` using a relative tolerance `e`, falling back to an
/// absolute comparison when `b` is zero.
#[allow(clippy::float_cmp)]
pub fn equal_within_tolerance(a: f64, b: f64, e: f64) -> bool {
    if a == b {
        return true;
    }
    let d = (a - b).abs();
    if b == 0.0 {
        return d < e;
    }
    d / b.abs() < e
}
