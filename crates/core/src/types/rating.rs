//! Product rating type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Rating`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum RatingError {
    /// The value is outside the 0–5 scale or not a number.
    #[error("rating must be between {min} and {max}")]
    OutOfRange {
        /// Scale minimum.
        min: f32,
        /// Scale maximum.
        max: f32,
    },
}

/// An average review rating on the 0–5 star scale.
///
/// The wrapped value is guaranteed finite and within the scale, which lets
/// comparators over ratings be a total order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(f32);

impl Rating {
    /// Scale minimum.
    pub const MIN: f32 = 0.0;
    /// Scale maximum.
    pub const MAX: f32 = 5.0;

    /// Construct a rating, rejecting values off the scale.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] if the value is not finite or not
    /// within `0.0..=5.0`.
    pub fn new(value: f32) -> Result<Self, RatingError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(RatingError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Construct a rating, clamping off-scale values into range.
    ///
    /// Non-finite input clamps to the scale minimum. Curated catalog data
    /// uses this so a bad entry degrades instead of failing the seed.
    #[must_use]
    pub fn clamped(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(Self::MIN, Self::MAX))
        } else {
            Self(Self::MIN)
        }
    }

    /// The rating value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Whether this rating meets the given threshold.
    #[must_use]
    pub fn at_least(&self, threshold: f32) -> bool {
        self.0 >= threshold
    }
}

// Constructors guarantee a finite value, so equality and ordering are total.
impl Eq for Rating {}

impl PartialOrd for Rating {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rating {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_scale() {
        assert!(Rating::new(0.0).is_ok());
        assert!(Rating::new(4.5).is_ok());
        assert!(Rating::new(5.0).is_ok());
    }

    #[test]
    fn test_new_rejects_off_scale() {
        assert!(matches!(
            Rating::new(5.1),
            Err(RatingError::OutOfRange { .. })
        ));
        assert!(matches!(
            Rating::new(-0.1),
            Err(RatingError::OutOfRange { .. })
        ));
        assert!(matches!(
            Rating::new(f32::NAN),
            Err(RatingError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Rating::clamped(7.0).value(), 5.0);
        assert_eq!(Rating::clamped(-1.0).value(), 0.0);
        assert_eq!(Rating::clamped(f32::NAN).value(), 0.0);
        assert_eq!(Rating::clamped(4.2).value(), 4.2);
    }

    #[test]
    fn test_ordering_is_total() {
        let mut ratings = vec![
            Rating::clamped(4.8),
            Rating::clamped(3.9),
            Rating::clamped(4.8),
            Rating::clamped(0.0),
        ];
        ratings.sort();
        assert_eq!(ratings.first().unwrap().value(), 0.0);
        assert_eq!(ratings.last().unwrap().value(), 4.8);
    }

    #[test]
    fn test_at_least() {
        assert!(Rating::clamped(4.5).at_least(4.0));
        assert!(!Rating::clamped(3.9).at_least(4.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Rating::clamped(4.5)), "4.5");
        assert_eq!(format!("{}", Rating::clamped(4.0)), "4.0");
    }
}
