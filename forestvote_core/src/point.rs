//! Test points in the unit square.

use crate::tree::Feature;
use forestvote_env::EntropySource;
use serde::{Deserialize, Serialize};

/// A 2D test point. Generated coordinates are rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x1: f64,
    pub x2: f64,
}

impl Point {
    pub fn new(x1: f64, x2: f64) -> Self {
        Self { x1, x2 }
    }

    /// Value of the given feature.
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::X1 => self.x1,
            Feature::X2 => self.x2,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x1 = {:.2}, x2 = {:.2}", self.x1, self.x2)
    }
}

/// Rounds to 2 decimal digits.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Draws `x1` then `x2`, each uniform in `[0, 1)` and rounded to 2 decimals.
///
/// Rounding can produce exactly 1.00.
pub fn generate_point<E: EntropySource>(entropy: &mut E) -> Point {
    let x1 = round2(entropy.uniform_unit());
    let x2 = round2(entropy.uniform_unit());
    Point::new(x1, x2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use forestvote_env::ScriptedEntropy;

    #[test]
    fn test_generate_point_rounds() {
        let mut entropy = ScriptedEntropy::new(vec![0.304_9, 0.718_3]);
        let point = generate_point(&mut entropy);
        assert_relative_eq!(point.x1, 0.30);
        assert_relative_eq!(point.x2, 0.72, epsilon = 1e-12);
    }

    #[test]
    fn test_rounded_grid_values_match_literals() {
        // A point drawn onto a grid value must compare equal to the threshold
        assert_eq!(round2(0.35), 0.35);
        assert_eq!(round2(0.649_999_9), 0.65);
        assert_eq!(round2(0.2), 0.2);
    }

    #[test]
    fn test_value_by_feature() {
        let point = Point::new(0.1, 0.9);
        assert_eq!(point.value(Feature::X1), 0.1);
        assert_eq!(point.value(Feature::X2), 0.9);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(0.3, 0.72).to_string(), "x1 = 0.30, x2 = 0.72");
    }
}
