//! Shared macronutrient structure
//!
//! Used across ingredients, meals, meal plans and daily nutrition logs.

use serde::{Deserialize, Serialize};

/// Macronutrients in grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
}

impl Macros {
    pub const fn new(protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            protein,
            carbs,
            fat,
            fiber: None,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale all values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
            fiber: self.fiber.map(|f| f * multiplier),
        }
    }

    /// Add another set of macros to this one
    pub fn add(&self, other: &Macros) -> Self {
        let fiber = match (self.fiber, other.fiber) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
        };
        Self {
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            fiber,
        }
    }

    /// Energy implied by the macros (4/4/9 kcal per gram)
    pub fn estimated_calories(&self) -> f64 {
        self.protein * 4.0 + self.carbs * 4.0 + self.fat * 9.0
    }
}

impl std::ops::Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        Macros::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Macros {
    type Output = Macros;

    fn mul(self, multiplier: f64) -> Macros {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Macros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Macros::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_and_scale() {
        let total: Macros = vec![Macros::new(10.0, 6.0, 5.0), Macros::new(0.7, 14.0, 0.3)]
            .into_iter()
            .sum();
        assert!((total.protein - 10.7).abs() < 1e-9);
        assert!((total.carbs - 20.0).abs() < 1e-9);
        assert_eq!(total.fiber, None);

        let doubled = total * 2.0;
        assert!((doubled.fat - 10.6).abs() < 1e-9);
    }

    #[test]
    fn test_fiber_is_kept_when_only_one_side_has_it() {
        let a = Macros {
            fiber: Some(3.0),
            ..Macros::new(1.0, 1.0, 1.0)
        };
        let b = Macros::new(1.0, 1.0, 1.0);
        assert_eq!((a + b).fiber, Some(3.0));
    }

    #[test]
    fn test_estimated_calories() {
        assert_eq!(Macros::new(10.0, 10.0, 10.0).estimated_calories(), 170.0);
    }
}
