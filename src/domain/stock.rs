//! The fixed board catalogue: every stock row is one combination of these four
//! dimensions.

use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

pub const MATERIALS: [&str; 5] = ["teak", "mahogany", "pine", "oak", "walnut"];
pub const BOARD_SIZES: [&str; 3] = ["12x12", "18x24", "24x36"];
pub const THICKNESSES: [&str; 3] = ["6mm", "12mm", "18mm"];
pub const COLORS: [&str; 3] = ["natural", "dark", "white"];

/// Releases may never take a combination below this many boards.
pub const RELEASE_FLOOR: i32 = 50;
pub const DEFAULT_REORDER_LEVEL: i32 = 100;

const PLACEHOLDER_PRICE_MIN: i64 = 800;
const PLACEHOLDER_PRICE_MAX: i64 = 6_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Combination {
    pub material: String,
    pub board_size: String,
    pub thickness: String,
    pub color: String,
}

impl Combination {
    pub fn new(material: &str, board_size: &str, thickness: &str, color: &str) -> Self {
        Self {
            material: material.to_string(),
            board_size: board_size.to_string(),
            thickness: thickness.to_string(),
            color: color.to_string(),
        }
    }

    /// Lower-cases and trims each dimension, then checks it against the catalogue.
    pub fn normalized(&self) -> Result<Self, AppError> {
        let normalized = Self {
            material: self.material.trim().to_lowercase(),
            board_size: self.board_size.trim().to_lowercase(),
            thickness: self.thickness.trim().to_lowercase(),
            color: self.color.trim().to_lowercase(),
        };
        check("material", &normalized.material, &MATERIALS)?;
        check("board_size", &normalized.board_size, &BOARD_SIZES)?;
        check("thickness", &normalized.thickness, &THICKNESSES)?;
        check("color", &normalized.color, &COLORS)?;
        Ok(normalized)
    }
}

fn check(field: &str, value: &str, allowed: &[&str]) -> Result<(), AppError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Invalid {field} '{value}', expected one of: {}",
            allowed.join(", ")
        )))
    }
}

pub fn is_known_material(material: &str) -> bool {
    MATERIALS.contains(&material)
}

/// Every catalogued combination, material-major.
pub fn all_combinations() -> Vec<Combination> {
    let mut combos = Vec::with_capacity(
        MATERIALS.len() * BOARD_SIZES.len() * THICKNESSES.len() * COLORS.len(),
    );
    for material in MATERIALS {
        for size in BOARD_SIZES {
            for thickness in THICKNESSES {
                for color in COLORS {
                    combos.push(Combination::new(material, size, thickness, color));
                }
            }
        }
    }
    combos
}

/// Seed price for a freshly initialised row, a multiple of 50.
pub fn placeholder_price<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    let raw = rng.gen_range(PLACEHOLDER_PRICE_MIN..=PLACEHOLDER_PRICE_MAX);
    raw - raw % 50
}

/// Whether releasing `quantity` boards out of `available` keeps the floor.
pub fn release_allowed(available: i32, quantity: i32) -> bool {
    quantity > 0 && i64::from(available) - i64::from(quantity) >= i64::from(RELEASE_FLOOR)
}

/// Boards a row must hold before `quantity` can leave it; `None` when that overflows.
pub fn required_on_hand(quantity: i32) -> Option<i32> {
    quantity.checked_add(RELEASE_FLOOR)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn catalogue_has_135_distinct_combinations() {
        let combos = all_combinations();
        assert_eq!(combos.len(), 135);
        let distinct: HashSet<_> = combos.iter().collect();
        assert_eq!(distinct.len(), 135);
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let combo = Combination::new(" Teak", "18X24", "12MM ", "Natural")
            .normalized()
            .unwrap();
        assert_eq!(combo, Combination::new("teak", "18x24", "12mm", "natural"));
    }

    #[test]
    fn rejects_unknown_dimensions() {
        let err = Combination::new("bamboo", "12x12", "6mm", "dark")
            .normalized()
            .unwrap_err();
        assert!(err.to_string().contains("Invalid material 'bamboo'"));
    }

    #[test]
    fn release_respects_floor() {
        assert!(release_allowed(120, 70));
        assert!(!release_allowed(120, 71));
        assert!(!release_allowed(40, 1));
        assert!(!release_allowed(500, 0));
        assert!(!release_allowed(i32::MIN, i32::MAX));
    }

    #[test]
    fn huge_release_quantities_have_no_bound() {
        assert_eq!(required_on_hand(10), Some(60));
        assert_eq!(required_on_hand(i32::MAX), None);
    }

    #[test]
    fn placeholder_prices_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let price = placeholder_price(&mut rng);
            assert!((PLACEHOLDER_PRICE_MIN..=PLACEHOLDER_PRICE_MAX).contains(&price));
            assert_eq!(price % 50, 0);
        }
    }
}
