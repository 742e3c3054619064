//! Unit recognition and conversion constants
//!
//! Ingredient units are free-form strings ("g", "tbsp", "g cooked", "large").
//! Only plain weight and volume units are convertible; anything qualified or
//! count-like has to match exactly.

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCategory {
    /// Weight/mass units (g, oz, lb, kg)
    Weight,
    /// Volume units (ml, tbsp, cup, etc.)
    Volume,
    /// Count/discrete units (each, piece, large)
    Count,
    /// Anything else, including qualified units like "g cooked"
    Custom,
}

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

fn normalize(unit: &str) -> String {
    unit.trim().to_lowercase()
}

/// Get the conversion factor to grams for a weight unit
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    match normalize(unit).as_str() {
        "g" | "gram" | "grams" => Some(1.0),
        "mg" | "milligram" | "milligrams" => Some(G_PER_MG),
        "kg" | "kilogram" | "kilograms" => Some(G_PER_KG),
        "oz" | "ounce" | "ounces" => Some(G_PER_OZ),
        "lb" | "lbs" | "pound" | "pounds" => Some(G_PER_LB),
        _ => None,
    }
}

/// Get the conversion factor to milliliters for a volume unit
pub fn ml_per_unit(unit: &str) -> Option<f64> {
    match normalize(unit).as_str() {
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Some(1.0),
        "l" | "liter" | "liters" | "litre" | "litres" => Some(ML_PER_LITER),
        "tsp" | "teaspoon" | "teaspoons" => Some(ML_PER_TSP),
        "tbsp" | "tablespoon" | "tablespoons" => Some(ML_PER_TBSP),
        "fl oz" | "floz" | "fluid ounce" | "fluid ounces" => Some(ML_PER_FL_OZ),
        "cup" | "cups" => Some(ML_PER_CUP),
        _ => None,
    }
}

/// Determine the category of a unit string
pub fn categorize_unit(unit: &str) -> UnitCategory {
    if grams_per_unit(unit).is_some() {
        return UnitCategory::Weight;
    }
    if ml_per_unit(unit).is_some() {
        return UnitCategory::Volume;
    }
    match normalize(unit).as_str() {
        "each" | "piece" | "pieces" | "item" | "items" | "small" | "medium" | "large" => {
            UnitCategory::Count
        }
        _ => UnitCategory::Custom,
    }
}

/// Whether two unit strings name the same unit
pub fn same_unit(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Convert an amount between units of the same weight or volume category.
///
/// Returns `None` when the units are not interconvertible.
pub fn convert_amount(amount: f64, from: &str, to: &str) -> Option<f64> {
    if same_unit(from, to) {
        return Some(amount);
    }
    let factor: fn(&str) -> Option<f64> = match (categorize_unit(from), categorize_unit(to)) {
        (UnitCategory::Weight, UnitCategory::Weight) => grams_per_unit,
        (UnitCategory::Volume, UnitCategory::Volume) => ml_per_unit,
        _ => return None,
    };
    Some(amount * factor(from)? / factor(to)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_units() {
        assert_eq!(categorize_unit("g"), UnitCategory::Weight);
        assert_eq!(categorize_unit(" KG "), UnitCategory::Weight);
        assert_eq!(categorize_unit("tbsp"), UnitCategory::Volume);
        assert_eq!(categorize_unit("cup"), UnitCategory::Volume);
        assert_eq!(categorize_unit("large"), UnitCategory::Count);
        assert_eq!(categorize_unit("medium"), UnitCategory::Count);
        assert_eq!(categorize_unit("g cooked"), UnitCategory::Custom);
        assert_eq!(categorize_unit("scoop"), UnitCategory::Custom);
    }

    #[test]
    fn test_conversion_factors() {
        assert_eq!(grams_per_unit("oz"), Some(G_PER_OZ));
        assert_eq!(grams_per_unit("tbsp"), None);
        assert_eq!(ml_per_unit("tbsp"), Some(ML_PER_TBSP));
        assert_eq!(ml_per_unit("g"), None);
    }

    #[test]
    fn test_convert_amount() {
        assert_eq!(convert_amount(2.0, "kg", "g"), Some(2000.0));
        assert_eq!(convert_amount(1000.0, "ml", "l"), Some(1.0));
        assert_eq!(convert_amount(3.0, "Large", "large"), Some(3.0));
        assert_eq!(convert_amount(1.0, "tbsp", "g"), None);
        assert_eq!(convert_amount(100.0, "g dry", "g"), None);
        assert_eq!(convert_amount(1.0, "large", "medium"), None);
        assert_eq!(convert_amount(2.0, "each", "piece"), None);
        assert_eq!(convert_amount(500.0, "g", "kg"), Some(0.5));
    }
}
