//! Length and mass units with fixed SI conversion factors
//!
//! Aircraft documents declare their own to-SI factors; the caller picks the
//! target units here. Adding a unit means adding a table entry, never
//! touching builder or transform logic.

use std::fmt;
use std::str::FromStr;

/// Length units accepted as conversion targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthUnit {
    /// Millimeters
    Millimeter,
    /// Centimeters
    Centimeter,
    /// Decimeters
    Decimeter,
    /// Meters
    #[default]
    Meter,
    /// Inches
    Inch,
    /// Feet
    Foot,
}

impl LengthUnit {
    /// Meters in one unit
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            LengthUnit::Millimeter => 0.001,
            LengthUnit::Centimeter => 0.01,
            LengthUnit::Decimeter => 0.1,
            LengthUnit::Meter => 1.0,
            LengthUnit::Inch => 0.0254,
            LengthUnit::Foot => 0.3048,
        }
    }

    /// Units in one meter
    pub fn units_per_meter(&self) -> f64 {
        1.0 / self.meters_per_unit()
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Decimeter => "dm",
            LengthUnit::Meter => "m",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" => Ok(LengthUnit::Millimeter),
            "cm" | "centimeter" => Ok(LengthUnit::Centimeter),
            "dm" | "decimeter" => Ok(LengthUnit::Decimeter),
            "m" | "meter" => Ok(LengthUnit::Meter),
            "in" | "inch" => Ok(LengthUnit::Inch),
            "ft" | "foot" => Ok(LengthUnit::Foot),
            other => Err(format!("unknown length unit '{}'", other)),
        }
    }
}

/// Mass units accepted as conversion targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MassUnit {
    /// Grams
    Gram,
    /// Kilograms
    #[default]
    Kilogram,
    /// Ounces
    Ounce,
    /// Pounds
    Pound,
}

impl MassUnit {
    /// Kilograms in one unit
    pub fn kilograms_per_unit(&self) -> f64 {
        match self {
            MassUnit::Gram => 0.001,
            MassUnit::Kilogram => 1.0,
            MassUnit::Ounce => 0.028_349_523_125,
            MassUnit::Pound => 0.453_592_37,
        }
    }

    /// Units in one kilogram
    pub fn units_per_kilogram(&self) -> f64 {
        1.0 / self.kilograms_per_unit()
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            MassUnit::Gram => "g",
            MassUnit::Kilogram => "kg",
            MassUnit::Ounce => "oz",
            MassUnit::Pound => "lb",
        }
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MassUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gram" => Ok(MassUnit::Gram),
            "kg" | "kilogram" => Ok(MassUnit::Kilogram),
            "oz" | "ounce" => Ok(MassUnit::Ounce),
            "lb" | "pound" => Ok(MassUnit::Pound),
            other => Err(format!("unknown mass unit '{}'", other)),
        }
    }
}

/// Target units for a conversion run
///
/// Passed explicitly into the builder; there is no global unit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitPreferences {
    /// Target length unit for every length-valued field
    pub length: LengthUnit,
    /// Target mass unit for every mass-valued field
    pub mass: MassUnit,
}

impl UnitPreferences {
    /// Preferences with the given target units
    pub fn new(length: LengthUnit, mass: MassUnit) -> Self {
        UnitPreferences { length, mass }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_roundtrip() {
        for unit in [
            LengthUnit::Millimeter,
            LengthUnit::Centimeter,
            LengthUnit::Decimeter,
            LengthUnit::Meter,
            LengthUnit::Inch,
            LengthUnit::Foot,
        ] {
            let parsed: LengthUnit = unit.label().parse().unwrap();
            assert_eq!(parsed, unit);
            assert!((unit.meters_per_unit() * unit.units_per_meter() - 1.0).abs() < 1e-12);
        }
        assert!("furlong".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_mass_roundtrip() {
        for unit in [
            MassUnit::Gram,
            MassUnit::Kilogram,
            MassUnit::Ounce,
            MassUnit::Pound,
        ] {
            let parsed: MassUnit = unit.label().parse().unwrap();
            assert_eq!(parsed, unit);
        }
        assert!("stone".parse::<MassUnit>().is_err());
    }
}
