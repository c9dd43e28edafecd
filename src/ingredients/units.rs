//! Unit tokens and their conversion into canonical units.

use std::fmt;
use std::str::FromStr;

use crate::error::NormalizeError;
use crate::model::NormalizedIngredient;

/// Measurement recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitToken {
    Cup,
    Teaspoon,
    Tablespoon,
    Pound,
    Quart,
    Pinch,
    Serving,
    /// An explicit count
    Unit,
    /// Any of the egg phrasings, counted per egg
    Egg,
}

/// Target unit every recognized measurement is converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalUnit {
    Milliliter,
    Gram,
    Milligram,
    Serving,
    Unit,
}

impl CanonicalUnit {
    /// Suffix used in product labels, e.g. `"sugar (mL)"`.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            CanonicalUnit::Milliliter => "mL",
            CanonicalUnit::Gram => "g",
            CanonicalUnit::Milligram => "mg",
            CanonicalUnit::Serving => "serving",
            CanonicalUnit::Unit => "unit",
        }
    }
}

/// How one unit token maps onto its canonical unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub canonical: CanonicalUnit,
    pub factor: f64,
    /// Decimal digits kept after scaling; `None` keeps the value untouched.
    pub precision: Option<u32>,
}

impl Conversion {
    const fn milliliters(factor: f64) -> Self {
        Self {
            canonical: CanonicalUnit::Milliliter,
            factor,
            precision: Some(4),
        }
    }

    const fn exact(canonical: CanonicalUnit) -> Self {
        Self {
            canonical,
            factor: 1.0,
            precision: None,
        }
    }

    pub fn apply(&self, value: f64, product: &str) -> Result<NormalizedIngredient, NormalizeError> {
        let scaled = value * self.factor;
        let value = match self.precision {
            Some(digits) => round_half_even(scaled, digits)?,
            None => scaled,
        };

        Ok(NormalizedIngredient::new(
            value,
            format!("{product} ({})", self.canonical.abbreviation()),
        ))
    }
}

/// Conversion used when no unit was found in the line.
pub const UNITLESS: Conversion = Conversion::exact(CanonicalUnit::Unit);

impl UnitToken {
    pub const ALL: [UnitToken; 9] = [
        UnitToken::Cup,
        UnitToken::Teaspoon,
        UnitToken::Tablespoon,
        UnitToken::Pound,
        UnitToken::Quart,
        UnitToken::Pinch,
        UnitToken::Serving,
        UnitToken::Unit,
        UnitToken::Egg,
    ];

    pub const fn conversion(self) -> Conversion {
        match self {
            UnitToken::Cup => Conversion::milliliters(236.5),
            UnitToken::Teaspoon => Conversion::milliliters(5.0),
            UnitToken::Tablespoon => Conversion::milliliters(15.0),
            UnitToken::Quart => Conversion::milliliters(946.0),
            UnitToken::Pinch => Conversion::milliliters(0.31),
            UnitToken::Pound => Conversion {
                canonical: CanonicalUnit::Gram,
                factor: 453.5,
                precision: Some(0),
            },
            UnitToken::Serving => Conversion::exact(CanonicalUnit::Serving),
            UnitToken::Unit | UnitToken::Egg => UNITLESS,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            UnitToken::Cup => "cup",
            UnitToken::Teaspoon => "teaspoon",
            UnitToken::Tablespoon => "tablespoon",
            UnitToken::Pound => "pound",
            UnitToken::Quart => "quart",
            UnitToken::Pinch => "pinch",
            UnitToken::Serving => "serving",
            UnitToken::Unit => "unit",
            UnitToken::Egg => "egg",
        }
    }
}

impl fmt::Display for UnitToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitToken {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cup" => Ok(UnitToken::Cup),
            "teaspoon" => Ok(UnitToken::Teaspoon),
            "tablespoon" => Ok(UnitToken::Tablespoon),
            "pound" => Ok(UnitToken::Pound),
            "quart" => Ok(UnitToken::Quart),
            "pinch" => Ok(UnitToken::Pinch),
            // the classifier captures servings with their leading space
            "serving" | " serving" => Ok(UnitToken::Serving),
            "unit" => Ok(UnitToken::Unit),
            "egg" => Ok(UnitToken::Egg),
            other => Err(NormalizeError::UnknownUnit(other.to_string())),
        }
    }
}

/// Scale `value` by the unit's factor and tag the product with the canonical unit.
pub fn convert(
    value: f64,
    unit: Option<UnitToken>,
    product: &str,
) -> Result<NormalizedIngredient, NormalizeError> {
    unit.map_or(UNITLESS, UnitToken::conversion)
        .apply(value, product)
}

/// String-level variant of [`convert`].
///
/// A token missing from the conversion table is an error rather than a
/// silent fallback to `unit`, since a mis-tagged product corrupts every
/// aggregate it lands in.
pub fn convert_token(
    value: f64,
    unit: Option<&str>,
    product: &str,
) -> Result<NormalizedIngredient, NormalizeError> {
    let unit = unit.map(str::parse::<UnitToken>).transpose()?;
    convert(value, unit, product)
}

/// Round to `digits` decimals, ties to even, from the exact decimal
/// expansion of `value` (0.3333 cups is 78.8255 mL, not 78.8254).
fn round_half_even(value: f64, digits: u32) -> Result<f64, NormalizeError> {
    let rounded = format!("{:.*}", digits as usize, value);
    rounded
        .parse()
        .map_err(|e| NormalizeError::Format(format!("cannot round {value}: {e}")))
}
