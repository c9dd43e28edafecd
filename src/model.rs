use serde::{Deserialize, Serialize};

/// A single ingredient line reduced to a value in its canonical unit.
///
/// Serialized as `[value, "label"]`, e.g. `[354.75, "brown sugar (mL)"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, String)", into = "(f64, String)")]
pub struct NormalizedIngredient {
    pub value: f64,
    /// Food phrase followed by the canonical unit abbreviation in parentheses
    pub product: String,
}

impl NormalizedIngredient {
    pub fn new(value: f64, product: impl Into<String>) -> Self {
        Self {
            value,
            product: product.into(),
        }
    }
}

impl From<(f64, String)> for NormalizedIngredient {
    fn from((value, product): (f64, String)) -> Self {
        Self { value, product }
    }
}

impl From<NormalizedIngredient> for (f64, String) {
    fn from(ingredient: NormalizedIngredient) -> Self {
        (ingredient.value, ingredient.product)
    }
}

/// Per-serving nutrition, as published in the page's structured data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(rename = "energyContentCalories")]
    pub calories: Option<f64>,
    #[serde(rename = "fatContentGrams")]
    pub fat_grams: Option<f64>,
    #[serde(rename = "carbohydrateContentGrams")]
    pub carbohydrate_grams: Option<f64>,
    #[serde(rename = "proteinContentGrams")]
    pub protein_grams: Option<f64>,
    #[serde(rename = "cholesterolContentMilligrams")]
    pub cholesterol_milligrams: Option<f64>,
    #[serde(rename = "sodiumContentMilligrams")]
    pub sodium_milligrams: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "recipeInstructions", default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
    pub prep_time_minutes: Option<u64>,
    pub cook_time_minutes: Option<u64>,
    pub total_time_minutes: Option<u64>,
    #[serde(flatten)]
    pub nutrition: Nutrition,
    pub ingredients: Vec<NormalizedIngredient>,
}
