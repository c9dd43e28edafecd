use super::fields::{parse_calories, parse_content, parse_duration};
use super::{ExtractedPage, Extractor, ParsingContext};
use crate::error::{ImportError, NormalizeError};
use crate::ingredients::Normalizer;
use crate::model::{Nutrition, RecipeRecord};
use html_escape::decode_html_entities;
use log::debug;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;
use std::convert::TryFrom;

/// Builds a [`RecipeRecord`] from the page's `application/ld+json` block.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLdExtractor {
    normalizer: Normalizer<'static>,
}

impl JsonLdExtractor {
    pub fn new(normalizer: Normalizer<'static>) -> Self {
        Self { normalizer }
    }

    /// Parse a page that is already in memory.
    pub fn parse_html(&self, url: &str, html: &str) -> Result<ExtractedPage, ImportError> {
        self.parse(&ParsingContext::new(url, html))
    }

    fn convert_to_record(&self, json_ld_recipe: JsonLdRecipe) -> Result<RecipeRecord, ImportError> {
        let ingredients = json_ld_recipe
            .recipe_ingredient
            .map(RecipeIngredients::into_lines)
            .unwrap_or_default()
            .iter()
            .map(|line| self.normalizer.normalize(line))
            .collect::<Result<Vec<_>, _>>()?;

        let nutrition = json_ld_recipe
            .nutrition
            .map(|nutrition| nutrition.to_nutrition())
            .transpose()?
            .unwrap_or_default();

        Ok(RecipeRecord {
            name: decode_html_symbols(&json_ld_recipe.name).trim().to_string(),
            description: json_ld_recipe.description.and_then(|desc| {
                let text = match desc {
                    DescriptionType::String(d) => d,
                    DescriptionType::Object(d) => d.text,
                };
                let decoded = decode_html_symbols(&text).trim().to_string();
                if decoded.is_empty() {
                    None
                } else {
                    Some(decoded)
                }
            }),
            instructions: json_ld_recipe
                .recipe_instructions
                .map(RecipeInstructions::into_steps)
                .unwrap_or_default(),
            prep_time_minutes: optional_duration(json_ld_recipe.prep_time.as_deref())?,
            cook_time_minutes: optional_duration(json_ld_recipe.cook_time.as_deref())?,
            total_time_minutes: optional_duration(json_ld_recipe.total_time.as_deref())?,
            nutrition,
            ingredients,
        })
    }
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    description: Option<DescriptionType>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<RecipeIngredients>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "prepTime")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime")]
    cook_time: Option<String>,
    #[serde(rename = "totalTime")]
    total_time: Option<String>,
    nutrition: Option<NutritionInformation>,
}

#[derive(Debug, Deserialize)]
struct TextObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DescriptionType {
    String(String),
    Object(TextObject),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Strings(Vec<String>),
    Objects(Vec<IngredientObject>),
}

#[derive(Debug, Deserialize)]
struct IngredientObject {
    name: String,
    amount: Option<String>,
}

impl RecipeIngredients {
    fn into_lines(self) -> Vec<String> {
        let lines: Vec<String> = match self {
            RecipeIngredients::Strings(ingredients) => ingredients,
            RecipeIngredients::Objects(ingredients) => ingredients
                .into_iter()
                .map(|ing| match ing.amount.as_deref().map(str::trim) {
                    Some(amount) if !amount.is_empty() => format!("{amount} {}", ing.name),
                    _ => ing.name,
                })
                .collect(),
        };

        lines
            .iter()
            .map(|line| decode_html_symbols(line).trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct RecipeInstructionObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<String>),
    MultipleObject(Vec<RecipeInstructionObject>),
    HowTo(Vec<HowTo>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<HowToStep>,
}

impl HowToStep {
    // Prefer text over name
    fn into_text(self) -> Option<String> {
        self.text.or(self.name)
    }
}

impl RecipeInstructions {
    fn into_steps(self) -> Vec<String> {
        let steps: Vec<String> = match self {
            RecipeInstructions::String(instructions) => vec![instructions],
            RecipeInstructions::Multiple(instructions) => instructions,
            RecipeInstructions::MultipleObject(instructions) => {
                instructions.into_iter().map(|obj| obj.text).collect()
            }
            RecipeInstructions::HowTo(sections) => sections
                .into_iter()
                .flat_map(|section| match section {
                    HowTo::HowToStep(step) => step.into_text().into_iter().collect::<Vec<_>>(),
                    HowTo::HowToSection(section) => section
                        .item_list_element
                        .into_iter()
                        .filter_map(HowToStep::into_text)
                        .collect(),
                })
                .collect(),
        };

        steps
            .iter()
            .map(|step| decode_html_symbols(step).trim().to_string())
            .filter(|step| !step.is_empty())
            .collect()
    }
}

/// Nutrition values arrive as text (`"12 g"`) on most sites, as bare numbers on some.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NutritionInformation {
    calories: Option<NumberOrText>,
    fat_content: Option<NumberOrText>,
    carbohydrate_content: Option<NumberOrText>,
    protein_content: Option<NumberOrText>,
    cholesterol_content: Option<NumberOrText>,
    sodium_content: Option<NumberOrText>,
}

impl NutritionInformation {
    fn to_nutrition(&self) -> Result<Nutrition, NormalizeError> {
        Ok(Nutrition {
            calories: nutrient(self.calories.as_ref(), parse_calories)?,
            fat_grams: nutrient(self.fat_content.as_ref(), parse_content)?,
            carbohydrate_grams: nutrient(self.carbohydrate_content.as_ref(), parse_content)?,
            protein_grams: nutrient(self.protein_content.as_ref(), parse_content)?,
            cholesterol_milligrams: nutrient(self.cholesterol_content.as_ref(), parse_content)?,
            sodium_milligrams: nutrient(self.sodium_content.as_ref(), parse_content)?,
        })
    }
}

fn nutrient(
    value: Option<&NumberOrText>,
    parse: fn(&str) -> Result<f64, NormalizeError>,
) -> Result<Option<f64>, NormalizeError> {
    match value {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(*n)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => parse(text.trim()).map(Some),
    }
}

fn optional_duration(value: Option<&str>) -> Result<Option<u64>, NormalizeError> {
    value
        .map(str::trim)
        .filter(|duration| !duration.is_empty())
        .map(parse_duration)
        .transpose()
}

impl TryFrom<&Value> for JsonLdRecipe {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    // Handle cases where there might be multiple JSON objects
    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    // Remove any trailing comma followed by closing brace/bracket
    cleaned = cleaned.replace(",]", "]").replace(",}", "}");

    cleaned.replace("<!--", "").replace("-->", "")
}

/// Objects worth inspecting in one JSON-LD block: a bare object, the items
/// of a top-level array, or the items of an `@graph`.
fn candidate_objects(json_ld: &Value) -> Vec<&Value> {
    match json_ld {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => match json_ld.get("@graph").and_then(Value::as_array) {
            Some(graph) => graph.iter().collect(),
            None => vec![json_ld],
        },
        _ => Vec::new(),
    }
}

fn has_type(item: &Value, wanted: &str) -> bool {
    match item.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case(wanted),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case(wanted)),
        _ => false,
    }
}

fn breadcrumb_urls(item: &Value) -> Vec<String> {
    item.get("itemListElement")
        .and_then(Value::as_array)
        .map(|elements| {
            elements
                .iter()
                .filter_map(|element| element.get("item")?.get("@id")?.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<ExtractedPage, ImportError> {
        let selector = Selector::parse("script[type='application/ld+json']")
            .map_err(|e| ImportError::ParseError(format!("invalid selector: {e}")))?;

        let mut recipe = None;
        let mut related_urls = Vec::new();

        for script in context.document.select(&selector) {
            let cleaned_json = sanitize_json(&script.inner_html());
            let json_ld = match serde_json::from_str::<Value>(&cleaned_json) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("Skipping unreadable JSON-LD block on {}: {}", context.url, e);
                    continue;
                }
            };

            for item in candidate_objects(&json_ld) {
                if has_type(item, "BreadcrumbList") {
                    related_urls.extend(breadcrumb_urls(item));
                } else if recipe.is_none() && has_type(item, "Recipe") {
                    match JsonLdRecipe::try_from(item) {
                        Ok(found) => recipe = Some(found),
                        Err(e) => debug!("Recipe block on {} did not deserialize: {}", context.url, e),
                    }
                }
            }
        }

        let recipe = recipe.ok_or(ImportError::NoStructuredData)?;
        debug!("Found recipe {:?} on {}", recipe.name, context.url);

        Ok(ExtractedPage {
            recipe: self.convert_to_record(recipe)?,
            related_urls,
        })
    }
}
