//! Splits a raw ingredient line into quantity, unit and product phrase.

use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use super::fraction::{VulgarFraction, THIN_SPACE};
use super::rewrite::{self, Rewrite, REWRITES};
use super::units::UnitToken;

/// Leading quantity (one or two parts) followed by a single space.
static QUANTITY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    let part = format!("[0-9./{}]+", VulgarFraction::glyphs());
    Regex::new(&format!("(?s)^({part}(?: {part})?) (.*)$"))
        .expect("quantity prefix pattern is valid")
});

/// Egg phrasings and the phrase each collapses to.
///
/// The variants with a leading space come from lines with a double space
/// after the quantity, e.g. `"2  large eggs egg"`.
const EGG_VARIANTS: &[(&str, &str)] = &[
    ("egg", "egg"),
    (" large eggs egg", "egg"),
    ("egg yolk", "egg yolk"),
    ("egg, beaten", "egg, beaten"),
    (" large eggs eggs, beaten", "eggs, beaten"),
    (" large egg whites egg white", "egg white"),
];

/// Unit words tried by [`MatchStrategy::MainUnit`], in priority order.
const UNIT_WORDS: &[(&str, UnitToken)] = &[
    ("cup", UnitToken::Cup),
    ("teaspoon", UnitToken::Teaspoon),
    ("tablespoon", UnitToken::Tablespoon),
    (" serving", UnitToken::Serving),
    ("pound", UnitToken::Pound),
    ("quart", UnitToken::Quart),
    ("pinch", UnitToken::Pinch),
];

/// Result of classifying one ingredient line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub quantity: String,
    pub unit: Option<UnitToken>,
    pub product: String,
}

/// Named matchers, tried in [`MatchStrategy::ORDER`]; the first hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Quantity followed by nothing but an egg phrase
    Egg,
    /// Quantity, a known unit word, then the product
    MainUnit,
    /// Quantity followed directly by the product
    Unitless,
}

impl MatchStrategy {
    pub const ORDER: [MatchStrategy; 3] = [
        MatchStrategy::Egg,
        MatchStrategy::MainUnit,
        MatchStrategy::Unitless,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            MatchStrategy::Egg => "egg",
            MatchStrategy::MainUnit => "main-unit",
            MatchStrategy::Unitless => "unitless",
        }
    }

    /// Try this strategy on a line already split after its quantity.
    pub fn try_match(self, quantity: &str, rest: &str) -> Option<Classification> {
        let (unit, product) = match self {
            MatchStrategy::Egg => match_egg(rest)?,
            MatchStrategy::MainUnit => match_unit_word(rest)?,
            MatchStrategy::Unitless => {
                if rest.is_empty() {
                    return None;
                }
                (None, rest.to_string())
            }
        };

        Some(Classification {
            quantity: quantity.to_string(),
            unit,
            product,
        })
    }
}

fn match_egg(rest: &str) -> Option<(Option<UnitToken>, String)> {
    let singular = rest.strip_suffix('s');
    EGG_VARIANTS
        .iter()
        .find(|(phrase, _)| rest == *phrase || singular == Some(*phrase))
        .map(|(_, canonical)| (Some(UnitToken::Egg), canonical.to_string()))
}

fn match_unit_word(rest: &str) -> Option<(Option<UnitToken>, String)> {
    UNIT_WORDS.iter().find_map(|(word, unit)| {
        let after = rest.strip_prefix(word)?;
        let after = after.strip_prefix('s').unwrap_or(after);
        let product = after.strip_prefix(' ')?;
        if product.is_empty() {
            return None;
        }
        Some((Some(*unit), product.to_string()))
    })
}

/// Classifier configured with an ordered rewrite table.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    rewrites: &'a [Rewrite],
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::new(REWRITES)
    }
}

impl<'a> Classifier<'a> {
    pub const fn new(rewrites: &'a [Rewrite]) -> Self {
        Self { rewrites }
    }

    /// Lower-case the line, turn thin spaces into plain spaces, then apply
    /// the rewrite table.
    pub fn preprocess(&self, raw: &str) -> String {
        let line = raw.to_lowercase().replace(THIN_SPACE, " ");
        rewrite::apply_all(self.rewrites, line)
    }

    /// Classify a raw ingredient line. Always produces a result: a line with
    /// no leading quantity becomes one unit of the whole line.
    pub fn classify(&self, raw: &str) -> Classification {
        let line = self.preprocess(raw);

        if let Some(captures) = QUANTITY_PREFIX.captures(&line) {
            let quantity = &captures[1];
            let rest = &captures[2];

            for strategy in MatchStrategy::ORDER {
                if let Some(classification) = strategy.try_match(quantity, rest) {
                    trace!("{:?} matched {} strategy", line, strategy.name());
                    return classification;
                }
            }
        }

        trace!("{:?} matched no strategy; counting it as one unit", line);
        Classification {
            quantity: "1".to_string(),
            unit: None,
            product: line,
        }
    }
}

/// Classify with the default rewrite table.
pub fn classify(raw: &str) -> Classification {
    Classifier::default().classify(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classification(quantity: &str, unit: Option<UnitToken>, product: &str) -> Classification {
        Classification {
            quantity: quantity.to_string(),
            unit,
            product: product.to_string(),
        }
    }

    #[test]
    fn test_plain_eggs() {
        assert_eq!(
            classify("2 eggs"),
            classification("2", Some(UnitToken::Egg), "egg")
        );
        assert_eq!(
            classify("1 Egg"),
            classification("1", Some(UnitToken::Egg), "egg")
        );
    }

    #[test]
    fn test_egg_variants_collapse() {
        assert_eq!(
            classify("3  large eggs eggs, beaten").product,
            "eggs, beaten"
        );
        assert_eq!(
            classify("2  large egg whites egg whites").product,
            "egg white"
        );
        assert_eq!(classify("4  large eggs egg").product, "egg");
        assert_eq!(
            classify("2 egg yolks"),
            classification("2", Some(UnitToken::Egg), "egg yolk")
        );
        assert_eq!(classify("1 egg, beaten").product, "egg, beaten");
    }

    #[test]
    fn test_egg_with_trailing_text_is_not_an_egg() {
        assert_eq!(
            classify("2 eggs, room temperature"),
            classification("2", None, "eggs, room temperature")
        );
    }

    #[test]
    fn test_main_unit_pattern() {
        assert_eq!(
            classify("1 1/2 cups packed brown sugar"),
            classification("1 1/2", Some(UnitToken::Cup), "brown sugar")
        );
        assert_eq!(
            classify("2 tablespoons olive oil"),
            classification("2", Some(UnitToken::Tablespoon), "olive oil")
        );
        assert_eq!(
            classify("½ teaspoon salt"),
            classification("½", Some(UnitToken::Teaspoon), "salt")
        );
        assert_eq!(
            classify("1 pinch ground nutmeg"),
            classification("1", Some(UnitToken::Pinch), "ground nutmeg")
        );
        assert_eq!(
            classify("1 pound ground beef"),
            classification("1", Some(UnitToken::Pound), "ground beef")
        );
    }

    #[test]
    fn test_serving_keeps_its_leading_space_form() {
        assert_eq!(
            classify("1  serving cooking spray"),
            classification("1", Some(UnitToken::Serving), "cooking spray")
        );
    }

    #[test]
    fn test_thin_space_between_whole_and_fraction() {
        assert_eq!(
            classify("1\u{2009}½ cups milk"),
            classification("1 ½", Some(UnitToken::Cup), "milk")
        );
    }

    #[test]
    fn test_unit_word_needs_a_product() {
        assert_eq!(classify("2 cups"), classification("2", None, "cups"));
    }

    #[test]
    fn test_unitless_pattern() {
        assert_eq!(
            classify("3 carrots, diced"),
            classification("3", None, "carrots, diced")
        );
        assert_eq!(
            classify("1 (8 ounce) package cream cheese"),
            classification("1", None, "(8 ounce) package cream cheese")
        );
    }

    #[test]
    fn test_fallback_is_one_unit_of_the_whole_line() {
        assert_eq!(classify("Salt to taste"), classification("1", None, "salt"));
        assert_eq!(
            classify("cooking spray"),
            classification("1", None, "cooking spray")
        );
        assert_eq!(classify("2"), classification("1", None, "2"));
    }

    #[test]
    fn test_strategy_order() {
        assert_eq!(
            MatchStrategy::ORDER.map(MatchStrategy::name),
            ["egg", "main-unit", "unitless"]
        );
    }

    #[test]
    fn test_custom_rewrite_table() {
        let empty = Classifier::new(&[]);
        assert_eq!(
            empty.classify("1 cup packed brown sugar"),
            classification("1", Some(UnitToken::Cup), "packed brown sugar")
        );
    }
}
