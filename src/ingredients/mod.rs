//! Ingredient line normalization.
//!
//! A raw line such as `"1 1/2 cups packed brown sugar"` goes through
//! [`Classifier`] (lower-casing, phrase rewrites, pattern matching), then
//! [`fraction::decode`] on the quantity, then [`units::convert`], producing
//! `(354.75, "brown sugar (mL)")`.
//!
//! Everything here is pure and reads only constant tables, so a
//! [`Normalizer`] can be shared freely between threads.

pub mod classifier;
pub mod fraction;
pub mod rewrite;
pub mod units;

use log::trace;

use crate::error::NormalizeError;
use crate::model::NormalizedIngredient;

pub use self::classifier::{classify, Classification, Classifier, MatchStrategy};
pub use self::fraction::{decode, VulgarFraction};
pub use self::rewrite::{Rewrite, RewriteKind, REWRITES};
pub use self::units::{convert, convert_token, CanonicalUnit, Conversion, UnitToken};

#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    classifier: Classifier<'a>,
}

impl Default for Normalizer<'static> {
    fn default() -> Self {
        Self::new(Classifier::default())
    }
}

impl<'a> Normalizer<'a> {
    pub const fn new(classifier: Classifier<'a>) -> Self {
        Self { classifier }
    }

    pub fn normalize(&self, raw: &str) -> Result<NormalizedIngredient, NormalizeError> {
        let Classification {
            quantity,
            unit,
            product,
        } = self.classifier.classify(raw);

        let value = fraction::decode(&quantity)?;
        let normalized = convert(value, unit, &product)?;

        trace!(
            "normalized {:?} -> ({}, {:?})",
            raw,
            normalized.value,
            normalized.product
        );
        Ok(normalized)
    }

    /// Normalize every line, keeping one result per line in input order.
    pub fn normalize_all<I, S>(&self, lines: I) -> Vec<Result<NormalizedIngredient, NormalizeError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| self.normalize(line.as_ref()))
            .collect()
    }
}

/// Normalize one ingredient line with the default rewrite table.
pub fn normalize(raw: &str) -> Result<NormalizedIngredient, NormalizeError> {
    Normalizer::default().normalize(raw)
}
