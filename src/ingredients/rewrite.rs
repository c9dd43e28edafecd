//! Ordered phrase rewrites applied to a lower-cased ingredient line before
//! classification.
//!
//! Each rewrite is a literal, global substring replacement. The table is
//! applied top to bottom on a single string, so an earlier entry can enable
//! or disable a later one. Reordering entries changes results.

/// What a rewrite entry is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteKind {
    /// Drops a serving qualifier such as "to taste" that carries no amount
    QualifierStrip,
    /// Drops a note that the amount is split across recipe steps
    DividedStrip,
    /// Collapses a synonym onto the product name used in aggregation
    Synonym,
    /// Drops a packing or sifting descriptor that does not change the product
    PackingStrip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewrite {
    pub target: &'static str,
    pub replacement: &'static str,
    pub kind: RewriteKind,
}

impl Rewrite {
    pub const fn new(target: &'static str, replacement: &'static str, kind: RewriteKind) -> Self {
        Self {
            target,
            replacement,
            kind,
        }
    }

    pub fn apply(&self, line: String) -> String {
        if line.contains(self.target) {
            line.replace(self.target, self.replacement)
        } else {
            line
        }
    }
}

use RewriteKind::{DividedStrip, PackingStrip, QualifierStrip, Synonym};

/// Default rewrite table.
pub static REWRITES: &[Rewrite] = &[
    // "as much as you like" qualifiers; the longer forms go first so the
    // leading comma is removed with them
    Rewrite::new(", or more to taste", "", QualifierStrip),
    Rewrite::new(", or more as needed", "", QualifierStrip),
    Rewrite::new(", or as needed", "", QualifierStrip),
    Rewrite::new(", or to taste", "", QualifierStrip),
    Rewrite::new(" to taste", "", QualifierStrip),
    // amount split between steps
    Rewrite::new(" - divided", "", DividedStrip),
    Rewrite::new(", divided", "", DividedStrip),
    Rewrite::new(" and divided", "", DividedStrip),
    Rewrite::new(" (divided)", "", DividedStrip),
    Rewrite::new(" for decoration", "", QualifierStrip),
    Rewrite::new("white sugar", "sugar", Synonym),
    Rewrite::new("confectioners' sugar", "powdered sugar", Synonym),
    Rewrite::new("sifted ", "", PackingStrip),
    Rewrite::new(", sifted", "", PackingStrip),
    // "packed brown sugar" runs first, so "firmly packed brown sugar"
    // ends up as "firmly brown sugar"
    Rewrite::new("packed brown sugar", "brown sugar", PackingStrip),
    Rewrite::new("firmly packed brown sugar", "brown sugar", PackingStrip),
    Rewrite::new("brown sugar, firmly packed", "brown sugar", PackingStrip),
    Rewrite::new("packed light brown sugar", "light brown sugar", PackingStrip),
    Rewrite::new("firmly packed dark brown sugar", "dark brown sugar", PackingStrip),
    Rewrite::new("unsweetened cocoa powder", "cocoa powder", Synonym),
    Rewrite::new("distilled white vinegar", "white vinegar", Synonym),
];

/// Apply `rewrites` in order.
pub fn apply_all(rewrites: &[Rewrite], line: String) -> String {
    rewrites
        .iter()
        .fold(line, |line, rewrite| rewrite.apply(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(line: &str) -> String {
        apply_all(REWRITES, line.to_string())
    }

    #[test]
    fn test_strips_taste_qualifiers() {
        assert_eq!(rewrite("salt to taste"), "salt");
        assert_eq!(rewrite("1 pinch salt, or more to taste"), "1 pinch salt");
        assert_eq!(rewrite("2 cups water, or as needed"), "2 cups water");
    }

    #[test]
    fn test_strips_divided_notes() {
        assert_eq!(rewrite("1 cup butter, divided"), "1 cup butter");
        assert_eq!(rewrite("1 cup milk - divided"), "1 cup milk");
        assert_eq!(rewrite("2 eggs (divided)"), "2 eggs");
    }

    #[test]
    fn test_collapses_synonyms() {
        assert_eq!(rewrite("1 cup white sugar"), "1 cup sugar");
        assert_eq!(rewrite("1 cup confectioners' sugar"), "1 cup powdered sugar");
        assert_eq!(rewrite("1 cup sifted all-purpose flour"), "1 cup all-purpose flour");
        assert_eq!(
            rewrite("1/2 cup unsweetened cocoa powder"),
            "1/2 cup cocoa powder"
        );
        assert_eq!(
            rewrite("1 tablespoon distilled white vinegar"),
            "1 tablespoon white vinegar"
        );
    }

    #[test]
    fn test_order_is_significant() {
        assert_eq!(
            rewrite("1 cup firmly packed brown sugar"),
            "1 cup firmly brown sugar"
        );
        assert_eq!(rewrite("1 cup packed brown sugar"), "1 cup brown sugar");
        assert_eq!(
            rewrite("1 cup packed light brown sugar"),
            "1 cup light brown sugar"
        );

        let reversed: Vec<Rewrite> = REWRITES.iter().rev().copied().collect();
        assert_eq!(
            apply_all(&reversed, "1 cup firmly packed brown sugar".to_string()),
            "1 cup brown sugar"
        );
    }

    #[test]
    fn test_untouched_line_is_returned_as_is() {
        assert_eq!(rewrite("3 carrots, diced"), "3 carrots, diced");
    }
}
