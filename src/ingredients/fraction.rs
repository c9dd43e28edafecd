//! Quantity token decoding.
//!
//! A quantity token is one or two parts separated by a space (or a thin
//! space). Each part is a vulgar fraction glyph, an ASCII ratio such as
//! `3/4`, or a plain decimal number. The parts are summed.

use crate::error::NormalizeError;

/// U+2009, used by some recipe sites between the whole and fractional part.
pub const THIN_SPACE: char = '\u{2009}';

/// Unicode vulgar fraction glyphs accepted in quantity tokens.
///
/// Values are fixed 4-decimal constants rather than computed ratios, so
/// `⅓` decodes to exactly `0.3333`. Aggregated data depends on these exact
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VulgarFraction {
    OneSeventh,
    OneEighth,
    OneNinth,
    OneSixth,
    OneFifth,
    OneQuarter,
    OneThird,
    ThreeEighths,
    TwoFifths,
    OneHalf,
    ThreeFifths,
    FiveEighths,
    TwoThirds,
    ThreeQuarters,
    FourFifths,
    FiveSixths,
    SevenEighths,
}

impl VulgarFraction {
    pub const ALL: [VulgarFraction; 17] = [
        VulgarFraction::OneSeventh,
        VulgarFraction::OneEighth,
        VulgarFraction::OneNinth,
        VulgarFraction::OneSixth,
        VulgarFraction::OneFifth,
        VulgarFraction::OneQuarter,
        VulgarFraction::OneThird,
        VulgarFraction::ThreeEighths,
        VulgarFraction::TwoFifths,
        VulgarFraction::OneHalf,
        VulgarFraction::ThreeFifths,
        VulgarFraction::FiveEighths,
        VulgarFraction::TwoThirds,
        VulgarFraction::ThreeQuarters,
        VulgarFraction::FourFifths,
        VulgarFraction::FiveSixths,
        VulgarFraction::SevenEighths,
    ];

    pub const fn glyph(self) -> char {
        match self {
            VulgarFraction::OneSeventh => '⅐',
            VulgarFraction::OneEighth => '⅛',
            VulgarFraction::OneNinth => '⅑',
            VulgarFraction::OneSixth => '⅙',
            VulgarFraction::OneFifth => '⅕',
            VulgarFraction::OneQuarter => '¼',
            VulgarFraction::OneThird => '⅓',
            VulgarFraction::ThreeEighths => '⅜',
            VulgarFraction::TwoFifths => '⅖',
            VulgarFraction::OneHalf => '½',
            VulgarFraction::ThreeFifths => '⅗',
            VulgarFraction::FiveEighths => '⅝',
            VulgarFraction::TwoThirds => '⅔',
            VulgarFraction::ThreeQuarters => '¾',
            VulgarFraction::FourFifths => '⅘',
            VulgarFraction::FiveSixths => '⅚',
            VulgarFraction::SevenEighths => '⅞',
        }
    }

    pub const fn value(self) -> f64 {
        match self {
            VulgarFraction::OneSeventh => 0.1429,
            VulgarFraction::OneEighth => 0.125,
            VulgarFraction::OneNinth => 0.1111,
            VulgarFraction::OneSixth => 0.1667,
            VulgarFraction::OneFifth => 0.2,
            VulgarFraction::OneQuarter => 0.25,
            VulgarFraction::OneThird => 0.3333,
            VulgarFraction::ThreeEighths => 0.375,
            VulgarFraction::TwoFifths => 0.4,
            VulgarFraction::OneHalf => 0.5,
            VulgarFraction::ThreeFifths => 0.6,
            VulgarFraction::FiveEighths => 0.625,
            VulgarFraction::TwoThirds => 0.6667,
            VulgarFraction::ThreeQuarters => 0.75,
            VulgarFraction::FourFifths => 0.8,
            VulgarFraction::FiveSixths => 0.8333,
            VulgarFraction::SevenEighths => 0.875,
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.into_iter().find(|fraction| fraction.glyph() == glyph)
    }

    /// ASCII spellings that share a glyph's rounded constant.
    fn from_ascii(part: &str) -> Option<Self> {
        match part {
            "1/4" => Some(VulgarFraction::OneQuarter),
            "1/3" => Some(VulgarFraction::OneThird),
            "1/2" => Some(VulgarFraction::OneHalf),
            _ => None,
        }
    }

    /// All glyphs as one string, for building character classes.
    pub fn glyphs() -> String {
        Self::ALL.iter().map(|fraction| fraction.glyph()).collect()
    }
}

/// Decode a quantity token such as `"1 1/2"`, `"¾"` or `"2"` into a decimal value.
pub fn decode(token: &str) -> Result<f64, NormalizeError> {
    let normalized = token.replace(THIN_SPACE, " ");
    let parts: Vec<&str> = normalized.split(' ').collect();

    if parts.len() > 2 {
        return Err(NormalizeError::Format(format!(
            "found fraction with >2 components: {token:?}"
        )));
    }

    let mut total = 0.0;
    for part in parts {
        total += decode_part(part, token)?;
    }
    Ok(total)
}

fn decode_part(part: &str, token: &str) -> Result<f64, NormalizeError> {
    let mut chars = part.chars();
    if let (Some(glyph), None) = (chars.next(), chars.next()) {
        if let Some(fraction) = VulgarFraction::from_glyph(glyph) {
            return Ok(fraction.value());
        }
    }

    if let Some(fraction) = VulgarFraction::from_ascii(part) {
        return Ok(fraction.value());
    }

    if let Some((numerator, denominator)) = part.split_once('/') {
        let numerator = parse_number(numerator, token)?;
        let denominator = parse_number(denominator, token)?;
        if denominator == 0.0 {
            return Err(NormalizeError::Format(format!(
                "zero denominator in quantity {token:?}"
            )));
        }
        return Ok(numerator / denominator);
    }

    parse_number(part, token)
}

fn parse_number(text: &str, token: &str) -> Result<f64, NormalizeError> {
    let invalid = || NormalizeError::Format(format!("invalid quantity {token:?}"));

    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid());
    }
    text.parse::<f64>().map_err(|_| invalid())
}
