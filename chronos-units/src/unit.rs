//! Unit definitions and their conversion rules

use serde::Serialize;

/// How a unit maps onto its dimension's base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Rule {
    /// `base = value * factor`
    Factor(f64),

    /// `base = value / divisor`, for units smaller than the base that the
    /// tables express as a division
    Divisor(f64),

    /// `base = (value - origin) * num / den + offset`
    Affine {
        origin: f64,
        num: f64,
        den: f64,
        offset: f64,
    },
}

impl Rule {
    /// Identity rule of a base unit
    pub const BASE: Rule = Rule::Factor(1.0);

    pub fn to_base(&self, value: f64) -> f64 {
        match *self {
            Rule::Factor(factor) => value * factor,
            Rule::Divisor(divisor) => value / divisor,
            Rule::Affine { origin, num, den, offset } => (value - origin) * num / den + offset,
        }
    }

    pub fn from_base(&self, base: f64) -> f64 {
        match *self {
            Rule::Factor(factor) => base / factor,
            Rule::Divisor(divisor) => base * divisor,
            Rule::Affine { origin, num, den, offset } => (base - offset) * den / num + origin,
        }
    }

    pub fn is_affine(&self) -> bool {
        matches!(self, Rule::Affine { .. })
    }
}

/// A unit within one dimension
#[derive(Debug, Clone, Serialize)]
pub struct UnitDef {
    /// Stable identifier (e.g. "nautical_mile")
    pub id: &'static str,
    /// Short symbol (e.g. "nmi")
    pub symbol: &'static str,
    /// Display name
    pub name: &'static str,
    /// Extra spellings accepted when resolving text
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    pub rule: Rule,
}

impl UnitDef {
    pub const fn new(id: &'static str, symbol: &'static str, name: &'static str, rule: Rule) -> Self {
        Self { id, symbol, name, aliases: &[], rule }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Case-insensitive match on id, symbol, name or alias
    pub fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        self.id.eq_ignore_ascii_case(text)
            || self.symbol.eq_ignore_ascii_case(text)
            || self.name.eq_ignore_ascii_case(text)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(text))
    }

    pub fn to_base(&self, value: f64) -> f64 {
        self.rule.to_base(value)
    }

    pub fn from_base(&self, base: f64) -> f64 {
        self.rule.from_base(base)
    }
}

impl std::fmt::Display for UnitDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}
