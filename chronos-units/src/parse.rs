//! Unit resolution from free text - "ft", "Feet", "km->mi"

use crate::unit::UnitDef;
use crate::{ConversionError, Dimension};

/// Resolve a unit within one dimension by id, symbol, name or alias.
///
/// Ids win over other spellings so that a symbol shared with another unit's
/// alias never shadows it.
pub fn resolve_unit(dimension: Dimension, text: &str) -> Result<&'static UnitDef, ConversionError> {
    let units = dimension.table().units;
    let wanted = text.trim();

    units
        .iter()
        .find(|u| u.id.eq_ignore_ascii_case(wanted))
        .or_else(|| units.iter().find(|u| u.matches(wanted)))
        .ok_or_else(|| ConversionError::UnknownUnit {
            unit: wanted.to_string(),
            dimension,
        })
}

/// Dimensions that know a unit spelled `text`
pub fn dimensions_of(text: &str) -> Vec<Dimension> {
    Dimension::ALL
        .into_iter()
        .filter(|dim| resolve_unit(*dim, text).is_ok())
        .collect()
}

/// Resolve a unit pair, inferring the one dimension both belong to.
pub fn resolve_pair(from: &str, to: &str) -> Result<(Dimension, &'static UnitDef, &'static UnitDef), ConversionError> {
    for dim in Dimension::ALL {
        if let (Ok(f), Ok(t)) = (resolve_unit(dim, from), resolve_unit(dim, to)) {
            return Ok((dim, f, t));
        }
    }

    if dimensions_of(from).is_empty() {
        return Err(ConversionError::UnrecognizedUnit(from.trim().to_string()));
    }
    if dimensions_of(to).is_empty() {
        return Err(ConversionError::UnrecognizedUnit(to.trim().to_string()));
    }
    Err(ConversionError::IncompatibleUnits {
        from: from.trim().to_string(),
        to: to.trim().to_string(),
    })
}

/// Parse a conversion specification like "kg->lb" or "C→F"
pub fn parse_conversion(s: &str) -> Result<(Dimension, &'static UnitDef, &'static UnitDef), ConversionError> {
    let separator = ["->", "→", " to ", " in "]
        .into_iter()
        .find(|sep| s.contains(sep))
        .ok_or_else(|| ConversionError::InvalidFormat(s.to_string()))?;

    let parts: Vec<&str> = s.split(separator).collect();
    match parts.as_slice() {
        [from, to] if !from.trim().is_empty() && !to.trim().is_empty() => resolve_pair(from, to),
        _ => Err(ConversionError::InvalidFormat(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_any_spelling() {
        assert_eq!(resolve_unit(Dimension::Length, "ft").unwrap().id, "foot");
        assert_eq!(resolve_unit(Dimension::Length, "Feet").unwrap().id, "foot");
        assert_eq!(resolve_unit(Dimension::Length, "milimeter").unwrap().id, "millimeter");
        assert_eq!(resolve_unit(Dimension::Pressure, "mmHg").unwrap().id, "mmhg");
    }

    #[test]
    fn test_resolve_is_scoped_to_dimension() {
        assert_eq!(resolve_unit(Dimension::Temperature, "c").unwrap().id, "celsius");
        assert_eq!(resolve_unit(Dimension::Speed, "c").unwrap().id, "light_speed");
        assert!(resolve_unit(Dimension::Weight, "meter").is_err());
    }

    #[test]
    fn test_parse_conversion() {
        let (dim, from, to) = parse_conversion("km->mi").unwrap();
        assert_eq!(dim, Dimension::Length);
        assert_eq!(from.id, "kilometer");
        assert_eq!(to.id, "mile");
    }

    #[test]
    fn test_parse_conversion_arrow() {
        let (dim, from, to) = parse_conversion("C→F").unwrap();
        assert_eq!(dim, Dimension::Temperature);
        assert_eq!(from.id, "celsius");
        assert_eq!(to.id, "fahrenheit");
    }

    #[test]
    fn test_parse_conversion_words() {
        let (dim, _, to) = parse_conversion("liter to gallon").unwrap();
        assert_eq!(dim, Dimension::Volume);
        assert_eq!(to.id, "gallon");
    }

    #[test]
    fn test_shared_spelling_picks_common_dimension() {
        // "c" is both celsius and light speed; "mph" settles it
        let (dim, from, _) = parse_conversion("c->mph").unwrap();
        assert_eq!(dim, Dimension::Speed);
        assert_eq!(from.id, "light_speed");
    }

    #[test]
    fn test_incompatible_and_unknown() {
        assert!(matches!(parse_conversion("m->kg"), Err(ConversionError::IncompatibleUnits { .. })));
        assert!(matches!(parse_conversion("m->parsec"), Err(ConversionError::UnrecognizedUnit(_))));
        assert!(matches!(parse_conversion("meter"), Err(ConversionError::InvalidFormat(_))));
        assert!(matches!(parse_conversion("->ft"), Err(ConversionError::InvalidFormat(_))));
    }

    #[test]
    fn test_dimensions_of() {
        assert_eq!(dimensions_of("second"), vec![Dimension::Time]);
        assert!(dimensions_of("c").contains(&Dimension::Temperature));
    }
}
