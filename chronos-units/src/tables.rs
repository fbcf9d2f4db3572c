//! Unit tables, one immutable configuration per dimension
//!
//! Factors are the ones the converter has always displayed; they are not
//! the exact SI definitions (a mile is 1609.34 m here) and must stay that
//! way so results do not drift.

use crate::unit::{Rule, UnitDef};
use crate::Dimension;
use chronos_core::FormatPolicy;
use serde::Serialize;

/// Everything the engine needs to convert within one dimension
#[derive(Debug, Serialize)]
pub struct DimensionTable {
    pub dimension: Dimension,
    /// Id of the unit every conversion routes through
    pub base: &'static str,
    pub policy: FormatPolicy,
    /// Unit pair preselected for a fresh conversion
    pub default_from: &'static str,
    pub default_to: &'static str,
    pub units: &'static [UnitDef],
}

impl DimensionTable {
    pub fn unit(&self, id: &str) -> Option<&'static UnitDef> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn base_unit(&self) -> Option<&'static UnitDef> {
        self.unit(self.base)
    }
}

// ============ length ============

static LENGTH_UNITS: [UnitDef; 14] = [
    UnitDef::new("millimeter", "mm", "Millimeter", Rule::Factor(0.001)).with_aliases(&["milimeter", "millimeters", "millimetre"]),
    UnitDef::new("centimeter", "cm", "Centimeter", Rule::Factor(0.01)).with_aliases(&["centimeters", "centimetre"]),
    UnitDef::new("meter", "m", "Meter", Rule::BASE).with_aliases(&["meters", "metre", "metres"]),
    UnitDef::new("kilometer", "km", "Kilometer", Rule::Factor(1000.0)).with_aliases(&["kilometers", "kilometre"]),
    UnitDef::new("inch", "in", "Inch", Rule::Factor(0.0254)).with_aliases(&["inches"]),
    UnitDef::new("foot", "ft", "Foot", Rule::Factor(0.3048)).with_aliases(&["feet"]),
    UnitDef::new("yard", "yd", "Yard", Rule::Factor(0.9144)).with_aliases(&["yards"]),
    UnitDef::new("mile", "mi", "Mile", Rule::Factor(1609.34)).with_aliases(&["miles"]),
    UnitDef::new("ri", "ri", "Ri (Japan)", Rule::Factor(3930.0)),
    UnitDef::new("chi", "chi", "Chi (China)", Rule::Factor(0.3333)),
    UnitDef::new("cubit", "cubit", "Cubit", Rule::Factor(0.45)).with_aliases(&["cubits"]),
    UnitDef::new("toise", "toise", "Toise (old France)", Rule::Factor(1.949)),
    UnitDef::new("nautical_mile", "nmi", "Nautical mile", Rule::Factor(1852.0)).with_aliases(&["nauticalmile"]),
    UnitDef::new("fathom", "ftm", "Fathom", Rule::Factor(1.8288)).with_aliases(&["fathoms"]),
];

pub static LENGTH: DimensionTable = DimensionTable {
    dimension: Dimension::Length,
    base: "meter",
    policy: FormatPolicy::Adaptive,
    default_from: "meter",
    default_to: "foot",
    units: &LENGTH_UNITS,
};

// ============ pressure ============

static PRESSURE_UNITS: [UnitDef; 10] = [
    UnitDef::new("pa", "Pa", "Pascal", Rule::BASE).with_aliases(&["pascal", "pascals"]),
    UnitDef::new("hpa", "hPa", "Hectopascal", Rule::Factor(100.0)),
    UnitDef::new("kpa", "kPa", "Kilopascal", Rule::Factor(1000.0)),
    UnitDef::new("mpa", "MPa", "Megapascal", Rule::Factor(1_000_000.0)),
    UnitDef::new("psi", "psi", "Pound per square inch", Rule::Factor(6895.0)),
    UnitDef::new("bar", "bar", "Bar", Rule::Factor(100_000.0)),
    UnitDef::new("atm", "atm", "Atmosphere", Rule::Factor(101_325.0)),
    UnitDef::new("torr", "Torr", "Torr", Rule::Factor(133.322)),
    UnitDef::new("mmhg", "mmHg", "Millimeter of mercury", Rule::Factor(133.322)),
    UnitDef::new("cmh2o", "cmH2O", "Centimeter of water", Rule::Factor(98.0665)).with_aliases(&["cmh₂o"]),
];

pub static PRESSURE: DimensionTable = DimensionTable {
    dimension: Dimension::Pressure,
    base: "pa",
    policy: FormatPolicy::Adaptive,
    default_from: "pa",
    default_to: "bar",
    units: &PRESSURE_UNITS,
};

// ============ weight ============

static WEIGHT_UNITS: [UnitDef; 9] = [
    UnitDef::new("gram", "g", "Gram", Rule::Divisor(1000.0)).with_aliases(&["grams"]),
    UnitDef::new("kilogram", "kg", "Kilogram", Rule::BASE).with_aliases(&["kilograms", "kilo"]),
    UnitDef::new("tonne", "t", "Tonne", Rule::Factor(1000.0)).with_aliases(&["tonnes", "metric_ton"]),
    UnitDef::new("ounce", "oz", "Ounce", Rule::Factor(0.02835)).with_aliases(&["ounces"]),
    UnitDef::new("pound", "lb", "Pound", Rule::Factor(0.453592)).with_aliases(&["pounds", "lbs"]),
    UnitDef::new("short_ton", "ton", "Short ton", Rule::Factor(907.184)),
    UnitDef::new("long_ton", "lton", "Long ton", Rule::Factor(1016.05)),
    UnitDef::new("stone", "st", "Stone", Rule::Factor(6.35)),
    UnitDef::new("carat", "ct", "Carat", Rule::Factor(0.0002)).with_aliases(&["carats"]),
];

pub static WEIGHT: DimensionTable = DimensionTable {
    dimension: Dimension::Weight,
    base: "kilogram",
    policy: FormatPolicy::fixed(4),
    default_from: "kilogram",
    default_to: "pound",
    units: &WEIGHT_UNITS,
};

// ============ temperature ============

static TEMPERATURE_UNITS: [UnitDef; 3] = [
    UnitDef::new("celsius", "°C", "Celsius", Rule::Affine { origin: 0.0, num: 1.0, den: 1.0, offset: 273.15 })
        .with_aliases(&["c", "degc"]),
    UnitDef::new("fahrenheit", "°F", "Fahrenheit", Rule::Affine { origin: 32.0, num: 5.0, den: 9.0, offset: 273.15 })
        .with_aliases(&["f", "degf"]),
    UnitDef::new("kelvin", "K", "Kelvin", Rule::BASE),
];

pub static TEMPERATURE: DimensionTable = DimensionTable {
    dimension: Dimension::Temperature,
    base: "kelvin",
    policy: FormatPolicy::fixed(2),
    default_from: "celsius",
    default_to: "fahrenheit",
    units: &TEMPERATURE_UNITS,
};

// ============ energy ============

static ENERGY_UNITS: [UnitDef; 12] = [
    UnitDef::new("joule", "J", "Joule", Rule::BASE).with_aliases(&["joules"]),
    UnitDef::new("kilojoule", "kJ", "Kilojoule", Rule::Factor(1000.0)),
    UnitDef::new("megajoule", "MJ", "Megajoule", Rule::Factor(1_000_000.0)),
    UnitDef::new("watt_hour", "Wh", "Watt-hour", Rule::Factor(3600.0)),
    UnitDef::new("kilowatt_hour", "kWh", "Kilowatt-hour", Rule::Factor(3_600_000.0)),
    UnitDef::new("megawatt_hour", "MWh", "Megawatt-hour", Rule::Factor(3_600_000_000.0)),
    UnitDef::new("calorie", "cal", "Calorie", Rule::Factor(4.184)).with_aliases(&["calories"]),
    UnitDef::new("kilocalorie", "kcal", "Kilocalorie", Rule::Factor(4184.0)),
    UnitDef::new("btu", "BTU", "British thermal unit", Rule::Factor(1055.0)),
    UnitDef::new("electronvolt", "eV", "Electronvolt", Rule::Factor(1.602e-19)),
    UnitDef::new("erg", "erg", "Erg", Rule::Factor(1e-7)),
    UnitDef::new("ton_tnt", "tTNT", "Ton of TNT", Rule::Factor(4.184e9)),
];

pub static ENERGY: DimensionTable = DimensionTable {
    dimension: Dimension::Energy,
    base: "joule",
    policy: FormatPolicy::fixed(4),
    default_from: "joule",
    default_to: "kilowatt_hour",
    units: &ENERGY_UNITS,
};

// ============ area ============

static AREA_UNITS: [UnitDef; 6] = [
    UnitDef::new("square_millimeter", "mm²", "Square millimeter", Rule::Divisor(1_000_000.0)).with_aliases(&["mm2"]),
    UnitDef::new("square_centimeter", "cm²", "Square centimeter", Rule::Divisor(10_000.0)).with_aliases(&["cm2"]),
    UnitDef::new("square_meter", "m²", "Square meter", Rule::BASE).with_aliases(&["m2"]),
    UnitDef::new("hectare", "ha", "Hectare", Rule::Factor(10_000.0)).with_aliases(&["hectares"]),
    UnitDef::new("square_kilometer", "km²", "Square kilometer", Rule::Factor(1_000_000.0)).with_aliases(&["km2"]),
    UnitDef::new("acre", "ac", "Acre", Rule::Factor(4046.86)).with_aliases(&["acres"]),
];

pub static AREA: DimensionTable = DimensionTable {
    dimension: Dimension::Area,
    base: "square_meter",
    policy: FormatPolicy::fixed(4),
    default_from: "square_meter",
    default_to: "hectare",
    units: &AREA_UNITS,
};

// ============ volume ============

static VOLUME_UNITS: [UnitDef; 12] = [
    UnitDef::new("milliliter", "mL", "Milliliter", Rule::Divisor(1000.0)).with_aliases(&["ml"]),
    UnitDef::new("cubic_centimeter", "cm³", "Cubic centimeter", Rule::Divisor(1000.0)).with_aliases(&["cm3", "cc"]),
    UnitDef::new("liter", "L", "Liter", Rule::BASE).with_aliases(&["liters", "litre", "litres"]),
    UnitDef::new("cubic_meter", "m³", "Cubic meter", Rule::Factor(1000.0)).with_aliases(&["m3"]),
    UnitDef::new("fluid_ounce", "fl oz", "Fluid ounce (US)", Rule::Factor(0.029573)).with_aliases(&["floz"]),
    UnitDef::new("cup", "cup", "Cup (US)", Rule::Factor(0.236588)).with_aliases(&["cups"]),
    UnitDef::new("pint", "pt", "Pint (US)", Rule::Factor(0.473176)).with_aliases(&["pints"]),
    UnitDef::new("gallon", "gal", "Gallon (US)", Rule::Factor(3.785)).with_aliases(&["gallons"]),
    UnitDef::new("barrel", "bbl", "Barrel (oil)", Rule::Factor(159.0)).with_aliases(&["barrels"]),
    UnitDef::new("quart", "qt", "Quart (US)", Rule::Factor(0.946353)).with_aliases(&["quarts"]),
    UnitDef::new("deciliter", "dL", "Deciliter", Rule::Factor(0.1)),
    UnitDef::new("hectoliter", "hL", "Hectoliter", Rule::Factor(100.0)),
];

pub static VOLUME: DimensionTable = DimensionTable {
    dimension: Dimension::Volume,
    base: "liter",
    policy: FormatPolicy::fixed(4),
    default_from: "liter",
    default_to: "gallon",
    units: &VOLUME_UNITS,
};

// ============ speed ============

static SPEED_UNITS: [UnitDef; 7] = [
    UnitDef::new("meter_per_second", "m/s", "Meter per second", Rule::BASE).with_aliases(&["mps"]),
    UnitDef::new("kilometer_per_hour", "km/h", "Kilometer per hour", Rule::Divisor(3.6)).with_aliases(&["kph", "kmh"]),
    UnitDef::new("mile_per_hour", "mph", "Mile per hour", Rule::Factor(0.44704)),
    UnitDef::new("foot_per_second", "ft/s", "Foot per second", Rule::Factor(0.3048)).with_aliases(&["fps"]),
    UnitDef::new("knot", "kn", "Knot", Rule::Factor(0.514444)).with_aliases(&["knots", "kt"]),
    UnitDef::new("light_speed", "c", "Speed of light", Rule::Factor(299_792_458.0)),
    UnitDef::new("mach", "Ma", "Mach", Rule::Factor(343.0)),
];

pub static SPEED: DimensionTable = DimensionTable {
    dimension: Dimension::Speed,
    base: "meter_per_second",
    policy: FormatPolicy::fixed(4),
    default_from: "kilometer_per_hour",
    default_to: "mile_per_hour",
    units: &SPEED_UNITS,
};

// ============ force ============

static FORCE_UNITS: [UnitDef; 6] = [
    UnitDef::new("newton", "N", "Newton", Rule::BASE).with_aliases(&["newtons"]),
    UnitDef::new("pound_force", "lbf", "Pound-force", Rule::Factor(4.448)),
    UnitDef::new("ounce_force", "ozf", "Ounce-force", Rule::Factor(0.278)),
    UnitDef::new("dyne", "dyn", "Dyne", Rule::Factor(0.00001)),
    UnitDef::new("kilopond", "kp", "Kilopond", Rule::Factor(9.80665)).with_aliases(&["kgf"]),
    UnitDef::new("ton_force", "tf", "Ton-force", Rule::Factor(9806.65)),
];

pub static FORCE: DimensionTable = DimensionTable {
    dimension: Dimension::Force,
    base: "newton",
    policy: FormatPolicy::fixed(4),
    default_from: "newton",
    default_to: "pound_force",
    units: &FORCE_UNITS,
};

// ============ time ============

static TIME_UNITS: [UnitDef; 13] = [
    UnitDef::new("second", "s", "Second", Rule::BASE).with_aliases(&["seconds", "sec"]),
    UnitDef::new("minute", "min", "Minute", Rule::Factor(60.0)).with_aliases(&["minutes"]),
    UnitDef::new("hour", "h", "Hour", Rule::Factor(3600.0)).with_aliases(&["hours", "hr"]),
    UnitDef::new("day", "d", "Day", Rule::Factor(86_400.0)).with_aliases(&["days"]),
    UnitDef::new("week", "wk", "Week", Rule::Factor(604_800.0)).with_aliases(&["weeks"]),
    // 30.4167 days
    UnitDef::new("month", "mo", "Month", Rule::Factor(2_629_800.0)).with_aliases(&["months"]),
    // 365.25 days
    UnitDef::new("year", "y", "Year", Rule::Factor(31_557_600.0)).with_aliases(&["years", "yr"]),
    UnitDef::new("millisecond", "ms", "Millisecond", Rule::Divisor(1000.0)).with_aliases(&["milliseconds"]),
    UnitDef::new("microsecond", "µs", "Microsecond", Rule::Divisor(1_000_000.0)).with_aliases(&["us", "microseconds"]),
    UnitDef::new("nanosecond", "ns", "Nanosecond", Rule::Divisor(1_000_000_000.0)).with_aliases(&["nanoseconds"]),
    UnitDef::new("decade", "dec", "Decade", Rule::Factor(315_576_000.0)).with_aliases(&["decades"]),
    UnitDef::new("century", "cent", "Century", Rule::Factor(3_155_760_000.0)).with_aliases(&["centuries"]),
    UnitDef::new("millennium", "mill", "Millennium", Rule::Factor(31_557_600_000.0)).with_aliases(&["millennia"]),
];

pub static TIME: DimensionTable = DimensionTable {
    dimension: Dimension::Time,
    base: "second",
    policy: FormatPolicy::fixed(4),
    default_from: "hour",
    default_to: "day",
    units: &TIME_UNITS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_has_its_base_and_defaults() {
        for dim in Dimension::ALL {
            let table = dim.table();
            assert_eq!(table.dimension, dim);
            let base = table.base_unit().expect("base unit present");
            assert_eq!(base.rule, Rule::BASE, "{} base must be identity", dim);
            assert!(table.unit(table.default_from).is_some(), "{} default_from", dim);
            assert!(table.unit(table.default_to).is_some(), "{} default_to", dim);
        }
    }

    #[test]
    fn test_ids_are_unique_within_a_dimension() {
        for dim in Dimension::ALL {
            let units = dim.table().units;
            for (i, a) in units.iter().enumerate() {
                for b in &units[i + 1..] {
                    assert_ne!(a.id, b.id, "duplicate id in {}", dim);
                }
            }
        }
    }

    #[test]
    fn test_table_sizes() {
        let sizes: Vec<usize> = Dimension::ALL.iter().map(|d| d.table().units.len()).collect();
        assert_eq!(sizes, vec![14, 9, 3, 10, 12, 6, 12, 7, 6, 13]);
    }
}
