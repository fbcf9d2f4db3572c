//! The physical quantities the converter knows about

use crate::tables::{self, DimensionTable};
use crate::ConversionError;
use chronos_core::FormatPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A physical quantity. Units are only comparable within one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Length,
    Weight,
    Temperature,
    Pressure,
    Energy,
    Area,
    Volume,
    Speed,
    Force,
    Time,
}

impl Dimension {
    pub const ALL: [Dimension; 10] = [
        Dimension::Length,
        Dimension::Weight,
        Dimension::Temperature,
        Dimension::Pressure,
        Dimension::Energy,
        Dimension::Area,
        Dimension::Volume,
        Dimension::Speed,
        Dimension::Force,
        Dimension::Time,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Length => "length",
            Dimension::Weight => "weight",
            Dimension::Temperature => "temperature",
            Dimension::Pressure => "pressure",
            Dimension::Energy => "energy",
            Dimension::Area => "area",
            Dimension::Volume => "volume",
            Dimension::Speed => "speed",
            Dimension::Force => "force",
            Dimension::Time => "time",
        }
    }

    /// The immutable unit table for this dimension
    pub fn table(&self) -> &'static DimensionTable {
        match self {
            Dimension::Length => &tables::LENGTH,
            Dimension::Weight => &tables::WEIGHT,
            Dimension::Temperature => &tables::TEMPERATURE,
            Dimension::Pressure => &tables::PRESSURE,
            Dimension::Energy => &tables::ENERGY,
            Dimension::Area => &tables::AREA,
            Dimension::Volume => &tables::VOLUME,
            Dimension::Speed => &tables::SPEED,
            Dimension::Force => &tables::FORCE,
            Dimension::Time => &tables::TIME,
        }
    }

    pub fn policy(&self) -> FormatPolicy {
        self.table().policy
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dimension {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let wanted = match wanted.as_str() {
            "mass" => "weight",
            "velocity" => "speed",
            "temp" => "temperature",
            other => other,
        };
        Dimension::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| ConversionError::UnknownDimension(s.to_string()))
    }
}
