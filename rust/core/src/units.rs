// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit conversion for BCF viewpoints
//!
//! BCF viewpoint coordinates are always authored in meters. The host
//! document may work in any length unit, so every location is multiplied
//! by the factor returned from [`scale_for`] before it reaches the host.

/// Length unit of the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostUnit {
    Millimeters,
    Centimeters,
    Decimeters,
    #[default]
    Meters,
    Miles,
    Feet,
    Inches,
    /// Any unit without a known conversion; treated as meters
    Other,
}

impl HostUnit {
    /// Parse a unit name as typed on a command line
    ///
    /// Matching is case-insensitive and accepts the usual abbreviations.
    /// Unknown names map to [`HostUnit::Other`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                HostUnit::Millimeters
            }
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                HostUnit::Centimeters
            }
            "dm" | "decimeter" | "decimeters" | "decimetre" | "decimetres" => HostUnit::Decimeters,
            "m" | "meter" | "meters" | "metre" | "metres" => HostUnit::Meters,
            "mi" | "mile" | "miles" => HostUnit::Miles,
            "ft" | "foot" | "feet" => HostUnit::Feet,
            "in" | "inch" | "inches" => HostUnit::Inches,
            _ => HostUnit::Other,
        }
    }
}

/// Scale factor converting meters into the given host unit
#[inline]
pub fn scale_for(unit: HostUnit) -> f64 {
    match unit {
        // Metric
        HostUnit::Millimeters => 1000.0,
        HostUnit::Centimeters => 100.0,
        HostUnit::Decimeters => 10.0,
        HostUnit::Meters => 1.0,

        // Imperial
        HostUnit::Miles => 0.000621371,
        HostUnit::Feet => 3.28084,
        HostUnit::Inches => 39.3701,

        HostUnit::Other => 1.0,
    }
}
