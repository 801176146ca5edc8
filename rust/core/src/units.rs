// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit extraction for PCF files
//!
//! Handles the `UNITS-BORE` and `UNITS-CO-ORDS` header directives and maps
//! their unit names to multipliers that convert into meters.

/// Resolved bore and coordinate units for one parse.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Units {
    /// Upper-cased unit name following `UNITS-BORE` (empty if absent)
    pub bore_unit: String,
    /// Upper-cased unit name following `UNITS-CO-ORDS` (empty if absent)
    pub coord_unit: String,
    /// Multiplier from nominal bore values to meters
    pub bore_scale: f64,
    /// Multiplier from raw coordinates to meters
    pub coord_scale: f64,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            bore_unit: String::new(),
            coord_unit: String::new(),
            bore_scale: 1.0,
            coord_scale: 1.0,
        }
    }
}

/// Unit name multipliers
/// Maps PCF unit names to their length in meters
#[inline]
pub fn unit_scale(unit: &str) -> f64 {
    match unit {
        "MM" | "MILLIMETER" | "MILLIMETRE" => 1e-3,
        "CM" => 1e-2,
        "M" | "METER" | "METRE" => 1.0,
        "IN" | "INCH" => 0.0254,
        "INCH-SIXTEENTH" => 0.0254 / 16.0, // bore given in 1/16"
        "FT" | "FEET" => 0.3048,
        _ => 1.0, // Unknown or missing = identity
    }
}

/// Scan header lines for unit directives
///
/// Lines are matched case-insensitively. A missing directive leaves the
/// unit name empty and the scale at 1.
pub fn resolve_units<'a, I>(lines: I) -> Units
where
    I: IntoIterator<Item = &'a str>,
{
    let mut bore_unit = String::new();
    let mut coord_unit = String::new();

    for raw in lines {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let Some(key) = tokens.next() else { continue };
        let value = tokens.next().map(str::to_ascii_uppercase).unwrap_or_default();

        if key.eq_ignore_ascii_case("UNITS-BORE") {
            bore_unit = value;
        } else if key.eq_ignore_ascii_case("UNITS-CO-ORDS") {
            coord_unit = value;
        }
    }

    let units = Units {
        bore_scale: unit_scale(&bore_unit),
        coord_scale: unit_scale(&coord_unit),
        bore_unit,
        coord_unit,
    };
    tracing::debug!(
        bore = %units.bore_unit,
        coords = %units.coord_unit,
        bore_scale = units.bore_scale,
        coord_scale = units.coord_scale,
        "Resolved units"
    );
    units
}
