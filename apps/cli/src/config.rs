// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables, overridable by flags.

use anyhow::{bail, Context, Result};
use pcf_lite_geometry::BuildConfig;

/// What the CLI prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable counts and skip reasons
    Summary,
    /// One JSON document with every solid
    Json,
    /// The parsed model as JSON, no reconstruction
    Parse,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "summary" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            "parse" => Ok(OutputFormat::Parse),
            other => bail!("unknown output format {other:?} (expected summary, json or parse)"),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Radial segments used when tessellating.
    pub segments: usize,
    /// Distance in raw file units within which a point lies on a pipe.
    pub topology_tolerance: f64,
    /// Output format.
    pub output: OutputFormat,
    /// Include triangle and line counts per solid.
    pub tessellate: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = BuildConfig::default();
        Self {
            segments: std::env::var("PCF_SEGMENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.radial_segments),
            topology_tolerance: std::env::var("PCF_TOPOLOGY_TOLERANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.topology_tolerance),
            output: std::env::var("PCF_OUTPUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(OutputFormat::Summary),
            tessellate: false,
        }
    }

    /// Apply command-line options; returns the input path.
    pub fn apply_args(&mut self, args: &[String]) -> Result<Option<String>> {
        let mut input = None;
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    self.output = value(args, &mut i)?.parse()?;
                }
                "--segments" => {
                    self.segments = value(args, &mut i)?
                        .parse()
                        .context("invalid --segments value")?;
                }
                "--tolerance" => {
                    self.topology_tolerance = value(args, &mut i)?
                        .parse()
                        .context("invalid --tolerance value")?;
                }
                "--mesh" => self.tessellate = true,
                other if other.starts_with('-') => bail!("unknown option: {other}"),
                path => {
                    if input.replace(path.to_string()).is_some() {
                        bail!("only one input file is accepted");
                    }
                }
            }
            i += 1;
        }
        Ok(input)
    }

    pub fn build_config(&self) -> BuildConfig {
        BuildConfig::default()
            .with_radial_segments(self.segments)
            .with_topology_tolerance(self.topology_tolerance)
    }
}

fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("{} needs a value", args[*i - 1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn base() -> Config {
        Config {
            segments: 32,
            topology_tolerance: 0.01,
            output: OutputFormat::Summary,
            tessellate: false,
        }
    }

    #[test]
    fn flags_override_environment() {
        let mut config = base();
        let input = config
            .apply_args(&args(&["plant.pcf", "-o", "JSON", "--segments", "12", "--mesh"]))
            .unwrap();
        assert_eq!(input.as_deref(), Some("plant.pcf"));
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.segments, 12);
        assert!(config.tessellate);
        assert_eq!(config.build_config().radial_segments, 12);
    }

    #[test]
    fn bad_flags_are_rejected() {
        assert!(base().apply_args(&args(&["--segments"])).is_err());
        assert!(base().apply_args(&args(&["--segments", "many"])).is_err());
        assert!(base().apply_args(&args(&["--frobnicate"])).is_err());
        assert!(base().apply_args(&args(&["a.pcf", "b.pcf"])).is_err());
        assert!(base().apply_args(&args(&["-o", "xml"])).is_err());
    }
}
