// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: reconstruct 3D solids from a PCF piping file
//!
//! Usage:
//!   pcf-lite <file.pcf> [--output summary|json|parse] [--segments N]
//!            [--tolerance T] [--mesh]
//!
//! Defaults come from `PCF_OUTPUT`, `PCF_SEGMENTS` and
//! `PCF_TOPOLOGY_TOLERANCE`; log filtering from `RUST_LOG`.

use std::env;
use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use pcf_lite_core::{parse, ParseResult};
use pcf_lite_geometry::{BuildReport, ComponentFactory, ComponentSolid};
use rustc_hash::FxHashMap;

mod config;
mod report;

use config::{Config, OutputFormat};
use report::{Document, SolidView};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "info,pcf_lite_geometry=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let mut config = Config::from_env();
    let Some(path) = config.apply_args(&args)? else {
        print_usage();
        std::process::exit(2);
    };

    let text = fs::read_to_string(&path).with_context(|| format!("cannot read {path}"))?;
    let parsed = parse(&text);
    tracing::info!(
        file = %path,
        pipelines = parsed.pipelines.len(),
        components = parsed.component_count(),
        "Parsed PCF"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.output == OutputFormat::Parse {
        serde_json::to_writer_pretty(&mut out, &parsed)?;
        writeln!(out)?;
        return Ok(());
    }

    let build_config = config.build_config();
    let factory = ComponentFactory::with_config(&parsed, build_config.clone());
    let (solids, report) = factory.build_all_with_report()?;
    tracing::info!(
        built = report.built,
        skipped = report.skipped.len(),
        "Reconstructed solids"
    );

    match config.output {
        OutputFormat::Json => {
            let tessellate = config.tessellate.then_some(&build_config);
            let document = Document {
                pipelines: parsed.pipeline_references(),
                solids: solids
                    .iter()
                    .map(|built| SolidView::new(built, tessellate))
                    .collect(),
                skipped: report::skipped(&report),
            };
            serde_json::to_writer_pretty(&mut out, &document)?;
            writeln!(out)?;
        }
        OutputFormat::Summary => print_summary(&mut out, &parsed, &solids, &report)?,
        OutputFormat::Parse => unreachable!("handled before reconstruction"),
    }
    Ok(())
}

fn print_summary(
    out: &mut impl Write,
    parsed: &ParseResult,
    solids: &[ComponentSolid<'_>],
    report: &BuildReport<'_>,
) -> io::Result<()> {
    writeln!(
        out,
        "Units: bore {} (x{}), co-ords {} (x{})",
        or_default(&parsed.units.bore_unit),
        parsed.units.bore_scale,
        or_default(&parsed.units.coord_unit),
        parsed.units.coord_scale
    )?;
    writeln!(out, "Pipelines: {}", parsed.pipeline_references().join(", "))?;
    writeln!(out, "Materials: {}", parsed.materials.len())?;
    writeln!(
        out,
        "Components: {} built, {} skipped",
        report.built,
        report.skipped.len()
    )?;

    for component_type in parsed.component_types() {
        let (built, skipped) = report.per_type.get(component_type).copied().unwrap_or((0, 0));
        writeln!(out, "  {component_type:<20} {built:>5} built {skipped:>5} skipped")?;
    }

    let mut solids_by_name: FxHashMap<&str, usize> = FxHashMap::default();
    for built in solids {
        *solids_by_name.entry(built.solid.name).or_default() += 1;
    }
    let mut names: Vec<_> = solids_by_name.into_iter().collect();
    names.sort_unstable();
    writeln!(out, "Solids:")?;
    for (name, count) in names {
        writeln!(out, "  {name:<20} {count:>5}")?;
    }

    if !report.skipped.is_empty() {
        writeln!(out, "Skipped:")?;
        for skip in &report.skipped {
            writeln!(
                out,
                "  {} #{} {}: {}",
                skip.provenance.pipeline_reference,
                skip.provenance.id.component,
                skip.provenance.component_type,
                skip.reason
            )?;
        }
    }
    Ok(())
}

fn or_default(unit: &str) -> &str {
    if unit.is_empty() {
        "(default)"
    } else {
        unit
    }
}

fn print_usage() {
    eprintln!("Usage: pcf-lite <file.pcf> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <FORMAT>  summary (default), json, or parse");
    eprintln!("  --segments <N>         radial segments for tessellation (default 32)");
    eprintln!("  --tolerance <T>        pipe proximity tolerance in file units (default 0.01)");
    eprintln!("  --mesh                 include mesh statistics in json output");
    eprintln!();
    eprintln!("Environment: PCF_OUTPUT, PCF_SEGMENTS, PCF_TOPOLOGY_TOLERANCE, RUST_LOG");
}
