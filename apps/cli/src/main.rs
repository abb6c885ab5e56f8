// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BCF-Lite importer - apply BCF viewpoints from the command line.
//!
//! Imports every `.bcfv` viewpoint of a BCF archive into a headless
//! viewport and prints a JSON report to stdout. Logs go to stderr.
//!
//! ```bash
//! bcf-import issues.bcfzip --unit mm
//! RUST_LOG=debug bcf-import issues.bcf --keep-files
//! ```

use anyhow::Context;
use bcf_lite_core::HostUnit;
use bcf_lite_processing::{ImportConfig, ViewpointApplier};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

mod console;
mod types;

use console::ConsoleHost;
use types::ImportSummary;

/// Import BCF viewpoints (camera, clipping planes, overlay lines)
#[derive(Parser, Debug)]
#[command(name = "bcf-import")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// BCF archive to import (.bcf / .bcfzip)
    archive: PathBuf,

    /// Unit of the target document (mm, cm, dm, m, mi, ft, in)
    #[arg(short, long, default_value = "m")]
    unit: String,

    /// Leave extracted viewpoint files in the extraction directory
    #[arg(long)]
    keep_files: bool,

    /// Read viewpoints straight from the archive without extracting
    #[arg(long)]
    in_memory: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    let mut config = ImportConfig::from_env();
    config.keep_extracted |= args.keep_files;

    let unit = HostUnit::from_name(&args.unit);
    if unit == HostUnit::Other {
        tracing::warn!(unit = %args.unit, "Unknown unit, using meters");
    }

    tracing::info!(
        archive = %args.archive.display(),
        unit = ?unit,
        clip_extent = config.clip_extent,
        extract_dir = %config.extract_dir.display(),
        "Starting BCF import"
    );

    let start = Instant::now();
    let clip_extent = config.clip_extent;
    let mut host = ConsoleHost::new(unit);
    let mut applier = ViewpointApplier::new(config);

    let report = if args.in_memory {
        applier.run_in_memory(&args.archive, &mut host)
    } else {
        applier.run(&args.archive, &mut host)
    }
    .with_context(|| format!("Failed to import {}", args.archive.display()))?;

    let mut summary =
        ImportSummary::from_report(&args.archive.display().to_string(), &report, clip_extent);
    summary.overlay = host.overlay_summary();
    summary.total_time_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        named_views = host.named_view_count(),
        clipping_planes = host.clipping_plane_count(),
        saved_projections = host.saved_projections(),
        "Viewport updated"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,bcf_lite=debug".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
