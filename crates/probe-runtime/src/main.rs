//! # whoami
//!
//! Prints what this machine reveals about itself: public IP and location,
//! agent and platform details, a visit counter, latency and the local
//! addresses peer-connection candidate gathering exposes.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, `WAI_*` environment, flags)
//! 2. Initialize logging and metrics
//! 3. Wire native adapters
//! 4. Run the report once
//! 5. Print the rows to stdout (table or `--json`)

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::time::Instant;

use probe_runtime::{build_native_runtime, load_config, Args, ConsoleDisplay};
use shared_types::SubsystemId;
use wai_telemetry::{init_telemetry, log_event, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let started = Instant::now();
    let args = Args::parse();

    // Initialize logging
    let mut telemetry_config = TelemetryConfig::from_env();
    if args.verbose {
        telemetry_config = telemetry_config.verbose();
    }
    let telemetry = init_telemetry(telemetry_config).context("Failed to initialize telemetry")?;

    // Load configuration
    let mut config = load_config();
    args.apply(&mut config);

    log_event!(
        info,
        SubsystemId::Runtime,
        "whoami starting",
        version = env!("CARGO_PKG_VERSION"),
        timeout_ms = config.discovery.timeout.as_millis() as u64,
        ip_lookup = config.report.ip_lookup_url.is_some()
    );

    let runtime = build_native_runtime(&config)?.with_start(started);
    let display = ConsoleDisplay::new();
    let summary = runtime.run(&display).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if config.output.json {
        serde_json::to_writer_pretty(&mut out, &display.to_json())
            .context("Failed to write JSON report")?;
        writeln!(out)?;
    } else {
        display
            .render_table(&mut out)
            .context("Failed to write report")?;
    }
    out.flush()?;

    if config.output.metrics {
        let exposition = telemetry
            .metrics()
            .render()
            .context("Failed to render metrics")?;
        eprint!("{}", exposition);
    }

    log_event!(
        debug,
        SubsystemId::Runtime,
        "whoami finished",
        discovery = summary.discovery.label(),
        visit = summary.visit.label()
    );

    Ok(())
}
