#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use config::{CliArgs, CliConfig};
use distid::Generator;
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry()?;
    tracing::info!(
        node_id = config.node_id,
        epoch_ms = config.epoch.as_millis() as u64,
        counter_bits = config.counter_bits,
        format = %config.format,
        count = config.count,
        "starting distid"
    );

    let generator = Generator::new(config.generator_config())
        .with_context(|| format!("failed to start generator for node {}", config.node_id))?;

    let mut out = io::stdout().lock();
    for _ in 0..config.count {
        let id = generator.generate(config.format)?;
        writeln!(out, "{id}")?;
    }
    out.flush()?;

    Ok(())
}
