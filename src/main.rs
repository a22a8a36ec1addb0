// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

mod config;
mod data;
mod labels;
mod layout;
mod notes;
mod panels;
mod render;
mod report;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Global cereal production infographic", long_about = None)]
struct Cli {
    /// Directory holding LinePlot.csv, Piechart.csv, VBarGraph.csv and HBarGraph.csv
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output image (.png or .svg); defaults to a timestamped PNG in the output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Optional TOML file overriding file names, canvas size, font and attribution
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();

    if cli.init_config {
        config::save_config(&config::ReportConfig::default(), &cli.config)?;
        println!("✅ Default configuration written to {}", cli.config.display());
        return Ok(());
    }

    let mut config = config::load_config(&cli.config)?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    report::generate_report(&config, cli.output.as_deref())?;
    Ok(())
}
