// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::config::ReportConfig;
use crate::data::{load_datasets, Datasets};
use crate::notes::{TextPanel, REPORT_TITLE};
use crate::panels::{DonutPanel, GroupedBarPanel, HBarPanel, LinePanel};
use crate::render;
use anyhow::{Context, Result};
use chrono::Local;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Every panel of the figure, ready to draw.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub yearly: GroupedBarPanel,
    pub donut: DonutPanel,
    pub lines: LinePanel,
    pub region_2020: HBarPanel,
    pub observations: TextPanel,
    pub attribution: TextPanel,
}

impl Report {
    pub fn build(datasets: &Datasets, config: &ReportConfig) -> Result<Self> {
        Ok(Self {
            title: REPORT_TITLE.to_string(),
            yearly: GroupedBarPanel::from_table(&datasets.yearly)?,
            donut: DonutPanel::from_table(&datasets.income)?,
            lines: LinePanel::from_table(&datasets.line)?,
            region_2020: HBarPanel::from_table(&datasets.region_2020)?,
            observations: TextPanel::observations(),
            attribution: TextPanel::attribution(&config.attribution),
        })
    }
}

pub fn default_output_path(config: &ReportConfig) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    config
        .output_dir
        .join(format!("cereal_production_{}.png", timestamp))
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// Loads the data, draws the figure and writes it to `output` (or the
/// default timestamped path). Nothing is written when loading fails.
pub fn generate_report(config: &ReportConfig, output: Option<&Path>) -> Result<PathBuf> {
    let datasets = load_datasets(config)?;
    let report = Report::build(&datasets, config)?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(config));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let size = (config.width, config.height);
    tracing::info!("rendering {}x{} figure to {}", size.0, size.1, path.display());
    if is_svg(&path) {
        let root = SVGBackend::new(&path, size).into_drawing_area();
        render::draw_report(&root, &report, &config.font_family)?;
        root.present()?;
    } else {
        let root = BitMapBackend::new(&path, size).into_drawing_area();
        render::draw_report(&root, &report, &config.font_family)?;
        root.present()?;
    }

    println!("✅ Report generated: {}", path.display());
    Ok(path)
}
