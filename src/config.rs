// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "report.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub line_file: String,
    pub income_file: String,
    pub yearly_file: String,
    pub region_2020_file: String,
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub attribution: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("output"),
            line_file: "LinePlot.csv".to_string(),
            income_file: "Piechart.csv".to_string(),
            yearly_file: "VBarGraph.csv".to_string(),
            region_2020_file: "HBarGraph.csv".to_string(),
            // 20x24 inch figure at 100 dpi
            width: 2000,
            height: 2400,
            font_family: "sans-serif".to_string(),
            attribution: "Student Name: Nethravathi Shivachar Gurumallesh   ID: 22089836"
                .to_string(),
        }
    }
}

impl ReportConfig {
    pub fn line_path(&self) -> PathBuf {
        self.data_dir.join(&self.line_file)
    }

    pub fn income_path(&self) -> PathBuf {
        self.data_dir.join(&self.income_file)
    }

    pub fn yearly_path(&self) -> PathBuf {
        self.data_dir.join(&self.yearly_file)
    }

    pub fn region_2020_path(&self) -> PathBuf {
        self.data_dir.join(&self.region_2020_file)
    }
}

/// Reads the config file, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<ReportConfig> {
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(ReportConfig::default());
    }
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ReportConfig = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

pub fn save_config(config: &ReportConfig, path: &Path) -> Result<()> {
    let config_str = toml::to_string_pretty(config)?;
    fs::write(path, config_str)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = load_config(&dir.path().join("report.toml"))?;
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.line_path(), PathBuf::from("./LinePlot.csv"));
        Ok(())
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("report.toml");
        fs::write(&path, "data_dir = \"data\"\nwidth = 1000\n")?;

        let config = load_config(&path)?;
        assert_eq!(config.width, 1000);
        assert_eq!(config.height, 2400);
        assert_eq!(config.income_path(), PathBuf::from("data/Piechart.csv"));
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("report.toml");
        let config = ReportConfig {
            font_family: "serif".to_string(),
            ..ReportConfig::default()
        };
        save_config(&config, &path)?;
        assert_eq!(load_config(&path)?, config);
        Ok(())
    }
}
