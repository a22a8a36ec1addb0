// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::config::ReportConfig;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A CSV file held as a header row plus raw string cells, column order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header row of {}", name))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result.with_context(|| format!("Failed to read row {} of {}", i + 1, name))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn text(&self, row: usize, col: usize) -> Result<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .with_context(|| format!("{}: no cell at row {}, column {}", self.name, row + 1, col))
    }

    /// Parses a numeric cell. Empty cells read as NaN, the way a missing
    /// measurement shows up in the source exports.
    pub fn number(&self, row: usize, col: usize) -> Result<f64> {
        let cell = self.text(row, col)?;
        if cell.is_empty() {
            return Ok(f64::NAN);
        }
        cell.parse::<f64>().with_context(|| {
            format!(
                "{}: expected a number at row {}, column '{}', found '{}'",
                self.name,
                row + 1,
                self.headers.get(col).map(String::as_str).unwrap_or("?"),
                cell
            )
        })
    }

    /// All numbers of a row from `first_col` to the last header.
    pub fn numbers_from(&self, row: usize, first_col: usize) -> Result<Vec<f64>> {
        (first_col..self.headers.len())
            .map(|col| self.number(row, col))
            .collect()
    }
}

/// Read a CSV file into a table
pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Table::from_reader(&name, file)
}

/// The four inputs of the report.
#[derive(Debug, Clone)]
pub struct Datasets {
    /// Regions by year, wide format; years start at column 2.
    pub line: Table,
    /// `Income Group` plus the percentage share in column 1.
    pub income: Table,
    /// `Region` plus one column per year starting at column 1.
    pub yearly: Table,
    /// Region name in column 0 and the 2020 production in column 2.
    pub region_2020: Table,
}

pub fn load_datasets(config: &ReportConfig) -> Result<Datasets> {
    let datasets = Datasets {
        line: read_table(&config.line_path())?,
        income: read_table(&config.income_path())?,
        yearly: read_table(&config.yearly_path())?,
        region_2020: read_table(&config.region_2020_path())?,
    };

    for table in [
        &datasets.line,
        &datasets.income,
        &datasets.yearly,
        &datasets.region_2020,
    ] {
        tracing::info!(
            "loaded {} ({} rows, {} columns)",
            table.name(),
            table.row_count(),
            table.headers().len()
        );
    }

    Ok(datasets)
}
