// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

// Backend-free models of the chart panels, built straight from the tables.

use crate::data::Table;
use crate::labels::{income_label, value_label, INCOME_GROUP_COLUMN, INCOME_SHARE_COLUMN};
use anyhow::{bail, Context, Result};
use std::ops::Range;

pub const PRODUCTION_DESC: &str = "Cereal Production (in tons)";
pub const YEARS_DESC: &str = "Years";

/// Width of one bar in the grouped year chart, in year-index units.
pub const BAR_WIDTH: f64 = 0.5;
/// Height of one horizontal bar, in row-index units.
pub const HBAR_HEIGHT: f64 = 0.8;
pub const DONUT_START_ANGLE: f64 = 90.0;
/// Hole radius as a share of the pie radius.
pub const DONUT_HOLE_RATIO: f64 = 0.4;
/// Slice labels sit this far out, as a share of the pie radius.
pub const DONUT_LABEL_DISTANCE: f64 = 1.1;

const LINE_FIRST_YEAR_COL: usize = 2;
const YEARLY_FIRST_YEAR_COL: usize = 1;
const REGION_2020_NAME_COL: usize = 0;
const REGION_2020_VALUE_COL: usize = 2;

/// x position of region `region`'s bar in year group `year`.
pub fn bar_center(year: usize, region: usize, bar_width: f64) -> f64 {
    year as f64 + region as f64 * bar_width
}

/// x position of the tick centred under year group `year` with `regions` bars.
pub fn tick_center(year: usize, regions: usize, bar_width: f64) -> f64 {
    year as f64 + bar_width * (regions as f64 / 2.0 - 0.5)
}

/// Smallest range holding every finite value, widened by `pad` of its span.
fn finite_range(values: impl Iterator<Item = f64>, include_zero: bool, pad: f64) -> Range<f64> {
    let (mut lo, mut hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    let span = if hi > lo { hi - lo } else { hi.abs().max(1.0) };
    let lo = if include_zero && lo == 0.0 { 0.0 } else { lo - span * pad };
    hi += span * pad;
    lo..hi
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct LinePanel {
    pub title: String,
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
}

impl LinePanel {
    pub fn from_table(table: &Table) -> Result<Self> {
        let x_labels: Vec<String> = table
            .headers()
            .iter()
            .skip(LINE_FIRST_YEAR_COL)
            .cloned()
            .collect();

        let mut series = Vec::with_capacity(table.row_count());
        for row in 0..table.row_count() {
            let values = table.numbers_from(row, LINE_FIRST_YEAR_COL)?;
            series.push(Series {
                name: table.text(row, 0)?.to_string(),
                points: values
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i as f64, v))
                    .collect(),
            });
        }

        Ok(Self {
            title: "Region-wise Cereal Production (1960-2020)".to_string(),
            x_labels,
            series,
        })
    }

    pub fn x_range(&self) -> Range<f64> {
        0.0..(self.x_labels.len().max(2) - 1) as f64
    }

    pub fn y_range(&self) -> Range<f64> {
        finite_range(
            self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)),
            false,
            0.05,
        )
    }
}

/// One pie slice; angles in degrees, counter-clockwise from the positive x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl Slice {
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct DonutPanel {
    pub title: String,
    pub slices: Vec<Slice>,
    pub hole_ratio: f64,
}

impl DonutPanel {
    pub fn from_table(table: &Table) -> Result<Self> {
        let group_col = table
            .column_index(INCOME_GROUP_COLUMN)
            .with_context(|| format!("{}: no '{}' column", table.name(), INCOME_GROUP_COLUMN))?;

        let mut rows = Vec::with_capacity(table.row_count());
        for row in 0..table.row_count() {
            let group = table.text(row, group_col)?;
            let value = table.number(row, INCOME_SHARE_COLUMN)?;
            if value < 0.0 {
                bail!(
                    "{}: negative share {} for '{}', wedge sizes must be non negative",
                    table.name(),
                    value,
                    group
                );
            }
            rows.push((income_label(table, group)?, value));
        }

        let total: f64 = rows.iter().map(|(_, v)| v).filter(|v| v.is_finite()).sum();
        let mut start_angle = DONUT_START_ANGLE;
        let slices = rows
            .into_iter()
            .map(|(label, value)| {
                let sweep = if total > 0.0 && value.is_finite() {
                    value / total * 360.0
                } else {
                    0.0
                };
                let slice = Slice {
                    label,
                    value,
                    start_angle,
                    sweep,
                };
                start_angle += sweep;
                slice
            })
            .collect();

        Ok(Self {
            title: "Cereal Production by Income Group in 2020".to_string(),
            slices,
            hole_ratio: DONUT_HOLE_RATIO,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub center: f64,
    pub value: f64,
}

/// All bars of one region, one per year.
#[derive(Debug, Clone)]
pub struct BarGroup {
    pub name: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone)]
pub struct GroupedBarPanel {
    pub title: String,
    pub bar_width: f64,
    pub groups: Vec<BarGroup>,
    pub ticks: Vec<(f64, String)>,
}

impl GroupedBarPanel {
    pub fn from_table(table: &Table) -> Result<Self> {
        let years: Vec<String> = table
            .headers()
            .iter()
            .skip(YEARLY_FIRST_YEAR_COL)
            .cloned()
            .collect();
        let regions = table.row_count();

        let mut groups = Vec::with_capacity(regions);
        for region in 0..regions {
            let values = table.numbers_from(region, YEARLY_FIRST_YEAR_COL)?;
            groups.push(BarGroup {
                name: table.text(region, 0)?.to_string(),
                bars: values
                    .into_iter()
                    .enumerate()
                    .map(|(year, value)| Bar {
                        center: bar_center(year, region, BAR_WIDTH),
                        value,
                    })
                    .collect(),
            });
        }

        let ticks = years
            .into_iter()
            .enumerate()
            .map(|(year, label)| (tick_center(year, regions, BAR_WIDTH), label))
            .collect();

        Ok(Self {
            title: "Worldwide Cereal Production (1960-2020)".to_string(),
            bar_width: BAR_WIDTH,
            groups,
            ticks,
        })
    }

    pub fn x_range(&self) -> Range<f64> {
        let half = self.bar_width / 2.0;
        let centers = self.groups.iter().flat_map(|g| g.bars.iter().map(|b| b.center));
        let (lo, hi) = centers.fold((0.0f64, 0.0f64), |(lo, hi), c| (lo.min(c), hi.max(c)));
        (lo - half - self.bar_width)..(hi + half + self.bar_width)
    }

    pub fn y_range(&self) -> Range<f64> {
        finite_range(
            self.groups.iter().flat_map(|g| g.bars.iter().map(|b| b.value)),
            true,
            0.05,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HBar {
    pub name: String,
    pub value: f64,
    pub y_center: f64,
    pub label: String,
}

impl HBar {
    /// Where the value label is anchored: bar end, vertical midpoint.
    pub fn label_anchor(&self) -> (f64, f64) {
        (self.value, self.y_center)
    }
}

#[derive(Debug, Clone)]
pub struct HBarPanel {
    pub title: String,
    pub bar_height: f64,
    pub bars: Vec<HBar>,
}

impl HBarPanel {
    pub fn from_table(table: &Table) -> Result<Self> {
        let mut bars = Vec::with_capacity(table.row_count());
        for row in 0..table.row_count() {
            let value = table.number(row, REGION_2020_VALUE_COL)?;
            bars.push(HBar {
                name: table.text(row, REGION_2020_NAME_COL)?.to_string(),
                value,
                y_center: row as f64,
                label: value_label(value),
            });
        }

        Ok(Self {
            title: "Region-wise Cereal Production in 2020".to_string(),
            bar_height: HBAR_HEIGHT,
            bars,
        })
    }

    /// Extra room on the right keeps the end labels inside the plot.
    pub fn x_range(&self) -> Range<f64> {
        finite_range(self.bars.iter().map(|b| b.value), true, 0.12)
    }

    pub fn y_range(&self) -> Range<f64> {
        -0.5..(self.bars.len().max(1) as f64 - 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use approx::assert_relative_eq;

    fn table(name: &str, csv: &str) -> Table {
        Table::from_reader(name, csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_bar_offsets_single_region() {
        assert_relative_eq!(bar_center(0, 0, BAR_WIDTH), 0.0);
        assert_relative_eq!(bar_center(3, 0, BAR_WIDTH), 3.0);
        // one bar per group: the tick sits right under it
        assert_relative_eq!(tick_center(0, 1, BAR_WIDTH), 0.0);
        assert_relative_eq!(tick_center(3, 1, BAR_WIDTH), 3.0);
    }

    #[test]
    fn test_bar_offsets_two_regions() {
        assert_relative_eq!(bar_center(1, 1, BAR_WIDTH), 1.5);
        assert_relative_eq!(tick_center(0, 2, BAR_WIDTH), 0.25);
        assert_relative_eq!(tick_center(2, 2, BAR_WIDTH), 2.25);
        let mid = (bar_center(2, 0, BAR_WIDTH) + bar_center(2, 1, BAR_WIDTH)) / 2.0;
        assert_relative_eq!(tick_center(2, 2, BAR_WIDTH), mid);
    }

    #[test]
    fn test_bar_offsets_three_regions() {
        assert_relative_eq!(bar_center(1, 2, BAR_WIDTH), 2.0);
        assert_relative_eq!(tick_center(1, 3, BAR_WIDTH), 1.5);
        // odd count: the tick lands on the middle bar
        assert_relative_eq!(tick_center(4, 3, BAR_WIDTH), bar_center(4, 1, BAR_WIDTH));
    }

    #[test]
    fn test_grouped_panel_from_table() -> Result<()> {
        let panel = GroupedBarPanel::from_table(&table("VBarGraph.csv", fixtures::YEARLY_CSV))?;
        assert_eq!(panel.groups.len(), 3);
        assert_eq!(panel.groups[1].name, "Asia");
        assert_eq!(panel.groups[2].bars.len(), 4);
        assert_relative_eq!(panel.groups[2].bars[1].center, 2.0);
        assert_relative_eq!(panel.groups[2].bars[1].value, 410.0);

        let labels: Vec<&str> = panel.ticks.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, vec!["1960", "1980", "2000", "2020"]);
        for (year, (x, _)) in panel.ticks.iter().enumerate() {
            assert_relative_eq!(*x, panel.groups[1].bars[year].center);
        }

        let x = panel.x_range();
        assert!(x.start < -0.25 && x.end > 4.0);
        assert_relative_eq!(panel.y_range().start, 0.0);
        assert!(panel.y_range().end > 2998.0);
        Ok(())
    }

    #[test]
    fn test_line_panel_four_regions_two_years() -> Result<()> {
        let csv = "Region,Code,1960,2020\n\
            East Asia,EAS,1.0,2.0\n\
            Europe,ECS,3.0,4.0\n\
            South Asia,SAS,5.0,6.0\n\
            Africa,SSF,7.0,8.0\n";
        let panel = LinePanel::from_table(&table("LinePlot.csv", csv))?;

        assert_eq!(panel.series.len(), 4);
        assert!(panel.series.iter().all(|s| s.points.len() == 2));
        let names: Vec<&str> = panel.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["East Asia", "Europe", "South Asia", "Africa"]);
        assert_eq!(panel.series[2].points, vec![(0.0, 5.0), (1.0, 6.0)]);
        assert_eq!(panel.x_labels, vec!["1960", "2020"]);
        assert_relative_eq!(panel.x_range().end, 1.0);
        Ok(())
    }

    #[test]
    fn test_line_panel_y_range_ignores_gaps() -> Result<()> {
        let csv = "Region,Code,1960,1990,2020\nWorld,WLD,10.0,,30.0\n";
        let panel = LinePanel::from_table(&table("LinePlot.csv", csv))?;
        let range = panel.y_range();
        assert_relative_eq!(range.start, 9.0);
        assert_relative_eq!(range.end, 31.0);
        Ok(())
    }

    #[test]
    fn test_donut_slices_follow_rows() -> Result<()> {
        let panel = DonutPanel::from_table(&table("Piechart.csv", fixtures::INCOME_CSV))?;

        assert_eq!(panel.slices.len(), 4);
        let labels: Vec<&str> = panel.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "High-Income (28.0%)",
                "Upper Middle-Income (42.0%)",
                "Lower Middle-Income (27.0%)",
                "Low-Income (3.0%)",
            ]
        );

        assert_relative_eq!(panel.slices[0].start_angle, 90.0);
        assert_relative_eq!(panel.slices[0].sweep, 28.0 / 100.0 * 360.0, epsilon = 1e-9);
        for pair in panel.slices.windows(2) {
            assert_relative_eq!(pair[1].start_angle, pair[0].start_angle + pair[0].sweep);
        }
        let total: f64 = panel.slices.iter().map(|s| s.sweep).sum();
        assert_relative_eq!(total, 360.0, epsilon = 1e-9);
        assert_relative_eq!(panel.hole_ratio, 0.4);
        Ok(())
    }

    #[test]
    fn test_donut_rejects_negative_share() {
        let csv = "Income Group,Share\nHigh-Income,60.0\nLow-Income,-10.0\n";
        let err = DonutPanel::from_table(&table("Piechart.csv", csv)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Piechart.csv"));
        assert!(msg.contains("Low-Income"));
        assert!(msg.contains("non negative"));
    }

    #[test]
    fn test_hbar_labels_two_decimals() -> Result<()> {
        let panel = HBarPanel::from_table(&table("HBarGraph.csv", fixtures::REGION_2020_CSV))?;

        let labels: Vec<&str> = panel.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["1234.50", "420.40", "180.00"]);
        assert_eq!(panel.bars[1].name, "South Asia");
        assert_eq!(panel.bars[2].label_anchor(), (180.0, 2.0));
        assert_relative_eq!(panel.y_range().start, -0.5);
        assert_relative_eq!(panel.y_range().end, 2.5);
        assert_relative_eq!(panel.x_range().start, 0.0);
        Ok(())
    }
}
