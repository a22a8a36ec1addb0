// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

// Fixed grid placement of the report panels.

/// Relative row heights of the report grid, top to bottom.
pub const REPORT_ROW_WEIGHTS: [f64; 5] = [2.0, 2.0, 2.0, 2.0, 0.5];
pub const REPORT_COLUMNS: usize = 2;

/// Share of the canvas height reserved above the grid for the figure title.
pub const TITLE_BAND: f64 = 0.05;
/// Share of the canvas height left empty below the grid.
pub const BOTTOM_MARGIN: f64 = 0.03;

/// Pixel rectangle, upper-left inclusive, lower-right exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        (self.x1 - self.x0).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y1 - self.y0).max(0) as u32
    }
}

/// A grid cell spanning `col_start..col_end` in one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub col_start: usize,
    pub col_end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSlot {
    YearlyBars,
    IncomeDonut,
    RegionLines,
    Region2020Bars,
    Observations,
    Attribution,
}

impl PanelSlot {
    pub const ALL: [PanelSlot; 6] = [
        PanelSlot::YearlyBars,
        PanelSlot::IncomeDonut,
        PanelSlot::RegionLines,
        PanelSlot::Region2020Bars,
        PanelSlot::Observations,
        PanelSlot::Attribution,
    ];

    pub fn cell(self) -> GridCell {
        let (row, col_start, col_end) = match self {
            PanelSlot::YearlyBars => (0, 0, 2),
            PanelSlot::IncomeDonut => (1, 0, 1),
            PanelSlot::RegionLines => (1, 1, 2),
            PanelSlot::Region2020Bars => (2, 0, 2),
            PanelSlot::Observations => (3, 0, 2),
            PanelSlot::Attribution => (4, 0, 2),
        };
        GridCell {
            row,
            col_start,
            col_end,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridSpec {
    height_ratios: Vec<f64>,
    columns: usize,
}

impl GridSpec {
    pub fn new(height_ratios: &[f64], columns: usize) -> Self {
        Self {
            height_ratios: height_ratios.to_vec(),
            columns: columns.max(1),
        }
    }

    pub fn report() -> Self {
        Self::new(&REPORT_ROW_WEIGHTS, REPORT_COLUMNS)
    }

    pub fn rows(&self) -> usize {
        self.height_ratios.len()
    }

    /// Pixel rows `(top, bottom)` of every grid row inside `area`.
    pub fn row_bounds(&self, area: PixelRect) -> Vec<(i32, i32)> {
        let total: f64 = self.height_ratios.iter().sum();
        let height = f64::from(area.height());

        let mut bounds = Vec::with_capacity(self.rows());
        let mut acc = 0.0;
        for ratio in &self.height_ratios {
            let top = area.y0 + (height * acc / total).round() as i32;
            acc += ratio;
            let bottom = area.y0 + (height * acc / total).round() as i32;
            bounds.push((top, bottom));
        }
        bounds
    }

    pub fn cell_rect(&self, area: PixelRect, cell: GridCell) -> PixelRect {
        let (y0, y1) = self.row_bounds(area)[cell.row];
        let col_width = f64::from(area.width()) / self.columns as f64;
        PixelRect {
            x0: area.x0 + (col_width * cell.col_start as f64).round() as i32,
            y0,
            x1: area.x0 + (col_width * cell.col_end as f64).round() as i32,
            y1,
        }
    }
}

/// Part of the canvas the grid lays out, below the title band.
pub fn grid_area(width: u32, height: u32) -> PixelRect {
    let h = f64::from(height);
    PixelRect {
        x0: 0,
        y0: (h * TITLE_BAND).round() as i32,
        x1: width as i32,
        y1: (h * (1.0 - BOTTOM_MARGIN)).round() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_heights_follow_weights() {
        let grid = GridSpec::report();
        let area = PixelRect {
            x0: 0,
            y0: 0,
            x1: 200,
            y1: 850,
        };
        let bounds = grid.row_bounds(area);
        let heights: Vec<i32> = bounds.iter().map(|(t, b)| b - t).collect();
        assert_eq!(heights, vec![200, 200, 200, 200, 50]);
        assert_eq!(bounds.first().unwrap().0, 0);
        assert_eq!(bounds.last().unwrap().1, 850);
    }

    #[test]
    fn test_slots_cover_every_row_once() {
        let mut per_row = [0usize; 5];
        for slot in PanelSlot::ALL {
            let cell = slot.cell();
            per_row[cell.row] += cell.col_end - cell.col_start;
        }
        assert_eq!(per_row, [2, 2, 2, 2, 2]);
    }

    #[test]
    fn test_split_row_halves_width() {
        let grid = GridSpec::report();
        let area = PixelRect {
            x0: 10,
            y0: 100,
            x1: 1010,
            y1: 950,
        };
        let donut = grid.cell_rect(area, PanelSlot::IncomeDonut.cell());
        let lines = grid.cell_rect(area, PanelSlot::RegionLines.cell());
        let bars = grid.cell_rect(area, PanelSlot::YearlyBars.cell());

        assert_eq!((donut.x0, donut.x1), (10, 510));
        assert_eq!((lines.x0, lines.x1), (510, 1010));
        assert_eq!(donut.y0, lines.y0);
        assert_eq!(bars.width(), 1000);
        assert_eq!(bars.y1, donut.y0);
    }

    #[test]
    fn test_grid_area_leaves_title_band() {
        let area = grid_area(2000, 2400);
        assert_eq!(area.y0, 120);
        assert_eq!(area.y1, 2328);
        assert_eq!(area.width(), 2000);
    }
}
