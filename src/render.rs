// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::layout::{grid_area, GridSpec, PanelSlot, PixelRect};
use crate::notes::{Align, TextPanel};
use crate::panels::{
    DonutPanel, GroupedBarPanel, HBarPanel, LinePanel, DONUT_LABEL_DISTANCE, PRODUCTION_DESC,
    YEARS_DESC,
};
use crate::report::Report;
use anyhow::Result;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

// Figure background (lavender)
const COLOR_BACKGROUND: RGBColor = RGBColor(230, 230, 250);
const COLOR_SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

const CHART_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

const TITLE_SIZE: u32 = 60;
const PANEL_TITLE_SIZE: u32 = 32;
const AXIS_DESC_SIZE: u32 = 28;
const TICK_SIZE: u32 = 22;
const LINE_WIDTH: u32 = 4;
const TICK_WIDTH: u32 = 2;
const TICK_LENGTH: i32 = 6;

fn bold(font: &str, size: u32) -> TextStyle<'_> {
    TextStyle::from((font, size).into_font().style(FontStyle::Bold))
}

fn chart_color(i: usize) -> RGBColor {
    CHART_COLORS[i % CHART_COLORS.len()]
}

/// Point at `radius` from `center`, angle in degrees counter-clockwise from 3 o'clock.
pub fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    let rad = angle.to_radians();
    (
        center.0 + (radius * rad.cos()).round() as i32,
        center.1 - (radius * rad.sin()).round() as i32,
    )
}

/// Tick text for a year index; blank between whole indices.
pub fn year_label(labels: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}

fn sub_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    rect: PixelRect,
) -> DrawingArea<DB, Shift> {
    root.clone()
        .shrink((rect.x0, rect.y0), (rect.width(), rect.height()))
}

/// Draw the whole figure onto `root`
pub fn draw_report<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    report: &Report,
    font: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&COLOR_BACKGROUND)?;

    let (width, height) = root.dim_in_pixel();
    let grid_rect = grid_area(width, height);
    root.draw_text(
        &report.title,
        &bold(font, TITLE_SIZE).pos(Pos::new(HPos::Center, VPos::Center)),
        (width as i32 / 2, grid_rect.y0 / 2),
    )?;

    let grid = GridSpec::report();
    for slot in PanelSlot::ALL {
        let area = sub_area(root, grid.cell_rect(grid_rect, slot.cell()));
        tracing::debug!("drawing {:?}", slot);
        match slot {
            PanelSlot::YearlyBars => draw_grouped_bars(&area, &report.yearly, font)?,
            PanelSlot::IncomeDonut => draw_donut(&area, &report.donut, font)?,
            PanelSlot::RegionLines => draw_lines(&area, &report.lines, font)?,
            PanelSlot::Region2020Bars => draw_hbars(&area, &report.region_2020, font)?,
            PanelSlot::Observations => draw_text_panel(&area, &report.observations, font)?,
            PanelSlot::Attribution => draw_text_panel(&area, &report.attribution, font)?,
        }
    }

    Ok(())
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    font: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(bold(font, TICK_SIZE))
        .draw()?;
    Ok(())
}

/// Short black tick at `at`, pointing along `(dx, dy)`, in `area`-relative pixels.
fn draw_tick<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    at: (i32, i32),
    (dx, dy): (i32, i32),
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    area.draw(&PathElement::new(
        vec![at, (at.0 + dx, at.1 + dy)],
        BLACK.stroke_width(TICK_WIDTH),
    ))?;
    Ok(())
}

fn draw_lines<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &LinePanel,
    font: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let labels = &panel.x_labels;
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, bold(font, PANEL_TITLE_SIZE))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(120)
        .build_cartesian_2d(panel.x_range(), panel.y_range())?;

    chart
        .configure_mesh()
        .x_desc(YEARS_DESC)
        .y_desc(PRODUCTION_DESC)
        .x_labels(labels.len().min(8))
        .x_label_formatter(&|x| year_label(labels, *x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .axis_desc_style(bold(font, AXIS_DESC_SIZE))
        .label_style(bold(font, TICK_SIZE))
        .draw()?;

    // Gaps are skipped, the line runs straight over them
    for (i, series) in panel.series.iter().enumerate() {
        let color = chart_color(i);
        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied().filter(|(_, y)| y.is_finite()),
                color.stroke_width(LINE_WIDTH),
            ))?
            .label(&series.name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });
    }

    draw_legend(&mut chart, font)?;
    Ok(())
}

fn draw_donut<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &DonutPanel,
    font: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let title_band = 80;

    area.draw_text(
        &panel.title,
        &bold(font, PANEL_TITLE_SIZE).pos(Pos::new(HPos::Center, VPos::Top)),
        (w / 2, 20),
    )?;

    let center = (w / 2, title_band + (h - title_band) / 2);
    let radius = (f64::from(h - title_band) * 0.36).min(f64::from(w) * 0.25);

    for (i, slice) in panel.slices.iter().enumerate() {
        draw_pie_segment(
            area,
            center,
            radius,
            slice.start_angle,
            slice.sweep,
            chart_color(i),
        )?;
    }

    for slice in &panel.slices {
        let mid = slice.mid_angle();
        let hpos = if mid.to_radians().cos() >= 0.0 {
            HPos::Left
        } else {
            HPos::Right
        };
        area.draw_text(
            &slice.label,
            &bold(font, TICK_SIZE + 2).pos(Pos::new(hpos, VPos::Center)),
            polar(center, radius * DONUT_LABEL_DISTANCE, mid),
        )?;
    }

    area.draw(&Circle::new(
        center,
        (radius * panel.hole_ratio).round() as i32,
        WHITE.filled(),
    ))?;

    Ok(())
}

/// Draw a pie segment
fn draw_pie_segment<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    center: (i32, i32),
    radius: f64,
    start_angle: f64,
    sweep_angle: f64,
    color: RGBColor,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    if sweep_angle <= 0.0 {
        return Ok(());
    }

    let num_points = 100;
    let mut points = Vec::with_capacity(num_points + 2);
    points.push(center);
    for i in 0..=num_points {
        let angle = start_angle + (sweep_angle * i as f64 / num_points as f64);
        points.push(polar(center, radius, angle));
    }

    area.draw(&Polygon::new(points, color.filled()))?;

    Ok(())
}

fn draw_grouped_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &GroupedBarPanel,
    font: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let y_range = panel.y_range();
    let y_min = y_range.start;
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, bold(font, PANEL_TITLE_SIZE))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(120)
        .build_cartesian_2d(panel.x_range(), y_range)?;

    // Year ticks are drawn by hand below, centred under each group
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(YEARS_DESC)
        .y_desc(PRODUCTION_DESC)
        .x_labels(0)
        .y_label_formatter(&|y| format!("{:.0}", y))
        .axis_desc_style(bold(font, AXIS_DESC_SIZE))
        .label_style(bold(font, TICK_SIZE))
        .draw()?;

    let half = panel.bar_width / 2.0;
    for (i, group) in panel.groups.iter().enumerate() {
        let color = chart_color(i);
        chart
            .draw_series(
                group
                    .bars
                    .iter()
                    .filter(|b| b.value.is_finite())
                    .map(|b| {
                        Rectangle::new(
                            [(b.center - half, 0.0), (b.center + half, b.value)],
                            color.filled(),
                        )
                    }),
            )?
            .label(&group.name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 16, y + 6)], color.filled()));
    }
    draw_legend(&mut chart, font)?;

    let base = area.get_base_pixel();
    let tick_style = bold(font, TICK_SIZE).pos(Pos::new(HPos::Center, VPos::Top));
    for (x, label) in &panel.ticks {
        let (px, py) = chart.backend_coord(&(*x, y_min));
        let at = (px - base.0, py - base.1);
        draw_tick(area, at, (0, TICK_LENGTH))?;
        area.draw_text(label, &tick_style, (at.0, at.1 + TICK_LENGTH + 4))?;
    }

    Ok(())
}

fn draw_hbars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &HBarPanel,
    font: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let x_range = panel.x_range();
    let x_min = x_range.start;
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, bold(font, PANEL_TITLE_SIZE))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(320)
        .build_cartesian_2d(x_range, panel.y_range())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(PRODUCTION_DESC)
        .y_desc("Regions")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_labels(0)
        .axis_desc_style(bold(font, AXIS_DESC_SIZE))
        .label_style(bold(font, TICK_SIZE))
        .draw()?;

    let half = panel.bar_height / 2.0;
    chart.draw_series(
        panel
            .bars
            .iter()
            .filter(|b| b.value.is_finite())
            .map(|b| {
                Rectangle::new(
                    [(0.0, b.y_center - half), (b.value, b.y_center + half)],
                    COLOR_SKY_BLUE.filled(),
                )
            }),
    )?;

    let value_style = bold(font, TICK_SIZE).pos(Pos::new(HPos::Left, VPos::Center));
    chart.draw_series(
        panel
            .bars
            .iter()
            .filter(|b| b.value.is_finite())
            .map(|b| Text::new(b.label.clone(), b.label_anchor(), value_style.clone())),
    )?;

    let base = area.get_base_pixel();
    let name_style = bold(font, TICK_SIZE).pos(Pos::new(HPos::Right, VPos::Center));
    for bar in &panel.bars {
        let (px, py) = chart.backend_coord(&(x_min, bar.y_center));
        let at = (px - base.0, py - base.1);
        draw_tick(area, at, (-TICK_LENGTH, 0))?;
        area.draw_text(&bar.name, &name_style, (at.0 - TICK_LENGTH - 4, at.1))?;
    }

    Ok(())
}

fn draw_text_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &TextPanel,
    font: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let pad = w / 40;

    // Average glyph width is about half the font size
    let max_chars = ((w - 2 * pad).max(1) as u32 / (panel.font_size / 2).max(1)) as usize;
    let lines = panel.lines(max_chars);

    let line_height = (panel.font_size as f64 * 1.4).round() as i32;
    let block_height = line_height * lines.len() as i32;
    let top = (h - block_height) / 2 + line_height / 2;

    let (x, hpos) = match panel.align {
        Align::Left => (pad, HPos::Left),
        Align::Right => (w * 95 / 100, HPos::Right),
    };
    let style = bold(font, panel.font_size)
        .color(&BLACK)
        .pos(Pos::new(hpos, VPos::Center));

    for (i, line) in lines.iter().enumerate() {
        area.draw_text(line, &style, (x, top + i as i32 * line_height))?;
    }

    Ok(())
}
