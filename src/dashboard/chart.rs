//! Line chart model and SVG rendering
//!
//! A [`ChartSpec`] holds one series per keyword with dates on the x-axis and
//! relative interest on the y-axis. It is rendered with plotters' SVG backend.

use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::fmt;
use std::path::Path;

use crate::models::{TrendTable, DATE_FORMAT};
use crate::utils::error::RenderError;
use crate::utils::truncate_text;

/// Series colours, cycled when there are more keywords than entries
const SERIES_COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

/// One keyword's line
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Everything needed to draw the trend chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// One series per table column, in column order
    pub fn from_table(table: &TrendTable, title: impl Into<String>) -> Self {
        let series = table
            .keywords()
            .iter()
            .enumerate()
            .map(|(index, keyword)| ChartSeries {
                label: keyword.clone(),
                points: table
                    .dates()
                    .zip(table.column(index).unwrap_or_default())
                    .map(|(date, value)| (date, f64::from(value)))
                    .collect(),
            })
            .collect();

        Self {
            title: title.into(),
            series,
        }
    }

    /// First and last date across all series
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let min = dates.clone().min()?;
        let max = dates.max()?;
        Some((min, max))
    }

    /// Number of distinct dates plotted
    pub fn date_count(&self) -> usize {
        let mut dates: Vec<NaiveDate> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.0))
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates.len()
    }

    fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .fold(0.0, f64::max)
    }

    /// Peak, mean and latest value per series
    pub fn summary(&self) -> ChartSummary {
        let rows = self
            .series
            .iter()
            .filter_map(|series| {
                let (peak_date, peak) = series
                    .points
                    .iter()
                    .copied()
                    .fold(None, |best: Option<(NaiveDate, f64)>, point| match best {
                        Some(b) if b.1 >= point.1 => Some(b),
                        _ => Some(point),
                    })?;
                let mean =
                    series.points.iter().map(|p| p.1).sum::<f64>() / series.points.len() as f64;
                let latest = series.points.last().map_or(0.0, |p| p.1);

                Some(SeriesSummary {
                    label: series.label.clone(),
                    peak,
                    peak_date,
                    mean,
                    latest,
                })
            })
            .collect();

        ChartSummary { rows }
    }
}

/// Per-keyword statistics printed next to the chart
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub label: String,
    pub peak: f64,
    pub peak_date: NaiveDate,
    pub mean: f64,
    pub latest: f64,
}

/// Text table of [`SeriesSummary`] rows
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSummary {
    pub rows: Vec<SeriesSummary>,
}

impl fmt::Display for ChartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:>6} {:>12} {:>8} {:>8}",
            "keyword", "peak", "peak date", "mean", "latest"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<24} {:>6.0} {:>12} {:>8.1} {:>8.0}",
                truncate_text(&row.label, 24),
                row.peak,
                row.peak_date.format(DATE_FORMAT).to_string(),
                row.mean,
                row.latest
            )?;
        }
        Ok(())
    }
}

/// Render the chart to an SVG file
pub fn render_svg(spec: &ChartSpec, path: &Path, size: (u32, u32)) -> Result<(), RenderError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw(spec, &root)
}

/// Render the chart to an SVG document in memory
pub fn render_svg_string(spec: &ChartSpec, size: (u32, u32)) -> Result<String, RenderError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw(spec, &root)?;
    }
    Ok(svg)
}

fn drawing<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Drawing(err.to_string())
}

fn draw<DB: DrawingBackend>(
    spec: &ChartSpec,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), RenderError> {
    let (start, end) = spec.date_span().ok_or(RenderError::EmptyChart)?;
    // A single-day chart still needs a non-empty x range
    let end = if start == end { end + Duration::days(1) } else { end };
    let y_top = (spec.max_value() * 1.05).max(1.0);

    root.fill(&WHITE).map_err(drawing)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 24).into_font())
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d(start..end, 0f64..y_top)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Interest")
        .x_label_formatter(&|d: &NaiveDate| d.format(DATE_FORMAT).to_string())
        .draw()
        .map_err(drawing)?;

    for (index, series) in spec.series.iter().enumerate() {
        let color = SERIES_COLORS[index % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(2),
            ))
            .map_err(drawing)?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(drawing)?;

    root.present().map_err(drawing)?;
    Ok(())
}
