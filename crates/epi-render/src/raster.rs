//! Rasterization of a [`FigureView`] with plotters.
//!
//! The figure is a 1 × 3 grid.  [`draw_figure`] only repaints the panels it
//! is given, so a persistent bitmap can be updated panel by panel.  Text
//! (captions, axis labels, legends) needs the `fonts` feature; without it
//! panels get a plain frame instead of a labelled mesh.

use std::path::Path;

use epi_core::NamedColor;
use plotters::coord::Shift;
use plotters::prelude::{
    BitMapBackend, ChartBuilder, Circle, Color, DrawingArea, DrawingBackend, IntoDrawingArea,
    LineSeries as LinePlot, PathElement, RGBColor, Rectangle, BLACK, WHITE,
};

use crate::error::drawing;
use crate::{EnvironmentView, FigureView, Panel, PanelId, RenderResult};

/// Pixel radius of a scatter dot.
const SCATTER_DOT_PX: i32 = 3;
/// Number of dash periods across a dashed reference line.
const DASH_PERIODS: usize = 40;

pub fn rgb(color: NamedColor) -> RGBColor {
    let (r, g, b) = color.rgb();
    RGBColor(r, g, b)
}

/// Marker radius in pixels for a node whose display radius is an area in
/// points².
fn marker_px(radius: f64) -> i32 {
    radius.sqrt().round().max(1.0) as i32
}

/// Repaint `panels` of `fig` into `root`.
pub fn draw_figure<DB: DrawingBackend>(
    root:   &DrawingArea<DB, Shift>,
    fig:    &FigureView<'_>,
    panels: &[PanelId],
) -> RenderResult<()> {
    let areas = root.split_evenly((1, 3));
    for &id in panels {
        let area = &areas[id.slot()];
        area.fill(&WHITE).map_err(drawing)?;
        match fig.panel(id) {
            None => draw_environment(area, fig)?,
            Some(panel) => draw_panel(area, panel)?,
        }
    }
    Ok(())
}

/// Render the whole figure into a PNG file.
pub fn save_png(fig: &FigureView<'_>, path: &Path, size: (u32, u32)) -> RenderResult<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_figure(&root, fig, &PanelId::ALL)?;
    root.present().map_err(drawing)?;
    Ok(())
}

/// Repaint `panels` into a caller-owned RGB buffer of `size.0 * size.1 * 3`
/// bytes.
pub fn draw_into_buffer(
    buffer: &mut [u8],
    size:   (u32, u32),
    fig:    &FigureView<'_>,
    panels: &[PanelId],
) -> RenderResult<()> {
    let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
    draw_figure(&root, fig, panels)?;
    root.present().map_err(drawing)?;
    Ok(())
}

// ── Environment panel ─────────────────────────────────────────────────────────

fn draw_environment<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    fig:  &FigureView<'_>,
) -> RenderResult<()> {
    let length = fig.bounds.length.max(f64::EPSILON);
    let height = fig.bounds.height.max(f64::EPSILON);

    let mut builder = ChartBuilder::on(area);
    builder.margin(10);
    #[cfg(feature = "fonts")]
    builder
        .caption(crate::figure::ENVIRONMENT_TITLE, ("sans-serif", 18))
        .x_label_area_size(30)
        .y_label_area_size(40);
    let mut chart = builder
        .build_cartesian_2d(0.0..length, 0.0..height)
        .map_err(drawing)?;

    #[cfg(feature = "fonts")]
    chart.configure_mesh().disable_mesh().draw().map_err(drawing)?;
    #[cfg(not(feature = "fonts"))]
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(0.0, 0.0), (length, height)],
            BLACK.stroke_width(1),
        )))
        .map_err(drawing)?;

    match fig.environment {
        EnvironmentView::Scatter(scatter) => {
            let dots = scatter
                .offsets()
                .iter()
                .zip(scatter.colors())
                .map(|(p, &c)| Circle::new((p.x, p.y), SCATTER_DOT_PX, rgb(c).filled()));
            chart.draw_series(dots).map_err(drawing)?;
        }
        EnvironmentView::Graph(layout) => {
            let edges = layout
                .edge_segments()
                .map(|(a, b)| PathElement::new(vec![(a.x, a.y), (b.x, b.y)], BLACK.mix(0.4)));
            chart.draw_series(edges).map_err(drawing)?;

            let nodes = layout.nodes().map(|n| {
                Circle::new((n.position.x, n.position.y), marker_px(n.radius), rgb(n.color).filled())
            });
            chart.draw_series(nodes).map_err(drawing)?;
        }
    }
    Ok(())
}

// ── Time-series panels ────────────────────────────────────────────────────────

fn draw_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, panel: &Panel) -> RenderResult<()> {
    let (x0, x1) = panel.x_range();
    let (y0, y1) = panel.y_range();

    let mut builder = ChartBuilder::on(area);
    builder.margin(10);
    #[cfg(feature = "fonts")]
    builder
        .caption(panel.title.as_str(), ("sans-serif", 18))
        .x_label_area_size(30)
        .y_label_area_size(50);
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1).map_err(drawing)?;

    #[cfg(feature = "fonts")]
    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .draw()
        .map_err(drawing)?;
    #[cfg(not(feature = "fonts"))]
    chart
        .draw_series(std::iter::once(Rectangle::new([(x0, y0), (x1, y1)], BLACK.stroke_width(1))))
        .map_err(drawing)?;

    if let Some(reference) = &panel.reference {
        let color = rgb(reference.color);
        let y = reference.y;
        let segments: Vec<PathElement<(f64, f64)>> = if reference.dashed {
            let period = (x1 - x0) / DASH_PERIODS as f64;
            (0..DASH_PERIODS)
                .map(|i| {
                    let start = x0 + i as f64 * period;
                    PathElement::new(vec![(start, y), (start + period * 0.5, y)], color)
                })
                .collect()
        } else {
            vec![PathElement::new(vec![(x0, y), (x1, y)], color)]
        };
        let _anno = chart.draw_series(segments).map_err(drawing)?;
        #[cfg(feature = "fonts")]
        _anno
            .label(reference.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    for series in panel.series() {
        let color = rgb(series.color());
        let points = series.points().iter().map(|&(f, v)| (f as f64, v));
        let _anno = chart
            .draw_series(LinePlot::new(points, color.stroke_width(2)))
            .map_err(drawing)?;
        #[cfg(feature = "fonts")]
        _anno
            .label(series.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    #[cfg(feature = "fonts")]
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(drawing)?;

    Ok(())
}
