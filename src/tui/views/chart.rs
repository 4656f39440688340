use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition};
use ratatui::Frame;

use super::layer_style;
use crate::compose::{ChartSpec, LayerStyle};
use crate::tui::layout::{date_labels, padded_bounds, value_labels};
use crate::tui::state::TuiState;

const WEEK_SECS: f64 = 604_800.0;

/// Draw one chart specification, one line dataset per visible layer.
pub fn draw_chart_view(f: &mut Frame, area: Rect, spec: &ChartSpec, state: &TuiState) {
    let bounds = spec.bounds();
    let x_bounds = padded_bounds(bounds.x, WEEK_SECS);
    let y_bounds = padded_bounds(bounds.y, 1.0);

    let datasets: Vec<Dataset> = spec
        .layers
        .iter()
        .enumerate()
        .filter(|(i, _)| !state.hidden_layers.contains(i))
        .map(|(i, layer)| {
            let marker = match layer.style {
                LayerStyle::Contributor(_) => symbols::Marker::Dot,
                _ => symbols::Marker::Braille,
            };
            Dataset::default()
                .name(format!("{} {}", i + 1, layer.name))
                .marker(marker)
                .graph_type(GraphType::Line)
                .style(layer_style(layer.style))
                .data(&layer.points)
        })
        .collect();

    let axis_style = Style::default().fg(Color::Gray);
    let title_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(spec.title.clone(), title_style))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title(spec.x_label.clone())
                .style(axis_style)
                .bounds(x_bounds)
                .labels(date_labels(x_bounds).into_iter().map(Span::from).collect()),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_label.clone())
                .style(axis_style)
                .bounds(y_bounds)
                .labels(value_labels(y_bounds).into_iter().map(Span::from).collect()),
        )
        .legend_position(state.show_legend.then_some(LegendPosition::TopLeft));

    f.render_widget(chart, area);
}
