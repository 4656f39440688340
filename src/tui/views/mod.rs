use ratatui::style::{Color, Style};

use crate::compose::LayerStyle;

mod chart;
mod help;

pub use chart::draw_chart_view;
pub use help::draw_help_overlay;

const CONTRIBUTOR_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::LightCyan,
    Color::LightYellow,
    Color::LightMagenta,
    Color::White,
];

/// Additions green, deletions red, contributors cycle through a fixed palette.
pub(crate) fn layer_style(style: LayerStyle) -> Style {
    match style {
        LayerStyle::Additions => Style::default().fg(Color::Green),
        LayerStyle::Deletions => Style::default().fg(Color::Red),
        LayerStyle::Contributor(i) => {
            Style::default().fg(CONTRIBUTOR_COLORS[i % CONTRIBUTOR_COLORS.len()])
        }
    }
}
