use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )])
}

/// Draw the modal help overlay describing the chart views and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(60, 60, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "ghfreq - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Views:"),
        Line::from("  Tab / →     Next chart"),
        Line::from("  Shift+Tab / ←  Previous chart"),
        Line::from(""),
        section("Layers:"),
        Line::from("  1-9         Hide/show the numbered layer"),
        Line::from("  0           Show all layers"),
        Line::from("  l           Toggle legend"),
        Line::from(""),
        section("Charts:"),
        Line::from("  Overlay     Churn scaled to commit counts, with commits per contributor"),
        Line::from("  Churn       Raw weekly additions and deletions"),
        Line::from("  Commits     Raw weekly commits per contributor"),
        Line::from(""),
        Line::from("  h / F1 / Esc  Close help      q  Quit"),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    f.render_widget(paragraph, help_area);
}
