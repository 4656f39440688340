use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Terminal;

use super::events::handle_key_event;
use super::state::TuiState;
use super::views::{draw_chart_view, draw_help_overlay};
use crate::compose::{ChartKind, ChartSpec};

fn tab_title(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Overlay => "Overlay",
        ChartKind::RawChurn => "Churn",
        ChartKind::RawCommits => "Commits",
    }
}

/// Show the charts until the user quits. The terminal is restored even when drawing fails.
pub fn run(repository: &str, charts: &[ChartSpec]) -> io::Result<()> {
    enable_raw_mode()?;
    let result = execute!(io::stdout(), EnterAlternateScreen)
        .and_then(|_| event_loop(repository, charts));
    let mut leave_screen = || execute!(io::stdout(), LeaveAlternateScreen);
    let mut leave_raw_mode = disable_raw_mode;
    let restored = restore_all([&mut leave_screen, &mut leave_raw_mode]);
    result.and(restored)
}

/// Run every restore step even if an earlier one fails; report the first error.
fn restore_all<const N: usize>(steps: [&mut dyn FnMut() -> io::Result<()>; N]) -> io::Result<()> {
    let mut first = Ok(());
    for step in steps {
        if let Err(e) = step() {
            if first.is_ok() {
                first = Err(e);
            }
        }
    }
    first
}

fn event_loop(repository: &str, charts: &[ChartSpec]) -> io::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut state = TuiState::default();
    let titles: Vec<&str> = charts.iter().map(|c| tab_title(c.kind)).collect();
    terminal.clear()?;

    loop {
        terminal.draw(|f| {
            let size = f.size();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(size);

            let tabs = Tabs::new(titles.clone())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("{repository} (h for help)")),
                )
                .highlight_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .select(state.tab_index);
            f.render_widget(tabs, chunks[0]);

            if let Some(spec) = charts.get(state.tab_index) {
                draw_chart_view(f, chunks[1], spec, &state);
            }

            if state.show_help {
                draw_help_overlay(f, size);
            }
        })?;

        if poll(Duration::from_millis(200))? {
            if let Event::Key(key_event) = read()? {
                if handle_key_event(key_event, &mut state, charts.len()) {
                    break;
                }
            }
        }
    }

    terminal.clear()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing(msg: &'static str) -> impl FnMut() -> io::Result<()> {
        move || Err(io::Error::new(io::ErrorKind::Other, msg))
    }

    #[test]
    fn restore_runs_every_step_after_a_failure() {
        let mut calls = 0;
        let mut leave = failing("leave failed");
        let mut raw = || {
            calls += 1;
            Ok::<(), io::Error>(())
        };
        let result = restore_all([&mut leave, &mut raw]);
        assert_eq!(calls, 1);
        assert_eq!(result.unwrap_err().to_string(), "leave failed");
    }

    #[test]
    fn restore_reports_first_error() {
        let mut first = failing("first");
        let mut second = failing("second");
        let result = restore_all([&mut first, &mut second]);
        assert_eq!(result.unwrap_err().to_string(), "first");
    }

    #[test]
    fn tab_titles_follow_chart_kind() {
        assert_eq!(tab_title(ChartKind::Overlay), "Overlay");
        assert_eq!(tab_title(ChartKind::RawCommits), "Commits");
    }
}
