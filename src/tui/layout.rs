use chrono::{TimeZone, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Widen empty ranges so the chart canvas never has zero extent.
pub fn padded_bounds(bounds: [f64; 2], pad: f64) -> [f64; 2] {
    if bounds[1] - bounds[0] > f64::EPSILON {
        bounds
    } else {
        [bounds[0] - pad, bounds[1] + pad]
    }
}

/// Start, middle and end labels for an epoch-seconds axis.
pub fn date_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|&secs| {
            Utc.timestamp_opt(secs as i64, 0)
                .single()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Low, middle and high labels for a value axis.
pub fn value_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]].iter().map(|&v| format_value(v, bounds)).collect()
}

fn format_value(v: f64, bounds: [f64; 2]) -> String {
    let span = bounds[1] - bounds[0];
    if span.abs() < 10.0 {
        format!("{v:.2}")
    } else if v.abs() >= 10_000.0 {
        format!("{:.1}k", v / 1000.0)
    } else {
        format!("{v:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_bounds_widens_degenerate_range() {
        assert_eq!(padded_bounds([0.0, 0.0], 1.0), [-1.0, 1.0]);
        assert_eq!(padded_bounds([2.0, 5.0], 1.0), [2.0, 5.0]);
    }

    #[test]
    fn date_labels_format_epoch_seconds() {
        let labels = date_labels([0.0, 172_800.0]);
        assert_eq!(labels, vec!["1970-01-01", "1970-01-02", "1970-01-03"]);
    }

    #[test]
    fn value_labels_scale_with_range() {
        assert_eq!(value_labels([-2.0, 5.0]), vec!["-2.00", "1.50", "5.00"]);
        assert_eq!(value_labels([-40_000.0, 20_000.0]), vec!["-40.0k", "-10.0k", "20.0k"]);
        assert_eq!(value_labels([0.0, 300.0]), vec!["0", "150", "300"]);
    }
}
