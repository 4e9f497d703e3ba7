//! Two-column tables rendered to plain text

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Row, Table, Widget},
};

use crate::common::types::Balance;

/// Render label/value rows under a title line
///
/// The table is drawn into an off-screen buffer sized to fit its content,
/// then read back line by line with trailing spaces trimmed.
pub fn render_two_column(title: &str, rows: &[(&str, String)]) -> Vec<String> {
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    let mut lines = vec![title.to_string()];
    if rows.is_empty() {
        return lines;
    }

    // One column of spacing between label and value
    let width = (label_width + 1 + value_width).max(1) as u16;
    let height = rows.len() as u16;
    let area = Rect::new(0, 0, width, height);

    let table = Table::new(
        rows.iter()
            .map(|(label, value)| Row::new(vec![label.to_string(), value.clone()])),
        [
            Constraint::Length(label_width as u16),
            Constraint::Length(value_width as u16),
        ],
    )
    .column_spacing(1);

    let mut buffer = Buffer::empty(area);
    table.render(area, &mut buffer);

    for y in 0..height {
        let line: String = (0..width).map(|x| buffer[(x, y)].symbol()).collect();
        lines.push(line.trim_end().to_string());
    }
    lines
}

/// Render a balance snapshot titled with the bot version
pub fn balance_table(version: &str, balance: &Balance) -> Vec<String> {
    render_two_column(version, &balance.rows())
}
