use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

const HELP_LINES: &[(&str, &str)] = &[
    ("drag left", "reveal actions"),
    ("drag right", "hide actions"),
    ("click button", "read / top / delete"),
    ("j / k", "select message"),
    ("o / c", "open / close selected"),
    ("r / t / d", "read / top / delete selected"),
    ("q", "quit"),
];

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key help overlay
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();

        let popup_width = 46u16.min(area.width.saturating_sub(4));
        let popup_height = (HELP_LINES.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let mut lines: Vec<Line> = HELP_LINES
            .iter()
            .map(|(keys, what)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>13}  ", keys),
                        Style::default().fg(theme.unread).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*what, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled("any key to close", Style::default().fg(theme.grey1)))
                .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(40, 10, area), Rect::new(30, 15, 40, 10));
        // Larger than the area collapses to the origin
        assert_eq!(centered_rect(200, 80, area), Rect::new(0, 0, 200, 80));
    }
}
