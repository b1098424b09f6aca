use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else if let Some(row) = app.current_row() {
            let state = if row.panel.is_open() { "open" } else { "closed" };
            format!(
                " {} | Messages: {} | {} ({}, offset {}/{})",
                mode_str,
                app.rows.len(),
                row.sender,
                state,
                row.panel.offset(),
                row.panel.action_width()
            )
        } else {
            format!(" {} | No messages", mode_str)
        };

        let help_hint = " q:quit j/k:move o/c:open/close r/t/d:actions ?:help ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
