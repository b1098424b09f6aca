use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::{App, MessageRow};
use crate::theme::Theme;

pub struct MessageListWidget;

impl MessageListWidget {
    /// Render every laid-out row; call `App::layout` for the same area first
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg0)), area);

        for (index, (row, row_area)) in app.rows.iter().zip(app.row_areas()).enumerate() {
            let selected = index == app.selected;
            let lines = Self::strip_lines(row, row_area.height, selected, &app.theme);
            // The strip is wider than the row; the panel offset picks the visible window
            let scroll_x = row.panel.offset().clamp(0, u16::MAX as i32) as u16;
            frame.render_widget(Paragraph::new(lines).scroll((0, scroll_x)), *row_area);
        }
    }

    /// Lines of the full content + action strip for one row
    fn strip_lines(row: &MessageRow, height: u16, selected: bool, theme: &Theme) -> Vec<Line<'static>> {
        let layout = row.panel.layout();
        let content_width = layout.content.width as usize;
        let buttons = layout.action_buttons();
        let label_line = height / 2;

        let bg = if selected { theme.selection } else { theme.bg0 };
        let sender_style = if row.is_read {
            Style::default().fg(theme.grey1).bg(bg)
        } else {
            Style::default().fg(theme.fg0).bg(bg).add_modifier(Modifier::BOLD)
        };
        let preview_style = Style::default().fg(theme.grey2).bg(bg);
        let marker_style = Style::default().fg(theme.unread).bg(bg);
        let pin_style = Style::default().fg(theme.pinned).bg(bg);

        (0..height)
            .map(|line| {
                let mut spans = match line {
                    0 => {
                        let read_marker = if row.is_read { " " } else { "●" };
                        let pin_marker = if row.is_pinned { "▲" } else { " " };
                        let sender = fit_width(&format!(" {}", row.sender), content_width.saturating_sub(2));
                        vec![
                            Span::styled(read_marker, marker_style),
                            Span::styled(pin_marker, pin_style),
                            Span::styled(sender, sender_style),
                        ]
                    }
                    1 => vec![Span::styled(
                        fit_width(&format!("   {}", row.preview), content_width),
                        preview_style,
                    )],
                    _ => vec![Span::styled(fit_width("", content_width), Style::default().bg(bg))],
                };

                for (kind, rect) in buttons {
                    let label = if line == label_line { kind.label() } else { "" };
                    spans.push(Span::styled(
                        center(label, rect.width as usize),
                        Style::default()
                            .fg(theme.button_fg)
                            .bg(theme.action_color(kind))
                            .add_modifier(Modifier::BOLD),
                    ));
                }

                Line::from(spans)
            })
            .collect()
    }
}

/// Truncate or pad `text` to exactly `width` terminal columns
fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// Center `label` in `width` columns, truncating when it does not fit
fn center(label: &str, width: usize) -> String {
    let label = fit_width(label, width);
    let label = label.trim_end();
    let left = (width - label.chars().count()) / 2;
    let right = width - left - label.chars().count();
    format!("{}{}{}", " ".repeat(left), label, " ".repeat(right))
}
