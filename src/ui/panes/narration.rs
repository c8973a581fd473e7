//! Narration pane: the current step's description plus a short log

use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the narration pane
///
/// `recent` is the tail of history ending at the displayed step, oldest first.
pub fn render_narration_pane(frame: &mut Frame, area: Rect, recent: &[&Snapshot]) {
    let block = Block::default()
        .title(" Narration ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    if recent.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Press → or space to start",
            Style::default().fg(DEFAULT_THEME.comment),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let last = recent.len() - 1;
    let lines: Vec<Line> = recent
        .iter()
        .enumerate()
        .skip(recent.len().saturating_sub(visible))
        .map(|(i, snapshot)| {
            let (tag, color) = match snapshot.kind() {
                Some(kind) => (kind.as_str(), DEFAULT_THEME.step_color(kind)),
                None => ("", DEFAULT_THEME.fg),
            };
            let text_style = if i == last {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            Line::from(vec![
                Span::styled(
                    format!(" {:<7} ", tag),
                    Style::default().bg(color).fg(Color::Black),
                ),
                Span::styled(format!(" {}", snapshot.description()), text_style),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
