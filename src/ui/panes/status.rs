//! Status bar rendering with keybindings and playback indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Playback state shown on the right of the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackBadge {
    Playing,
    End,
    Start,
    Paused,
}

/// Step counter text, e.g. ` Step 3/41 ` or ` Step 3/? ` while the run is live
pub fn step_label(step: usize, total: Option<usize>) -> String {
    match total {
        Some(total) => format!(" Step {}/{} ", step, total),
        None => format!(" Step {}/? ", step),
    }
}

/// Replay history size, e.g. `412 KiB` or `3.2 MiB`
pub fn usage_label(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;
    if bytes < MIB {
        format!("{} KiB", bytes.div_ceil(KIB))
    } else {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    }
}

/// Render the status bar at the bottom
#[allow(clippy::too_many_arguments)]
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    step: usize,
    total: Option<usize>,
    badge: PlaybackBadge,
    delay_ms: u64,
    history_bytes: usize,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let bar_bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let left_spans = vec![
        Span::styled(
            step_label(step, total),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", bar_bg.fg(DEFAULT_THEME.comment)),
        Span::styled(format!("{} ms", delay_ms), bar_bg.fg(DEFAULT_THEME.secondary)),
        Span::styled(" | ", bar_bg.fg(DEFAULT_THEME.comment)),
        Span::styled(usage_label(history_bytes), bar_bg.fg(DEFAULT_THEME.comment)),
        Span::styled(" | ", bar_bg.fg(DEFAULT_THEME.comment)),
        Span::styled(format!(" {} ", message), bar_bg.fg(DEFAULT_THEME.fg)),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(left_spans))
            .style(bar_bg)
            .alignment(Alignment::Left),
        layout[0],
    );

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar_bg.fg(DEFAULT_THEME.fg);
    let sep_style = bar_bg.fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    for (key, desc) in [
        (" ←/→ ", " step "),
        (" ⎵ ", " play "),
        (" +/- ", " speed "),
        (" ↵ / ⌫ ", " end/start "),
        (" r ", " reset "),
        ("q", " quit "),
    ] {
        if !right_spans.is_empty() {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(key, key_style));
        right_spans.push(Span::styled(desc, desc_style));
    }

    let badge_span = match badge {
        PlaybackBadge::Playing => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        PlaybackBadge::End => Some((" END ", DEFAULT_THEME.success)),
        PlaybackBadge::Start => Some((" START ", DEFAULT_THEME.primary)),
        PlaybackBadge::Paused => None,
    };
    if let Some((text, color)) = badge_span {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(bar_bg)
            .alignment(Alignment::Right),
        layout[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_label() {
        assert_eq!(step_label(0, None), " Step 0/? ");
        assert_eq!(step_label(12, Some(40)), " Step 12/40 ");
    }

    #[test]
    fn test_usage_label() {
        assert_eq!(usage_label(0), "0 KiB");
        assert_eq!(usage_label(1500), "2 KiB");
        assert_eq!(usage_label(3 * 1024 * 1024 + 200 * 1024), "3.2 MiB");
    }
}
