//! Auxiliary table pane (count table, digit counts, bucket contents)

use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Label for slot `index` of an auxiliary table
///
/// Counting sort tables are offset by `min`, so slot 0 counts `min`.
pub fn slot_label(snapshot: &Snapshot, index: usize) -> i64 {
    let min = snapshot
        .metadata
        .as_ref()
        .and_then(|m| m.min)
        .unwrap_or(0);
    min.saturating_add(index as i64)
}

/// Render the auxiliary pane; shows a placeholder when the step has no table
pub fn render_counts_pane(frame: &mut Frame, area: Rect, snapshot: Option<&Snapshot>) {
    let block = Block::default()
        .title(" Auxiliary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let Some((snapshot, aux)) =
        snapshot.and_then(|s| s.auxiliary_array.as_ref().map(|aux| (s, aux)))
    else {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No auxiliary data for this step",
            Style::default().fg(DEFAULT_THEME.comment),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let label_width = (0..aux.len())
        .map(|i| slot_label(snapshot, i).to_string().len())
        .max()
        .unwrap_or(1);
    let peak = aux.iter().copied().max().unwrap_or(0).max(1);
    let room = area.width.saturating_sub(label_width as u16 + 12) as i64;

    let mut lines = Vec::with_capacity(aux.len() + 1);
    if let (Some(min), Some(max)) = snapshot
        .metadata
        .as_ref()
        .map(|m| (m.min, m.max))
        .unwrap_or((None, None))
    {
        lines.push(Line::from(Span::styled(
            format!(" range {}..={}", min, max),
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        )));
    }

    for (i, &count) in aux.iter().enumerate() {
        let bar_len = if room > 0 { (count.max(0) * room / peak) as usize } else { 0 };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:>width$} ", slot_label(snapshot, i), width = label_width),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled("│ ", Style::default().fg(DEFAULT_THEME.border_normal)),
            Span::styled(
                format!("{:>4} ", count),
                Style::default().fg(DEFAULT_THEME.number),
            ),
            Span::styled("▇".repeat(bar_len), Style::default().fg(DEFAULT_THEME.type_name)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Metadata, StepKind};

    #[test]
    fn test_slot_labels_follow_min() {
        let snapshot = Snapshot::new(vec![-2, 0], vec![], vec![])
            .with_metadata(Metadata::new(StepKind::Scatter, "Counted -2"))
            .with_range(-2, 0)
            .with_auxiliary(vec![1, 0, 0]);
        assert_eq!(slot_label(&snapshot, 0), -2);
        assert_eq!(slot_label(&snapshot, 2), 0);
    }

    #[test]
    fn test_slot_labels_without_range_are_indices() {
        let snapshot = Snapshot::new(vec![3], vec![], vec![]).with_auxiliary(vec![0; 10]);
        assert_eq!(slot_label(&snapshot, 7), 7);
    }
}
