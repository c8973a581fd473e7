//! Bar chart of the working array
//!
//! One bar per element, coloured by the role the element plays in the
//! current step. When several roles apply the highest one wins:
//! pivot, then primary active, then secondary active, then sorted.

use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

/// What an element is doing in the displayed step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarRole {
    Pivot,
    Active,
    Partner,
    Sorted,
    Idle,
}

impl BarRole {
    pub fn color(self) -> Color {
        match self {
            BarRole::Pivot => DEFAULT_THEME.bar_pivot,
            BarRole::Active => DEFAULT_THEME.bar_active,
            BarRole::Partner => DEFAULT_THEME.bar_partner,
            BarRole::Sorted => DEFAULT_THEME.bar_sorted,
            BarRole::Idle => DEFAULT_THEME.bar,
        }
    }
}

/// Role of `index` in `snapshot`; everything is idle before the first step
pub fn bar_role(snapshot: Option<&Snapshot>, index: usize) -> BarRole {
    let Some(snapshot) = snapshot else {
        return BarRole::Idle;
    };

    if snapshot.pivot_index == Some(index) {
        BarRole::Pivot
    } else if snapshot.active_indices.first() == Some(&index) {
        BarRole::Active
    } else if snapshot.active_indices.get(1) == Some(&index) {
        BarRole::Partner
    } else if snapshot.is_sorted_index(index) {
        BarRole::Sorted
    } else {
        BarRole::Idle
    }
}

/// Bar width and gap that fit `count` bars into `width` columns
fn bar_layout(width: u16, count: usize) -> (u16, u16) {
    if count == 0 {
        return (1, 0);
    }
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    let with_gap = width.saturating_sub(count.saturating_sub(1)) / count;
    if with_gap >= 2 {
        (with_gap, 1)
    } else {
        ((width / count).max(1), 0)
    }
}

/// Render the array pane
pub fn render_bars_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    array: &[i64],
    snapshot: Option<&Snapshot>,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let inner_width = area.width.saturating_sub(2);
    let (bar_width, bar_gap) = bar_layout(inner_width, array.len());

    // Bars are unsigned; shift so the smallest value still shows a sliver
    let floor = array.iter().copied().min().unwrap_or(0).min(1).saturating_sub(1);
    let bars: Vec<Bar> = array
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let color = bar_role(snapshot, index).color();
            let label = if bar_width as usize >= value.to_string().len() {
                value.to_string()
            } else {
                String::new()
            };
            Bar::default()
                .value(value.saturating_sub(floor) as u64)
                .text_value(label)
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap);

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_priority() {
        let snapshot = Snapshot::new(vec![5, 1, 4, 2], vec![1, 2], vec![1, 3]).with_pivot(2);

        assert_eq!(bar_role(Some(&snapshot), 2), BarRole::Pivot);
        assert_eq!(bar_role(Some(&snapshot), 1), BarRole::Active);
        assert_eq!(bar_role(Some(&snapshot), 3), BarRole::Sorted);
        assert_eq!(bar_role(Some(&snapshot), 0), BarRole::Idle);
        assert_eq!(bar_role(None, 1), BarRole::Idle);
    }

    #[test]
    fn test_partner_is_secondary_active() {
        let snapshot = Snapshot::new(vec![5, 1], vec![0, 1], vec![1]);
        assert_eq!(bar_role(Some(&snapshot), 1), BarRole::Partner);
    }

    #[test]
    fn test_third_active_index_is_not_highlighted() {
        // Dual-pivot classification touches [k, less, great]
        let snapshot = Snapshot::new(vec![3, 1, 4, 1, 5], vec![2, 1, 3], vec![]);
        assert_eq!(bar_role(Some(&snapshot), 2), BarRole::Active);
        assert_eq!(bar_role(Some(&snapshot), 1), BarRole::Partner);
        assert_eq!(bar_role(Some(&snapshot), 3), BarRole::Idle);
    }

    #[test]
    fn test_bar_layout_fits_width() {
        assert_eq!(bar_layout(59, 20), (2, 1));
        assert_eq!(bar_layout(30, 20), (1, 0));
        assert_eq!(bar_layout(10, 0), (1, 0));
    }
}
