//! Algorithm pane: catalogue entry plus a highlighted reference implementation
//!
//! The highlighter is a small character scanner over Rust source. It knows
//! comments, string literals, numbers, keywords, primitive types and call
//! sites, which is all the catalogue snippets use.

use crate::catalog::AlgorithmDescriptor;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Highlight one line of Rust
pub fn highlight_rust(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut word = String::new();
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (at, c) = chars[i];

        if c == '/' && matches!(chars.get(i + 1), Some((_, '/'))) {
            flush_word(&mut word, &mut spans, None);
            spans.push(Span::styled(
                &line[at..],
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }

        if c == '"' {
            flush_word(&mut word, &mut spans, None);
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != '"' {
                end += if chars[end].1 == '\\' { 2 } else { 1 };
            }
            let stop = chars.get(end + 1).map_or(line.len(), |&(pos, _)| pos);
            spans.push(Span::styled(
                &line[at..stop.min(line.len())],
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end + 1;
            continue;
        }

        if c.is_alphanumeric() || c == '_' {
            word.push(c);
            i += 1;
            continue;
        }

        flush_word(&mut word, &mut spans, Some(c));
        let style = match c {
            '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
            '&' | '*' | '+' | '-' | '=' | '<' | '>' | '!' | '|' | '.' => {
                Style::default().fg(DEFAULT_THEME.secondary)
            }
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
        i += 1;
    }

    flush_word(&mut word, &mut spans, None);
    Line::from(spans)
}

fn flush_word(word: &mut String, spans: &mut Vec<Span<'_>>, next: Option<char>) {
    if !word.is_empty() {
        let style = word_style(word, matches!(next, Some('(') | Some('!')));
        spans.push(Span::styled(std::mem::take(word), style));
    }
}

fn word_style(word: &str, is_call: bool) -> Style {
    match word {
        "fn" | "let" | "mut" | "for" | "in" | "while" | "loop" | "if" | "else" | "return"
        | "break" | "continue" | "match" | "move" | "const" | "impl" | "pub" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "i64" | "u64" | "usize" | "bool" | "Vec" | "Self" | "Rng" | "Duration" => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        "true" | "false" => Style::default().fg(DEFAULT_THEME.number),
        _ if word.starts_with(|c: char| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if is_call => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the algorithm pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    descriptor: &AlgorithmDescriptor,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(format!(" {} ", descriptor.name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let mut lines = vec![
        Line::from(Span::styled(
            descriptor.description,
            Style::default().fg(DEFAULT_THEME.fg),
        )),
        Line::from(vec![
            Span::styled("time ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                descriptor.time_complexity,
                Style::default().fg(DEFAULT_THEME.success),
            ),
            Span::styled("  space ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                descriptor.space_complexity,
                Style::default().fg(DEFAULT_THEME.success),
            ),
        ]),
        Line::from(Span::styled(
            descriptor.reference,
            Style::default()
                .fg(DEFAULT_THEME.comment)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::default(),
    ];

    for (idx, line) in descriptor.code.lines().enumerate() {
        let mut spans = vec![Span::styled(
            format!("{:3} ", idx + 1),
            Style::default().fg(DEFAULT_THEME.comment),
        )];
        spans.extend(highlight_rust(line).spans);
        lines.push(Line::from(spans));
    }

    let visible = area.height.saturating_sub(2) as usize;
    *scroll = (*scroll).min(lines.len().saturating_sub(visible));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(*scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}
