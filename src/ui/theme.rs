use crate::snapshot::StepKind;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub function: Color,
    pub type_name: Color,
    pub bar: Color,        // Untouched bar
    pub bar_sorted: Color, // Finalized bar
    pub bar_active: Color, // Primary active bar
    pub bar_partner: Color, // Secondary active bar
    pub bar_pivot: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    keyword: Color::Rgb(203, 166, 247),        // Mauve for keywords
    string: Color::Rgb(250, 179, 135),         // Orange for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    function: Color::Rgb(249, 226, 175),       // Yellow for functions
    type_name: Color::Rgb(148, 226, 213),      // Cyan/teal for type names
    bar: Color::Rgb(137, 180, 250),
    bar_sorted: Color::Rgb(166, 227, 161),
    bar_active: Color::Rgb(243, 139, 168),
    bar_partner: Color::Rgb(249, 226, 175),
    bar_pivot: Color::Rgb(203, 166, 247),
};

impl Theme {
    /// Narration colour for a step
    pub fn step_color(&self, kind: StepKind) -> Color {
        match kind {
            StepKind::Compare => self.bar_partner,
            StepKind::Swap | StepKind::Move => self.bar_active,
            StepKind::Scatter | StepKind::Gather => self.type_name,
            StepKind::Info => self.primary,
            StepKind::Success => self.success,
        }
    }
}
