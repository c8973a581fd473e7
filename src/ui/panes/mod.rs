//! TUI pane rendering modules
//!
//! Each pane is a stateless `render_*` function over data borrowed from the
//! [`App`](crate::ui::App):
//!
//! - [`bars`]: the working array as a bar chart, coloured by step role
//! - [`narration`]: step descriptions coloured by step kind
//! - [`counts`]: the auxiliary table of distribution sorts
//! - [`source`]: catalogue entry with a highlighted reference implementation
//! - [`status`]: step counter, keybindings and playback badge

pub mod bars;
pub mod counts;
pub mod narration;
pub mod source;
pub mod status;

pub use bars::render_bars_pane;
pub use counts::render_counts_pane;
pub use narration::render_narration_pane;
pub use source::render_source_pane;
pub use status::{render_status_bar, PlaybackBadge};
