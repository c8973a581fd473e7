//! Main TUI application state and logic

use crate::catalog::{descriptor, AlgorithmDescriptor};
use crate::driver::{Player, PlayerError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Bounds for the auto-play delay
const MIN_DELAY_MS: u64 = 1;
const MAX_DELAY_MS: u64 = 2000;

/// Narration lines kept on screen
const NARRATION_TAIL: usize = 64;

/// The main application state
pub struct App {
    /// Playback over the current run
    pub player: Player,

    /// Catalogue entry of the algorithm being shown
    pub descriptor: &'static AlgorithmDescriptor,

    /// Scroll offset of the algorithm pane
    pub source_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Delay between steps in play mode
    pub delay: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(player: Player, delay: Duration) -> Self {
        let descriptor = descriptor(player.algorithm());
        App {
            player,
            descriptor,
            source_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            delay,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= self.delay {
                self.tick();
                self.last_play_time = Instant::now();
            }

            // Poll no longer than the play delay so fast playback stays fast
            let poll = self.delay.min(Duration::from_millis(50));
            if event::poll(poll)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// One auto-play step
    fn tick(&mut self) {
        match self.player.step_forward() {
            Ok(()) => {
                self.status_message = "Playing...".to_string();
                if let Some(hz) = self.player.current_tone() {
                    debug!(hz, step = self.player.step(), "tone");
                }
            }
            Err(PlayerError::AtEnd) => {
                self.is_playing = false;
                self.status_message = "Playback complete".to_string();
            }
            Err(e) => {
                self.is_playing = false;
                self.status_message = e.to_string();
            }
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(55),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        // Bottom row: Narration | Auxiliary | Algorithm
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(20),
                Constraint::Percentage(40),
            ])
            .split(main_chunks[1]);

        let current = self.player.current();

        super::panes::render_bars_pane(
            frame,
            main_chunks[0],
            self.descriptor.name(),
            self.player.array(),
            current,
        );

        super::panes::render_narration_pane(
            frame,
            bottom[0],
            &self.player.recent(NARRATION_TAIL),
        );

        super::panes::render_counts_pane(frame, bottom[1], current);

        super::panes::render_source_pane(
            frame,
            bottom[2],
            self.descriptor,
            &mut self.source_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            self.player.step(),
            self.player.total_steps(),
            self.badge(),
            self.delay.as_millis() as u64,
            self.player.history_usage(),
        );
    }

    fn badge(&self) -> super::panes::PlaybackBadge {
        use super::panes::PlaybackBadge;

        if self.is_playing {
            PlaybackBadge::Playing
        } else if self.player.is_finished() {
            PlaybackBadge::End
        } else if self.player.is_at_start() {
            PlaybackBadge::Start
        } else {
            PlaybackBadge::Paused
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                self.status_message = match self.player.step_forward_by(n) {
                    Ok(stepped) => format!("Stepped forward {} step(s)", stepped),
                    Err(e) => e.to_string(),
                };
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.status_message = match self.player.step_backward() {
                    Ok(()) => "Stepped backward".to_string(),
                    Err(e) => format!("Cannot step backward: {}", e),
                };
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.status_message = match self.player.step_forward() {
                    Ok(()) => "Stepped forward".to_string(),
                    Err(e) => format!("Cannot step forward: {}", e),
                };
            }
            KeyCode::Up => {
                self.source_scroll = self.source_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                self.source_scroll = self.source_scroll.saturating_add(1);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.set_delay(self.delay.as_millis() as u64 / 2);
            }
            KeyCode::Char('-') => {
                self.set_delay(self.delay.as_millis() as u64 * 2);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing && !self.player.is_finished();
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(self.delay)
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.status_message = match self.player.jump_to_end() {
                    Ok(()) => "Jumped to end".to_string(),
                    Err(e) => e.to_string(),
                };
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.player.jump_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.is_playing = false;
                self.status_message = match self.player.reset() {
                    Ok(()) => "Reset".to_string(),
                    Err(e) => e.to_string(),
                };
            }
            _ => {}
        }
    }

    fn set_delay(&mut self, ms: u64) {
        self.delay = Duration::from_millis(ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS));
        self.status_message = format!("Delay {} ms", self.delay.as_millis());
    }
}
