//! Terminal viewer for a rendered signal
//!
//! Shows the signal's spectrum, a live oscilloscope fed by the audio callback
//! and a status bar. Without an output device the oscilloscope shows the
//! start of the buffer instead.

mod spectrum;
mod status;
mod waveform;

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use resonix::analysis::{AudioStats, Spectrum};
use rtrb::Consumer;

use crate::app::{ControlMessage, Player};
use crate::cli::Rendered;

use spectrum::{log_spaced, render_spectrum};
use status::{render_status, Status};
use waveform::render_waveform;

/// Samples shown in the oscilloscope
const SCOPE_LEN: usize = 1024;

pub struct ViewerApp {
    title: String,
    samples: Arc<[f32]>,
    stats: AudioStats,
    substitutions: usize,
    spectrum: Vec<(f64, f64)>,
    scope: Vec<f32>,
    scope_rx: Option<Consumer<f32>>,
    player: Option<Player>,
    audio_error: Option<String>,
    should_quit: bool,
}

impl ViewerApp {
    pub fn new(rendered: Rendered) -> Self {
        let title = rendered.title();
        let samples: Arc<[f32]> = rendered.signal.into_vec().into();

        let (player, scope_rx, audio_error) = match Player::open(samples.clone()) {
            Ok((player, scope_rx)) => (Some(player), Some(scope_rx), None),
            Err(err) => (None, None, Some(err.to_string())),
        };

        Self {
            title,
            stats: AudioStats::from_buffer(&samples),
            spectrum: log_spaced(&Spectrum::analyze(&samples)),
            scope: samples.iter().copied().take(SCOPE_LEN).collect(),
            samples,
            substitutions: rendered.substitutions,
            scope_rx,
            player,
            audio_error,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Append played samples, keeping the last SCOPE_LEN
    fn poll_scope(&mut self) {
        let Some(rx) = self.scope_rx.as_mut() else {
            return;
        };

        let available = rx.slots();
        if available == 0 {
            return;
        }
        if let Ok(chunk) = rx.read_chunk(available) {
            let (first, second) = chunk.as_slices();
            self.scope.extend_from_slice(first);
            self.scope.extend_from_slice(second);
            chunk.commit_all();
        }

        if self.scope.len() > SCOPE_LEN {
            let excess = self.scope.len() - SCOPE_LEN;
            self.scope.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.send(ControlMessage::TogglePlayback),
            KeyCode::Char('r') | KeyCode::Char('R') => self.send(ControlMessage::Restart),
            _ => {}
        }
    }

    fn send(&mut self, message: ControlMessage) {
        if let Some(player) = self.player.as_mut() {
            player.send(message);
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Spectrum
                Constraint::Length(10), // Waveform
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let (playing, position) = match &self.player {
            Some(player) => (
                player.transport().is_playing(),
                player.transport().position(),
            ),
            None => (false, 0),
        };

        let status = Status {
            title: &self.title,
            playing,
            position,
            len: self.samples.len(),
            stats: self.stats,
            substitutions: self.substitutions,
            audio_error: self.audio_error.as_deref(),
        };
        render_status(frame, chunks[0], &status);
        render_spectrum(frame, chunks[1], &self.spectrum);
        render_waveform(frame, chunks[2], &self.scope);

        let help = Paragraph::new(" [Q] Quit  [Space] Play/Pause  [R] Restart")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}

/// Take over the terminal until the user quits.
pub fn run(rendered: Rendered) -> EyreResult<()> {
    let mut app = ViewerApp::new(rendered);
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
