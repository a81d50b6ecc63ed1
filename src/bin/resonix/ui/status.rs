//! Status bar widget - play state, position and level statistics

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use resonix::analysis::AudioStats;
use resonix::SAMPLE_RATE;

/// Everything the status bar shows, gathered once per frame
pub struct Status<'a> {
    pub title: &'a str,
    pub playing: bool,
    pub position: usize,
    pub len: usize,
    pub stats: AudioStats,
    pub substitutions: usize,
    /// Set when no output device could be opened
    pub audio_error: Option<&'a str>,
}

/// Render the status bar
pub fn render_status(frame: &mut Frame, area: Rect, status: &Status) {
    let block = Block::default()
        .title(format!(" {} ", status.title))
        .borders(Borders::ALL);

    let seconds = |samples: usize| samples as f64 / SAMPLE_RATE as f64;

    let transport = match status.audio_error {
        Some(_) => Span::styled("✕ No audio  ", Style::default().fg(Color::Red)),
        None if status.playing => Span::styled("▶ Playing  ", Style::default().fg(Color::Green)),
        None => Span::styled("⏸ Paused  ", Style::default().fg(Color::Yellow)),
    };

    let mut spans = vec![
        Span::raw(" "),
        transport,
        Span::styled(
            format!("{:.2} / {:.2} s  ", seconds(status.position), seconds(status.len)),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz  ", SAMPLE_RATE as f64 / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}  ", status.stats.peak, status.stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ];
    if status.substitutions > 0 {
        spans.push(Span::styled(
            format!("Recovered: {}", status.substitutions),
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(err) = status.audio_error {
        spans.push(Span::styled(err.to_string(), Style::default().fg(Color::DarkGray)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
