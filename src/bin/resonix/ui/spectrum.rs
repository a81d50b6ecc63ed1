//! Spectrum widget
//!
//! Log-spaced magnitude readout of the whole rendered signal, in dB.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use resonix::analysis::Spectrum;
use resonix::NYQUIST_HZ;

/// Number of points plotted between 20 Hz and 20 kHz
const SPECTRUM_BINS: usize = 96;

/// Display floor in dB
const FLOOR_DB: f64 = -100.0;

/// Sample `spectrum` at log-spaced frequencies.
///
/// Points are `(log10(frequency_hz), magnitude_db)` so the chart's x axis is
/// logarithmic.
pub fn log_spaced(spectrum: &Spectrum) -> Vec<(f64, f64)> {
    let min_freq = 20.0f64;
    let max_freq = (NYQUIST_HZ as f64).min(20_000.0);
    let ratio = max_freq / min_freq;
    // each point covers the FFT bins halfway to its neighbours
    let half_step = ratio.powf(0.5 / (SPECTRUM_BINS - 1) as f64);
    let magnitudes = spectrum.magnitudes();

    (0..SPECTRUM_BINS)
        .map(|i| {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = min_freq * ratio.powf(t);
            let lo = spectrum.bin_of(freq / half_step);
            let hi = spectrum.bin_of(freq * half_step);
            let magnitude = magnitudes
                .get(lo..=hi)
                .map(|band| band.iter().copied().fold(0.0, f64::max))
                .unwrap_or(0.0)
                .max(1e-9);
            (freq.log10(), (20.0 * magnitude.log10()).max(FLOOR_DB))
        })
        .collect()
}

/// Render the spectrum chart
pub fn render_spectrum(frame: &mut Frame, area: Rect, points: &[(f64, f64)]) {
    let block = Block::default()
        .title(" Spectrum ")
        .borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([20.0f64.log10(), 20_000.0f64.log10()])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
