//! Looping playback of a rendered signal through the default output device.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use resonix::SAMPLE_RATE;

/// Samples the oscilloscope ring can hold before the callback starts dropping.
const SCOPE_RING_SIZE: usize = 16_384;

/// Commands sent from the UI thread to the audio callback.
#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    TogglePlayback,
    Restart,
}

/// Playback state published by the audio callback.
#[derive(Debug, Default)]
pub struct Transport {
    position: AtomicUsize,
    playing: AtomicBool,
}

impl Transport {
    pub fn position(&self) -> usize {
        self.position.load(Ordering::Relaxed)
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }
}

/// An open output stream. Dropping it stops playback.
pub struct Player {
    _stream: cpal::Stream,
    control_tx: Producer<ControlMessage>,
    transport: Arc<Transport>,
}

impl Player {
    /// Open the default device at the crate's sample rate and start paused.
    ///
    /// Returns the player and the receiving end of the oscilloscope ring.
    pub fn open(samples: Arc<[f32]>) -> EyreResult<(Self, Consumer<f32>)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;

        // signals are never resampled, so the device has to run at SAMPLE_RATE
        let config = device
            .supported_output_configs()
            .wrap_err("failed to query output configs")?
            .filter(|range| range.sample_format() == cpal::SampleFormat::F32)
            .find_map(|range| range.try_with_sample_rate(cpal::SampleRate(SAMPLE_RATE)))
            .ok_or_else(|| eyre!("output device cannot play f32 at {SAMPLE_RATE} Hz"))?;
        let channels = config.channels() as usize;

        let (control_tx, mut control_rx) = RingBuffer::<ControlMessage>::new(64);
        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_RING_SIZE);
        let transport = Arc::new(Transport::default());

        let shared = transport.clone();
        let mut position = 0usize;
        let mut playing = false;

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    while let Ok(message) = control_rx.pop() {
                        match message {
                            ControlMessage::TogglePlayback => playing = !playing,
                            ControlMessage::Restart => position = 0,
                        }
                    }

                    for frame in data.chunks_mut(channels) {
                        let sample = match samples.get(position) {
                            Some(&sample) if playing => {
                                position = (position + 1) % samples.len();
                                // a full ring only means the UI is behind
                                let _ = scope_tx.push(sample);
                                sample
                            }
                            _ => 0.0,
                        };
                        // mono to every channel
                        frame.fill(sample);
                    }

                    shared.position.store(position, Ordering::Relaxed);
                    shared.playing.store(playing, Ordering::Relaxed);
                },
                |err| tracing::error!(%err, "audio stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        Ok((
            Self {
                _stream: stream,
                control_tx,
                transport,
            },
            scope_rx,
        ))
    }

    pub fn send(&mut self, message: ControlMessage) {
        // the callback drains the queue every period; a full queue drops the key press
        let _ = self.control_tx.push(message);
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}
