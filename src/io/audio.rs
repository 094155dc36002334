//! Audio file loading using Symphonia

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::config::AudioOptions;
use crate::error::{AnnotationError, Result};

/// Decoded audio
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    /// Interleaved samples in [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels in `samples`
    pub num_channels: usize,
}

impl AudioSignal {
    /// Number of frames (samples per channel)
    pub fn num_frames(&self) -> usize {
        if self.num_channels == 0 {
            0
        } else {
            self.samples.len() / self.num_channels
        }
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f64 / self.sample_rate as f64
    }
}

/// Decode an audio file to `f32` samples
///
/// Decodes the first track with a known codec. Corrupt packets are skipped.
///
/// # Errors
///
/// Returns `AnnotationError::Io` if the file cannot be opened and
/// `AnnotationError::Decoding` if it has no decodable audio track.
pub fn load_audio_file(path: impl AsRef<Path>, options: &AudioOptions) -> Result<AudioSignal> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let src = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    // Help the probe with the file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    // First track with a known codec
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AnnotationError::Decoding("No supported audio tracks found".to_string()))?;
    let track_id = track.id;
    // Header values, replaced by what the decoder reports
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut num_channels = track.codec_params.channels.map_or(0, |c| c.count());
    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f32> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(e) => return Err(e.into()),
        };
        // Packets from other tracks are skipped
        if packet.track_id() != track_id {
            continue;
        }
        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;
                num_channels = spec.channels.count();
                // Convert to interleaved f32
                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buffer.samples());
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                log::warn!("Skipping corrupt packet in {}: {}", path.display(), msg);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let mut signal = AudioSignal {
        samples,
        sample_rate,
        num_channels,
    };
    if options.mono && signal.num_channels > 1 {
        signal = downmix(&signal);
    }
    log::debug!(
        "Decoded {} frames at {} Hz, {} channel(s)",
        signal.num_frames(),
        signal.sample_rate,
        signal.num_channels
    );
    Ok(signal)
}

/// Average all channels into one
fn downmix(signal: &AudioSignal) -> AudioSignal {
    let channels = signal.num_channels;
    let samples = signal
        .samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();
    AudioSignal {
        samples,
        sample_rate: signal.sample_rate,
        num_channels: 1,
    }
}
