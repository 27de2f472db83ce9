use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CodecRegistry, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::{Hint, Probe};

use super::decode::{DecodeSession, DecodedAudio, Decoder};
use crate::error::DecodeError;

/// Decodes in-memory audio with symphonia's bundled formats and codecs.
#[derive(Clone, Debug, Default)]
pub struct SymphoniaDecoder {
    extension: Option<String>,
}

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Passes a file extension (`"mp3"`, `"wav"`, ...) to the format probe.
    pub fn with_extension_hint(mut self, ext: impl Into<String>) -> Self {
        self.extension = Some(ext.into());
        self
    }
}

impl Decoder for SymphoniaDecoder {
    fn open(&self) -> Result<Box<dyn DecodeSession + '_>, DecodeError> {
        log::debug!("Opening symphonia decode session");
        Ok(Box::new(SymphoniaSession {
            probe: symphonia::default::get_probe(),
            codecs: symphonia::default::get_codecs(),
            extension: self.extension.as_deref(),
        }))
    }

    fn name(&self) -> &'static str {
        "symphonia"
    }
}

struct SymphoniaSession<'a> {
    probe: &'static Probe,
    codecs: &'static CodecRegistry,
    extension: Option<&'a str>,
}

impl Drop for SymphoniaSession<'_> {
    fn drop(&mut self) {
        log::debug!("Released symphonia decode session");
    }
}

impl DecodeSession for SymphoniaSession<'_> {
    fn decode(&mut self, bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = self.extension {
            hint.with_extension(ext);
        }

        let probed = self
            .probe
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| DecodeError::Format(format!("unrecognised audio format: {e}")))?;

        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| DecodeError::Format("no audio tracks found".into()))?;

        let track_id = track.id;
        let channel_count = track.codec_params.channels.map_or(1, |c| c.count());
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| DecodeError::Format("unknown sample rate".into()))?;
        if sample_rate == 0 {
            return Err(DecodeError::Format("sample rate of 0 Hz".into()));
        }

        let mut decoder = self
            .codecs
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| DecodeError::Format(format!("unsupported codec: {e}")))?;

        let mut channels: Vec<Vec<f32>> = vec![Vec::new(); channel_count];

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(DecodeError::Format(e.to_string())),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(e)) => {
                    log::warn!("Skipping corrupt packet: {}", e);
                    continue;
                }
                Err(e) => return Err(DecodeError::Format(e.to_string())),
            };

            let spec = *decoded.spec();
            let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);

            let stride = spec.channels.count().max(1);
            for frame in sample_buf.samples().chunks_exact(stride) {
                for (channel, sample) in channels.iter_mut().zip(frame) {
                    channel.push(*sample);
                }
            }
        }

        let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
        let duration = frames as f64 / sample_rate as f64;

        log::info!(
            "Decoded audio: {} frames x {} channels, {}Hz, {:.1}s",
            frames,
            channels.len(),
            sample_rate,
            duration
        );

        Ok(DecodedAudio {
            channels,
            sample_rate,
            duration,
        })
    }
}
