use crate::error::DecodeError;

/// Per-channel samples as produced by a decoder backend.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedAudio {
    pub channels: Vec<Vec<f32>>,
    pub sample_rate: u32,
    /// Seconds.
    pub duration: f64,
}

impl DecodedAudio {
    pub fn frames(&self) -> usize {
        self.channels.iter().map(Vec::len).min().unwrap_or(0)
    }
}

/// A source of decode sessions.
///
/// `open` acquires whatever the backend needs to decode a single stream and
/// fails with [`DecodeError::Unsupported`] when the host has no such
/// capability. The returned session releases that resource when dropped.
pub trait Decoder: Send + Sync {
    fn open(&self) -> Result<Box<dyn DecodeSession + '_>, DecodeError>;

    /// Backend name, for logging.
    fn name(&self) -> &'static str;
}

pub trait DecodeSession {
    fn decode(&mut self, bytes: &[u8]) -> Result<DecodedAudio, DecodeError>;
}

/// Stand-in for builds without a decoding backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedDecoder;

impl Decoder for UnsupportedDecoder {
    fn open(&self) -> Result<Box<dyn DecodeSession + '_>, DecodeError> {
        Err(DecodeError::Unsupported(
            "this build has no audio decoding backend enabled".into(),
        ))
    }

    fn name(&self) -> &'static str {
        "unsupported"
    }
}

#[cfg(feature = "symphonia")]
pub fn default_decoder() -> Box<dyn Decoder> {
    Box::new(super::backend::SymphoniaDecoder::new())
}

#[cfg(not(feature = "symphonia"))]
pub fn default_decoder() -> Box<dyn Decoder> {
    Box::new(UnsupportedDecoder)
}
