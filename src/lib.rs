//! Rhythm and energy features for dance-plan generation.
//!
//! [`extract_features`] decodes an audio file held in memory, mixes it to
//! mono and derives tempo, beat confidence, overall energy and a coarse
//! intensity timeline from it.

pub mod audio;
pub mod config;
pub mod error;

pub use audio::analysis::{analyze_decoded, FeatureExtractor};
pub use audio::decode::{default_decoder, DecodeSession, DecodedAudio, Decoder};
pub use audio::features::AudioFeatures;
pub use config::AnalysisConfig;
pub use error::{AnalysisError, DecodeError};

/// Extracts features with the default decoder and configuration.
pub fn extract_features(bytes: &[u8]) -> Result<AudioFeatures, AnalysisError> {
    FeatureExtractor::default().extract(bytes)
}
