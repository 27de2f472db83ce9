use super::decode::{default_decoder, DecodedAudio, Decoder};
use super::describe::{describe_energy, describe_tempo, normalize_intensity};
use super::energy::compute_energy;
use super::features::AudioFeatures;
use super::mix::mix_to_mono;
use super::onset::detect_onsets;
use super::sections::build_sections;
use super::tempo::estimate_tempo;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, DecodeError};

/// Runs the decode boundary followed by the feature pipeline.
pub struct FeatureExtractor {
    decoder: Box<dyn Decoder>,
    config: AnalysisConfig,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(default_decoder(), AnalysisConfig::default())
    }
}

impl FeatureExtractor {
    pub fn new(decoder: Box<dyn Decoder>, config: AnalysisConfig) -> Self {
        Self { decoder, config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Decodes `bytes` and extracts features from the result.
    ///
    /// The decode session is dropped before this returns, whether decoding
    /// succeeded or not.
    pub fn extract(&self, bytes: &[u8]) -> Result<AudioFeatures, AnalysisError> {
        self.config.validate()?;

        log::info!("Decoding {} bytes with {}...", bytes.len(), self.decoder.name());
        let decoded = {
            let mut session = self.decoder.open()?;
            session.decode(bytes)?
        };

        analyze_decoded(&decoded, &self.config)
    }
}

/// The synchronous part of the pipeline, on already-decoded audio.
pub fn analyze_decoded(
    audio: &DecodedAudio,
    config: &AnalysisConfig,
) -> Result<AudioFeatures, AnalysisError> {
    config.validate()?;
    if audio.sample_rate == 0 {
        return Err(DecodeError::Format("sample rate of 0 Hz".into()).into());
    }

    let mono = mix_to_mono(&audio.channels)?;
    if mono.is_empty() {
        return Err(AnalysisError::EmptySignal);
    }

    log::info!("Pass 1: Block energy (block={})...", config.block_size);
    let profile = compute_energy(&mono, config.block_size, audio.sample_rate);

    log::info!("Pass 2: Onsets over {} blocks...", profile.energies.len());
    let onsets = detect_onsets(&profile, config.history_size, config.sensitivity);
    let tempo = estimate_tempo(&onsets, config.min_bpm, config.max_bpm);

    let bpm = if tempo.bpm == 0 {
        log::debug!("No tempo detected, reporting {} BPM", config.default_bpm);
        config.default_bpm
    } else {
        tempo.bpm
    };

    log::info!("Pass 3: {} sections...", config.section_count);
    let sections = build_sections(&mono, audio.duration, config.section_count);

    let intensity = normalize_intensity(profile.average, config.intensity_ceiling);
    let (tempo_label, style) = describe_tempo(bpm);
    let energy_label = describe_energy(intensity);

    log::info!(
        "Features: onsets={}, tempo={} BPM (confidence {:.2}), energy={:.4} ({})",
        onsets.len(),
        bpm,
        tempo.confidence,
        profile.average,
        energy_label.as_str()
    );

    Ok(AudioFeatures {
        bpm,
        beat_confidence: tempo.confidence,
        energy: profile.average,
        energy_label,
        intensity,
        duration: audio.duration,
        tempo_label,
        recommended_style: style.to_string(),
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::decode::{DecodeSession, UnsupportedDecoder};
    use crate::audio::describe::{EnergyLabel, TempoLabel};
    use crate::audio::test_support::click_track;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeDecoder {
        result: Result<DecodedAudio, DecodeError>,
        opened: Arc<AtomicUsize>,
        released: Arc<AtomicUsize>,
    }

    struct FakeSession {
        result: Result<DecodedAudio, DecodeError>,
        released: Arc<AtomicUsize>,
    }

    impl FakeDecoder {
        fn new(result: Result<DecodedAudio, DecodeError>) -> Self {
            Self {
                result,
                opened: Arc::new(AtomicUsize::new(0)),
                released: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl Decoder for FakeDecoder {
        fn open(&self) -> Result<Box<dyn DecodeSession + '_>, DecodeError> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FakeSession {
                result: self.result.clone(),
                released: self.released.clone(),
            }))
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    impl DecodeSession for FakeSession {
        fn decode(&mut self, _bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
            self.result.clone()
        }
    }

    impl Drop for FakeSession {
        fn drop(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn mono(samples: Vec<f32>, sample_rate: u32) -> DecodedAudio {
        let duration = samples.len() as f64 / sample_rate as f64;
        DecodedAudio {
            channels: vec![samples],
            sample_rate,
            duration,
        }
    }

    #[test]
    fn silence_reports_default_tempo_and_soft_energy() {
        let audio = mono(vec![0.0; 44_100 * 3], 44_100);
        let features = analyze_decoded(&audio, &AnalysisConfig::default()).unwrap();

        assert_eq!(features.bpm, 104);
        assert_eq!(features.beat_confidence, 0.0);
        assert_eq!(features.energy, 0.0);
        assert_eq!(features.intensity, 0.0);
        assert_eq!(features.energy_label, EnergyLabel::Soft);
        assert_eq!(features.tempo_label, TempoLabel::Medium);
        assert_eq!(features.recommended_style, "hip-hop groove");
        assert_eq!(features.sections.len(), 6);
        assert_eq!(features.sections[5].end, features.duration);
    }

    #[test]
    fn click_track_tempo_is_detected() {
        // A click every 22 blocks of 1024 at 44.1 kHz is about 117.45 BPM.
        let audio = mono(click_track(400, 1024, 22), 44_100);
        let features = analyze_decoded(&audio, &AnalysisConfig::default()).unwrap();

        assert_eq!(features.bpm, 117);
        assert_eq!(features.beat_confidence, 1.0);
        assert_eq!(features.tempo_label, TempoLabel::Fast);
        assert_eq!(features.recommended_style, "commercial hip-hop");
    }

    #[test]
    fn stereo_is_mixed_before_analysis() {
        let left = click_track(400, 1024, 22);
        let right = left.clone();
        let audio = DecodedAudio {
            duration: left.len() as f64 / 44_100.0,
            channels: vec![left.clone(), right],
            sample_rate: 44_100,
        };
        let stereo = analyze_decoded(&audio, &AnalysisConfig::default()).unwrap();
        let single = analyze_decoded(&mono(left, 44_100), &AnalysisConfig::default()).unwrap();
        assert_eq!(stereo, single);
    }

    #[test]
    fn loud_signal_is_powerful_and_clamped() {
        let audio = mono(vec![0.95; 44_100], 44_100);
        let features = analyze_decoded(&audio, &AnalysisConfig::default()).unwrap();
        assert_eq!(features.intensity, 1.0);
        assert_eq!(features.energy_label, EnergyLabel::Powerful);
        assert!(features.energy > 0.9);
    }

    #[test]
    fn extraction_is_repeatable() {
        let decoder = FakeDecoder::new(Ok(mono(click_track(300, 1024, 20), 44_100)));
        let extractor = FeatureExtractor::new(Box::new(decoder), AnalysisConfig::default());

        let first = extractor.extract(b"bytes").unwrap();
        let second = extractor.extract(b"bytes").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn corrupt_input_still_releases_the_session() {
        let decoder = FakeDecoder::new(Err(DecodeError::Format("bad header".into())));
        let opened = decoder.opened.clone();
        let released = decoder.released.clone();
        let extractor = FeatureExtractor::new(Box::new(decoder), AnalysisConfig::default());

        let err = extractor.extract(b"garbage").unwrap_err();
        assert!(matches!(err, AnalysisError::Decode(DecodeError::Format(_))));
        assert_eq!(opened.load(Ordering::SeqCst), 1);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn successful_extraction_releases_the_session() {
        let decoder = FakeDecoder::new(Ok(mono(vec![0.1; 8192], 44_100)));
        let released = decoder.released.clone();
        let extractor = FeatureExtractor::new(Box::new(decoder), AnalysisConfig::default());

        extractor.extract(b"ok").unwrap();
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_decodes_are_empty_signal() {
        let no_channels = DecodedAudio {
            channels: vec![],
            sample_rate: 44_100,
            duration: 0.0,
        };
        let no_samples = mono(vec![], 44_100);
        for audio in [no_channels, no_samples] {
            let extractor = FeatureExtractor::new(
                Box::new(FakeDecoder::new(Ok(audio))),
                AnalysisConfig::default(),
            );
            assert_eq!(extractor.extract(b"x"), Err(AnalysisError::EmptySignal));
        }
    }

    #[test]
    fn missing_backend_is_unsupported() {
        let extractor = FeatureExtractor::new(Box::new(UnsupportedDecoder), AnalysisConfig::default());
        assert!(matches!(
            extractor.extract(b"x"),
            Err(AnalysisError::Decode(DecodeError::Unsupported(_)))
        ));
    }

    #[test]
    fn invalid_config_fails_before_decoding() {
        let decoder = FakeDecoder::new(Ok(mono(vec![0.1; 8192], 44_100)));
        let opened = decoder.opened.clone();
        let config = AnalysisConfig {
            block_size: 0,
            ..Default::default()
        };
        let extractor = FeatureExtractor::new(Box::new(decoder), config);

        assert!(matches!(extractor.extract(b"x"), Err(AnalysisError::InvalidConfig(_))));
        assert_eq!(opened.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn output_uses_consumer_field_names() {
        let features = analyze_decoded(&mono(vec![0.0; 4096], 8000), &AnalysisConfig::default()).unwrap();
        let json = serde_json::to_value(&features).unwrap();
        for key in [
            "bpm",
            "beatConfidence",
            "energy",
            "energyLabel",
            "intensity",
            "duration",
            "tempoLabel",
            "recommendedStyle",
            "sections",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["energyLabel"], "soft");
        assert_eq!(json["sections"][0]["start"], 0.0);
    }

    #[cfg(feature = "symphonia")]
    #[test]
    fn wav_bytes_run_through_the_full_pipeline() {
        use crate::audio::backend::SymphoniaDecoder;
        use crate::audio::test_support::wav_bytes;

        let pcm: Vec<i16> = click_track(400, 1024, 22)
            .into_iter()
            .map(|s| (s * 32767.0) as i16)
            .collect();
        let bytes = wav_bytes(1, 44_100, &pcm);

        let extractor = FeatureExtractor::new(
            Box::new(SymphoniaDecoder::new().with_extension_hint("wav")),
            AnalysisConfig::default(),
        );
        let features = extractor.extract(&bytes).unwrap();
        assert_eq!(features.bpm, 117);
        assert!((features.duration - 400.0 * 1024.0 / 44_100.0).abs() < 1e-9);
        assert_eq!(features.sections.last().map(|s| s.end), Some(features.duration));
    }

    #[cfg(feature = "symphonia")]
    #[test]
    fn corrupt_bytes_through_symphonia_are_a_format_error() {
        let extractor = FeatureExtractor::default();
        assert!(matches!(
            extractor.extract(b"RIFF....not really"),
            Err(AnalysisError::Decode(DecodeError::Format(_)))
        ));
    }
}
