use serde::Serialize;

use super::describe::{EnergyLabel, TempoLabel};
use super::sections::Section;

/// Everything the plan generator needs to know about a track.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFeatures {
    /// Never 0: an undetermined tempo is reported as the configured default.
    pub bpm: u32,
    /// Share of inter-onset intervals that agreed with `bpm`, in [0, 1].
    pub beat_confidence: f64,
    /// Average block RMS, unnormalized.
    pub energy: f64,
    pub energy_label: EnergyLabel,
    /// `energy` projected onto [0, 1].
    pub intensity: f64,
    /// Seconds.
    pub duration: f64,
    pub tempo_label: TempoLabel,
    pub recommended_style: String,
    pub sections: Vec<Section>,
}
