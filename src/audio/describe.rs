use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TempoLabel {
    Slow,
    Medium,
    Fast,
    VeryFast,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnergyLabel {
    Soft,
    Balanced,
    Powerful,
}

impl TempoLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            TempoLabel::Slow => "slow",
            TempoLabel::Medium => "medium",
            TempoLabel::Fast => "fast",
            TempoLabel::VeryFast => "very-fast",
        }
    }
}

impl EnergyLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            EnergyLabel::Soft => "soft",
            EnergyLabel::Balanced => "balanced",
            EnergyLabel::Powerful => "powerful",
        }
    }
}

/// Tempo class and a matching dance style.
pub fn describe_tempo(bpm: u32) -> (TempoLabel, &'static str) {
    match bpm {
        0 => (TempoLabel::Medium, "groove"),
        1..=89 => (TempoLabel::Slow, "lyrical contemporary"),
        90..=109 => (TempoLabel::Medium, "hip-hop groove"),
        110..=134 => (TempoLabel::Fast, "commercial hip-hop"),
        _ => (TempoLabel::VeryFast, "street jazz / house"),
    }
}

pub fn describe_energy(intensity: f64) -> EnergyLabel {
    if intensity < 0.25 {
        EnergyLabel::Soft
    } else if intensity < 0.55 {
        EnergyLabel::Balanced
    } else {
        EnergyLabel::Powerful
    }
}

/// Projects raw average energy onto [0, 1].
pub fn normalize_intensity(average_energy: f64, ceiling: f64) -> f64 {
    (average_energy / ceiling).clamp(0.0, 1.0)
}
