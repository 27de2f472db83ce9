use serde::Serialize;

use super::energy::block_rms;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Section {
    pub start: f64,
    pub end: f64,
    /// RMS over the section's samples.
    pub intensity: f64,
}

/// Cuts the track into `count` equal-duration sections.
///
/// Each section but the last covers `len / count` samples; the last one
/// absorbs the remainder. Time boundaries come from `duration / count`
/// directly, and the last section always ends at `duration`.
pub fn build_sections(samples: &[f32], duration: f64, count: usize) -> Vec<Section> {
    if count == 0 {
        return Vec::new();
    }

    let samples_per_section = samples.len() / count;
    let step = duration / count as f64;

    (0..count)
        .map(|index| {
            let last = index == count - 1;
            let start_sample = index * samples_per_section;
            let end_sample = if last {
                samples.len()
            } else {
                start_sample + samples_per_section
            };

            Section {
                start: step * index as f64,
                end: if last { duration } else { step * (index + 1) as f64 },
                intensity: block_rms(&samples[start_sample..end_sample]),
            }
        })
        .collect()
}
