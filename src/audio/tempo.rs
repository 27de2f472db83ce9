use serde::Serialize;

/// Histogram-mode tempo estimate. `bpm` is 0 when undetermined.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TempoEstimate {
    pub bpm: u32,
    pub confidence: f64,
}

impl TempoEstimate {
    pub const UNKNOWN: Self = Self {
        bpm: 0,
        confidence: 0.0,
    };
}

/// Votes each inter-onset interval into a clamped BPM bucket and returns the
/// most common bucket with its share of the votes.
///
/// On ties the bucket that was seen first wins.
pub fn estimate_tempo(onsets: &[f64], min_bpm: u32, max_bpm: u32) -> TempoEstimate {
    if onsets.len() < 2 {
        return TempoEstimate::UNKNOWN;
    }

    let candidates: Vec<u32> = onsets
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|&interval| interval > 0.0)
        .map(|interval| (60.0 / interval).round().clamp(min_bpm as f64, max_bpm as f64) as u32)
        .collect();

    // Insertion-ordered histogram; there are at most max-min+1 buckets.
    let mut histogram: Vec<(u32, usize)> = Vec::new();
    for bpm in &candidates {
        match histogram.iter_mut().find(|(b, _)| b == bpm) {
            Some((_, count)) => *count += 1,
            None => histogram.push((*bpm, 1)),
        }
    }

    let mut best = (0u32, 0usize);
    for &(bpm, count) in &histogram {
        if count > best.1 {
            best = (bpm, count);
        }
    }

    let confidence = if candidates.is_empty() {
        0.0
    } else {
        (best.1 as f64 / candidates.len() as f64).clamp(0.0, 1.0)
    };

    TempoEstimate {
        bpm: best.0,
        confidence,
    }
}
