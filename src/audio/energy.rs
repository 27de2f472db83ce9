use rayon::prelude::*;

/// Per-block RMS energy of a mono signal.
#[derive(Clone, Debug, PartialEq)]
pub struct EnergyProfile {
    pub energies: Vec<f64>,
    /// Seconds covered by one block.
    pub block_duration: f64,
    pub average: f64,
}

/// Splits `samples` into whole blocks of `block_size` and takes the RMS of
/// each. A trailing partial block is dropped.
pub fn compute_energy(samples: &[f32], block_size: usize, sample_rate: u32) -> EnergyProfile {
    let energies: Vec<f64> = samples
        .par_chunks_exact(block_size)
        .map(block_rms)
        .collect();

    // Summed in block order so the average is identical between runs.
    let average = if energies.is_empty() {
        0.0
    } else {
        energies.iter().sum::<f64>() / energies.len() as f64
    };

    EnergyProfile {
        energies,
        block_duration: block_size as f64 / sample_rate as f64,
        average,
    }
}

pub fn block_rms(block: &[f32]) -> f64 {
    if block.is_empty() {
        return 0.0;
    }
    let sum: f64 = block.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / block.len() as f64).sqrt()
}
