use super::energy::EnergyProfile;

/// Adaptive-threshold onset detection over block energies.
///
/// Block `i` is an onset when its energy exceeds the mean of the preceding
/// `history_size` blocks times `sensitivity`. The first `history_size`
/// blocks never qualify, and adjacent blocks may both be flagged.
pub fn detect_onsets(profile: &EnergyProfile, history_size: usize, sensitivity: f64) -> Vec<f64> {
    let energies = &profile.energies;
    if history_size == 0 || energies.len() <= history_size {
        return Vec::new();
    }

    let mut onsets = Vec::new();
    for i in history_size..energies.len() {
        let window = &energies[i - history_size..i];
        let mean = window.iter().sum::<f64>() / window.len() as f64;

        if energies[i] > mean * sensitivity {
            onsets.push(i as f64 * profile.block_duration);
        }
    }
    onsets
}
