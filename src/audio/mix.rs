use crate::error::AnalysisError;

/// Averages all channels into one mono signal.
///
/// Channels of unequal length are truncated to the shortest one.
pub fn mix_to_mono(channels: &[Vec<f32>]) -> Result<Vec<f32>, AnalysisError> {
    let first = channels.first().ok_or(AnalysisError::EmptySignal)?;
    if channels.len() == 1 {
        return Ok(first.clone());
    }

    let len = channels.iter().map(Vec::len).min().unwrap_or(0);
    let mut mono = first[..len].to_vec();
    for ch in &channels[1..] {
        for (acc, v) in mono.iter_mut().zip(ch) {
            *acc += *v;
        }
    }

    let count = channels.len() as f32;
    for v in &mut mono {
        *v /= count;
    }
    Ok(mono)
}
