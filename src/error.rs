use thiserror::Error;

/// Failures at the decode boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// No decoding capability is available on this host.
    #[error("audio decoding is not supported here: {0}")]
    Unsupported(String),
    #[error("could not decode audio ({0}); try a different file or a format such as WAV, MP3 or FLAC")]
    Format(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("the audio decoded successfully but contains no samples")]
    EmptySignal,
    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(String),
}
