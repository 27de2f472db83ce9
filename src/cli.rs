use clap::Parser;
use std::path::PathBuf;

use beatcoach::config::{OutputFormat, BLOCK_SIZE, SECTION_COUNT, SENSITIVITY};

#[derive(Parser, Debug)]
#[command(name = "beatcoach", about = "Tempo, energy and section analysis for dance practice tracks")]
pub struct Cli {
    /// Input audio files (WAV, MP3, FLAC, OGG, AAC)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Config file (defaults to beatcoach.toml or the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Onset threshold as a multiple of the trailing average energy
    #[arg(long, default_value_t = SENSITIVITY)]
    pub sensitivity: f64,

    /// Number of intensity sections
    #[arg(long, default_value_t = SECTION_COUNT)]
    pub sections: usize,

    /// Samples per energy block
    #[arg(long, default_value_t = BLOCK_SIZE)]
    pub block_size: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}
