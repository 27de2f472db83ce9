use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::AnalysisError;

/// Samples per energy block.
pub const BLOCK_SIZE: usize = 1024;
/// Trailing window for the onset threshold, about one second at 1024 / 44.1 kHz.
pub const HISTORY_SIZE: usize = 43;
pub const SENSITIVITY: f64 = 1.35;
pub const SECTION_COUNT: usize = 6;
/// Average block energy that maps to full intensity. Empirical.
pub const INTENSITY_CEILING: f64 = 0.7;
/// Reported when no tempo could be estimated.
pub const DEFAULT_BPM: u32 = 104;
pub const MIN_BPM: u32 = 60;
pub const MAX_BPM: u32 = 190;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
    #[serde(default = "default_section_count")]
    pub section_count: usize,
    #[serde(default = "default_intensity_ceiling")]
    pub intensity_ceiling: f64,
    #[serde(default = "default_bpm")]
    pub default_bpm: u32,
    #[serde(default = "default_min_bpm")]
    pub min_bpm: u32,
    #[serde(default = "default_max_bpm")]
    pub max_bpm: u32,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            history_size: default_history_size(),
            sensitivity: default_sensitivity(),
            section_count: default_section_count(),
            intensity_ceiling: default_intensity_ceiling(),
            default_bpm: default_bpm(),
            min_bpm: default_min_bpm(),
            max_bpm: default_max_bpm(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: false,
        }
    }
}

impl AnalysisConfig {
    /// Rejects values that leave the pipeline undefined (empty blocks, empty
    /// windows, zero sections, an empty BPM range).
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let invalid = |msg: &str| Err(AnalysisError::InvalidConfig(msg.to_string()));

        if self.block_size == 0 {
            return invalid("block_size must be at least 1");
        }
        if self.history_size == 0 {
            return invalid("history_size must be at least 1");
        }
        if self.section_count == 0 {
            return invalid("section_count must be at least 1");
        }
        if self.sensitivity.is_nan() || self.sensitivity <= 0.0 {
            return invalid("sensitivity must be positive");
        }
        if self.intensity_ceiling.is_nan() || self.intensity_ceiling <= 0.0 {
            return invalid("intensity_ceiling must be positive");
        }
        if self.min_bpm == 0 || self.min_bpm > self.max_bpm {
            return invalid("min_bpm must be positive and not above max_bpm");
        }
        Ok(())
    }
}

fn default_block_size() -> usize { BLOCK_SIZE }
fn default_history_size() -> usize { HISTORY_SIZE }
fn default_sensitivity() -> f64 { SENSITIVITY }
fn default_section_count() -> usize { SECTION_COUNT }
fn default_intensity_ceiling() -> f64 { INTENSITY_CEILING }
fn default_bpm() -> u32 { DEFAULT_BPM }
fn default_min_bpm() -> u32 { MIN_BPM }
fn default_max_bpm() -> u32 { MAX_BPM }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Option<Config> {
    match toml::from_str(content) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring malformed config: {}", e);
            None
        }
    }
}

/// Explicit path first, then `./beatcoach.toml`, then the user config dirs.
pub fn find_config(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let local = PathBuf::from("beatcoach.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("beatcoach").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("beatcoach").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    })
}
