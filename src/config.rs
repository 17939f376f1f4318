//! TOML configuration for a filtering run.
//!
//! Every key is optional:
//!
//! ```toml
//! workers = 4              # default: one per available core
//! scheduling = "parallel"  # or "sequential"
//! jpeg_quality = 90
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::codec::DEFAULT_JPEG_QUALITY;
use crate::error::{Result, SobelError};
use crate::pipeline::Scheduling;

/// Settings for one run of the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Number of row partitions (and threads, when parallel).
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub scheduling: Scheduling,
    /// Quality for JPEG output, 1..=100.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_workers() -> usize {
    rayon::current_num_threads()
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            scheduling: Scheduling::default(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl PipelineConfig {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(SobelError::InvalidWorkerCount(self.workers));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SobelError::InvalidQuality(self.jpeg_quality));
        }
        Ok(())
    }
}

/// Parse a TOML string.
pub fn parse_config(content: &str, path: &Path) -> Result<PipelineConfig> {
    toml::from_str(content).map_err(|source| SobelError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and parse a TOML configuration file.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| SobelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<PipelineConfig> {
        parse_config(content, Path::new("test.toml"))
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert!(config.workers >= 1);
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.scheduling, Scheduling::Parallel);
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
            workers = 6
            scheduling = "sequential"
            jpeg_quality = 75
            "#,
        )
        .unwrap();
        assert_eq!(config.workers, 6);
        assert_eq!(config.scheduling, Scheduling::Sequential);
        assert_eq!(config.jpeg_quality, 75);
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            parse("threads = 4"),
            Err(SobelError::Config { .. })
        ));
    }

    #[test]
    fn test_bad_scheduling_rejected() {
        assert!(matches!(
            parse(r#"scheduling = "gpu""#),
            Err(SobelError::Config { .. })
        ));
    }

    #[test]
    fn test_validate_worker_count() {
        let config = parse("workers = 0").unwrap();
        assert!(matches!(
            config.validate(),
            Err(SobelError::InvalidWorkerCount(0))
        ));
    }

    #[test]
    fn test_validate_quality() {
        let config = parse("jpeg_quality = 0").unwrap();
        assert!(matches!(
            config.validate(),
            Err(SobelError::InvalidQuality(0))
        ));
        let config = parse("jpeg_quality = 101").unwrap();
        assert!(matches!(
            config.validate(),
            Err(SobelError::InvalidQuality(101))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/sobel.toml")).unwrap_err();
        assert!(matches!(err, SobelError::Io { .. }));
    }
}
