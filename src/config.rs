use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AlignError;

/// What to do when accepted anchors are not increasing on the Hebrew side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonotonicityPolicy {
    /// Fail the run with [`AlignError::AnchorOrder`].
    #[default]
    Abort,
    /// Keep the longest run of anchors with increasing Hebrew positions.
    DropOffending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Aligner look-ahead past the current cursor.
    pub words_dist: usize,
    /// Half-width of the local window used to vet anchors.
    pub sub_match_range: usize,
    /// Fraction of the local window that must align, on both sides, to accept an anchor.
    pub sub_match_pct: f64,
    /// Upper bound on candidates generated for a single word.
    pub max_candidates: usize,
    pub monotonicity: MonotonicityPolicy,
    /// Remove hidden sentinels from the Hebrew side before anchoring.
    pub strip_hidden: bool,
}

impl AlignConfig {
    pub const DEFAULT_WORDS_DIST: usize = 10;
    pub const DEFAULT_SUB_MATCH_RANGE: usize = 5;
    pub const DEFAULT_SUB_MATCH_PCT: f64 = 0.75;
    pub const DEFAULT_MAX_CANDIDATES: usize = 1 << 16;

    pub fn from_json_str(data: &str) -> Result<Self, AlignError> {
        let config: Self =
            serde_json::from_str(data).map_err(|e| AlignError::json("parse align config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, AlignError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| AlignError::io("read align config", e))?;
        Self::from_json_str(&data)
    }

    pub fn validate(&self) -> Result<(), AlignError> {
        if !(0.0..=1.0).contains(&self.sub_match_pct) {
            return Err(AlignError::invalid_config(format!(
                "sub_match_pct must be within [0, 1], got {}",
                self.sub_match_pct
            )));
        }
        if self.max_candidates == 0 {
            return Err(AlignError::invalid_config("max_candidates must be positive"));
        }
        Ok(())
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            words_dist: Self::DEFAULT_WORDS_DIST,
            sub_match_range: Self::DEFAULT_SUB_MATCH_RANGE,
            sub_match_pct: Self::DEFAULT_SUB_MATCH_PCT,
            max_candidates: Self::DEFAULT_MAX_CANDIDATES,
            monotonicity: MonotonicityPolicy::Abort,
            strip_hidden: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_config_default() {
        let config = AlignConfig::default();
        assert_eq!(config.words_dist, 10);
        assert_eq!(config.sub_match_range, 5);
        assert_eq!(config.sub_match_pct, 0.75);
        assert_eq!(config.max_candidates, 65_536);
        assert_eq!(config.monotonicity, MonotonicityPolicy::Abort);
        assert!(config.strip_hidden);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            AlignConfig::from_json_str(r#"{"words_dist": 4, "monotonicity": "drop_offending"}"#)
                .expect("valid config json");
        assert_eq!(config.words_dist, 4);
        assert_eq!(config.monotonicity, MonotonicityPolicy::DropOffending);
        assert_eq!(config.sub_match_range, AlignConfig::DEFAULT_SUB_MATCH_RANGE);
    }

    #[test]
    fn out_of_range_pct_is_rejected() {
        let err = AlignConfig::from_json_str(r#"{"sub_match_pct": 1.5}"#).unwrap_err();
        assert!(matches!(err, AlignError::InvalidConfig { .. }));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = AlignConfig::from_json_str("{words_dist:").unwrap_err();
        assert!(matches!(err, AlignError::Json { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AlignConfig::load(Path::new("/nonexistent/align.json")).unwrap_err();
        assert!(matches!(err, AlignError::Io { .. }));
    }
}
