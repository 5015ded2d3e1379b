use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{env, time::Duration};

pub const BASE_DURATION_ENV: &str = "ROD_LOGIC_BASE_DURATION_MS";
pub const FRAME_INTERVAL_ENV: &str = "ROD_LOGIC_FRAME_INTERVAL_MS";

/// Timing of a sequence run.
///
/// A leaf with duration scale `s` animates for `s * base_duration_ms`
/// milliseconds, emitting one progress update per frame interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
  pub base_duration_ms: u64,
  pub frame_interval_ms: u64,
}

impl Default for RunnerConfig {
  fn default() -> Self {
    RunnerConfig {
      base_duration_ms: 500,
      frame_interval_ms: 16,
    }
  }
}

impl RunnerConfig {
  pub fn with_base_duration(mut self, base_duration: Duration) -> Self {
    self.base_duration_ms = u64::try_from(base_duration.as_millis()).unwrap_or(u64::MAX);
    self
  }

  pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
    self.frame_interval_ms = u64::try_from(frame_interval.as_millis()).unwrap_or(u64::MAX);
    self
  }

  pub fn base_duration(&self) -> Duration {
    Duration::from_millis(self.base_duration_ms)
  }

  pub fn frame_interval(&self) -> Duration {
    Duration::from_millis(self.frame_interval_ms)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.frame_interval_ms == 0 {
      return Err(ConfigError::Invalid(
        "frame interval must be at least 1ms".to_string(),
      ));
    }
    Ok(())
  }

  /// Defaults overridden by `ROD_LOGIC_*` environment variables.
  pub fn from_env() -> Result<Self, ConfigError> {
    let mut config = RunnerConfig::default();
    if let Some(ms) = read_millis(BASE_DURATION_ENV)? {
      config.base_duration_ms = ms;
    }
    if let Some(ms) = read_millis(FRAME_INTERVAL_ENV)? {
      config.frame_interval_ms = ms;
    }
    config.validate()?;
    Ok(config)
  }
}

fn read_millis(var: &str) -> Result<Option<u64>, ConfigError> {
  match env::var(var) {
    Ok(value) => value
      .trim()
      .parse::<u64>()
      .map(Some)
      .map_err(|_| ConfigError::Env {
        var: var.to_string(),
        value,
      }),
    Err(_) => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_are_valid() {
    let config = RunnerConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.base_duration(), Duration::from_millis(500));
    assert_eq!(config.frame_interval(), Duration::from_millis(16));
  }

  #[test]
  fn test_zero_frame_interval_is_rejected() {
    let config = RunnerConfig::default()
      .with_frame_interval(Duration::ZERO);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
  }

  #[test]
  fn test_builders() {
    let config = RunnerConfig::default()
      .with_base_duration(Duration::from_secs(2))
      .with_frame_interval(Duration::from_millis(40));
    assert_eq!(config.base_duration_ms, 2000);
    assert_eq!(config.frame_interval_ms, 40);
  }

  #[test]
  fn test_huge_durations_saturate() {
    let config = RunnerConfig::default()
      .with_base_duration(Duration::MAX)
      .with_frame_interval(Duration::MAX);
    assert_eq!(config.base_duration_ms, u64::MAX);
    assert_eq!(config.frame_interval_ms, u64::MAX);
  }

  #[test]
  fn test_bincode_round_trip_keeps_fields() {
    let config = RunnerConfig::default()
      .with_base_duration(Duration::from_millis(750));
    let bytes = bincode::serialize(&config).unwrap();
    let decoded: RunnerConfig = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, config);
  }
}
