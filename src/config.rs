//! Optional settings file.
//!
//! A missing file is normal and yields defaults; a malformed one is logged
//! and ignored rather than aborting startup.

use std::fs;
use std::path::Path;

use serde::Deserialize;

pub const MIN_UPDATE_HZ: f64 = 20.0;
pub const MAX_UPDATE_HZ: f64 = 60.0;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sample delivery rate in Hertz.
    pub update_hz: f64,
    /// Peak amplitude of the simulated X axis, in g.
    pub amplitude_g: f64,
    /// Uniform noise added to every simulated axis, in g.
    pub noise_g: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            update_hz: 30.0,
            amplitude_g: 0.8,
            noise_g: 0.05,
        }
    }
}

impl AppConfig {
    pub fn load_or_default(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => {
                log::debug!("no config at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring malformed config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(raw).map(Self::sanitized)
    }

    fn sanitized(mut self) -> Self {
        if !self.update_hz.is_finite() {
            self.update_hz = Self::default().update_hz;
        }
        if !(MIN_UPDATE_HZ..=MAX_UPDATE_HZ).contains(&self.update_hz) {
            let clamped = self.update_hz.clamp(MIN_UPDATE_HZ, MAX_UPDATE_HZ);
            log::warn!(
                "update_hz {} outside {MIN_UPDATE_HZ}..={MAX_UPDATE_HZ}, using {clamped}",
                self.update_hz
            );
            self.update_hz = clamped;
        }
        if !self.amplitude_g.is_finite() || self.amplitude_g < 0.0 {
            self.amplitude_g = Self::default().amplitude_g;
        }
        if !self.noise_g.is_finite() || self.noise_g < 0.0 {
            self.noise_g = 0.0;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_or_default(Path::new("definitely/not/here.json"));
        assert_eq!(config.update_hz, 30.0);
        assert_eq!(config.amplitude_g, 0.8);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config = AppConfig::from_json(r#"{"update_hz": 45.0}"#).unwrap();
        assert_eq!(config.update_hz, 45.0);
        assert_eq!(config.noise_g, 0.05);
    }

    #[test]
    fn out_of_range_rate_is_clamped() {
        let config = AppConfig::from_json(r#"{"update_hz": 500.0}"#).unwrap();
        assert_eq!(config.update_hz, MAX_UPDATE_HZ);
        let config = AppConfig::from_json(r#"{"update_hz": 1.0}"#).unwrap();
        assert_eq!(config.update_hz, MIN_UPDATE_HZ);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AppConfig::from_json("{not json").is_err());
    }
}
