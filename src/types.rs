use serde::{Deserialize, Serialize};

use crate::error::{EyeSimError, Result};
use crate::linecode::LineCode;
use crate::pattern::DataPattern;

/// Default sampling frequency (Hz)
pub const DEFAULT_SAMPLE_RATE: f64 = 100_000.0;

/// Captured duration per recomputation (s)
pub const DEFAULT_DURATION: f64 = 0.016;

/// Default live-mode tick interval (ms)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub line_code: LineCode,
    pub data_pattern: DataPattern,
    /// Bit rate in bits/second; must be positive
    pub bit_rate: f64,
    /// Signed amplitude scale in volts
    pub amplitude: f64,
    /// Additive noise level as a percentage of amplitude (0-100)
    pub noise_level: u8,
    pub sample_rate: f64,
    pub duration: f64,
    /// Live-mode recomputation period in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            line_code: LineCode::Nrz,
            data_pattern: DataPattern::default(),
            bit_rate: 1000.0,
            amplitude: 1.0,
            noise_level: 0,
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration: DEFAULT_DURATION,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.bit_rate.is_finite() || self.bit_rate <= 0.0 {
            return Err(EyeSimError::InvalidParameter(format!(
                "bit_rate must be positive, got {}",
                self.bit_rate
            )));
        }
        if !self.amplitude.is_finite() {
            return Err(EyeSimError::InvalidParameter(format!(
                "amplitude must be finite, got {}",
                self.amplitude
            )));
        }
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(EyeSimError::InvalidParameter(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(EyeSimError::InvalidParameter(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        Ok(())
    }

    /// Noise level clamped to the supported percentage range
    pub fn effective_noise(&self) -> f64 {
        f64::from(self.noise_level.min(100))
    }

    /// Samples spanning one bit period; not required to be integral, but
    /// analysis quality degrades when it is not
    pub fn samples_per_bit(&self) -> f64 {
        self.sample_rate / self.bit_rate
    }

    /// Total samples per recomputation: `floor(sample_rate * duration)`
    pub fn total_samples(&self) -> usize {
        (self.sample_rate * self.duration).floor() as usize
    }
}

/// Time-sampled amplitude sequence.
///
/// `samples` and `time_axis` always have equal length. Produced fresh on
/// every recomputation and never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    pub samples: Vec<f64>,
    pub time_axis: Vec<f64>,
}

impl Waveform {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Derived eye-diagram quality metrics.
///
/// All values are clamped finite-or-zero at the analysis boundary:
/// `eye_height` in volts, `eye_width` and `jitter` in samples, `snr` in dB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EyeMetrics {
    pub eye_height: f64,
    pub eye_width: f64,
    pub jitter: f64,
    pub snr: f64,
}

/// One fully-built simulation result.
///
/// Snapshots are replaced wholesale on every recomputation, so a reader
/// always observes either the previous complete result or the new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub id: String,
    pub config: SimulationConfig,
    pub waveform: Waveform,
    pub traces: Vec<Vec<f64>>,
    pub metrics: EyeMetrics,
    pub created_at: String,
}

impl SimulationSnapshot {
    pub fn new(
        config: SimulationConfig,
        waveform: Waveform,
        traces: Vec<Vec<f64>>,
        metrics: EyeMetrics,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            config,
            waveform,
            traces,
            metrics,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// The idle/reset state: no waveform, no traces, all-zero metrics
    pub fn empty(config: SimulationConfig) -> Self {
        Self::new(config, Waveform::default(), Vec::new(), EyeMetrics::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = SimulationConfig::default();
        assert_eq!(config.line_code, LineCode::Nrz);
        assert_eq!(config.bit_rate, 1000.0);
        assert_eq!(config.amplitude, 1.0);
        assert_eq!(config.noise_level, 0);
        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.total_samples(), 1600);
        assert_eq!(config.samples_per_bit(), 100.0);
    }

    #[test]
    fn test_validate_rejects_non_positive_bit_rate() {
        let mut config = SimulationConfig::default();
        config.bit_rate = 0.0;
        assert!(config.validate().is_err());
        config.bit_rate = -10.0;
        assert!(config.validate().is_err());
        config.bit_rate = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_noise_clamps() {
        let mut config = SimulationConfig::default();
        config.noise_level = 250;
        assert_eq!(config.effective_noise(), 100.0);
        config.noise_level = 40;
        assert_eq!(config.effective_noise(), 40.0);
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bit_rate, config.bit_rate);
        assert_eq!(back.line_code, config.line_code);
        assert_eq!(back.data_pattern, config.data_pattern);
    }

    #[test]
    fn test_empty_snapshot_is_zeroed() {
        let snapshot = SimulationSnapshot::empty(SimulationConfig::default());
        assert!(snapshot.waveform.is_empty());
        assert!(snapshot.traces.is_empty());
        assert_eq!(snapshot.metrics, EyeMetrics::default());
        assert!(!snapshot.id.is_empty());
    }
}
