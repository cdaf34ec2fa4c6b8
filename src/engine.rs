use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::Result;
use crate::export;
use crate::eye;
use crate::types::{SimulationConfig, SimulationSnapshot};
use crate::waveform;

/// Simulation engine
///
/// Owns the current configuration, the noise source, and the current
/// result snapshot. Single-threaded request/response model: every configuration
/// change triggers one full synchronous recomputation (waveform, traces,
/// metrics), and the snapshot is replaced wholesale so a reader never
/// observes a partially updated state.
pub struct SimulationEngine {
    config: SimulationConfig,
    rng: ChaCha8Rng,
    snapshot: SimulationSnapshot,
}

impl SimulationEngine {
    /// Create an engine with an entropy-seeded noise source.
    ///
    /// # Arguments
    /// * `config` - Initial simulation configuration
    ///
    /// # Returns
    /// A Result containing the engine, or an error when the configuration
    /// is invalid (non-positive bit rate, sample rate, or duration)
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Create an engine with a fixed noise seed for reproducible runs.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        let snapshot = SimulationSnapshot::empty(config.clone());
        Ok(Self {
            config,
            rng,
            snapshot,
        })
    }

    /// Run one full recomputation: synthesize the waveform, slice it into
    /// eye traces, analyze them, and publish a fresh snapshot.
    pub fn update(&mut self) -> &SimulationSnapshot {
        let pattern = self.config.data_pattern.resolve();
        let waveform = waveform::synthesize(&self.config, &pattern, &mut self.rng);
        let traces =
            eye::build_traces(&waveform.samples, self.config.bit_rate, self.config.sample_rate);
        let metrics = eye::analyze(&traces, &self.config);

        log::debug!(
            "recomputed {} {} samples, {} traces: eye_height={:.3}V eye_width={} jitter={:.3} snr={:.2}dB",
            waveform.len(),
            self.config.line_code,
            traces.len(),
            metrics.eye_height,
            metrics.eye_width,
            metrics.jitter,
            metrics.snr
        );

        self.snapshot = SimulationSnapshot::new(self.config.clone(), waveform, traces, metrics);
        &self.snapshot
    }

    /// Replace the configuration wholesale and recompute.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<&SimulationSnapshot> {
        config.validate()?;
        self.config = config;
        Ok(self.update())
    }

    /// Adjust only the live-mode tick interval; does not recompute.
    pub fn set_tick_interval(&mut self, interval_ms: u64) {
        self.config.tick_interval_ms = interval_ms;
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The current fully-built result snapshot.
    pub fn snapshot(&self) -> &SimulationSnapshot {
        &self.snapshot
    }

    /// Discard the current results, keeping the configuration.
    pub fn reset(&mut self) {
        self.snapshot = SimulationSnapshot::empty(self.config.clone());
        log::debug!("simulation reset");
    }

    /// CSV rendering of the current waveform.
    pub fn export_csv(&self) -> String {
        export::csv_string(&self.snapshot.waveform)
    }

    /// Write the current waveform as a CSV file.
    pub fn export_csv_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        export::write_csv_file(path, &self.snapshot.waveform)
    }

    /// Conventional filename for the current capture.
    pub fn suggested_filename(&self) -> String {
        export::export_filename(self.config.line_code, self.config.bit_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linecode::LineCode;
    use crate::types::EyeMetrics;

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            bit_rate: 0.0,
            ..SimulationConfig::default()
        };
        assert!(SimulationEngine::new(config).is_err());
    }

    #[test]
    fn test_starts_in_idle_state() {
        let engine = SimulationEngine::with_seed(SimulationConfig::default(), 1).unwrap();
        assert!(engine.snapshot().waveform.is_empty());
        assert_eq!(engine.snapshot().metrics, EyeMetrics::default());
    }

    #[test]
    fn test_update_publishes_fresh_snapshot() {
        let mut engine = SimulationEngine::with_seed(SimulationConfig::default(), 1).unwrap();
        let first_id = engine.update().id.clone();
        let snapshot = engine.update();
        assert_ne!(snapshot.id, first_id);
        assert_eq!(snapshot.waveform.len(), 1600);
        assert_eq!(snapshot.traces.len(), 56);
        assert_eq!(snapshot.metrics.eye_height, 2.0);
    }

    #[test]
    fn test_set_config_validates_and_recomputes() {
        let mut engine = SimulationEngine::with_seed(SimulationConfig::default(), 1).unwrap();
        let bad = SimulationConfig {
            bit_rate: -1.0,
            ..SimulationConfig::default()
        };
        assert!(engine.set_config(bad).is_err());

        let rz = SimulationConfig {
            line_code: LineCode::Rz,
            ..SimulationConfig::default()
        };
        let snapshot = engine.set_config(rz).unwrap();
        assert_eq!(snapshot.config.line_code, LineCode::Rz);
        assert_eq!(snapshot.waveform.len(), 1600);
    }

    #[test]
    fn test_reset_restores_idle_state() {
        let mut engine = SimulationEngine::with_seed(SimulationConfig::default(), 1).unwrap();
        engine.update();
        engine.reset();
        assert!(engine.snapshot().waveform.is_empty());
        assert!(engine.snapshot().traces.is_empty());
        assert_eq!(engine.snapshot().metrics, EyeMetrics::default());
    }

    #[test]
    fn test_suggested_filename() {
        let engine = SimulationEngine::with_seed(SimulationConfig::default(), 1).unwrap();
        assert_eq!(engine.suggested_filename(), "eye_diagram_NRZ_1000bps.csv");
    }
}
