pub mod engine;
pub mod error;
pub mod export;
pub mod eye;
pub mod linecode;
pub mod live;
pub mod pattern;
pub mod types;
pub mod waveform;

pub use engine::SimulationEngine;
pub use error::{EyeSimError, Result};
pub use linecode::LineCode;
pub use live::{LiveSimulation, Ticker};
pub use pattern::{BitPattern, DataPattern};
pub use types::*;
