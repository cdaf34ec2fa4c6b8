//! Line-coding schemes and their per-sample shaping functions

use serde::{Deserialize, Serialize};

/// Line-coding scheme for the synthesized waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCode {
    #[serde(rename = "NRZ")]
    Nrz,
    #[serde(rename = "RZ")]
    Rz,
    Manchester,
    #[serde(rename = "AMI")]
    Ami,
}

impl LineCode {
    /// All supported schemes, in configuration-surface order
    pub const ALL: &'static [LineCode] = &[Self::Nrz, Self::Rz, Self::Manchester, Self::Ami];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NRZ" => Some(Self::Nrz),
            "RZ" => Some(Self::Rz),
            "Manchester" => Some(Self::Manchester),
            "AMI" => Some(Self::Ami),
            _ => None,
        }
    }

    /// Wire/display string, as used in export filenames
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nrz => "NRZ",
            Self::Rz => "RZ",
            Self::Manchester => "Manchester",
            Self::Ami => "AMI",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Nrz => "Non-Return-to-Zero",
            Self::Rz => "Return-to-Zero",
            Self::Manchester => "Manchester",
            Self::Ami => "Alternate Mark Inversion",
        }
    }

    /// Amplitude multiplier for one sample.
    ///
    /// `bit` is the signed bit level (`+1.0` or `-1.0`), `position` the
    /// fractional offset within the bit period in `[0, 1)`, and
    /// `mark_index` the AMI polarity counter (ignored by the other
    /// schemes): even index means positive mark, odd means negative.
    pub fn multiplier(&self, bit: f64, position: f64, mark_index: u64) -> f64 {
        match self {
            Self::Nrz => bit,
            Self::Rz => {
                if position < 0.5 {
                    bit
                } else {
                    0.0
                }
            }
            Self::Manchester => {
                if position < 0.5 {
                    bit
                } else {
                    -bit
                }
            }
            Self::Ami => {
                if bit > 0.0 {
                    if mark_index % 2 == 0 {
                        1.0
                    } else {
                        -1.0
                    }
                } else {
                    0.0
                }
            }
        }
    }
}

impl std::fmt::Display for LineCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
