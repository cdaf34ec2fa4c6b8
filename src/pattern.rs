//! Data patterns — preset registry and free-form binary input

use serde::{Deserialize, Serialize};

/// Maximum number of symbols in a data pattern
pub const MAX_PATTERN_LEN: usize = 16;

/// Fallback pattern used when sanitization leaves nothing
pub const DEFAULT_PATTERN: &str = "10101010";

/// A sanitized, non-empty sequence of binary symbols.
///
/// The pattern is cyclically repeated over the sampling duration. It can
/// only be constructed through sanitization, so it always holds between 1
/// and [`MAX_PATTERN_LEN`] symbols, each exactly `'0'` or `'1'`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct BitPattern(String);

impl BitPattern {
    /// Build a pattern from free-form input.
    ///
    /// Non-binary characters are stripped and the result is truncated to
    /// [`MAX_PATTERN_LEN`] symbols; input that is empty after stripping
    /// falls back to [`DEFAULT_PATTERN`]. Never fails.
    pub fn sanitize(input: &str) -> Self {
        let cleaned: String = input
            .chars()
            .filter(|c| *c == '0' || *c == '1')
            .take(MAX_PATTERN_LEN)
            .collect();
        if cleaned.is_empty() {
            Self(DEFAULT_PATTERN.to_string())
        } else {
            Self(cleaned)
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false by construction; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Symbol at `index` (cyclic), as a signed level: `+1.0` for `'1'`,
    /// `-1.0` for `'0'`.
    pub fn level(&self, index: usize) -> f64 {
        if self.0.as_bytes()[index % self.0.len()] == b'1' {
            1.0
        } else {
            -1.0
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BitPattern {
    fn default() -> Self {
        Self(DEFAULT_PATTERN.to_string())
    }
}

impl From<String> for BitPattern {
    fn from(s: String) -> Self {
        Self::sanitize(&s)
    }
}

impl From<BitPattern> for String {
    fn from(pattern: BitPattern) -> Self {
        pattern.0
    }
}

impl std::fmt::Display for BitPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata for a preset data pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetPattern {
    pub name: &'static str,
    pub bits: &'static str,
    pub documentation: &'static str,
}

impl PresetPattern {
    /// Look up a preset by name
    pub fn from_name(name: &str) -> Option<&'static PresetPattern> {
        PRESET_REGISTRY.iter().find(|p| p.name == name)
    }
}

/// Alternating — every bit flips
pub const ALTERNATING: PresetPattern = PresetPattern {
    name: "alternating",
    bits: "10101010",
    documentation: "Every bit flips. Densest transition content, cleanest eye.",
};

/// Paired — two-bit runs
pub const PAIRED: PresetPattern = PresetPattern {
    name: "paired",
    bits: "11001100",
    documentation: "Two-bit runs, half-rate transitions.",
};

/// Nibble — four-bit runs
pub const NIBBLE: PresetPattern = PresetPattern {
    name: "nibble",
    bits: "11110000",
    documentation: "Four-bit runs, strongest low-frequency content.",
};

/// Pseudo-random — 16-bit mixed-run-length slice
pub const PSEUDO_RANDOM: PresetPattern = PresetPattern {
    name: "pseudo_random",
    bits: "1011001110001101",
    documentation: "16-bit pseudo-random slice with mixed run lengths.",
};

/// All presets offered by the configuration surface
pub const PRESET_REGISTRY: &[PresetPattern] = &[ALTERNATING, PAIRED, NIBBLE, PSEUDO_RANDOM];

/// Data-pattern selection surface: a named preset or a free-form custom
/// binary string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum DataPattern {
    Preset(String),
    Custom(String),
}

impl DataPattern {
    /// Resolve the selection to a sanitized pattern. Unknown preset names
    /// fall back to the default pattern.
    pub fn resolve(&self) -> BitPattern {
        match self {
            Self::Preset(name) => PresetPattern::from_name(name)
                .map(|p| BitPattern::sanitize(p.bits))
                .unwrap_or_default(),
            Self::Custom(input) => BitPattern::sanitize(input),
        }
    }
}

impl Default for DataPattern {
    fn default() -> Self {
        Self::Custom(DEFAULT_PATTERN.to_string())
    }
}
