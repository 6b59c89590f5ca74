//! Discrete fan speeds and their preset-mode names.

use serde::{Deserialize, Serialize};

/// The fixed ordered preset list exposed to the host, ascending by speed.
pub const PRESET_MODES: [&str; 4] = ["low", "medium", "high", "very_high"];

/// One of the four discrete speed codes a fan action accepts.
///
/// The type is the invariant: a fan's speed is always exactly one of these
/// four values, in the same order as [`PRESET_MODES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanSpeed {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl FanSpeed {
    /// The wire code sent to the hub (`0..=3`).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::VeryHigh => 3,
        }
    }

    /// Decode a wire code. Codes outside `0..=3` have no speed.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            3 => Some(Self::VeryHigh),
            _ => None,
        }
    }

    /// The preset-mode name shown to the user.
    #[must_use]
    pub fn as_preset(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }

    /// Look up a preset-mode name. Unknown names map to `None`.
    #[must_use]
    pub fn from_preset(preset: &str) -> Option<Self> {
        match preset {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "very_high" => Some(Self::VeryHigh),
            _ => None,
        }
    }
}

impl std::fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_preset())
    }
}
