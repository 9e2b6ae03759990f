use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Extent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    Center,
    CenterDoubled,
    LeftHalf,
    RightHalf,
    MoveToCenter,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 5] = [
        LayoutMode::Center,
        LayoutMode::CenterDoubled,
        LayoutMode::LeftHalf,
        LayoutMode::RightHalf,
        LayoutMode::MoveToCenter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Center => "center",
            LayoutMode::CenterDoubled => "center-doubled",
            LayoutMode::LeftHalf => "left-half",
            LayoutMode::RightHalf => "right-half",
            LayoutMode::MoveToCenter => "move-to-center",
        }
    }

    /// Whether applying this mode writes a new size. Move-to-center keeps
    /// the window's size and only sends a position.
    pub fn resizes(self) -> bool {
        !matches!(self, LayoutMode::MoveToCenter)
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown layout mode: {}", s))
    }
}

/// A single placement request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutIntent {
    pub mode: LayoutMode,
    #[serde(default)]
    pub width: Extent,
    #[serde(default)]
    pub height: Extent,
    #[serde(default)]
    pub random_bias: bool,
    #[serde(default)]
    pub limit_aspect_ratio: bool,
}

impl LayoutIntent {
    /// An intent that asks for the whole usable region, with no bias or
    /// aspect clamp.
    pub fn fill(mode: LayoutMode) -> Self {
        Self {
            mode,
            width: Extent::Fill,
            height: Extent::Fill,
            random_bias: false,
            limit_aspect_ratio: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_round_trip() {
        for mode in LayoutMode::ALL {
            assert_eq!(mode.as_str().parse::<LayoutMode>().unwrap(), mode);
        }
        assert!("top-half".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn test_only_move_to_center_keeps_size() {
        assert!(LayoutMode::Center.resizes());
        assert!(LayoutMode::LeftHalf.resizes());
        assert!(!LayoutMode::MoveToCenter.resizes());
    }

    #[test]
    fn test_intent_from_json() {
        let intent: LayoutIntent =
            serde_json::from_str(r#"{"mode":"center-doubled","width":2560,"height":"fill"}"#)
                .unwrap();
        assert_eq!(intent.mode, LayoutMode::CenterDoubled);
        assert_eq!(intent.width, Extent::Pixels(2560.0));
        assert_eq!(intent.height, Extent::Fill);
        assert!(!intent.random_bias);
    }
}
