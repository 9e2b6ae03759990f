use serde::{Deserialize, Serialize};

use crate::intent::{LayoutIntent, LayoutMode};

/// Tunables shared by display location and placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlacementConfig {
    /// Upper bound on the per-axis screen margin, in points.
    pub max_screen_margin: f64,
    /// Margin as a fraction of the display's width/height.
    pub margin_rate: f64,
    /// Standard deviation of the random bias as a fraction of the display size.
    pub deviation_rate: f64,
    pub aspect_width: f64,
    pub aspect_height: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_screen_margin: 100.0,
            margin_rate: 0.07,
            deviation_rate: 0.02,
            aspect_width: 16.0,
            aspect_height: 10.0,
        }
    }
}

impl PlacementConfig {
    /// Clamp values into ranges the placement math can work with.
    pub fn validate(&mut self) {
        let defaults = Self::default();
        if !self.max_screen_margin.is_finite() || self.max_screen_margin < 0.0 {
            self.max_screen_margin = defaults.max_screen_margin;
        }
        // A rate of 0.5 or more would leave no usable region.
        self.margin_rate = finite_or(self.margin_rate, defaults.margin_rate).clamp(0.0, 0.49);
        self.deviation_rate =
            finite_or(self.deviation_rate, defaults.deviation_rate).clamp(0.0, 0.49);
        if !(self.aspect_width > 0.0 && self.aspect_height > 0.0) {
            self.aspect_width = defaults.aspect_width;
            self.aspect_height = defaults.aspect_height;
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// A requested window dimension.
///
/// Serialized as the string `"fill"` or as a non-negative number of points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExtentRepr", into = "ExtentRepr")]
pub enum Extent {
    /// Take the whole usable dimension.
    #[default]
    Fill,
    Pixels(f64),
}

impl Extent {
    pub fn resolve(self, available: f64) -> f64 {
        match self {
            Extent::Fill => available,
            Extent::Pixels(p) => p,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ExtentRepr {
    Keyword(ExtentKeyword),
    Pixels(f64),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ExtentKeyword {
    Fill,
}

impl TryFrom<ExtentRepr> for Extent {
    type Error = String;

    fn try_from(repr: ExtentRepr) -> Result<Self, Self::Error> {
        match repr {
            ExtentRepr::Keyword(ExtentKeyword::Fill) => Ok(Extent::Fill),
            ExtentRepr::Pixels(p) if p.is_finite() && p >= 0.0 => Ok(Extent::Pixels(p)),
            ExtentRepr::Pixels(p) => Err(format!(
                "extent must be \"fill\" or at least 0, got {}",
                p
            )),
        }
    }
}

impl From<Extent> for ExtentRepr {
    fn from(extent: Extent) -> Self {
        match extent {
            Extent::Fill => ExtentRepr::Keyword(ExtentKeyword::Fill),
            Extent::Pixels(p) => ExtentRepr::Pixels(p),
        }
    }
}

/// Target size and flags for one layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Preset {
    #[serde(default)]
    pub width: Extent,
    #[serde(default)]
    pub height: Extent,
    #[serde(default)]
    pub random_bias: bool,
    #[serde(default)]
    pub limit_aspect_ratio: bool,
}

impl Preset {
    fn sized(width: f64, height: f64) -> Self {
        Self {
            width: Extent::Pixels(width),
            height: Extent::Pixels(height),
            random_bias: true,
            limit_aspect_ratio: true,
        }
    }

    fn fill() -> Self {
        Self {
            width: Extent::Fill,
            height: Extent::Fill,
            random_bias: false,
            limit_aspect_ratio: false,
        }
    }
}

/// Per-mode presets. Move-to-center keeps the window's size and has none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Presets {
    pub center: Preset,
    pub center_doubled: Preset,
    pub left_half: Preset,
    pub right_half: Preset,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            center: Preset::sized(1280.0, 800.0),
            center_doubled: Preset::sized(2560.0, 1600.0),
            left_half: Preset::fill(),
            right_half: Preset::fill(),
        }
    }
}

impl Presets {
    pub fn intent(&self, mode: LayoutMode) -> LayoutIntent {
        let preset = match mode {
            LayoutMode::Center => self.center,
            LayoutMode::CenterDoubled => self.center_doubled,
            LayoutMode::LeftHalf => self.left_half,
            LayoutMode::RightHalf => self.right_half,
            LayoutMode::MoveToCenter => return LayoutIntent::fill(mode),
        };
        LayoutIntent {
            mode,
            width: preset.width,
            height: preset.height,
            random_bias: preset.random_bias,
            limit_aspect_ratio: preset.limit_aspect_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_resolve() {
        assert_eq!(Extent::Fill.resolve(1720.0), 1720.0);
        assert_eq!(Extent::Pixels(800.0).resolve(1720.0), 800.0);
    }

    #[test]
    fn test_extent_serde() {
        let extents: Vec<Extent> = serde_json::from_str(r#"["fill", 1280, 800.5]"#).unwrap();
        assert_eq!(
            extents,
            vec![Extent::Fill, Extent::Pixels(1280.0), Extent::Pixels(800.5)]
        );
        assert_eq!(serde_json::to_string(&Extent::Fill).unwrap(), r#""fill""#);
        assert!(serde_json::from_str::<Extent>(r#""half""#).is_err());
    }

    #[test]
    fn test_negative_extent_is_rejected() {
        assert!(serde_json::from_str::<Extent>("-500").is_err());
        assert_eq!(
            serde_json::from_str::<Extent>("0").unwrap(),
            Extent::Pixels(0.0)
        );

        let err = toml::from_str::<Presets>("[center]\nwidth = -500").unwrap_err();
        assert!(err.to_string().contains("at least 0"), "{}", err);
        assert!(toml::from_str::<Presets>("[left-half]\nheight = nan").is_err());
    }

    #[test]
    fn test_presets_from_partial_toml() {
        let presets: Presets = toml::from_str(
            r#"
            [center]
            width = 1440
            height = 900
            random-bias = false

            [right-half]
            width = 900
            "#,
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(presets.center.width, Extent::Pixels(1440.0));
        assert!(!presets.center.random_bias);
        assert!(!presets.center.limit_aspect_ratio);
        assert_eq!(presets.right_half.width, Extent::Pixels(900.0));
        assert_eq!(presets.right_half.height, Extent::Fill);
        assert_eq!(presets.left_half, Preset::fill());
        assert_eq!(presets.center_doubled, Preset::sized(2560.0, 1600.0));
    }

    #[test]
    fn test_intent_for_each_mode() {
        let presets = Presets::default();

        let center = presets.intent(LayoutMode::Center);
        assert_eq!(center.width, Extent::Pixels(1280.0));
        assert!(center.random_bias);
        assert!(center.limit_aspect_ratio);

        let doubled = presets.intent(LayoutMode::CenterDoubled);
        assert_eq!(doubled.width, Extent::Pixels(2560.0));
        assert_eq!(doubled.height, Extent::Pixels(1600.0));

        let half = presets.intent(LayoutMode::RightHalf);
        assert_eq!(half.width, Extent::Fill);
        assert!(!half.random_bias);

        let moved = presets.intent(LayoutMode::MoveToCenter);
        assert!(!moved.random_bias);
        assert!(!moved.limit_aspect_ratio);
    }

    #[test]
    fn test_validate_clamps_rates() {
        let mut config = PlacementConfig {
            max_screen_margin: -5.0,
            margin_rate: 0.9,
            deviation_rate: f64::NAN,
            aspect_width: 0.0,
            aspect_height: 10.0,
        };
        config.validate();
        assert_eq!(config.max_screen_margin, 100.0);
        assert_eq!(config.margin_rate, 0.49);
        assert_eq!(config.deviation_rate, 0.02);
        assert_eq!(config.aspect_width, 16.0);
    }
}
