pub mod backend;
pub mod bias;
pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod intent;
pub mod place;

pub use backend::{Outcome, Placer, WindowBackend};
pub use bias::{BoxMuller, FixedSigma, NormalSource};
pub use config::{Extent, PlacementConfig, Preset, Presets};
pub use display::{locate, Display, Margin};
pub use error::{PlacementError, Result};
pub use geometry::{Point, Rect, Size};
pub use intent::{LayoutIntent, LayoutMode};
pub use place::{compute, PlacementResult};
