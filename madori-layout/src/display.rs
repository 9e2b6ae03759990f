use serde::{Deserialize, Serialize};

use crate::config::PlacementConfig;
use crate::error::PlacementError;
use crate::geometry::Rect;

/// One physical screen, in top-left-origin coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Display {
    pub region: Rect,
}

impl Display {
    pub fn new(region: Rect) -> Self {
        Self { region }
    }

    /// Convert a bottom-left-origin frame (as AppKit reports it) into
    /// top-left-origin space, using the primary display's height as the
    /// shared reference.
    pub fn from_native(frame: &Rect, primary_height: f64) -> Self {
        Self {
            region: Rect::new(
                frame.x,
                primary_height - frame.max_y(),
                frame.width,
                frame.height,
            ),
        }
    }
}

/// Inset applied to a display before any window is placed on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub x: f64,
    pub y: f64,
}

impl Margin {
    pub fn for_display(display: &Display, config: &PlacementConfig) -> Self {
        Self {
            x: config
                .max_screen_margin
                .min(display.region.width * config.margin_rate),
            y: config
                .max_screen_margin
                .min(display.region.height * config.margin_rate),
        }
    }
}

/// Find the display a window lives on.
///
/// `native_frames` are bottom-left-origin frames in system order; the first
/// one is the primary display. The first display whose converted region
/// overlaps the window wins, so a window straddling two screens always
/// resolves to the earlier one.
pub fn locate(window: &Rect, native_frames: &[Rect]) -> Result<Display, PlacementError> {
    let primary = native_frames.first().ok_or(PlacementError::DisplayNotFound)?;
    let primary_height = primary.height;

    native_frames
        .iter()
        .map(|frame| Display::from_native(frame, primary_height))
        .find(|display| window.overlaps(&display.region))
        .ok_or(PlacementError::DisplayNotFound)
}
