use serde::{Deserialize, Serialize};

use crate::bias::{sample_bias, NormalSource};
use crate::config::PlacementConfig;
use crate::display::{Display, Margin};
use crate::geometry::{Point, Rect, Size};
use crate::intent::{LayoutIntent, LayoutMode};

/// Final integral geometry handed to the window backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub size: Size,
    pub position: Point,
}

impl PlacementResult {
    fn truncate(width: f64, height: f64, x: f64, y: f64) -> Self {
        Self {
            size: Size::truncate(width, height),
            position: Point::truncate(x, y),
        }
    }
}

/// Compute where the window should go.
///
/// Returns `None` when a centering mode finds the window already at its
/// target size; nothing should be written in that case. All arithmetic
/// stays in `f64` until the result is built.
pub fn compute(
    current: &Rect,
    screen: &Display,
    margin: Margin,
    intent: &LayoutIntent,
    config: &PlacementConfig,
    bias: &mut impl NormalSource,
) -> Option<PlacementResult> {
    let usable = screen.region.inset(margin);

    match intent.mode {
        LayoutMode::Center | LayoutMode::CenterDoubled => {
            center(current, screen, &usable, intent, config, bias)
        }
        LayoutMode::LeftHalf | LayoutMode::RightHalf => Some(half(&usable, margin, intent)),
        LayoutMode::MoveToCenter => Some(move_to_center(current, &usable)),
    }
}

fn center(
    current: &Rect,
    screen: &Display,
    usable: &Rect,
    intent: &LayoutIntent,
    config: &PlacementConfig,
    bias: &mut impl NormalSource,
) -> Option<PlacementResult> {
    let mut width = clamp_extent(intent.width.resolve(usable.width), usable.width);
    let mut height = clamp_extent(intent.height.resolve(usable.height), usable.height);

    if intent.limit_aspect_ratio {
        (width, height) = limit_aspect(width, height, usable.width, config);
    }

    if current.truncated_size() == Size::truncate(width, height) {
        tracing::debug!(width, height, "Window already at target size");
        return None;
    }

    let (bias_x, bias_y) = if intent.random_bias {
        sample_bias(bias, screen, config.deviation_rate)
    } else {
        (0.0, 0.0)
    };

    let center_x = usable.x + usable.width / 2.0 + bias_x;
    let center_y = usable.y + usable.height / 2.0 + bias_y;

    let x = clamp_edge(center_x - width / 2.0, usable.min_x(), usable.max_x() - width);
    let y = clamp_edge(center_y - height / 2.0, usable.min_y(), usable.max_y() - height);

    Some(PlacementResult::truncate(width, height, x, y))
}

/// Re-derive one side so the pair keeps the configured aspect ratio.
///
/// A window taller than wide loses height; otherwise the width follows the
/// height. If that would widen it past the usable width, the width is pinned
/// there and the height follows instead.
fn limit_aspect(width: f64, height: f64, max_width: f64, config: &PlacementConfig) -> (f64, f64) {
    let ratio = config.aspect_width / config.aspect_height;
    if width < height {
        return (width, width / ratio);
    }
    let widened = height * ratio;
    if widened > max_width {
        (max_width, max_width / ratio)
    } else {
        (widened, height)
    }
}

fn half(usable: &Rect, margin: Margin, intent: &LayoutIntent) -> PlacementResult {
    let gap = margin.x / 2.0;
    let half_width = usable.width / 2.0 - gap;

    let width = clamp_extent(intent.width.resolve(half_width), half_width);
    let height = clamp_extent(intent.height.resolve(usable.height), usable.height);

    let mid = usable.x + usable.width / 2.0;
    let x = match intent.mode {
        LayoutMode::LeftHalf => mid - gap - width,
        _ => mid + gap,
    };
    let y = usable.y + (usable.height - height) / 2.0;

    PlacementResult::truncate(width, height, x, y)
}

fn move_to_center(current: &Rect, usable: &Rect) -> PlacementResult {
    let x = usable.x + (usable.width - current.width) / 2.0;
    let y = usable.y + (usable.height - current.height) / 2.0;
    PlacementResult::truncate(current.width, current.height, x, y)
}

/// A requested extent bounded to `[0, available]`.
fn clamp_extent(requested: f64, available: f64) -> f64 {
    requested.min(available).max(0.0)
}

/// Like `f64::clamp`, but the lower bound wins when the range is empty
/// instead of panicking.
fn clamp_edge(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}
