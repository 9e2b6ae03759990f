use serde::{Deserialize, Serialize};

use crate::display::Margin;

/// A window or display region in top-left-origin space (y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open overlap test: `self.min < other.max && self.max >= other.min`
    /// on both axes. A window touching a display's left/top edge counts,
    /// one touching its right/bottom edge does not.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min_x() < other.max_x()
            && self.max_x() >= other.min_x()
            && self.min_y() < other.max_y()
            && self.max_y() >= other.min_y()
    }

    /// Shrink by `margin` on all four sides.
    pub fn inset(&self, margin: Margin) -> Rect {
        Rect::new(
            self.x + margin.x,
            self.y + margin.y,
            self.width - 2.0 * margin.x,
            self.height - 2.0 * margin.y,
        )
    }

    pub fn truncated_size(&self) -> Size {
        Size::truncate(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn truncate(width: f64, height: f64) -> Self {
        Self {
            width: width.trunc() as i32,
            height: height.trunc() as i32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn truncate(x: f64, y: f64) -> Self {
        Self {
            x: x.trunc() as i32,
            y: y.trunc() as i32,
        }
    }
}
