use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_DISPLAY_SCALE;

/// Axis-aligned rectangle in integer pixel coordinates.
///
/// The same type is used for both display space and source space; which one
/// a value lives in is decided by the API that hands it out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Saturates at `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// True when width and height are both positive.
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Rectangle spanned by two corner points, rounding each coordinate half up.
    ///
    /// The near corner and the extent are rounded separately, so the far edge
    /// can land one pixel away from the rounded far point.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = round_half_up(a.x.min(b.x));
        let top = round_half_up(a.y.min(b.y));
        Self {
            x: left,
            y: top,
            width: round_half_up((a.x - b.x).abs()),
            height: round_half_up((a.y - b.y).abs()),
        }
    }

    /// True if any part of the rectangle lies inside a `width` x `height` image.
    pub fn overlaps_image(&self, width: u32, height: u32) -> bool {
        i64::from(self.x) < i64::from(width)
            && i64::from(self.y) < i64::from(height)
            && self.right() > 0
            && self.bottom() > 0
    }

    /// Intersection with a `width` x `height` image, or `None` if empty.
    pub fn clamp_to_image(&self, width: u32, height: u32) -> Option<Rect> {
        let w = i64::from(width);
        let h = i64::from(height);
        let left = i64::from(self.x).max(0);
        let top = i64::from(self.y).max(0);
        let right = i64::from(self.right()).min(w);
        let bottom = i64::from(self.bottom()).min(h);

        if right <= left || bottom <= top {
            return None;
        }

        Some(Rect::new(
            left as i32,
            top as i32,
            (right - left) as i32,
            (bottom - top) as i32,
        ))
    }

    /// Multiply every field by `factor`, rounding each result half up.
    pub fn scaled(&self, factor: f64) -> Rect {
        Rect {
            x: round_half_up(f64::from(self.x) * factor),
            y: round_half_up(f64::from(self.y) * factor),
            width: round_half_up(f64::from(self.width) * factor),
            height: round_half_up(f64::from(self.height) * factor),
        }
    }
}

/// A point in display space. Fractional so an aspect-locked drag can carry
/// its exact derived y coordinate until the rectangle is committed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Round to the nearest integer, halves rounding toward positive infinity.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Scalar mapping between display space and source space:
/// `display = source * scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayScale(f64);

impl Default for DisplayScale {
    fn default() -> Self {
        Self(DEFAULT_DISPLAY_SCALE)
    }
}

impl DisplayScale {
    /// Build a scale, falling back to the default for non-positive values.
    pub fn new_or_default(scale: f64) -> Self {
        if is_valid_scale(scale) {
            Self(scale)
        } else {
            Self::default()
        }
    }

    pub fn get(&self) -> f64 {
        self.0
    }

    /// Replace the factor. Non-positive or non-finite values are rejected and
    /// leave the previous factor in place; returns whether the value was taken.
    pub fn set(&mut self, scale: f64) -> bool {
        if !is_valid_scale(scale) {
            return false;
        }
        self.0 = scale;
        true
    }

    pub fn to_display(&self, rect: &Rect) -> Rect {
        rect.scaled(self.0)
    }

    pub fn to_source(&self, rect: &Rect) -> Rect {
        rect.scaled(1.0 / self.0)
    }

    /// Pixel size of a `width` x `height` source image once displayed.
    pub fn display_size(&self, width: u32, height: u32) -> (u32, u32) {
        let w = (f64::from(width) * self.0).round().max(1.0);
        let h = (f64::from(height) * self.0).round().max(1.0);
        (w as u32, h as u32)
    }
}

fn is_valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0
}
