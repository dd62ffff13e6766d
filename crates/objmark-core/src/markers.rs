use tracing::debug;

use crate::consts::DEFAULT_ASPECT_RATIO;
use crate::geometry::{round_half_up, Rect};

/// Optional width/height constraint for drags and resizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectLock {
    pub enabled: bool,
    ratio: f64,
}

impl Default for AspectLock {
    fn default() -> Self {
        Self {
            enabled: false,
            ratio: DEFAULT_ASPECT_RATIO,
        }
    }
}

impl AspectLock {
    pub fn new(enabled: bool, ratio: f64) -> Self {
        let mut lock = Self {
            enabled,
            ..Self::default()
        };
        lock.set_ratio(ratio);
        lock
    }

    /// Width / height.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Non-positive or non-finite ratios are rejected; returns whether the
    /// value was taken.
    pub fn set_ratio(&mut self, ratio: f64) -> bool {
        if !(ratio.is_finite() && ratio > 0.0) {
            return false;
        }
        self.ratio = ratio;
        true
    }

    /// The ratio when the lock is engaged.
    pub fn active_ratio(&self) -> Option<f64> {
        self.enabled.then_some(self.ratio)
    }
}

/// Ordered marker collection in display space.
///
/// The last element is the active marker: the only one that move, resize
/// and delete act on. Selecting a marker moves it to the end.
#[derive(Clone, Debug, Default)]
pub struct MarkerStore {
    rects: Vec<Rect>,
    dirty: bool,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn as_slice(&self) -> &[Rect] {
        &self.rects
    }

    pub fn active(&self) -> Option<&Rect> {
        self.rects.last()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn append(&mut self, rect: Rect) {
        debug!(?rect, "Marker appended");
        self.rects.push(rect);
        self.dirty = true;
    }

    pub fn remove_last(&mut self) -> Option<Rect> {
        let removed = self.rects.pop()?;
        debug!(rect = ?removed, "Marker removed");
        self.dirty = true;
        Some(removed)
    }

    /// Add `delta` field-wise to the active marker. Width and height never
    /// drop below 1.
    pub fn mutate_last(&mut self, delta: &Rect) -> bool {
        let Some(rect) = self.rects.last_mut() else {
            return false;
        };

        rect.x = rect.x.saturating_add(delta.x);
        rect.y = rect.y.saturating_add(delta.y);
        rect.width = rect.width.saturating_add(delta.width);
        rect.height = rect.height.saturating_add(delta.height);
        if rect.width <= 0 {
            rect.width = 1;
        }
        if rect.height <= 0 {
            rect.height = 1;
        }

        self.dirty = true;
        true
    }

    /// Scale the active marker's size about its top-left corner. Under an
    /// engaged aspect lock the height follows the new width. A result smaller
    /// than 1 px on either side leaves the marker untouched.
    pub fn resize_last(&mut self, factor: f64, lock: &AspectLock) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        let Some(rect) = self.rects.last_mut() else {
            return false;
        };

        let width = round_half_up(factor * f64::from(rect.width));
        let height = match lock.active_ratio() {
            Some(ratio) => round_half_up(f64::from(width) / ratio),
            None => round_half_up(factor * f64::from(rect.height)),
        };
        if width < 1 || height < 1 {
            return false;
        }

        rect.width = width;
        rect.height = height;
        self.dirty = true;
        true
    }

    pub fn replace_all(&mut self, rects: Vec<Rect>) {
        self.rects = rects;
        self.dirty = true;
    }

    /// Index of the marker with an edge closest to `(x, y)`.
    ///
    /// Vertical edges only count when `y` lies within the marker's rows and
    /// horizontal edges only when `x` lies within its columns. The distance
    /// must be strictly below `threshold`; on ties the earlier marker wins.
    pub fn select_nearest(&self, x: i32, y: i32, threshold: i32) -> Option<usize> {
        let threshold = u32::try_from(threshold).unwrap_or(0);
        let mut best: Option<(usize, u32)> = None;

        for (idx, rect) in self.rects.iter().enumerate() {
            let within_rows = y >= rect.y && y < rect.bottom();
            let within_cols = x >= rect.x && x < rect.right();

            let vertical = within_rows.then(|| rect.x.abs_diff(x).min(rect.right().abs_diff(x)));
            let horizontal =
                within_cols.then(|| rect.y.abs_diff(y).min(rect.bottom().abs_diff(y)));

            let Some(dist) = [vertical, horizontal].into_iter().flatten().min() else {
                continue;
            };
            if dist >= threshold {
                continue;
            }
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((idx, dist));
            }
        }

        best.map(|(idx, _)| idx)
    }

    /// Make the marker at `index` the active one. Does not touch the dirty flag.
    pub fn promote(&mut self, index: usize) -> bool {
        if index >= self.rects.len() {
            return false;
        }
        let rect = self.rects.remove(index);
        self.rects.push(rect);
        true
    }
}
