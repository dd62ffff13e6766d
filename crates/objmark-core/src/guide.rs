use std::fmt;

use crate::consts::GUIDE_COLOR;
use crate::geometry::{DisplayScale, Point, Rect};
use crate::render::DrawPrimitive;

/// Shape of the alignment guide. The discriminants are the codes used in
/// configuration files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuideShape {
    #[default]
    None = 0,
    Square = 1,
    Rectangle = 2,
    Circle = 3,
    Ellipse = 4,
}

impl GuideShape {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for GuideShape {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::Square),
            2 => Ok(Self::Rectangle),
            3 => Ok(Self::Circle),
            4 => Ok(Self::Ellipse),
            other => Err(other),
        }
    }
}

impl fmt::Display for GuideShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Square => write!(f, "Square"),
            Self::Rectangle => write!(f, "Rectangle"),
            Self::Circle => write!(f, "Circle"),
            Self::Ellipse => write!(f, "Ellipse"),
        }
    }
}

/// Visual-only alignment overlay.
#[derive(Clone, Debug, Default)]
pub struct GuideModel {
    shape: GuideShape,
    /// Rectangle as configured, in source space.
    source: Rect,
    /// `source` projected into display space; only refreshed while `source`
    /// has positive width and height.
    display: Rect,
    visible: bool,
}

impl GuideModel {
    pub fn shape(&self) -> GuideShape {
        self.shape
    }

    pub fn source_rect(&self) -> Rect {
        self.source
    }

    pub fn display_rect(&self) -> Rect {
        self.display
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Unknown shape codes are ignored; returns whether the code was taken.
    pub fn set_shape(&mut self, code: i32) -> bool {
        match GuideShape::try_from(code) {
            Ok(shape) => {
                self.shape = shape;
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_rectangle(&mut self, source: Rect, scale: &DisplayScale) {
        self.source = source;
        self.rescale(scale);
    }

    /// Re-project the stored source rectangle after a scale change.
    pub fn rescale(&mut self, scale: &DisplayScale) {
        if self.source.has_area() {
            self.display = scale.to_display(&self.source);
        }
    }

    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// The overlay to draw, if the guide is currently showable.
    pub fn primitive(&self) -> Option<DrawPrimitive> {
        if !self.visible || !self.display.has_area() {
            return None;
        }

        let r = self.display;
        let center = Point::new(
            f64::from(r.x) + f64::from(r.width) / 2.0,
            f64::from(r.y) + f64::from(r.height) / 2.0,
        );
        let half_w = f64::from(r.width) / 2.0;
        let half_h = f64::from(r.height) / 2.0;

        match self.shape {
            GuideShape::None => None,
            GuideShape::Square => Some(outline(Rect::new(r.x, r.y, r.width, r.width))),
            GuideShape::Rectangle => Some(outline(r)),
            GuideShape::Circle => Some(ellipse(center, (half_w, half_w))),
            GuideShape::Ellipse => Some(ellipse(center, (half_w, half_h))),
        }
    }
}

fn outline(rect: Rect) -> DrawPrimitive {
    DrawPrimitive::Rectangle {
        rect,
        color: GUIDE_COLOR,
        filled: false,
    }
}

fn ellipse(center: Point, semi_axes: (f64, f64)) -> DrawPrimitive {
    DrawPrimitive::Ellipse {
        center,
        semi_axes,
        color: GUIDE_COLOR,
    }
}
