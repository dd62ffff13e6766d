//! Draw primitives handed to the host surface, plus a software rasterizer
//! used by the headless surface and snapshot export.

use image::{Rgb, RgbImage};

use crate::geometry::{Point, Rect};

/// One overlay shape, in display-space pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawPrimitive {
    /// Rectangle from `(x, y)` to `(x + width, y + height)`, both corners inclusive.
    Rectangle {
        rect: Rect,
        color: [u8; 3],
        filled: bool,
    },
    /// Axis-aligned ellipse outline.
    Ellipse {
        center: Point,
        semi_axes: (f64, f64),
        color: [u8; 3],
    },
    /// Small filled disc, used for point-shaped markers.
    Dot {
        at: (i32, i32),
        radius: i32,
        color: [u8; 3],
    },
}

/// Everything a surface needs to show one frame.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub image: &'a RgbImage,
    pub primitives: &'a [DrawPrimitive],
}

/// Copy the scene's image and draw its primitives on top.
pub fn rasterize(scene: &Scene<'_>) -> RgbImage {
    let mut canvas = scene.image.clone();
    for primitive in scene.primitives {
        draw_primitive(&mut canvas, primitive);
    }
    canvas
}

pub fn draw_primitive(canvas: &mut RgbImage, primitive: &DrawPrimitive) {
    match *primitive {
        DrawPrimitive::Rectangle {
            rect,
            color,
            filled,
        } => {
            if filled {
                fill_rect(canvas, rect, Rgb(color));
            } else {
                stroke_rect(canvas, rect, Rgb(color));
            }
        }
        DrawPrimitive::Ellipse {
            center,
            semi_axes,
            color,
        } => stroke_ellipse(canvas, center, semi_axes, Rgb(color)),
        DrawPrimitive::Dot { at, radius, color } => fill_disc(canvas, at, radius, Rgb(color)),
    }
}

fn put(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
        return;
    }
    canvas.put_pixel(x as u32, y as u32, color);
}

fn stroke_rect(canvas: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    let left = i64::from(rect.x);
    let top = i64::from(rect.y);
    let right = i64::from(rect.right());
    let bottom = i64::from(rect.bottom());
    let (left, right) = (left.min(right), left.max(right));
    let (top, bottom) = (top.min(bottom), top.max(bottom));

    for x in left..=right {
        put(canvas, x, top, color);
        put(canvas, x, bottom, color);
    }
    for y in top..=bottom {
        put(canvas, left, y, color);
        put(canvas, right, y, color);
    }
}

fn fill_rect(canvas: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    for y in i64::from(rect.y)..=i64::from(rect.bottom()) {
        for x in i64::from(rect.x)..=i64::from(rect.right()) {
            put(canvas, x, y, color);
        }
    }
}

fn stroke_ellipse(canvas: &mut RgbImage, center: Point, semi_axes: (f64, f64), color: Rgb<u8>) {
    let (a, b) = semi_axes;
    // Enough samples that neighbouring points land at most a pixel apart.
    let steps = ((a.max(b) * std::f64::consts::TAU).ceil() as usize).max(8);
    for i in 0..steps {
        let t = i as f64 / steps as f64 * std::f64::consts::TAU;
        let x = (center.x + a * t.cos()).round() as i64;
        let y = (center.y + b * t.sin()).round() as i64;
        put(canvas, x, y, color);
    }
}

fn fill_disc(canvas: &mut RgbImage, at: (i32, i32), radius: i32, color: Rgb<u8>) {
    let r = i64::from(radius.max(0));
    let (cx, cy) = (i64::from(at.0), i64::from(at.1));
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                put(canvas, cx + dx, cy + dy, color);
            }
        }
    }
}
