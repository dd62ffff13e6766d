use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use tracing::{debug, warn};

use crate::config::{GuideConfig, ViewerConfig};
use crate::consts::{MARKER_COLOR, POINT_MARKER_RADIUS};
use crate::geometry::{DisplayScale, Rect};
use crate::guide::{GuideModel, GuideShape};
use crate::host::Surface;
use crate::interaction::{EventOutcome, Interaction, PointerEvent};
use crate::markers::{AspectLock, MarkerStore};
use crate::render::{DrawPrimitive, Scene};

/// Snapshot of the viewer settings, for status display.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerStatus {
    pub fix_marker_ratio: bool,
    pub aspect_ratio: f64,
    pub accept_point_shape: bool,
    pub display_scale: f64,
    pub guide_shape: GuideShape,
    pub guide_visible: bool,
    pub marker_count: usize,
}

/// Marker editing state for the image currently on screen.
///
/// Markers are held in display space; [`markers`](Self::markers) and
/// [`set_markers`](Self::set_markers) translate to and from source space.
pub struct ViewerSession<S: Surface> {
    surface: S,
    title: Option<String>,
    /// Source image resized by the display scale.
    image: Option<RgbImage>,
    scale: DisplayScale,
    store: MarkerStore,
    guide: GuideModel,
    lock: AspectLock,
    accept_point: bool,
    interaction: Interaction,
}

impl<S: Surface> ViewerSession<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            title: None,
            image: None,
            scale: DisplayScale::default(),
            store: MarkerStore::new(),
            guide: GuideModel::default(),
            lock: AspectLock::default(),
            accept_point: false,
            interaction: Interaction::default(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn display_image(&self) -> Option<&RgbImage> {
        self.image.as_ref()
    }

    pub fn store(&self) -> &MarkerStore {
        &self.store
    }

    pub fn guide(&self) -> &GuideModel {
        &self.guide
    }

    pub fn aspect_lock(&self) -> AspectLock {
        self.lock
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn display_scale(&self) -> f64 {
        self.scale.get()
    }

    pub fn accepts_point_shape(&self) -> bool {
        self.accept_point
    }

    pub fn is_open(&self) -> bool {
        self.title.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn clear_dirty(&mut self) {
        self.store.clear_dirty();
    }

    /// Show `image` under `title`, replacing whatever was shown before.
    /// Markers, guide and settings carry over unchanged.
    pub fn open(&mut self, image: &DynamicImage, title: &str) {
        self.close();

        let rgb = image.to_rgb8();
        let (w, h) = self.scale.display_size(rgb.width(), rgb.height());
        let display = if (w, h) == rgb.dimensions() {
            rgb
        } else {
            imageops::resize(&rgb, w, h, FilterType::Triangle)
        };

        self.interaction.reset();
        self.surface.bind(title, display.width(), display.height());
        self.title = Some(title.to_string());
        self.image = Some(display);
        debug!(title, width = w, height = h, "Viewer opened");
        self.repaint();
    }

    pub fn close(&mut self) {
        if self.title.take().is_some() {
            self.surface.release();
        }
    }

    /// Markers in source space. Markers lying entirely outside the displayed
    /// image are left out; with no image loaded nothing is filtered.
    pub fn markers(&self) -> Vec<Rect> {
        self.store
            .as_slice()
            .iter()
            .filter(|r| match &self.image {
                Some(img) => r.overlaps_image(img.width(), img.height()),
                None => true,
            })
            .map(|r| self.scale.to_source(r))
            .collect()
    }

    /// Replace all markers with `source_rects` (source space).
    pub fn set_markers(&mut self, source_rects: &[Rect]) {
        let display = source_rects
            .iter()
            .map(|r| self.scale.to_display(r))
            .collect();
        self.store.replace_all(display);
        self.repaint();
    }

    pub fn delete_marker(&mut self) -> bool {
        let removed = self.store.remove_last().is_some();
        if removed {
            self.repaint();
        }
        removed
    }

    /// Shift and grow the active marker by `delta` (display pixels).
    pub fn reshape_marker(&mut self, delta: &Rect) -> bool {
        let changed = self.store.mutate_last(delta);
        if changed {
            self.repaint();
        }
        changed
    }

    pub fn resize_marker(&mut self, factor: f64) -> bool {
        let changed = self.store.resize_last(factor, &self.lock);
        if changed {
            self.repaint();
        }
        changed
    }

    /// Feed one pointer event from the host.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EventOutcome {
        let outcome =
            self.interaction
                .handle(event, &mut self.store, &self.lock, self.accept_point);
        if outcome.needs_repaint() {
            self.repaint();
        }
        outcome
    }

    /// Takes effect for markers on the next `open`/`set_markers`; the guide
    /// is re-projected immediately.
    pub fn set_display_scale(&mut self, scale: f64) -> bool {
        if !self.scale.set(scale) {
            warn!(scale, "Ignoring non-positive display scale");
            return false;
        }
        self.guide.rescale(&self.scale);
        true
    }

    /// Engaging the lock adopts the active marker's current proportions.
    pub fn toggle_aspect_lock(&mut self) -> bool {
        self.lock.enabled = !self.lock.enabled;
        if self.lock.enabled {
            if let Some(active) = self.store.active().filter(|r| r.has_area()) {
                self.lock
                    .set_ratio(f64::from(active.width) / f64::from(active.height));
            }
        }
        self.lock.enabled
    }

    pub fn set_aspect_ratio(&mut self, ratio: f64) -> bool {
        let accepted = self.lock.set_ratio(ratio);
        if !accepted {
            warn!(ratio, "Ignoring non-positive aspect ratio");
        }
        accepted
    }

    pub fn toggle_accept_point(&mut self) -> bool {
        self.accept_point = !self.accept_point;
        self.accept_point
    }

    pub fn toggle_guide(&mut self) -> bool {
        let visible = self.guide.toggle_visible();
        self.repaint();
        visible
    }

    pub fn show_guide(&mut self) {
        self.guide.set_visible(true);
        self.repaint();
    }

    pub fn set_guide_shape(&mut self, code: i32) -> bool {
        let accepted = self.guide.set_shape(code);
        if accepted {
            self.repaint();
        }
        accepted
    }

    /// `source` is in source-image pixels.
    pub fn set_guide_rectangle(&mut self, source: Rect) {
        self.guide.set_rectangle(source, &self.scale);
        self.repaint();
    }

    pub fn import_config(&mut self, config: &ViewerConfig) {
        self.scale = DisplayScale::new_or_default(config.display_scale);
        self.lock.enabled = config.fix_marker_ratio;
        self.lock.set_ratio(config.aspect_ratio);
        self.accept_point = config.accept_point_shape;

        self.guide = GuideModel::default();
        if let Some(guide) = &config.guide {
            self.guide.set_shape(guide.shape);
            self.guide.set_rectangle(guide.position, &self.scale);
            self.guide.set_visible(guide.display);
        }
        self.repaint();
    }

    pub fn export_config(&self) -> ViewerConfig {
        let guide = (self.guide.shape() != GuideShape::None).then(|| GuideConfig {
            shape: self.guide.shape().code(),
            position: self.guide.source_rect(),
            display: self.guide.is_visible(),
        });

        ViewerConfig {
            display_scale: self.scale.get(),
            fix_marker_ratio: self.lock.enabled,
            aspect_ratio: self.lock.ratio(),
            accept_point_shape: self.accept_point,
            guide,
        }
    }

    pub fn status(&self) -> ViewerStatus {
        ViewerStatus {
            fix_marker_ratio: self.lock.enabled,
            aspect_ratio: self.lock.ratio(),
            accept_point_shape: self.accept_point,
            display_scale: self.scale.get(),
            guide_shape: self.guide.shape(),
            guide_visible: self.guide.is_visible(),
            marker_count: self.store.len(),
        }
    }

    /// Overlay for the current state: guide, markers, then the drag in progress.
    pub fn draw_list(&self) -> Vec<DrawPrimitive> {
        let mut primitives: Vec<DrawPrimitive> = self.guide.primitive().into_iter().collect();

        primitives.extend(self.store.as_slice().iter().map(|r| {
            if r.width > 0 || r.height > 0 {
                DrawPrimitive::Rectangle {
                    rect: *r,
                    color: MARKER_COLOR,
                    filled: false,
                }
            } else {
                DrawPrimitive::Dot {
                    at: (r.x, r.y),
                    radius: POINT_MARKER_RADIUS,
                    color: MARKER_COLOR,
                }
            }
        }));

        if let Some(rect) = self.interaction.drag_rect() {
            primitives.push(DrawPrimitive::Rectangle {
                rect,
                color: MARKER_COLOR,
                filled: false,
            });
        }

        primitives
    }

    fn repaint(&mut self) {
        if !self.is_open() {
            return;
        }
        let Some(image) = &self.image else {
            return;
        };
        let primitives = self.draw_list();
        self.surface.present(&Scene {
            image,
            primitives: &primitives,
        });
    }
}
