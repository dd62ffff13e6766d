use tracing::debug;

use crate::consts::HIT_TEST_THRESHOLD;
use crate::geometry::{Point, Rect};
use crate::markers::{AspectLock, MarkerStore};

/// Mouse button bitmask delivered with move events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buttons(pub u32);

impl Buttons {
    pub const NONE: Self = Self(0);
    pub const PRIMARY: Self = Self(1);
    pub const SECONDARY: Self = Self(1 << 1);
    pub const MIDDLE: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Pointer input from the host, in display-space pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    PrimaryDown { x: i32, y: i32 },
    Move { x: i32, y: i32, buttons: Buttons },
    PrimaryUp { x: i32, y: i32 },
    SecondaryUp { x: i32, y: i32 },
}

/// What an event did, so the session knows whether to repaint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    DragStarted,
    DragUpdated,
    Committed(Rect),
    Discarded,
    Selected(usize),
    NoSelection,
}

impl EventOutcome {
    pub fn needs_repaint(&self) -> bool {
        matches!(
            self,
            Self::DragStarted | Self::DragUpdated | Self::Committed(_) | Self::Selected(_)
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { origin: Point, current: Point },
}

/// Pointer state machine. Drag rectangles become markers on primary release;
/// there is no way to abandon a drag other than releasing it at zero size.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    state: DragState,
}

impl Interaction {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    /// The in-progress drag rectangle, if any.
    pub fn drag_rect(&self) -> Option<Rect> {
        match self.state {
            DragState::Dragging { origin, current } => Some(Rect::from_corners(origin, current)),
            DragState::Idle => None,
        }
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        store: &mut MarkerStore,
        lock: &AspectLock,
        accept_point: bool,
    ) -> EventOutcome {
        match event {
            PointerEvent::PrimaryDown { x, y } => {
                let p = Point::new(f64::from(x), f64::from(y));
                self.state = DragState::Dragging {
                    origin: p,
                    current: p,
                };
                EventOutcome::DragStarted
            }
            PointerEvent::Move { x, y, buttons } => {
                if !buttons.contains(Buttons::PRIMARY) {
                    return EventOutcome::Ignored;
                }
                let DragState::Dragging { origin, current } = &mut self.state else {
                    return EventOutcome::Ignored;
                };
                current.x = f64::from(x);
                current.y = match lock.active_ratio() {
                    Some(ratio) => origin.y + (current.x - origin.x) / ratio,
                    None => f64::from(y),
                };
                EventOutcome::DragUpdated
            }
            PointerEvent::PrimaryUp { .. } => {
                let Some(rect) = self.drag_rect() else {
                    return EventOutcome::Ignored;
                };
                self.state = DragState::Idle;

                if (rect.width == 0 || rect.height == 0) && !accept_point {
                    debug!(?rect, "Zero-size drag discarded");
                    return EventOutcome::Discarded;
                }
                store.append(rect);
                EventOutcome::Committed(rect)
            }
            PointerEvent::SecondaryUp { x, y } => {
                match store.select_nearest(x, y, HIT_TEST_THRESHOLD) {
                    Some(idx) => {
                        store.promote(idx);
                        debug!(index = idx, "Marker selected");
                        EventOutcome::Selected(idx)
                    }
                    None => EventOutcome::NoSelection,
                }
            }
        }
    }
}
