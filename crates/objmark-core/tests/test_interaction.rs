use objmark_core::geometry::Rect;
use objmark_core::interaction::{Buttons, DragState, EventOutcome, Interaction, PointerEvent};
use objmark_core::markers::{AspectLock, MarkerStore};

fn drag(
    interaction: &mut Interaction,
    store: &mut MarkerStore,
    lock: &AspectLock,
    accept_point: bool,
    from: (i32, i32),
    to: (i32, i32),
) -> EventOutcome {
    interaction.handle(
        PointerEvent::PrimaryDown {
            x: from.0,
            y: from.1,
        },
        store,
        lock,
        accept_point,
    );
    interaction.handle(
        PointerEvent::Move {
            x: to.0,
            y: to.1,
            buttons: Buttons::PRIMARY,
        },
        store,
        lock,
        accept_point,
    );
    interaction.handle(
        PointerEvent::PrimaryUp { x: to.0, y: to.1 },
        store,
        lock,
        accept_point,
    )
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

#[test]
fn test_drag_commits_normalized_rect() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let outcome = drag(
        &mut interaction,
        &mut store,
        &AspectLock::default(),
        false,
        (30, 40),
        (10, 15),
    );

    assert_eq!(outcome, EventOutcome::Committed(Rect::new(10, 15, 20, 25)));
    assert_eq!(store.as_slice(), &[Rect::new(10, 15, 20, 25)]);
    assert_eq!(interaction.state(), DragState::Idle);
}

#[test]
fn test_drag_rect_tracks_pointer() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let lock = AspectLock::default();

    interaction.handle(PointerEvent::PrimaryDown { x: 5, y: 5 }, &mut store, &lock, false);
    assert!(interaction.is_dragging());
    assert_eq!(interaction.drag_rect(), Some(Rect::new(5, 5, 0, 0)));

    let outcome = interaction.handle(
        PointerEvent::Move {
            x: 15,
            y: 25,
            buttons: Buttons::PRIMARY | Buttons::SECONDARY,
        },
        &mut store,
        &lock,
        false,
    );
    assert_eq!(outcome, EventOutcome::DragUpdated);
    assert_eq!(interaction.drag_rect(), Some(Rect::new(5, 5, 10, 20)));
    assert!(store.is_empty());
}

#[test]
fn test_aspect_locked_drag_derives_height() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let lock = AspectLock::new(true, 2.0);

    let outcome = drag(&mut interaction, &mut store, &lock, false, (0, 0), (40, 7));
    assert_eq!(outcome, EventOutcome::Committed(Rect::new(0, 0, 40, 20)));
}

#[test]
fn test_aspect_locked_drag_leftward() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let lock = AspectLock::new(true, 2.0);

    let outcome = drag(&mut interaction, &mut store, &lock, false, (40, 20), (0, 99));
    assert_eq!(outcome, EventOutcome::Committed(Rect::new(0, 0, 40, 20)));
}

#[test]
fn test_zero_size_discarded_without_point_flag() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let outcome = drag(
        &mut interaction,
        &mut store,
        &AspectLock::default(),
        false,
        (10, 10),
        (10, 10),
    );

    assert_eq!(outcome, EventOutcome::Discarded);
    assert!(store.is_empty());
    assert!(!store.is_dirty());
}

#[test]
fn test_zero_size_kept_with_point_flag() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let outcome = drag(
        &mut interaction,
        &mut store,
        &AspectLock::default(),
        true,
        (10, 10),
        (10, 10),
    );

    assert_eq!(outcome, EventOutcome::Committed(Rect::new(10, 10, 0, 0)));
    assert_eq!(store.as_slice(), &[Rect::new(10, 10, 0, 0)]);
}

#[test]
fn test_zero_width_line_discarded() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let outcome = drag(
        &mut interaction,
        &mut store,
        &AspectLock::default(),
        false,
        (10, 10),
        (10, 30),
    );
    assert_eq!(outcome, EventOutcome::Discarded);
}

// ---------------------------------------------------------------------------
// Ignored input
// ---------------------------------------------------------------------------

#[test]
fn test_move_without_primary_is_ignored() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let lock = AspectLock::default();

    interaction.handle(PointerEvent::PrimaryDown { x: 0, y: 0 }, &mut store, &lock, false);
    let outcome = interaction.handle(
        PointerEvent::Move {
            x: 50,
            y: 50,
            buttons: Buttons::NONE,
        },
        &mut store,
        &lock,
        false,
    );
    assert_eq!(outcome, EventOutcome::Ignored);
    assert_eq!(interaction.drag_rect(), Some(Rect::new(0, 0, 0, 0)));
}

#[test]
fn test_move_while_idle_is_ignored() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let outcome = interaction.handle(
        PointerEvent::Move {
            x: 50,
            y: 50,
            buttons: Buttons::PRIMARY,
        },
        &mut store,
        &AspectLock::default(),
        false,
    );
    assert_eq!(outcome, EventOutcome::Ignored);
    assert_eq!(interaction.state(), DragState::Idle);
}

#[test]
fn test_release_while_idle_is_ignored() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let outcome = interaction.handle(
        PointerEvent::PrimaryUp { x: 3, y: 3 },
        &mut store,
        &AspectLock::default(),
        true,
    );
    assert_eq!(outcome, EventOutcome::Ignored);
    assert!(store.is_empty());
}

#[test]
fn test_second_press_restarts_drag() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let lock = AspectLock::default();

    interaction.handle(PointerEvent::PrimaryDown { x: 0, y: 0 }, &mut store, &lock, false);
    let outcome = drag(&mut interaction, &mut store, &lock, false, (20, 20), (30, 35));
    assert_eq!(outcome, EventOutcome::Committed(Rect::new(20, 20, 10, 15)));
    assert_eq!(store.len(), 1);
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[test]
fn test_secondary_click_selects_and_promotes() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    let a = Rect::new(0, 0, 20, 20);
    let b = Rect::new(50, 50, 20, 20);
    store.append(a);
    store.append(b);

    let outcome = interaction.handle(
        PointerEvent::SecondaryUp { x: 1, y: 10 },
        &mut store,
        &AspectLock::default(),
        false,
    );
    assert_eq!(outcome, EventOutcome::Selected(0));
    assert_eq!(store.active(), Some(&a));
}

#[test]
fn test_secondary_click_far_from_edges() {
    let mut interaction = Interaction::default();
    let mut store = MarkerStore::new();
    store.append(Rect::new(0, 0, 20, 20));

    let outcome = interaction.handle(
        PointerEvent::SecondaryUp { x: 1, y: 30 },
        &mut store,
        &AspectLock::default(),
        false,
    );
    assert_eq!(outcome, EventOutcome::NoSelection);
    assert!(!outcome.needs_repaint());
}
