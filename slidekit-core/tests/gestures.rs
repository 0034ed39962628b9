mod support;

use slidekit_core::geometry::Length;
use slidekit_core::{
    Axis, EventKind, GoTarget, HeadlessHost, Mode, PointerKind, Propagation, SliderOptions,
};

use support::{mount, options, record, settle, transforms};

fn draggable(slides: usize, items: usize, width: f64) -> slidekit_core::Carousel<HeadlessHost> {
    mount(
        HeadlessHost::new(slides, width),
        SliderOptions {
            mouse_drag: true,
            ..options(items, false)
        },
    )
}

#[test]
fn drag_that_moved_swallows_exactly_one_click() {
    let mut slider = draggable(10, 2, 500.0);

    assert_eq!(
        slider.pointer_start(PointerKind::Mouse, 300.0, 50.0),
        Propagation::Prevent
    );
    assert_eq!(slider.pointer_move(100.0, 50.0), Propagation::Prevent);
    assert!(slider.is_dragging());
    assert_eq!(slider.pointer_end(100.0, 50.0), Propagation::Prevent);

    assert_eq!(slider.on_click(), Propagation::Prevent);
    assert_eq!(slider.on_click(), Propagation::Continue);
}

#[test]
fn press_without_movement_keeps_the_click() {
    let mut slider = draggable(10, 2, 500.0);

    slider.pointer_start(PointerKind::Mouse, 300.0, 50.0);
    assert_eq!(slider.pointer_end(300.0, 50.0), Propagation::Continue);
    assert_eq!(slider.on_click(), Propagation::Continue);
}

#[test]
fn cross_axis_movement_is_left_to_scrolling() {
    let mut slider = mount(HeadlessHost::new(6, 600.0), options(2, false));
    let ended = record(&mut slider, EventKind::TouchEnd);
    let before = transforms(slider.host());

    slider.pointer_start(PointerKind::Touch, 100.0, 100.0);
    assert_eq!(slider.pointer_move(100.0, 200.0), Propagation::Continue);
    assert_eq!(slider.pointer_move(104.0, 300.0), Propagation::Continue);
    slider.pointer_end(104.0, 300.0);

    assert_eq!(transforms(slider.host()), before);
    assert!(ended.borrow().is_empty());
    assert_eq!(slider.index(), 0);
}

#[test]
fn touch_lifecycle_emits_events_with_raw_input() {
    let mut slider = mount(HeadlessHost::new(6, 600.0), options(1, false));
    let started = record(&mut slider, EventKind::TouchStart);
    let moved = record(&mut slider, EventKind::TouchMove);
    let ended = record(&mut slider, EventKind::TouchEnd);

    slider.pointer_start(PointerKind::Touch, 500.0, 10.0);
    slider.pointer_move(400.0, 12.0);
    slider.pointer_move(300.0, 12.0);
    slider.pointer_end(200.0, 12.0);

    assert_eq!(started.borrow().len(), 1);
    assert_eq!(moved.borrow().len(), 2);
    assert_eq!(ended.borrow().len(), 1);
    // 300px over a 600px viewport showing one slide
    assert_eq!(slider.index(), 0);

    slider.pointer_start(PointerKind::Touch, 500.0, 10.0);
    slider.pointer_move(0.0, 10.0);
    slider.pointer_end(-150.0, 10.0);
    assert_eq!(slider.index(), 1);
}

#[test]
fn drag_preview_follows_pointer() {
    let mut slider = mount(HeadlessHost::new(10, 500.0), options(5, false));

    slider.pointer_start(PointerKind::Touch, 400.0, 100.0);
    slider.pointer_move(300.0, 100.0);

    // -100px * 5 items * 100 / (500px * 10 slides) = -10%
    assert_eq!(
        slider.host().transform().map(|t| t.value),
        Some(Length::Percent(-10.0))
    );
}

#[test]
fn vertical_release_snaps_to_offset_table() {
    let mut slider = mount(
        HeadlessHost::new(6, 400.0),
        SliderOptions {
            axis: Axis::Vertical,
            ..options(1, false)
        },
    );
    assert_eq!(slider.host().inner_height(), Some(100.0));

    slider.pointer_start(PointerKind::Touch, 50.0, 300.0);
    assert_eq!(slider.pointer_move(50.0, 160.0), Propagation::Prevent);
    assert_eq!(
        slider.host().transform().map(|t| t.value),
        Some(Length::Px(-140.0))
    );
    slider.pointer_end(50.0, 160.0);

    assert_eq!(slider.index(), 2);
    assert_eq!(
        slider.host().transform().map(|t| t.value),
        Some(Length::Px(-200.0))
    );
}

#[test]
fn steps_wait_for_the_drag_to_finish() {
    let mut slider = mount(HeadlessHost::new(6, 600.0), options(1, false));

    slider.pointer_start(PointerKind::Touch, 300.0, 10.0);
    slider.pointer_move(250.0, 10.0);
    assert!(!slider.go_to(GoTarget::Next));
    slider.pointer_cancel();

    assert!(!slider.is_dragging());
    assert_eq!(
        slider.host().transform().map(|t| t.value),
        Some(Length::Percent(0.0))
    );
    assert!(slider.go_to(GoTarget::Next));
}

#[test]
fn gestures_are_ignored_while_pending_and_in_galleries() {
    let mut slider = mount(HeadlessHost::new(6, 600.0), options(1, false));
    assert!(slider.go_to(GoTarget::Next));
    assert_eq!(
        slider.pointer_start(PointerKind::Touch, 10.0, 10.0),
        Propagation::Continue
    );
    assert_eq!(slider.pointer_move(200.0, 10.0), Propagation::Continue);
    settle(&mut slider);

    let mut gallery = mount(
        HeadlessHost::new(6, 600.0),
        SliderOptions {
            mode: Mode::Gallery,
            mouse_drag: true,
            ..options(1, true)
        },
    );
    assert_eq!(
        gallery.pointer_start(PointerKind::Mouse, 10.0, 10.0),
        Propagation::Continue
    );
    assert!(!gallery.is_dragging());
}
