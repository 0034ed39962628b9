mod support;

use std::time::Duration;

use slidekit_core::geometry::Length;
use slidekit_core::host::DurationTarget;
use slidekit_core::options::SlideBy;
use slidekit_core::{
    EndTarget, EventKind, GoTarget, HeadlessHost, HostCommand, Key, Mode, PointerKind,
    SliderOptions,
};

use support::{Clock, mount, options, record, settle, transforms};

#[test]
fn loop_pages_forward_and_wraps_to_first_page() {
    let mut slider = mount(
        HeadlessHost::new(6, 900.0),
        SliderOptions {
            items: 3,
            slide_by: SlideBy::Count(3),
            ..SliderOptions::default()
        },
    );
    let start = slider.info();
    assert_eq!(start.clone_count, 12);
    assert_eq!(start.index, 12);
    assert_eq!(start.displayed, 0);

    assert!(slider.go_to(GoTarget::Next));
    assert_eq!(slider.displayed(), 3);
    assert_eq!(
        slider.host().transform().map(|t| t.value),
        Some(Length::Percent(-50.0))
    );
    settle(&mut slider);
    assert!(!slider.is_pending());

    assert!(slider.go_to(GoTarget::Next));
    settle(&mut slider);
    let info = slider.info();
    assert_eq!(info.displayed, 0);
    assert_eq!(info.items, 3);
    assert_eq!(info.index, info.index_cached);
}

#[test]
fn edge_padding_prev_at_minimum_is_a_no_op() {
    let mut slider = mount(
        HeadlessHost::new(5, 600.0),
        SliderOptions {
            edge_padding: Some(40.0),
            ..options(1, false)
        },
    );
    let info = slider.info();
    assert_eq!(info.index_min, 1);
    assert_eq!(info.index_max, 5);
    assert_eq!(info.index, 1);
    assert!(info.prev_disabled);

    let before = transforms(slider.host());
    assert!(!slider.go_to(GoTarget::Prev));
    assert!(!slider.on_controls_key(Key::Left));
    assert_eq!(slider.index(), 1);
    assert_eq!(transforms(slider.host()), before);
}

#[test]
fn short_drag_keeps_the_index() {
    let mut slider = mount(HeadlessHost::new(10, 500.0), options(5, false));

    slider.pointer_start(PointerKind::Touch, 100.0, 100.0);
    slider.pointer_move(150.0, 100.0);
    slider.pointer_end(150.0, 100.0);

    assert_eq!(slider.index(), 0);
    assert!(!slider.is_pending());
    // snapped back to the committed offset
    assert_eq!(
        slider.host().transform().map(|t| t.value),
        Some(Length::Percent(0.0))
    );
}

#[test]
fn long_drag_moves_whole_slides_toward_zero() {
    let mut slider = mount(HeadlessHost::new(10, 500.0), options(5, false));

    slider.pointer_start(PointerKind::Touch, 400.0, 100.0);
    slider.pointer_move(300.0, 100.0);
    slider.pointer_end(150.0, 100.0);

    // 250px * 5 items / 500px = 2.5 -> 2
    assert_eq!(slider.index(), 2);
    assert!(slider.is_pending());
}

#[test]
fn non_loop_index_stays_in_bounds() {
    let configs = [
        (5, 1, 1, None),
        (7, 2, 3, None),
        (6, 4, 1, Some(30.0)),
        (9, 3, 2, Some(10.0)),
    ];
    let moves = [
        GoTarget::Next,
        GoTarget::Next,
        GoTarget::Index(100),
        GoTarget::Next,
        GoTarget::Last,
        GoTarget::Next,
        GoTarget::Prev,
        GoTarget::Index(-3),
        GoTarget::First,
        GoTarget::Prev,
        GoTarget::Index(4),
    ];

    for (slides, items, slide_by, edge_padding) in configs {
        let mut slider = mount(
            HeadlessHost::new(slides, 800.0),
            SliderOptions {
                slide_by: SlideBy::Count(slide_by),
                edge_padding,
                ..options(items, false)
            },
        );
        for target in moves {
            slider.go_to(target);
            settle(&mut slider);
            let info = slider.info();
            assert!(
                info.index_min <= info.index && info.index <= info.index_max,
                "{target} left index {} outside [{}, {}]",
                info.index,
                info.index_min,
                info.index_max
            );
        }
    }
}

#[test]
fn loop_logical_slide_follows_net_steps() {
    let steps = [
        -1, 1, 1, 1, -1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    ];
    for mode in [Mode::Carousel, Mode::Gallery] {
        let mut slider = mount(
            HeadlessHost::new(5, 500.0),
            SliderOptions {
                mode,
                ..options(1, true)
            },
        );
        let mut net: isize = 0;

        for dir in steps {
            let target = if dir > 0 { GoTarget::Next } else { GoTarget::Prev };
            assert!(slider.go_to(target), "{mode:?} refused {target} after {net} steps");
            settle(&mut slider);
            net += dir;
            assert_eq!(slider.displayed(), net.rem_euclid(5) as usize, "{mode:?}");
            let info = slider.info();
            assert!(info.index_min <= info.index && info.index <= info.index_max);
        }
    }
}

#[test]
fn gallery_steps_back_from_the_first_slide() {
    let mut slider = mount(
        HeadlessHost::new(4, 400.0),
        SliderOptions {
            mode: Mode::Gallery,
            ..options(1, true)
        },
    );
    let info = slider.info();
    assert_eq!(info.index, 0);
    assert!(!info.prev_disabled);

    assert!(slider.go_to(GoTarget::Prev));
    assert_eq!(slider.displayed(), 3);
    settle(&mut slider);

    assert!(slider.on_controls_key(Key::Left));
    settle(&mut slider);
    assert_eq!(slider.displayed(), 2);
}

#[test]
fn loop_wraps_only_after_the_transition_ends() {
    let mut slider = mount(
        HeadlessHost::new(3, 300.0),
        SliderOptions {
            slide_by: SlideBy::Count(1),
            ..options(1, true)
        },
    );
    let changed = record(&mut slider, EventKind::IndexChanged);

    // walk up to the last index that does not need a wrap
    let right_edge = slider.info().index_max - 1;
    while slider.index() < right_edge {
        assert!(slider.go_to(GoTarget::Next));
        settle(&mut slider);
        assert_eq!(slider.index(), slider.index_cached());
    }
    let resting = slider.host().transform().map(|t| t.value.value()).unwrap();
    slider.host_mut().clear_commands();
    changed.borrow_mut().clear();

    // animated forward onto the clone, no jump yet
    assert!(slider.go_to(GoTarget::Next));
    let clone_index = slider.index();
    assert_eq!(clone_index, right_edge + 1);
    let animated = slider.host().transform().map(|t| t.value.value()).unwrap();
    assert!(animated < resting, "moved backward: {resting} -> {animated}");
    assert_eq!(transforms(slider.host()), 1);
    assert!(slider.host().commands().iter().any(|c| matches!(
        c,
        HostCommand::SetDuration { target: DurationTarget::Container, duration } if !duration.is_zero()
    )));
    assert_eq!(changed.borrow().len(), 1);
    let displayed = slider.displayed();

    slider.host_mut().clear_commands();
    assert!(slider.on_transition_end(EndTarget::Container));

    // then an instant jump back to the real slide showing the same content
    let commands = slider.host().commands();
    let reset = commands.iter().position(|c| {
        matches!(
            c,
            HostCommand::SetDuration { target: DurationTarget::Container, duration }
                if *duration == Duration::ZERO
        )
    });
    let jump = commands
        .iter()
        .position(|c| matches!(c, HostCommand::SetTransform { .. }));
    assert!(reset.is_some() && jump.is_some());
    assert!(reset < jump);

    assert!(slider.index() < clone_index);
    assert_eq!(slider.displayed(), displayed);
    let jumped = slider.host().transform().map(|t| t.value.value()).unwrap();
    assert!(jumped > animated);
    assert_eq!(changed.borrow().len(), 2);
    assert_eq!(slider.index(), slider.index_cached());
}

#[test]
fn render_without_movement_is_silent() {
    let mut slider = mount(HeadlessHost::new(5, 500.0), options(1, false));
    let started = record(&mut slider, EventKind::TransitionStart);
    let changed = record(&mut slider, EventKind::IndexChanged);
    let before = transforms(slider.host());

    assert!(!slider.go_to(GoTarget::Index(0)));
    assert!(!slider.go_to(GoTarget::First));

    assert_eq!(transforms(slider.host()), before);
    assert!(started.borrow().is_empty());
    assert!(changed.borrow().is_empty());
}

#[test]
fn last_then_first_returns_home() {
    for looping in [false, true] {
        let mut slider = mount(HeadlessHost::new(7, 700.0), options(2, looping));
        let initial = slider.index();

        assert!(slider.go_to(GoTarget::Last));
        settle(&mut slider);
        assert_eq!(slider.displayed(), 5);

        assert!(slider.go_to(GoTarget::First));
        settle(&mut slider);
        assert_eq!(slider.index(), initial);
    }
}

#[test]
fn frozen_slider_ignores_every_input() {
    let mut clock = Clock::new();
    let mut slider = mount(
        HeadlessHost::new(3, 900.0),
        SliderOptions {
            autoplay: true,
            arrow_keys: true,
            mouse_drag: true,
            ..options(3, false)
        },
    );
    assert!(slider.is_frozen());
    let index = slider.index();

    assert!(!slider.go_to(GoTarget::Next));
    assert!(!slider.go_to(GoTarget::Index(2)));
    assert!(!slider.go_to_str("last"));
    assert!(!slider.on_document_key(Key::Right));
    slider.pointer_start(PointerKind::Mouse, 300.0, 10.0);
    slider.pointer_move(10.0, 10.0);
    slider.pointer_end(10.0, 10.0);
    slider.tick(clock.advance(60_000));

    assert_eq!(slider.index(), index);
    assert!(!slider.is_pending());
}

#[test]
fn completion_runs_once_per_transition() {
    let mut slider = mount(HeadlessHost::new(5, 500.0), options(1, false));
    let ended = record(&mut slider, EventKind::TransitionEnd);

    assert!(slider.go_to(GoTarget::Next));
    // bubbled from a nested element
    assert!(!slider.on_transition_end(EndTarget::Other));
    assert!(slider.is_pending());
    // a second render is rejected while pending
    assert!(!slider.go_to(GoTarget::Next));

    assert!(slider.on_transition_end(EndTarget::Container));
    assert!(!slider.on_transition_end(EndTarget::Container));
    assert_eq!(ended.borrow().len(), 1);
    assert_eq!(slider.index_cached(), 1);
}

#[test]
fn malformed_string_target_is_ignored() {
    let mut slider = mount(HeadlessHost::new(5, 500.0), options(1, false));
    assert!(!slider.go_to_str("NaN"));
    assert_eq!(slider.index(), 0);
    assert!(slider.go_to_str("3"));
    assert_eq!(slider.index(), 3);
}
