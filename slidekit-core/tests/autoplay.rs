mod support;

use slidekit_core::autoplay::{AutoplayPhase, ButtonAction};
use slidekit_core::options::AutoplayDirection;
use slidekit_core::{
    Capabilities, Carousel, HeadlessHost, HostCommand, ListenerGroup, SliderOptions,
};

use support::{Clock, mount_at, options, settle};

fn autoplaying(
    clock: &Clock,
    looping: bool,
    tweak: impl FnOnce(&mut SliderOptions),
) -> Carousel<HeadlessHost> {
    let mut opts = SliderOptions {
        autoplay: true,
        autoplay_timeout: 1_000,
        ..options(1, looping)
    };
    tweak(&mut opts);
    mount_at(
        HeadlessHost::new(5, 500.0),
        opts,
        Capabilities::modern(),
        clock.now(),
    )
}

fn last_button(host: &HeadlessHost) -> Option<(ButtonAction, String)> {
    host.commands().iter().rev().find_map(|c| match c {
        HostCommand::SetAutoplayButton { action, text } => Some((*action, text.clone())),
        _ => None,
    })
}

#[test]
fn advances_once_per_interval() {
    let mut clock = Clock::new();
    let mut slider = autoplaying(&clock, false, |_| {});
    assert_eq!(slider.autoplay_phase(), AutoplayPhase::Running);

    slider.tick(clock.advance(999));
    assert_eq!(slider.index(), 0);

    slider.tick(clock.advance(1));
    assert_eq!(slider.index(), 1);
    settle(&mut slider);

    slider.tick(clock.advance(1_000));
    assert_eq!(slider.index(), 2);
}

#[test]
fn backward_direction_steps_back() {
    let mut clock = Clock::new();
    let mut slider = autoplaying(&clock, true, |o| {
        o.autoplay_direction = AutoplayDirection::Backward;
    });

    slider.tick(clock.advance(1_000));
    assert_eq!(slider.displayed(), 4);
}

#[test]
fn hover_stops_and_leaving_restarts() {
    let mut clock = Clock::new();
    let mut slider = autoplaying(&clock, false, |o| o.autoplay_hover_pause = true);
    assert!(slider.listeners().any(|g| g == ListenerGroup::Hover));

    assert!(slider.on_hover(true, clock.now()));
    assert_eq!(slider.autoplay_phase(), AutoplayPhase::Stopped);
    slider.tick(clock.advance(5_000));
    assert_eq!(slider.index(), 0);

    assert!(slider.on_hover(false, clock.now()));
    assert_eq!(slider.autoplay_phase(), AutoplayPhase::Running);
    slider.tick(clock.advance(1_000));
    assert_eq!(slider.index(), 1);
}

#[test]
fn leaving_without_a_hover_stop_does_not_start() {
    let mut clock = Clock::new();
    let mut slider = autoplaying(&clock, false, |o| o.autoplay_hover_pause = true);
    slider.pause();

    assert!(!slider.on_hover(false, clock.now()));
    slider.tick(clock.advance(5_000));
    assert_eq!(slider.autoplay_phase(), AutoplayPhase::Stopped);
    assert_eq!(slider.index(), 0);
}

#[test]
fn hidden_page_pauses_the_timer() {
    let mut clock = Clock::new();
    let mut slider = autoplaying(&clock, false, |_| {});
    assert!(slider.listeners().any(|g| g == ListenerGroup::Visibility));

    assert!(slider.on_visibility(true, clock.now()));
    assert_eq!(slider.autoplay_phase(), AutoplayPhase::Paused);
    slider.tick(clock.advance(10_000));
    assert_eq!(slider.index(), 0);

    assert!(slider.on_visibility(false, clock.now()));
    assert_eq!(slider.autoplay_phase(), AutoplayPhase::Running);
    slider.tick(clock.advance(1_000));
    assert_eq!(slider.index(), 1);
}

#[test]
fn button_toggles_and_shows_the_next_action() {
    let clock = Clock::new();
    let mut slider = autoplaying(&clock, false, |o| {
        o.autoplay_text = ["play".to_string(), "pause".to_string()];
    });
    assert_eq!(
        last_button(slider.host()),
        Some((ButtonAction::Stop, "pause".to_string()))
    );

    assert!(slider.toggle_autoplay(clock.now()));
    assert_eq!(slider.autoplay_phase(), AutoplayPhase::Stopped);
    assert_eq!(
        last_button(slider.host()),
        Some((ButtonAction::Start, "play".to_string()))
    );

    assert!(slider.toggle_autoplay(clock.now()));
    assert_eq!(
        last_button(slider.host()),
        Some((ButtonAction::Stop, "pause".to_string()))
    );
}

#[test]
fn starting_twice_keeps_the_schedule() {
    let mut clock = Clock::new();
    let mut slider = autoplaying(&clock, false, |_| {});

    clock.advance(600);
    assert!(!slider.play(clock.now()));
    slider.tick(clock.advance(400));
    assert_eq!(slider.index(), 1);
}
