use super::*;
use crate::foundation::core::TICK_INTERVAL;
use crate::scene::model::Objects;

fn frames(n: usize) -> Vec<Frame> {
    (0..n)
        .map(|i| Frame::new(format!("f{i}"), Objects::new()))
        .collect()
}

fn loaded(n: usize) -> PlaybackController {
    let mut c = PlaybackController::default();
    c.load(frames(n));
    c
}

fn message(c: &PlaybackController) -> &str {
    &c.current_frame().unwrap().message
}

#[test]
fn empty_history_is_idle() {
    let mut c = loaded(0);
    assert_eq!(c.state(), PlaybackState::Idle);
    assert_eq!(c.index(), None);
    assert!(c.current_frame().is_none());
    assert!(!c.step_forward(Millis(0)));
    assert!(!c.play(Millis(0)));
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn load_resets_to_first_frame_ready() {
    let mut c = loaded(4);
    assert_eq!(c.state(), PlaybackState::Ready);
    assert_eq!(c.index(), Some(0));
    c.scrub_to(3, Millis(0));
    c.load(frames(2));
    assert_eq!(c.index(), Some(0));
    assert_eq!(c.len(), 2);
}

#[test]
fn steps_are_clamped_at_both_ends() {
    let mut c = loaded(3);
    assert!(!c.step_back(Millis(0)));
    assert_eq!(c.index(), Some(0));
    assert!(c.step_forward(Millis(0)));
    assert!(c.step_forward(Millis(0)));
    assert_eq!(message(&c), "f2");
    assert!(!c.step_forward(Millis(0)));
    assert_eq!(c.index(), Some(2));
    assert!(c.step_back(Millis(0)));
    assert_eq!(c.index(), Some(1));
}

#[test]
fn scrub_clamps_and_keeps_ready() {
    let mut c = loaded(5);
    assert!(c.scrub_to(99, Millis(0)));
    assert_eq!(c.index(), Some(4));
    assert_eq!(c.state(), PlaybackState::Ready);
    assert!(!c.scrub_to(4, Millis(0)));
    assert!(c.scrub_to(1, Millis(0)));
    assert_eq!(message(&c), "f1");
}

#[test]
fn play_runs_to_the_end_then_stops() {
    let mut c = loaded(4);
    assert!(c.play(Millis(0)));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.next_deadline(), Some(TICK_INTERVAL));

    assert_eq!(c.advance(Millis(399)), 0);
    assert_eq!(c.index(), Some(0));
    assert_eq!(c.advance(Millis(400)), 1);
    assert_eq!(c.index(), Some(1));
    assert_eq!(c.advance(Millis(800)), 1);
    assert_eq!(c.advance(Millis(1200)), 1);

    assert_eq!(c.index(), Some(3));
    assert_eq!(c.state(), PlaybackState::Ready);
    assert_eq!(c.next_deadline(), None);
    assert_eq!(c.advance(Millis(100_000)), 0);
    assert_eq!(c.index(), Some(3));
}

#[test]
fn late_advance_catches_up_without_overshooting() {
    let mut c = loaded(3);
    c.play(Millis(10));
    assert_eq!(c.advance(Millis(10_000)), 2);
    assert_eq!(c.index(), Some(2));
    assert_eq!(c.state(), PlaybackState::Ready);
}

#[test]
fn play_at_last_frame_is_a_no_op() {
    let mut c = loaded(3);
    c.scrub_to(2, Millis(0));
    assert!(!c.play(Millis(0)));
    assert_eq!(c.state(), PlaybackState::Ready);
    assert_eq!(c.next_deadline(), None);

    let mut single = loaded(1);
    assert!(!single.play(Millis(0)));
    assert_eq!(single.next_deadline(), None);
}

#[test]
fn pause_cancels_pending_tick() {
    let mut c = loaded(5);
    c.play(Millis(0));
    let token = c.pending_tick().unwrap();
    assert!(c.pause());
    assert_eq!(c.state(), PlaybackState::Ready);
    assert_eq!(c.next_deadline(), None);
    assert!(!c.fire(token, Millis(400)));
    assert_eq!(c.advance(Millis(5_000)), 0);
    assert_eq!(c.index(), Some(0));
    assert!(!c.pause());
}

#[test]
fn toggle_flips_between_ready_and_playing() {
    let mut c = loaded(3);
    assert!(c.toggle(Millis(0)));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert!(c.toggle(Millis(0)));
    assert_eq!(c.state(), PlaybackState::Ready);
}

#[test]
fn replacing_history_while_playing_cancels_the_tick() {
    let mut c = loaded(5);
    c.play(Millis(0));
    c.advance(Millis(400));
    let orphan = c.pending_tick().unwrap();

    c.load(frames(3));
    assert_eq!(c.state(), PlaybackState::Ready);
    assert_eq!(c.index(), Some(0));
    assert_eq!(c.next_deadline(), None);

    assert!(!c.fire(orphan, Millis(800)));
    assert_eq!(c.advance(Millis(10_000)), 0);
    assert_eq!(c.index(), Some(0));
}

#[test]
fn stepping_while_playing_restarts_the_interval() {
    let mut c = loaded(6);
    c.play(Millis(0));
    let first = c.pending_tick().unwrap();
    assert!(c.step_forward(Millis(300)));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.next_deadline(), Some(Millis(700)));
    assert!(!c.fire(first, Millis(400)));

    assert_eq!(c.advance(Millis(699)), 0);
    assert_eq!(c.advance(Millis(700)), 1);
    assert_eq!(c.index(), Some(2));
}

#[test]
fn scrubbing_to_the_end_while_playing_stops() {
    let mut c = loaded(6);
    c.play(Millis(0));
    assert!(c.scrub_to(5, Millis(100)));
    assert_eq!(c.state(), PlaybackState::Ready);
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn scrubbing_back_while_playing_keeps_playing() {
    let mut c = loaded(6);
    c.play(Millis(0));
    c.advance(Millis(1200));
    assert_eq!(c.index(), Some(3));
    assert!(c.scrub_to(0, Millis(1250)));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.next_deadline(), Some(Millis(1650)));
}

#[test]
fn fire_advances_with_a_live_token() {
    let mut c = loaded(3);
    c.play(Millis(0));
    let token = c.pending_tick().unwrap();
    assert!(c.fire(token, Millis(400)));
    assert_eq!(c.index(), Some(1));
    assert_eq!(c.next_deadline(), Some(Millis(800)));
    assert!(!c.fire(token, Millis(400)));
}

#[test]
fn custom_interval_is_honoured() {
    let mut c = PlaybackController::new(PlaybackOpts::new(Millis(50)).unwrap());
    c.load(frames(3));
    c.play(Millis(0));
    assert_eq!(c.advance(Millis(100)), 2);
    assert_eq!(c.index(), Some(2));
}
