use super::*;
use crate::sync::clock::{ManualClock, SharedStore};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn wrap_uses_half_open_range() {
    assert_eq!(wrap_frame_time(0.0, 4.0), 0.0);
    assert_eq!(wrap_frame_time(3.5, 4.0), 3.5);
    assert_eq!(wrap_frame_time(4.0, 4.0), 0.0);
    assert_eq!(wrap_frame_time(9.0, 4.0), 1.0);
    assert_eq!(wrap_frame_time(-1.0, 4.0), 0.0);
    assert_eq!(wrap_frame_time(f64::NAN, 4.0), 0.0);
    assert_eq!(wrap_frame_time(2.0, 0.0), 0.0);
}

#[test]
fn total_duration_has_a_floor() {
    assert_eq!(TimelineState::new(0.25).total_duration(), 1.0);
    assert_eq!(TimelineState::new(12.0).total_duration(), 12.0);
}

#[test]
fn nothing_runs_before_begin() {
    let mut clock = ManualClock::authority(SharedStore::new());
    let mut timeline = TimelineState::new(4.0);

    for _ in 0..3 {
        clock.advance(1.0);
        let tick = timeline.advance(&mut clock);
        assert_eq!(tick.phase, Phase::NotStarted);
        assert!(!tick.loop_restarted);
    }
    assert_eq!(clock.get_shared_f64(STARTED_KEY), Some(0.0));
}

#[test]
fn begin_anchors_at_current_time() {
    let mut clock = ManualClock::authority(SharedStore::new());
    let mut timeline = TimelineState::new(4.0);
    clock.set_now(100.0);
    timeline.advance(&mut clock);

    timeline.begin();
    clock.set_now(105.0);
    let first = timeline.advance(&mut clock);
    assert_eq!(first.phase, Phase::Running);
    assert_eq!(first.frame_time, 0.0);
    assert!(first.loop_restarted);

    clock.advance(1.5);
    let tick = timeline.advance(&mut clock);
    assert!(approx(tick.frame_time, 1.5));
    assert!(!tick.loop_restarted);
    assert_eq!(clock.get_shared_f64(STARTED_KEY), Some(1.0));
    assert_eq!(clock.get_shared_f64(FRAME_TIME_KEY), Some(tick.frame_time));
}

#[test]
fn loop_restart_fires_once_per_wrap() {
    let mut clock = ManualClock::authority(SharedStore::new());
    let mut timeline = TimelineState::new(4.0);
    timeline.begin();

    let mut restarts = 0;
    // 0.0 ..= 12.0 in 0.25s steps: three full loops plus the first tick.
    for _ in 0..=48 {
        let tick = timeline.advance(&mut clock);
        assert!((0.0..4.0).contains(&tick.frame_time), "{tick:?}");
        if tick.loop_restarted {
            restarts += 1;
        }
        clock.advance(0.25);
    }
    assert_eq!(restarts, 4);
}

#[test]
fn long_gap_still_lands_inside_the_loop() {
    let mut clock = ManualClock::authority(SharedStore::new());
    let mut timeline = TimelineState::new(3.0);
    timeline.begin();
    timeline.advance(&mut clock);
    clock.advance(1.0);
    assert!(!timeline.advance(&mut clock).loop_restarted);

    clock.advance(2999.5);
    let tick = timeline.advance(&mut clock);
    assert!(approx(tick.frame_time, 0.5));
    assert!(tick.loop_restarted);

    clock.advance(1.0);
    assert!(approx(timeline.advance(&mut clock).frame_time, 1.5));
}

#[test]
fn follower_tracks_authority() {
    let store = SharedStore::new();
    let mut lead = ManualClock::authority(store.clone());
    let mut follow = ManualClock::follower(store);
    // Different local clocks: only the authority's matters.
    follow.set_now(500.0);

    let mut lead_tl = TimelineState::new(10.0);
    let mut follow_tl = TimelineState::new(10.0);

    // Follower's own begin input is ignored.
    follow_tl.begin();
    lead_tl.advance(&mut lead);
    assert_eq!(follow_tl.advance(&mut follow).phase, Phase::NotStarted);

    lead_tl.begin();
    lead.advance(1.0);
    lead_tl.advance(&mut lead);
    let f = follow_tl.advance(&mut follow);
    assert_eq!(f.phase, Phase::Running);
    assert_eq!(f.frame_time, 0.0);

    for step in 1..=30 {
        lead.advance(0.5);
        follow.advance(0.7);
        let l = lead_tl.advance(&mut lead);
        let f = follow_tl.advance(&mut follow);
        assert_eq!(l.frame_time, f.frame_time, "step {step}");
        assert_eq!(l.loop_restarted, f.loop_restarted, "step {step}");
    }
}

#[test]
fn huge_times_wrap_without_stalling() {
    let t = wrap_frame_time(1e18, 10.0);
    assert!((0.0..10.0).contains(&t), "{t}");
    assert!((0.0..3.0).contains(&wrap_frame_time(f64::MAX, 3.0)));
    // Below the bound the subtraction result is unchanged.
    assert!(approx(wrap_frame_time(123.5, 10.0), 3.5));
}

#[test]
fn follower_survives_a_huge_shared_frame_time() {
    let store = SharedStore::new();
    store.set(STARTED_KEY, 1.0);
    store.set(FRAME_TIME_KEY, 1e17);
    let mut follow = ManualClock::follower(store);

    let tick = TimelineState::new(10.0).advance(&mut follow);
    assert_eq!(tick.phase, Phase::Running);
    assert!((0.0..10.0).contains(&tick.frame_time), "{tick:?}");
}

#[test]
fn authority_survives_a_huge_local_clock_jump() {
    let mut clock = ManualClock::authority(SharedStore::new());
    let mut timeline = TimelineState::new(10.0);
    timeline.begin();
    timeline.advance(&mut clock);

    clock.set_now(1e18);
    let tick = timeline.advance(&mut clock);
    assert!((0.0..10.0).contains(&tick.frame_time), "{tick:?}");

    clock.advance(1.0);
    let next = timeline.advance(&mut clock);
    assert!((0.0..10.0).contains(&next.frame_time), "{next:?}");
}
