//! End-to-end gate scenarios driven entirely by a virtual clock.

use scrollwork::{
    Ease, Evaluator, GateEvent, GateSpec, GateState, Journey, JourneyRuntime, ScrollGate,
    ScrollPosition, WheelDisposition,
};

fn pos(offset: f64) -> ScrollPosition {
    ScrollPosition::new(offset, 900.0, 5000.0)
}

fn locked_gate_at_dead_end() -> ScrollGate {
    let mut gate = ScrollGate::new(GateSpec::default()).unwrap();
    gate.set_floor(Some(4000.0));
    gate.set_unlock_target(Some(4200.0));
    gate.on_scroll(pos(3100.0));
    gate
}

#[test]
fn full_unlock_timeline_ends_clean() {
    let mut gate = locked_gate_at_dead_end();
    gate.activate();

    // Advance in small increments past zoom (800) + blackout (600) +
    // auto-scroll (1200); every stage must fire exactly once, in order.
    let mut all = Vec::new();
    let mut now = 0;
    while now <= 2600 {
        all.extend(gate.advance_to(now));
        now += 50;
    }

    assert_eq!(all.len(), 4);
    assert!(matches!(all[0], GateEvent::ZoomBegin { duration_ms: 800 }));
    assert!(matches!(all[1], GateEvent::BlackoutBegin { duration_ms: 600 }));
    let GateEvent::Unlocked { scroll } = &all[2] else {
        panic!("expected unlock");
    };
    assert_eq!(scroll.to_offset, 4200.0);
    assert_eq!(scroll.ease, Ease::OutQuart);
    assert!(matches!(all[3], GateEvent::BlackoutClear));

    assert_eq!(gate.state(), GateState::Unlocked);
    assert!(!gate.has_pending_stages());
}

#[test]
fn cover_is_still_up_when_the_section_is_revealed() {
    let mut gate = locked_gate_at_dead_end();
    gate.activate();

    // At the unlock instant the blackout has begun but not cleared: the
    // revealed section is never visible without the cover.
    let mut blackout_began = false;
    let mut cover_cleared = false;
    for event in gate.advance_to(1100) {
        match event {
            GateEvent::BlackoutBegin { .. } => blackout_began = true,
            GateEvent::BlackoutClear => cover_cleared = true,
            _ => {}
        }
    }
    assert_eq!(gate.state(), GateState::Unlocked);
    assert!(blackout_began);
    assert!(!cover_cleared);
}

#[test]
fn double_activate_produces_a_single_sequence() {
    let mut gate = locked_gate_at_dead_end();
    gate.activate();
    gate.activate();
    let events = gate.advance_to(10_000);
    let unlocks = events
        .iter()
        .filter(|e| matches!(e, GateEvent::Unlocked { .. }))
        .count();
    assert_eq!(unlocks, 1);
    assert_eq!(events.len(), 4);
}

#[test]
fn bounce_and_retreat_never_activates() {
    let mut gate = ScrollGate::new(GateSpec::default()).unwrap();
    gate.set_floor(Some(4000.0));

    // Push past the floor: resistance appears.
    gate.on_scroll(pos(3200.0));
    assert!(gate.raw_rubber_band() > 0.0);
    assert!(gate.raw_rubber_band() <= 50.0);

    // Retreat: the band releases immediately, and nothing ever unlocked.
    gate.on_scroll(pos(2000.0));
    assert_eq!(gate.raw_rubber_band(), 0.0);
    assert_eq!(gate.state(), GateState::Locked);
    assert!(gate.advance_to(60_000).is_empty());
    assert_eq!(gate.state(), GateState::Locked);
}

#[test]
fn hammering_the_wheel_respects_the_cap() {
    let mut gate = locked_gate_at_dead_end();
    let mut now = 0;
    for _ in 0..50 {
        let d = gate.on_wheel(480.0, pos(3100.0));
        assert_eq!(d, WheelDisposition::Suppress);
        assert!(gate.raw_rubber_band() <= 30.0);
        now += 20;
        gate.advance_to(now);
    }
    // Leave it alone: the last bounce decays away.
    gate.advance_to(now + 150);
    assert_eq!(gate.raw_rubber_band(), 0.0);
}

#[test]
fn evaluator_drives_the_same_timeline() {
    let s = include_str!("data/journey.json");
    let journey: Journey = serde_json::from_str(s).unwrap();
    let mut runtime = JourneyRuntime::new(&journey).unwrap();
    runtime.gate.set_floor(Some(4000.0));
    runtime.gate.set_unlock_target(Some(4200.0));

    Evaluator::eval_tick(&journey, &mut runtime, pos(3100.0), 0);
    runtime.gate.activate();

    let mut states = Vec::new();
    for now in (16..=2600).step_by(16) {
        let frame = Evaluator::eval_tick(&journey, &mut runtime, pos(3100.0), now);
        if states.last() != Some(&frame.gate) {
            states.push(frame.gate);
        }
    }
    assert_eq!(states, vec![GateState::Transitioning, GateState::Unlocked]);
    assert!(!runtime.gate.has_pending_stages());
}
