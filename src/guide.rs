//! # Scrollwork guide
//!
//! This module is a standalone walkthrough of Scrollwork's architecture and
//! public API. If you are looking for copy/paste commands, start with the
//! repository `README.md`. If you are implementing new features, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`ScrollPosition`](crate::ScrollPosition): an immutable snapshot of
//!   `{scroll_offset, viewport_height, document_height}` taken once per event
//!   tick
//! - [`Journey`](crate::Journey): the validated configuration — altitude
//!   table, parallax layers, crossfade sections, gate tuning
//! - [`Evaluator`](crate::Evaluator): fans one snapshot out to every consumer
//!   and returns an [`EvaluatedFrame`](crate::EvaluatedFrame)
//! - [`ScrollGate`](crate::ScrollGate): the one-way state machine guarding the
//!   hidden section
//! - [`StageSchedule`](crate::StageSchedule): virtual-clock timer queue that
//!   makes every timed sequence replayable in tests
//!
//! The per-tick flow is explicitly staged:
//!
//! 1. Host reads scroll metrics once and builds a `ScrollPosition`
//! 2. [`Evaluator::eval_tick`](crate::Evaluator::eval_tick) advances the gate
//!    clock, feeds the snapshot to the altitude mapper, parallax engine,
//!    crossfade tracker, and gate
//! 3. Host renders the returned frame and executes any
//!    [`GateEvent`](crate::GateEvent)s (zoom, blackout, programmed scroll,
//!    cover clear)
//!
//! ---
//!
//! ## "One snapshot per tick" (and why)
//!
//! The altitude meter, the parallax layers, and the gate are independent
//! observers of the same scroll signal; none of them calls into another. If
//! each read the host's scroll offset at a slightly different moment they
//! could disagree about where the page is within a single tick. Scrollwork
//! therefore never reads the environment itself: the host samples its
//! metrics once, and everything downstream is a pure function of that
//! snapshot (plus the gate's explicit clock).
//!
//! This is also what makes whole sessions serializable: an
//! `EvaluatedFrame` is plain data, so a scripted scroll session can be
//! digested and snapshot-tested (see `tests/eval_snapshot.rs`).
//!
//! ---
//!
//! ## Failure philosophy
//!
//! Configuration is validated eagerly ([`Journey::validate`](crate::Journey),
//! [`ScrollGate::new`](crate::ScrollGate::new)) and rejects bad input with
//! [`ScrollworkError::Validation`](crate::ScrollworkError). The per-tick
//! scroll path, by contrast, is total: out-of-range offsets clamp, a missing
//! floor marker turns gating into a no-op, and nothing on the event path ever
//! returns an error. A broken scroll handler would silently kill all future
//! scrolling in a browser-style host, so degraded visuals always win over a
//! thrown error.
//!
//! ---
//!
//! ## The gate, in one paragraph
//!
//! While `Locked`, forward input at the floor marker is suppressed and
//! answered with a bounded rubber-band offset (raw value from the event,
//! smoothed by an RK4 [`Spring`](crate::Spring) for rendering).
//! [`ScrollGate::activate`](crate::ScrollGate::activate) is the only way
//! forward: it schedules zoom → blackout → unlock → cover-clear on the stage
//! schedule, flips the state to `Unlocked` halfway through the blackout, and
//! emits a non-cancellable [`ScrollCommand`](crate::ScrollCommand) for the
//! host to execute with an `OutQuart` ease. Manual input during that
//! programmed scroll is ignored by design; there is no path back to `Locked`.
//!
//! ---
//!
//! ## Pixel previews
//!
//! [`gradient_band_blend`](crate::gradient_band_blend) and
//! [`blend_strip`](crate::blend_strip) reproduce the designed zone-transition
//! composites: two backgrounds joined by a linear vertical ramp, interpolated
//! on stored bytes with no gamma correction. The `scrollwork blend` CLI
//! subcommand wraps them for quick asset previews, and
//! [`flatten_layers`](crate::flatten_layers) realizes the crossfade tracker's
//! opacity outputs as actual pixels when a rendered preview is wanted.
