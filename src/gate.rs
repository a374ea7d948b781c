//! The scroll-jail gate: a one-way state machine guarding the hidden final
//! section.
//!
//! While `Locked`, the gate watches scroll and wheel input against a floor
//! marker and answers forward motion at the dead end with bounded rubber-band
//! resistance instead of movement. `activate()` runs the timed unlock
//! sequence (zoom, blackout, reveal + programmed scroll) on a
//! [`StageSchedule`], so the whole choreography is replayable under a virtual
//! clock. There is no path back: once unlocked, the gate stays unlocked.
//!
//! Host contract: call [`ScrollGate::advance_to`] with the current time
//! before feeding input for a tick, execute any emitted [`ScrollCommand`]
//! verbatim, and honor [`WheelDisposition::Suppress`] by preventing the
//! default scroll action. Manual scrolling during the programmed scroll is
//! deliberately ignored (`is_auto_scrolling` tells the host how long); the
//! unlock sequence cannot be cancelled once started.
//!
//! If no floor marker has been measured the gate degrades to a no-op: no
//! resistance, no suppression, never an error from the scroll path.

use crate::{
    ease::Ease,
    error::ScrollworkResult,
    model::{GateSpec, ScrollPosition},
    sched::StageSchedule,
    spring::{Spring, SpringConfig},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    Locked,
    Transitioning,
    Unlocked,
}

/// What the host should do with a wheel event it just received.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDisposition {
    Allow,
    Suppress,
}

/// Programmed smooth scroll for the host to execute after the reveal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollCommand {
    pub from_offset: f64,
    pub to_offset: f64,
    pub duration_ms: u64,
    pub ease: Ease,
}

/// Outward-facing stage notifications, in guaranteed order per activation:
/// zoom, blackout, unlock, cover clear.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum GateEvent {
    ZoomBegin { duration_ms: u64 },
    BlackoutBegin { duration_ms: u64 },
    Unlocked { scroll: ScrollCommand },
    BlackoutClear,
}

#[derive(Clone, Copy, Debug)]
enum Stage {
    ZoomBegin,
    BlackoutBegin,
    Unlock,
    BlackoutClear,
    BandDecay { token: u64 },
}

#[derive(Clone, Debug)]
pub struct ScrollGate {
    spec: GateSpec,
    state: GateState,
    sched: StageSchedule<Stage>,
    floor_y: Option<f64>,
    unlock_target: Option<f64>,
    last_pos: Option<ScrollPosition>,
    raw_band: f64,
    band_spring: Spring,
    overscrolling: bool,
    decay_token: u64,
    auto_scroll_window: Option<(u64, u64)>,
}

impl ScrollGate {
    pub fn new(spec: GateSpec) -> ScrollworkResult<Self> {
        spec.validate()?;
        Ok(Self {
            spec,
            state: GateState::Locked,
            sched: StageSchedule::new(),
            floor_y: None,
            unlock_target: None,
            last_pos: None,
            raw_band: 0.0,
            band_spring: Spring::new(SpringConfig::rubber_band(), 0.0),
            overscrolling: false,
            decay_token: 0,
            auto_scroll_window: None,
        })
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Document-space Y of the locked content's floor marker. `None` while
    /// the marker is unmeasured, which disables all gating.
    pub fn set_floor(&mut self, floor_y: Option<f64>) {
        self.floor_y = floor_y;
    }

    /// Where the programmed scroll should land; defaults to the floor marker.
    pub fn set_unlock_target(&mut self, target_offset: Option<f64>) {
        self.unlock_target = target_offset;
    }

    /// Smoothed rubber-band offset for rendering.
    pub fn rubber_band(&self) -> f64 {
        self.band_spring.value()
    }

    /// Unsmoothed offset the spring is chasing.
    pub fn raw_rubber_band(&self) -> f64 {
        self.raw_band
    }

    /// Steps the rubber-band spring by `dt` seconds.
    pub fn tick_spring(&mut self, dt: f64) {
        self.band_spring.step(dt);
    }

    /// True while the post-unlock programmed scroll is still running; hosts
    /// swallow manual input for the duration.
    pub fn is_auto_scrolling(&self, now_ms: u64) -> bool {
        matches!(self.auto_scroll_window, Some((from, until)) if now_ms >= from && now_ms < until)
    }

    pub fn has_pending_stages(&self) -> bool {
        !self.sched.is_idle()
    }

    /// Scroll-position watch while locked: raises resistance proportional to
    /// how far past the floor the viewport has pushed, and releases it as
    /// soon as the user backs away.
    pub fn on_scroll(&mut self, pos: ScrollPosition) {
        self.last_pos = Some(pos);
        if self.state != GateState::Locked {
            return;
        }
        let Some(floor_y) = self.floor_y else {
            return;
        };

        let overscroll = pos.viewport_bottom() - floor_y;
        if overscroll > 0.0 {
            self.raw_band = (overscroll * self.spec.resistance).min(self.spec.max_offset);
            self.band_spring.set_target(self.raw_band);
            self.overscrolling = true;
        } else if self.overscrolling {
            self.release_band();
        }
    }

    /// Wheel watch: at the dead end, forward deltas are suppressed and turned
    /// into a short bounce that decays after `decay_ms`.
    pub fn on_wheel(&mut self, delta_y: f64, pos: ScrollPosition) -> WheelDisposition {
        self.last_pos = Some(pos);
        match self.state {
            GateState::Transitioning => return WheelDisposition::Suppress,
            GateState::Unlocked => {
                return if self.is_auto_scrolling(self.sched.now_ms()) {
                    WheelDisposition::Suppress
                } else {
                    WheelDisposition::Allow
                };
            }
            GateState::Locked => {}
        }

        let Some(floor_y) = self.floor_y else {
            return WheelDisposition::Allow;
        };

        let at_dead_end = pos.viewport_bottom() >= floor_y - self.spec.boundary_slack;
        if !(at_dead_end && delta_y > 0.0) {
            return WheelDisposition::Allow;
        }

        self.raw_band = (delta_y * self.spec.wheel_factor).min(self.spec.wheel_max_offset);
        self.band_spring.set_target(self.raw_band);
        self.decay_token += 1;
        self.sched.schedule_after(
            self.spec.decay_ms,
            Stage::BandDecay {
                token: self.decay_token,
            },
        );
        WheelDisposition::Suppress
    }

    /// Starts the unlock sequence. Valid only while `Locked`; calling it
    /// again mid-transition or after unlock is a safe no-op.
    pub fn activate(&mut self) {
        if self.state != GateState::Locked {
            tracing::debug!(state = ?self.state, "gate activate ignored");
            return;
        }
        tracing::debug!("gate activated, starting unlock sequence");
        self.state = GateState::Transitioning;
        self.release_band();

        let zoom = self.spec.zoom_ms;
        let blackout = self.spec.blackout_ms;
        let unlock_after = zoom + blackout / 2;

        self.sched.schedule_after(0, Stage::ZoomBegin);
        self.sched.schedule_after(zoom, Stage::BlackoutBegin);
        self.sched.schedule_after(unlock_after, Stage::Unlock);
        self.sched
            .schedule_after(unlock_after + self.spec.auto_scroll_ms, Stage::BlackoutClear);

        let unlock_at = self.sched.now_ms() + unlock_after;
        self.auto_scroll_window = Some((unlock_at, unlock_at + self.spec.auto_scroll_ms));
    }

    /// Moves the gate's clock forward and returns the stage events that came
    /// due, in their declared order.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<GateEvent> {
        let mut events = Vec::new();
        for stage in self.sched.advance_to(now_ms) {
            match stage {
                Stage::ZoomBegin => events.push(GateEvent::ZoomBegin {
                    duration_ms: self.spec.zoom_ms,
                }),
                Stage::BlackoutBegin => events.push(GateEvent::BlackoutBegin {
                    duration_ms: self.spec.blackout_ms,
                }),
                Stage::Unlock => {
                    self.state = GateState::Unlocked;
                    tracing::debug!("gate unlocked");
                    let from_offset = self.last_pos.map(|p| p.scroll_offset).unwrap_or(0.0);
                    let to_offset = self
                        .unlock_target
                        .or(self.floor_y)
                        .unwrap_or(from_offset);
                    events.push(GateEvent::Unlocked {
                        scroll: ScrollCommand {
                            from_offset,
                            to_offset,
                            duration_ms: self.spec.auto_scroll_ms,
                            ease: Ease::OutQuart,
                        },
                    });
                }
                Stage::BlackoutClear => events.push(GateEvent::BlackoutClear),
                Stage::BandDecay { token } => {
                    if token == self.decay_token && self.state == GateState::Locked {
                        self.release_band();
                    }
                }
            }
        }
        events
    }

    fn release_band(&mut self) {
        self.raw_band = 0.0;
        self.band_spring.set_target(0.0);
        self.overscrolling = false;
        self.decay_token += 1;
    }
}
