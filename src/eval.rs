//! Per-tick evaluation: one scroll snapshot in, one frame of outputs out.
//!
//! The host reads its scroll metrics exactly once per event tick, builds a
//! [`ScrollPosition`], and hands it here. All three consumers (altitude
//! mapper, parallax engine, gate) see that same snapshot, which is what
//! guarantees they never disagree about where the page is within a tick.
//! The resulting [`EvaluatedFrame`] is plain serializable data, so whole
//! scroll sessions can be digested and snapshot-tested.

use crate::{
    altitude::{compute_altitude, compute_zone, format_altitude},
    crossfade::CrossfadeTracker,
    error::ScrollworkResult,
    gate::{GateEvent, GateState, ScrollGate},
    model::{Journey, ScrollPosition, Zone},
    parallax::scene_offsets,
};

/// Mutable per-session state: the gate machine, the crossfade fades, and the
/// previous tick's clock reading (for spring integration).
#[derive(Clone, Debug)]
pub struct JourneyRuntime {
    pub gate: ScrollGate,
    pub crossfade: CrossfadeTracker,
    last_tick_ms: Option<u64>,
}

impl JourneyRuntime {
    pub fn new(journey: &Journey) -> ScrollworkResult<Self> {
        journey.validate()?;
        Ok(Self {
            gate: ScrollGate::new(journey.gate.clone())?,
            crossfade: CrossfadeTracker::new(
                journey.crossfade.section_count,
                journey.crossfade.fade_ms,
            )?,
            last_tick_ms: None,
        })
    }
}

/// Everything the presentation layer needs for one tick.
#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedFrame {
    pub now_ms: u64,
    pub altitude_ft: i32,
    pub altitude_label: String,
    pub zone: Zone,
    pub layer_offsets: Vec<(String, f64)>,
    pub crossfade_index: usize,
    pub crossfade_opacities: Vec<f64>,
    pub gate: GateState,
    pub rubber_band: f64,
    pub events: Vec<GateEvent>,
}

pub struct Evaluator;

impl Evaluator {
    /// Evaluates one tick. `pos` must be the single snapshot taken for this
    /// tick; `now_ms` the host clock. Never errors: scroll-path conditions
    /// clamp or no-op by design.
    #[tracing::instrument(skip(journey, runtime))]
    pub fn eval_tick(
        journey: &Journey,
        runtime: &mut JourneyRuntime,
        pos: ScrollPosition,
        now_ms: u64,
    ) -> EvaluatedFrame {
        // Timed stages first, so this tick's inputs see the current state.
        let events = runtime.gate.advance_to(now_ms);

        let dt_ms = runtime
            .last_tick_ms
            .map(|last| now_ms.saturating_sub(last))
            .unwrap_or(0);
        runtime.last_tick_ms = Some(now_ms);
        if dt_ms > 0 {
            runtime.gate.tick_spring(dt_ms as f64 / 1000.0);
        }

        runtime.gate.on_scroll(pos);
        runtime.crossfade.observe(pos.progress(), now_ms);

        let altitude_ft = compute_altitude(&journey.altitude, pos);
        EvaluatedFrame {
            now_ms,
            altitude_ft,
            altitude_label: format_altitude(altitude_ft),
            zone: compute_zone(&journey.altitude, pos),
            layer_offsets: scene_offsets(&journey.layers, pos.progress()),
            crossfade_index: runtime.crossfade.target(),
            crossfade_opacities: runtime.crossfade.opacities(now_ms),
            gate: runtime.gate.state(),
            rubber_band: runtime.gate.rubber_band(),
            events,
        }
    }
}
