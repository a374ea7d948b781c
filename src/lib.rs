#![forbid(unsafe_code)]

pub mod altitude;
pub mod composite;
pub mod crossfade;
pub mod ease;
pub mod error;
pub mod eval;
pub mod gate;
pub mod guide;
pub mod model;
pub mod parallax;
pub mod sched;
pub mod spring;

pub use altitude::{compute_altitude, compute_zone, format_altitude};
pub use composite::{blend_strip, crossfade as crossfade_px, flatten_layers, gradient_band_blend, over};
pub use crossfade::{CrossfadeTracker, active_index};
pub use ease::Ease;
pub use error::{ScrollworkError, ScrollworkResult};
pub use eval::{EvaluatedFrame, Evaluator, JourneyRuntime};
pub use gate::{GateEvent, GateState, ScrollCommand, ScrollGate, WheelDisposition};
pub use model::{
    AltitudeMap, CrossfadeSpec, GateSpec, Journey, ParallaxLayer, ScrollPosition, Zone, ZoneFloor,
};
pub use parallax::{layer_offset_percent, progress_through_viewport, scene_offsets};
pub use sched::StageSchedule;
pub use spring::{Spring, SpringConfig};
