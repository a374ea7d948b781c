//! Parallax offset math.
//!
//! A layer with `speed == 1.0` is locked to scroll (zero relative
//! translation); slower layers lag behind (positive offset, background feel)
//! and faster layers lead (negative offset, foreground feel). Offsets are
//! continuous in the input progress, so a continuous scroll never snaps.

use crate::model::{ParallaxLayer, ScrollPosition};

/// Vertical translation for a layer, in percent of its own height.
///
/// `progress_in_target` is the fraction of the scroll window attached to the
/// layer's element: 0 when the element enters at the viewport bottom, 1 when
/// it exits past the top.
pub fn layer_offset_percent(progress_in_target: f64, speed: f64) -> f64 {
    progress_in_target.clamp(0.0, 1.0) * (1.0 - speed) * 100.0
}

/// Progress of an element through the viewport window, in `[0, 1]`.
///
/// Mirrors an enter-at-bottom / exit-at-top observation range: 0 while the
/// element's top is still below the viewport, 1 once its bottom has cleared
/// the top edge. Zero-height elements and zero-height viewports clamp to the
/// nearest endpoint instead of dividing by zero.
pub fn progress_through_viewport(
    element_top: f64,
    element_height: f64,
    pos: ScrollPosition,
) -> f64 {
    let travel = pos.viewport_height + element_height.max(0.0);
    if travel <= 0.0 {
        return 0.0;
    }
    ((pos.viewport_bottom() - element_top) / travel).clamp(0.0, 1.0)
}

/// Offsets for a full layer stack at one scroll instant.
///
/// Layers are returned in their configured (ascending z) order; speed never
/// reorders them.
pub fn scene_offsets(layers: &[ParallaxLayer], progress_in_target: f64) -> Vec<(String, f64)> {
    layers
        .iter()
        .map(|layer| {
            (
                layer.name.clone(),
                layer_offset_percent(progress_in_target, layer.speed),
            )
        })
        .collect()
}
