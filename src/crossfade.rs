//! Discrete index crossfade for the sticky story sequence.
//!
//! Scroll position selects which section is active; the opacity change itself
//! runs on a fixed-duration clock, not on scroll. Rapid scrubbing retargets
//! mid-fade by resampling the current opacities, so values can never leave
//! `[0, 1]` and only one layer is ever the fade target.

use crate::error::{ScrollworkError, ScrollworkResult};

/// Which section a sticky-container progress value selects.
pub fn active_index(progress: f64, section_count: usize) -> usize {
    if section_count == 0 {
        return 0;
    }
    let p = progress.clamp(0.0, 1.0);
    ((p * section_count as f64).floor() as usize).min(section_count - 1)
}

/// Time-coupled opacity fades for a stack of crossfading layers.
#[derive(Clone, Debug)]
pub struct CrossfadeTracker {
    fade_ms: u64,
    target: usize,
    fade_start: Vec<f64>,
    started_at_ms: u64,
}

impl CrossfadeTracker {
    pub fn new(section_count: usize, fade_ms: u64) -> ScrollworkResult<Self> {
        if section_count == 0 {
            return Err(ScrollworkError::validation(
                "crossfade tracker needs at least one section",
            ));
        }
        if fade_ms == 0 {
            return Err(ScrollworkError::validation("fade_ms must be > 0"));
        }
        // Layer 0 starts fully visible, everything else hidden.
        let mut fade_start = vec![0.0; section_count];
        fade_start[0] = 1.0;
        Ok(Self {
            fade_ms,
            target: 0,
            fade_start,
            started_at_ms: 0,
        })
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn section_count(&self) -> usize {
        self.fade_start.len()
    }

    /// Feeds a scroll progress reading; begins a new fade if the active
    /// section changed. Out-of-range indices are clamped, never panic.
    pub fn observe(&mut self, progress: f64, now_ms: u64) {
        self.retarget(active_index(progress, self.section_count()), now_ms);
    }

    pub fn retarget(&mut self, index: usize, now_ms: u64) {
        let index = index.min(self.section_count() - 1);
        if index == self.target {
            return;
        }
        // Freeze the in-flight opacities as the new starting point.
        self.fade_start = self.opacities(now_ms);
        self.started_at_ms = now_ms;
        self.target = index;
    }

    /// Current opacity of every layer, each in `[0, 1]`.
    pub fn opacities(&self, now_ms: u64) -> Vec<f64> {
        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        let t = (elapsed as f64 / self.fade_ms as f64).clamp(0.0, 1.0);
        self.fade_start
            .iter()
            .enumerate()
            .map(|(i, &from)| {
                let goal = if i == self.target { 1.0 } else { 0.0 };
                (from + (goal - from) * t).clamp(0.0, 1.0)
            })
            .collect()
    }

    /// True once the fade toward the current target has finished.
    pub fn settled(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at_ms) >= self.fade_ms
    }
}
