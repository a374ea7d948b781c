use crate::error::{ScrollworkError, ScrollworkResult};

/// Immutable snapshot of the host's scroll metrics, taken once per event tick.
///
/// Every consumer (altitude mapper, parallax engine, gate) reads the same
/// snapshot within a tick, so they can never disagree about where the page is.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollPosition {
    pub scroll_offset: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollPosition {
    /// Builds a snapshot, sanitizing transient layout-churn values: negative
    /// or non-finite inputs clamp rather than error.
    pub fn new(scroll_offset: f64, viewport_height: f64, document_height: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            scroll_offset: sanitize(scroll_offset),
            viewport_height: sanitize(viewport_height),
            document_height: sanitize(document_height),
        }
    }

    /// Largest reachable scroll offset. Zero when the document fits in the
    /// viewport.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    /// Overall progress through the scrollable range, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.scroll_offset / self.max_scroll().max(1.0)).clamp(0.0, 1.0)
    }

    /// Document-space Y of the viewport's bottom edge.
    pub fn viewport_bottom(&self) -> f64 {
        self.scroll_offset + self.viewport_height
    }
}

/// Named segment of the journey, ordered top (highest altitude) to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Sky,
    Forest,
    Rocky,
    Coastal,
    Roots,
    Burrows,
    Datacenter,
}

impl Zone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sky => "sky",
            Self::Forest => "forest",
            Self::Rocky => "rocky",
            Self::Coastal => "coastal",
            Self::Roots => "roots",
            Self::Burrows => "burrows",
            Self::Datacenter => "datacenter",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zone and the lowest altitude (in feet) at which it is still current.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ZoneFloor {
    pub zone: Zone,
    pub floor_ft: i32,
}

/// Altitude mapping table: a linear ramp between two endpoints plus an
/// ordered list of zone floors scanned top-down.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AltitudeMap {
    pub max_altitude_ft: i32,
    pub min_altitude_ft: i32,
    pub floors: Vec<ZoneFloor>,
}

impl Default for AltitudeMap {
    fn default() -> Self {
        Self {
            max_altitude_ft: 500,
            min_altitude_ft: -100,
            floors: vec![
                ZoneFloor { zone: Zone::Sky, floor_ft: 400 },
                ZoneFloor { zone: Zone::Forest, floor_ft: 250 },
                ZoneFloor { zone: Zone::Rocky, floor_ft: 100 },
                ZoneFloor { zone: Zone::Coastal, floor_ft: 0 },
                ZoneFloor { zone: Zone::Roots, floor_ft: -40 },
                ZoneFloor { zone: Zone::Burrows, floor_ft: -80 },
                ZoneFloor { zone: Zone::Datacenter, floor_ft: -100 },
            ],
        }
    }
}

impl AltitudeMap {
    pub fn validate(&self) -> ScrollworkResult<()> {
        if self.min_altitude_ft > self.max_altitude_ft {
            return Err(ScrollworkError::validation(
                "min_altitude_ft must be <= max_altitude_ft",
            ));
        }
        if self.floors.is_empty() {
            return Err(ScrollworkError::validation(
                "altitude map must declare at least one zone floor",
            ));
        }
        if !self
            .floors
            .windows(2)
            .all(|w| w[0].floor_ft > w[1].floor_ft)
        {
            return Err(ScrollworkError::validation(
                "zone floors must be strictly descending",
            ));
        }
        let last = self.floors[self.floors.len() - 1];
        if last.floor_ft > self.min_altitude_ft {
            return Err(ScrollworkError::validation(format!(
                "lowest zone floor ({} ft) must reach min_altitude_ft ({} ft)",
                last.floor_ft, self.min_altitude_ft
            )));
        }
        if self.floors[0].floor_ft > self.max_altitude_ft {
            return Err(ScrollworkError::validation(
                "topmost zone floor exceeds max_altitude_ft",
            ));
        }
        Ok(())
    }
}

/// One full-bleed background layer.
///
/// `z` is the compositing order (ascending, back to front) and is independent
/// of `speed`: a fast foreground layer never jumps in front of a slower layer
/// with a higher `z`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ParallaxLayer {
    pub name: String,
    /// 1.0 moves with scroll, < 1.0 lags (background), > 1.0 leads (foreground).
    pub speed: f64,
    pub z: i32,
}

/// Sticky multi-section crossfade configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CrossfadeSpec {
    pub section_count: usize,
    /// Fixed crossfade duration; the fade is time-coupled, not scroll-coupled.
    pub fade_ms: u64,
}

impl Default for CrossfadeSpec {
    fn default() -> Self {
        Self {
            section_count: 3,
            fade_ms: 800,
        }
    }
}

/// Scroll-jail gate configuration: rubber-band feel plus the timed unlock
/// stage durations.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GateSpec {
    /// Fraction of overscroll depth converted into rubber-band offset.
    pub resistance: f64,
    /// Hard cap on the scroll-driven rubber-band offset.
    pub max_offset: f64,
    /// Fraction of a suppressed wheel delta converted into bounce.
    pub wheel_factor: f64,
    /// Hard cap on the wheel-driven bounce.
    pub wheel_max_offset: f64,
    /// Delay before a wheel bounce snaps back to zero.
    pub decay_ms: u64,
    /// Tolerance below the floor marker at which wheel events already count
    /// as boundary hits.
    pub boundary_slack: f64,
    pub zoom_ms: u64,
    pub blackout_ms: u64,
    pub auto_scroll_ms: u64,
}

impl Default for GateSpec {
    fn default() -> Self {
        Self {
            resistance: 0.3,
            max_offset: 50.0,
            wheel_factor: 0.15,
            wheel_max_offset: 30.0,
            decay_ms: 150,
            boundary_slack: 10.0,
            zoom_ms: 800,
            blackout_ms: 600,
            auto_scroll_ms: 1200,
        }
    }
}

impl GateSpec {
    pub fn validate(&self) -> ScrollworkResult<()> {
        for (name, v) in [
            ("resistance", self.resistance),
            ("max_offset", self.max_offset),
            ("wheel_factor", self.wheel_factor),
            ("wheel_max_offset", self.wheel_max_offset),
            ("boundary_slack", self.boundary_slack),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ScrollworkError::validation(format!(
                    "gate {name} must be finite and >= 0"
                )));
            }
        }
        if self.zoom_ms == 0 || self.blackout_ms == 0 || self.auto_scroll_ms == 0 {
            return Err(ScrollworkError::validation(
                "gate stage durations must be > 0 ms",
            ));
        }
        Ok(())
    }
}

/// The whole configured journey: altitude table, background layers, the
/// sticky crossfade sequence, and the gate.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Journey {
    #[serde(default)]
    pub altitude: AltitudeMap,
    pub layers: Vec<ParallaxLayer>,
    #[serde(default)]
    pub crossfade: CrossfadeSpec,
    #[serde(default)]
    pub gate: GateSpec,
}

impl Journey {
    /// Parses a journey from its JSON configuration and validates it, so a
    /// loaded journey is always internally consistent.
    pub fn from_json(s: &str) -> ScrollworkResult<Self> {
        let journey: Journey =
            serde_json::from_str(s).map_err(|e| ScrollworkError::serde(e.to_string()))?;
        journey.validate()?;
        Ok(journey)
    }

    pub fn validate(&self) -> ScrollworkResult<()> {
        self.altitude.validate()?;

        for layer in &self.layers {
            if layer.name.trim().is_empty() {
                return Err(ScrollworkError::validation("layer name must be non-empty"));
            }
            if !layer.speed.is_finite() || layer.speed <= 0.0 {
                return Err(ScrollworkError::validation(format!(
                    "layer '{}' speed must be finite and > 0",
                    layer.name
                )));
            }
        }
        if !self.layers.windows(2).all(|w| w[0].z <= w[1].z) {
            return Err(ScrollworkError::validation(
                "layers must be listed in ascending z order",
            ));
        }

        if self.crossfade.section_count == 0 {
            return Err(ScrollworkError::validation(
                "crossfade section_count must be > 0",
            ));
        }
        if self.crossfade.fade_ms == 0 {
            return Err(ScrollworkError::validation("crossfade fade_ms must be > 0"));
        }

        self.gate.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_journey() -> Journey {
        Journey {
            altitude: AltitudeMap::default(),
            layers: vec![
                ParallaxLayer {
                    name: "clouds".to_string(),
                    speed: 0.5,
                    z: 0,
                },
                ParallaxLayer {
                    name: "canopy".to_string(),
                    speed: 1.2,
                    z: 1,
                },
            ],
            crossfade: CrossfadeSpec::default(),
            gate: GateSpec::default(),
        }
    }

    #[test]
    fn json_roundtrip() {
        let journey = basic_journey();
        let s = serde_json::to_string_pretty(&journey).unwrap();
        let de: Journey = serde_json::from_str(&s).unwrap();
        assert_eq!(de.layers.len(), 2);
        assert_eq!(de.altitude.max_altitude_ft, 500);
        de.validate().unwrap();
    }

    #[test]
    fn validate_rejects_inverted_altitude_endpoints() {
        let mut journey = basic_journey();
        journey.altitude.max_altitude_ft = -200;
        assert!(journey.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_floor_table() {
        let mut journey = basic_journey();
        journey.altitude.floors.clear();
        assert!(journey.validate().is_err());
    }

    #[test]
    fn validate_rejects_unsorted_floors() {
        let mut journey = basic_journey();
        journey.altitude.floors.swap(0, 3);
        assert!(journey.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_layer_speed() {
        let mut journey = basic_journey();
        journey.layers[0].speed = 0.0;
        assert!(journey.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_stage_duration() {
        let mut journey = basic_journey();
        journey.gate.blackout_ms = 0;
        assert!(journey.validate().is_err());
    }

    #[test]
    fn from_json_flags_malformed_input_as_serde() {
        let err = Journey::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ScrollworkError::Serde(_)));
    }

    #[test]
    fn from_json_still_validates_parsed_config() {
        let err = Journey::from_json(r#"{ "layers": [{ "name": "clouds", "speed": 0.0, "z": 0 }] }"#)
            .unwrap_err();
        assert!(matches!(err, ScrollworkError::Validation(_)));
    }

    #[test]
    fn snapshot_sanitizes_garbage_metrics() {
        let pos = ScrollPosition::new(-10.0, f64::NAN, 3000.0);
        assert_eq!(pos.scroll_offset, 0.0);
        assert_eq!(pos.viewport_height, 0.0);
        assert_eq!(pos.document_height, 3000.0);
    }

    #[test]
    fn progress_is_zero_when_document_fits_viewport() {
        let pos = ScrollPosition::new(0.0, 900.0, 600.0);
        assert_eq!(pos.max_scroll(), 0.0);
        assert_eq!(pos.progress(), 0.0);
    }
}
