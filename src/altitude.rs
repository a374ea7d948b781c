//! Scroll-to-altitude mapping for the HUD meter.
//!
//! Policy: one uniform linear ramp across the whole scrollable range, from
//! `max_altitude_ft` at the top of the document to `min_altitude_ft` at the
//! bottom, rounded to the nearest foot. Zone lookup scans the ordered floor
//! table top-down and picks the first zone whose floor the altitude still
//! meets. Both functions are pure and total: degenerate documents (shorter
//! than the viewport) pin the reading at the maximum, and overscrolled
//! offsets saturate instead of extrapolating.

use crate::model::{AltitudeMap, ScrollPosition, Zone};

pub fn compute_altitude(map: &AltitudeMap, pos: ScrollPosition) -> i32 {
    let span = f64::from(map.max_altitude_ft) - f64::from(map.min_altitude_ft);
    let raw = f64::from(map.max_altitude_ft) - pos.progress() * span;
    raw.round().clamp(
        f64::from(map.min_altitude_ft),
        f64::from(map.max_altitude_ft),
    ) as i32
}

pub fn compute_zone(map: &AltitudeMap, pos: ScrollPosition) -> Zone {
    let altitude = compute_altitude(map, pos);
    for floor in &map.floors {
        if altitude >= floor.floor_ft {
            return floor.zone;
        }
    }
    // Saturation clamps altitude to min_altitude_ft, which the validated
    // table's last floor reaches; this is only hit on an unvalidated map.
    map.floors.last().map(|f| f.zone).unwrap_or(Zone::Sky)
}

/// HUD label: `+N ft` for sea level and above, `-N ft` below.
pub fn format_altitude(altitude_ft: i32) -> String {
    if altitude_ft >= 0 {
        format!("+{altitude_ft} ft")
    } else {
        format!("-{} ft", altitude_ft.abs())
    }
}
