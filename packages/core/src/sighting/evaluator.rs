//! Sighting evaluation
//!
//! Pure functions combining the observer position, the station position,
//! and the daylight window into a per-cycle outcome. No I/O, no state.

use crate::sighting::types::{Coordinate, DaylightWindow, SightingOutcome, TimeOfDay};

/// True iff the observer sits inside the square tolerance box centred on
/// the station, both bounds inclusive.
///
/// Known limitation: no wraparound at the ±180° longitude seam or the
/// poles. An observer at longitude 179° and a station at -179° are
/// treated as 358° apart.
pub fn is_within_range(observer: Coordinate, iss: Coordinate, tolerance: f64) -> bool {
    let lat_in_range = (iss.latitude - tolerance) <= observer.latitude
        && observer.latitude <= (iss.latitude + tolerance);
    let lon_in_range = (iss.longitude - tolerance) <= observer.longitude
        && observer.longitude <= (iss.longitude + tolerance);
    lat_in_range && lon_in_range
}

/// True iff `now` falls outside the daylight window.
///
/// Exactly-sunrise and exactly-sunset both count as day: the comparison
/// is strict on both ends, matching the behavior callers already depend
/// on for the boundary minutes.
pub fn is_night(now: TimeOfDay, window: DaylightWindow) -> bool {
    now < window.sunrise || now > window.sunset
}

/// Combine containment and the day/night split into a single outcome.
pub fn evaluate(
    observer: Coordinate,
    iss: Coordinate,
    window: DaylightWindow,
    now: TimeOfDay,
    tolerance: f64,
) -> SightingOutcome {
    if !is_within_range(observer, iss, tolerance) {
        return SightingOutcome::NotOverhead;
    }

    if is_night(now, window) {
        SightingOutcome::OverheadNight
    } else {
        SightingOutcome::OverheadDaylight
    }
}
