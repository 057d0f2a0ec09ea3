//! Nearest-stop lookup.

use std::sync::Arc;

use crate::domain::{Coord, Stop};

/// Find the stop closest to `position` by great-circle distance.
///
/// Ties go to the stop that comes first in `stops`. Returns `None` only
/// when `stops` is empty.
pub fn nearest_stop<'a>(position: Coord, stops: &'a [Arc<Stop>]) -> Option<&'a Arc<Stop>> {
    let mut best: Option<(&Arc<Stop>, f64)> = None;

    for stop in stops {
        let d = position.distance_m(&stop.coord());
        match best {
            // Only a strictly closer stop replaces the best; NaN never does.
            Some((_, best_d)) if d.total_cmp(&best_d).is_ge() => {}
            _ => best = Some((stop, d)),
        }
    }

    best.map(|(stop, _)| stop)
}
