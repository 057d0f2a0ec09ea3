//! Built-in seed for the Gurugram 222C corridor.
//!
//! Coordinates past Sector 12 Chowk are approximate survey points.

use std::sync::Arc;

use crate::domain::{Coord, DomainError, Route, RouteId, Stop, StopId, Vehicle, VehicleId};

use super::Registry;

/// Stops from Gurugram Bus Stand to Ram Mandir, in UP order.
const STOPS: &[(&str, &str, f64, f64)] = &[
    ("gurugram-bus-stand", "Gurugram Bus Stand", 28.46524, 77.03174),
    ("sector-12-chowk", "Sector - 12 Chowk", 28.47069, 77.03405),
    ("rajeev-nagar-chowk", "Rajeev Nagar chowk", 28.4660, 77.0370),
    ("crpf-camp-chowk", "CRPF Camp Chowk", 28.4680, 77.0390),
    ("sheetla-mata-a", "Sheetla Mata Mandir (A)", 28.4700, 77.0410),
    ("sheetla-mata-b", "Sheetla Mata Mandir (B)", 28.4705, 77.0415),
    ("sector-5-ramlila", "Sector - 5 Ramlila Ground", 28.4730, 77.0430),
    ("ashok-vihar-petrol", "Ashok Vihar Phase 2 Petrol Pump", 28.4760, 77.0450),
    ("ashok-vihar-ext", "Ashok Vihar Phase III Extension", 28.4800, 77.0480),
    ("park-view-residency", "Park View Residency", 28.4850, 77.0500),
    ("palam-block-c1", "Palam Vihar Block C1/Ashok Vihar Phase III", 28.4900, 77.0520),
    ("krishna-chowk", "Krishna Chowk Palam Vihar", 28.4950, 77.0550),
    ("dharam-colony", "Dharam Colony", 28.5000, 77.0580),
    ("carterpuri-village", "Carterpuri Village", 28.5050, 77.0600),
    ("columbia-asia", "Columbia Asia Hospital", 28.5100, 77.0620),
    ("cosmos-apartment", "Cosmos Executive Apartment", 28.5150, 77.0650),
    ("ram-mandir", "Ram Mandir Palam Vihar", 28.5200, 77.0700),
];

/// Static buses: (id, route label, direction, stop they are parked at).
const BUSES: &[(&str, &str, &str, &str)] = &[
    ("bus-1", "222C UP", "UP", "gurugram-bus-stand"),
    ("bus-2", "222C UP", "UP", "ashok-vihar-ext"),
    ("bus-3", "222C DOWN", "DOWN", "krishna-chowk"),
    ("bus-4", "222C DOWN", "DOWN", "sector-5-ramlila"),
];

/// Build the 222C corridor: an UP route, its reversed DOWN route and four buses.
pub fn gurugram_222c() -> Result<Registry, DomainError> {
    let stops: Vec<Arc<Stop>> = STOPS
        .iter()
        .map(|(id, name, lat, lon)| {
            Arc::new(Stop::new(StopId::new(*id), *name, Coord::new(*lat, *lon)))
        })
        .collect();

    let up = Route::new(RouteId::new("222c-up"), "222C UP", stops.clone(), "blue")?;
    let down = up.reversed(RouteId::new("222c-down"), "222C DOWN", "red");

    let vehicles = BUSES
        .iter()
        .map(|(id, label, direction, at)| -> Result<Vehicle, DomainError> {
            let stop_id = StopId::new(*at);
            let stop = stops
                .iter()
                .find(|s| s.id() == &stop_id)
                .ok_or(DomainError::UnknownStop(stop_id.clone()))?;
            Ok(Vehicle::new(VehicleId::new(*id), *label, stop.coord(), *direction))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Registry::new(stops, vec![up, down], vehicles))
}
