//! OSRM route service response types.
//!
//! Only the fields needed to extract a road polyline are modelled.

use serde::Deserialize;

use crate::domain::Coord;

/// Top-level response of `GET /route/v1/{profile}/{coordinates}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    /// "Ok" on success, otherwise an error code such as "NoRoute".
    pub code: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRoute {
    pub geometry: LineString,

    /// Metres along the road.
    #[serde(default)]
    pub distance: f64,
}

/// GeoJSON LineString with `[lon, lat]` positions.
#[derive(Debug, Clone, Deserialize)]
pub struct LineString {
    pub coordinates: Vec<[f64; 2]>,
}

impl LineString {
    pub fn to_coords(&self) -> Vec<Coord> {
        self.coordinates
            .iter()
            .map(|[lon, lat]| Coord::new(*lat, *lon))
            .collect()
    }
}

impl RouteResponse {
    /// Polyline of the first route, if the response contains a usable one.
    pub fn first_path(&self) -> Option<Vec<Coord>> {
        if self.code != "Ok" {
            return None;
        }
        let path = self.routes.first()?.geometry.to_coords();
        (path.len() >= 2).then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ok_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": { "type": "LineString", "coordinates": [[77.03174, 28.46524], [77.0330, 28.4680], [77.03405, 28.47069]] },
                "distance": 642.3,
                "duration": 460.1
            }],
            "waypoints": []
        }"#;
        let resp: RouteResponse = serde_json::from_str(json).unwrap();
        let path = resp.first_path().unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path[0], Coord::new(28.46524, 77.03174));
        assert_eq!(path[2], Coord::new(28.47069, 77.03405));
        assert!((resp.routes[0].distance - 642.3).abs() < f64::EPSILON);
    }

    #[test]
    fn no_route_code() {
        let json = r#"{ "code": "NoRoute", "message": "Impossible route between points" }"#;
        let resp: RouteResponse = serde_json::from_str(json).unwrap();
        assert!(resp.first_path().is_none());
        assert_eq!(resp.message.as_deref(), Some("Impossible route between points"));
    }

    #[test]
    fn degenerate_geometry_is_unusable() {
        let json = r#"{ "code": "Ok", "routes": [{ "geometry": { "coordinates": [[77.0, 28.0]] } }] }"#;
        let resp: RouteResponse = serde_json::from_str(json).unwrap();
        assert!(resp.first_path().is_none());
    }
}
