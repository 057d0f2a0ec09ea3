//! Geodesic coordinates.

use std::fmt;

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// Tolerance (degrees) within which a vehicle is considered to be at a stop.
///
/// Roughly 11 m at the corridor's latitude.
pub const AT_STOP_TOLERANCE_DEG: f64 = 0.0001;

/// A latitude/longitude pair in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    /// Create a coordinate from latitude and longitude.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns true if both axes differ by strictly less than `tolerance_deg`.
    ///
    /// # Examples
    ///
    /// ```
    /// use corridor_server::domain::Coord;
    ///
    /// let a = Coord::new(28.46524, 77.03174);
    /// let b = Coord::new(28.46530, 77.03170);
    /// assert!(a.within(&b, 0.0001));
    /// assert!(!a.within(&Coord::new(28.4660, 77.0370), 0.0001));
    /// ```
    pub fn within(&self, other: &Coord, tolerance_deg: f64) -> bool {
        (self.lat - other.lat).abs() < tolerance_deg && (self.lon - other.lon).abs() < tolerance_deg
    }

    /// Returns true if neither axis is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Great-circle distance to `other` in metres.
    pub fn distance_m(&self, other: &Coord) -> f64 {
        self.to_point().haversine_distance(&other.to_point())
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

impl From<Point> for Coord {
    fn from(p: Point) -> Self {
        Coord::new(p.y(), p.x())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}
