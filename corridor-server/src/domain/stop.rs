//! Bus stop types.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::Coord;

/// Opaque, stable identifier for a stop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named bus stop.
///
/// Equality and hashing use the identifier only. Two stops may share a
/// name or a coordinate and still be distinct.
///
/// # Examples
///
/// ```
/// use corridor_server::domain::{Coord, Stop, StopId};
///
/// let a = Stop::new(StopId::new("a"), "Dharam Colony", Coord::new(28.5, 77.058));
/// let b = Stop::new(StopId::new("b"), "Dharam Colony", Coord::new(28.5, 77.058));
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct Stop {
    id: StopId,
    name: String,
    coord: Coord,
}

impl Stop {
    pub fn new(id: StopId, name: impl Into<String>, coord: Coord) -> Self {
        Self {
            id,
            name: name.into(),
            coord,
        }
    }

    pub fn id(&self) -> &StopId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
