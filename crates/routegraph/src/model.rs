use serde::{Deserialize, Serialize};

/// A world coordinate. The map is drawn in the x-z plane, `y` is carried
/// along but never projected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Position> for [f64; 3] {
    fn from(position: Position) -> Self {
        position.to_array()
    }
}

/// A waypoint as authored. `None` on an axis means "same as the previous
/// point on this edge".
pub type PartialWaypoint = [Option<f64>; 3];

/// Travel time as written in the config: either `"M:SS"`, a bare integer
/// string, or a plain number of seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Seconds(u32),
    Text(String),
}

/// One entry of a location's destination list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawDestination")]
pub enum DestinationSpec {
    /// Straight connection, no travel time.
    Direct { target: String },
    Detailed {
        target: String,
        duration: Option<RawDuration>,
        waypoints: Vec<PartialWaypoint>,
    },
}

impl DestinationSpec {
    pub fn target(&self) -> &str {
        match self {
            DestinationSpec::Direct { target } | DestinationSpec::Detailed { target, .. } => target,
        }
    }
}

// Config shape: a bare string, or `[target, duration?, waypoints?]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDestination {
    Name(String),
    Tuple(DestinationTuple),
}

#[derive(Deserialize)]
struct DestinationTuple(
    String,
    #[serde(default)] Option<RawDuration>,
    #[serde(default)] Option<Vec<PartialWaypoint>>,
);

impl From<RawDestination> for DestinationSpec {
    fn from(raw: RawDestination) -> Self {
        match raw {
            RawDestination::Name(target) => DestinationSpec::Direct { target },
            RawDestination::Tuple(DestinationTuple(target, duration, waypoints)) => DestinationSpec::Detailed {
                target,
                duration,
                waypoints: waypoints.unwrap_or_default(),
            },
        }
    }
}

/// A named point on the map together with the routes leaving it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub name: String,

    #[serde(rename = "location", alias = "position")]
    pub position: Position,

    #[serde(default)]
    pub destinations: Vec<DestinationSpec>,
}

impl Location {
    pub fn new(name: impl Into<String>, position: Position, destinations: Vec<DestinationSpec>) -> Self {
        Self {
            name: name.into(),
            position,
            destinations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_destination_shapes() {
        let specs: Vec<DestinationSpec> = serde_json::from_str(
            r#"["Spawn", ["Kanave", "1:15"], ["Montcuq", null, [[526, null, null]]], ["Midnorth", 54], ["Solo"]]"#,
        )
        .unwrap();

        assert_eq!(specs[0], DestinationSpec::Direct { target: "Spawn".to_string() });
        assert_eq!(
            specs[1],
            DestinationSpec::Detailed {
                target: "Kanave".to_string(),
                duration: Some(RawDuration::Text("1:15".to_string())),
                waypoints: vec![],
            }
        );
        assert_eq!(
            specs[2],
            DestinationSpec::Detailed {
                target: "Montcuq".to_string(),
                duration: None,
                waypoints: vec![[Some(526.0), None, None]],
            }
        );
        assert_eq!(
            specs[3],
            DestinationSpec::Detailed {
                target: "Midnorth".to_string(),
                duration: Some(RawDuration::Seconds(54)),
                waypoints: vec![],
            }
        );
        assert_eq!(specs[4].target(), "Solo");
    }

    #[test]
    fn test_parse_location() {
        let location: Location = serde_json::from_str(
            r#"{"name": "Kanave", "location": [360, 59, -132], "destinations": ["Montcuq"]}"#,
        )
        .unwrap();

        assert_eq!(location.name, "Kanave");
        assert_eq!(location.position, Position::new(360.0, 59.0, -132.0));
        assert_eq!(location.destinations.len(), 1);
    }

    #[test]
    fn test_location_without_destinations() {
        let location: Location = serde_json::from_str(r#"{"name": "Island", "position": [1, 2, 3]}"#).unwrap();
        assert!(location.destinations.is_empty());
    }
}
