use std::collections::HashMap;

use crate::model::Location;
use crate::{RouteGraphError, StatusOr};

/// The immutable set of locations a map is drawn from, in authoring order.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    locations: Vec<Location>,
    index: HashMap<String, usize>,
}

impl LocationTable {
    /// Build a table, rejecting duplicate names.
    pub fn from_locations(locations: Vec<Location>) -> StatusOr<Self> {
        let mut index = HashMap::with_capacity(locations.len());
        for (i, location) in locations.iter().enumerate() {
            if index.insert(location.name.clone(), i).is_some() {
                return Err(RouteGraphError::DuplicateLocation(location.name.clone()));
            }
        }

        Ok(Self { locations, index })
    }

    pub fn index_of(&self, name: &str) -> StatusOr<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| RouteGraphError::LocationNotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> StatusOr<&Location> {
        self.index_of(name).map(|i| &self.locations[i])
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    fn location(name: &str) -> Location {
        Location::new(name, Position::default(), vec![])
    }

    #[test]
    fn test_lookup_by_name() {
        let table = LocationTable::from_locations(vec![location("Spawn"), location("Kanave")]).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.index_of("Kanave").unwrap(), 1);
        assert_eq!(table.get("Spawn").unwrap().name, "Spawn");
    }

    #[test]
    fn test_unknown_location() {
        let table = LocationTable::from_locations(vec![location("Spawn")]).unwrap();

        assert_eq!(
            table.get("Nowhere").unwrap_err(),
            RouteGraphError::LocationNotFound("Nowhere".to_string())
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = LocationTable::from_locations(vec![location("Spawn"), location("Kanave"), location("Spawn")])
            .unwrap_err();

        assert_eq!(err, RouteGraphError::DuplicateLocation("Spawn".to_string()));
    }
}
