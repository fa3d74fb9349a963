use rayon::prelude::*;
use serde::Serialize;

use crate::model::{DestinationSpec, Location, PartialWaypoint, Position, RawDuration};
use crate::table::LocationTable;
use crate::{RouteGraphError, StatusOr};

/// A directed connection with every implicit coordinate filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEdge {
    pub source: String,
    pub target: String,
    pub duration_seconds: Option<u32>,
    pub waypoints: Vec<Position>,
}

impl ResolvedEdge {
    /// Number of points in the endpoint-inclusive path.
    pub fn hop_count(&self) -> usize {
        self.waypoints.len() + 2
    }

    /// `[source] + waypoints + [target]`.
    pub fn hops(&self, table: &LocationTable) -> StatusOr<Vec<Position>> {
        let source = table.get(&self.source)?;
        let target = table.get(&self.target)?;

        let mut hops = Vec::with_capacity(self.hop_count());
        hops.push(source.position);
        hops.extend_from_slice(&self.waypoints);
        hops.push(target.position);
        Ok(hops)
    }
}

/// Parse `"M:SS"` or a bare integer string into seconds.
pub fn parse_duration(raw: &str) -> StatusOr<u32> {
    let malformed = || RouteGraphError::MalformedDuration(raw.to_string());
    let text = raw.trim();

    // At most one ':', both sides plain digits
    match text.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = parse_digits(minutes).ok_or_else(malformed)?;
            let seconds = parse_digits(seconds).ok_or_else(malformed)?;
            // Seconds may exceed 59, they just add up
            minutes
                .checked_mul(60)
                .and_then(|m| m.checked_add(seconds))
                .ok_or_else(malformed)
        }
        None => parse_digits(text).ok_or_else(malformed),
    }
}

fn parse_digits(part: &str) -> Option<u32> {
    // No signs, no whitespace, no decimals
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn duration_seconds(duration: Option<&RawDuration>) -> StatusOr<Option<u32>> {
    match duration {
        None => Ok(None),
        Some(RawDuration::Seconds(seconds)) => Ok(Some(*seconds)),
        Some(RawDuration::Text(text)) => parse_duration(text).map(Some),
    }
}

/// Fill unspecified axes from the closest preceding explicit value, starting
/// at `origin`.
pub fn resolve_waypoints(origin: Position, raw: &[PartialWaypoint]) -> Vec<Position> {
    // Carried across hops, so each axis sticks until overridden
    let mut last = origin.to_array();
    raw.iter()
        .map(|hop| {
            for (axis, value) in hop.iter().enumerate() {
                if let Some(value) = value {
                    last[axis] = *value;
                }
            }
            Position::from(last)
        })
        .collect()
}

/// Resolve a single destination of `source`. The target name is not checked.
pub fn resolve_destination(source: &Location, spec: &DestinationSpec) -> StatusOr<ResolvedEdge> {
    match spec {
        DestinationSpec::Direct { target } => Ok(ResolvedEdge {
            source: source.name.clone(),
            target: target.clone(),
            duration_seconds: None,
            waypoints: Vec::new(),
        }),
        DestinationSpec::Detailed { target, duration, waypoints } => Ok(ResolvedEdge {
            source: source.name.clone(),
            target: target.clone(),
            duration_seconds: duration_seconds(duration.as_ref())?,
            waypoints: resolve_waypoints(source.position, waypoints),
        }),
    }
}

/// Outgoing edges of `location`, in destination-list order.
pub fn resolve_location(location: &Location) -> StatusOr<Vec<ResolvedEdge>> {
    location
        .destinations
        .iter()
        .map(|spec| resolve_destination(location, spec))
        .collect()
}

/// Outgoing edges of every location, indexed like the table. Locations are
/// independent so they are resolved in parallel.
pub fn resolve_all(table: &LocationTable) -> StatusOr<Vec<Vec<ResolvedEdge>>> {
    table.locations().par_iter().map(resolve_location).collect()
}
