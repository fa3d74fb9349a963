use std::collections::HashSet;

use log::debug;
use serde::Serialize;

use crate::model::Position;
use crate::resolve::ResolvedEdge;
use crate::table::LocationTable;
use crate::{RouteGraphError, StatusOr};

/// One undirected connection, drawn using the direction chosen for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRoute {
    /// The two endpoint names, sorted.
    pub key: (String, String),
    pub edge: ResolvedEdge,
    /// Endpoint-inclusive path of `edge`.
    pub hops: Vec<Position>,
}

/// A canonical route with its palette color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route<C> {
    pub route: CanonicalRoute,
    pub color: C,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Fold the directed edges into one route per unordered pair of locations,
/// in first-seen order. The direction with strictly more hops wins; ties and
/// a missing reverse edge keep the direction seen first.
pub fn consolidate(table: &LocationTable, edges: &[Vec<ResolvedEdge>]) -> StatusOr<Vec<CanonicalRoute>> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut routes = Vec::new();

    for outgoing in edges {
        for edge in outgoing {
            let key = pair_key(&edge.source, &edge.target);
            // Already drawn from the other end, or listed twice
            if seen.contains(&key) {
                continue;
            }

            let target_idx = table.index_of(&edge.target)?;
            // First edge listed back from the target, if any
            let reverse = edges
                .get(target_idx)
                .and_then(|back| back.iter().find(|e| e.target == edge.source));

            let chosen = match reverse {
                Some(reverse) if reverse.hop_count() > edge.hop_count() => reverse,
                _ => edge,
            };

            debug!(
                "Route {} <-> {}: drawing {} -> {} ({} hops)",
                key.0,
                key.1,
                chosen.source,
                chosen.target,
                chosen.hop_count()
            );

            routes.push(CanonicalRoute {
                hops: chosen.hops(table)?,
                edge: chosen.clone(),
                key: key.clone(),
            });
            seen.insert(key);
        }
    }

    Ok(routes)
}

/// Give each route the palette entry at its position, cycling.
pub fn assign_colors<C: Clone>(routes: &[CanonicalRoute], palette: &[C]) -> StatusOr<Vec<Route<C>>> {
    if palette.is_empty() {
        return Err(RouteGraphError::EmptyPalette);
    }

    Ok(routes
        .iter()
        .enumerate()
        .map(|(i, route)| Route {
            route: route.clone(),
            color: palette[i % palette.len()].clone(),
        })
        .collect())
}

/// `consolidate` followed by `assign_colors`.
pub fn consolidate_routes<C: Clone>(
    table: &LocationTable,
    edges: &[Vec<ResolvedEdge>],
    palette: &[C],
) -> StatusOr<Vec<Route<C>>> {
    assign_colors(&consolidate(table, edges)?, palette)
}
