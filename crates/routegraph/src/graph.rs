use std::sync::OnceLock;

use log::{debug, info};
use serde::Serialize;

use crate::bounds::{BoundingBox, calculate_bounds};
use crate::consolidate::{CanonicalRoute, assign_colors, consolidate};
use crate::model::Location;
use crate::project::{UnitPoint, project};
use crate::resolve::{ResolvedEdge, resolve_all};
use crate::table::LocationTable;
use crate::StatusOr;

/// A location ready to be drawn as a marker with a label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationMarker {
    pub name: String,
    pub point: UnitPoint,
}

/// A route ready to be drawn as a polyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePolyline<C> {
    pub source: String,
    pub target: String,
    pub duration_seconds: Option<u32>,
    pub points: Vec<UnitPoint>,
    pub color: C,
}

/// Everything a renderer needs, in unit-square coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayout<C> {
    pub bounds: BoundingBox,
    pub routes: Vec<RoutePolyline<C>>,
    pub locations: Vec<LocationMarker>,
}

/// The resolved graph for one location table. Bounds and routes are
/// computed on first use and kept for the lifetime of the graph.
#[derive(Debug)]
pub struct RouteGraph {
    table: LocationTable,
    edges: Vec<Vec<ResolvedEdge>>,
    bounds: OnceLock<BoundingBox>,
    routes: OnceLock<Vec<CanonicalRoute>>,
}

impl RouteGraph {
    /// Resolve every destination of `table`. Fails on malformed durations;
    /// dangling targets surface from `bounds` and `routes`.
    pub fn new(table: LocationTable) -> StatusOr<Self> {
        let edges = resolve_all(&table)?;
        info!(
            "Resolved {} edges from {} locations",
            edges.iter().map(Vec::len).sum::<usize>(),
            table.len()
        );

        Ok(Self {
            table,
            edges,
            bounds: OnceLock::new(),
            routes: OnceLock::new(),
        })
    }

    pub fn from_locations(locations: Vec<Location>) -> StatusOr<Self> {
        Self::new(LocationTable::from_locations(locations)?)
    }

    pub fn table(&self) -> &LocationTable {
        &self.table
    }

    /// Outgoing edges of the named location.
    pub fn edges_from(&self, name: &str) -> StatusOr<&[ResolvedEdge]> {
        let idx = self.table.index_of(name)?;
        Ok(&self.edges[idx])
    }

    /// The first edge from `source` to `target`, if there is one.
    pub fn edge(&self, source: &str, target: &str) -> StatusOr<Option<&ResolvedEdge>> {
        Ok(self.edges_from(source)?.iter().find(|e| e.target == target))
    }

    pub fn edges(&self) -> &[Vec<ResolvedEdge>] {
        &self.edges
    }

    pub fn bounds(&self) -> StatusOr<BoundingBox> {
        if let Some(bounds) = self.bounds.get() {
            return Ok(*bounds);
        }
        let computed = calculate_bounds(&self.table, &self.edges)?;
        Ok(*self.bounds.get_or_init(|| computed))
    }

    /// Uncolored routes in first-seen order.
    pub fn routes(&self) -> StatusOr<&[CanonicalRoute]> {
        if let Some(routes) = self.routes.get() {
            return Ok(routes);
        }
        let computed = consolidate(&self.table, &self.edges)?;
        Ok(self.routes.get_or_init(|| computed))
    }

    /// Project everything into the unit square, coloring routes from
    /// `palette` in order.
    pub fn layout<C: Clone>(&self, palette: &[C]) -> StatusOr<MapLayout<C>> {
        let bounds = self.bounds()?;
        let colored = assign_colors(self.routes()?, palette)?;

        let routes = colored
            .into_iter()
            .map(|route| RoutePolyline {
                points: route.route.hops.iter().map(|hop| project(&bounds, *hop)).collect(),
                source: route.route.edge.source,
                target: route.route.edge.target,
                duration_seconds: route.route.edge.duration_seconds,
                color: route.color,
            })
            .collect();

        let locations = self
            .table
            .iter()
            .map(|location| {
                let point = project(&bounds, location.position);
                debug!("{} at ({:.3}, {:.3})", location.name, point.u, point.v);
                LocationMarker {
                    name: location.name.clone(),
                    point,
                }
            })
            .collect();

        Ok(MapLayout { bounds, routes, locations })
    }
}
