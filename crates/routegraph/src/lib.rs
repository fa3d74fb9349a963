use thiserror::Error;

pub mod bounds;
pub mod consolidate;
pub mod graph;
pub mod model;
pub mod project;
pub mod resolve;
pub mod table;

pub use bounds::BoundingBox;
pub use consolidate::{CanonicalRoute, Route};
pub use graph::{LocationMarker, MapLayout, RouteGraph, RoutePolyline};
pub use model::{DestinationSpec, Location, PartialWaypoint, Position, RawDuration};
pub use project::{PlotRegion, UnitPoint};
pub use resolve::ResolvedEdge;
pub use table::LocationTable;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteGraphError {
    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error("duplicate location name: {0}")]
    DuplicateLocation(String),

    #[error("malformed duration: {0:?}")]
    MalformedDuration(String),

    #[error("route palette is empty")]
    EmptyPalette,

    #[error("no coordinates to compute bounds from")]
    EmptyBounds,
}

pub type StatusOr<T> = Result<T, RouteGraphError>;
