#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Loads healthcare-center records from `;`-delimited CSV, answers capacity and
//! proximity queries over them and draws the results on a Leaflet map.

pub mod centers;
pub mod error;
pub mod geo;
pub mod map;
pub mod render;

pub use centers::{
    load_centers, nearby_icu_centers, read_centers, total_beds_accessible, Columns, HealthCenter,
    HealthCenterBuilder, NearbyCenter,
};
pub use error::{Error, Result};
pub use geo::LatLon;
pub use render::render_map;
