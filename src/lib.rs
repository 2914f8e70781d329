//! # tileview
//!
//! Coordinate and tile-grid engine for pannable raster maps.
//!
//! The [`core`] module converts between geographic coordinates, the
//! zoom-dependent global pixel plane of the Web Mercator projection, and the
//! tile addressing scheme used by slippy-map tile servers. A [`Viewport`]
//! keeps the set of visible tiles and their on-screen placement consistent as
//! the map is panned, resized or zoomed.
//!
//! Fetching and drawing tiles is left to the host. The [`tiles`] and
//! [`input`] modules, together with [`MapViewer`], provide the host-side
//! pieces: URL templating, a resource cache, and translation of raw pointer
//! input into viewport commands.

pub mod core;
pub mod input;
pub mod prelude;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    bounds::{BoundingBox, Corner},
    config::ViewerConfig,
    geo::{GeoPoint, PixelPoint, TileAddress, TileCoord},
    map::{MapViewer, TileDraw, TileUpdate},
    projection::Projection,
    viewport::{Viewport, VisibleTile},
};

pub use input::{events::InputEvent, handler::InputHandler};

pub use tiles::{cache::TileCache, source::TileSource, source::UrlTemplateSource};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid zoom: {0}")]
    InvalidZoom(String),

    #[error("Invalid viewport size: {0}")]
    InvalidSize(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
