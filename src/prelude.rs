//! Prelude module for common tileview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tileview::prelude::*;`

pub use crate::core::{
    bounds::{BoundingBox, Corner},
    config::ViewerConfig,
    constants::{MAX_LAT, TILE_SIZE},
    geo::{GeoPoint, PixelPoint, TileAddress, TileCoord},
    map::{MapViewer, TileDraw, TileUpdate},
    projection::Projection,
    viewport::{Viewport, VisibleTile},
};

pub use crate::input::{
    events::InputEvent,
    handler::{Action, InputHandler},
};

pub use crate::tiles::{
    cache::TileCache,
    source::{TileSource, UrlTemplateSource},
};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
