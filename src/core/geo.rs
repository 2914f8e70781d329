use crate::core::constants::{MAX_LAT, TILE_SIZE};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate with longitude and latitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// Creates a new GeoPoint without checking it
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Creates a GeoPoint, rejecting values the projection cannot handle
    pub fn try_new(lon: f64, lat: f64) -> Result<Self> {
        let point = Self::new(lon, lat);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(MapError::InvalidCoordinates(format!(
                "({lon}, {lat}) is outside lon (-180, 180] / lat (-{MAX_LAT}, {MAX_LAT})"
            )))
        }
    }

    /// True when the latitude lies strictly inside the Mercator band
    pub fn is_in_mercator_band(&self) -> bool {
        self.lat.is_finite() && self.lat.abs() < MAX_LAT
    }

    /// Validates both axes: longitude in (-180, 180], latitude inside the band
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite() && self.lon > -180.0 && self.lon <= 180.0 && self.is_in_mercator_band()
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Integer coordinate in the global pixel plane of one zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i64, dy: i64) -> PixelPoint {
        PixelPoint::new(self.x + dx, self.y + dy)
    }
}

/// A pixel located through the tile grid: which tile, and where inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileAddress {
    pub tile_x: i64,
    pub tile_y: i64,
    /// Always in `0..TILE_SIZE`
    pub offset_x: i64,
    /// Always in `0..TILE_SIZE`
    pub offset_y: i64,
    pub zoom: u32,
}

impl TileAddress {
    /// The tile this address points into
    pub fn coord(&self) -> TileCoord {
        TileCoord::new(self.tile_x, self.tile_y, self.zoom)
    }

    /// Rebuilds the global pixel the address was derived from
    pub fn to_pixel(&self) -> PixelPoint {
        PixelPoint::new(
            self.tile_x * TILE_SIZE + self.offset_x,
            self.tile_y * TILE_SIZE + self.offset_y,
        )
    }
}

/// Tile coordinate in the slippy map tile system.
///
/// Indices are signed: a viewport panned past the antimeridian or a pole
/// references columns and rows outside `0..2^z`. Use [`TileCoord::wrapped`]
/// before resolving a tile against a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i64,
    pub y: i64,
    pub z: u32,
}

impl TileCoord {
    pub fn new(x: i64, y: i64, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Number of tiles along one axis at this zoom
    pub fn axis_tiles(&self) -> i64 {
        1_i64 << self.z
    }

    /// String key in `{zoom}-{x}-{y}` form
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Folds the column into `0..2^z` so the coordinate names a real tile
    pub fn wrapped(&self) -> TileCoord {
        TileCoord::new(self.x.rem_euclid(self.axis_tiles()), self.y, self.z)
    }

    /// True when the row exists on the server (rows never wrap)
    pub fn is_on_map(&self) -> bool {
        self.y >= 0 && self.y < self.axis_tiles()
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.z, self.x, self.y)
    }
}
