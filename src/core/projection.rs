//! Web Mercator projection between geographic coordinates, the global pixel
//! plane of a zoom level, and tile addresses.
//!
//! All functions here are pure. Pixel coordinates are integers obtained with
//! `floor`, never truncation, so negative pixels (a viewport dragged past the
//! top-left of the map) land in the correct tile.

use crate::core::constants::{DEG, MAX_SUPPORTED_ZOOM, RAD, TILE_SIZE};
use crate::core::geo::{GeoPoint, PixelPoint, TileAddress};
use std::f64::consts::PI;

/// Width (and height) of the global pixel plane at `zoom`.
///
/// # Panics
///
/// When `zoom` exceeds [`MAX_SUPPORTED_ZOOM`]. Past that the plane no longer
/// leaves headroom in an `i64` and the shift would wrap silently.
pub fn map_size(zoom: u32) -> i64 {
    assert!(
        zoom <= MAX_SUPPORTED_ZOOM,
        "zoom {zoom} exceeds the supported maximum {MAX_SUPPORTED_ZOOM}"
    );
    TILE_SIZE << zoom
}

/// Pixels per degree of longitude for a map `map_width` pixels wide.
///
/// Computed as the difference of the normalized x of -180° and -179°, which
/// equals `map_width / 360` to floating-point precision.
pub fn x_per_degree(map_width: i64) -> f64 {
    let float1 = (PI + (-180.0) * RAD) / (2.0 * PI);
    let float2 = (PI + (-179.0) * RAD) / (2.0 * PI);
    (float2 - float1) * map_width as f64
}

/// Projects `geo` onto the pixel plane.
///
/// The latitude must lie strictly inside `±MAX_LAT`; outside the band the
/// vertical projection is infinite or NaN.
pub fn geo_to_pixel(geo: GeoPoint, map_size: i64, x_per_degree: f64) -> PixelPoint {
    debug_assert!(
        geo.is_in_mercator_band(),
        "latitude {} outside the Mercator band",
        geo.lat
    );

    let x = (x_per_degree * (geo.lon + 180.0)).floor();

    let rad = geo.lat * RAD;
    let nor = (rad.tan() + 1.0 / rad.cos()).ln();
    let y = ((map_size as f64 * (PI - nor)) / (2.0 * PI)).floor();

    PixelPoint::new(x as i64, y as i64)
}

/// Inverse of [`geo_to_pixel`], up to the sub-pixel precision lost by its floor.
///
/// No longitude wrapping is applied; pixels outside `0..map_size` give
/// longitudes outside ±180°.
pub fn pixel_to_geo(px: PixelPoint, map_size: i64) -> GeoPoint {
    let size = map_size as f64;

    let lon = ((px.x as f64 / size) * 2.0 - 1.0) * 180.0;

    let nor = -((px.y as f64 / size) * 2.0 - 1.0) * PI;
    let lat = nor.sinh().atan() * DEG;

    GeoPoint::new(lon, lat)
}

/// Splits a global pixel into `(tile_x, tile_y, offset_x, offset_y)`.
///
/// Floor division and a non-negative remainder, so the offsets are always in
/// `0..TILE_SIZE` and `tile * TILE_SIZE + offset` gives back the pixel.
pub fn pixel_to_tile(px: PixelPoint) -> (i64, i64, i64, i64) {
    (
        px.x.div_euclid(TILE_SIZE),
        px.y.div_euclid(TILE_SIZE),
        px.x.rem_euclid(TILE_SIZE),
        px.y.rem_euclid(TILE_SIZE),
    )
}

/// The projection for one zoom level, with its derived factors cached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    zoom: u32,
    map_size: i64,
    x_per_degree: f64,
}

impl Projection {
    pub fn new(zoom: u32) -> Self {
        let size = map_size(zoom);
        Self {
            zoom,
            map_size: size,
            x_per_degree: x_per_degree(size),
        }
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn map_size(&self) -> i64 {
        self.map_size
    }

    pub fn x_per_degree(&self) -> f64 {
        self.x_per_degree
    }

    pub fn geo_to_pixel(&self, geo: GeoPoint) -> PixelPoint {
        geo_to_pixel(geo, self.map_size, self.x_per_degree)
    }

    pub fn pixel_to_geo(&self, px: PixelPoint) -> GeoPoint {
        pixel_to_geo(px, self.map_size)
    }

    pub fn pixel_to_tile(&self, px: PixelPoint) -> TileAddress {
        let (tile_x, tile_y, offset_x, offset_y) = pixel_to_tile(px);
        TileAddress {
            tile_x,
            tile_y,
            offset_x,
            offset_y,
            zoom: self.zoom,
        }
    }
}
