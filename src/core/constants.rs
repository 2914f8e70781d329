//! Core constants for the Web Mercator tile scheme.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

use std::f64::consts::PI;

/// Square tile size in pixels.
pub const TILE_SIZE: i64 = 256;

/// Degrees to radians factor (`radians = degrees * RAD`).
pub const RAD: f64 = PI / 180.0;

/// Radians to degrees factor (`degrees = radians * DEG`).
pub const DEG: f64 = 180.0 / PI;

/// Latitude limit of the projection, `atan(sinh(π))` in degrees.
///
/// Spelled out as a literal because the hyperbolic functions are not `const`;
/// the tests check it against the closed form.
pub const MAX_LAT: f64 = 85.051_128_779_806_6;

/// Lowest zoom the bundled viewer allows by default.
pub const DEFAULT_MIN_ZOOM: u32 = 4;

/// Highest zoom the bundled viewer allows by default.
pub const DEFAULT_MAX_ZOOM: u32 = 17;

/// Largest zoom at which global pixel coordinates stay exact in an `f64`.
pub const MAX_SUPPORTED_ZOOM: u32 = 30;
