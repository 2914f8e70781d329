//! Configuration for the bundled map viewer
//!
//! The projection and viewport take plain values and trust them. Everything a
//! host reads from a file or a command line goes through [`ViewerConfig`]
//! first, which is where zoom policy and input validation live.

use crate::core::constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, MAX_SUPPORTED_ZOOM};
use crate::core::geo::GeoPoint;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// OpenStreetMap standard tiles, `{s}` rotating over the subdomains
pub const DEFAULT_TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub center: GeoPoint,
    pub zoom: u32,
    pub min_zoom: u32,
    pub max_zoom: u32,
    pub width: i64,
    pub height: i64,
    pub tile_url_template: String,
    pub subdomains: Vec<String>,
    pub cache_capacity: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(-0.105842, 51.532740),
            zoom: 13,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            width: 800,
            height: 600,
            tile_url_template: DEFAULT_TILE_URL_TEMPLATE.to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            cache_capacity: 1024,
        }
    }
}

impl ViewerConfig {
    /// Parses a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded viewer config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Checks everything the core treats as a precondition
    pub fn validate(&self) -> Result<()> {
        if self.max_zoom > MAX_SUPPORTED_ZOOM {
            return Err(MapError::InvalidZoom(format!(
                "max_zoom {} exceeds {}",
                self.max_zoom, MAX_SUPPORTED_ZOOM
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::InvalidZoom(format!(
                "min_zoom {} above max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.zoom < self.min_zoom || self.zoom > self.max_zoom {
            return Err(MapError::InvalidZoom(format!(
                "zoom {} outside {}..={}",
                self.zoom, self.min_zoom, self.max_zoom
            )));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(MapError::InvalidSize(format!("{}x{}", self.width, self.height)));
        }
        GeoPoint::try_new(self.center.lon, self.center.lat)?;
        if self.tile_url_template.is_empty() {
            return Err(MapError::Config("tile_url_template is empty".to_string()));
        }
        if self.tile_url_template.contains("{s}") && self.subdomains.is_empty() {
            return Err(MapError::Config(
                "tile_url_template uses {s} but no subdomains are set".to_string(),
            ));
        }
        if self.cache_capacity == 0 {
            return Err(MapError::Config("cache_capacity must be positive".to_string()));
        }
        Ok(())
    }

    /// Applies the zoom policy to a requested level
    pub fn clamp_zoom(&self, zoom: i64) -> u32 {
        zoom.clamp(i64::from(self.min_zoom), i64::from(self.max_zoom)) as u32
    }
}
