use crate::{
    core::{
        config::ViewerConfig,
        geo::TileCoord,
        viewport::{Viewport, VisibleTile},
    },
    input::{Action, InputEvent, InputHandler},
    prelude::{Arc, HashSet},
    tiles::{TileCache, TileSource, UrlTemplateSource},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Which server tiles changed between two grids.
///
/// Coordinates are [`TileCoord::wrapped`], so re-centering by a whole map
/// width (the viewer does this when a pan crosses the antimeridian) reports no
/// change even though the unwrapped grid indices all moved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileUpdate {
    /// Tiles that were not in the previous grid
    pub added: Vec<TileCoord>,
    /// Tiles that are no longer needed
    pub removed: Vec<TileCoord>,
    /// Tiles still needed, possibly at a new screen position
    pub retained: Vec<TileCoord>,
}

impl TileUpdate {
    fn between(before: &HashSet<TileCoord>, after: &HashSet<TileCoord>) -> Self {
        let sorted = |mut coords: Vec<TileCoord>| {
            coords.sort_by_key(|c| (c.z, c.y, c.x));
            coords
        };
        Self {
            added: sorted(after.difference(before).copied().collect()),
            removed: sorted(before.difference(after).copied().collect()),
            retained: sorted(after.intersection(before).copied().collect()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// One tile the host should draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDraw {
    pub tile: VisibleTile,
    pub url: String,
    /// Whether a loaded resource for the tile is already cached
    pub cached: bool,
}

/// Host-side controller around a [`Viewport`].
///
/// Validates configuration and input before it reaches the viewport, applies
/// the zoom policy, and pairs the tile grid with URLs and cached resources.
/// `T` is whatever the host stores per loaded tile (decoded image, texture
/// handle, raw bytes).
pub struct MapViewer<T = Vec<u8>> {
    config: ViewerConfig,
    viewport: Viewport,
    input: InputHandler,
    source: Box<dyn TileSource>,
    cache: TileCache<T>,
}

impl<T> MapViewer<T> {
    /// Creates a viewer with its own cache and a source built from the config
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let cache = TileCache::new(config.cache_capacity);
        Self::with_cache(config, cache)
    }

    /// Creates a viewer sharing a cache owned by the host
    pub fn with_cache(config: ViewerConfig, cache: TileCache<T>) -> Result<Self> {
        let source = UrlTemplateSource::new(config.tile_url_template.clone(), config.subdomains.clone());
        Self::with_source(config, Box::new(source), cache)
    }

    pub fn with_source(
        config: ViewerConfig,
        source: Box<dyn TileSource>,
        cache: TileCache<T>,
    ) -> Result<Self> {
        config.validate()?;
        let viewport = Viewport::new(config.zoom, config.center, config.width, config.height);

        log::info!(
            "map viewer at ({:.6}, {:.6}) zoom {} ({}x{})",
            config.center.lon,
            config.center.lat,
            config.zoom,
            config.width,
            config.height
        );

        Ok(Self {
            config,
            viewport,
            input: InputHandler::new(),
            source,
            cache,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    pub fn cache(&self) -> &TileCache<T> {
        &self.cache
    }

    fn tile_set(&self) -> HashSet<TileCoord> {
        self.viewport.tiles().keys().map(TileCoord::wrapped).collect()
    }

    /// Feeds one input event through the viewer.
    ///
    /// Returns the tile diff when the view changed, `None` when the event had
    /// no effect on the view. A press outside the viewport does not start a
    /// drag.
    pub fn handle(&mut self, event: InputEvent) -> Result<Option<TileUpdate>> {
        if let InputEvent::PointerDown { x, y } = event {
            if !self.viewport.is_point_in_view(x, y) {
                log::trace!("pointer down at ({}, {}) outside the view", x, y);
                return Ok(None);
            }
        }

        let Some(action) = self.input.handle(event) else {
            return Ok(None);
        };

        let before = self.tile_set();
        match action {
            Action::Pan { dx, dy } => self.pan(dx, dy),
            Action::Resize { width, height } => {
                if width <= 0 || height <= 0 {
                    log::warn!("ignoring resize to {}x{}", width, height);
                    return Err(MapError::InvalidSize(format!("{width}x{height}")));
                }
                self.viewport.resize(width, height);
            }
            Action::Zoom { delta } => {
                let target = self
                    .config
                    .clamp_zoom(i64::from(self.viewport.zoom()) + i64::from(delta));
                if target == self.viewport.zoom() {
                    log::debug!("zoom {} already at limit", target);
                    return Ok(None);
                }
                self.viewport.set_zoom(target);
            }
        }

        Ok(Some(TileUpdate::between(&before, &self.tile_set())))
    }

    /// Pans, keeping the center inside the Mercator band vertically and
    /// wrapping it around the antimeridian horizontally.
    ///
    /// Wrapping shifts the center pixel by whole map widths, so nothing moves
    /// on screen. The center column is kept in `1..=map_size`, which keeps the
    /// center longitude in (-180, 180].
    fn pan(&mut self, dx: i64, dy: i64) {
        let map_size = self.viewport.map_size();
        let cy = self.viewport.center_pixel().y;
        let target_y = (cy - dy).clamp(1, map_size - 1);
        if target_y != cy - dy {
            log::debug!("pan clamped at map edge ({} -> {})", cy - dy, target_y);
        }
        self.viewport.pan_by(dx, cy - target_y);

        let cx = self.viewport.center_pixel().x;
        let laps = (cx - 1).div_euclid(map_size);
        if laps != 0 {
            log::debug!("center crossed the antimeridian, wrapping by {} map widths", laps);
            self.viewport.pan_by(laps * map_size, 0);
        }
    }

    /// Tiles to draw for the current view, top-to-bottom, left-to-right.
    ///
    /// Cells above or below the map are skipped. Columns past the antimeridian
    /// resolve to the wrapped server tile.
    pub fn render_plan(&self) -> Vec<TileDraw> {
        let mut tiles: Vec<VisibleTile> = self
            .viewport
            .tiles()
            .values()
            .filter(|tile| tile.coord().is_on_map())
            .copied()
            .collect();
        tiles.sort_by_key(|tile| (tile.screen_y1, tile.screen_x1));

        tiles
            .into_iter()
            .map(|tile| {
                let server = tile.wrapped();
                TileDraw {
                    tile,
                    url: self.source.url(server),
                    cached: self.cache.contains(&server),
                }
            })
            .collect()
    }

    /// Stores a loaded resource for a tile
    pub fn mark_loaded(&self, coord: TileCoord, resource: T) {
        self.cache.insert(coord.wrapped(), resource);
    }

    /// The cached resource to draw for a visible tile, if it has loaded
    pub fn resource_for(&self, tile: &VisibleTile) -> Option<Arc<T>> {
        self.cache.get(&tile.wrapped())
    }
}
