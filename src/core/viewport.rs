use crate::core::bounds::BoundingBox;
use crate::core::constants::TILE_SIZE;
use crate::core::geo::{GeoPoint, PixelPoint, TileCoord};
use crate::core::projection::Projection;
use crate::prelude::HashMap;
use serde::{Deserialize, Serialize};

/// A tile needed by the current view and the screen rectangle it covers.
///
/// Screen coordinates are relative to the top-left of the viewport and the
/// rectangle is half-open: `[screen_x1, screen_x2) × [screen_y1, screen_y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleTile {
    pub tile_x: i64,
    pub tile_y: i64,
    pub zoom: u32,
    pub screen_x1: i64,
    pub screen_y1: i64,
    pub screen_x2: i64,
    pub screen_y2: i64,
}

impl VisibleTile {
    pub fn coord(&self) -> TileCoord {
        TileCoord::new(self.tile_x, self.tile_y, self.zoom)
    }

    /// `{zoom}-{tile_x}-{tile_y}`
    pub fn key(&self) -> String {
        self.coord().key()
    }

    /// The server tile to draw here, with the column wrapped around the antimeridian
    pub fn wrapped(&self) -> TileCoord {
        self.coord().wrapped()
    }

    /// True when any part of the tile overlaps a `width` × `height` screen
    pub fn intersects_view(&self, width: i64, height: i64) -> bool {
        self.screen_x1 < width && self.screen_x2 > 0 && self.screen_y1 < height && self.screen_y2 > 0
    }
}

/// Number of 256px screen cells along each axis of a `width` × `height` view.
///
/// `ceil((n + 255) / 256)`: one more cell than the view strictly needs, so a
/// grid shifted by any sub-tile offset still covers the whole view.
pub fn grid_dimensions(width: i64, height: i64) -> (i64, i64) {
    let cells = |n: i64| (n + (TILE_SIZE - 1) + (TILE_SIZE - 1)).div_euclid(TILE_SIZE);
    (cells(width), cells(height))
}

/// Lays a grid of tile-sized screen cells over the viewport and resolves each
/// one to the tile under its top-left corner.
///
/// Cells start at screen `(0, 0)`. Each cell's rectangle is pulled back by the
/// intra-tile offset of its corner, so every rectangle sits on a global tile
/// boundary and neighbouring cells tile seamlessly at any pan offset.
pub fn compute_tile_grid(
    bbox: &BoundingBox,
    width: i64,
    height: i64,
    projection: &Projection,
) -> HashMap<TileCoord, VisibleTile> {
    let (cols, rows) = grid_dimensions(width, height);
    let mut tiles = HashMap::default();
    tiles.reserve((cols * rows) as usize);

    for col in 0..cols {
        let x = col * TILE_SIZE;
        for row in 0..rows {
            let y = row * TILE_SIZE;

            let addr = projection.pixel_to_tile(bbox.to_global(PixelPoint::new(x, y)));
            let screen_x1 = x - addr.offset_x;
            let screen_y1 = y - addr.offset_y;

            let tile = VisibleTile {
                tile_x: addr.tile_x,
                tile_y: addr.tile_y,
                zoom: addr.zoom,
                screen_x1,
                screen_y1,
                screen_x2: screen_x1 + TILE_SIZE,
                screen_y2: screen_y1 + TILE_SIZE,
            };
            tiles.insert(tile.coord(), tile);
        }
    }

    log::trace!(
        "tile grid {}x{} cells at zoom {} from {:?}",
        cols,
        rows,
        projection.zoom(),
        bbox.a.pixel
    );
    tiles
}

/// The visible map: center, zoom, and screen size, plus everything derived from them.
///
/// The center is held as a global pixel. Pans move that pixel by exact screen
/// deltas and the geographic center is derived from it, so dragging never
/// accumulates projection rounding. The pixel is re-projected from the
/// geographic center only when the center or the zoom is set explicitly.
///
/// Every mutation rebuilds the bounding box and the tile grid from scratch;
/// previous [`VisibleTile`] values are superseded, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: u32,
    center: GeoPoint,
    center_px: PixelPoint,
    width: i64,
    height: i64,
    projection: Projection,
    bounding_box: BoundingBox,
    tiles: HashMap<TileCoord, VisibleTile>,
}

impl Viewport {
    /// Creates a viewport.
    ///
    /// Preconditions: the center lies inside the Mercator band and both sizes
    /// are positive. They are the caller's responsibility and only checked in
    /// debug builds. A zoom above [`crate::constants::MAX_SUPPORTED_ZOOM`]
    /// panics in every build, since the pixel plane would overflow.
    pub fn new(zoom: u32, center: GeoPoint, width: i64, height: i64) -> Self {
        debug_assert!(width > 0 && height > 0, "empty viewport {width}x{height}");

        let projection = Projection::new(zoom);
        let center_px = projection.geo_to_pixel(center);
        let bounding_box = BoundingBox::around(center_px, center, width, height, &projection);
        let tiles = compute_tile_grid(&bounding_box, width, height, &projection);

        Self {
            zoom,
            center,
            center_px,
            width,
            height,
            projection,
            bounding_box,
            tiles,
        }
    }

    /// Rebuilds the bounding box and tile grid from the center pixel
    fn recompute(&mut self) {
        self.bounding_box = BoundingBox::around(
            self.center_px,
            self.center,
            self.width,
            self.height,
            &self.projection,
        );
        self.tiles = compute_tile_grid(&self.bounding_box, self.width, self.height, &self.projection);

        log::debug!(
            "viewport z{} center ({:.6}, {:.6}) {}x{}: {} tiles",
            self.zoom,
            self.center.lon,
            self.center.lat,
            self.width,
            self.height,
            self.tiles.len()
        );
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn map_size(&self) -> i64 {
        self.projection.map_size()
    }

    pub fn x_per_degree(&self) -> f64 {
        self.projection.x_per_degree()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// The center in global pixels at the current zoom
    pub fn center_pixel(&self) -> PixelPoint {
        self.center_px
    }

    /// All tiles of the current grid, keyed by tile coordinate
    pub fn tiles(&self) -> &HashMap<TileCoord, VisibleTile> {
        &self.tiles
    }

    /// Moves the map by a screen delta; dragging right (`dx > 0`) moves the
    /// center west.
    ///
    /// The center pixel moves by exactly `(-dx, -dy)`, so `pan_by(0, 0)` is a
    /// no-op and consecutive pans add up.
    pub fn pan_by(&mut self, dx: i64, dy: i64) {
        self.center_px = self.center_px.offset(-dx, -dy);
        self.center = self.projection.pixel_to_geo(self.center_px);
        self.recompute();
    }

    /// Re-centers on a new geographic point at the same zoom
    pub fn set_center(&mut self, center: GeoPoint) {
        self.center = center;
        self.center_px = self.projection.geo_to_pixel(center);
        self.recompute();
    }

    /// Changes the screen size, keeping center and zoom
    pub fn resize(&mut self, width: i64, height: i64) {
        debug_assert!(width > 0 && height > 0, "empty viewport {width}x{height}");
        self.width = width;
        self.height = height;
        self.recompute();
    }

    /// Changes the zoom level, keeping the geographic center.
    ///
    /// Range limits are the caller's policy. Any zoom up to
    /// [`crate::constants::MAX_SUPPORTED_ZOOM`] is accepted here; deeper zooms panic because
    /// `256 << zoom` overflows the pixel plane.
    pub fn set_zoom(&mut self, zoom: u32) {
        self.zoom = zoom;
        self.projection = Projection::new(zoom);
        self.center_px = self.projection.geo_to_pixel(self.center);
        self.recompute();
    }

    /// Checks if a screen point lies within the viewport
    pub fn is_point_in_view(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}
