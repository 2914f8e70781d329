use tileview::core::projection::{self, pixel_to_tile};
use tileview::prelude::*;

/// Integration tests for how a host drives the map: building a view,
/// dragging it around, resizing the window and zooming.
#[cfg(test)]
mod integration_tests {
    use super::*;

    fn london() -> GeoPoint {
        GeoPoint::new(-0.105842, 51.532740)
    }

    fn keys(viewport: &Viewport) -> HashSet<TileCoord> {
        viewport.tiles().keys().copied().collect()
    }

    /// The default London view lands inside the world at zoom 13
    #[test]
    fn test_london_pixel_is_on_the_map() {
        let proj = Projection::new(13);
        assert_eq!(proj.map_size(), 2_097_152);

        let px = proj.geo_to_pixel(london());
        assert!((0..proj.map_size()).contains(&px.x));
        assert!((0..proj.map_size()).contains(&px.y));
    }

    /// An 800x600 view needs a 5x4 grid of screen cells
    #[test]
    fn test_tile_grid_for_default_view() {
        let viewport = Viewport::new(13, london(), 800, 600);
        assert_eq!(viewport.tiles().len(), 20);

        let view = viewport.tiles().values().filter(|t| t.intersects_view(800, 600));
        assert!(view.count() >= 12);
    }

    /// Latitudes at or past the Mercator cut-off are outside the band
    #[test]
    fn test_max_lat_is_the_band_limit() {
        let expected = (std::f64::consts::PI).sinh().atan().to_degrees();
        assert!((MAX_LAT - expected).abs() < 1e-12);

        assert!(GeoPoint::new(0.0, 85.0).is_in_mercator_band());
        assert!(!GeoPoint::new(0.0, MAX_LAT).is_in_mercator_band());
        assert!(!GeoPoint::new(0.0, -MAX_LAT).is_in_mercator_band());
        assert!(GeoPoint::try_new(0.0, 90.0).is_err());
    }

    /// Tile lookup does not depend on zoom
    #[test]
    fn test_pixel_to_tile_is_zoom_independent() {
        assert_eq!(pixel_to_tile(PixelPoint::new(300, 10)), (1, 0, 44, 10));
        for zoom in [0, 5, 13, 20] {
            let addr = Projection::new(zoom).pixel_to_tile(PixelPoint::new(300, 10));
            assert_eq!((addr.tile_x, addr.tile_y), (1, 0));
            assert_eq!((addr.offset_x, addr.offset_y), (44, 10));
            assert_eq!(addr.zoom, zoom);
        }
    }

    /// Every tile in the grid sits on a global tile boundary
    #[test]
    fn test_grid_rectangles_align_with_global_tiles() {
        let viewport = Viewport::new(13, london(), 800, 600);
        let origin = viewport.bounding_box().a.pixel;

        for tile in viewport.tiles().values() {
            assert_eq!(tile.screen_x2 - tile.screen_x1, TILE_SIZE);
            assert_eq!(tile.screen_y2 - tile.screen_y1, TILE_SIZE);
            assert_eq!(origin.x + tile.screen_x1, tile.tile_x * TILE_SIZE);
            assert_eq!(origin.y + tile.screen_y1, tile.tile_y * TILE_SIZE);
        }
    }

    /// Panning by a whole tile shifts the grid by one column
    #[test]
    fn test_whole_tile_pan_shifts_grid() {
        let mut viewport = Viewport::new(13, london(), 800, 600);
        let before = keys(&viewport);
        let start = viewport.center_pixel();

        viewport.pan_by(-TILE_SIZE, 0);
        assert_eq!(viewport.center_pixel(), start.offset(TILE_SIZE, 0));

        let shifted: HashSet<TileCoord> = before
            .iter()
            .map(|c| TileCoord::new(c.x + 1, c.y, c.z))
            .collect();
        assert_eq!(keys(&viewport), shifted);
    }

    /// A pan followed by the opposite pan returns to the same tiles
    #[test]
    fn test_pan_round_trip_restores_grid() {
        let mut viewport = Viewport::new(13, london(), 800, 600);
        let before = viewport.tiles().clone();

        viewport.pan_by(137, -59);
        viewport.pan_by(-137, 59);

        assert_eq!(viewport.tiles(), &before);
    }

    /// Dragging pixel by pixel scrolls exactly as far as the pointer moved
    #[test]
    fn test_pixel_drags_do_not_drift() {
        let mut viewport = Viewport::new(13, london(), 800, 600);
        let start = viewport.center_pixel();
        let tiles = viewport.tiles().clone();

        viewport.pan_by(0, 0);
        assert_eq!(viewport.center_pixel(), start);
        assert_eq!(viewport.tiles(), &tiles);

        for _ in 0..200 {
            viewport.pan_by(1, 0);
        }
        assert_eq!(viewport.center_pixel(), start.offset(-200, 0));

        let mut viewer: MapViewer = MapViewer::new(ViewerConfig::default()).unwrap();
        let start = viewer.viewport().center_pixel();
        viewer.handle(InputEvent::PointerDown { x: 100, y: 100 }).unwrap();
        for x in 101..=400 {
            viewer.handle(InputEvent::PointerMove { x, y: 100 }).unwrap();
        }
        viewer.handle(InputEvent::PointerUp).unwrap();
        assert_eq!(viewer.viewport().center_pixel(), start.offset(-300, 0));
    }

    /// Resizing to the current size changes nothing
    #[test]
    fn test_resize_is_idempotent() {
        let mut viewport = Viewport::new(13, london(), 800, 600);
        let before = viewport.clone();

        viewport.resize(800, 600);
        assert_eq!(viewport, before);

        viewport.resize(1024, 768);
        viewport.resize(1024, 768);
        assert_eq!(viewport.tiles().len(), 20);
        assert_eq!(viewport.center(), london());
    }

    /// One zoom level doubles the pixel distance from the origin
    #[test]
    fn test_zoom_doubles_pixel_coordinates() {
        for zoom in 4..17 {
            let low = Projection::new(zoom).geo_to_pixel(london());
            let high = Projection::new(zoom + 1).geo_to_pixel(london());
            assert!((high.x - 2 * low.x).abs() <= 2, "x at zoom {zoom}");
            assert!((high.y - 2 * low.y).abs() <= 2, "y at zoom {zoom}");
        }
        assert_eq!(projection::map_size(14), 2 * projection::map_size(13));
    }

    /// A drag through the viewer reports a consistent tile diff
    #[test]
    fn test_viewer_drag_session() {
        let mut viewer: MapViewer = MapViewer::new(ViewerConfig::default()).unwrap();
        let start = viewer.viewport().center();

        viewer.handle(InputEvent::PointerDown { x: 400, y: 300 }).unwrap();
        let mut total_added = 0;
        for step in 1..=4 {
            let update = viewer
                .handle(InputEvent::PointerMove {
                    x: 400 - step * 80,
                    y: 300,
                })
                .unwrap()
                .unwrap();
            assert_eq!(update.added.len() + update.retained.len(), 20);
            total_added += update.added.len();
        }
        viewer.handle(InputEvent::PointerUp).unwrap();

        // 320px to the left moves the center east by at least one column
        assert!(viewer.viewport().center().lon > start.lon);
        assert!(total_added >= 4);
        assert!(!viewer.input().is_dragging());
    }

    /// Plans can be serialized for a host that draws out of process
    #[test]
    fn test_render_plan_serializes() {
        let viewer: MapViewer = MapViewer::new(ViewerConfig::default()).unwrap();
        let plan = viewer.render_plan();

        let json = serde_json::to_string(&plan).unwrap();
        let decoded: Vec<TileDraw> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, plan);
        assert!(plan.iter().all(|d| d.url.contains(".tile.openstreetmap.org/13/")));
    }

    /// Configs with partial fields fall back to defaults
    #[test]
    fn test_partial_config_builds_viewer() {
        let config = ViewerConfig::from_json_str(
            r#"{"center": {"lon": 2.3522, "lat": 48.8566}, "zoom": 12, "width": 512, "height": 256}"#,
        )
        .unwrap();
        let viewer: MapViewer = MapViewer::new(config).unwrap();

        assert_eq!(viewer.viewport().zoom(), 12);
        assert_eq!(viewer.viewport().tiles().len(), 3 * 2);
        assert_eq!(viewer.config().max_zoom, 17);
    }
}
