use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tileview::{BoundingBox, GeoPoint, InputEvent, MapViewer, TileDraw, ViewerConfig};

/// Prints the tiles covering a map view, after optional drags
#[derive(Parser, Debug)]
#[command(name = "tileview-app", about = "Resolve the tile grid for a map view")]
struct Args {
    /// JSON viewer config; command-line values override it
    #[arg(short, long)]
    config: Option<String>,

    /// Center longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Center latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    #[arg(short, long)]
    zoom: Option<u32>,

    #[arg(long)]
    width: Option<i64>,

    #[arg(long)]
    height: Option<i64>,

    /// Drag by `dx,dy` screen pixels; repeat for several drags
    #[arg(long, value_parser = parse_pan, allow_hyphen_values = true)]
    pan: Vec<(i64, i64)>,
}

fn parse_pan(value: &str) -> std::result::Result<(i64, i64), String> {
    let (dx, dy) = value
        .split_once(',')
        .ok_or_else(|| format!("expected dx,dy but got {value:?}"))?;
    let parse = |n: &str| n.trim().parse::<i64>().map_err(|e| format!("{n:?}: {e}"));
    Ok((parse(dx)?, parse(dy)?))
}

#[derive(Serialize)]
struct Report {
    zoom: u32,
    center: GeoPoint,
    width: i64,
    height: i64,
    bounding_box: BoundingBox,
    tiles: Vec<TileDraw>,
}

fn build_config(args: &Args) -> Result<ViewerConfig> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::load(path).with_context(|| format!("reading {path}"))?,
        None => ViewerConfig::default(),
    };
    if let Some(lon) = args.lon {
        config.center.lon = lon;
    }
    if let Some(lat) = args.lat {
        config.center.lat = lat;
    }
    if let Some(zoom) = args.zoom {
        config.zoom = zoom;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = build_config(&args)?;
    let mut viewer: MapViewer = MapViewer::new(config).context("invalid map view")?;

    for &(dx, dy) in &args.pan {
        if let Some(update) = viewer.handle(InputEvent::Drag { dx, dy })? {
            log::info!(
                "drag ({dx}, {dy}): +{} -{} tiles",
                update.added.len(),
                update.removed.len()
            );
        }
    }

    let viewport = viewer.viewport();
    let report = Report {
        zoom: viewport.zoom(),
        center: viewport.center(),
        width: viewport.width(),
        height: viewport.height(),
        bounding_box: *viewport.bounding_box(),
        tiles: viewer.render_plan(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
