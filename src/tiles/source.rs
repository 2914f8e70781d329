use crate::core::geo::TileCoord;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
///
/// `{s}` cycles through the subdomains in request order. The counter belongs
/// to the source instance, so two sources never share a rotation.
#[derive(Debug)]
pub struct UrlTemplateSource {
    template: String,
    subdomains: Vec<String>,
    next: AtomicUsize,
}

impl UrlTemplateSource {
    pub fn new(template: impl Into<String>, subdomains: Vec<String>) -> Self {
        Self {
            template: template.into(),
            subdomains,
            next: AtomicUsize::new(0),
        }
    }

    /// The default OpenStreetMap tile servers, `a` to `c`
    pub fn openstreetmap() -> Self {
        Self::new(
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        )
    }

    /// ArcGIS World Topo, which orders the path as row before column
    pub fn arcgis_topo() -> Self {
        Self::new(
            "https://services.arcgisonline.com/ArcGIS/rest/services/World_Topo_Map/MapServer/tile/{z}/{y}/{x}.png",
            Vec::new(),
        )
    }

    fn next_subdomain(&self) -> &str {
        if self.subdomains.is_empty() {
            return "";
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.subdomains.len();
        &self.subdomains[idx]
    }
}

impl TileSource for UrlTemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        let mut url = self
            .template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string());
        if url.contains("{s}") {
            url = url.replace("{s}", self.next_subdomain());
        }
        url
    }
}
