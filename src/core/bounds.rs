use crate::core::geo::{GeoPoint, PixelPoint};
use crate::core::projection::Projection;
use serde::{Deserialize, Serialize};

/// One corner of a bounding box, in both pixel and geographic terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    pub pixel: PixelPoint,
    pub geo: GeoPoint,
}

impl Corner {
    fn from_pixel(pixel: PixelPoint, projection: &Projection) -> Self {
        Self {
            pixel,
            geo: projection.pixel_to_geo(pixel),
        }
    }
}

/// The region of the global pixel plane covered by the viewport.
///
/// `a` is the top-left corner, `b` the bottom-right one and `c` the center.
/// Near the poles or the antimeridian the corner geo values may fall outside
/// the nominal longitude/latitude ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub a: Corner,
    pub b: Corner,
    pub c: Corner,
}

impl BoundingBox {
    /// Centers a `width` × `height` pixel rectangle on `center`
    pub fn new(center: GeoPoint, width: i64, height: i64, projection: &Projection) -> Self {
        Self::around(projection.geo_to_pixel(center), center, width, height, projection)
    }

    /// Centers the rectangle on an already projected center pixel.
    ///
    /// `center` is stored as `c.geo` unchanged; it is not re-derived from `cpx`.
    pub fn around(
        cpx: PixelPoint,
        center: GeoPoint,
        width: i64,
        height: i64,
        projection: &Projection,
    ) -> Self {
        let half_w = width.div_euclid(2);
        let half_h = height.div_euclid(2);

        Self {
            a: Corner::from_pixel(cpx.offset(-half_w, -half_h), projection),
            b: Corner::from_pixel(cpx.offset(half_w, half_h), projection),
            c: Corner {
                pixel: cpx,
                geo: center,
            },
        }
    }

    /// Converts a viewport-relative pixel to the global pixel plane
    pub fn to_global(&self, relative: PixelPoint) -> PixelPoint {
        self.a.pixel.offset(relative.x, relative.y)
    }
}
