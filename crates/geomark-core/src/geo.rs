#![forbid(unsafe_code)]

//! Geographic primitives and the representative-anchor computation.
//!
//! Coordinates are plain WGS84 degrees. Ring vertices are stored in
//! GeoJSON `(lng, lat)` order; everything the engine hands to a map
//! surface is `(lat, lng)` via [`LatLng`]. All geometry math happens in
//! degree space, independent of the surface's current projection or
//! zoom.

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Create a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a coordinate only if both components are finite numbers.
    #[inline]
    #[must_use]
    pub fn finite(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }

    /// Check that both components are finite numbers.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A polygon ring: vertices in `(lng, lat)` order.
///
/// A well-formed ring has at least three vertices. The first vertex
/// need not be repeated at the end; closure is implied.
pub type Ring = Vec<(f64, f64)>;

/// Region geometry as delivered by the summary API.
///
/// Only the shapes the upstream data actually produces are modeled.
/// Polygon holes are not represented; a `Polygon` is its outer ring.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single polygon, outer ring only.
    Polygon(Ring),
    /// An ordered sequence of polygon parts; each part is a list of
    /// rings with the outer ring first.
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Check the ring-size invariant: every examined ring has at least
    /// three vertices.
    ///
    /// This is advisory. [`anchor`] tolerates shorter rings (they are
    /// averaged as-is, matching the upstream behavior) and only rejects
    /// empty ones.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Polygon(ring) => ring.len() >= 3,
            Self::MultiPolygon(parts) => {
                !parts.is_empty()
                    && parts
                        .iter()
                        .all(|rings| !rings.is_empty() && rings.iter().all(|r| r.len() >= 3))
            }
        }
    }
}

/// Derive the representative anchor coordinate for a region geometry.
///
/// The anchor is the unweighted arithmetic mean of the examined ring's
/// vertices. This is *not* an area-weighted centroid: it is biased
/// toward vertex-dense stretches of the boundary and can fall outside a
/// concave polygon. The approximation is intentional and preserved
/// as-is; label placement downstream depends on it.
///
/// For a `MultiPolygon`, only the first part's first ring is examined;
/// the remaining parts are ignored, so a multi-part region gets a
/// single anchor on one constituent part.
///
/// Returns `None` for an empty ring, an empty part list, or any
/// non-finite vertex component. Callers treat `None` as "no anchor
/// available", never as an error.
///
/// Pure and deterministic; O(vertices of the examined ring).
#[must_use]
pub fn anchor(geometry: &Geometry) -> Option<LatLng> {
    let ring = match geometry {
        Geometry::Polygon(ring) => ring.as_slice(),
        Geometry::MultiPolygon(parts) => parts.first()?.first()?.as_slice(),
    };
    vertex_mean(ring)
}

fn vertex_mean(ring: &[(f64, f64)]) -> Option<LatLng> {
    if ring.is_empty() {
        return None;
    }

    let mut lat_sum = 0.0_f64;
    let mut lng_sum = 0.0_f64;
    for &(lng, lat) in ring {
        if !lng.is_finite() || !lat.is_finite() {
            return None;
        }
        lat_sum += lat;
        lng_sum += lng;
    }

    let n = ring.len() as f64;
    LatLng::finite(lat_sum / n, lng_sum / n)
}
