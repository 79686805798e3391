#![forbid(unsafe_code)]

//! Render modes and the zoom policy.
//!
//! The mode is selected externally, either directly (toolbar toggle) or
//! through [`RenderMode::for_zoom`] with the dataset's default zoom
//! bands: region clusters up to zoom 8, compact numeric badges through
//! 10, boundary pills through 12, then individual point markers.

/// The representation a layer renders its records with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    /// Pill badge with label and two category counts.
    #[default]
    Cluster,
    /// Compact badge with a single summed count.
    NumericBadge,
    /// Pill badge with one category count and the region name.
    Boundary,
    /// Small colored per-facility dot.
    Point,
}

/// Zoom thresholds for the mode policy.
///
/// Each band is inclusive of its upper bound; zooms above
/// `boundary_max` render points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomBands {
    /// Highest zoom rendered as clusters.
    pub cluster_max: u8,
    /// Highest zoom rendered as numeric badges.
    pub numeric_max: u8,
    /// Highest zoom rendered as boundary pills.
    pub boundary_max: u8,
}

impl Default for ZoomBands {
    fn default() -> Self {
        Self {
            cluster_max: 8,
            numeric_max: 10,
            boundary_max: 12,
        }
    }
}

impl RenderMode {
    /// Map a zoom level to a mode under the given bands.
    ///
    /// Bands are applied in order, so overlapping thresholds resolve to
    /// the coarsest mode.
    #[must_use]
    pub const fn for_zoom(zoom: u8, bands: &ZoomBands) -> Self {
        if zoom <= bands.cluster_max {
            Self::Cluster
        } else if zoom <= bands.numeric_max {
            Self::NumericBadge
        } else if zoom <= bands.boundary_max {
            Self::Boundary
        } else {
            Self::Point
        }
    }
}
