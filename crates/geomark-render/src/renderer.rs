#![forbid(unsafe_code)]

//! The renderer seam.
//!
//! [`Renderer`] is the only thing the reconciler knows about rendering:
//! a pure mapping from one valid record (and its resolved position) to
//! a descriptor. [`RendererSet`] bundles one renderer per mode for the
//! coordinator; swapping a renderer or adding a mode never touches
//! lifecycle code.

use geomark_core::{LatLng, RenderMode, SummaryRecord};

use crate::boundary::BoundaryBadge;
use crate::cluster::ClusterBadge;
use crate::descriptor::OverlayDescriptor;
use crate::numeric::NumericBadge;
use crate::point::PointDot;

/// A pure record-to-descriptor mapping.
///
/// `position` is the record's resolved coordinate; the caller only
/// renders valid records, so the position is always available.
/// Implementations must not mutate shared state.
pub trait Renderer {
    /// Render one record into an overlay descriptor.
    fn render(&self, record: &SummaryRecord, position: LatLng) -> OverlayDescriptor;
}

/// One renderer per render mode.
#[derive(Debug, Clone, Default)]
pub struct RendererSet {
    cluster: ClusterBadge,
    numeric: NumericBadge,
    boundary: BoundaryBadge,
    point: PointDot,
}

impl RendererSet {
    /// A set with every renderer at its defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cluster renderer.
    #[must_use]
    pub fn with_cluster(mut self, cluster: ClusterBadge) -> Self {
        self.cluster = cluster;
        self
    }

    /// Replace the numeric renderer.
    #[must_use]
    pub fn with_numeric(mut self, numeric: NumericBadge) -> Self {
        self.numeric = numeric;
        self
    }

    /// Replace the boundary renderer.
    #[must_use]
    pub fn with_boundary(mut self, boundary: BoundaryBadge) -> Self {
        self.boundary = boundary;
        self
    }

    /// Replace the point renderer.
    #[must_use]
    pub fn with_point(mut self, point: PointDot) -> Self {
        self.point = point;
        self
    }

    /// The renderer for a mode.
    #[must_use]
    pub fn renderer(&self, mode: RenderMode) -> &dyn Renderer {
        match mode {
            RenderMode::Cluster => &self.cluster,
            RenderMode::NumericBadge => &self.numeric,
            RenderMode::Boundary => &self.boundary,
            RenderMode::Point => &self.point,
        }
    }
}
