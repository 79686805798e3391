#![forbid(unsafe_code)]

//! GeoMark public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! A typical host builds an [`OverlayCoordinator`] over its map
//! widget's [`MapSurface`] implementation, normalizes incoming API
//! items with [`RawItem`], and pushes them into layers with
//! `set_layer_data` as data, zoom, and filters change. The coordinator
//! keeps overlays synchronized and guarantees teardown when it drops.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use geomark_core::{
    Category, CategoryCounts, CategoryFilter, Geometry, LatLng, RawItem, RecordId, RenderMode,
    Ring, SummaryRecord, ZoomBands, anchor,
};

// --- Render re-exports -----------------------------------------------------

pub use geomark_render::{
    BoundaryBadge, ClusterBadge, CountSegment, GradientStop, NumericBadge, OverlayContent,
    OverlayDescriptor, PixelOffset, PixelSize, PointDot, Renderer, RendererSet, Rgb,
};

// --- Engine re-exports -----------------------------------------------------

pub use geomark_engine::{
    ClickEvent, HeadlessSurface, HeatmapLayer, HeatmapOptions, LayerId, MapSurface,
    OverlayCoordinator, OverlayHandle, OverlayId, OverlaySet, ReconcileReport, SurfaceError,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for geomark hosts.
#[derive(Debug)]
pub enum Error {
    /// The map surface refused an operation.
    Surface(SurfaceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<SurfaceError> for Error {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}

/// Standard result type for geomark APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Category, CategoryFilter, ClickEvent, Error, LatLng, LayerId, MapSurface,
        OverlayCoordinator, OverlayDescriptor, RawItem, RecordId, RenderMode, RendererSet, Result,
        SummaryRecord,
    };

    pub use crate::{core, engine, render};
}

pub use geomark_core as core;
pub use geomark_engine as engine;
pub use geomark_render as render;
