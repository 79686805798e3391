#![forbid(unsafe_code)]

//! Overlay descriptors and the pluggable renderers.
//!
//! A renderer is a pure mapping from one valid summary record to an
//! [`OverlayDescriptor`] — the full visual contract a map surface needs
//! to place a marker: position, content, pixel size, and anchor offset.
//! One renderer per [`RenderMode`](geomark_core::RenderMode), bundled
//! in a [`RendererSet`]; the reconciler only ever sees the [`Renderer`]
//! trait, so new modes slot in without touching lifecycle code.
//!
//! Renderers never mutate shared state and never talk to the surface.

pub mod boundary;
pub mod cluster;
pub mod descriptor;
pub mod numeric;
pub mod palette;
pub mod point;
pub mod renderer;

pub use boundary::BoundaryBadge;
pub use cluster::ClusterBadge;
pub use descriptor::{
    CountSegment, GradientStop, OverlayContent, OverlayDescriptor, PixelOffset, PixelSize,
};
pub use numeric::NumericBadge;
pub use palette::Rgb;
pub use point::PointDot;
pub use renderer::{Renderer, RendererSet};
