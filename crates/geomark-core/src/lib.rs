#![forbid(unsafe_code)]

//! Core domain types for the GeoMark overlay engine.
//!
//! This crate holds the pure, dependency-light primitives shared by the
//! render and engine crates: geographic coordinates and region geometry,
//! the representative-anchor computation, the normalized summary record
//! model, facility categories with their count table and filter flags,
//! and the render-mode/zoom policy.
//!
//! Nothing in this crate touches a map surface or owns a graphical
//! resource; everything here is plain data and pure functions.

pub mod category;
pub mod geo;
#[cfg(feature = "json")]
pub mod json;
pub mod mode;
pub mod record;

pub use category::{Category, CategoryCounts, CategoryFilter};
pub use geo::{Geometry, LatLng, Ring, anchor};
pub use mode::{RenderMode, ZoomBands};
pub use record::{RawItem, RecordId, SummaryRecord};
