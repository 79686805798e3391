#![forbid(unsafe_code)]

//! Overlay lifecycle engine.
//!
//! This crate owns the stateful half of GeoMark: the identity-keyed
//! reconciler that keeps one overlay per live record, the coordinator
//! that runs independent layers against one shared map surface, and the
//! degenerate single-handle heatmap layer.
//!
//! # Execution model
//!
//! Everything here is single-threaded and event-driven. Each external
//! event (new data, mode change, filter change, visibility toggle,
//! teardown) runs one bounded, synchronous reconciliation pass for the
//! affected layer; a pass never suspends, so no other handler can
//! observe a half-applied destroy/create sequence. Events are processed
//! in arrival order; superseded data is implicit — only the latest call
//! for a layer is ever reconciled.
//!
//! # Resource discipline
//!
//! The map surface is borrowed, never owned, by the overlay logic: each
//! layer exclusively owns the handles it created and never destroys
//! another layer's. Teardown is guaranteed on every exit path — the
//! coordinator destroys all handles in `Drop`, the same way a terminal
//! session guard restores the terminal.

pub mod coordinator;
pub mod headless;
pub mod heatmap;
pub mod reconcile;
pub mod surface;

pub use coordinator::{ClickEvent, LayerId, OverlayCoordinator};
pub use headless::{HeadlessSurface, SurfaceCall, SurfaceStats};
pub use heatmap::{DEFAULT_GRADIENT, HeatmapLayer, HeatmapOptions};
pub use reconcile::{OverlayHandle, OverlaySet, ReconcileReport};
pub use surface::{MapSurface, OverlayId, SurfaceError};
