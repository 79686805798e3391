#![forbid(unsafe_code)]

//! The map-surface contract.
//!
//! The engine consumes exactly two capabilities from the host's map
//! widget: create an overlay from a descriptor, destroy it by id. No
//! projection API is consumed — all placement math happens in lat/lng
//! space — and no debouncing is imposed; the surface must tolerate
//! rapid create/destroy sequences.
//!
//! Implementations are typically lightweight handles onto the real map
//! widget (the surface itself stays owned by the host).

use std::fmt;

use geomark_render::OverlayDescriptor;

/// Opaque identity of one overlay created on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    /// Create an id from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay-{}", self.0)
    }
}

/// A surface-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface rejected overlay creation.
    CreationRejected(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreationRejected(msg) => write!(f, "overlay creation rejected: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// The two capabilities the engine borrows from the map widget.
pub trait MapSurface {
    /// Place one overlay; returns its surface identity.
    fn create_overlay(&mut self, descriptor: &OverlayDescriptor)
    -> Result<OverlayId, SurfaceError>;

    /// Remove one overlay. Unknown ids must be tolerated.
    fn destroy_overlay(&mut self, id: OverlayId);
}

#[cfg(test)]
mod tests {
    use super::{OverlayId, SurfaceError};

    #[test]
    fn overlay_id_round_trip_and_display() {
        let id = OverlayId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.to_string(), "overlay-7");
    }

    #[test]
    fn surface_error_display() {
        let err = SurfaceError::CreationRejected("quota".into());
        assert_eq!(err.to_string(), "overlay creation rejected: quota");
    }
}
