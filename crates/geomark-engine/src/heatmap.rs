#![forbid(unsafe_code)]

//! The heatmap layer.
//!
//! A degenerate layer with at most one handle: every valid point
//! coordinate across its source records feeds a single aggregate
//! overlay. Toggling is atomic — the whole overlay is created or
//! destroyed, never reconciled per record. With no valid points the
//! layer creates nothing, matching the upstream behavior of refusing an
//! empty heatmap.

use geomark_core::{LatLng, SummaryRecord};
use geomark_render::{
    GradientStop, OverlayContent, OverlayDescriptor, PixelOffset, PixelSize, Rgb,
};

use crate::surface::{MapSurface, OverlayId, SurfaceError};

/// The established heat gradient: blue through lime and yellow to red.
pub const DEFAULT_GRADIENT: [GradientStop; 4] = [
    GradientStop::new(0.4, Rgb::new(0, 0, 255)),
    GradientStop::new(0.6, Rgb::new(0, 255, 0)),
    GradientStop::new(0.8, Rgb::new(255, 255, 0)),
    GradientStop::new(1.0, Rgb::new(255, 0, 0)),
];

/// Heatmap rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapOptions {
    /// Influence radius in pixels.
    pub radius: u16,
    /// Overall opacity, 0.0..=1.0.
    pub opacity: f32,
    /// Gradient stops, ascending.
    pub gradient: Vec<GradientStop>,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            radius: 50,
            opacity: 0.8,
            gradient: DEFAULT_GRADIENT.to_vec(),
        }
    }
}

/// The single-handle aggregate layer.
#[derive(Debug, Default)]
pub struct HeatmapLayer {
    sources: Vec<SummaryRecord>,
    options: HeatmapOptions,
    handle: Option<OverlayId>,
    enabled: bool,
}

impl HeatmapLayer {
    /// A disabled, empty layer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rendering options.
    #[must_use]
    pub fn with_options(mut self, options: HeatmapOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether the layer is toggled on.
    #[inline]
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The live aggregate overlay, if any.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> Option<OverlayId> {
        self.handle
    }

    /// The current options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &HeatmapOptions {
        &self.options
    }

    /// Store sources without touching any surface.
    ///
    /// For the detached state; the next enable/attach builds from them.
    pub fn store_sources(&mut self, sources: Vec<SummaryRecord>) {
        self.sources = sources;
    }

    /// Store the toggle without touching any surface.
    pub fn store_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Replace the sources and, when enabled, rebuild the overlay.
    pub fn set_sources(
        &mut self,
        sources: Vec<SummaryRecord>,
        surface: &mut dyn MapSurface,
    ) -> Result<(), SurfaceError> {
        self.sources = sources;
        if self.enabled {
            self.rebuild(surface)
        } else {
            Ok(())
        }
    }

    /// Toggle the layer; the overlay is created or destroyed atomically.
    pub fn set_enabled(
        &mut self,
        enabled: bool,
        surface: &mut dyn MapSurface,
    ) -> Result<(), SurfaceError> {
        if enabled == self.enabled {
            return Ok(());
        }
        self.enabled = enabled;
        if enabled {
            self.rebuild(surface)
        } else {
            self.clear(surface);
            Ok(())
        }
    }

    /// Rebuild the aggregate overlay from the current sources.
    ///
    /// Also used on surface attachment when the layer is toggled on.
    pub fn rebuild(&mut self, surface: &mut dyn MapSurface) -> Result<(), SurfaceError> {
        self.clear(surface);

        let points: Vec<LatLng> = self.sources.iter().filter_map(|r| r.coordinate).collect();
        if points.is_empty() {
            tracing::debug!("heatmap has no valid points; nothing to show");
            return Ok(());
        }

        let descriptor = aggregate_descriptor(&points, &self.options);
        self.handle = Some(surface.create_overlay(&descriptor)?);
        tracing::debug!(points = points.len(), "heatmap overlay built");
        Ok(())
    }

    /// Destroy the overlay if it exists; the toggle is untouched.
    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        if let Some(handle) = self.handle.take() {
            surface.destroy_overlay(handle);
        }
    }

    /// Drop the handle without touching any surface (detachment only).
    pub fn forget(&mut self) {
        self.handle = None;
    }
}

/// Build the aggregate descriptor: all points in source order
/// (duplicates kept), positioned at their mean.
fn aggregate_descriptor(points: &[LatLng], options: &HeatmapOptions) -> OverlayDescriptor {
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let lng = points.iter().map(|p| p.lng).sum::<f64>() / n;

    OverlayDescriptor {
        position: LatLng::new(lat, lng),
        content: OverlayContent::Heatmap {
            points: points.to_vec(),
            radius: options.radius,
            opacity: options.opacity,
            gradient: options.gradient.clone(),
        },
        size: PixelSize::default(),
        anchor: PixelOffset::default(),
        interactive: false,
    }
}
