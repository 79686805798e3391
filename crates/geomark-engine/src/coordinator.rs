#![forbid(unsafe_code)]

//! Multi-layer coordination over one shared map surface.
//!
//! The coordinator owns N independent layers (cluster, numeric,
//! boundary, per-category point layers, …) plus the heatmap slot. Each
//! layer exclusively owns its handles; no operation on one layer ever
//! touches another's overlays. Hiding a layer destroys its handles —
//! resources are released, not merely made invisible — and showing it
//! rebuilds from its last-known records.
//!
//! # Surface availability
//!
//! The coordinator may be constructed detached. While no surface is
//! attached, every mutating call is a recorded no-op: records, modes,
//! filters, and toggles are stored, and nothing is created. Attaching a
//! surface re-renders every visible layer from that stored state.
//! Detaching destroys all handles through the departing surface first,
//! so nothing it created outlives it.
//!
//! # Teardown
//!
//! `teardown_all` destroys every handle across every layer; it also
//! runs from `Drop`, so the release side of the acquisition is
//! guaranteed on every exit path.

use std::fmt;

use rustc_hash::FxHashMap;

use geomark_core::{CategoryFilter, RecordId, RenderMode, SummaryRecord};
use geomark_render::RendererSet;

use crate::heatmap::HeatmapLayer;
use crate::reconcile::{OverlaySet, ReconcileReport};
use crate::surface::{MapSurface, OverlayId, SurfaceError};

/// Identity of one logical layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u16);

impl LayerId {
    /// Create a layer id from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// A click on a layer's overlay, bubbled to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// The layer the overlay belongs to.
    pub layer: LayerId,
    /// The record the overlay represents.
    pub record: RecordId,
}

#[derive(Debug)]
struct Layer {
    set: OverlaySet,
    latest: Vec<SummaryRecord>,
    mode: RenderMode,
    filter: CategoryFilter,
    visible: bool,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            set: OverlaySet::new(),
            latest: Vec::new(),
            mode: RenderMode::default(),
            filter: CategoryFilter::all(),
            visible: true,
        }
    }
}

impl Layer {
    /// Last-known records the current filter admits.
    fn filtered(&self) -> Vec<SummaryRecord> {
        self.latest
            .iter()
            .filter(|r| r.passes(self.filter))
            .cloned()
            .collect()
    }
}

/// Orchestrates independent overlay layers on one map surface.
#[derive(Debug)]
pub struct OverlayCoordinator<S: MapSurface> {
    surface: Option<S>,
    layers: FxHashMap<LayerId, Layer>,
    heatmap: HeatmapLayer,
    renderers: RendererSet,
}

impl<S: MapSurface> OverlayCoordinator<S> {
    /// A coordinator attached to a surface.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            surface: Some(surface),
            layers: FxHashMap::default(),
            heatmap: HeatmapLayer::new(),
            renderers: RendererSet::new(),
        }
    }

    /// A coordinator with no surface yet; see the module docs.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            surface: None,
            layers: FxHashMap::default(),
            heatmap: HeatmapLayer::new(),
            renderers: RendererSet::new(),
        }
    }

    /// Replace the renderer set.
    #[must_use]
    pub fn with_renderers(mut self, renderers: RendererSet) -> Self {
        self.renderers = renderers;
        self
    }

    /// Replace the heatmap layer (e.g. to set options).
    #[must_use]
    pub fn with_heatmap(mut self, heatmap: HeatmapLayer) -> Self {
        self.heatmap = heatmap;
        self
    }

    /// The attached surface, if any.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Mutable access to the attached surface.
    #[must_use]
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Read access to a layer's reconciled set.
    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&OverlaySet> {
        self.layers.get(&id).map(|layer| &layer.set)
    }

    /// Whether a layer is visible. Unknown layers default to visible.
    #[must_use]
    pub fn layer_visible(&self, id: LayerId) -> bool {
        self.layers.get(&id).is_none_or(|layer| layer.visible)
    }

    /// The heatmap slot.
    #[must_use]
    pub fn heatmap(&self) -> &HeatmapLayer {
        &self.heatmap
    }

    /// Replace a layer's records and mode, reconciling if it can show.
    ///
    /// Only this layer's handles are touched. With no surface attached
    /// or the layer hidden, the data is stored and the pass is a no-op;
    /// the next show/attach renders it.
    pub fn set_layer_data(
        &mut self,
        id: LayerId,
        records: Vec<SummaryRecord>,
        mode: RenderMode,
    ) -> ReconcileReport {
        let layer = self.layers.entry(id).or_default();
        layer.latest = records;
        layer.mode = mode;

        if !layer.visible {
            return ReconcileReport::default();
        }
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!(%id, "surface unavailable; layer data stored");
            return ReconcileReport::default();
        };

        let records = layer.filtered();
        layer
            .set
            .reconcile(records, mode, self.renderers.renderer(mode), surface)
    }

    /// Show or hide a layer.
    ///
    /// Hiding destroys all of the layer's handles; showing rebuilds
    /// them from its last-known records.
    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) -> ReconcileReport {
        let layer = self.layers.entry(id).or_default();
        if layer.visible == visible {
            return ReconcileReport::default();
        }
        layer.visible = visible;

        let Some(surface) = self.surface.as_mut() else {
            return ReconcileReport::default();
        };

        if visible {
            let records = layer.filtered();
            let mode = layer.mode;
            layer
                .set
                .reconcile(records, mode, self.renderers.renderer(mode), surface)
        } else {
            let destroyed = layer.set.clear(surface);
            tracing::debug!(%id, destroyed, "layer hidden");
            ReconcileReport {
                destroyed,
                ..ReconcileReport::default()
            }
        }
    }

    /// Change which categories a layer shows.
    ///
    /// Filtered-out records behave exactly like removed records: their
    /// handles are destroyed on this pass and recreated when the filter
    /// readmits them.
    pub fn set_layer_filter(&mut self, id: LayerId, filter: CategoryFilter) -> ReconcileReport {
        let layer = self.layers.entry(id).or_default();
        if layer.filter == filter {
            return ReconcileReport::default();
        }
        layer.filter = filter;

        if !layer.visible {
            return ReconcileReport::default();
        }
        let Some(surface) = self.surface.as_mut() else {
            return ReconcileReport::default();
        };

        let records = layer.filtered();
        let mode = layer.mode;
        layer
            .set
            .reconcile(records, mode, self.renderers.renderer(mode), surface)
    }

    /// Replace the heatmap sources.
    pub fn set_heatmap_data(&mut self, records: Vec<SummaryRecord>) -> Result<(), SurfaceError> {
        match self.surface.as_mut() {
            Some(surface) => self.heatmap.set_sources(records, surface),
            None => {
                self.heatmap.store_sources(records);
                Ok(())
            }
        }
    }

    /// Toggle the heatmap.
    pub fn set_heatmap_enabled(&mut self, enabled: bool) -> Result<(), SurfaceError> {
        match self.surface.as_mut() {
            Some(surface) => self.heatmap.set_enabled(enabled, surface),
            None => {
                self.heatmap.store_enabled(enabled);
                Ok(())
            }
        }
    }

    /// Attach a surface and re-render every visible layer from stored
    /// state. An already-attached surface is detached (and torn down)
    /// first.
    pub fn attach_surface(&mut self, surface: S) -> ReconcileReport {
        if self.surface.is_some() {
            self.detach_surface();
        }
        self.surface = Some(surface);

        let mut report = ReconcileReport::default();
        if let Some(surface) = self.surface.as_mut() {
            for (id, layer) in &mut self.layers {
                if !layer.visible {
                    continue;
                }
                let records = layer.filtered();
                let mode = layer.mode;
                let pass =
                    layer
                        .set
                        .reconcile(records, mode, self.renderers.renderer(mode), surface);
                tracing::debug!(%id, created = pass.created, "layer re-rendered on attach");
                report.merge(pass);
            }
            if self.heatmap.enabled() {
                if let Err(err) = self.heatmap.rebuild(surface) {
                    tracing::warn!(error = %err, "heatmap rebuild failed on attach");
                }
            }
        }
        report
    }

    /// Detach and return the surface, destroying every handle through
    /// it first so nothing it created outlives it.
    pub fn detach_surface(&mut self) -> Option<S> {
        let mut surface = self.surface.take()?;
        for layer in self.layers.values_mut() {
            layer.set.clear(&mut surface);
        }
        self.heatmap.clear(&mut surface);
        Some(surface)
    }

    /// Destroy every handle across every layer and the heatmap.
    ///
    /// Layer records, modes, filters, and toggles survive; subsequent
    /// data or visibility events rebuild as usual. Also runs from
    /// `Drop`.
    pub fn teardown_all(&mut self) {
        match self.surface.as_mut() {
            Some(surface) => {
                for layer in self.layers.values_mut() {
                    layer.set.clear(surface);
                }
                self.heatmap.clear(surface);
            }
            None => {
                // No surface means no live handles; reset bookkeeping.
                for layer in self.layers.values_mut() {
                    layer.set.forget();
                }
                self.heatmap.forget();
            }
        }
    }

    /// Map a surface click back to the record it landed on.
    #[must_use]
    pub fn resolve_click(&self, overlay: OverlayId) -> Option<ClickEvent> {
        for (id, layer) in &self.layers {
            if let Some(handle) = layer.set.handles().find(|h| h.overlay() == overlay) {
                return Some(ClickEvent {
                    layer: *id,
                    record: handle.record().clone(),
                });
            }
        }
        None
    }
}

impl<S: MapSurface> Drop for OverlayCoordinator<S> {
    fn drop(&mut self) {
        self.teardown_all();
    }
}
