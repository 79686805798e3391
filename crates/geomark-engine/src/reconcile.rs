#![forbid(unsafe_code)]

//! Identity-keyed overlay reconciliation.
//!
//! An [`OverlaySet`] maps record ids to live overlay handles and keeps
//! them synchronized with incoming data through [`OverlaySet::reconcile`]:
//! a diff by identity that destroys stale handles, creates missing
//! ones, and recreates handles whose display payload changed — instead
//! of the clear-everything-and-rebuild churn this replaces.
//!
//! # Algorithm
//!
//! 1. Index incoming records by id, dropping invalid ones (no resolved
//!    coordinate). Duplicate ids resolve last-write-wins.
//! 2. Destroy every handle whose id is gone from the new index or whose
//!    mode differs from the pass mode. This runs unconditionally so a
//!    failing create later in the pass can never leak a stale overlay.
//! 3. For each id in the new index: create a handle if none exists;
//!    recreate it if its payload snapshot (position, label, counts,
//!    selection) changed; leave it untouched otherwise.
//!
//! Running the same pass twice is a no-op the second time: identical
//! input produces zero surface calls.
//!
//! # Invariant
//!
//! After every pass, `handles` and `records` hold exactly the same ids:
//! no orphan handles, no missing handles for valid records. A record
//! whose creation the surface rejected is excluded from both and
//! reported, so resending the same data retries exactly the failed
//! overlays.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use geomark_core::{CategoryCounts, LatLng, RecordId, RenderMode, SummaryRecord};
use geomark_render::Renderer;

use crate::surface::{MapSurface, OverlayId};

/// Display payload snapshot used for update detection.
#[derive(Debug, Clone, PartialEq)]
struct RenderPayload {
    position: LatLng,
    label: String,
    counts: CategoryCounts,
    selected: bool,
}

impl RenderPayload {
    fn of(record: &SummaryRecord, position: LatLng) -> Self {
        Self {
            position,
            label: record.label.clone(),
            counts: record.counts,
            selected: record.selected,
        }
    }
}

/// One live overlay, owned by the set that created it.
#[derive(Debug, Clone)]
pub struct OverlayHandle {
    overlay: OverlayId,
    record: RecordId,
    mode: RenderMode,
    payload: RenderPayload,
}

impl OverlayHandle {
    /// The surface identity of this overlay.
    #[inline]
    #[must_use]
    pub fn overlay(&self) -> OverlayId {
        self.overlay
    }

    /// The record this overlay represents.
    #[inline]
    #[must_use]
    pub fn record(&self) -> &RecordId {
        &self.record
    }

    /// The mode this overlay was rendered under.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }
}

/// What one reconciliation pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    /// Handles created for newly appearing records.
    pub created: usize,
    /// Handles recreated because their payload changed.
    pub updated: usize,
    /// Handles destroyed for removed or mode-changed records.
    pub destroyed: usize,
    /// Records whose overlay the surface refused to create. Resending
    /// the same data retries them.
    pub failed: SmallVec<[RecordId; 4]>,
}

impl ReconcileReport {
    /// Whether the pass touched the surface at all.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.destroyed == 0 && self.failed.is_empty()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: ReconcileReport) {
        self.created += other.created;
        self.updated += other.updated;
        self.destroyed += other.destroyed;
        self.failed.extend(other.failed);
    }
}

/// A reconciled collection of records and their overlay handles.
#[derive(Debug, Default)]
pub struct OverlaySet {
    records: FxHashMap<RecordId, SummaryRecord>,
    handles: FxHashMap<RecordId, OverlayHandle>,
    mode: RenderMode,
}

impl OverlaySet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The mode of the last pass.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Number of live handles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the set holds no handles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// The record behind an id, if live.
    #[must_use]
    pub fn record(&self, id: &RecordId) -> Option<&SummaryRecord> {
        self.records.get(id)
    }

    /// The handle behind an id, if live.
    #[must_use]
    pub fn handle(&self, id: &RecordId) -> Option<&OverlayHandle> {
        self.handles.get(id)
    }

    /// Iterate the live handles.
    pub fn handles(&self) -> impl Iterator<Item = &OverlayHandle> {
        self.handles.values()
    }

    /// Reconcile the set against incoming records under a mode.
    ///
    /// See the module docs for the algorithm. The pass is synchronous
    /// and bounded; it completes before returning, so callers never
    /// observe a half-applied set.
    pub fn reconcile(
        &mut self,
        incoming: impl IntoIterator<Item = SummaryRecord>,
        mode: RenderMode,
        renderer: &dyn Renderer,
        surface: &mut dyn MapSurface,
    ) -> ReconcileReport {
        let _span = tracing::debug_span!("reconcile", mode = ?mode).entered();
        let mut report = ReconcileReport::default();

        // Step 1: index valid incoming records; last write wins.
        let mut next: FxHashMap<RecordId, SummaryRecord> = FxHashMap::default();
        for record in incoming {
            if record.is_valid() {
                next.insert(record.id.clone(), record);
            } else {
                tracing::trace!(id = %record.id, "skipping record without coordinate");
            }
        }

        // Step 2: destroy stale and mode-changed handles.
        let stale: Vec<RecordId> = self
            .handles
            .iter()
            .filter(|(id, handle)| !next.contains_key(*id) || handle.mode != mode)
            .map(|(id, _)| (*id).clone())
            .collect();
        for id in stale {
            if let Some(handle) = self.handles.remove(&id) {
                surface.destroy_overlay(handle.overlay);
                report.destroyed += 1;
            }
        }

        // Step 3: create missing handles, recreate changed ones.
        for (id, record) in &next {
            let Some(position) = record.coordinate else {
                continue;
            };
            let payload = RenderPayload::of(record, position);

            if let Some(existing) = self.handles.get(id) {
                if existing.payload == payload {
                    continue;
                }
                if let Some(old) = self.handles.remove(id) {
                    surface.destroy_overlay(old.overlay);
                }
                match surface.create_overlay(&renderer.render(record, position)) {
                    Ok(overlay) => {
                        self.handles.insert(
                            id.clone(),
                            OverlayHandle {
                                overlay,
                                record: id.clone(),
                                mode,
                                payload,
                            },
                        );
                        report.updated += 1;
                    }
                    Err(err) => {
                        tracing::warn!(id = %id, error = %err, "overlay update rejected");
                        report.failed.push(id.clone());
                    }
                }
            } else {
                match surface.create_overlay(&renderer.render(record, position)) {
                    Ok(overlay) => {
                        self.handles.insert(
                            id.clone(),
                            OverlayHandle {
                                overlay,
                                record: id.clone(),
                                mode,
                                payload,
                            },
                        );
                        report.created += 1;
                    }
                    Err(err) => {
                        tracing::warn!(id = %id, error = %err, "overlay creation rejected");
                        report.failed.push(id.clone());
                    }
                }
            }
        }

        // Failed ids leave both maps so the invariant holds and a retry
        // recreates them.
        for id in &report.failed {
            next.remove(id);
        }

        self.records = next;
        self.mode = mode;

        tracing::trace!(
            created = report.created,
            updated = report.updated,
            destroyed = report.destroyed,
            failed = report.failed.len(),
            live = self.handles.len(),
            "reconcile pass complete"
        );
        debug_assert_eq!(self.handles.len(), self.records.len());
        report
    }

    /// Destroy every handle and forget all records.
    ///
    /// Returns the number of overlays destroyed. Used for hiding a
    /// layer (resources are released, not merely hidden) and for
    /// teardown.
    pub fn clear(&mut self, surface: &mut dyn MapSurface) -> usize {
        let destroyed = self.handles.len();
        for (_, handle) in self.handles.drain() {
            surface.destroy_overlay(handle.overlay);
        }
        self.records.clear();
        destroyed
    }

    /// Drop all handles and records without touching any surface.
    ///
    /// Only for surface detachment, where the overlays died with the
    /// surface itself.
    pub fn forget(&mut self) {
        self.handles.clear();
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use geomark_core::{Category, RawItem, RecordId, RenderMode, SummaryRecord};
    use geomark_render::RendererSet;

    use super::OverlaySet;
    use crate::headless::HeadlessSurface;

    fn region(id: &str, hospitals: u32) -> SummaryRecord {
        RawItem::new(id)
            .with_name(id)
            .with_coordinate(37.0, 127.0)
            .with_count(Category::Hospital, hospitals)
            .normalize()
    }

    fn invalid(id: &str) -> SummaryRecord {
        RawItem::new(id).with_name(id).normalize()
    }

    #[test]
    fn creates_one_handle_per_valid_record() {
        let renderers = RendererSet::new();
        let mut surface = HeadlessSurface::new();
        let mut set = OverlaySet::new();

        let report = set.reconcile(
            vec![region("a", 5), region("b", 3), invalid("c")],
            RenderMode::Boundary,
            renderers.renderer(RenderMode::Boundary),
            &mut surface,
        );

        assert_eq!(report.created, 2);
        assert_eq!(set.len(), 2);
        assert!(set.handle(&RecordId::from("a")).is_some());
        assert!(set.handle(&RecordId::from("c")).is_none());
        assert!(set.record(&RecordId::from("c")).is_none());
    }

    #[test]
    fn second_identical_pass_is_a_noop() {
        let renderers = RendererSet::new();
        let mut surface = HeadlessSurface::new();
        let stats = surface.stats();
        let mut set = OverlaySet::new();

        let records = vec![region("a", 5), region("b", 3)];
        set.reconcile(
            records.clone(),
            RenderMode::Boundary,
            renderers.renderer(RenderMode::Boundary),
            &mut surface,
        );
        let calls_after_first = stats.call_count();

        let report = set.reconcile(
            records,
            RenderMode::Boundary,
            renderers.renderer(RenderMode::Boundary),
            &mut surface,
        );

        assert!(report.is_noop());
        assert_eq!(stats.call_count(), calls_after_first);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn removal_destroys_and_change_updates() {
        let renderers = RendererSet::new();
        let mut surface = HeadlessSurface::new();
        let stats = surface.stats();
        let mut set = OverlaySet::new();

        set.reconcile(
            vec![region("a", 5), region("b", 3)],
            RenderMode::Boundary,
            renderers.renderer(RenderMode::Boundary),
            &mut surface,
        );

        let report = set.reconcile(
            vec![region("a", 7)],
            RenderMode::Boundary,
            renderers.renderer(RenderMode::Boundary),
            &mut surface,
        );

        assert_eq!(report.destroyed, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(report.created, 0);
        assert_eq!(set.len(), 1);
        // b's overlay is gone; a's was recreated.
        assert_eq!(stats.live(), 1);
    }

    #[test]
    fn mode_switch_rebuilds_under_the_new_renderer() {
        let renderers = RendererSet::new();
        let mut surface = HeadlessSurface::new();
        let stats = surface.stats();
        let mut set = OverlaySet::new();

        let records = vec![region("a", 5)];
        set.reconcile(
            records.clone(),
            RenderMode::Cluster,
            renderers.renderer(RenderMode::Cluster),
            &mut surface,
        );
        let report = set.reconcile(
            records,
            RenderMode::NumericBadge,
            renderers.renderer(RenderMode::NumericBadge),
            &mut surface,
        );

        // The cluster handle is destroyed and exactly one numeric
        // handle exists; the two never coexist.
        assert_eq!(report.destroyed, 1);
        assert_eq!(report.created, 1);
        assert_eq!(set.len(), 1);
        assert_eq!(stats.live(), 1);
        assert_eq!(
            set.handle(&RecordId::from("a")).map(|h| h.mode()),
            Some(RenderMode::NumericBadge)
        );
    }

    #[test]
    fn duplicate_ids_resolve_last_write_wins() {
        let renderers = RendererSet::new();
        let mut surface = HeadlessSurface::new();
        let mut set = OverlaySet::new();

        set.reconcile(
            vec![region("a", 1), region("a", 9)],
            RenderMode::Boundary,
            renderers.renderer(RenderMode::Boundary),
            &mut surface,
        );

        assert_eq!(set.len(), 1);
        let record = set.record(&RecordId::from("a")).unwrap();
        assert_eq!(record.counts.get(Category::Hospital), 9);
    }

    #[test]
    fn creation_failure_is_reported_and_retryable() {
        let renderers = RendererSet::new();
        let mut surface = HeadlessSurface::new();
        let mut set = OverlaySet::new();

        surface.fail_next_creates(1);
        let records = vec![region("a", 5), region("b", 3)];
        let report = set.reconcile(
            records.clone(),
            RenderMode::Boundary,
            renderers.renderer(RenderMode::Boundary),
            &mut surface,
        );

        // One id failed, the other went through.
        assert_eq!(report.created, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(set.len(), 1);

        // Resending the same data retries exactly the failed overlay.
        let report = set.reconcile(
            records,
            RenderMode::Boundary,
            renderers.renderer(RenderMode::Boundary),
            &mut surface,
        );
        assert_eq!(report.created, 1);
        assert!(report.failed.is_empty());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn clear_destroys_everything() {
        let renderers = RendererSet::new();
        let mut surface = HeadlessSurface::new();
        let stats = surface.stats();
        let mut set = OverlaySet::new();

        set.reconcile(
            vec![region("a", 5), region("b", 3)],
            RenderMode::Boundary,
            renderers.renderer(RenderMode::Boundary),
            &mut surface,
        );
        assert_eq!(set.clear(&mut surface), 2);
        assert!(set.is_empty());
        assert_eq!(stats.live(), 0);
        assert_eq!(stats.created(), stats.destroyed());
    }

    #[test]
    fn selection_toggle_counts_as_an_update() {
        let renderers = RendererSet::new();
        let mut surface = HeadlessSurface::new();
        let mut set = OverlaySet::new();

        let base = RawItem::new("p")
            .with_coordinate(37.0, 127.0)
            .with_category(Category::Pharmacy);
        set.reconcile(
            vec![base.clone().normalize()],
            RenderMode::Point,
            renderers.renderer(RenderMode::Point),
            &mut surface,
        );
        let report = set.reconcile(
            vec![base.with_selected(true).normalize()],
            RenderMode::Point,
            renderers.renderer(RenderMode::Point),
            &mut surface,
        );

        assert_eq!(report.updated, 1);
        assert_eq!(set.len(), 1);
    }
}
