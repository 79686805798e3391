#![forbid(unsafe_code)]

//! A recording map surface.
//!
//! `HeadlessSurface` implements [`MapSurface`] without any widget
//! behind it: every create/destroy is recorded in a shared ledger, live
//! descriptors stay inspectable, and creation failures can be scripted.
//! The integration and property tests drive the whole engine against
//! it; hosts can use it to dry-run layer updates.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use geomark_render::OverlayDescriptor;

use crate::surface::{MapSurface, OverlayId, SurfaceError};

/// One recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCall {
    /// An overlay was created.
    Create(OverlayId),
    /// An overlay was destroyed.
    Destroy(OverlayId),
}

#[derive(Debug, Default)]
struct StatsInner {
    created: u64,
    destroyed: u64,
    unknown_destroys: u64,
    calls: Vec<SurfaceCall>,
}

/// Shared view of a headless surface's ledger.
///
/// Cloning is cheap and keeps observing the same ledger, so stats stay
/// readable after the surface has moved into a coordinator (or been
/// dropped with it).
#[derive(Debug, Clone, Default)]
pub struct SurfaceStats {
    inner: Rc<RefCell<StatsInner>>,
}

impl SurfaceStats {
    /// Total create calls.
    #[must_use]
    pub fn created(&self) -> u64 {
        self.inner.borrow().created
    }

    /// Total destroy calls that hit a live overlay.
    #[must_use]
    pub fn destroyed(&self) -> u64 {
        self.inner.borrow().destroyed
    }

    /// Overlays currently alive.
    #[must_use]
    pub fn live(&self) -> u64 {
        let inner = self.inner.borrow();
        inner.created - inner.destroyed
    }

    /// Destroy calls for ids this surface never created (or already
    /// destroyed). A layer that only destroys its own handles keeps
    /// this at zero.
    #[must_use]
    pub fn unknown_destroys(&self) -> u64 {
        self.inner.borrow().unknown_destroys
    }

    /// Snapshot of the full call sequence.
    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.inner.borrow().calls.clone()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inner.borrow().calls.len()
    }

    fn record_create(&self, id: OverlayId) {
        let mut inner = self.inner.borrow_mut();
        inner.created += 1;
        inner.calls.push(SurfaceCall::Create(id));
    }

    fn record_destroy(&self, id: OverlayId, known: bool) {
        let mut inner = self.inner.borrow_mut();
        if known {
            inner.destroyed += 1;
            inner.calls.push(SurfaceCall::Destroy(id));
        } else {
            inner.unknown_destroys += 1;
        }
    }
}

/// A widgetless recording surface.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_id: u64,
    live: FxHashMap<OverlayId, OverlayDescriptor>,
    stats: SurfaceStats,
    fail_next: usize,
}

impl HeadlessSurface {
    /// An empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle onto this surface's ledger.
    #[must_use]
    pub fn stats(&self) -> SurfaceStats {
        self.stats.clone()
    }

    /// Overlays currently alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// The descriptor behind a live overlay.
    #[must_use]
    pub fn descriptor(&self, id: OverlayId) -> Option<&OverlayDescriptor> {
        self.live.get(&id)
    }

    /// Clones of all live descriptors, in id order.
    #[must_use]
    pub fn live_descriptors(&self) -> Vec<OverlayDescriptor> {
        let mut ids: Vec<OverlayId> = self.live.keys().copied().collect();
        ids.sort();
        ids.into_iter()
            .filter_map(|id| self.live.get(&id).cloned())
            .collect()
    }

    /// Script the next `n` create calls to fail.
    pub fn fail_next_creates(&mut self, n: usize) {
        self.fail_next = n;
    }
}

impl MapSurface for HeadlessSurface {
    fn create_overlay(
        &mut self,
        descriptor: &OverlayDescriptor,
    ) -> Result<OverlayId, SurfaceError> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(SurfaceError::CreationRejected("scripted failure".into()));
        }

        self.next_id += 1;
        let id = OverlayId::new(self.next_id);
        self.live.insert(id, descriptor.clone());
        self.stats.record_create(id);
        Ok(id)
    }

    fn destroy_overlay(&mut self, id: OverlayId) {
        let known = self.live.remove(&id).is_some();
        self.stats.record_destroy(id, known);
    }
}
