#![forbid(unsafe_code)]

//! Boundary badge renderer.
//!
//! The boundary-level pill: region name plus one configured category's
//! count, bordered in that category's color so adjacent boundary and
//! cluster pills stay distinguishable.

use geomark_core::{Category, LatLng, SummaryRecord};
use smallvec::smallvec;

use crate::descriptor::{
    CountSegment, OverlayContent, OverlayDescriptor, PixelOffset, PixelSize,
};
use crate::palette::{TEXT_SLATE, WHITE, category_color};
use crate::renderer::Renderer;

/// Pill badge with one category count and the region name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryBadge {
    category: Category,
}

impl BoundaryBadge {
    /// Pill footprint.
    pub const SIZE: PixelSize = PixelSize::new(100, 44);

    /// Hospital-count pill.
    #[must_use]
    pub fn new() -> Self {
        Self {
            category: Category::Hospital,
        }
    }

    /// Choose which category's count the pill shows.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

impl Default for BoundaryBadge {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for BoundaryBadge {
    fn render(&self, record: &SummaryRecord, position: LatLng) -> OverlayDescriptor {
        #[cfg(feature = "tracing")]
        tracing::trace!(id = %record.id, "render boundary badge");

        let accent = category_color(self.category);

        OverlayDescriptor {
            position,
            content: OverlayContent::Pill {
                title: Some(record.label.clone()),
                segments: smallvec![CountSegment {
                    category: self.category,
                    count: record.counts.get(self.category),
                    color: accent,
                }],
                fill: WHITE,
                border: accent,
                text: TEXT_SLATE,
                font_size: 14,
            },
            size: Self::SIZE,
            anchor: PixelOffset::centered(Self::SIZE),
            interactive: false,
        }
    }
}
