#![forbid(unsafe_code)]

//! Numeric badge renderer.
//!
//! The compact mid-zoom representation: a small capsule showing only
//! the summed count of the categories the active filter admits.

use geomark_core::{CategoryFilter, LatLng, SummaryRecord};

use crate::descriptor::{OverlayContent, OverlayDescriptor, PixelOffset, PixelSize};
use crate::palette::{BORDER_BLUE, TEXT_SLATE, WHITE};
use crate::renderer::Renderer;

/// Compact badge with a single summed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericBadge {
    filter: CategoryFilter,
}

impl NumericBadge {
    /// Badge footprint.
    pub const SIZE: PixelSize = PixelSize::new(32, 24);

    /// Sum across all categories.
    #[must_use]
    pub fn new() -> Self {
        Self {
            filter: CategoryFilter::all(),
        }
    }

    /// Restrict the sum to the categories a filter admits.
    #[must_use]
    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for NumericBadge {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for NumericBadge {
    fn render(&self, record: &SummaryRecord, position: LatLng) -> OverlayDescriptor {
        #[cfg(feature = "tracing")]
        tracing::trace!(id = %record.id, "render numeric badge");

        OverlayDescriptor {
            position,
            content: OverlayContent::Badge {
                text: record.counts.filtered_total(self.filter).to_string(),
                fill: WHITE,
                border: BORDER_BLUE,
                text_color: TEXT_SLATE,
                font_size: 12,
            },
            size: Self::SIZE,
            anchor: PixelOffset::centered(Self::SIZE),
            interactive: false,
        }
    }
}
