#![forbid(unsafe_code)]

//! Cluster badge renderer.
//!
//! The default shape is the region pill: name plus two category counts
//! in a white, blue-bordered capsule. The alternative `scaled` shape is
//! the count-scaled circle used for dense clusters — diameter and font
//! grow with the total until they cap.

use geomark_core::{Category, LatLng, SummaryRecord};
use smallvec::smallvec;

use crate::descriptor::{
    CountSegment, OverlayContent, OverlayDescriptor, PixelOffset, PixelSize,
};
use crate::palette::{BORDER_BLUE, CLUSTER_RED, COUNT_BLUE, COUNT_GREEN, TEXT_SLATE, WHITE};
use crate::renderer::Renderer;

/// Pill badge with label and two category counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterBadge {
    primary: Category,
    secondary: Category,
    scaled: bool,
}

impl ClusterBadge {
    /// Pill footprint.
    pub const SIZE: PixelSize = PixelSize::new(120, 36);

    /// Scaled-circle bounds.
    const MIN_DIAMETER: f64 = 36.0;
    const MAX_DIAMETER: f64 = 48.0;
    const MIN_FONT: f64 = 12.0;
    const MAX_FONT: f64 = 16.0;

    /// Hospital + pharmacy pill.
    #[must_use]
    pub fn new() -> Self {
        Self {
            primary: Category::Hospital,
            secondary: Category::Pharmacy,
            scaled: false,
        }
    }

    /// Choose which two categories the pill shows.
    #[must_use]
    pub fn with_categories(mut self, primary: Category, secondary: Category) -> Self {
        self.primary = primary;
        self.secondary = secondary;
        self
    }

    /// Switch to the count-scaled circle shape.
    #[must_use]
    pub fn scaled(mut self) -> Self {
        self.scaled = true;
        self
    }

    fn scaled_descriptor(&self, record: &SummaryRecord, position: LatLng) -> OverlayDescriptor {
        let total = record.counts.total();
        let diameter =
            (Self::MIN_DIAMETER + total as f64 * 1.5).min(Self::MAX_DIAMETER) as u16;
        let font_size = (Self::MIN_FONT + total as f64 / 10.0).min(Self::MAX_FONT) as u16;
        let size = PixelSize::square(diameter);

        OverlayDescriptor {
            position,
            content: OverlayContent::Badge {
                text: total.to_string(),
                fill: CLUSTER_RED,
                border: WHITE,
                text_color: WHITE,
                font_size,
            },
            size,
            anchor: PixelOffset::centered(size),
            interactive: false,
        }
    }
}

impl Default for ClusterBadge {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ClusterBadge {
    fn render(&self, record: &SummaryRecord, position: LatLng) -> OverlayDescriptor {
        #[cfg(feature = "tracing")]
        tracing::trace!(id = %record.id, scaled = self.scaled, "render cluster badge");

        if self.scaled {
            return self.scaled_descriptor(record, position);
        }

        OverlayDescriptor {
            position,
            content: OverlayContent::Pill {
                title: Some(record.label.clone()),
                segments: smallvec![
                    CountSegment {
                        category: self.primary,
                        count: record.counts.get(self.primary),
                        color: COUNT_BLUE,
                    },
                    CountSegment {
                        category: self.secondary,
                        count: record.counts.get(self.secondary),
                        color: COUNT_GREEN,
                    },
                ],
                fill: WHITE,
                border: BORDER_BLUE,
                text: TEXT_SLATE,
                font_size: 13,
            },
            size: Self::SIZE,
            anchor: PixelOffset::centered(Self::SIZE),
            interactive: false,
        }
    }
}
