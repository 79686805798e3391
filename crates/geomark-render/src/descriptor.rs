#![forbid(unsafe_code)]

//! The visual contract between renderers and the map surface.
//!
//! A descriptor is everything the surface needs to place one overlay:
//! the geographic position, the content to draw, the pixel footprint,
//! and the anchor offset (the pixel inside the footprint that sits on
//! the position). Descriptors are plain data — cloneable, comparable,
//! surface-agnostic.

use geomark_core::{Category, LatLng};
use smallvec::SmallVec;

use crate::palette::Rgb;

/// Pixel footprint of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl PixelSize {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// A square footprint.
    #[inline]
    #[must_use]
    pub const fn square(side: u16) -> Self {
        Self::new(side, side)
    }
}

/// Anchor offset from the overlay's top-left corner, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelOffset {
    /// Horizontal offset.
    pub x: i16,
    /// Vertical offset.
    pub y: i16,
}

impl PixelOffset {
    /// Create a new offset.
    #[inline]
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The center of a footprint.
    #[inline]
    #[must_use]
    pub const fn centered(size: PixelSize) -> Self {
        Self::new((size.width / 2) as i16, (size.height / 2) as i16)
    }

    /// The bottom-center of a footprint (pin-style markers).
    #[inline]
    #[must_use]
    pub const fn bottom_center(size: PixelSize) -> Self {
        Self::new((size.width / 2) as i16, size.height as i16)
    }
}

/// One labeled count inside a pill badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSegment {
    /// Category the count belongs to.
    pub category: Category,
    /// The count value.
    pub count: u32,
    /// Segment text color.
    pub color: Rgb,
}

/// One stop of a heatmap gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, 0.0..=1.0.
    pub at: f32,
    /// Color at this stop.
    pub color: Rgb,
}

impl GradientStop {
    /// Create a new stop.
    #[inline]
    #[must_use]
    pub const fn new(at: f32, color: Rgb) -> Self {
        Self { at, color }
    }
}

/// What the surface draws for one overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayContent {
    /// Rounded pill with an optional title and up to a few count
    /// segments.
    Pill {
        /// Leading label, usually the region name.
        title: Option<String>,
        /// Count segments, in display order.
        segments: SmallVec<[CountSegment; 2]>,
        /// Fill color.
        fill: Rgb,
        /// Border color.
        border: Rgb,
        /// Title text color.
        text: Rgb,
        /// Font size in pixels.
        font_size: u16,
    },
    /// Compact badge with a single text run.
    Badge {
        /// Badge text.
        text: String,
        /// Fill color.
        fill: Rgb,
        /// Border color.
        border: Rgb,
        /// Text color.
        text_color: Rgb,
        /// Font size in pixels.
        font_size: u16,
    },
    /// Small circular facility dot.
    Dot {
        /// Fill color, keyed to the facility category.
        color: Rgb,
        /// Diameter in pixels.
        diameter: u16,
        /// Ring color drawn around a selected dot.
        ring: Option<Rgb>,
    },
    /// Aggregate heat overlay across many coordinates.
    Heatmap {
        /// All contributing points, in source order (duplicates kept).
        points: Vec<LatLng>,
        /// Influence radius in pixels.
        radius: u16,
        /// Overall opacity, 0.0..=1.0.
        opacity: f32,
        /// Gradient stops, ascending.
        gradient: Vec<GradientStop>,
    },
}

/// A fully specified overlay, ready for the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayDescriptor {
    /// Geographic position the anchor pixel sits on.
    pub position: LatLng,
    /// What to draw.
    pub content: OverlayContent,
    /// Pixel footprint.
    pub size: PixelSize,
    /// Anchor offset inside the footprint.
    pub anchor: PixelOffset,
    /// Whether the surface should report clicks on this overlay.
    pub interactive: bool,
}
