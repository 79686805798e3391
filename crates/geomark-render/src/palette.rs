#![forbid(unsafe_code)]

//! Marker colors.
//!
//! The palette carries the dataset's established colors: one base and
//! one selected color per facility category, plus the shared badge
//! colors. Values are plain RGB; the surface decides how to express
//! them (CSS, native, …).

use std::fmt;

use geomark_core::Category;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Create a new color.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack from a `0xRRGGBB` literal.
    #[inline]
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

impl fmt::Display for Rgb {
    /// CSS hex form, `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// White marker fill.
pub const WHITE: Rgb = Rgb::from_hex(0xFFFFFF);
/// Pill border blue.
pub const BORDER_BLUE: Rgb = Rgb::from_hex(0x3B82F6);
/// Pill title slate.
pub const TEXT_SLATE: Rgb = Rgb::from_hex(0x1E293B);
/// Hospital count accent.
pub const COUNT_BLUE: Rgb = Rgb::from_hex(0x2563EB);
/// Pharmacy count accent.
pub const COUNT_GREEN: Rgb = Rgb::from_hex(0x10B981);
/// Scaled cluster circle red.
pub const CLUSTER_RED: Rgb = Rgb::from_hex(0xFF5252);

/// Base dot color for a category.
#[must_use]
pub const fn category_color(category: Category) -> Rgb {
    match category {
        Category::Hospital => Rgb::from_hex(0xFF0000),
        Category::Pharmacy => Rgb::from_hex(0x00C853),
        Category::Clinic => Rgb::from_hex(0xEF5350),
        Category::DentalClinic => Rgb::from_hex(0x64B5F6),
        Category::DentalHospital => Rgb::from_hex(0x42A5F5),
        Category::OrientalHospital => Rgb::from_hex(0x66BB6A),
        Category::NursingHospital => Rgb::from_hex(0xBA68C8),
        Category::Facility => Rgb::from_hex(0x90A4AE),
    }
}

/// Selected-state dot color for a category.
///
/// Categories without an established selected color keep their base.
#[must_use]
pub const fn selected_color(category: Category) -> Rgb {
    match category {
        Category::DentalClinic => Rgb::from_hex(0x2196F3),
        Category::DentalHospital => Rgb::from_hex(0x1976D2),
        Category::NursingHospital => Rgb::from_hex(0x9C27B0),
        _ => category_color(category),
    }
}
