#![forbid(unsafe_code)]

//! Point dot renderer.
//!
//! Individual facilities render as small colored dots keyed to their
//! category. A selected facility renders the larger selected variant
//! with a white ring and, where the dataset established one, a deeper
//! selected color. Point overlays are interactive: the surface reports
//! clicks and the coordinator bubbles the record id to the host.

use geomark_core::{Category, LatLng, SummaryRecord};

use crate::descriptor::{OverlayContent, OverlayDescriptor, PixelOffset, PixelSize};
use crate::palette::{WHITE, category_color, selected_color};
use crate::renderer::Renderer;

/// Small colored per-facility dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointDot;

impl PointDot {
    /// A dot renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Base and selected diameters for a category.
    ///
    /// Pairs follow the dataset's marker sizes; categories without an
    /// established pair use the common 20/24.
    #[must_use]
    pub const fn diameters(category: Category) -> (u16, u16) {
        match category {
            Category::Hospital => (18, 24),
            Category::DentalClinic | Category::DentalHospital => (16, 24),
            Category::OrientalHospital => (24, 32),
            _ => (20, 24),
        }
    }
}

impl Renderer for PointDot {
    fn render(&self, record: &SummaryRecord, position: LatLng) -> OverlayDescriptor {
        #[cfg(feature = "tracing")]
        tracing::trace!(id = %record.id, selected = record.selected, "render point dot");

        let category = record.category.unwrap_or(Category::Facility);
        let (base, selected) = Self::diameters(category);
        let (diameter, color, ring) = if record.selected {
            (selected, selected_color(category), Some(WHITE))
        } else {
            (base, category_color(category), None)
        };
        let size = PixelSize::square(diameter);

        OverlayDescriptor {
            position,
            content: OverlayContent::Dot {
                color,
                diameter,
                ring,
            },
            size,
            anchor: PixelOffset::centered(size),
            interactive: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use geomark_core::{Category, LatLng, RawItem};

    use super::PointDot;
    use crate::descriptor::{OverlayContent, PixelSize};
    use crate::palette::{WHITE, category_color, selected_color};
    use crate::renderer::Renderer;

    fn pharmacy(selected: bool) -> geomark_core::SummaryRecord {
        RawItem::new("ph-1")
            .with_coordinate(37.0, 127.0)
            .with_category(Category::Pharmacy)
            .with_selected(selected)
            .normalize()
    }

    #[test]
    fn dot_is_colored_by_category_and_interactive() {
        let descriptor = PointDot::new().render(&pharmacy(false), LatLng::new(37.0, 127.0));

        assert!(descriptor.interactive);
        assert_eq!(descriptor.size, PixelSize::square(20));
        let OverlayContent::Dot { color, ring, .. } = descriptor.content else {
            panic!("expected a dot");
        };
        assert_eq!(color, category_color(Category::Pharmacy));
        assert_eq!(ring, None);
    }

    #[test]
    fn selection_enlarges_and_rings_the_dot() {
        let descriptor = PointDot::new().render(&pharmacy(true), LatLng::new(37.0, 127.0));

        assert_eq!(descriptor.size, PixelSize::square(24));
        let OverlayContent::Dot { color, ring, diameter } = descriptor.content else {
            panic!("expected a dot");
        };
        assert_eq!(diameter, 24);
        assert_eq!(ring, Some(WHITE));
        assert_eq!(color, selected_color(Category::Pharmacy));
    }

    #[test]
    fn selected_color_deepens_where_established() {
        let record = RawItem::new("d-1")
            .with_coordinate(37.0, 127.0)
            .with_category(Category::DentalClinic)
            .with_selected(true)
            .normalize();
        let descriptor = PointDot::new().render(&record, LatLng::new(37.0, 127.0));

        let OverlayContent::Dot { color, .. } = descriptor.content else {
            panic!("expected a dot");
        };
        assert_eq!(color, selected_color(Category::DentalClinic));
        assert_ne!(color, category_color(Category::DentalClinic));
    }

    #[test]
    fn uncategorized_record_falls_back_to_facility() {
        let record = RawItem::new("f-1").with_coordinate(37.0, 127.0).normalize();
        let descriptor = PointDot::new().render(&record, LatLng::new(37.0, 127.0));

        let OverlayContent::Dot { color, .. } = descriptor.content else {
            panic!("expected a dot");
        };
        assert_eq!(color, category_color(Category::Facility));
    }

    #[test]
    fn category_diameter_table() {
        assert_eq!(PointDot::diameters(Category::Hospital), (18, 24));
        assert_eq!(PointDot::diameters(Category::OrientalHospital), (24, 32));
        assert_eq!(PointDot::diameters(Category::Pharmacy), (20, 24));
    }
}
