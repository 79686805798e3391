#![forbid(unsafe_code)]

//! The normalized summary-record model.
//!
//! Upstream data arrives in two shapes: region summaries carrying a
//! geometry and per-category counts, and point facilities carrying a
//! direct coordinate and a single category. [`RawItem`] accepts either;
//! [`RawItem::normalize`] turns it into a uniform [`SummaryRecord`]
//! with the coordinate resolved (direct first, then the geometry
//! anchor).
//!
//! Normalization never fails. An item whose coordinate cannot be
//! resolved produces a record with `coordinate = None`, which the
//! reconciler excludes explicitly — bad data stays visible in the data
//! rather than taking the pipeline down.

use std::fmt;

use crate::category::{Category, CategoryCounts, CategoryFilter};
use crate::geo::{Geometry, LatLng, anchor};

/// Stable identity of a logical region or facility.
///
/// Stable across re-renders of the same entity; the reconciler keys all
/// lifecycle decisions on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordId(String);

impl RecordId {
    /// Create an id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// A normalized region summary or point facility.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRecord {
    /// Stable identity.
    pub id: RecordId,
    /// Resolved display coordinate; `None` marks the record invalid.
    pub coordinate: Option<LatLng>,
    /// Display name (region or facility).
    pub label: String,
    /// Per-category counts.
    pub counts: CategoryCounts,
    /// Source geometry, retained for re-derivation by callers.
    pub geometry: Option<Geometry>,
    /// Facility category for point records; `None` for region summaries.
    pub category: Option<Category>,
    /// Selection state; selected point markers render the larger
    /// variant. Part of the display payload for update detection.
    pub selected: bool,
}

impl SummaryRecord {
    /// A record is valid when it has a resolved coordinate.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.coordinate.is_some()
    }

    /// Check whether a filter admits this record.
    ///
    /// Records without a category (region summaries) always pass; the
    /// filter narrows their counts at render time instead.
    #[must_use]
    pub fn passes(&self, filter: CategoryFilter) -> bool {
        match self.category {
            Some(category) => filter.allows(category),
            None => true,
        }
    }
}

/// A raw upstream item before normalization.
///
/// Built with the builder methods, or from JSON under the `json`
/// feature. Everything except the id is optional.
#[derive(Debug, Clone)]
pub struct RawItem {
    id: RecordId,
    name: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    geometry: Option<Geometry>,
    category: Option<Category>,
    counts: CategoryCounts,
    selected: bool,
}

impl RawItem {
    /// Start a raw item with its identity.
    #[must_use]
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            lat: None,
            lng: None,
            geometry: None,
            category: None,
            counts: CategoryCounts::new(),
            selected: false,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a direct coordinate.
    #[must_use]
    pub fn with_coordinate(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// Set the region geometry.
    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Set the facility category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Add a category count.
    #[must_use]
    pub fn with_count(mut self, category: Category, n: u32) -> Self {
        self.counts.add(category, n);
        self
    }

    /// Set the selection state.
    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Normalize into a [`SummaryRecord`].
    ///
    /// Coordinate resolution order: the direct coordinate when both
    /// components are finite, otherwise the geometry anchor, otherwise
    /// `None`. Never panics on malformed input.
    #[must_use]
    pub fn normalize(self) -> SummaryRecord {
        let direct = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => LatLng::finite(lat, lng),
            _ => None,
        };
        let coordinate = direct.or_else(|| self.geometry.as_ref().and_then(anchor));

        SummaryRecord {
            id: self.id,
            coordinate,
            label: self.name.unwrap_or_default(),
            counts: self.counts,
            geometry: self.geometry,
            category: self.category,
            selected: self.selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RawItem, RecordId};
    use crate::category::{Category, CategoryFilter};
    use crate::geo::{Geometry, LatLng};

    fn unit_square() -> Geometry {
        Geometry::Polygon(vec![(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)])
    }

    #[test]
    fn record_id_display_and_conversions() {
        assert_eq!(RecordId::from("sggu-110").as_str(), "sggu-110");
        assert_eq!(RecordId::from(42_u64).to_string(), "42");
        assert_eq!(RecordId::from(-7_i64).to_string(), "-7");
    }

    #[test]
    fn direct_coordinate_wins_over_geometry() {
        let record = RawItem::new("a")
            .with_coordinate(37.5665, 126.978)
            .with_geometry(unit_square())
            .normalize();
        assert_eq!(record.coordinate, Some(LatLng::new(37.5665, 126.978)));
    }

    #[test]
    fn geometry_anchor_fills_in_missing_coordinate() {
        let record = RawItem::new("a").with_geometry(unit_square()).normalize();
        assert_eq!(record.coordinate, Some(LatLng::new(1.0, 1.0)));
    }

    #[test]
    fn non_finite_direct_coordinate_falls_back_to_geometry() {
        let record = RawItem::new("a")
            .with_coordinate(f64::NAN, 126.978)
            .with_geometry(unit_square())
            .normalize();
        assert_eq!(record.coordinate, Some(LatLng::new(1.0, 1.0)));
    }

    #[test]
    fn unresolvable_item_yields_invalid_record() {
        let record = RawItem::new("a").with_name("nowhere").normalize();
        assert_eq!(record.coordinate, None);
        assert!(!record.is_valid());

        let record = RawItem::new("b")
            .with_geometry(Geometry::Polygon(vec![]))
            .normalize();
        assert!(!record.is_valid());
    }

    #[test]
    fn counts_and_category_carry_through() {
        let record = RawItem::new("a")
            .with_name("Jongno-gu")
            .with_count(Category::Hospital, 12)
            .with_count(Category::Pharmacy, 30)
            .normalize();
        assert_eq!(record.label, "Jongno-gu");
        assert_eq!(record.counts.get(Category::Hospital), 12);
        assert_eq!(record.counts.get(Category::Pharmacy), 30);
        assert_eq!(record.category, None);
    }

    #[test]
    fn filter_passes_categorized_and_uncategorized_records() {
        let region = RawItem::new("r").with_geometry(unit_square()).normalize();
        let pharmacy = RawItem::new("p")
            .with_coordinate(37.0, 127.0)
            .with_category(Category::Pharmacy)
            .normalize();

        let filter = CategoryFilter::HOSPITAL;
        assert!(region.passes(filter));
        assert!(!pharmacy.passes(filter));
        assert!(pharmacy.passes(CategoryFilter::PHARMACY));
    }
}
