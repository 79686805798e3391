#![forbid(unsafe_code)]

//! Facility categories, per-category count tables, and filter flags.
//!
//! Categories mirror the facility kinds the upstream dataset carries.
//! Counts are stored densely (one `u32` slot per category) so summary
//! records stay `Copy`-cheap to snapshot and compare during
//! reconciliation.

use bitflags::bitflags;

/// A medical facility category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Category {
    /// General hospital.
    Hospital = 0,
    /// Pharmacy.
    Pharmacy,
    /// Local clinic.
    Clinic,
    /// Dental clinic.
    DentalClinic,
    /// Dental hospital.
    DentalHospital,
    /// Oriental-medicine hospital.
    OrientalHospital,
    /// Nursing hospital.
    NursingHospital,
    /// Other medical facility.
    Facility,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 8;

    /// All categories in slot order.
    pub const ALL: [Category; Self::COUNT] = [
        Category::Hospital,
        Category::Pharmacy,
        Category::Clinic,
        Category::DentalClinic,
        Category::DentalHospital,
        Category::OrientalHospital,
        Category::NursingHospital,
        Category::Facility,
    ];

    /// Dense slot index for this category.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable camelCase key, as used in upstream payload field names
    /// (`hospitalCount`, `pharmacyCount`, …).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Pharmacy => "pharmacy",
            Self::Clinic => "clinic",
            Self::DentalClinic => "dentalClinic",
            Self::DentalHospital => "dentalHospital",
            Self::OrientalHospital => "orientalHospital",
            Self::NursingHospital => "nursingHospital",
            Self::Facility => "facility",
        }
    }

    /// Parse a category from its stable key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }

    /// The filter flag corresponding to this category.
    #[inline]
    #[must_use]
    pub const fn flag(self) -> CategoryFilter {
        CategoryFilter::from_bits_truncate(1 << self as u16)
    }
}

/// Dense per-category counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryCounts([u32; Category::COUNT]);

impl CategoryCounts {
    /// An all-zero count table.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self([0; Category::COUNT])
    }

    /// Build a count table from `(category, count)` pairs.
    ///
    /// Repeated categories accumulate.
    #[must_use]
    pub fn of(pairs: &[(Category, u32)]) -> Self {
        let mut counts = Self::new();
        for &(category, n) in pairs {
            counts.add(category, n);
        }
        counts
    }

    /// Count for one category.
    #[inline]
    #[must_use]
    pub const fn get(&self, category: Category) -> u32 {
        self.0[category.index()]
    }

    /// Set the count for one category.
    #[inline]
    pub const fn set(&mut self, category: Category, n: u32) {
        self.0[category.index()] = n;
    }

    /// Add to the count for one category, saturating.
    #[inline]
    pub const fn add(&mut self, category: Category, n: u32) {
        let slot = category.index();
        self.0[slot] = self.0[slot].saturating_add(n);
    }

    /// Sum across all categories.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&n| n as u64).sum()
    }

    /// Sum across the categories a filter admits.
    #[must_use]
    pub fn filtered_total(&self, filter: CategoryFilter) -> u64 {
        Category::ALL
            .iter()
            .filter(|c| filter.allows(**c))
            .map(|c| self.get(*c) as u64)
            .sum()
    }

    /// Check whether every slot is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Merge another table into this one, saturating per slot.
    pub fn merge(&mut self, other: &Self) {
        for category in Category::ALL {
            self.add(category, other.get(category));
        }
    }
}

bitflags! {
    /// Which categories a layer currently shows.
    ///
    /// Driven by the map toolbar's filter dropdown; one bit per
    /// [`Category`] slot. A record whose category is filtered out is
    /// treated by the reconciler exactly like a removed record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategoryFilter: u16 {
        const HOSPITAL = 1 << 0;
        const PHARMACY = 1 << 1;
        const CLINIC = 1 << 2;
        const DENTAL_CLINIC = 1 << 3;
        const DENTAL_HOSPITAL = 1 << 4;
        const ORIENTAL_HOSPITAL = 1 << 5;
        const NURSING_HOSPITAL = 1 << 6;
        const FACILITY = 1 << 7;
    }
}

impl CategoryFilter {
    /// Check whether the filter admits a category.
    #[inline]
    #[must_use]
    pub const fn allows(self, category: Category) -> bool {
        self.contains(category.flag())
    }
}

impl Default for CategoryFilter {
    /// Everything visible.
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryCounts, CategoryFilter};

    #[test]
    fn category_keys_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key("horoscope"), None);
    }

    #[test]
    fn counts_get_set_add() {
        let mut counts = CategoryCounts::new();
        counts.set(Category::Hospital, 5);
        counts.add(Category::Hospital, 2);
        counts.add(Category::Pharmacy, 3);
        assert_eq!(counts.get(Category::Hospital), 7);
        assert_eq!(counts.get(Category::Pharmacy), 3);
        assert_eq!(counts.get(Category::Clinic), 0);
        assert_eq!(counts.total(), 10);
    }

    #[test]
    fn counts_add_saturates() {
        let mut counts = CategoryCounts::new();
        counts.set(Category::Facility, u32::MAX);
        counts.add(Category::Facility, 1);
        assert_eq!(counts.get(Category::Facility), u32::MAX);
    }

    #[test]
    fn counts_of_accumulates_repeats() {
        let counts = CategoryCounts::of(&[
            (Category::Hospital, 2),
            (Category::Hospital, 3),
            (Category::Pharmacy, 1),
        ]);
        assert_eq!(counts.get(Category::Hospital), 5);
        assert_eq!(counts.get(Category::Pharmacy), 1);
    }

    #[test]
    fn filtered_total_respects_the_filter() {
        let counts = CategoryCounts::of(&[
            (Category::Hospital, 4),
            (Category::Pharmacy, 6),
            (Category::Clinic, 1),
        ]);
        assert_eq!(counts.filtered_total(CategoryFilter::all()), 11);
        assert_eq!(counts.filtered_total(CategoryFilter::HOSPITAL), 4);
        assert_eq!(
            counts.filtered_total(CategoryFilter::HOSPITAL | CategoryFilter::PHARMACY),
            10
        );
        assert_eq!(counts.filtered_total(CategoryFilter::empty()), 0);
    }

    #[test]
    fn default_filter_allows_everything() {
        let filter = CategoryFilter::default();
        for category in Category::ALL {
            assert!(filter.allows(category));
        }
    }

    #[test]
    fn flags_match_slot_order() {
        assert_eq!(Category::Hospital.flag(), CategoryFilter::HOSPITAL);
        assert_eq!(Category::Facility.flag(), CategoryFilter::FACILITY);
        assert!(!CategoryFilter::PHARMACY.allows(Category::Hospital));
    }

    #[test]
    fn merge_is_slotwise() {
        let mut a = CategoryCounts::of(&[(Category::Hospital, 1), (Category::Pharmacy, 2)]);
        let b = CategoryCounts::of(&[(Category::Pharmacy, 5), (Category::Clinic, 7)]);
        a.merge(&b);
        assert_eq!(a.get(Category::Hospital), 1);
        assert_eq!(a.get(Category::Pharmacy), 7);
        assert_eq!(a.get(Category::Clinic), 7);
    }
}
