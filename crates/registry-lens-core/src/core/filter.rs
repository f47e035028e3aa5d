// crates/registry-lens-core/src/core/filter.rs
// ============================================================================
// Module: Registry Lens Filter Model
// Description: Immutable snapshot of user-chosen search constraints.
// Purpose: Carry one query's predicate inputs without sentinel collisions.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`FilterSet`] captures every constraint the user submitted for one
//! query. Absent constraints are `None` or an empty list, never a sentinel
//! string that could collide with legitimate data values. The snapshot is
//! immutable once built and is consumed identically by the row query and
//! the count query, so both always evaluate the same predicate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Filter Set
// ============================================================================

/// Immutable snapshot of all search constraints for one query.
///
/// # Invariants
/// - `name_contains` is trimmed and never empty when present.
/// - Absence of a constraint is represented structurally (`None` / empty
///   list), never by a reserved value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterSet {
    /// Case-insensitive substring constraint on the display name.
    name_contains: Option<String>,
    /// Selected size-class values; empty means unconstrained.
    size_classes: Vec<String>,
    /// Selected legal nature; `None` means unconstrained.
    legal_nature: Option<String>,
    /// Selected responsible-party qualification; `None` means unconstrained.
    qualification: Option<String>,
    /// Inclusive minimum capital amount.
    capital_min: Option<f64>,
    /// Inclusive maximum capital amount.
    capital_max: Option<f64>,
}

impl FilterSet {
    /// Returns a filter set with no constraints.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Returns a builder for assembling a snapshot.
    #[must_use]
    pub fn builder() -> FilterSetBuilder {
        FilterSetBuilder::default()
    }

    /// Returns the substring constraint, if any.
    #[must_use]
    pub fn name_contains(&self) -> Option<&str> {
        self.name_contains.as_deref()
    }

    /// Returns the selected size classes; empty means unconstrained.
    #[must_use]
    pub fn size_classes(&self) -> &[String] {
        &self.size_classes
    }

    /// Returns the selected legal nature, if any.
    #[must_use]
    pub fn legal_nature(&self) -> Option<&str> {
        self.legal_nature.as_deref()
    }

    /// Returns the selected qualification, if any.
    #[must_use]
    pub fn qualification(&self) -> Option<&str> {
        self.qualification.as_deref()
    }

    /// Returns the inclusive minimum capital bound, if any.
    #[must_use]
    pub const fn capital_min(&self) -> Option<f64> {
        self.capital_min
    }

    /// Returns the inclusive maximum capital bound, if any.
    #[must_use]
    pub const fn capital_max(&self) -> Option<f64> {
        self.capital_max
    }

    /// Returns whether the snapshot carries no constraint at all.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.name_contains.is_none()
            && self.size_classes.is_empty()
            && self.legal_nature.is_none()
            && self.qualification.is_none()
            && self.capital_min.is_none()
            && self.capital_max.is_none()
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`FilterSet`] snapshots.
///
/// # Invariants
/// - `build` normalizes whitespace-only substrings to no constraint.
#[derive(Debug, Clone, Default)]
pub struct FilterSetBuilder {
    /// Pending substring constraint.
    name_contains: Option<String>,
    /// Pending size-class selection.
    size_classes: Vec<String>,
    /// Pending legal-nature selection.
    legal_nature: Option<String>,
    /// Pending qualification selection.
    qualification: Option<String>,
    /// Pending minimum capital bound.
    capital_min: Option<f64>,
    /// Pending maximum capital bound.
    capital_max: Option<f64>,
}

impl FilterSetBuilder {
    /// Sets the case-insensitive substring constraint.
    #[must_use]
    pub fn name_contains(mut self, text: impl Into<String>) -> Self {
        self.name_contains = Some(text.into());
        self
    }

    /// Adds one selected size class.
    #[must_use]
    pub fn size_class(mut self, value: impl Into<String>) -> Self {
        self.size_classes.push(value.into());
        self
    }

    /// Replaces the size-class selection.
    #[must_use]
    pub fn size_classes(mut self, values: Vec<String>) -> Self {
        self.size_classes = values;
        self
    }

    /// Sets the legal-nature selection.
    #[must_use]
    pub fn legal_nature(mut self, value: impl Into<String>) -> Self {
        self.legal_nature = Some(value.into());
        self
    }

    /// Sets the qualification selection.
    #[must_use]
    pub fn qualification(mut self, value: impl Into<String>) -> Self {
        self.qualification = Some(value.into());
        self
    }

    /// Sets the inclusive minimum capital bound.
    #[must_use]
    pub const fn capital_min(mut self, value: f64) -> Self {
        self.capital_min = Some(value);
        self
    }

    /// Sets the inclusive maximum capital bound.
    #[must_use]
    pub const fn capital_max(mut self, value: f64) -> Self {
        self.capital_max = Some(value);
        self
    }

    /// Builds the immutable snapshot, normalizing blank substrings away.
    #[must_use]
    pub fn build(self) -> FilterSet {
        let name_contains = self
            .name_contains
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        FilterSet {
            name_contains,
            size_classes: self.size_classes,
            legal_nature: self.legal_nature,
            qualification: self.qualification,
            capital_min: self.capital_min,
            capital_max: self.capital_max,
        }
    }
}
