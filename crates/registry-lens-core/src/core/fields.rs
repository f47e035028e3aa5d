// crates/registry-lens-core/src/core/fields.rs
// ============================================================================
// Module: Registry Lens Schema Resolver
// Description: Mapping from logical registry fields to physical column names.
// Purpose: Resolve an unstable physical schema into a trusted field mapping.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Registry tables in the wild carry the same data under varying column
//! names. This module maps six fixed logical roles onto whatever physical
//! columns introspection discovers, scanning a static candidate list per
//! role in priority order. Resolution is all-or-nothing: a partially
//! resolved schema never yields a mapping, so filtered queries can never run
//! against a guessed layout. Resolved names are validated as plain SQL
//! identifiers before they may be interpolated into query text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted length for a physical column or table name.
pub const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Candidate physical names for the identifier role, in priority order.
const IDENTIFIER_CANDIDATES: &[&str] = &["cnpj_basico", "cnpj", "cnpj_base", "numero_cnpj"];
/// Candidate physical names for the display-name role, in priority order.
const DISPLAY_NAME_CANDIDATES: &[&str] = &["razao_social", "nome_empresarial", "nome", "razao"];
/// Candidate physical names for the legal-nature role, in priority order.
const LEGAL_NATURE_CANDIDATES: &[&str] = &["natureza_juridica", "natureza", "nat_juridica"];
/// Candidate physical names for the qualification role, in priority order.
const QUALIFICATION_CANDIDATES: &[&str] =
    &["qualificacao_responsavel", "qualificacao", "qual_responsavel"];
/// Candidate physical names for the capital-amount role, in priority order.
const CAPITAL_AMOUNT_CANDIDATES: &[&str] = &["capital_social", "capital", "valor_capital"];
/// Candidate physical names for the size-class role, in priority order.
const SIZE_CLASS_CANDIDATES: &[&str] = &["porte", "porte_empresa", "cod_porte"];

// ============================================================================
// SECTION: Logical Fields
// ============================================================================

/// One of the six fixed semantic roles every registry table must provide.
///
/// # Invariants
/// - The set of roles is closed; a valid [`FieldMapping`] resolves all six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    /// Company registry identifier.
    Identifier,
    /// Company display name used for search and ordering.
    DisplayName,
    /// Legal nature classification.
    LegalNature,
    /// Responsible-party qualification classification.
    Qualification,
    /// Declared share capital amount.
    CapitalAmount,
    /// Company size class.
    SizeClass,
}

impl LogicalField {
    /// All six logical fields in canonical (selection) order.
    pub const ALL: [Self; 6] = [
        Self::Identifier,
        Self::DisplayName,
        Self::LegalNature,
        Self::Qualification,
        Self::CapitalAmount,
        Self::SizeClass,
    ];

    /// Returns the stable snake_case label for the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::DisplayName => "display_name",
            Self::LegalNature => "legal_nature",
            Self::Qualification => "qualification",
            Self::CapitalAmount => "capital_amount",
            Self::SizeClass => "size_class",
        }
    }

    /// Returns the ordered candidate physical names for this role.
    ///
    /// Candidates are lowercase; matching against discovered columns is
    /// case-insensitive.
    #[must_use]
    pub const fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Identifier => IDENTIFIER_CANDIDATES,
            Self::DisplayName => DISPLAY_NAME_CANDIDATES,
            Self::LegalNature => LEGAL_NATURE_CANDIDATES,
            Self::Qualification => QUALIFICATION_CANDIDATES,
            Self::CapitalAmount => CAPITAL_AMOUNT_CANDIDATES,
            Self::SizeClass => SIZE_CLASS_CANDIDATES,
        }
    }

    /// Returns the positional index of the field in [`Self::ALL`].
    const fn index(self) -> usize {
        match self {
            Self::Identifier => 0,
            Self::DisplayName => 1,
            Self::LegalNature => 2,
            Self::Qualification => 3,
            Self::CapitalAmount => 4,
            Self::SizeClass => 5,
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Introspection Input
// ============================================================================

/// A physical column discovered by schema introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Physical column name in its original case.
    pub name: String,
    /// Backend-reported data type label.
    pub data_type: String,
}

impl ColumnInfo {
    /// Creates a column descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Schema resolution errors.
///
/// # Invariants
/// - `Unresolved` always carries the full discovered column list so hosts
///   can render a diagnostic view instead of a query surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Fewer than six logical fields resolved against the discovered schema.
    #[error("schema unresolved: missing {missing:?}")]
    Unresolved {
        /// Logical fields with no matching candidate column.
        missing: Vec<LogicalField>,
        /// All columns reported by introspection, for diagnostics.
        discovered: Vec<ColumnInfo>,
    },
    /// A resolved name is not a plain SQL identifier and must not be
    /// interpolated into query text.
    #[error("invalid sql identifier: {0:?}")]
    InvalidIdentifier(String),
}

// ============================================================================
// SECTION: Field Mapping
// ============================================================================

/// Trusted mapping from every logical field to one physical column name.
///
/// # Invariants
/// - All six roles are resolved; construction fails otherwise.
/// - Every stored name passed identifier validation and is safe to
///   interpolate into query text as a column reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Physical column names indexed by [`LogicalField::ALL`] order.
    columns: [String; 6],
}

impl FieldMapping {
    /// Creates a mapping from six physical names in [`LogicalField::ALL`]
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidIdentifier`] when any name is not a
    /// plain SQL identifier.
    pub fn new(columns: [String; 6]) -> Result<Self, SchemaError> {
        for name in &columns {
            validate_identifier(name)?;
        }
        Ok(Self { columns })
    }

    /// Returns the physical column name for a logical field.
    #[must_use]
    pub fn column(&self, field: LogicalField) -> &str {
        &self.columns[field.index()]
    }
}

/// Validates that a name is usable as an interpolated SQL identifier.
///
/// Accepts ASCII alphanumerics and underscores, not starting with a digit,
/// within [`MAX_IDENTIFIER_LENGTH`].
///
/// # Errors
///
/// Returns [`SchemaError::InvalidIdentifier`] on any violation.
pub fn validate_identifier(name: &str) -> Result<(), SchemaError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_IDENTIFIER_LENGTH
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidIdentifier(name.to_string()))
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves discovered columns into a trusted [`FieldMapping`].
///
/// For each logical field the candidate list is scanned in priority order
/// and the first case-insensitive match wins; the column's original-case
/// name is recorded. Pure function of its input; callers own caching.
///
/// # Errors
///
/// Returns [`SchemaError::Unresolved`] when any role has no match, carrying
/// the discovered columns, or [`SchemaError::InvalidIdentifier`] when a
/// matched name cannot be safely interpolated.
pub fn resolve_field_mapping(columns: &[ColumnInfo]) -> Result<FieldMapping, SchemaError> {
    let mut resolved: [Option<String>; 6] = [const { None }; 6];
    let mut missing = Vec::new();
    for field in LogicalField::ALL {
        let found = field.candidates().iter().find_map(|candidate| {
            columns.iter().find(|column| column.name.eq_ignore_ascii_case(candidate))
        });
        match found {
            Some(column) => resolved[field.index()] = Some(column.name.clone()),
            None => missing.push(field),
        }
    }
    if !missing.is_empty() {
        return Err(SchemaError::Unresolved {
            missing,
            discovered: columns.to_vec(),
        });
    }
    let names = resolved.map(|slot| slot.unwrap_or_default());
    FieldMapping::new(names)
}
