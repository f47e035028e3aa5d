// crates/registry-lens-config/src/config.rs
// ============================================================================
// Module: Registry Lens Config
// Description: Configuration loading and validation for Registry Lens.
// Purpose: Parse registry-lens.toml with strict limits and fail-closed
//          validation, and hand the runtime a ready session config.
// Dependencies: registry-lens-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path
//! limits. Every section has complete defaults, so an absent file section
//! yields the stock explorer behavior. Validation rejects zero ceilings and
//! out-of-range durations before any query infrastructure is built.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use registry_lens_core::core::fields::validate_identifier;
use registry_lens_core::core::pagination::DEFAULT_MAX_OFFSET;
use registry_lens_core::core::pagination::DEFAULT_MAX_PAGES;
use registry_lens_core::core::pagination::PagerLimits;
use registry_lens_core::core::query::TableName;
use registry_lens_core::runtime::estimator::DEFAULT_FALLBACK_TOTAL;
use registry_lens_core::runtime::estimator::EstimatorConfig;
use registry_lens_core::runtime::guard::DEFAULT_MAX_NARROW_SIZE_CLASSES;
use registry_lens_core::runtime::guard::HeavyQueryPolicy;
use registry_lens_core::runtime::metadata::DEFAULT_SIZE_CLASS_CAP;
use registry_lens_core::runtime::metadata::DEFAULT_VALUE_CAP;
use registry_lens_core::runtime::metadata::MetadataCaps;
use registry_lens_core::runtime::session::SessionConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the config file path.
pub(crate) const CONFIG_ENV_VAR: &str = "REGISTRY_LENS_CONFIG";
/// Default config file name when no path is supplied.
pub(crate) const DEFAULT_CONFIG_NAME: &str = "registry-lens.toml";
/// Maximum accepted config file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum accepted total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum accepted length for a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Default table name for the company registry.
pub(crate) const DEFAULT_TABLE_NAME: &str = "empresas";
/// Default cooldown between accepted submissions, in seconds.
pub(crate) const DEFAULT_COOLDOWN_SECONDS: u64 = 2;
/// Maximum accepted cooldown, in seconds.
pub(crate) const MAX_COOLDOWN_SECONDS: u64 = 3_600;
/// Default cache lifetime for estimates, metadata, and schema, in seconds.
pub(crate) const DEFAULT_CACHE_TTL_SECONDS: u64 = 86_400;
/// Maximum accepted cache lifetime, in seconds.
pub(crate) const MAX_CACHE_TTL_SECONDS: u64 = 30 * 86_400;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Registry Lens explorer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerConfig {
    /// Registry table under exploration.
    #[serde(default = "default_table")]
    pub table: String,
    /// Navigation and submission ceilings.
    #[serde(default)]
    pub limits: LimitsSection,
    /// Cardinality estimator settings.
    #[serde(default)]
    pub estimator: EstimatorSection,
    /// Metadata scan caps and cache lifetime.
    #[serde(default)]
    pub metadata: MetadataSection,
    /// Heavy-query heuristic thresholds.
    #[serde(default)]
    pub heavy_query: HeavyQuerySection,
    /// Schema resolution cache lifetime.
    #[serde(default)]
    pub schema: SchemaSection,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            limits: LimitsSection::default(),
            estimator: EstimatorSection::default(),
            metadata: MetadataSection::default(),
            heavy_query: HeavyQuerySection::default(),
            schema: SchemaSection::default(),
        }
    }
}

impl ExplorerConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit `path`, then the `REGISTRY_LENS_CONFIG`
    /// environment variable, then `registry-lens.toml` in the working
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_identifier(&self.table)
            .map_err(|_| ConfigError::Invalid("table must be a plain sql identifier".to_string()))?;
        self.limits.validate()?;
        self.estimator.validate()?;
        self.metadata.validate()?;
        self.heavy_query.validate()?;
        self.schema.validate()?;
        Ok(())
    }

    /// Returns the validated table name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configured name is not a plain SQL
    /// identifier.
    pub fn table_name(&self) -> Result<TableName, ConfigError> {
        TableName::new(self.table.clone())
            .map_err(|_| ConfigError::Invalid("table must be a plain sql identifier".to_string()))
    }

    /// Converts the validated configuration into a runtime session config.
    #[must_use]
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            limits: PagerLimits {
                max_offset: self.limits.max_offset,
                max_pages: self.limits.max_pages,
            },
            cooldown_ms: self.limits.cooldown_seconds.saturating_mul(1_000),
            heavy_query: HeavyQueryPolicy {
                max_narrow_size_classes: self.heavy_query.max_narrow_size_classes,
            },
            metadata_caps: MetadataCaps {
                size_class_cap: self.metadata.size_class_cap,
                value_cap: self.metadata.value_cap,
            },
            metadata_ttl_ms: self.metadata.cache_ttl_seconds.saturating_mul(1_000),
            estimator: EstimatorConfig {
                fallback_total: self.estimator.fallback_total,
                cache_ttl_ms: self.estimator.cache_ttl_seconds.saturating_mul(1_000),
            },
        }
    }

    /// Returns the schema cache lifetime in milliseconds.
    #[must_use]
    pub const fn schema_cache_ttl_ms(&self) -> u64 {
        self.schema.cache_ttl_seconds.saturating_mul(1_000)
    }
}

/// Navigation and submission ceilings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LimitsSection {
    /// Maximum navigable row offset.
    #[serde(default = "default_max_offset")]
    pub max_offset: u64,
    /// Maximum navigable page count.
    #[serde(default = "default_max_pages")]
    pub max_pages: u64,
    /// Minimum delay between accepted filter submissions, in seconds.
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            max_offset: default_max_offset(),
            max_pages: default_max_pages(),
            cooldown_seconds: default_cooldown_seconds(),
        }
    }
}

impl LimitsSection {
    /// Validates ceiling values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_offset == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_offset must be greater than zero".to_string(),
            ));
        }
        if self.max_pages == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_pages must be greater than zero".to_string(),
            ));
        }
        if self.cooldown_seconds > MAX_COOLDOWN_SECONDS {
            return Err(ConfigError::Invalid(
                "limits.cooldown_seconds exceeds the allowed maximum".to_string(),
            ));
        }
        Ok(())
    }
}

/// Cardinality estimator settings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EstimatorSection {
    /// Static total used when catalog statistics are unavailable.
    #[serde(default = "default_fallback_total")]
    pub fallback_total: u64,
    /// Cache lifetime for the approximate total, in seconds.
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

impl Default for EstimatorSection {
    fn default() -> Self {
        Self {
            fallback_total: default_fallback_total(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

impl EstimatorSection {
    /// Validates estimator values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_total == 0 {
            return Err(ConfigError::Invalid(
                "estimator.fallback_total must be greater than zero".to_string(),
            ));
        }
        validate_ttl("estimator.cache_ttl_seconds", self.cache_ttl_seconds)
    }
}

/// Metadata scan caps and cache lifetime.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MetadataSection {
    /// Cap for distinct size-class values.
    #[serde(default = "default_size_class_cap")]
    pub size_class_cap: u64,
    /// Cap for distinct legal-nature and qualification values.
    #[serde(default = "default_value_cap")]
    pub value_cap: u64,
    /// Cache lifetime for loaded options, in seconds.
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

impl Default for MetadataSection {
    fn default() -> Self {
        Self {
            size_class_cap: default_size_class_cap(),
            value_cap: default_value_cap(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

impl MetadataSection {
    /// Validates metadata caps.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.size_class_cap == 0 {
            return Err(ConfigError::Invalid(
                "metadata.size_class_cap must be greater than zero".to_string(),
            ));
        }
        if self.value_cap == 0 {
            return Err(ConfigError::Invalid(
                "metadata.value_cap must be greater than zero".to_string(),
            ));
        }
        validate_ttl("metadata.cache_ttl_seconds", self.cache_ttl_seconds)
    }
}

/// Heavy-query heuristic thresholds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HeavyQuerySection {
    /// Largest size-class selection still considered narrowing.
    #[serde(default = "default_max_narrow_size_classes")]
    pub max_narrow_size_classes: usize,
}

impl Default for HeavyQuerySection {
    fn default() -> Self {
        Self {
            max_narrow_size_classes: default_max_narrow_size_classes(),
        }
    }
}

impl HeavyQuerySection {
    /// Validates heuristic thresholds.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_narrow_size_classes == 0 {
            return Err(ConfigError::Invalid(
                "heavy_query.max_narrow_size_classes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Schema resolution cache lifetime.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SchemaSection {
    /// Cache lifetime for the resolved field mapping, in seconds.
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

impl Default for SchemaSection {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

impl SchemaSection {
    /// Validates the schema cache lifetime.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_ttl("schema.cache_ttl_seconds", self.cache_ttl_seconds)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a cache lifetime against the allowed ceiling.
fn validate_ttl(field: &str, seconds: u64) -> Result<(), ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::Invalid(format!("{field} must be greater than zero")));
    }
    if seconds > MAX_CACHE_TTL_SECONDS {
        return Err(ConfigError::Invalid(format!("{field} exceeds the allowed maximum")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default registry table name.
fn default_table() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

/// Default maximum navigable row offset.
pub(crate) const fn default_max_offset() -> u64 {
    DEFAULT_MAX_OFFSET
}

/// Default maximum navigable page count.
pub(crate) const fn default_max_pages() -> u64 {
    DEFAULT_MAX_PAGES
}

/// Default submission cooldown in seconds.
pub(crate) const fn default_cooldown_seconds() -> u64 {
    DEFAULT_COOLDOWN_SECONDS
}

/// Default fallback total when catalog statistics are unavailable.
pub(crate) const fn default_fallback_total() -> u64 {
    DEFAULT_FALLBACK_TOTAL
}

/// Default cache lifetime in seconds.
pub(crate) const fn default_cache_ttl_seconds() -> u64 {
    DEFAULT_CACHE_TTL_SECONDS
}

/// Default cap for distinct size-class values.
pub(crate) const fn default_size_class_cap() -> u64 {
    DEFAULT_SIZE_CLASS_CAP
}

/// Default cap for distinct legal-nature and qualification values.
pub(crate) const fn default_value_cap() -> u64 {
    DEFAULT_VALUE_CAP
}

/// Default largest size-class selection still considered narrowing.
pub(crate) const fn default_max_narrow_size_classes() -> usize {
    DEFAULT_MAX_NARROW_SIZE_CLASSES
}
