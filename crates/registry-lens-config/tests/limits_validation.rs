// crates/registry-lens-config/tests/limits_validation.rs
// ============================================================================
// Module: Config Validation Tests
// Description: Fail-closed rejection of invalid ceilings and identifiers.
// ============================================================================
//! ## Overview
//! Validates that zero ceilings, out-of-range durations, and unsafe table
//! names are rejected before any runtime component is built.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;

use registry_lens_config::ConfigError;
use registry_lens_config::ExplorerConfig;
use tempfile::TempDir;

/// Writes `content` to a temp config file and attempts to load it.
fn try_load(content: &str) -> Result<ExplorerConfig, ConfigError> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("registry-lens.toml");
    fs::write(&path, content).unwrap();
    ExplorerConfig::load(Some(&path))
}

/// Asserts that loading fails with an `Invalid` error mentioning `needle`.
fn assert_invalid(content: &str, needle: &str) {
    match try_load(content) {
        Err(ConfigError::Invalid(message)) => {
            assert!(message.contains(needle), "unexpected message: {message}");
        }
        Err(other) => panic!("unexpected error variant: {other}"),
        Ok(_) => panic!("config unexpectedly accepted"),
    }
}

/// Unsafe table names are rejected at load time.
#[test]
fn rejects_unsafe_table_names() {
    assert_invalid("table = \"empresas; drop table\"\n", "table");
    assert_invalid("table = \"\"\n", "table");
    assert_invalid("table = \"1empresas\"\n", "table");
}

/// Zero navigation ceilings are rejected.
#[test]
fn rejects_zero_ceilings() {
    assert_invalid("[limits]\nmax_offset = 0\n", "limits.max_offset");
    assert_invalid("[limits]\nmax_pages = 0\n", "limits.max_pages");
}

/// Excessive cooldowns are rejected; zero disables the gate and is allowed.
#[test]
fn cooldown_bounds() {
    assert_invalid("[limits]\ncooldown_seconds = 3601\n", "limits.cooldown_seconds");
    let config = try_load("[limits]\ncooldown_seconds = 0\n").unwrap();
    assert_eq!(config.to_session_config().cooldown_ms, 0);
}

/// Zero estimator fallback and degenerate TTLs are rejected.
#[test]
fn rejects_invalid_estimator_settings() {
    assert_invalid("[estimator]\nfallback_total = 0\n", "estimator.fallback_total");
    assert_invalid("[estimator]\ncache_ttl_seconds = 0\n", "estimator.cache_ttl_seconds");
    assert_invalid(
        "[estimator]\ncache_ttl_seconds = 99999999\n",
        "estimator.cache_ttl_seconds",
    );
}

/// Zero metadata caps are rejected.
#[test]
fn rejects_zero_metadata_caps() {
    assert_invalid("[metadata]\nsize_class_cap = 0\n", "metadata.size_class_cap");
    assert_invalid("[metadata]\nvalue_cap = 0\n", "metadata.value_cap");
}

/// A zero narrow threshold would flag every size-class query as heavy.
#[test]
fn rejects_zero_narrow_threshold() {
    assert_invalid(
        "[heavy_query]\nmax_narrow_size_classes = 0\n",
        "heavy_query.max_narrow_size_classes",
    );
}

/// Schema cache lifetimes are bounded like the other TTLs.
#[test]
fn rejects_invalid_schema_ttl() {
    assert_invalid("[schema]\ncache_ttl_seconds = 0\n", "schema.cache_ttl_seconds");
}

/// Oversized config files are rejected before parsing.
#[test]
fn rejects_oversized_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("registry-lens.toml");
    let padding = format!("# {}\n", "x".repeat(2 * 1024 * 1024));
    fs::write(&path, padding).unwrap();
    let error = ExplorerConfig::load(Some(&path)).unwrap_err();
    assert!(matches!(error, ConfigError::Invalid(_)));
}
