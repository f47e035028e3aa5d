// crates/registry-lens-core/tests/common/mod.rs
// ============================================================================
// Module: Shared Test Fixtures
// Description: Scripted collaborator implementations for core tests.
// ============================================================================
//! ## Overview
//! Provides scripted executor, introspector, and statistics doubles plus
//! fixture builders shared across the core integration tests.

#![allow(dead_code, reason = "Shared fixtures are not used by every test binary.")]

use std::cell::RefCell;
use std::collections::VecDeque;

use registry_lens_core::core::fields::ColumnInfo;
use registry_lens_core::core::fields::FieldMapping;
use registry_lens_core::core::fields::resolve_field_mapping;
use registry_lens_core::core::query::SqlQuery;
use registry_lens_core::core::query::TableName;
use registry_lens_core::interfaces::CatalogStatistics;
use registry_lens_core::interfaces::CompanyRow;
use registry_lens_core::interfaces::ExecutionError;
use registry_lens_core::interfaces::QueryExecutor;
use registry_lens_core::interfaces::SchemaIntrospector;

/// Scripted executor returning queued responses and recording every query.
#[derive(Default)]
pub struct ScriptedStore {
    row_responses: RefCell<VecDeque<Result<Vec<CompanyRow>, ExecutionError>>>,
    count_responses: RefCell<VecDeque<Result<u64, ExecutionError>>>,
    distinct_responses: RefCell<VecDeque<Result<Vec<String>, ExecutionError>>>,
    pub row_queries: RefCell<Vec<SqlQuery>>,
    pub count_queries: RefCell<Vec<SqlQuery>>,
    pub distinct_queries: RefCell<Vec<SqlQuery>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rows(&self, response: Result<Vec<CompanyRow>, ExecutionError>) {
        self.row_responses.borrow_mut().push_back(response);
    }

    pub fn push_count(&self, response: Result<u64, ExecutionError>) {
        self.count_responses.borrow_mut().push_back(response);
    }

    pub fn push_distinct(&self, response: Result<Vec<String>, ExecutionError>) {
        self.distinct_responses.borrow_mut().push_back(response);
    }
}

impl QueryExecutor for ScriptedStore {
    fn fetch_companies(&self, query: &SqlQuery) -> Result<Vec<CompanyRow>, ExecutionError> {
        self.row_queries.borrow_mut().push(query.clone());
        self.row_responses.borrow_mut().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn fetch_count(&self, query: &SqlQuery) -> Result<u64, ExecutionError> {
        self.count_queries.borrow_mut().push(query.clone());
        self.count_responses.borrow_mut().pop_front().unwrap_or(Ok(0))
    }

    fn fetch_distinct_values(&self, query: &SqlQuery) -> Result<Vec<String>, ExecutionError> {
        self.distinct_queries.borrow_mut().push(query.clone());
        self.distinct_responses.borrow_mut().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Introspector returning a fixed column list.
pub struct FixedIntrospector {
    pub columns: Vec<ColumnInfo>,
}

impl SchemaIntrospector for FixedIntrospector {
    fn list_columns(&self, _table: &TableName) -> Result<Vec<ColumnInfo>, ExecutionError> {
        Ok(self.columns.clone())
    }
}

/// Statistics double returning a fixed response.
pub struct FixedStatistics {
    pub response: Result<Option<u64>, ExecutionError>,
}

impl CatalogStatistics for FixedStatistics {
    fn approximate_rows(&self, _table: &TableName) -> Result<Option<u64>, ExecutionError> {
        self.response.clone()
    }
}

/// Standard registry columns matching the first candidate of each role.
pub fn standard_columns() -> Vec<ColumnInfo> {
    vec![
        ColumnInfo::new("cnpj_basico", "TEXT"),
        ColumnInfo::new("razao_social", "TEXT"),
        ColumnInfo::new("natureza_juridica", "TEXT"),
        ColumnInfo::new("qualificacao_responsavel", "TEXT"),
        ColumnInfo::new("capital_social", "REAL"),
        ColumnInfo::new("porte", "TEXT"),
    ]
}

/// Resolves the standard fixture mapping.
pub fn standard_mapping() -> FieldMapping {
    resolve_field_mapping(&standard_columns()).expect("standard fixture schema must resolve")
}

/// Returns the fixture registry table name.
pub fn registry_table() -> TableName {
    TableName::new("empresas").expect("fixture table name must validate")
}

/// Builds a fixture row with a numbered identifier and name.
pub fn company(number: u64) -> CompanyRow {
    CompanyRow {
        identifier: format!("{number:08}"),
        display_name: format!("EMPRESA {number}"),
        legal_nature: Some("206-2".to_string()),
        qualification: Some("49".to_string()),
        capital_amount: Some(10_000.0),
        size_class: Some("ME".to_string()),
    }
}

/// Builds `count` fixture rows starting at `start`.
pub fn companies(start: u64, count: u64) -> Vec<CompanyRow> {
    (start .. start + count).map(company).collect()
}
