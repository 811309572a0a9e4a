// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SQL identifiers and query text shared by the MySQL backend. Identifiers
//! come from configuration and are never parameterized by the wire
//! protocol, so they are validated structurally before being concatenated
//! into any query.

use moduli_core::validation::validate_sql_identifier;
use moduli_core::ValidationError;

/// The four SQL identifiers the backend concatenates into queries:
/// database, live table, archive table, and the view joining live rows to
/// their constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNames {
    pub db_name: String,
    pub table_name: String,
    pub view_name: String,
    pub archive_name: String,
    pub constants_table: String,
}

impl SchemaNames {
    pub fn new(
        db_name: impl Into<String>,
        table_name: impl Into<String>,
        view_name: impl Into<String>,
        archive_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let db_name = db_name.into();
        let table_name = table_name.into();
        let view_name = view_name.into();
        let archive_name = archive_name.into();
        validate_sql_identifier(&db_name)?;
        validate_sql_identifier(&table_name)?;
        validate_sql_identifier(&view_name)?;
        validate_sql_identifier(&archive_name)?;
        Ok(Self {
            db_name,
            table_name,
            view_name,
            archive_name,
            constants_table: "constants".to_string(),
        })
    }

    pub fn qualified(&self, table: &str) -> String {
        format!("`{}`.`{}`", self.db_name, table)
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
