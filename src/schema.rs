//! Typed schema catalog: tables, columns and foreign-key edges.

use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("{what} must not be empty")]
    EmptyName { what: &'static str },
    #[error("Duplicate table: {0}")]
    DuplicateTable(String),
}

fn non_empty(value: impl Into<String>, what: &'static str) -> Result<String, SchemaError> {
    let value = value.into();
    if value.trim().is_empty() {
        Err(SchemaError::EmptyName { what })
    } else {
        Ok(value)
    }
}

/// Build the `schema.table` key used throughout the catalog.
pub fn qualified_name(schema: &str, table: &str) -> String {
    format!("{}.{}", schema, table)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub type_label: String,
}

impl Column {
    pub fn new(
        name: impl Into<String>,
        type_label: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            name: non_empty(name, "column name")?,
            type_label: non_empty(type_label, "column type")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub schema: String,
    pub name: String,
    /// Physical column order as reported by the database
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(
        schema: impl Into<String>,
        name: impl Into<String>,
        columns: Vec<Column>,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            schema: non_empty(schema, "schema name")?,
            name: non_empty(name, "table name")?,
            columns,
        })
    }

    pub fn key(&self) -> String {
        qualified_name(&self.schema, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyEdge {
    pub src_schema: String,
    pub src_table: String,
    pub src_column: String,
    pub dst_schema: String,
    pub dst_table: String,
    pub dst_column: String,
}

impl ForeignKeyEdge {
    pub fn new(
        src_schema: impl Into<String>,
        src_table: impl Into<String>,
        src_column: impl Into<String>,
        dst_schema: impl Into<String>,
        dst_table: impl Into<String>,
        dst_column: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            src_schema: non_empty(src_schema, "source schema")?,
            src_table: non_empty(src_table, "source table")?,
            src_column: non_empty(src_column, "source column")?,
            dst_schema: non_empty(dst_schema, "destination schema")?,
            dst_table: non_empty(dst_table, "destination table")?,
            dst_column: non_empty(dst_column, "destination column")?,
        })
    }

    pub fn source_key(&self) -> String {
        qualified_name(&self.src_schema, &self.src_table)
    }

    pub fn destination_key(&self) -> String {
        qualified_name(&self.dst_schema, &self.dst_table)
    }
}

impl fmt::Display for ForeignKeyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{} -> {}.{}.{}",
            self.src_schema,
            self.src_table,
            self.src_column,
            self.dst_schema,
            self.dst_table,
            self.dst_column
        )
    }
}

/// Snapshot of a database schema.
///
/// Tables keep insertion order; foreign keys keep introspection order and are
/// not checked against the table set (the diagram skips dangling ones).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tables: IndexMap<String, Table>,
    foreign_keys: Vec<ForeignKeyEdge>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_table(&mut self, table: Table) -> Result<(), SchemaError> {
        let key = table.key();
        if self.tables.contains_key(&key) {
            return Err(SchemaError::DuplicateTable(key));
        }
        self.tables.insert(key, table);
        Ok(())
    }

    /// Append a column to `schema.table`, creating the table on first sight.
    pub fn push_column(
        &mut self,
        schema: &str,
        table: &str,
        column: Column,
    ) -> Result<(), SchemaError> {
        let key = qualified_name(schema, table);
        match self.tables.get_mut(&key) {
            Some(existing) => existing.columns.push(column),
            None => {
                let created = Table::new(schema, table, vec![column])?;
                self.tables.insert(key, created);
            }
        }
        Ok(())
    }

    pub fn push_foreign_key(&mut self, edge: ForeignKeyEdge) {
        self.foreign_keys.push(edge);
    }

    pub fn table(&self, key: &str) -> Option<&Table> {
        self.tables.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tables.contains_key(key)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn foreign_keys(&self) -> &[ForeignKeyEdge] {
        &self.foreign_keys
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tables.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }
}
