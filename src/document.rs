//! JSON form of a catalog, as served to the interactive diagram page.
//!
//! ```json
//! {
//!   "tables": {"public.users": {"schema": "public", "table": "users",
//!                               "columns": [{"name": "id", "type": "integer"}]}},
//!   "fks": [{"src_schema": "public", "src_table": "orders", "src_column": "user_id",
//!            "dst_schema": "public", "dst_table": "users", "dst_column": "id"}]
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{Catalog, Column, ForeignKeyEdge, SchemaError, Table};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid JSON: expected an object at the top level, found {0}")]
    NotAnObject(&'static str),
    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),
    #[error("Table key {0:?} is not of the form schema.table")]
    UnqualifiedKey(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub tables: IndexMap<String, TableEntry>,
    #[serde(default)]
    pub fks: Vec<ForeignKeyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKeyEntry {
    pub src_schema: String,
    pub src_table: String,
    pub src_column: String,
    pub dst_schema: String,
    pub dst_table: String,
    pub dst_column: String,
}

impl SchemaDocument {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let tables = catalog
            .tables()
            .map(|t| {
                let entry = TableEntry {
                    schema: Some(t.schema.clone()),
                    table: Some(t.name.clone()),
                    columns: t
                        .columns
                        .iter()
                        .map(|c| ColumnEntry {
                            name: c.name.clone(),
                            typ: c.type_label.clone(),
                        })
                        .collect(),
                };
                (t.key(), entry)
            })
            .collect();

        let fks = catalog
            .foreign_keys()
            .iter()
            .map(|e| ForeignKeyEntry {
                src_schema: e.src_schema.clone(),
                src_table: e.src_table.clone(),
                src_column: e.src_column.clone(),
                dst_schema: e.dst_schema.clone(),
                dst_table: e.dst_table.clone(),
                dst_column: e.dst_column.clone(),
            })
            .collect();

        Self { tables, fks }
    }

    pub fn into_catalog(self) -> Result<Catalog, DocumentError> {
        let mut catalog = Catalog::new();

        for (key, entry) in self.tables {
            let (schema, name) = match (entry.schema, entry.table) {
                (Some(schema), Some(table)) => (schema, table),
                (schema, table) => {
                    let (key_schema, key_table) = key
                        .split_once('.')
                        .ok_or_else(|| DocumentError::UnqualifiedKey(key.clone()))?;
                    (
                        schema.unwrap_or_else(|| key_schema.to_string()),
                        table.unwrap_or_else(|| key_table.to_string()),
                    )
                }
            };
            let columns = entry
                .columns
                .into_iter()
                .map(|c| Column::new(c.name, c.typ))
                .collect::<Result<Vec<_>, _>>()?;
            catalog.insert_table(Table::new(schema, name, columns)?)?;
        }

        for fk in self.fks {
            catalog.push_foreign_key(ForeignKeyEdge::new(
                fk.src_schema,
                fk.src_table,
                fk.src_column,
                fk.dst_schema,
                fk.dst_table,
                fk.dst_column,
            )?);
        }

        Ok(catalog)
    }
}

/// Parse a `{"tables", "fks"}` document. Only a top-level object is accepted;
/// derived `Deserialize` would otherwise read an array field by field.
pub fn from_json(input: &str) -> Result<Catalog, DocumentError> {
    let value: Value = serde_json::from_str(input)?;
    if !value.is_object() {
        return Err(DocumentError::NotAnObject(json_kind(&value)));
    }
    let document: SchemaDocument = serde_json::from_value(value)?;
    document.into_catalog()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn to_json(catalog: &Catalog) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(&SchemaDocument::from_catalog(catalog))?)
}
