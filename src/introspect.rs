//! Catalog assembly from `information_schema` and `pg_constraint` result rows.
//!
//! Running the queries is up to the caller's Postgres driver; this module only
//! owns the SQL text and the row -> catalog conversion.

use crate::schema::{Catalog, Column, ForeignKeyEdge, SchemaError};

/// Every column of every user base table, in physical order. Views are left
/// out. Character types carry their length, as `varchar(n)` or `char(n)`.
pub const COLUMNS_QUERY: &str = "\
SELECT
  c.table_schema, c.table_name, c.column_name,
  CASE
    WHEN c.data_type ILIKE 'character varying'
      THEN 'varchar(' || COALESCE(c.character_maximum_length::text, '') || ')'
    WHEN c.data_type ILIKE 'character'
      THEN 'char(' || COALESCE(c.character_maximum_length::text, '') || ')'
    ELSE c.data_type
  END AS col_type
FROM information_schema.columns c
JOIN information_schema.tables t
  ON t.table_schema = c.table_schema AND t.table_name = c.table_name
WHERE t.table_type = 'BASE TABLE'
  AND t.table_schema NOT IN ('pg_catalog','information_schema')
ORDER BY c.table_schema, c.table_name, c.ordinal_position;";

/// Every foreign-key column pair. Composite keys are paired by position in
/// `conkey`/`confkey`, one row per pair.
pub const FOREIGN_KEYS_QUERY: &str = "\
SELECT
  src_ns.nspname  AS src_schema,
  src_tbl.relname AS src_table,
  src_col.attname AS src_column,
  dst_ns.nspname  AS dst_schema,
  dst_tbl.relname AS dst_table,
  dst_col.attname AS dst_column
FROM pg_constraint fk
JOIN pg_class src_tbl ON fk.conrelid = src_tbl.oid
JOIN pg_namespace src_ns ON src_tbl.relnamespace = src_ns.oid
JOIN pg_class dst_tbl ON fk.confrelid = dst_tbl.oid
JOIN pg_namespace dst_ns ON dst_tbl.relnamespace = dst_ns.oid
JOIN unnest(fk.conkey) WITH ORDINALITY AS src(attnum, ord) ON true
JOIN unnest(fk.confkey) WITH ORDINALITY AS dst(attnum, ord) ON src.ord = dst.ord
JOIN pg_attribute src_col ON src_col.attrelid = src_tbl.oid AND src_col.attnum = src.attnum
JOIN pg_attribute dst_col ON dst_col.attrelid = dst_tbl.oid AND dst_col.attnum = dst.attnum
WHERE fk.contype = 'f'
  AND src_ns.nspname NOT IN ('pg_catalog','information_schema')
ORDER BY src_schema, src_table, fk.conname, src.ord;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub schema: String,
    pub table: String,
    pub column: String,
    pub data_type: String,
}

impl ColumnRow {
    pub fn new(schema: &str, table: &str, column: &str, data_type: &str) -> Self {
        Self {
            schema: schema.to_string(),
            table: table.to_string(),
            column: column.to_string(),
            data_type: data_type.to_string(),
        }
    }
}

/// `(src_schema, src_table, src_column, dst_schema, dst_table, dst_column)`
pub type ForeignKeyRow = (String, String, String, String, String, String);

/// Group column rows into tables (row order kept) and turn fk rows into edges.
pub fn catalog_from_rows(
    columns: &[ColumnRow],
    foreign_keys: &[ForeignKeyRow],
) -> Result<Catalog, SchemaError> {
    let mut catalog = Catalog::new();

    for row in columns {
        let column = Column::new(row.column.as_str(), row.data_type.as_str())?;
        catalog.push_column(&row.schema, &row.table, column)?;
    }

    for (src_schema, src_table, src_column, dst_schema, dst_table, dst_column) in foreign_keys {
        catalog.push_foreign_key(ForeignKeyEdge::new(
            src_schema.as_str(),
            src_table.as_str(),
            src_column.as_str(),
            dst_schema.as_str(),
            dst_table.as_str(),
            dst_column.as_str(),
        )?);
    }

    tracing::debug!(
        tables = catalog.len(),
        foreign_keys = catalog.foreign_keys().len(),
        "catalog assembled"
    );
    Ok(catalog)
}
