//! Schema context and instructions handed to the language model, and SQL
//! extraction from its replies.

use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

use crate::schema::Catalog;

static SQL_CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```sql\s*(.*?)\s*```").expect("valid SQL block regex"));

/// Compact listing of tables, columns and foreign keys.
pub fn schema_text(catalog: &Catalog) -> String {
    let mut out = String::new();

    for key in catalog.sorted_keys() {
        let Some(table) = catalog.table(key) else {
            continue;
        };
        let _ = writeln!(out, "[{}]", key);
        for column in &table.columns {
            let _ = writeln!(out, "  - {} {}", column.name, column.type_label);
        }
        out.push('\n');
    }

    if !catalog.foreign_keys().is_empty() {
        out.push_str("[Foreign Keys]\n");
        for edge in catalog.foreign_keys() {
            let _ = writeln!(out, "  {}", edge);
        }
    }

    out.truncate(out.trim_end_matches('\n').len());
    out
}

pub fn build_system_prompt(schema_text: &str) -> String {
    format!(
        "You are a technical assistant for PostgreSQL. Answer concisely.
You may discuss the structure and logic of the database, indexing, normalization and query strategies.
- When useful, GENERATE A SINGLE SQL query inside one block:
  ```sql
  -- SQL here
  ```
  Then briefly explain what it does.
- When the user asks, you MAY INSPECT THE DATA to surface trends and patterns (aggregations, top-N, time series).

Schema context (tables, columns, foreign keys):
------------------------------------------------
{}",
        schema_text
    )
}

/// First ```` ```sql ```` block of a reply, trimmed. `None` when there is none.
pub fn extract_sql(reply: &str) -> Option<String> {
    SQL_CODE_BLOCK
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|sql| !sql.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, ForeignKeyEdge, Table};

    fn catalog() -> Catalog {
        let mut c = Catalog::new();
        for name in ["orders", "customers"] {
            let columns = vec![Column::new("id", "integer").unwrap()];
            c.insert_table(Table::new("public", name, columns).unwrap()).unwrap();
        }
        c.push_foreign_key(
            ForeignKeyEdge::new("public", "orders", "customer_id", "public", "customers", "id")
                .unwrap(),
        );
        c
    }

    #[test]
    fn test_schema_text() {
        assert_eq!(
            schema_text(&catalog()),
            "[public.customers]\n  - id integer\n\n[public.orders]\n  - id integer\n\n\
             [Foreign Keys]\n  public.orders.customer_id -> public.customers.id"
        );
    }

    #[test]
    fn test_schema_text_without_foreign_keys() {
        let mut c = Catalog::new();
        c.insert_table(Table::new("s", "t", vec![]).unwrap()).unwrap();
        assert_eq!(schema_text(&c), "[s.t]");
    }

    #[test]
    fn test_system_prompt_embeds_schema() {
        let prompt = build_system_prompt("[s.t]");
        assert!(prompt.ends_with("------------------------------------------------\n[s.t]"));
        assert!(prompt.contains("```sql"));
    }

    #[test]
    fn test_extract_sql() {
        let reply = "Here you go:\n```SQL\nSELECT *\nFROM orders;\n```\nDone.";
        assert_eq!(extract_sql(reply).as_deref(), Some("SELECT *\nFROM orders;"));
    }

    #[test]
    fn test_extract_first_block_only() {
        let reply = "```sql select 1 ``` and ```sql select 2 ```";
        assert_eq!(extract_sql(reply).as_deref(), Some("select 1"));
    }

    #[test]
    fn test_extract_sql_absent() {
        assert_eq!(extract_sql("no code here"), None);
        assert_eq!(extract_sql("```python\nprint(1)\n```"), None);
        assert_eq!(extract_sql("```sql\n\n```"), None);
    }
}
