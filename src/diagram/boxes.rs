//! Bordered text boxes for tables.

use crate::measure::{pad_right, text_cells};
use crate::schema::Column;

/// Rendered box for one table: border, title, optional separator and one line
/// per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBox {
    pub lines: Vec<String>,
    /// Width in canvas cells of every line
    pub width: usize,
    pub height: usize,
}

impl TableBox {
    pub fn build(title: &str, columns: &[Column], min_inner_width: usize) -> Self {
        let body: Vec<String> = columns
            .iter()
            .map(|c| format!("{}: {}", c.name, c.type_label))
            .collect();

        let inner = body
            .iter()
            .map(|line| text_cells(line))
            .chain([text_cells(title), min_inner_width])
            .max()
            .unwrap_or(min_inner_width);

        let rule = "─".repeat(inner + 2);
        let mut lines = Vec::with_capacity(body.len() + 4);
        lines.push(format!("┌{}┐", rule));
        lines.push(format!("│ {} │", pad_right(title, inner)));
        if !body.is_empty() {
            lines.push(format!("├{}┤", rule));
        }
        lines.extend(body.iter().map(|line| format!("│ {} │", pad_right(line, inner))));
        lines.push(format!("└{}┘", rule));

        let height = lines.len();
        Self {
            lines,
            width: inner + 4,
            height,
        }
    }
}
