//! Grid placement of table boxes.

use indexmap::IndexMap;

use crate::schema::Catalog;

use super::DiagramConfig;
use super::boxes::TableBox;
use super::canvas::Canvas;
use super::types::{GridCell, Rect};

/// Boxes per grid row. Routing relies on exactly one gutter between the two
/// box columns, so this is not configurable.
pub const GRID_COLUMNS: usize = 2;

/// Smallest usable horizontal gutter. Below this the trunk lands on or next
/// to the right column's border and entry arrows point the wrong way.
pub const MIN_GUTTER_X: usize = 4;

/// Result of the placement phase: boxes drawn, rectangles recorded.
#[derive(Debug, Clone)]
pub struct Placement {
    pub canvas: Canvas,
    /// Table key -> rectangle, in placement order
    pub rects: IndexMap<String, Rect>,
    pub column_pitch: usize,
    pub row_pitch: usize,
}

impl Placement {
    /// x of the shared vertical routing trunk.
    pub fn mid_x(&self) -> usize {
        self.canvas.width() / 2
    }

    pub fn grid_cell(&self, key: &str) -> Option<GridCell> {
        self.rects.get_index_of(key).map(grid_cell)
    }
}

fn grid_cell(index: usize) -> GridCell {
    GridCell {
        row: index / GRID_COLUMNS,
        column: index % GRID_COLUMNS,
    }
}

/// Sorted table keys, with `focus` moved to the front when it names a table.
pub fn order_keys<'a>(catalog: &'a Catalog, focus: Option<&str>) -> Vec<&'a str> {
    let mut keys = catalog.sorted_keys();
    if let Some(focus) = focus.filter(|f| !f.is_empty()) {
        match keys.iter().position(|k| *k == focus) {
            Some(pos) => {
                let key = keys.remove(pos);
                keys.insert(0, key);
            }
            None => tracing::debug!(focus, "focus table not in catalog, keeping sorted order"),
        }
    }
    keys
}

/// Size the canvas from the largest box and draw every box in its grid slot.
pub fn place_tables(catalog: &Catalog, focus: Option<&str>, config: &DiagramConfig) -> Placement {
    let keys = order_keys(catalog, focus);

    let boxes: Vec<(&str, TableBox)> = keys
        .iter()
        .filter_map(|&key| {
            let table = catalog.table(key)?;
            Some((key, TableBox::build(key, &table.columns, config.min_inner_width)))
        })
        .collect();

    let max_width = boxes.iter().map(|(_, b)| b.width).max().unwrap_or(0);
    let max_height = boxes.iter().map(|(_, b)| b.height).max().unwrap_or(0);

    let gutter_x = config.gutter_x.max(MIN_GUTTER_X);
    if gutter_x != config.gutter_x {
        tracing::debug!(
            requested = config.gutter_x,
            gutter_x,
            "horizontal gutter raised to minimum"
        );
    }

    let column_pitch = max_width + gutter_x;
    let row_pitch = max_height + config.gutter_y;
    let rows = boxes.len().div_ceil(GRID_COLUMNS);

    // Margins of gutter_x / 2 on both outer sides put width / 2 in the middle
    // of the gutter between the two box columns.
    let width = GRID_COLUMNS * column_pitch;
    let height = rows * row_pitch + config.gutter_y + 2;
    let mut canvas = Canvas::new(width, height);

    let mut rects = IndexMap::with_capacity(boxes.len());
    for (index, (key, table_box)) in boxes.iter().enumerate() {
        let cell = grid_cell(index);
        let x = cell.column * column_pitch + gutter_x / 2;
        let y = cell.row * row_pitch + config.gutter_y / 2;

        canvas.draw_box(x as isize, y as isize, &table_box.lines);
        rects.insert(
            key.to_string(),
            Rect::from_origin(x, y, table_box.width, table_box.height),
        );
    }

    Placement {
        canvas,
        rects,
        column_pitch,
        row_pitch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, Table};

    fn catalog(tables: &[(&str, &[(&str, &str)])]) -> Catalog {
        let mut catalog = Catalog::new();
        for (key, columns) in tables {
            let (schema, name) = key.split_once('.').unwrap();
            let columns = columns
                .iter()
                .map(|(n, t)| Column::new(*n, *t).unwrap())
                .collect();
            catalog.insert_table(Table::new(schema, name, columns).unwrap()).unwrap();
        }
        catalog
    }

    #[test]
    fn test_sorted_order() {
        let c = catalog(&[("s.c", &[]), ("s.a", &[]), ("s.b", &[])]);
        assert_eq!(order_keys(&c, None), vec!["s.a", "s.b", "s.c"]);
        assert_eq!(order_keys(&c, Some("")), vec!["s.a", "s.b", "s.c"]);
    }

    #[test]
    fn test_focus_moves_to_front() {
        let c = catalog(&[("s.c", &[]), ("s.a", &[]), ("s.b", &[])]);
        assert_eq!(order_keys(&c, Some("s.b")), vec!["s.b", "s.a", "s.c"]);
        assert_eq!(order_keys(&c, Some("s.zzz")), vec!["s.a", "s.b", "s.c"]);
    }

    #[test]
    fn test_canvas_size() {
        let c = catalog(&[
            ("public.customers", &[("id", "integer"), ("name", "text")]),
            ("public.orders", &[("id", "integer"), ("customer_id", "integer")]),
            ("public.items", &[]),
        ]);
        let p = place_tables(&c, None, &DiagramConfig::default());

        // widest box: "customer_id: integer" -> 20 + 4
        assert_eq!(p.column_pitch, 24 + 8);
        assert_eq!(p.row_pitch, 6 + 2);
        assert_eq!(p.canvas.width(), 64);
        assert_eq!(p.canvas.height(), 2 * 8 + 2 + 2);
        assert_eq!(p.mid_x(), 32);
    }

    #[test]
    fn test_grid_positions() {
        let c = catalog(&[("s.a", &[]), ("s.b", &[]), ("s.c", &[])]);
        let p = place_tables(&c, None, &DiagramConfig::default());

        assert_eq!(p.grid_cell("s.a"), Some(GridCell { row: 0, column: 0 }));
        assert_eq!(p.grid_cell("s.b"), Some(GridCell { row: 0, column: 1 }));
        assert_eq!(p.grid_cell("s.c"), Some(GridCell { row: 1, column: 0 }));

        let a = p.rects["s.a"];
        let b = p.rects["s.b"];
        let c3 = p.rects["s.c"];
        assert_eq!((a.left, a.top), (4, 1));
        assert_eq!((b.left, b.top), (p.column_pitch + 4, 1));
        assert_eq!((c3.left, c3.top), (4, p.row_pitch + 1));
    }

    #[test]
    fn test_trunk_is_clear_of_boxes() {
        let c = catalog(&[
            ("s.wide_table_name", &[("a_long_column_name", "character varying")]),
            ("s.b", &[]),
            ("s.c", &[("id", "int")]),
        ]);
        let p = place_tables(&c, None, &DiagramConfig::default());
        let mid = p.mid_x();
        for rect in p.rects.values() {
            assert!(rect.right < mid || rect.left > mid + 1);
        }
    }

    #[test]
    fn test_narrow_gutter_is_raised() {
        let c = catalog(&[("s.a", &[("id", "int")]), ("s.b", &[("id", "int")])]);
        for gutter_x in 0..MIN_GUTTER_X {
            let config = DiagramConfig {
                gutter_x,
                ..DiagramConfig::default()
            };
            let p = place_tables(&c, None, &config);
            let mid = p.mid_x();
            let b = p.rects["s.b"];
            assert_eq!(p.column_pitch, 12 + MIN_GUTTER_X);
            // entry cell left of the right box must sit past the trunk
            assert!(b.left - 1 > mid, "gutter {gutter_x}: left {} mid {mid}", b.left);
            assert!(p.rects["s.a"].right + 1 < mid);
        }
    }

    #[test]
    fn test_empty_catalog() {
        let p = place_tables(&Catalog::new(), None, &DiagramConfig::default());
        assert!(p.rects.is_empty());
        assert_eq!(p.canvas.width(), 16);
        assert_eq!(p.canvas.height(), 4);
    }
}
