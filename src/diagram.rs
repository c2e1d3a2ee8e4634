//! ASCII schema diagrams: tables as boxes on a two-column grid, foreign keys
//! routed through a shared vertical trunk between the columns.

mod boxes;
mod canvas;
mod placement;
mod routing;
mod types;

pub use boxes::TableBox;
pub use canvas::{ARROW_LEFT, ARROW_RIGHT, Canvas, Cell, JUNCTION, LINE_H, LINE_V};
pub use placement::{GRID_COLUMNS, MIN_GUTTER_X, Placement, order_keys, place_tables};
pub use routing::route_edges;
pub use types::{Arrow, GridCell, Rect, RoutedEdge};

use crate::schema::Catalog;

/// Spacing constants for the diagram grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramConfig {
    /// Empty columns between box columns (halved as outer margin). Values
    /// below [`MIN_GUTTER_X`] are raised to it.
    pub gutter_x: usize,
    /// Empty rows between box rows
    pub gutter_y: usize,
    /// Minimum content width of a box, in cells
    pub min_inner_width: usize,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            gutter_x: 8,
            gutter_y: 2,
            min_inner_width: 8,
        }
    }
}

/// One finished layout pass.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub placement: Placement,
    pub edges: Vec<RoutedEdge>,
}

impl Diagram {
    pub fn canvas(&self) -> &Canvas {
        &self.placement.canvas
    }

    pub fn mid_x(&self) -> usize {
        self.placement.mid_x()
    }

    pub fn rect(&self, key: &str) -> Option<&Rect> {
        self.placement.rects.get(key)
    }

    pub fn to_text(&self) -> String {
        self.placement.canvas.to_text()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiagramEngine {
    config: DiagramConfig,
}

impl DiagramEngine {
    pub fn new(config: DiagramConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Lay out and route the whole catalog. `focus` names the table placed first.
    pub fn layout(&self, catalog: &Catalog, focus: Option<&str>) -> Diagram {
        let _span = tracing::debug_span!(
            "diagram_layout",
            tables = catalog.len(),
            foreign_keys = catalog.foreign_keys().len()
        )
        .entered();

        // Phase 1: boxes on the grid
        let mut placement = place_tables(catalog, focus, &self.config);
        // Phase 2: foreign keys through the trunk
        let edges = route_edges(&mut placement, catalog.foreign_keys());

        tracing::debug!(
            width = placement.canvas.width(),
            height = placement.canvas.height(),
            routed = edges.len(),
            "diagram laid out"
        );
        Diagram { placement, edges }
    }

    pub fn render(&self, catalog: &Catalog, focus: Option<&str>) -> String {
        self.layout(catalog, focus).to_text()
    }
}

/// Render `catalog` as a newline-joined block of text with default spacing.
pub fn render_diagram(catalog: &Catalog, focus: Option<&str>) -> String {
    DiagramEngine::default().render(catalog, focus)
}
