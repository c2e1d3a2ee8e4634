//! Character grid the diagram is drawn on.

use crate::measure::char_cells;

pub const BLANK: char = ' ';
pub const LINE_H: char = '─';
pub const LINE_V: char = '│';
pub const JUNCTION: char = '┼';
pub const ARROW_RIGHT: char = '▶';
pub const ARROW_LEFT: char = '◀';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Blank,
    /// Box content or an arrowhead; line drawing never touches it
    Text(char),
    /// Routed line glyph; may merge into a junction
    Line(char),
    /// Second cell of a double-width glyph
    WideTail,
}

impl Cell {
    pub fn glyph(self) -> Option<char> {
        match self {
            Cell::Blank => Some(BLANK),
            Cell::Text(c) | Cell::Line(c) => Some(c),
            Cell::WideTail => None,
        }
    }
}

/// Fixed-size grid of single glyphs. Coordinates are signed so callers can
/// ask for cells just outside the grid; those writes are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Blank; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    pub fn cell(&self, x: isize, y: isize) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Glyph shown at `(x, y)`; `None` outside the grid or on a wide-glyph tail.
    pub fn glyph(&self, x: isize, y: isize) -> Option<char> {
        self.cell(x, y).and_then(Cell::glyph)
    }

    /// Write `ch` at `(x, y)`; out-of-bounds writes are dropped.
    pub fn draw_point(&mut self, x: isize, y: isize, ch: char) {
        self.put(x, y, Cell::Text(ch));
    }

    fn put(&mut self, x: isize, y: isize, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Copy box lines cell by cell with `(x, y)` as the top-left corner.
    pub fn draw_box<S: AsRef<str>>(&mut self, x: isize, y: isize, lines: &[S]) {
        for (dy, line) in lines.iter().enumerate() {
            let row = y + dy as isize;
            let mut col = x;
            for ch in line.as_ref().chars() {
                let cells = char_cells(ch) as isize;
                self.draw_point(col, row, ch);
                for tail in 1..cells {
                    self.put(col + tail, row, Cell::WideTail);
                }
                col += cells;
            }
        }
    }

    /// Horizontal line over `[min(x1, x2), max(x1, x2)]` on row `y`.
    ///
    /// Only blank cells take the line; crossings with vertical lines become
    /// junctions and anything else (box borders, text) is left alone.
    pub fn draw_horizontal(&mut self, x1: isize, x2: isize, y: isize) {
        if self.width == 0 || y < 0 || y as usize >= self.height {
            return;
        }
        let lo = x1.min(x2).max(0);
        let hi = x1.max(x2).min(self.width as isize - 1);
        for x in lo..=hi {
            self.merge_line(x, y, LINE_H, LINE_V);
        }
    }

    /// Vertical counterpart of [`Canvas::draw_horizontal`].
    pub fn draw_vertical(&mut self, x: isize, y1: isize, y2: isize) {
        if self.height == 0 || x < 0 || x as usize >= self.width {
            return;
        }
        let lo = y1.min(y2).max(0);
        let hi = y1.max(y2).min(self.height as isize - 1);
        for y in lo..=hi {
            self.merge_line(x, y, LINE_V, LINE_H);
        }
    }

    fn merge_line(&mut self, x: isize, y: isize, line: char, crossing: char) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        match self.cells[i] {
            Cell::Blank => self.cells[i] = Cell::Line(line),
            Cell::Line(c) if c == crossing || c == JUNCTION => self.cells[i] = Cell::Line(JUNCTION),
            _ => {}
        }
    }

    /// One string per row with trailing blanks trimmed.
    pub fn rows(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height];
        }
        self.cells
            .chunks(self.width)
            .map(|row| {
                let line: String = row.iter().filter_map(|c| c.glyph()).collect();
                line.trim_end_matches(BLANK).to_string()
            })
            .collect()
    }

    pub fn to_text(&self) -> String {
        self.rows().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_clipped() {
        let mut c = Canvas::new(3, 2);
        c.draw_point(-1, 0, 'x');
        c.draw_point(3, 0, 'x');
        c.draw_point(0, 2, 'x');
        assert_eq!(c.to_text(), "\n");
        c.draw_point(1, 1, 'x');
        assert_eq!(c.glyph(1, 1), Some('x'));
    }

    #[test]
    fn test_horizontal_line() {
        let mut c = Canvas::new(6, 1);
        c.draw_horizontal(4, 1, 0);
        assert_eq!(c.to_text(), " ────");
    }

    #[test]
    fn test_horizontal_clipped_to_bounds() {
        let mut c = Canvas::new(4, 2);
        c.draw_horizontal(-5, 10, 1);
        c.draw_horizontal(0, 3, 7);
        assert_eq!(c.rows(), vec!["", "────"]);
    }

    #[test]
    fn test_vertical_line() {
        let mut c = Canvas::new(2, 3);
        c.draw_vertical(1, 2, 0);
        assert_eq!(c.rows(), vec![" │", " │", " │"]);
    }

    #[test]
    fn test_crossing_becomes_junction() {
        let mut c = Canvas::new(3, 3);
        c.draw_horizontal(0, 2, 1);
        c.draw_vertical(1, 0, 2);
        assert_eq!(c.rows(), vec![" │", "─┼─", " │"]);
        // Redrawing over a junction keeps it
        c.draw_horizontal(0, 2, 1);
        assert_eq!(c.glyph(1, 1), Some(JUNCTION));
    }

    #[test]
    fn test_parallel_lines_do_not_merge() {
        let mut c = Canvas::new(3, 1);
        c.draw_horizontal(0, 2, 0);
        c.draw_horizontal(0, 2, 0);
        assert_eq!(c.to_text(), "───");
    }

    #[test]
    fn test_line_never_overwrites_box() {
        let mut c = Canvas::new(6, 3);
        c.draw_box(1, 0, &["┌──┐", "│ab│", "└──┘"]);
        c.draw_horizontal(0, 5, 1);
        c.draw_vertical(2, 0, 2);
        assert_eq!(c.rows(), vec![" ┌──┐", "─│ab│─", " └──┘"]);
    }

    #[test]
    fn test_arrowhead_survives_lines() {
        let mut c = Canvas::new(3, 1);
        c.draw_point(1, 0, ARROW_RIGHT);
        c.draw_horizontal(0, 2, 0);
        assert_eq!(c.to_text(), "─▶─");
    }

    #[test]
    fn test_wide_glyph_takes_two_cells() {
        let mut c = Canvas::new(6, 1);
        c.draw_box(0, 0, &["名x"]);
        assert_eq!(c.glyph(1, 0), None);
        assert_eq!(c.glyph(2, 0), Some('x'));
        c.draw_horizontal(0, 5, 0);
        assert_eq!(c.to_text(), "名x───");
    }
}
