/// Character-cell drawing surface for terminal rendering
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Point2, Vector2};
use std::io::Write;
use tetra_core::{Color, DrawingSurface};

/// Glyph used for filled cells
const FILL_GLYPH: char = '█';
/// Glyph used for stroked outlines
const STROKE_GLYPH: char = '#';
/// Logical pixels per cell row; terminal cells are about twice as tall as wide
const CELL_ASPECT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    /// `None` draws with the terminal's default foreground
    pub color: Option<Color>,
}

impl Cell {
    pub const BLANK: Cell = Cell { glyph: ' ', color: None };
}

/// Canvas-like surface backed by a grid of terminal cells.
///
/// Logical coordinates are one unit per column horizontally and
/// [`CELL_ASPECT`] units per row vertically, so shapes keep their
/// proportions on screen.
pub struct CellCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    origin: Vector2<f64>,
    saved: Vec<Vector2<f64>>,
    path: Vec<Point2<f64>>,
    fill_color: Color,
}

impl CellCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; cols * rows],
            origin: Vector2::zeros(),
            saved: Vec::new(),
            path: Vec::new(),
            fill_color: Color::RED,
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::BLANK; cols * rows];
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    fn put(&mut self, col: i64, row: i64, cell: Cell) {
        if col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows {
            self.cells[row as usize * self.cols + col as usize] = cell;
        }
    }

    /// Cell containing a logical point
    fn cell_at(point: Point2<f64>) -> (i64, i64) {
        (point.x.floor() as i64, (point.y / CELL_ASPECT).floor() as i64)
    }

    /// Logical coordinates of a cell's center
    fn cell_center(col: i64, row: i64) -> Point2<f64> {
        Point2::new(col as f64 + 0.5, (row as f64 + 0.5) * CELL_ASPECT)
    }

    fn fill_triangle(&mut self, v0: Point2<f64>, v1: Point2<f64>, v2: Point2<f64>) {
        let lower = Point2::new(v0.x.min(v1.x).min(v2.x), v0.y.min(v1.y).min(v2.y));
        let upper = Point2::new(v0.x.max(v1.x).max(v2.x), v0.y.max(v1.y).max(v2.y));
        let (min_col, min_row) = Self::cell_at(lower);
        let (max_col, max_row) = Self::cell_at(upper);

        // Clip to the grid
        let min_col = min_col.max(0);
        let min_row = min_row.max(0);
        let max_col = max_col.min(self.cols as i64 - 1);
        let max_row = max_row.min(self.rows as i64 - 1);

        let cell = Cell {
            glyph: FILL_GLYPH,
            color: Some(self.fill_color),
        };
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, Self::cell_center(col, row)) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.put(col, row, cell);
                    }
                }
            }
        }
    }

    fn stroke_segment(&mut self, from: Point2<f64>, to: Point2<f64>) {
        // Sample only the visible part, so the step count is bounded by the grid.
        let Some((from, to)) = clip_segment(from, to, self.width(), self.height()) else {
            return;
        };
        let span = to - from;
        let steps = (span.x.abs().max(span.y.abs() / CELL_ASPECT) * 2.0).ceil().max(1.0) as usize;
        let cell = Cell {
            glyph: STROKE_GLYPH,
            color: None,
        };
        for step in 0..=steps {
            let (col, row) = Self::cell_at(from + span * (step as f64 / steps as f64));
            self.put(col, row, cell);
        }
    }

    /// Write the whole grid, row by row
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.cells.chunks(self.cols.max(1)) {
            for cell in row {
                match cell.color {
                    Some(color) => writer.queue(SetForegroundColor(terminal_color(color)))?,
                    None => writer.queue(ResetColor)?,
                };
                writer.queue(Print(cell.glyph))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawingSurface for CellCanvas {
    fn width(&self) -> f64 {
        self.cols as f64
    }

    fn height(&self) -> f64 {
        self.rows as f64 * CELL_ASPECT
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (min_col, min_row) = Self::cell_at(Point2::new(x, y) + self.origin);
        let (max_col, max_row) = Self::cell_at(Point2::new(x + width, y + height) + self.origin);
        for row in min_row..max_row {
            for col in min_col..max_col {
                self.put(col, row, Cell::BLANK);
            }
        }
    }

    fn save(&mut self) {
        self.saved.push(self.origin);
    }

    fn restore(&mut self) {
        if let Some(origin) = self.saved.pop() {
            self.origin = origin;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.origin += Vector2::new(x, y);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.clear();
        self.path.push(Point2::new(x, y) + self.origin);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(Point2::new(x, y) + self.origin);
    }

    fn close_path(&mut self) {
        if let (Some(&first), Some(&last)) = (self.path.first(), self.path.last()) {
            if self.path.len() > 1 && first != last {
                self.path.push(first);
            }
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    /// Fan-triangulate the current path and fill each triangle
    fn fill(&mut self) {
        if self.path.len() < 3 {
            return;
        }
        let anchor = self.path[0];
        let path = self.path.clone();
        for pair in path[1..].windows(2) {
            self.fill_triangle(anchor, pair[0], pair[1]);
        }
    }

    fn stroke(&mut self) {
        let path = self.path.clone();
        for pair in path.windows(2) {
            self.stroke_segment(pair[0], pair[1]);
        }
    }
}

/// Map a fill colour to a truecolor terminal colour
pub fn terminal_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Clip a segment to the rectangle `[0, width] × [0, height]`
/// (Liang–Barsky). `None` when nothing of it is inside.
fn clip_segment(
    from: Point2<f64>,
    to: Point2<f64>,
    width: f64,
    height: f64,
) -> Option<(Point2<f64>, Point2<f64>)> {
    let d = to - from;
    let (mut enter, mut exit) = (0.0_f64, 1.0_f64);
    let edges = [
        (-d.x, from.x),
        (d.x, width - from.x),
        (-d.y, from.y),
        (d.y, height - from.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            enter = enter.max(t);
        } else {
            exit = exit.min(t);
        }
        if enter > exit {
            return None;
        }
    }
    Some((from + d * enter, from + d * exit))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: Point2<f64>,
    v1: Point2<f64>,
    v2: Point2<f64>,
    p: Point2<f64>,
) -> Option<(f64, f64, f64)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetra_core::{RenderConfig, SolidRenderer};

    fn filled_cells(canvas: &CellCanvas, color: Color) -> usize {
        (0..canvas.rows())
            .flat_map(|row| (0..canvas.cols()).map(move |col| (col, row)))
            .filter(|&(col, row)| canvas.cell(col, row).and_then(|cell| cell.color) == Some(color))
            .count()
    }

    #[test]
    fn test_logical_size_accounts_for_cell_aspect() {
        let canvas = CellCanvas::new(80, 24);
        assert_eq!(canvas.width(), 80.0);
        assert_eq!(canvas.height(), 48.0);
    }

    #[test]
    fn test_fill_covers_triangle_interior() {
        let mut canvas = CellCanvas::new(20, 10);
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(20.0, 0.0);
        canvas.line_to(0.0, 20.0);
        canvas.close_path();
        canvas.set_fill_color(Color::BLUE);
        canvas.fill();

        assert_eq!(canvas.cell(1, 1).unwrap().color, Some(Color::BLUE));
        assert_eq!(canvas.cell(19, 9).unwrap(), Cell::BLANK);
        assert!(filled_cells(&canvas, Color::BLUE) > 50);
    }

    #[test]
    fn test_translate_and_restore() {
        let mut canvas = CellCanvas::new(10, 10);
        canvas.save();
        canvas.translate(5.0, 10.0);
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(0.0, 0.0);
        canvas.stroke();
        canvas.restore();
        assert_eq!(canvas.cell(5, 5).unwrap().glyph, STROKE_GLYPH);

        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(0.0, 0.0);
        canvas.stroke();
        assert_eq!(canvas.cell(0, 0).unwrap().glyph, STROKE_GLYPH);
    }

    #[test]
    fn test_clear_rect_blanks_cells() {
        let mut canvas = CellCanvas::new(4, 4);
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(4.0, 8.0);
        canvas.stroke();
        canvas.clear_rect(0.0, 0.0, canvas.width(), canvas.height());
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(canvas.cell(col, row).unwrap(), Cell::BLANK);
            }
        }
    }

    #[test]
    fn test_out_of_bounds_drawing_is_clipped() {
        let mut canvas = CellCanvas::new(5, 5);
        canvas.begin_path();
        canvas.move_to(-50.0, -50.0);
        canvas.line_to(50.0, -50.0);
        canvas.line_to(-50.0, 50.0);
        canvas.close_path();
        canvas.fill();
        canvas.stroke();
        assert!(canvas.cell(0, 0).is_some());
        assert!(canvas.cell(5, 0).is_none());
    }

    #[test]
    fn test_huge_stroke_is_clipped_to_grid() {
        let mut canvas = CellCanvas::new(10, 5);
        canvas.begin_path();
        canvas.move_to(-1e12, -1e12);
        canvas.line_to(1e12, 1e12);
        canvas.stroke();
        assert_eq!(canvas.cell(2, 1).unwrap().glyph, STROKE_GLYPH);

        canvas.begin_path();
        canvas.move_to(-1e12, 40.0);
        canvas.line_to(1e12, 40.0);
        canvas.stroke();
        assert_eq!(canvas.cell(0, 4).unwrap(), Cell::BLANK);
    }

    #[test]
    fn test_clip_segment() {
        let (a, b) =
            clip_segment(Point2::new(-5.0, 2.0), Point2::new(15.0, 2.0), 10.0, 4.0).unwrap();
        assert_eq!((a, b), (Point2::new(0.0, 2.0), Point2::new(10.0, 2.0)));
        assert!(clip_segment(Point2::new(-5.0, 8.0), Point2::new(15.0, 8.0), 10.0, 4.0).is_none());
    }

    #[test]
    fn test_renders_canonical_solid() {
        let canvas = CellCanvas::new(60, 30);
        let config = RenderConfig::default().with_size(100.0);
        let mut renderer = SolidRenderer::new(canvas, config).unwrap();
        renderer.render();

        let canvas = renderer.surface();
        assert!(filled_cells(canvas, Color::YELLOW) > 0);
        assert_eq!(filled_cells(canvas, Color::RED), 0);

        let mut out = Vec::new();
        canvas.draw(&mut out).unwrap();
        assert!(!out.is_empty());
    }
}
