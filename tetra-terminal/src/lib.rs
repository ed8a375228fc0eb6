/// Terminal host for the tetrahedron renderer
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use tetra_core::{Axis, ConfigError, DragTracker, DrawingSurface, RenderConfig, SolidRenderer};
use thiserror::Error;

pub mod canvas;

pub use canvas::{Cell, CellCanvas};

/// Rotation per key press, in radians
const KEY_STEP: f64 = 0.1;
/// Approximate width of a terminal cell in pixels, used to scale drag speed
const CELL_PIXELS: f64 = 8.0;
/// Fraction of the shorter canvas side the solid's projection should span
const FIT_FRACTION: f64 = 0.4;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Output scale that makes the canonical solid fill about
/// [`FIT_FRACTION`] of a `width` × `height` logical canvas.
pub fn fit_output_scale(config: &RenderConfig, width: f64, height: f64) -> f64 {
    // Canonical vertices lie within about 0.707 of the origin.
    let projected_radius =
        0.707 * config.geometry_scale * config.field_of_view / config.viewer_distance;
    (width.min(height) * FIT_FRACTION / projected_radius).max(1.0)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    renderer: SolidRenderer<CellCanvas>,
    drag: DragTracker,
    running: bool,
}

impl TerminalApp {
    /// Build an app sized to the current terminal.
    ///
    /// The configured `size` is in canvas pixels and means nothing on a cell
    /// grid, so the output scale is always fitted to the terminal instead.
    pub fn new(config: RenderConfig) -> Result<Self, AppError> {
        let (cols, rows) = terminal::size()?;
        Self::with_size(config, cols as usize, rows as usize)
    }

    pub fn with_size(config: RenderConfig, cols: usize, rows: usize) -> Result<Self, AppError> {
        let canvas = CellCanvas::new(cols, rows);
        let size = fit_output_scale(&config, canvas.width(), canvas.height());
        let config = config.with_size(size);
        let drag = DragTracker::new(config.drag_sensitivity * CELL_PIXELS);
        log::info!("terminal canvas {cols}x{rows}, output scale {:.1}", config.size);

        Ok(Self {
            renderer: SolidRenderer::new(canvas, config)?,
            drag,
            running: true,
        })
    }

    pub fn renderer(&self) -> &SolidRenderer<CellCanvas> {
        &self.renderer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let result = self.main_loop();

        // Cleanup
        execute!(stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        self.renderer.render();
        self.present()?;

        while self.running {
            if self.handle_event(event::read()?) {
                self.present()?;
            }
        }
        Ok(())
    }

    /// Apply one input event. Returns whether the canvas was repainted.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(cols, rows) => {
                self.resize(cols as usize, rows as usize);
                true
            }
            _ => false,
        }
    }

    /// Resize the grid, refit the output scale and repaint
    fn resize(&mut self, cols: usize, rows: usize) {
        let canvas = self.renderer.surface_mut();
        canvas.resize(cols, rows);
        let (width, height) = (canvas.width(), canvas.height());
        let size = fit_output_scale(self.renderer.config(), width, height);
        if let Err(err) = self.renderer.set_output_scale(size) {
            log::warn!("keeping output scale after resize to {cols}x{rows}: {err}");
        }
        self.renderer.render();
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) -> bool {
        if kind == KeyEventKind::Release {
            return false;
        }
        let (axis, theta) = match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                return false;
            }
            KeyCode::Char('w') | KeyCode::Up => (Axis::X, -KEY_STEP),
            KeyCode::Char('s') | KeyCode::Down => (Axis::X, KEY_STEP),
            KeyCode::Char('a') | KeyCode::Left => (Axis::Y, -KEY_STEP),
            KeyCode::Char('d') | KeyCode::Right => (Axis::Y, KEY_STEP),
            _ => return false,
        };
        self.renderer.rotate(axis, theta);
        self.renderer.render();
        true
    }

    fn handle_mouse(&mut self, MouseEvent { kind, column, row, .. }: MouseEvent) -> bool {
        // Drag in logical canvas units so both axes turn at the same rate.
        let x = column as f64;
        let y = row as f64 * 2.0;
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag.press(x, y);
                false
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag.release();
                false
            }
            MouseEventKind::Drag(MouseButton::Left) => match self.drag.move_to(x, y) {
                Some(delta) => {
                    self.renderer.apply_drag(delta);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.surface().draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print("Tetra | Drag=Rotate WASD/Arrows=Rotate Q=Quit"),
            ResetColor
        )?;

        stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app() -> TerminalApp {
        TerminalApp::with_size(RenderConfig::default(), 60, 30).unwrap()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_fit_scale_fills_fraction_of_canvas() {
        let config = RenderConfig::default();
        let size = fit_output_scale(&config, 60.0, 60.0);
        let radius = 0.707 * 100.0 * std::f64::consts::PI / 1000.0 * size;
        assert!((radius - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_rotates_solid() {
        let mut app = app();
        let before = *app.renderer().solid().vertices();

        assert!(!app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10)));
        assert!(app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 14, 10)));
        assert_ne!(&before, app.renderer().solid().vertices());

        assert!(!app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 14, 10)));
        assert!(!app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 20, 12)));
    }

    #[test]
    fn test_keys_rotate_and_quit() {
        let mut app = app();
        assert!(app.handle_event(Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE))));
        assert!(app.is_running());
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!app.handle_event(Event::Key(quit)));
        assert!(!app.is_running());
    }

    #[test]
    fn test_resize_repaints_new_grid() {
        let mut app = app();
        assert!(app.handle_event(Event::Resize(40, 20)));
        assert_eq!(app.renderer().surface().cols(), 40);
        assert_eq!(app.renderer().surface().rows(), 20);
    }

    #[test]
    fn test_resize_refits_output_scale() {
        let mut app = app();
        let before = app.renderer().config().size;
        app.handle_event(Event::Resize(120, 50));

        let expected = fit_output_scale(&RenderConfig::default(), 120.0, 100.0);
        assert_eq!(app.renderer().config().size, expected);
        assert!(app.renderer().config().size > before);
    }

    #[test]
    fn test_example_config_renders_visible_outline() {
        let config = RenderConfig::from_toml_str(include_str!("../../tetra.example.toml")).unwrap();
        let mut app = TerminalApp::with_size(config, 80, 24).unwrap();
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)));

        let canvas = app.renderer().surface();
        let cells: Vec<Cell> = (0..canvas.rows())
            .flat_map(|row| (0..canvas.cols()).map(move |col| (col, row)))
            .filter_map(|(col, row)| canvas.cell(col, row))
            .collect();
        let filled = cells.iter().filter(|cell| cell.color.is_some()).count();
        let outline = cells.iter().filter(|cell| cell.glyph == '#').count();
        let blank = cells.iter().filter(|cell| **cell == Cell::BLANK).count();

        assert!(filled > 0);
        assert!(outline > 0);
        assert!(blank > cells.len() / 2, "{blank} of {} cells blank", cells.len());
    }

    #[test]
    fn test_example_config_parses() {
        let config = RenderConfig::from_toml_str(include_str!("../../tetra.example.toml")).unwrap();
        assert_eq!(config, RenderConfig::default());
    }
}
