/// The drawing-surface capability the renderer paints through
use crate::geometry::Color;

/// Minimal 2D path-drawing vocabulary.
///
/// Mirrors an HTML canvas context: coordinates are in surface pixels with y
/// growing downwards, `translate` moves the origin, and `save`/`restore`
/// push and pop that transform. Strokes use the surface's default colour.
pub trait DrawingSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn set_fill_color(&mut self, color: Color);
    fn fill(&mut self);
    fn stroke(&mut self);
}

/// One call made on a [`RecordingSurface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ClosePath,
    SetFillColor(Color),
    Fill,
    Stroke,
}

/// A surface that draws nothing and keeps a log of every call
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the log, leaving the surface ready for the next frame
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Colours in the order they were filled
    pub fn fill_colors(&self) -> Vec<Color> {
        let mut current = None;
        let mut filled = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::SetFillColor(color) => current = Some(*color),
                DrawCommand::Fill => filled.extend(current),
                _ => {}
            }
        }
        filled
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
}
