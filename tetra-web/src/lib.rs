/// Tetra Web - canvas host for the tetrahedron renderer
///
/// Paints through a `CanvasRenderingContext2d` and rotates the solid from
/// mouse and touch drags.

mod console;

use std::cell::RefCell;
use std::rc::Rc;

use tetra_core::{Color, DragDelta, DragTracker, DrawingSurface, RenderConfig, SolidRenderer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, TouchEvent};

/// Output scale used by the browser build
const CANVAS_OUTPUT_SCALE: f64 = 500.0;

/// [`DrawingSurface`] over a 2D canvas context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { context, canvas })
    }
}

impl DrawingSurface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn save(&mut self) {
        self.context.save();
    }

    fn restore(&mut self) {
        self.context.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        if let Err(err) = self.context.translate(x, y) {
            log::warn!("canvas translate failed: {:?}", err);
        }
    }

    fn begin_path(&mut self) {
        self.context.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn set_fill_color(&mut self, color: Color) {
        self.context.set_fill_style_str(color.css_name());
    }

    fn fill(&mut self) {
        self.context.fill();
    }

    fn stroke(&mut self) {
        self.context.stroke();
    }
}

type SharedRenderer = Rc<RefCell<SolidRenderer<CanvasSurface>>>;
type SharedDrag = Rc<RefCell<DragTracker>>;

/// Handle returned to JavaScript after mounting on a canvas
#[wasm_bindgen]
pub struct WebViewer {
    renderer: SharedRenderer,
}

#[wasm_bindgen]
impl WebViewer {
    /// Repaint the canvas
    pub fn render(&self) {
        self.renderer.borrow_mut().render();
    }

    /// Turn `yaw` radians about Y, then `pitch` radians about X, and repaint
    pub fn rotate(&self, yaw: f64, pitch: f64) {
        self.renderer.borrow_mut().apply_drag(DragDelta { yaw, pitch });
    }
}

/// Size the canvas with id `canvas_id`, wire pointer input and draw the
/// first frame.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Result<WebViewer, JsValue> {
    console_error_panic_hook::set_once();
    console::init(log::LevelFilter::Info);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id}")))?
        .dyn_into::<HtmlCanvasElement>()?;

    // Square canvas, half the window wide
    let side = (window.inner_width()?.as_f64().unwrap_or(800.0) / 2.0).max(1.0) as u32;
    canvas.set_width(side);
    canvas.set_height(side);

    let config = RenderConfig::default().with_size(CANVAS_OUTPUT_SCALE);
    let drag = Rc::new(RefCell::new(DragTracker::new(config.drag_sensitivity)));
    let surface = CanvasSurface::new(canvas.clone())?;
    let renderer = SolidRenderer::new(surface, config)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let renderer = Rc::new(RefCell::new(renderer));

    attach_mouse(&canvas, &renderer, &drag)?;
    attach_touch(&canvas, &renderer, &drag)?;

    renderer.borrow_mut().render();
    log::info!("mounted on canvas {canvas_id} ({side}x{side})");
    Ok(WebViewer { renderer })
}

fn listen(
    canvas: &HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // The listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn client_point(event: &MouseEvent) -> (f64, f64) {
    (event.client_x() as f64, event.client_y() as f64)
}

/// Position of the first active touch, if any
fn touch_point(event: &TouchEvent) -> Option<(f64, f64)> {
    let touch = event.touches().get(0)?;
    Some((touch.client_x() as f64, touch.client_y() as f64))
}

fn drag_to(renderer: &SharedRenderer, drag: &SharedDrag, x: f64, y: f64) {
    if let Some(delta) = drag.borrow_mut().move_to(x, y) {
        renderer.borrow_mut().apply_drag(delta);
    }
}

fn attach_mouse(
    canvas: &HtmlCanvasElement,
    renderer: &SharedRenderer,
    drag: &SharedDrag,
) -> Result<(), JsValue> {
    let press = drag.clone();
    listen(canvas, "mousedown", move |event| {
        if let Some((x, y)) = event.dyn_ref::<MouseEvent>().map(client_point) {
            press.borrow_mut().press(x, y);
        }
    })?;

    for name in ["mouseup", "mouseleave"] {
        let release = drag.clone();
        listen(canvas, name, move |_| release.borrow_mut().release())?;
    }

    let (renderer, drag) = (renderer.clone(), drag.clone());
    listen(canvas, "mousemove", move |event| {
        if let Some((x, y)) = event.dyn_ref::<MouseEvent>().map(client_point) {
            drag_to(&renderer, &drag, x, y);
        }
    })
}

fn attach_touch(
    canvas: &HtmlCanvasElement,
    renderer: &SharedRenderer,
    drag: &SharedDrag,
) -> Result<(), JsValue> {
    let press = drag.clone();
    listen(canvas, "touchstart", move |event| {
        if let Some((x, y)) = event.dyn_ref::<TouchEvent>().and_then(touch_point) {
            press.borrow_mut().press(x, y);
        }
    })?;

    let release = drag.clone();
    listen(canvas, "touchend", move |_| release.borrow_mut().release())?;

    let (renderer, drag) = (renderer.clone(), drag.clone());
    listen(canvas, "touchmove", move |event| {
        if let Some((x, y)) = event.dyn_ref::<TouchEvent>().and_then(touch_point) {
            drag_to(&renderer, &drag, x, y);
        }
    })
}
