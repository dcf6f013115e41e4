//! Browser host: Canvas 2D, requestAnimationFrame, DOM listeners
//!
//! The scene lives in an `Rc<RefCell<Scene>>`. Every callback handed to the
//! browser holds only a `Weak`, so releasing the listeners and cancelling
//! the frame is enough to let the scene drop.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent,
    Window,
};

use super::{Color, Cursor, FrameScheduler, Navigator, Registration, Registrations, Route, Surface};
use crate::error::NavigationError;
use crate::input::{PointerButton, PointerInput};
use crate::renderer::colors::css;
use crate::scene::{Host, Scene};
use crate::settings::Tuning;
use crate::sim::{ForceCounts, Level, Polarity, Rect};

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// `<canvas>` with a 2D context, backing store in device pixels
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f32,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let mut surface = Self {
            canvas,
            ctx,
            pixel_ratio: 1.0,
        };
        surface.fit();
        Ok(surface)
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn fit(&mut self) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        self.pixel_ratio = dpr as f32;
        self.canvas.set_width((self.canvas.client_width() as f64 * dpr) as u32);
        self.canvas.set_height((self.canvas.client_height() as f64 * dpr) as u32);
    }

    fn clear(&mut self, color: Color) {
        let size = self.size();
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.ctx.set_fill_style_str(&css(color));
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.ctx.set_stroke_style_str(&css(color));
            self.ctx.set_line_width(width as f64);
            self.ctx.stroke();
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill_rect(
            rect.origin.x as f64,
            rect.origin.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        let _ = self.canvas.style().set_property("cursor", cursor.as_css());
    }
}

/// requestAnimationFrame bound to one scene
pub struct RafScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
    pending: Rc<Cell<Option<i32>>>,
}

impl RafScheduler {
    pub fn new(window: Window, scene: Weak<RefCell<Scene>>) -> Self {
        let pending = Rc::new(Cell::new(None));
        let fired = pending.clone();
        let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            fired.set(None);
            if let Some(scene) = scene.upgrade() {
                scene.borrow_mut().frame(time);
            }
        });
        Self {
            window,
            callback,
            pending,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request(&mut self) {
        if self.pending.get().is_some() {
            return;
        }
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => self.pending.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

/// One DOM event listener; removed on release
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Registration for Listener {
    fn release(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Routes through `location.hash`, alerts with `window.alert`
pub struct HashNavigator {
    window: Window,
}

impl HashNavigator {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Navigator for HashNavigator {
    fn navigate(&mut self, route: Route) -> Result<(), NavigationError> {
        self.window
            .location()
            .set_hash(&route.to_string())
            .map_err(|e| NavigationError::Rejected {
                route: route.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn alert(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}

fn pointer_input(event: &Event) -> Option<PointerInput> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(PointerInput::new(
        mouse.offset_x() as f32,
        mouse.offset_y() as f32,
        PointerButton::from_dom(mouse.button()),
        mouse.buttons(),
    ))
}

/// Subscribe `handler` on `target`, forwarding to the scene while it lives
fn forward(
    target: &EventTarget,
    kind: &'static str,
    scene: &Weak<RefCell<Scene>>,
    mut handler: impl FnMut(&mut Scene, &Event) + 'static,
) -> Result<Listener, JsValue> {
    let scene = scene.clone();
    Listener::new(target, kind, move |event: Event| {
        if let Some(scene) = scene.upgrade() {
            handler(&mut scene.borrow_mut(), &event);
        }
    })
}

fn listen(canvas: &HtmlCanvasElement, scene: &Weak<RefCell<Scene>>) -> Result<Registrations, JsValue> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let mut listeners = Registrations::new();

    listeners.push(forward(&window, "resize", scene, |s, _| s.resize())?);
    listeners.push(forward(&document, "keydown", scene, |s, e| {
        if let Some(key) = e.dyn_ref::<KeyboardEvent>() {
            s.key_down(&key.key());
        }
    })?);
    listeners.push(forward(canvas, "mousedown", scene, |s, e| {
        if let Some(input) = pointer_input(e) {
            s.pointer_down(input);
        }
    })?);
    listeners.push(forward(canvas, "mousemove", scene, |s, e| {
        if let Some(input) = pointer_input(e) {
            s.pointer_move(input);
        }
    })?);
    listeners.push(forward(canvas, "mouseup", scene, |s, e| {
        if let Some(input) = pointer_input(e) {
            s.pointer_up(input);
        }
    })?);
    listeners.push(Listener::new(canvas, "contextmenu", |e: Event| e.prevent_default())?);

    Ok(listeners)
}

/// Build a scene on `canvas`, wire its listeners and start the frame loop
pub fn mount(
    canvas: HtmlCanvasElement,
    level: Level,
    level_count: u32,
    tuning: Tuning,
) -> Result<Rc<RefCell<Scene>>, JsValue> {
    let window = window()?;
    let surface = CanvasSurface::new(canvas.clone())?;

    let scene = Rc::new_cyclic(|weak: &Weak<RefCell<Scene>>| {
        let host = Host {
            surface: Box::new(surface),
            scheduler: Box::new(RafScheduler::new(window.clone(), weak.clone())),
            navigator: Box::new(HashNavigator::new(window.clone())),
        };
        RefCell::new(Scene::new(level, level_count, tuning, host, Registrations::new()))
    });

    match listen(&canvas, &Rc::downgrade(&scene)) {
        Ok(listeners) => scene.borrow_mut().attach_listeners(listeners),
        Err(e) => {
            scene.borrow_mut().destroy();
            return Err(e);
        }
    }
    Ok(scene)
}

/// Handle given to page scripts (router, palette, publish dialog)
#[wasm_bindgen]
pub struct SceneHandle {
    scene: Rc<RefCell<Scene>>,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Mount level `level_id` (1-based) from a JSON level pack
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, levels_json: &str, level_id: u32) -> Result<SceneHandle, JsValue> {
        let levels = Level::pack_from_json(levels_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let level = levels
            .iter()
            .find(|l| l.id == level_id)
            .cloned()
            .ok_or_else(|| JsValue::from_str(&format!("no level {}", level_id)))?;
        let scene = mount(canvas, level, levels.len() as u32, Tuning::load())?;
        Ok(SceneHandle { scene })
    }

    /// Palette drop: CSS position on the canvas, `direction` is 1 or -1
    #[wasm_bindgen(js_name = addForce)]
    pub fn add_force(&self, x: f32, y: f32, direction: i32) -> Result<(), JsValue> {
        let polarity =
            Polarity::try_from(direction as i64).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.scene.borrow_mut().add_force(Vec2::new(x, y), polarity);
        Ok(())
    }

    /// Calls `callback(attractive, repulsive)` on every force-count change
    ///
    /// Calls are queued as microtasks, so the callback runs once the scene
    /// is no longer borrowed and may call back into this handle.
    #[wasm_bindgen(js_name = onForceCount)]
    pub fn on_force_count(&self, callback: js_sys::Function) -> Result<(), JsValue> {
        let window = window()?;
        let mut scene = self.scene.borrow_mut();
        let counts = scene.force_counts();
        let notify = move |counts: ForceCounts| {
            let bound = callback.bind2(
                &JsValue::NULL,
                &JsValue::from(counts.attractive as u32),
                &JsValue::from(counts.repulsive as u32),
            );
            window.queue_microtask(&bound);
        };
        notify(counts);
        scene.on_force_count(notify);
        Ok(())
    }

    pub fn reset(&self) {
        self.scene.borrow_mut().reset();
    }

    pub fn clear(&self) {
        self.scene.borrow_mut().clear();
    }

    /// Authoring snapshot as JSON, rounded for publishing
    pub fn data(&self) -> Result<String, JsValue> {
        self.scene
            .borrow()
            .data()
            .rounded(crate::consts::PUBLISH_PRECISION)
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn destroy(&self) {
        self.scene.borrow_mut().destroy();
    }
}
