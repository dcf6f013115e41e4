//! Gravity Golf entry point
//!
//! Web: mounts the level named by the URL hash and remounts on hash changes.
//! Native: plays one headless shot straight at the hole and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

const LEVELS: &str = include_str!("../levels/levels.json");

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use gravity_golf::Scene;
    use gravity_golf::platform::web::mount;
    use gravity_golf::sim::Level;
    use gravity_golf::Tuning;

    thread_local! {
        static CURRENT: RefCell<Option<Rc<RefCell<Scene>>>> = const { RefCell::new(None) };
    }

    /// `#/level/3` -> 3; anything else is level 1
    fn level_from_hash(hash: &str) -> u32 {
        hash.trim_start_matches('#')
            .strip_prefix("/level/")
            .and_then(|id| id.parse().ok())
            .unwrap_or(1)
    }

    fn show(levels: &[Level], id: u32) -> Result<(), JsValue> {
        CURRENT.with(|current| {
            if let Some(old) = current.borrow_mut().take() {
                old.borrow_mut().destroy();
            }
        });

        let Some(level) = levels.iter().find(|l| l.id == id).cloned() else {
            log::info!("No level {}, showing level index", id);
            return Ok(());
        };

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let scene = mount(canvas, level, levels.len() as u32, Tuning::load())?;
        {
            let mut s = scene.borrow_mut();
            let document = document.clone();
            let update = move |attractive: usize, repulsive: usize| {
                if let Some(el) = document.get_element_by_id("gravity-count") {
                    el.set_text_content(Some(&attractive.to_string()));
                }
                if let Some(el) = document.get_element_by_id("antigravity-count") {
                    el.set_text_content(Some(&repulsive.to_string()));
                }
            };
            let counts = s.force_counts();
            update(counts.attractive, counts.repulsive);
            s.on_force_count(move |c| update(c.attractive, c.repulsive));
        }
        CURRENT.with(|current| *current.borrow_mut() = Some(scene));
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&format!("Failed to init logger: {}", e)))?;

        log::info!("Gravity Golf starting...");

        let levels = Rc::new(
            Level::pack_from_json(super::LEVELS).map_err(|e| JsValue::from_str(&e.to_string()))?,
        );
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let hash = window.location().hash().unwrap_or_default();
        show(&levels, level_from_hash(&hash))?;

        // The router lives as long as the page
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hash = web_sys::window()
                .and_then(|w| w.location().hash().ok())
                .unwrap_or_default();
            if let Err(e) = show(&levels, level_from_hash(&hash)) {
                log::error!("Could not show level: {:?}", e);
            }
        });
        window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
        closure.forget();

        log::info!("Gravity Golf running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gravity Golf (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    if let Err(e) = headless::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::path::Path;

    use glam::Vec2;

    use gravity_golf::Tuning;
    use gravity_golf::input::PointerInput;
    use gravity_golf::platform::Registrations;
    use gravity_golf::platform::headless::{ManualScheduler, RecordingNavigator, RecordingSurface};
    use gravity_golf::scene::{Host, Scene, Status};
    use gravity_golf::sim::Level;

    const SURFACE: Vec2 = Vec2::new(1280.0, 720.0);
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 30;

    /// `gravity-golf [level-id] [tuning.json]`
    pub fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let levels = Level::pack_from_json(super::LEVELS)?;
        let id: u32 = match args.first() {
            Some(arg) => arg.parse()?,
            None => 1,
        };
        let tuning = Tuning::load_from(args.get(1).map(Path::new))?;
        let level = levels
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| format!("no level {}", id))?;

        let frames = ManualScheduler::new();
        let nav = RecordingNavigator::new();
        let host = Host {
            surface: Box::new(RecordingSurface::new(SURFACE, 1.0)),
            scheduler: Box::new(frames.probe()),
            navigator: Box::new(nav.probe()),
        };
        let mut scene = Scene::new(level, levels.len() as u32, tuning, host, Registrations::new());

        // Click behind the ball, on the far side from the hole, at full power
        let max_distance = scene.tuning().max_distance;
        let world = scene.world();
        let aim = (world.hole.pos() - world.ball.pos).normalize_or_zero();
        let ball = world.ball.pos;
        let click = Vec2::new(
            SURFACE.x / 2.0 + ball.x - aim.x * max_distance,
            SURFACE.y / 2.0 - ball.y + aim.y * max_distance,
        );
        scene.pointer_down(PointerInput::primary(click.x, click.y));
        scene.pointer_up(PointerInput::primary(click.x, click.y));

        let mut frame = 0;
        while frame < MAX_FRAMES && frames.take() {
            scene.frame(frame as f64 * FRAME_MS);
            frame += 1;
        }

        let ball = scene.world().ball;
        match scene.status() {
            Status::Won => log::info!(
                "Level {} holed in {} frames, next: {:?}",
                scene.level().id,
                frame,
                nav.routes()
            ),
            _ => log::info!(
                "Level {} not holed after {} frames; ball at ({:.1}, {:.1}) speed {:.1}",
                scene.level().id,
                frame,
                ball.pos.x,
                ball.pos.y,
                ball.speed()
            ),
        }
        scene.destroy();
        Ok(())
    }
}
