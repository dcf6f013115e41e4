//! Scene: one level attempt
//!
//! Owns the world, the gesture state machine and every host resource. The
//! host drives it from a single thread: `frame` once per refresh, the
//! pointer/key handlers once per event, never concurrently.

use glam::Vec2;

use crate::input::{Gesture, PointerButton, PointerInput};
use crate::platform::{Cursor, FrameScheduler, Navigator, Registrations, Route, Surface};
use crate::renderer;
use crate::settings::Tuning;
use crate::sim::{
    Force, ForceCounts, FrameClock, Level, Phase, Polarity, TickOutcome, Viewport, World,
    split_hypotenuse, tick,
};

/// Callback for force-count changes
pub type ForceObserver = Box<dyn FnMut(ForceCounts)>;

/// Host services a scene is built on
pub struct Host {
    pub surface: Box<dyn Surface>,
    pub scheduler: Box<dyn FrameScheduler>,
    pub navigator: Box<dyn Navigator>,
}

/// Scene lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Ball holed; simulation stopped
    Won,
    /// Torn down; nothing may run
    Destroyed,
}

pub struct Scene {
    level: Level,
    level_count: u32,
    tuning: Tuning,
    world: World,
    gesture: Option<Gesture>,
    clock: FrameClock,
    cursor: Cursor,
    status: Status,
    surface: Box<dyn Surface>,
    scheduler: Box<dyn FrameScheduler>,
    navigator: Box<dyn Navigator>,
    listeners: Registrations,
    observers: Vec<ForceObserver>,
}

impl Scene {
    /// Build the scene for `level` and request the first frame
    ///
    /// `listeners` are the host subscriptions feeding this scene; they are
    /// released together by [`Scene::destroy`].
    pub fn new(level: Level, level_count: u32, tuning: Tuning, host: Host, listeners: Registrations) -> Self {
        log::info!(
            "Scene for level {} of {} ({} walls, {} forces)",
            level.id,
            level_count,
            level.walls.len(),
            level.forces.len()
        );
        let world = World::from_level(&level);
        let mut scene = Self {
            level,
            level_count,
            tuning,
            world,
            gesture: None,
            clock: FrameClock::default(),
            cursor: Cursor::Default,
            status: Status::Running,
            surface: host.surface,
            scheduler: host.scheduler,
            navigator: host.navigator,
            listeners,
            observers: Vec::new(),
        };
        scene.clear();
        scene.scheduler.request();
        scene
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn force_counts(&self) -> ForceCounts {
        self.world.force_counts()
    }

    /// Subscribe to force-count changes
    pub fn on_force_count(&mut self, observer: impl FnMut(ForceCounts) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Authoring snapshot: the level with the forces currently placed
    pub fn data(&self) -> Level {
        Level {
            forces: self.world.forces.clone(),
            ..self.level.clone()
        }
    }

    /// Take ownership of host subscriptions made after construction
    pub fn attach_listeners(&mut self, mut listeners: Registrations) {
        if self.status == Status::Destroyed {
            listeners.release_all();
            return;
        }
        self.listeners.append(&mut listeners);
    }

    /// Ball back to its spawn; placed forces stay
    ///
    /// A won scene that is still mounted (navigation failed) starts running
    /// again.
    pub fn reset(&mut self) {
        self.world.reset_ball(&self.level);
        log::info!("Ball reset (level {})", self.level.id);
        if self.status == Status::Won {
            self.status = Status::Running;
            self.clock = FrameClock::default();
            self.scheduler.request();
        }
    }

    /// Ball and forces back to the level defaults
    pub fn clear(&mut self) {
        self.world.clear(&self.level);
        log::info!("Level {} cleared", self.level.id);
        self.notify_force_count();
    }

    /// Release every listener and cancel the pending frame
    ///
    /// Idempotent. After this returns no callback reaches the scene.
    pub fn destroy(&mut self) {
        if self.status == Status::Destroyed {
            return;
        }
        self.listeners.release_all();
        self.scheduler.cancel();
        self.observers.clear();
        self.gesture = None;
        self.status = Status::Destroyed;
        log::info!("Scene for level {} destroyed", self.level.id);
    }

    /// Host surface changed size
    pub fn resize(&mut self) {
        self.surface.fit();
        log::debug!("Surface resized to {}", self.surface.size());
    }

    /// One refresh: step, draw, re-arm
    pub fn frame(&mut self, now_ms: f64) {
        if self.status != Status::Running {
            return;
        }

        let delta = self.clock.delta(now_ms);
        let outcome = tick(&mut self.world, self.surface.size(), &self.tuning, delta);
        renderer::draw(&self.world, self.surface.as_mut(), self.tuning.force_radius);

        if outcome == TickOutcome::Holed {
            self.win();
            return;
        }
        self.scheduler.request();
    }

    pub fn pointer_down(&mut self, input: PointerInput) {
        let viewport = self.viewport();
        let pos = viewport.pointer_to_surface(input.pos);
        let force = self.world.force_at(&viewport, pos, self.tuning.force_radius);
        self.gesture = Some(Gesture::new(pos, input.button, force));
    }

    pub fn pointer_move(&mut self, input: PointerInput) {
        let viewport = self.viewport();
        let pos = viewport.pointer_to_surface(input.pos);

        // Released off the surface: the press never saw its pointer-up
        if self.gesture.is_some_and(|g| !input.holds(g.button)) {
            self.gesture = None;
        }

        if let Some(gesture) = self.gesture.as_mut() {
            if gesture.button == PointerButton::Primary {
                let step = Viewport::screen_delta_to_world(gesture.advance(pos));
                match gesture.force.and_then(|i| self.world.forces.get_mut(i)) {
                    Some(force) => {
                        force.x += step.x;
                        force.y += step.y;
                    }
                    None => self.world.center += step,
                }
            }
        }

        // Hover affordance uses the post-move layout
        let viewport = self.viewport();
        let cursor = match self.world.force_at(&viewport, pos, self.tuning.force_radius) {
            Some(_) => Cursor::Grab,
            None => Cursor::Default,
        };
        if cursor != self.cursor {
            self.cursor = cursor;
            self.surface.set_cursor(cursor);
        }
    }

    pub fn pointer_up(&mut self, input: PointerInput) {
        // Gesture state is dropped on every release, whatever the phase
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        if self.world.phase() == Phase::Moving {
            return;
        }

        let pos = self.viewport().pointer_to_surface(input.pos);
        if !gesture.is_click(pos) {
            return;
        }
        match (gesture.button, gesture.force) {
            (PointerButton::Primary, _) => self.shoot(pos),
            (PointerButton::Secondary, Some(index)) => self.remove_force(index),
            _ => {}
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if self.tuning.is_reset_key(key) {
            self.reset();
        }
    }

    /// Place a force at a surface position given in CSS pixels
    pub fn add_force(&mut self, surface_pos: Vec2, direction: Polarity) {
        let viewport = self.viewport();
        let world = viewport.to_world(viewport.pointer_to_surface(surface_pos));
        self.world.forces.push(Force::new(world, direction));
        log::info!("Force {:?} added at ({:.1}, {:.1})", direction, world.x, world.y);
        self.notify_force_count();
    }

    fn remove_force(&mut self, index: usize) {
        if index >= self.world.forces.len() {
            return;
        }
        let removed = self.world.forces.remove(index);
        log::info!("Force {:?} removed at ({:.1}, {:.1})", removed.direction, removed.x, removed.y);
        self.notify_force_count();
    }

    /// Launch away from the click, power scaled by its distance to the ball
    fn shoot(&mut self, pointer: Vec2) {
        let ball = self.viewport().to_screen(self.world.ball.pos);
        let distance = ball.distance(pointer);
        if distance <= 0.0 {
            log::debug!("Shot ignored: click on ball centre");
            return;
        }
        let speed = self.tuning.launch_speed(distance);
        self.world.ball.vel = split_hypotenuse(pointer, ball, distance, speed);
        self.world.hit = true;
        log::info!("Shot at speed {:.1} (pull-back {:.1}px)", speed, distance);
    }

    fn win(&mut self) {
        self.status = Status::Won;
        let route = Route::after_win(self.level.id, self.level_count);
        log::info!("Level {} complete, going to {}", self.level.id, route);
        if let Err(e) = self.navigator.navigate(route) {
            log::error!("Navigation after win failed: {}", e);
            self.navigator.alert("Something went wrong loading the next level.");
        }
    }

    fn notify_force_count(&mut self) {
        let counts = self.world.force_counts();
        log::debug!("Forces: {} attractive, {} repulsive", counts.attractive, counts.repulsive);
        for observer in &mut self.observers {
            observer(counts);
        }
    }

    fn viewport(&self) -> Viewport {
        self.world.viewport(self.surface.size(), self.surface.pixel_ratio())
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{
        CountingRegistration, ManualScheduler, RecordingNavigator, RecordingSurface, SurfaceProbe,
    };
    use crate::sim::{BallSpawn, Hole};
    use std::cell::RefCell;
    use std::rc::Rc;

    const SIZE: Vec2 = Vec2::new(800.0, 600.0);

    struct Harness {
        scene: Scene,
        frames: ManualScheduler,
        nav: RecordingNavigator,
        listener: CountingRegistration,
        surface: SurfaceProbe,
        counts: Rc<RefCell<Vec<ForceCounts>>>,
    }

    impl Harness {
        fn with(level: Level, level_count: u32, pixel_ratio: f32, nav: RecordingNavigator) -> Self {
            let surface = RecordingSurface::new(SIZE, pixel_ratio);
            let surface_probe = surface.probe();
            let frames = ManualScheduler::new();
            let listener = CountingRegistration::new();
            let mut listeners = Registrations::new();
            listeners.push(listener.probe());
            let host = Host {
                surface: Box::new(surface),
                scheduler: Box::new(frames.probe()),
                navigator: Box::new(nav.probe()),
            };
            let mut scene = Scene::new(level, level_count, Tuning::default(), host, listeners);
            let counts = Rc::new(RefCell::new(Vec::new()));
            let sink = counts.clone();
            scene.on_force_count(move |c| sink.borrow_mut().push(c));
            Self {
                scene,
                frames,
                nav,
                listener,
                surface: surface_probe,
                counts,
            }
        }

        fn new(level: Level) -> Self {
            Self::with(level, 3, 1.0, RecordingNavigator::new())
        }

        /// Run pending frames 16 ms apart, up to `limit`
        fn pump(&mut self, start_ms: f64, limit: usize) -> usize {
            let mut ran = 0;
            let mut now = start_ms;
            while ran < limit && self.frames.take() {
                self.scene.frame(now);
                now += 16.0;
                ran += 1;
            }
            ran
        }

        fn last_counts(&self) -> Option<ForceCounts> {
            self.counts.borrow().last().copied()
        }
    }

    /// Ball at world (-200, 0) -> surface (200, 300) on an 800x600 surface
    fn level() -> Level {
        Level {
            id: 1,
            ball: BallSpawn { x: -200.0, y: 0.0, radius: 10.0 },
            hole: Hole { x: 200.0, y: 0.0, radius: 25.0 },
            walls: Vec::new(),
            stars: Vec::new(),
            forces: vec![
                Force::new(Vec2::new(0.0, 150.0), Polarity::Attract),
                Force::new(Vec2::new(0.0, -150.0), Polarity::Attract),
                Force::new(Vec2::new(100.0, 200.0), Polarity::Repel),
            ],
        }
    }

    fn click(scene: &mut Scene, input: PointerInput) {
        scene.pointer_down(input);
        scene.pointer_up(input);
    }

    #[test]
    fn test_new_requests_first_frame() {
        let h = Harness::new(level());
        assert!(h.frames.is_pending());
        assert_eq!(h.scene.status(), Status::Running);
        assert!(!h.scene.world().hit);
    }

    #[test]
    fn test_frames_reschedule_and_render() {
        let mut h = Harness::new(level());
        assert_eq!(h.pump(0.0, 5), 5);
        assert!(h.frames.is_pending());
        assert!(!h.surface.ops().is_empty());
    }

    #[test]
    fn test_setup_ball_stays_put() {
        let mut h = Harness::new(level());
        h.pump(0.0, 10);
        assert_eq!(h.scene.world().ball.pos, Vec2::new(-200.0, 0.0));
    }

    #[test]
    fn test_full_pull_back_gives_max_velocity() {
        let mut h = Harness::new(level());
        let t = Tuning::default();
        click(&mut h.scene, PointerInput::primary(200.0 - t.max_distance, 300.0));
        let ball = h.scene.world().ball;
        assert!(h.scene.world().hit);
        assert!((ball.vel.x - t.max_velocity).abs() < 1e-3);
        assert!(ball.vel.y.abs() < 1e-3);
    }

    #[test]
    fn test_beyond_max_distance_is_capped() {
        let mut h = Harness::new(level());
        let t = Tuning::default();
        click(&mut h.scene, PointerInput::primary(200.0, 300.0 + t.max_distance * 1.5));
        let ball = h.scene.world().ball;
        assert!((ball.speed() - t.max_velocity).abs() < 1e-2);
        // Clicked below the ball: it flies up the screen
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_half_pull_back_gives_half_velocity() {
        let mut h = Harness::new(level());
        let t = Tuning::default();
        click(&mut h.scene, PointerInput::primary(200.0 - t.max_distance / 2.0, 300.0));
        assert!((h.scene.world().ball.speed() - t.max_velocity / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_pointer_scaled_by_pixel_ratio() {
        let mut h = Harness::with(level(), 3, 2.0, RecordingNavigator::new());
        let t = Tuning::default();
        // CSS (50, 150) -> device (100, 300): 100 px left of the ball
        click(&mut h.scene, PointerInput::primary(50.0, 150.0));
        let expected = t.launch_speed(100.0);
        assert!((h.scene.world().ball.vel.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_click_on_ball_centre_does_nothing() {
        let mut h = Harness::new(level());
        click(&mut h.scene, PointerInput::primary(200.0, 300.0));
        assert!(!h.scene.world().hit);
    }

    #[test]
    fn test_drag_pans_instead_of_shooting() {
        let mut h = Harness::new(level());
        h.scene.pointer_down(PointerInput::primary(100.0, 100.0));
        h.scene.pointer_move(PointerInput::primary(130.0, 90.0));
        h.scene.pointer_up(PointerInput::primary(130.0, 90.0));
        assert!(!h.scene.world().hit);
        assert_eq!(h.scene.world().center, Vec2::new(30.0, 10.0));
        assert!(h.scene.gesture().is_none());
    }

    #[test]
    fn test_drag_and_return_is_not_a_click() {
        let mut h = Harness::new(level());
        h.scene.pointer_down(PointerInput::primary(100.0, 100.0));
        h.scene.pointer_move(PointerInput::primary(140.0, 100.0));
        h.scene.pointer_move(PointerInput::primary(100.0, 100.0));
        h.scene.pointer_up(PointerInput::primary(100.0, 100.0));
        // Returned to the press point: counts as a click, pan undone
        assert!(h.scene.world().hit);
        assert_eq!(h.scene.world().center, Vec2::ZERO);
    }

    #[test]
    fn test_drag_moves_force() {
        let mut h = Harness::new(level());
        // Force 0 at world (0, 150) -> surface (400, 150)
        h.scene.pointer_down(PointerInput::primary(405.0, 150.0));
        h.scene.pointer_move(PointerInput::primary(425.0, 170.0));
        h.scene.pointer_up(PointerInput::primary(425.0, 170.0));
        let force = h.scene.world().forces[0];
        assert_eq!(force.pos(), Vec2::new(20.0, 130.0));
        assert_eq!(h.scene.world().center, Vec2::ZERO);
        assert!(!h.scene.world().hit);
    }

    #[test]
    fn test_move_without_button_only_hovers() {
        let mut h = Harness::new(level());
        h.scene.pointer_move(PointerInput::hover(400.0, 150.0));
        assert_eq!(h.scene.cursor(), Cursor::Grab);
        assert_eq!(h.surface.cursor(), Cursor::Grab);
        h.scene.pointer_move(PointerInput::hover(10.0, 10.0));
        assert_eq!(h.surface.cursor(), Cursor::Default);
        assert_eq!(h.scene.world().center, Vec2::ZERO);
    }

    #[test]
    fn test_release_off_surface_drops_gesture() {
        let mut h = Harness::new(level());
        h.scene.pointer_down(PointerInput::primary(100.0, 100.0));
        // No pointer-up: the button came up outside the surface
        h.scene.pointer_move(PointerInput::hover(150.0, 100.0));
        h.scene.pointer_move(PointerInput::hover(300.0, 100.0));
        assert_eq!(h.scene.world().center, Vec2::ZERO);
        assert!(h.scene.gesture().is_none());

        // Same for a grabbed force: it stays where it was
        h.scene.pointer_down(PointerInput::primary(400.0, 150.0));
        h.scene.pointer_move(PointerInput::hover(450.0, 150.0));
        assert_eq!(h.scene.world().forces[0].pos(), Vec2::new(0.0, 150.0));

        // A later release does not shoot
        h.scene.pointer_up(PointerInput::primary(450.0, 150.0));
        assert!(!h.scene.world().hit);
    }

    #[test]
    fn test_secondary_drag_does_not_pan() {
        let mut h = Harness::new(level());
        h.scene.pointer_down(PointerInput::secondary(100.0, 100.0));
        h.scene.pointer_move(PointerInput::secondary(150.0, 100.0));
        assert_eq!(h.scene.world().center, Vec2::ZERO);
    }

    #[test]
    fn test_force_counts_notifications() {
        let mut h = Harness::new(level());
        assert_eq!(h.scene.force_counts(), ForceCounts { attractive: 2, repulsive: 1 });

        // Repulsive force at world (100, 200) -> surface (500, 100)
        click(&mut h.scene, PointerInput::secondary(500.0, 100.0));
        assert_eq!(h.last_counts(), Some(ForceCounts { attractive: 2, repulsive: 0 }));

        h.scene.add_force(Vec2::new(600.0, 500.0), Polarity::Attract);
        assert_eq!(h.last_counts(), Some(ForceCounts { attractive: 3, repulsive: 0 }));
        assert_eq!(h.scene.world().forces[2].pos(), Vec2::new(200.0, -200.0));
    }

    #[test]
    fn test_secondary_click_on_empty_space() {
        let mut h = Harness::new(level());
        click(&mut h.scene, PointerInput::secondary(10.0, 10.0));
        assert_eq!(h.scene.world().forces.len(), 3);
        assert!(h.counts.borrow().is_empty());
        assert!(!h.scene.world().hit);
    }

    #[test]
    fn test_add_force_honours_pan_and_pixel_ratio() {
        let mut h = Harness::with(level(), 3, 2.0, RecordingNavigator::new());
        h.scene.pointer_down(PointerInput::primary(10.0, 10.0));
        h.scene.pointer_move(PointerInput::primary(20.0, 10.0));
        h.scene.pointer_up(PointerInput::primary(20.0, 10.0));
        assert_eq!(h.scene.world().center, Vec2::new(20.0, 0.0));
        // CSS (200, 150) -> device (400, 300) -> world (-20, 0)
        h.scene.add_force(Vec2::new(200.0, 150.0), Polarity::Repel);
        assert_eq!(h.scene.world().forces[3].pos(), Vec2::new(-20.0, 0.0));
    }

    #[test]
    fn test_motion_blocks_new_shot_and_removal() {
        let mut h = Harness::new(level());
        click(&mut h.scene, PointerInput::primary(100.0, 300.0));
        let vel = h.scene.world().ball.vel;

        click(&mut h.scene, PointerInput::primary(200.0, 100.0));
        click(&mut h.scene, PointerInput::secondary(500.0, 100.0));

        assert_eq!(h.scene.world().ball.vel, vel);
        assert_eq!(h.scene.world().forces.len(), 3);
        assert!(h.counts.borrow().is_empty());
        assert!(h.scene.gesture().is_none());
    }

    #[test]
    fn test_drag_allowed_in_motion() {
        let mut h = Harness::new(level());
        click(&mut h.scene, PointerInput::primary(100.0, 300.0));
        h.scene.pointer_down(PointerInput::primary(400.0, 150.0));
        h.scene.pointer_move(PointerInput::primary(410.0, 150.0));
        h.scene.pointer_up(PointerInput::primary(410.0, 150.0));
        assert_eq!(h.scene.world().forces[0].pos(), Vec2::new(10.0, 150.0));
    }

    #[test]
    fn test_reset_key_keeps_forces() {
        let mut h = Harness::new(level());
        h.scene.add_force(Vec2::new(10.0, 10.0), Polarity::Repel);
        click(&mut h.scene, PointerInput::primary(100.0, 300.0));
        h.pump(0.0, 5);
        assert_ne!(h.scene.world().ball.pos, Vec2::new(-200.0, 0.0));

        h.scene.key_down("R");
        assert!(!h.scene.world().hit);
        assert_eq!(h.scene.world().ball.pos, Vec2::new(-200.0, 0.0));
        assert_eq!(h.scene.world().ball.vel, Vec2::ZERO);
        assert_eq!(h.scene.world().forces.len(), 4);

        h.scene.key_down("x");
        assert_eq!(h.scene.world().forces.len(), 4);
    }

    #[test]
    fn test_clear_restores_defaults_and_notifies() {
        let mut h = Harness::new(level());
        h.scene.add_force(Vec2::new(10.0, 10.0), Polarity::Repel);
        h.scene.clear();
        assert_eq!(h.scene.world().forces, level().forces);
        assert_eq!(h.last_counts(), Some(ForceCounts { attractive: 2, repulsive: 1 }));
    }

    #[test]
    fn test_data_snapshot_has_current_forces() {
        let mut h = Harness::new(level());
        h.scene.add_force(Vec2::new(400.0, 300.0), Polarity::Attract);
        let data = h.scene.data();
        assert_eq!(data.forces.len(), 4);
        assert_eq!(data.hole, level().hole);
        assert_eq!(data.id, 1);
    }

    #[test]
    fn test_shot_into_hole_wins_and_navigates() {
        let mut h = Harness::new(level());
        // Ball 400 px left of the hole, forces out of the way
        h.scene.world.forces.clear();
        click(&mut h.scene, PointerInput::primary(0.0, 300.0));
        let ran = h.pump(0.0, 400);
        assert!(ran < 400);
        assert_eq!(h.scene.status(), Status::Won);
        assert_eq!(h.nav.routes(), vec![Route::Level(2)]);
        assert!(!h.frames.is_pending());

        let pos = h.scene.world().ball.pos;
        h.scene.frame(10_000.0);
        assert_eq!(h.scene.world().ball.pos, pos);
    }

    #[test]
    fn test_last_level_goes_to_index() {
        let mut h = Harness::with(level(), 1, 1.0, RecordingNavigator::new());
        h.scene.world.forces.clear();
        click(&mut h.scene, PointerInput::primary(0.0, 300.0));
        h.pump(0.0, 400);
        assert_eq!(h.nav.routes(), vec![Route::LevelIndex]);
    }

    #[test]
    fn test_navigation_failure_alerts() {
        let mut h = Harness::with(level(), 3, 1.0, RecordingNavigator::rejecting());
        h.scene.world.forces.clear();
        click(&mut h.scene, PointerInput::primary(0.0, 300.0));
        h.pump(0.0, 400);
        assert_eq!(h.scene.status(), Status::Won);
        assert_eq!(h.nav.alerts().len(), 1);
    }

    #[test]
    fn test_reset_after_failed_navigation_resumes() {
        let mut h = Harness::with(level(), 3, 1.0, RecordingNavigator::rejecting());
        h.scene.world.forces.clear();
        click(&mut h.scene, PointerInput::primary(0.0, 300.0));
        h.pump(0.0, 400);
        assert_eq!(h.scene.status(), Status::Won);
        assert!(!h.frames.is_pending());

        h.scene.key_down("r");
        assert_eq!(h.scene.status(), Status::Running);
        assert!(h.frames.is_pending());

        // Playable again: a second shot moves the ball
        click(&mut h.scene, PointerInput::primary(100.0, 300.0));
        h.pump(50_000.0, 5);
        assert!(h.scene.world().ball.pos.x > -200.0);
        assert!(h.frames.is_pending());
    }

    #[test]
    fn test_reset_does_not_revive_destroyed_scene() {
        let mut h = Harness::new(level());
        h.scene.destroy();
        h.scene.reset();
        assert_eq!(h.scene.status(), Status::Destroyed);
        assert!(!h.frames.is_pending());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut h = Harness::new(level());
        h.pump(0.0, 3);
        let requests = h.frames.requests();

        h.scene.destroy();
        h.scene.destroy();

        assert_eq!(h.listener.released(), 1);
        assert!(!h.frames.is_pending());
        assert_eq!(h.frames.requests(), requests);

        h.scene.frame(1_000.0);
        assert_eq!(h.frames.requests(), requests);
        assert_eq!(h.scene.status(), Status::Destroyed);
    }

    #[test]
    fn test_late_listeners_released_with_scene() {
        let mut h = Harness::new(level());
        let late = CountingRegistration::new();
        let mut batch = Registrations::new();
        batch.push(late.probe());
        h.scene.attach_listeners(batch);
        h.scene.destroy();
        assert_eq!(late.released(), 1);

        // Attaching after teardown releases straight away
        let after = CountingRegistration::new();
        let mut batch = Registrations::new();
        batch.push(after.probe());
        h.scene.attach_listeners(batch);
        assert_eq!(after.released(), 1);
    }

    #[test]
    fn test_destroy_stops_motion() {
        let mut h = Harness::new(level());
        click(&mut h.scene, PointerInput::primary(100.0, 300.0));
        h.pump(0.0, 3);
        let pos = h.scene.world().ball.pos;
        h.scene.destroy();
        h.scene.frame(2_000.0);
        assert_eq!(h.scene.world().ball.pos, pos);
    }
}
