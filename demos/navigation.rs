//! Navigation Controller
//!
//! A robot navigation controller driven by a fixed state pool.
//!
//! Key concepts:
//! - Five states owned by value, no allocation per transition
//! - A capability trait (`NavHandler`) with default no-op handlers
//! - States requesting transitions on their own machine
//! - Resetting bookkeeping without leaving the current mode
//!
//! Run with: RUST_LOG=debug cargo run --example navigation

use tfsm::{state_pool, Context, Machine, State, UninitializedPolicy};

/// Robot pose update from odometry.
#[derive(Clone, Copy, Debug)]
struct PosChange {
    x: f32,
    y: f32,
}

/// Path planner finished.
struct PathFound {
    waypoints: usize,
}

/// Map upload finished.
struct UploadDone;

type Ctx = Context<NavStates>;

/// Events every navigation state understands, ignored unless overridden.
trait NavHandler {
    fn on_pos_change(&mut self, _event: PosChange, _ctx: &mut Ctx) {}
    fn on_path_found(&mut self, _event: PathFound, _ctx: &mut Ctx) {}
    fn on_upload_done(&mut self, _event: UploadDone, _ctx: &mut Ctx) {}
}

#[derive(Default)]
struct StPrepare {
    fixes: u32,
}

impl State<NavStates> for StPrepare {
    fn on_enter(&mut self, _ctx: &mut Ctx) {
        log::info!("prepare: waiting for a position fix");
    }

    fn reset(&mut self) {
        self.fixes = 0;
    }
}

impl NavHandler for StPrepare {
    fn on_pos_change(&mut self, event: PosChange, ctx: &mut Ctx) {
        self.fixes += 1;
        log::info!("prepare: fix {} at ({:.1}, {:.1})", self.fixes, event.x, event.y);
        if self.fixes >= 2 {
            ctx.transit::<StFindPath>();
        }
    }
}

#[derive(Default)]
struct StFindPath;

impl State<NavStates> for StFindPath {
    fn on_enter(&mut self, _ctx: &mut Ctx) {
        log::info!("find path: planning");
    }
}

impl NavHandler for StFindPath {
    fn on_path_found(&mut self, event: PathFound, ctx: &mut Ctx) {
        log::info!("find path: {} waypoints", event.waypoints);
        ctx.transit::<StNaving>();
    }
}

#[derive(Default)]
struct StNaving {
    travelled: f32,
    last: Option<PosChange>,
}

impl State<NavStates> for StNaving {
    fn on_leave(&mut self, _ctx: &mut Ctx) {
        log::info!("naving: stopped after {:.1} m", self.travelled);
    }

    fn reset(&mut self) {
        self.travelled = 0.0;
        self.last = None;
    }
}

impl NavHandler for StNaving {
    fn on_pos_change(&mut self, event: PosChange, ctx: &mut Ctx) {
        if let Some(last) = self.last {
            self.travelled += ((event.x - last.x).powi(2) + (event.y - last.y).powi(2)).sqrt();
        }
        self.last = Some(event);
        if self.travelled > 3.0 {
            ctx.transit::<StInterNav>();
        }
    }
}

#[derive(Default)]
struct StInterNav;

impl State<NavStates> for StInterNav {
    fn on_enter(&mut self, ctx: &mut Ctx) {
        log::info!("inter nav: segment complete, uploading map");
        ctx.transit::<StUploading>();
    }
}

impl NavHandler for StInterNav {}

#[derive(Default)]
struct StUploading;

impl State<NavStates> for StUploading {}

impl NavHandler for StUploading {
    fn on_upload_done(&mut self, _event: UploadDone, ctx: &mut Ctx) {
        log::info!("uploading: done");
        ctx.transit::<StPrepare>();
    }
}

state_pool! {
    struct NavStates {
        prepare: StPrepare,
        find_path: StFindPath,
        naving: StNaving,
        inter_nav: StInterNav,
        uploading: StUploading,
    }
    expose: [dyn NavHandler]
}

struct NavFsm {
    machine: Machine<NavStates>,
}

impl NavFsm {
    fn new() -> Self {
        Self {
            machine: Machine::builder()
                .name("nav")
                .on_uninitialized(UninitializedPolicy::Warn)
                .build(),
        }
    }

    fn start(&mut self) {
        self.machine.set_initial_state::<StPrepare>();
    }

    fn pos_change(&mut self, x: f32, y: f32) {
        let event = PosChange { x, y };
        self.machine
            .dispatch_as::<dyn NavHandler, _>(|state, ctx| state.on_pos_change(event, ctx));
    }

    fn path_found(&mut self, waypoints: usize) {
        self.machine
            .dispatch_as::<dyn NavHandler, _>(|state, ctx| {
                state.on_path_found(PathFound { waypoints }, ctx)
            });
    }

    fn upload_done(&mut self) {
        self.machine
            .dispatch_as::<dyn NavHandler, _>(|state, ctx| state.on_upload_done(UploadDone, ctx));
    }

    fn report(&self) {
        println!(
            "{} is in [{}]",
            self.machine.name(),
            self.machine.current_name().unwrap_or("-")
        );
    }
}

fn main() {
    env_logger::init();

    println!("=== Navigation Controller Example ===\n");

    let mut nav = NavFsm::new();

    // Odometry may arrive before the controller is started.
    nav.pos_change(0.0, 0.0);
    nav.report();

    nav.start();
    nav.pos_change(0.0, 0.0);
    nav.pos_change(0.1, 0.0);
    nav.report();

    nav.path_found(4);
    for step in 0..5 {
        nav.pos_change(step as f32, 0.0);
    }
    nav.report();

    // Restart the control cycle without leaving the current mode.
    nav.machine.reset();
    nav.report();

    nav.upload_done();
    nav.report();

    println!("\n=== Example Complete ===");
}
