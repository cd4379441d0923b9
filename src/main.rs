//! Hopscotch fountain demo.
//!
//! Runs the engine headless: a fountain of balls arcs out of the middle of
//! the world, bounces off four platforms and falls off the bottom edge while
//! a frog drifts under joystick control. Frames are drawn to an in-memory
//! canvas and summarized in the log.
//!
//! # Main Loop
//!
//! The [`FrameScheduler`] worker owns the registry. This thread plays the
//! part of the input producer: it feeds joystick and button events into the
//! scheduler's queue, then stops the worker and shuts the services down.
//!
//! # Running
//!
//! ```text
//! hopscotch --seconds 10 --seed 7
//! RUST_LOG=debug hopscotch --config ./hopscotch.ini
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use hopscotch::components::behavior::FnBehavior;
use hopscotch::components::body::Body;
use hopscotch::entity::{EntityBuilder, EntityId};
use hopscotch::events::input::{Button, InputEvent, JoystickAxes};
use hopscotch::level::{Level, SolidColorScene};
use hopscotch::registry::Registry;
use hopscotch::resources::audio::{AudioPlayer, SilentBackend};
use hopscotch::resources::gameconfig::EngineConfig;
use hopscotch::resources::imagestore::{ImageStore, PlaceholderLoader};
use hopscotch::resources::random::Rand;
use hopscotch::resources::rendertarget::HeadlessSurface;
use hopscotch::resources::services::Services;
use hopscotch::scheduler::{FrameScheduler, FrameTiming};

const WIDTH: f32 = 1600.0;
const HEIGHT: f32 = 900.0;
const PLATFORM_WIDTH: f32 = 100.0;
const PLATFORM_HEIGHT: f32 = 25.0;
const PLATFORMS: [(f32, f32); 4] = [(300.0, 200.0), (500.0, 800.0), (1000.0, 400.0), (1300.0, 600.0)];
const FROG_SPEED: f32 = 300.0;

/// Hopscotch 2D engine demo
#[derive(Parser)]
#[command(version, about = "Headless fountain demo for the Hopscotch 2D engine.")]
struct Cli {
    /// INI file with [world], [timing] and [assets] sections.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// How long to run before stopping.
    #[arg(long, default_value_t = 5.0)]
    seconds: f32,

    /// Seed for reproducible ball launches.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Default)]
struct FountainLevel {
    frog: Option<EntityId>,
    floor: Option<EntityId>,
}

impl FountainLevel {
    fn launch(&self, registry: &mut Registry, size: f32, image: &str) {
        let dx = registry.rand().between(-150, 150) as f32;
        let dy = registry.rand().between(-300, -100) as f32;
        let floor = self.floor;
        let ball = EntityBuilder::sprite("", WIDTH / 2.0, HEIGHT / 2.0, size, size, image)
            .with_body(|b| b.feeling_gravity().dying_offscreen().with_velocity(dx, dy))
            .behavior(FnBehavior::new().when_collided(move |registry, _me, other| {
                if Some(other) != floor {
                    registry.play_sound("frog_croak");
                }
            }));
        registry.add(ball);
    }
}

impl Level for FountainLevel {
    fn setup(&mut self, registry: &mut Registry) {
        registry.set_world_size(WIDTH, HEIGHT);
        match SolidColorScene::from_hex("#20c0ff") {
            Ok(scene) => registry.set_scene(scene),
            Err(e) => log::warn!("background color rejected: {e}"),
        }

        for (i, (x, y)) in PLATFORMS.iter().enumerate() {
            let platform = EntityBuilder::sprite(
                format!("platform{i}"),
                *x,
                *y,
                PLATFORM_WIDTH,
                PLATFORM_HEIGHT,
                "button_castle_blaster",
            )
            .with_body(|b| b.solid().bouncy());
            registry.add(platform);
        }

        self.frog = Some(registry.add(EntityBuilder::sprite(
            "frog",
            WIDTH / 4.0,
            HEIGHT / 4.0,
            60.0,
            60.0,
            "frog",
        )));

        self.floor = Some(registry.add(
            EntityBuilder::sprite("floor", 0.0, HEIGHT - 10.0, WIDTH, 10.0, "button_castle_blaster")
                .with_body(Body::solid),
        ));
        log::info!("fountain level ready with {} entities", registry.len());
    }

    fn update(&mut self, registry: &mut Registry, _dt: f32) {
        if registry.rand().once_every(1.0) {
            self.launch(registry, 40.0, "pink_ball");
            registry.play_sound("bloop");
        }
        let stick = registry.joystick();
        if let Some(frog) = self.frog
            && let Some(body) = registry.body_mut(frog)
        {
            body.set_velocity(stick.right_x * FROG_SPEED, stick.right_y * FROG_SPEED);
        }
    }

    fn on_button_down(&mut self, registry: &mut Registry, button: Button) {
        match button {
            Button::R1 => self.launch(registry, 60.0, "prince_headshot"),
            Button::A => self.launch(registry, 60.0, "frogger_car"),
            _ => {}
        }
    }
}

fn load_config(cli: &Cli) -> EngineConfig {
    match &cli.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => {
            let mut config = EngineConfig::new();
            config.load_from_file().ok(); // ignore errors, use defaults
            config
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli);
    log::info!("Hello! This is the Hopscotch engine.");

    // --------------- Services ---------------
    let audio = match AudioPlayer::start(Box::new(SilentBackend)) {
        Ok(audio) => Some(audio),
        Err(e) => {
            log::warn!("running without audio: {e}");
            None
        }
    };
    let rand = cli.seed.map(Rand::with_seed).unwrap_or_default();
    let services = Services::new(ImageStore::new(Box::new(PlaceholderLoader)), audio, rand);

    let mut registry = Registry::from_config(&config, services);
    registry.set_level(FountainLevel::default());

    // --------------- Worker ---------------
    let surface = HeadlessSurface::new(config.world_width / 2.0, config.world_height / 2.0, 1);
    let presented = surface.presented();
    let scheduler = match FrameScheduler::start(
        registry,
        Box::new(surface),
        FrameTiming::from_config(&config),
    ) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // --------------- Input producer ---------------
    let input = scheduler.sender();
    let started = Instant::now();
    let run_for = Duration::from_secs_f32(cli.seconds.max(0.0));
    let mut tick: u32 = 0;
    while started.elapsed() < run_for {
        let t = started.elapsed().as_secs_f32();
        let axes = JoystickAxes {
            right_x: t.sin(),
            right_y: (t * 0.5).cos() * 0.25,
            ..Default::default()
        };
        let _ = input.send(InputEvent::Joystick(axes));
        if tick % 20 == 0 {
            let button = if tick % 40 == 0 { Button::R1 } else { Button::A };
            let _ = input.send(InputEvent::ButtonDown(button));
            let _ = input.send(InputEvent::ButtonUp(button));
        }
        tick += 1;
        thread::sleep(Duration::from_millis(50));
    }

    // --------------- Shutdown ---------------
    let mut registry = match scheduler.stop() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let last_frame_calls = presented
        .lock()
        .map(|frames| frames.last().map_or(0, Vec::len))
        .unwrap_or(0);
    log::info!(
        "ran {} frames ({:.1}s simulated), {} entities alive, {} draw calls in the last frame",
        registry.time().frame_count,
        registry.time().elapsed,
        registry.len(),
        last_frame_calls
    );
    registry.shutdown();
}
