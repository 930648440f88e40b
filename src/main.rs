//! 2D Mass-Spring Sandbox
//!
//! Headless runner. Loads a scene and advances it one tick per frame, the
//! same cadence the interactive front end uses. Each frame also rebuilds the
//! draw list, and diagnostics are logged periodically.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use spring_physics::{BodyId, Vector2};
use spring_renderer::{Camera, CameraRig, DrawList, DrawOptions, Viewport};
use spring_simulation::{Editor, Scene, SimulationParams, World};
use std::collections::VecDeque;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SceneKind {
    Crane,
    Scatter,
}

#[derive(Parser, Debug)]
#[command(about = "2D mass-spring sandbox")]
struct Args {
    #[arg(long, value_enum, default_value_t = SceneKind::Crane)]
    scene: SceneKind,
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Seconds per tick
    #[arg(long, default_value_t = 0.005)]
    dt: f64,
    /// Bodies in the scatter scene
    #[arg(long, default_value_t = 24)]
    count: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Log diagnostics every N frames
    #[arg(long, default_value_t = 100)]
    log_every: u64,
    /// Toggle pause at this frame
    #[arg(long)]
    pause_at: Option<u64>,
}

fn load_scene(args: &Args) -> Scene {
    match args.scene {
        SceneKind::Crane => Scene::crane(),
        SceneKind::Scatter => {
            let mut rng = StdRng::seed_from_u64(args.seed);
            Scene::scatter(&mut rng, args.count, 100.0)
        }
    }
}

struct State {
    world: World,
    editor: Editor,
    rig: CameraRig,
    draw_options: DrawOptions,
    draw_list: DrawList,
    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
    frame_counter: u64,
}

impl State {
    fn new(world: World) -> Result<Self> {
        let camera = Camera::new("main_cam", Vector2::new(100.0, 50.0), 1.0)?;
        let rig = CameraRig::single(camera, Viewport::default());
        log::info!("✓ Camera initialized");

        Ok(Self {
            world,
            editor: Editor::new(),
            rig,
            draw_options: DrawOptions::default(),
            draw_list: DrawList::default(),
            frame_times: VecDeque::with_capacity(100),
            last_frame_time: Instant::now(),
            frame_counter: 0,
        })
    }

    fn update(&mut self) -> Result<()> {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.world.tick()?;
        self.draw_list = DrawList::from_rig(&self.world, &self.editor, &self.rig, &self.draw_options)?;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > 100 {
            self.frame_times.pop_front();
        }
        self.frame_counter += 1;
        Ok(())
    }

    fn log_diagnostics(&self) {
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        let all: Vec<BodyId> = self.world.bodies().iter().map(|b| b.id()).collect();

        log::info!(
            "frame {:>5}  t = {:>7.3}s  E = {:>12.3}  (kinetic {:.3}, spring {:.3})  {:.3} ms/frame{}",
            self.frame_counter,
            self.world.elapsed(),
            self.world.total_energy(),
            self.world.kinetic_energy(),
            self.world.spring_potential_energy(),
            avg_frame_time,
            if self.world.is_paused() { "  [paused]" } else { "" },
        );
        match self.world.compute_center_of_mass(&all) {
            Ok(com) => log::debug!(
                "  center of mass {:?}, total mass {:.2}",
                com.position,
                com.total_mass
            ),
            Err(err) => log::debug!("  {}", err),
        }
        log::debug!(
            "  draw list: {} lines, {} points, {} ground bands",
            self.draw_list.lines.len(),
            self.draw_list.points.len(),
            self.draw_list.grounds.len()
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let params = SimulationParams::default().with_time_step(args.dt);
    let scene = load_scene(&args);
    let world = World::from_scene(params, &scene).context("failed to build the scene")?;
    log::info!(
        "✓ Loaded {:?} scene: {} bodies, {} links, {} grounds",
        args.scene,
        world.bodies().len(),
        world.links().len(),
        world.grounds().len()
    );

    let mut state = State::new(world)?;
    for frame in 0..args.frames {
        if args.pause_at == Some(frame) {
            state.world.toggle_pause();
            log::info!("Paused: {}", state.world.is_paused());
        }
        state.update().with_context(|| format!("frame {}", frame))?;
        if args.log_every > 0 && state.frame_counter % args.log_every == 0 {
            state.log_diagnostics();
        }
    }

    let final_energy = state.world.total_energy();
    anyhow::ensure!(
        final_energy.is_finite(),
        "simulation diverged after {} ticks",
        state.world.ticks()
    );
    log::info!("✓ Ran {} frames, final energy {:.3}", args.frames, final_energy);
    Ok(())
}
