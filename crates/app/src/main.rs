//! arbor - headless lab scene runner
//!
//! Builds the lab scene on a recording backend and runs a scripted camera
//! fly-by for the configured number of frames.

use anyhow::Result;
use glam::Vec3;
use tracing::{debug, info};

use arbor_app::{AppState, Intent, lab};
use arbor_core::{Config, FrameClock};
use arbor_renderer::{FrameStats, RecordingBackend};
use arbor_scene::{Camera, Transform};

/// Head spin in radians per second.
const HEAD_SPIN: f32 = 1.5;
/// Fly-by speed in units per second.
const FLY_SPEED: f32 = 0.5;
/// Fly-by turn rate in radians per second.
const FLY_YAW: f32 = 0.1;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    arbor_core::init_logging(&config.log_filter);
    info!(
        width = config.viewport.width,
        height = config.viewport.height,
        frames = config.frames,
        "Starting arbor"
    );

    let mut backend = RecordingBackend::new();
    let scene = lab::build(&mut backend)?;
    let head = scene.head;
    info!(
        nodes = scene.graph.len(),
        meshes = backend.meshes().len(),
        "Lab scene ready"
    );

    let camera = Camera::perspective(
        config.camera.fov_degrees,
        config.viewport.aspect(),
        config.camera.near,
        config.camera.far,
    )?
    .look_at(lab::EYE, lab::TARGET, Vec3::Y)?;
    let mut app = AppState::new(scene.graph, camera, scene.world);

    let mut clock = FrameClock::new();
    let mut totals = FrameStats::default();
    for _ in 0..config.frames {
        let dt = clock.delta_secs();
        app.extend([
            Intent::Nudge {
                node: head,
                delta: Transform::identity().rotate_y(HEAD_SPIN * dt),
            },
            Intent::Fly {
                velocity: Vec3::new(0.0, 0.0, -FLY_SPEED),
                pitch_rate: 0.0,
                yaw_rate: FLY_YAW,
            },
        ]);

        backend.clear_commands();
        let stats = app.advance(dt, &mut backend)?;
        debug!(frame = app.frame(), commands = backend.commands().len(), "{stats}");
        totals.accumulate(&stats);
    }

    info!(
        frames = app.frame(),
        elapsed = clock.elapsed_secs(),
        eye = %app.camera().eye_position(),
        "Finished: {totals}"
    );
    Ok(())
}
