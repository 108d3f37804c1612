//! Application state and the per-frame driver.
//!
//! Input never touches the scene directly. It is queued as [`Intent`]s and
//! applied at the start of the next [`AppState::advance`], which then runs
//! the frame in a fixed order:
//!
//! 1. apply queued intents
//! 2. compute world transforms from the root
//! 3. activate the camera
//! 4. draw the root

use std::collections::VecDeque;

use arbor_renderer::{FrameStats, RenderBackend};
use arbor_scene::{Camera, NodeId, SceneGraph, SceneResult, Transform};
use glam::Vec3;
use tracing::{debug, warn};

/// A deferred change to the scene or camera.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    /// Fly the camera. Rates are per second and scaled by the frame delta.
    Fly {
        /// Camera-space velocity
        velocity: Vec3,
        pitch_rate: f32,
        yaw_rate: f32,
    },
    /// Compose `delta` onto a node's local transform.
    Nudge { node: NodeId, delta: Transform },
    /// The output surface changed size.
    Resize { width: u32, height: u32 },
    /// Move a node under a new parent.
    Reparent { child: NodeId, parent: NodeId },
}

pub struct AppState {
    graph: SceneGraph,
    camera: Camera,
    root: NodeId,
    intents: VecDeque<Intent>,
    frame: u64,
}

impl AppState {
    pub fn new(graph: SceneGraph, camera: Camera, root: NodeId) -> Self {
        Self {
            graph,
            camera,
            root,
            intents: VecDeque::new(),
            frame: 0,
        }
    }

    /// Queue an intent for the next frame.
    pub fn push(&mut self, intent: Intent) {
        self.intents.push_back(intent);
    }

    pub fn extend(&mut self, intents: impl IntoIterator<Item = Intent>) {
        self.intents.extend(intents);
    }

    pub fn pending(&self) -> usize {
        self.intents.len()
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run one frame with a time step of `dt` seconds.
    pub fn advance(&mut self, dt: f32, backend: &mut dyn RenderBackend) -> SceneResult<FrameStats> {
        self.apply_intents(dt);
        self.graph
            .compute_world_transform(self.root, &Transform::IDENTITY)?;
        self.camera.activate(backend)?;
        let stats = self.graph.draw(self.root, backend)?;
        self.frame += 1;
        Ok(stats)
    }

    /// Drain the queue in order. An intent that cannot be applied (unknown
    /// node, cycle, degenerate size) is logged and dropped.
    fn apply_intents(&mut self, dt: f32) {
        while let Some(intent) = self.intents.pop_front() {
            let result = match &intent {
                Intent::Fly {
                    velocity,
                    pitch_rate,
                    yaw_rate,
                } => {
                    self.camera
                        .update(*velocity * dt, pitch_rate * dt, yaw_rate * dt);
                    Ok(())
                }
                Intent::Nudge { node, delta } => self.graph.update(*node, delta),
                Intent::Resize { width, height } => {
                    self.camera.set_aspect(*width as f32 / *height as f32)
                }
                Intent::Reparent { child, parent } => self.graph.reparent(*child, *parent),
            };
            match result {
                Ok(()) => debug!(?intent, "applied intent"),
                Err(err) => warn!(?intent, %err, "dropped intent"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab;
    use arbor_renderer::{RecordingBackend, RenderCommand, UniformBlock};
    use arbor_resources::ubo::CameraUbo;
    use arbor_scene::SceneNode;

    fn state(backend: &mut RecordingBackend) -> AppState {
        let scene = lab::build(backend).unwrap();
        let camera = Camera::perspective(45.0, 4.0 / 3.0, 0.1, 100.0)
            .unwrap()
            .look_at(lab::EYE, lab::TARGET, Vec3::Y)
            .unwrap();
        AppState::new(scene.graph, camera, scene.world)
    }

    #[test]
    fn test_frame_order() {
        let mut backend = RecordingBackend::new();
        let mut app = state(&mut backend);
        backend.clear_commands();

        app.advance(0.016, &mut backend).unwrap();

        let commands = backend.commands();
        assert!(matches!(
            commands[0],
            RenderCommand::WriteUniform { block: UniformBlock::Camera, .. }
        ));
        assert!(matches!(
            commands[1],
            RenderCommand::WriteUniform { block: UniformBlock::Lights, .. }
        ));
        assert!(matches!(commands.last(), Some(RenderCommand::Draw { .. })));
        assert_eq!(app.frame(), 1);
    }

    #[test]
    fn test_nudge_applies_before_compute() {
        let mut backend = RecordingBackend::new();
        let mut app = state(&mut backend);
        let robot = app.graph().find_by_name("robot").unwrap();

        app.push(Intent::Nudge {
            node: robot,
            delta: Transform::from_translation(Vec3::X),
        });
        app.advance(0.016, &mut backend).unwrap();

        let hat = app.graph().find_by_name("robot hat").unwrap();
        let position = app.graph().world_transform(hat).unwrap().translation();
        assert!((position - Vec3::new(3.0, 1.0, 10.0)).length() < 1e-5);
        assert_eq!(app.pending(), 0);
    }

    #[test]
    fn test_unknown_node_is_dropped() {
        let mut backend = RecordingBackend::new();
        let mut app = state(&mut backend);
        let mut elsewhere = SceneGraph::new();
        let stranger = elsewhere.add_node(SceneNode::new("stranger"));

        app.push(Intent::Nudge {
            node: stranger,
            delta: Transform::IDENTITY,
        });

        assert!(app.advance(0.016, &mut backend).is_ok());
        assert_eq!(app.pending(), 0);
    }

    #[test]
    fn test_fly_scales_by_dt() {
        let mut backend = RecordingBackend::new();
        let mut app = state(&mut backend);
        let before = app.camera().eye_position();
        let forward = app.camera().forward();

        app.push(Intent::Fly {
            velocity: Vec3::new(0.0, 0.0, -2.0),
            pitch_rate: 0.0,
            yaw_rate: 0.0,
        });
        app.advance(0.5, &mut backend).unwrap();

        let moved = app.camera().eye_position() - before;
        assert!((moved - forward).length() < 1e-4);
        let ubo: CameraUbo = backend.last_uniform(UniformBlock::Camera).unwrap();
        assert!((ubo.camera_position - app.camera().eye_position()).length() < 1e-5);
    }

    #[test]
    fn test_resize_and_bad_resize() {
        let mut backend = RecordingBackend::new();
        let mut app = state(&mut backend);

        app.extend([
            Intent::Resize {
                width: 1600,
                height: 800,
            },
            Intent::Resize {
                width: 1600,
                height: 0,
            },
        ]);
        app.advance(0.016, &mut backend).unwrap();

        assert_eq!(app.camera().params().aspect, 2.0);
    }

    #[test]
    fn test_reparent_intent() {
        let mut backend = RecordingBackend::new();
        let mut app = state(&mut backend);
        let hat = app.graph().find_by_name("robot hat").unwrap();
        let sun = app.graph().find_by_name("sun").unwrap();

        app.push(Intent::Reparent { child: hat, parent: sun });
        app.advance(0.016, &mut backend).unwrap();

        assert_eq!(app.graph().parent(hat).unwrap(), Some(sun));
    }
}
