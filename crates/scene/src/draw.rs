//! Hierarchical draw traversal.
//!
//! Drawing a subtree takes two pre-order passes over it:
//!
//! 1. A light pass that checks every node's world transform is current and
//!    gathers light components into a single [`LightsUbo`], written before
//!    any geometry.
//! 2. A geometry pass that applies each drawable's material with the
//!    node's world transform and issues the mesh's draw call.
//!
//! Nodes are visited parents first, children in insertion order.

use arbor_renderer::{ApplyMaterial, FrameStats, RenderBackend, RenderError, UniformBlock};
use arbor_resources::ubo::{LightsUbo, MAX_LIGHTS};
use tracing::{error, trace, warn};

use crate::error::{SceneError, SceneResult};
use crate::graph::SceneGraph;
use crate::node::{NodeId, WorldState};

/// Pre-order walk carrying whether any ancestor is stale.
fn walk<F>(graph: &SceneGraph, root: NodeId, mut visit: F) -> SceneResult<()>
where
    F: FnMut(NodeId, bool) -> SceneResult<()>,
{
    let parent_stale = match graph.parent(root)? {
        Some(parent) => graph.is_stale(parent)?,
        None => false,
    };
    let mut stack = vec![(root, parent_stale)];
    while let Some((id, parent_stale)) = stack.pop() {
        let node = graph.node(id)?;
        let stale = parent_stale || node.world_state() == WorldState::NotComputed;
        visit(id, stale)?;
        stack.extend(node.children().iter().rev().map(|&child| (child, stale)));
    }
    Ok(())
}

impl SceneGraph {
    /// Draw the subtree rooted at `root`.
    ///
    /// Every world transform in the subtree must have been computed since
    /// the last change. In debug builds a stale node fails the call with
    /// `WorldTransformNotComputed` before anything is written to the
    /// backend; release builds log it and draw with the cached value.
    ///
    /// Uniform blocks the bound shader does not declare are reported once
    /// per block and skipped; drawing continues.
    pub fn draw(&self, root: NodeId, backend: &mut dyn RenderBackend) -> SceneResult<FrameStats> {
        let mut stats = FrameStats::default();
        let mut lights = LightsUbo::default();

        walk(self, root, |id, stale| {
            let node = self.node(id)?;
            stats.nodes_visited += 1;
            if stale {
                stats.stale_nodes += 1;
                if cfg!(debug_assertions) {
                    return Err(SceneError::WorldTransformNotComputed {
                        name: node.name().to_string(),
                        index: id.index(),
                    });
                }
                error!(node = node.name(), "drawing with stale world transform");
            }
            if let Some(light) = node.light() {
                if lights.push(light.to_ubo(&node.cached_world())) {
                    stats.lights += 1;
                } else {
                    stats.lights_dropped += 1;
                }
            }
            Ok(())
        })?;

        if stats.lights_dropped > 0 {
            warn!(
                dropped = stats.lights_dropped,
                max = MAX_LIGHTS,
                "too many lights in scene, extra lights ignored"
            );
        }

        let mut reported = Vec::new();
        let mut report = |err: RenderError, stats: &mut FrameStats| -> SceneResult<()> {
            match err {
                RenderError::ShaderUniformMissing(block) => {
                    stats.uniform_warnings += 1;
                    if !reported.contains(&block) {
                        warn!(%block, "uniform block not declared by shader");
                        reported.push(block);
                    }
                    Ok(())
                }
                other => Err(SceneError::Render(other)),
            }
        };

        if let Err(err) = backend.write_uniform(UniformBlock::Lights, bytemuck::bytes_of(&lights)) {
            report(err, &mut stats)?;
        }

        walk(self, root, |id, _| {
            let node = self.node(id)?;
            let Some(drawable) = node.drawable_component() else {
                return Ok(());
            };
            let world = node.cached_world();
            if let Err(errors) = drawable.material.apply(backend, world.as_mat4()) {
                for err in errors {
                    report(err, &mut stats)?;
                }
            }
            drawable.mesh.draw_primitive(backend)?;
            stats.draw_calls += 1;
            trace!(node = node.name(), mesh = drawable.mesh.label(), "drew node");
            Ok(())
        })?;

        Ok(stats)
    }
}
