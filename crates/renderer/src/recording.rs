//! Headless backend that records every command it receives.
//!
//! Used by the headless driver and as the test double for the scene core.
//! Recorded uniform blocks can be decoded back into their `Pod` layouts.

use std::collections::BTreeSet;

use bytemuck::Pod;
use tracing::trace;

use crate::backend::{MeshId, RenderBackend, UniformBlock};
use crate::error::{RenderError, RenderResult};

/// A command received by a [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    /// A uniform block write.
    WriteUniform { block: UniformBlock, bytes: Vec<u8> },
    /// An indexed draw.
    Draw { mesh: MeshId, index_count: u32 },
}

/// Book-keeping for an uploaded mesh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshRecord {
    pub label: String,
    pub vertex_bytes: usize,
    pub index_count: usize,
}

/// Backend with no GPU behind it.
#[derive(Debug)]
pub struct RecordingBackend {
    declared: BTreeSet<UniformBlock>,
    meshes: Vec<MeshRecord>,
    commands: Vec<RenderCommand>,
}

impl RecordingBackend {
    /// Backend whose shader declares every uniform block.
    pub fn new() -> Self {
        Self {
            declared: UniformBlock::ALL.into_iter().collect(),
            meshes: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Pretend the bound shader does not declare `block`.
    pub fn without_block(mut self, block: UniformBlock) -> Self {
        self.declared.remove(&block);
        self
    }

    /// Every command since creation or the last [`clear_commands`](Self::clear_commands).
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping uploaded meshes.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Uploaded mesh records, indexed by `MeshId`.
    pub fn meshes(&self) -> &[MeshRecord] {
        &self.meshes
    }

    /// Record for a single mesh.
    pub fn mesh(&self, id: MeshId) -> Option<&MeshRecord> {
        self.meshes.get(id.0 as usize)
    }

    /// Draw commands in submission order.
    pub fn draw_calls(&self) -> impl Iterator<Item = (MeshId, u32)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Draw { mesh, index_count } => Some((*mesh, *index_count)),
            RenderCommand::WriteUniform { .. } => None,
        })
    }

    /// Raw writes to `block` in submission order.
    pub fn uniform_writes(&self, block: UniformBlock) -> impl Iterator<Item = &[u8]> + '_ {
        self.commands.iter().filter_map(move |command| match command {
            RenderCommand::WriteUniform { block: b, bytes } if *b == block => {
                Some(bytes.as_slice())
            }
            _ => None,
        })
    }

    /// Writes to `block` decoded as `T`.
    pub fn decoded_writes<T: Pod>(&self, block: UniformBlock) -> Vec<T> {
        self.uniform_writes(block)
            .filter(|bytes| bytes.len() == std::mem::size_of::<T>())
            .map(bytemuck::pod_read_unaligned)
            .collect()
    }

    /// The most recent write to `block` decoded as `T`.
    pub fn last_uniform<T: Pod>(&self, block: UniformBlock) -> Option<T> {
        self.uniform_writes(block)
            .filter(|bytes| bytes.len() == std::mem::size_of::<T>())
            .last()
            .map(bytemuck::pod_read_unaligned)
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for RecordingBackend {
    fn upload_mesh(&mut self, label: &str, vertices: &[u8], indices: &[u32]) -> MeshId {
        let id = MeshId(self.meshes.len() as u32);
        trace!(?id, label, vertex_bytes = vertices.len(), "upload mesh");
        self.meshes.push(MeshRecord {
            label: label.to_string(),
            vertex_bytes: vertices.len(),
            index_count: indices.len(),
        });
        id
    }

    fn write_uniform(&mut self, block: UniformBlock, bytes: &[u8]) -> RenderResult<()> {
        if !self.declared.contains(&block) {
            return Err(RenderError::ShaderUniformMissing(block));
        }
        if bytes.len() != block.size() {
            return Err(RenderError::UniformSize {
                block,
                expected: block.size(),
                actual: bytes.len(),
            });
        }
        self.commands.push(RenderCommand::WriteUniform {
            block,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }

    fn draw_indexed(&mut self, mesh: MeshId, index_count: u32) -> RenderResult<()> {
        if self.mesh(mesh).is_none() {
            return Err(RenderError::UnknownMesh(mesh));
        }
        trace!(?mesh, index_count, "draw");
        self.commands.push(RenderCommand::Draw { mesh, index_count });
        Ok(())
    }
}
