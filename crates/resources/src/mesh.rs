//! Parametric mesh generators.
//!
//! Every generator produces a triangle list centred on the origin with
//! counter-clockwise winding seen from outside and unit normals. Flat
//! surfaces get their own vertices per face so normals stay sharp.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::error::{ResourceError, ResourceResult};
use crate::vertex::Vertex;

/// Upper bound on any segment, stack or spike count. Keeps vertex indices
/// of the largest grid well inside `u32`.
pub const MAX_SEGMENTS: u32 = 4096;

/// Indexed triangle mesh in object space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Debug name, also used as the upload label
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Axis-aligned box with full extents `width` x `height` x `depth`.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> ResourceResult<Self> {
        positive("cuboid", "width", width)?;
        positive("cuboid", "height", height)?;
        positive("cuboid", "depth", depth)?;

        let half = Vec3::new(width, height, depth) * 0.5;
        // (normal, u, v) with u x v == normal
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        let mut mesh = Self::new("cuboid");
        for (normal, u, v) in faces {
            let base = mesh.next_index();
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                mesh.push_vertex((normal + u * su + v * sv) * half, normal);
            }
            mesh.push_quad(base, base + 1, base + 2, base + 3);
        }
        Ok(mesh)
    }

    /// Cube with edge length `size`.
    pub fn cube(size: f32) -> ResourceResult<Self> {
        let mut mesh = Self::cuboid(size, size, size).map_err(|err| rename(err, "cube"))?;
        mesh.name = "cube".to_string();
        Ok(mesh)
    }

    /// UV sphere. `slices` run around the Y axis, `stacks` from pole to pole.
    pub fn sphere(radius: f32, slices: u32, stacks: u32) -> ResourceResult<Self> {
        positive("sphere", "radius", radius)?;
        segment_count("sphere", "slices", slices, 3)?;
        segment_count("sphere", "stacks", stacks, 2)?;

        let mut mesh = Self::new("sphere");
        for i in 0..=stacks {
            let phi = PI * i as f32 / stacks as f32;
            for j in 0..=slices {
                let theta = TAU * j as f32 / slices as f32;
                let normal = Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos());
                mesh.push_vertex(normal * radius, normal);
            }
        }

        let row = slices + 1;
        for i in 0..stacks {
            for j in 0..slices {
                let a = i * row + j;
                let b = a + row;
                let c = b + 1;
                let d = a + 1;
                // Skip the triangles that collapse onto a pole.
                if i != stacks - 1 {
                    mesh.indices.extend_from_slice(&[a, b, c]);
                }
                if i != 0 {
                    mesh.indices.extend_from_slice(&[a, c, d]);
                }
            }
        }
        Ok(mesh)
    }

    /// Torus in the XZ plane. `radius` is the ring radius, `tube` the
    /// cross-section radius.
    pub fn torus(
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    ) -> ResourceResult<Self> {
        positive("torus", "radius", radius)?;
        positive("torus", "tube", tube)?;
        segment_count("torus", "radial_segments", radial_segments, 3)?;
        segment_count("torus", "tubular_segments", tubular_segments, 3)?;

        let mut mesh = Self::new("torus");
        for i in 0..=radial_segments {
            let u = TAU * i as f32 / radial_segments as f32;
            for j in 0..=tubular_segments {
                let v = TAU * j as f32 / tubular_segments as f32;
                let normal = Vec3::new(v.cos() * u.cos(), v.sin(), v.cos() * u.sin());
                let center = Vec3::new(radius * u.cos(), 0.0, radius * u.sin());
                mesh.push_vertex(center + normal * tube, normal);
            }
        }

        let row = tubular_segments + 1;
        for i in 0..radial_segments {
            for j in 0..tubular_segments {
                let a = i * row + j;
                let b = a + row;
                mesh.push_quad(a, a + 1, b + 1, b);
            }
        }
        Ok(mesh)
    }

    /// Cylinder along Y from `-height / 2` to `height / 2`.
    pub fn cylinder(
        radius: f32,
        height: f32,
        segments: u32,
        cap_top: bool,
        cap_bottom: bool,
    ) -> ResourceResult<Self> {
        positive("cylinder", "radius", radius)?;
        positive("cylinder", "height", height)?;
        segment_count("cylinder", "segments", segments, 3)?;

        let half = height * 0.5;
        let mut mesh = Self::new("cylinder");

        let base = mesh.next_index();
        for j in 0..=segments {
            let normal = ring_direction(j, segments);
            mesh.push_vertex(normal * radius - Vec3::Y * half, normal);
            mesh.push_vertex(normal * radius + Vec3::Y * half, normal);
        }
        for j in 0..segments {
            let bottom = base + 2 * j;
            let top = bottom + 1;
            mesh.push_quad(bottom, bottom + 2, top + 2, top);
        }

        if cap_top {
            mesh.push_cap(radius, half, segments, Vec3::Y);
        }
        if cap_bottom {
            mesh.push_cap(radius, -half, segments, Vec3::NEG_Y);
        }
        Ok(mesh)
    }

    /// Cone with its apex at `height / 2` and base at `-height / 2`.
    pub fn cone(radius: f32, height: f32, segments: u32, capped: bool) -> ResourceResult<Self> {
        positive("cone", "radius", radius)?;
        positive("cone", "height", height)?;
        segment_count("cone", "segments", segments, 3)?;

        let half = height * 0.5;
        let apex = Vec3::Y * half;
        let slope_normal = |direction: Vec3| (direction * height + Vec3::Y * radius).normalize();

        let mut mesh = Self::new("cone");
        for j in 0..segments {
            let d0 = ring_direction(j, segments);
            let d1 = ring_direction(j + 1, segments);
            let mid = ring_direction_at((j as f32 + 0.5) / segments as f32);

            let base = mesh.next_index();
            mesh.push_vertex(d0 * radius - Vec3::Y * half, slope_normal(d0));
            mesh.push_vertex(d1 * radius - Vec3::Y * half, slope_normal(d1));
            mesh.push_vertex(apex, slope_normal(mid));
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        }

        if capped {
            mesh.push_cap(radius, -half, segments, Vec3::NEG_Y);
        }
        Ok(mesh)
    }

    /// Extruded star with `spikes` points in the XY plane, `thickness`
    /// along Z. The first spike points up (+Y).
    pub fn star(spikes: u32, outer: f32, inner: f32, thickness: f32) -> ResourceResult<Self> {
        segment_count("star", "spikes", spikes, 2)?;
        positive("star", "inner", inner)?;
        positive("star", "thickness", thickness)?;
        if !(outer > inner) {
            return Err(ResourceError::InvalidMeshParameters {
                mesh: "star",
                reason: format!("outer ({outer}) must be larger than inner ({inner})"),
            });
        }

        let step = TAU / spikes as f32;
        let point = |angle: f32, distance: f32| Vec3::new(angle.cos(), angle.sin(), 0.0) * distance;
        let outer_point = |i: u32| point(PI / 2.0 + i as f32 * step, outer);
        let inner_point = |i: u32| point(PI / 2.0 + i as f32 * step + step / 2.0, inner);

        let front = Vec3::Z * thickness * 0.5;
        let back = -front;

        let mut mesh = Self::new("star");
        for i in 0..spikes {
            let tip = outer_point(i);
            let next_inner = inner_point(i);
            let prev_inner = inner_point((i + spikes - 1) % spikes);
            for apex in [front, back] {
                mesh.push_flat_triangle(apex, tip, next_inner);
                mesh.push_flat_triangle(apex, prev_inner, tip);
            }
        }
        Ok(mesh)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as `(min, max)`, `None` for an empty mesh.
    pub fn aabb(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), &p| (min.min(p), max.max(p))),
        )
    }

    /// Vertices in the interleaved upload layout.
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(&position, &normal)| Vertex::new(position, normal))
            .collect()
    }

    fn next_index(&self) -> u32 {
        self.positions.len() as u32
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) {
        self.positions.push(position);
        self.normals.push(normal);
    }

    fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    /// Triangle with its own vertices, wound so the normal faces away from
    /// the origin.
    fn push_flat_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let mut normal = (b - a).cross(c - a).normalize_or_zero();
        let (b, c) = if normal.dot(a + b + c) < 0.0 {
            normal = -normal;
            (c, b)
        } else {
            (b, c)
        };

        let base = self.next_index();
        for position in [a, b, c] {
            self.push_vertex(position, normal);
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Disc at height `y` facing `normal` (+Y or -Y).
    fn push_cap(&mut self, radius: f32, y: f32, segments: u32, normal: Vec3) {
        let center = self.next_index();
        self.push_vertex(Vec3::Y * y, normal);
        for j in 0..=segments {
            self.push_vertex(ring_direction(j, segments) * radius + Vec3::Y * y, normal);
        }
        for j in 0..segments {
            let current = center + 1 + j;
            if normal.y > 0.0 {
                self.indices.extend_from_slice(&[center, current, current + 1]);
            } else {
                self.indices.extend_from_slice(&[center, current + 1, current]);
            }
        }
    }
}

/// Unit direction in the XZ plane for ring step `j` of `segments`.
/// Step 0 points along +Z and increasing steps turn towards +X.
fn ring_direction(j: u32, segments: u32) -> Vec3 {
    ring_direction_at(j as f32 / segments as f32)
}

fn ring_direction_at(fraction: f32) -> Vec3 {
    let theta = TAU * fraction;
    Vec3::new(theta.sin(), 0.0, theta.cos())
}

fn positive(mesh: &'static str, name: &str, value: f32) -> ResourceResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ResourceError::InvalidMeshParameters {
            mesh,
            reason: format!("{name} must be positive and finite, got {value}"),
        })
    }
}

fn segment_count(mesh: &'static str, name: &str, value: u32, min: u32) -> ResourceResult<()> {
    if (min..=MAX_SEGMENTS).contains(&value) {
        Ok(())
    } else {
        Err(ResourceError::InvalidMeshParameters {
            mesh,
            reason: format!("{name} must be in {min}..={MAX_SEGMENTS}, got {value}"),
        })
    }
}

fn rename(err: ResourceError, mesh: &'static str) -> ResourceError {
    match err {
        ResourceError::InvalidMeshParameters { reason, .. } => {
            ResourceError::InvalidMeshParameters { mesh, reason }
        }
    }
}
