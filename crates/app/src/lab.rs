//! The lab scene: a chessboard with a walled maze, a small robot, a sun and
//! a few decorations.
//!
//! ```text
//! world
//! └── board
//!     ├── tile 0,0 .. tile 7,7   (shared cube, two materials)
//!     ├── walls
//!     │   └── 9 wall segments
//!     ├── robot
//!     │   └── body ── head ── hat
//!     ├── sun                    (point light + emissive sphere)
//!     └── 4 decorations
//! ```

use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use arbor_core::Result;
use arbor_renderer::{GpuMesh, RenderBackend};
use arbor_resources::{Material, Mesh, MonochromeMaterial};
use arbor_scene::{Light, NodeId, SceneGraph, SceneNode, Transform};
use glam::{Vec3, Vec4};
use tracing::debug;

/// Where the camera starts.
pub const EYE: Vec3 = Vec3::new(0.0, 4.0, 0.0);
/// What the camera starts looking at (the board centre).
pub const TARGET: Vec3 = Vec3::new(0.0, -2.0, 10.0);

/// Board squares per side.
pub const BOARD_SIZE: usize = 8;

/// The lab scene graph and handles to the nodes the driver animates.
#[derive(Debug)]
pub struct LabScene {
    pub graph: SceneGraph,
    pub world: NodeId,
    pub board: NodeId,
    pub robot: NodeId,
    pub head: NodeId,
    pub hat: NodeId,
    pub sun: NodeId,
}

fn attach(graph: &mut SceneGraph, parent: NodeId, node: SceneNode) -> Result<NodeId> {
    let id = graph.add_node(node);
    graph.add_child(parent, id)?;
    Ok(id)
}

fn upload(backend: &mut dyn RenderBackend, mesh: Mesh) -> Rc<GpuMesh> {
    Rc::new(GpuMesh::upload(backend, &mesh))
}

fn monochrome(diffuse: Vec4, specular: Vec3) -> Rc<Material> {
    Rc::new(MonochromeMaterial::new(diffuse).with_specular(specular).into())
}

/// Build the lab scene, uploading its meshes to `backend`.
pub fn build(backend: &mut dyn RenderBackend) -> Result<LabScene> {
    let mut graph = SceneGraph::new();

    let world = graph.add_node(SceneNode::new("world"));
    let board = attach(
        &mut graph,
        world,
        SceneNode::new("board").with_local(Transform::from_translation(Vec3::new(0.0, -2.0, 10.0))),
    )?;

    add_chessboard(&mut graph, board, backend)?;

    let walls = attach(
        &mut graph,
        board,
        SceneNode::new("walls").with_local(Transform::from_translation(Vec3::Y)),
    )?;
    add_walls(&mut graph, walls, backend)?;

    let robot = attach(
        &mut graph,
        board,
        SceneNode::new("robot").with_local(Transform::from_translation(Vec3::new(2.0, 1.0, 0.0))),
    )?;
    let (head, hat) = add_robot(&mut graph, robot, backend)?;

    let sun_mesh = upload(backend, Mesh::sphere(2.0, 16, 8)?);
    let sun = attach(
        &mut graph,
        board,
        SceneNode::drawable("sun", sun_mesh, Rc::new(Material::emissive(Vec3::ONE, 1.0)))
            .with_local(Transform::from_translation(Vec3::new(0.0, 6.0, 0.0)))
            .with_light(Light::Point {
                color: Vec3::ONE,
                attenuation: 0.1,
            }),
    )?;

    add_details(&mut graph, board, backend)?;

    debug!(nodes = graph.len(), "built lab scene");
    Ok(LabScene {
        graph,
        world,
        board,
        robot,
        head,
        hat,
        sun,
    })
}

/// Black and white unit cubes, centred on the board origin.
fn add_chessboard(
    graph: &mut SceneGraph,
    board: NodeId,
    backend: &mut dyn RenderBackend,
) -> Result<()> {
    let cube = upload(backend, Mesh::cube(1.0)?);
    let white = monochrome(Vec4::ONE, Vec3::splat(0.3));
    let black = monochrome(Vec4::new(0.0, 0.0, 0.0, 1.0), Vec3::ZERO);

    let half = (BOARD_SIZE as f32 - 1.0) / 2.0;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let material = if (row + col) % 2 == 0 { &black } else { &white };
            let offset = Vec3::new(row as f32 - half, 0.0, col as f32 - half);
            attach(
                graph,
                board,
                SceneNode::drawable(format!("tile {row},{col}"), cube.clone(), material.clone())
                    .with_local(Transform::from_translation(offset)),
            )?;
        }
    }
    Ok(())
}

fn add_walls(graph: &mut SceneGraph, walls: NodeId, backend: &mut dyn RenderBackend) -> Result<()> {
    let outer = upload(backend, Mesh::cuboid(0.2, 1.0, 8.0)?);
    let short = upload(backend, Mesh::cuboid(0.2, 1.0, 3.0)?);
    let medium = upload(backend, Mesh::cuboid(0.2, 1.0, 4.0)?);
    let long = upload(backend, Mesh::cuboid(0.2, 1.0, 7.0)?);
    let red = monochrome(Vec4::new(1.0, 0.0, 0.0, 1.0), Vec3::new(0.1, 0.0, 0.0));

    // (name, mesh, position, turned a quarter about Y)
    let segments = [
        ("wall back left", &short, Vec3::new(2.5, 0.0, 4.0), true),
        ("wall back right", &medium, Vec3::new(-2.0, 0.0, 4.0), true),
        ("wall left", &outer, Vec3::new(4.0, 0.0, 0.0), false),
        ("wall right", &outer, Vec3::new(-4.0, 0.0, 0.0), false),
        ("wall front left", &medium, Vec3::new(2.0, 0.0, -4.0), true),
        ("wall front right", &short, Vec3::new(-2.5, 0.0, -4.0), true),
        ("wall inner 1", &short, Vec3::new(0.0, 0.0, -2.5), false),
        ("wall inner 2", &short, Vec3::new(-1.5, 0.0, -1.0), true),
        ("wall inner 3", &long, Vec3::new(-0.5, 0.0, 1.0), true),
    ];

    for (name, mesh, position, turned) in segments {
        let mut local = Transform::from_translation(position);
        if turned {
            local = local.rotate_y(FRAC_PI_2);
        }
        let node = SceneNode::drawable(name, Rc::clone(mesh), red.clone()).with_local(local);
        attach(graph, walls, node)?;
    }
    Ok(())
}

/// Body, head and hat chained under `robot`. Returns the head and hat.
fn add_robot(
    graph: &mut SceneGraph,
    robot: NodeId,
    backend: &mut dyn RenderBackend,
) -> Result<(NodeId, NodeId)> {
    let body_mesh = upload(backend, Mesh::cuboid(0.8, 1.0, 0.6)?);
    let head_mesh = upload(backend, Mesh::cone(0.5, 0.5, 16, false)?);
    let hat_mesh = upload(backend, Mesh::star(5, 0.4, 0.2, 0.1)?);

    let green: Rc<Material> = Rc::new(
        MonochromeMaterial::new(Vec4::new(0.5, 1.0, 0.5, 1.0))
            .with_specular(Vec3::ZERO)
            .with_emissive(Vec3::new(0.1, 0.1, 0.0))
            .with_shininess(0.0)
            .into(),
    );
    let yellow: Rc<Material> = Rc::new(
        MonochromeMaterial::new(Vec4::new(1.0, 1.0, 0.0, 1.0))
            .with_specular(Vec3::new(0.1, 0.1, 0.0))
            .with_emissive(Vec3::new(0.1, 0.1, 0.0))
            .with_shininess(0.0)
            .into(),
    );

    let body = attach(graph, robot, SceneNode::drawable("robot body", body_mesh, green.clone()))?;
    let head = attach(
        graph,
        body,
        SceneNode::drawable("robot head", head_mesh, green)
            .with_local(Transform::from_translation(Vec3::Y)),
    )?;
    let hat = attach(
        graph,
        head,
        SceneNode::drawable("robot hat", hat_mesh, yellow)
            .with_local(Transform::from_translation(Vec3::Y)),
    )?;
    Ok((head, hat))
}

/// Cylinders ringed by tori on either side of the board.
fn add_details(
    graph: &mut SceneGraph,
    board: NodeId,
    backend: &mut dyn RenderBackend,
) -> Result<()> {
    let cylinder = upload(backend, Mesh::cylinder(0.5, 1.0, 16, false, false)?);
    let torus = upload(backend, Mesh::torus(1.0, 0.5, 16, 8)?);
    let blue = monochrome(Vec4::new(0.0, 0.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 0.3));
    let yellow = monochrome(Vec4::new(1.0, 1.0, 0.0, 1.0), Vec3::new(0.3, 0.3, 0.0));

    for (side, x) in [("left", 2.25), ("right", -2.25)] {
        let placement = Transform::from_translation(Vec3::new(x, 1.0, 3.5));
        attach(
            graph,
            board,
            SceneNode::drawable(format!("cylinder {side}"), cylinder.clone(), blue.clone())
                .with_local(placement),
        )?;
        attach(
            graph,
            board,
            SceneNode::drawable(format!("torus {side}"), torus.clone(), yellow.clone())
                .with_local(placement),
        )?;
    }
    Ok(())
}
