//! Scene graph for arbor.
//!
//! - [`Transform`] affine transform values
//! - [`SceneGraph`] / [`SceneNode`] hierarchy, world transform propagation
//!   and hierarchical drawing
//! - [`Camera`] perspective fly camera
//! - [`Light`] light component carried by nodes

mod draw;
mod error;

pub mod camera;
pub mod graph;
pub mod light;
pub mod node;
pub mod transform;

pub use camera::{Camera, Perspective};
pub use error::{SceneError, SceneResult};
pub use graph::SceneGraph;
pub use light::Light;
pub use node::{Drawable, NodeId, SceneNode, WorldState};
pub use transform::Transform;
