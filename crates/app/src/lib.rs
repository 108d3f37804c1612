//! Frame driver for arbor: explicit application state, the intent queue and
//! the lab scene.

pub mod lab;
pub mod state;

pub use lab::LabScene;
pub use state::{AppState, Intent};
