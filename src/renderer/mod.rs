//! Rendering module
//!
//! Scenes are composed as flat-colored triangles in surface pixels and
//! drawn through a small WebGPU pipeline. Overlay text lives in the DOM.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Hud, PAUSE_TEXT, Scene};
