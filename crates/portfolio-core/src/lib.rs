pub mod bloom;
pub mod camera;
pub mod constants;
pub mod contact;
pub mod input;
pub mod mesh;
pub mod orientation;
pub mod scene;
pub mod signal;
pub mod theme;
pub mod typing;

pub static WIREFRAME_WGSL: &str = include_str!("../shaders/wireframe.wgsl");

pub use bloom::*;
pub use camera::*;
pub use constants::*;
pub use input::*;
pub use mesh::*;
pub use orientation::*;
pub use scene::*;
pub use signal::*;
pub use theme::*;
pub use typing::*;
