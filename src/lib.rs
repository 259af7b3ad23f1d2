pub mod config;
pub mod encode;
pub mod err;
pub mod highlight;
pub mod logging;
pub mod model;
pub mod render;

pub use err::{RenderError, Result};
pub use model::{Diff, Model, Object, ObjectData, OpKind, Opcode};
pub use render::Render;
