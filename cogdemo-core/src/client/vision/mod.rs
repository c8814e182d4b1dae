mod model;
mod render;
mod session;

pub use model::*;
pub use render::*;
pub use session::*;
