pub mod render_context;
pub mod drawable_path;

pub use self::render_context::*;
pub use self::drawable_path::*;
