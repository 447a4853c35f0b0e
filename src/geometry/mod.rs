pub mod point;
pub mod rect;
pub mod stroke;
pub mod path;

pub use self::point::*;
pub use self::rect::*;
pub use self::stroke::*;
pub use self::path::*;
