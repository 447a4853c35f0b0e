pub mod resolver;
pub mod coordinate;
pub mod point;
pub mod path;

pub use self::resolver::*;
pub use self::coordinate::*;
pub use self::point::*;
pub use self::path::*;
