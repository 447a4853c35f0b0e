pub mod value_tree;
pub mod undo;
pub mod image_provider;
pub mod fill_state;
pub mod path_state;
pub mod segment_state;

pub use self::value_tree::*;
pub use self::undo::*;
pub use self::image_provider::*;
pub use self::fill_state::*;
pub use self::path_state::*;
pub use self::segment_state::*;
