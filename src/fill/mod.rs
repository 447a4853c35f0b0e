pub mod gradient;
pub mod fill_style;

pub use self::gradient::*;
pub use self::fill_style::*;
