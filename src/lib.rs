//!
//! Library for describing vector path drawables whose control points can be
//! expressed relative to named anchor points, and for storing those drawables
//! in an editable attributed value tree
//!
#![warn(bare_trait_objects)]

pub mod geometry;
pub mod fill;
pub mod relative;
pub mod tree;
pub mod drawable;

pub use self::geometry::*;
pub use self::fill::*;
pub use self::relative::*;
pub use self::tree::*;
pub use self::drawable::*;
