pub mod class;
pub mod colour;
pub mod format;
pub mod thinning;

pub use class::{CLASS_MAP, ClassInfo, SemanticClass};
