//! Mesh format converters for Wavefront OBJ input: OFF export, semantic
//! class partitioning, per-object splitting and origin translation.
pub mod class_splitter;
pub mod cleanup;
pub mod error;
pub mod obj;
pub mod object_splitter;
pub mod off;
pub mod translate;

pub use class_splitter::{ClassPartition, split_by_class};
pub use cleanup::{
    ClassSplitPipeline, IdentityCleanup, MeshlabCleanup, SplitterOptions, VertexCleanup,
};
pub use error::{Error, Result};
pub use obj::{ObjMesh, parse_obj};
pub use off::{off_lines, write_off};
