/// Shared text format markers for the OFF and OBJ writers.

/// Header of an uncoloured OFF mesh.
pub const OFF_HEADER: &str = "OFF";

/// Header of a per-vertex coloured OFF point cloud.
pub const COFF_HEADER: &str = "COFF";

/// Material library shared by every class mesh.
pub const MATERIAL_LIBRARY: &str = "./3dfier.mtl";

/// Every class mesh starts with this record.
pub fn mtllib_record() -> String {
    format!("mtllib {}", MATERIAL_LIBRARY)
}
