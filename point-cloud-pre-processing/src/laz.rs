use crate::error::Result;
use las::{Header, Reader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Create LAS file reader for point cloud access.
/// Handles both .las and .laz compressed formats.
pub fn create_reader(file_path: &Path) -> Result<Reader> {
    let file = File::open(file_path)?;
    let buf_reader = BufReader::new(file);
    Ok(Reader::new(buf_reader)?)
}

/// Number of decimals that represent a coordinate stored with `scale`
/// without losing precision, e.g. 2 for a 0.01 scale factor.
pub fn scale_decimals(scale: f64) -> usize {
    if !scale.is_finite() || scale <= 0.0 {
        return 3;
    }
    (-scale.log10() - 1e-9).ceil().max(0.0) as usize
}

/// Log LAS header information for debugging.
pub fn log_file_info(file_path: &Path, header: &Header) {
    let transforms = header.transforms();
    debug!(
        file = %file_path.display(),
        version = %format!("{}.{}", header.version().major, header.version().minor),
        points = header.number_of_points(),
        point_format = header.point_format().to_u8().unwrap_or_default(),
        scale = ?(transforms.x.scale, transforms.y.scale, transforms.z.scale),
        offset = ?(transforms.x.offset, transforms.y.offset, transforms.z.offset),
        "LAS/LAZ file information"
    );
}
