/// Thinning and class filtering of LAS/LAZ datasets into coordinate text.
use crate::error::Result;
use crate::laz::{create_reader, log_file_info, scale_decimals};
use constants::thinning::{KEEP_CLASS, KEEP_EVERY_NTH};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tool_runner::ToolCommand;
use tracing::info;

/// Which points survive thinning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinningOptions {
    /// Keep one point out of this many.
    pub keep_every_nth: u32,
    /// LAS classification code to keep.
    pub keep_class: u8,
}

impl Default for ThinningOptions {
    fn default() -> Self {
        Self {
            keep_every_nth: KEEP_EVERY_NTH,
            keep_class: KEEP_CLASS,
        }
    }
}

/// Reduces one LAS/LAZ dataset to a text file with one `x y z` line per
/// kept point. `scratch_stem` is a scratch path without extension owned by
/// this dataset; the returned path is the text file.
pub trait PointThinner {
    fn thin(&self, input: &Path, scratch_stem: &Path) -> Result<PathBuf>;
}

/// Thinning through the LAStools `las2las` and `las2txt` binaries.
#[derive(Debug, Clone)]
pub struct LastoolsThinner {
    las2las: ToolCommand,
    las2txt: ToolCommand,
    options: ThinningOptions,
}

impl LastoolsThinner {
    pub fn new(las2las: ToolCommand, las2txt: ToolCommand, options: ThinningOptions) -> Self {
        Self {
            las2las,
            las2txt,
            options,
        }
    }
}

impl PointThinner for LastoolsThinner {
    fn thin(&self, input: &Path, scratch_stem: &Path) -> Result<PathBuf> {
        let laz_path = scratch_stem.with_extension("laz");
        let txt_path = scratch_stem.with_extension("txt");

        let filter_args: Vec<OsString> = vec![
            "-keep_every_nth".into(),
            self.options.keep_every_nth.to_string().into(),
            "-keep_class".into(),
            self.options.keep_class.to_string().into(),
            "-i".into(),
            input.into(),
            "-o".into(),
            laz_path.clone().into(),
        ];
        info!("{} {:?}", self.las2las, filter_args);
        self.las2las.run(&filter_args)?;

        let text_args: Vec<OsString> = vec![
            "-i".into(),
            laz_path.into(),
            "-o".into(),
            txt_path.clone().into(),
        ];
        info!("{} {:?}", self.las2txt, text_args);
        self.las2txt.run(&text_args)?;

        Ok(txt_path)
    }
}

/// In-process thinning with the `las` reader. Every Nth point of the raw
/// point sequence is considered, then filtered by classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeThinner {
    options: ThinningOptions,
}

impl NativeThinner {
    pub fn new(options: ThinningOptions) -> Self {
        Self { options }
    }
}

impl PointThinner for NativeThinner {
    fn thin(&self, input: &Path, scratch_stem: &Path) -> Result<PathBuf> {
        let txt_path = scratch_stem.with_extension("txt");
        let mut reader = create_reader(input)?;
        log_file_info(input, reader.header());

        let (dx, dy, dz) = {
            let transforms = reader.header().transforms();
            (
                scale_decimals(transforms.x.scale),
                scale_decimals(transforms.y.scale),
                scale_decimals(transforms.z.scale),
            )
        };
        let nth = self.options.keep_every_nth.max(1) as usize;

        let mut writer = BufWriter::new(File::create(&txt_path)?);
        let mut kept = 0usize;
        for (idx, point_result) in reader.points().enumerate() {
            if idx % nth != 0 {
                continue;
            }
            let point = point_result?;
            if u8::from(point.classification) != self.options.keep_class {
                continue;
            }
            writeln!(
                writer,
                "{:.*} {:.*} {:.*}",
                dx, point.x, dy, point.y, dz, point.z
            )?;
            kept += 1;
        }
        writer.flush()?;

        info!(kept, "thinned {}", input.display());
        Ok(txt_path)
    }
}
