/// Vertex cleanup of the per-class meshes and the final class files.
use crate::class_splitter::{ClassPartition, split_by_class};
use crate::error::Result;
use constants::SemanticClass;
use constants::format::mtllib_record;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tool_runner::{ToolCommand, progress_bar};
use tracing::info;

/// Removes unreferenced and duplicate vertices from an OBJ file, returning
/// the path of the cleaned file.
pub trait VertexCleanup {
    fn cleanup(&self, input: &Path) -> Result<PathBuf>;
}

/// Runs a meshlabserver filter script over the mesh.
#[derive(Debug, Clone)]
pub struct MeshlabCleanup {
    command: ToolCommand,
    script: PathBuf,
}

impl MeshlabCleanup {
    pub fn new(command: ToolCommand, script: impl Into<PathBuf>) -> Self {
        Self {
            command,
            script: script.into(),
        }
    }
}

impl VertexCleanup for MeshlabCleanup {
    fn cleanup(&self, input: &Path) -> Result<PathBuf> {
        let stem = input
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let output = input.with_file_name(format!("{}_cleaned.obj", stem));

        self.command.run([
            OsStr::new("-i"),
            input.as_os_str(),
            OsStr::new("-s"),
            self.script.as_os_str(),
            OsStr::new("-o"),
            output.as_os_str(),
        ])?;

        Ok(output)
    }
}

/// Leaves the mesh untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCleanup;

impl VertexCleanup for IdentityCleanup {
    fn cleanup(&self, input: &Path) -> Result<PathBuf> {
        Ok(input.to_path_buf())
    }
}

/// Directories used by the class split.
#[derive(Debug, Clone)]
pub struct SplitterOptions {
    /// Pre-cleanup class meshes are written and removed here.
    pub scratch_dir: PathBuf,
    /// Final `<Class>_1.obj` files land here.
    pub output_dir: PathBuf,
}

/// Prepends the material library and class selection to a cleaned mesh,
/// dropping any material library record the cleanup tool wrote itself.
pub fn finalize_cleaned(class: SemanticClass, cleaned: &str) -> String {
    let mut out = format!("{}\nusemtl {}\n", mtllib_record(), class.name());
    for line in cleaned.lines() {
        if line.split_whitespace().next() == Some("mtllib") {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Class split followed by vertex cleanup of every class mesh.
pub struct ClassSplitPipeline<C: VertexCleanup> {
    options: SplitterOptions,
    cleanup: C,
}

impl<C: VertexCleanup> ClassSplitPipeline<C> {
    pub fn new(options: SplitterOptions, cleanup: C) -> Self {
        Self { options, cleanup }
    }

    /// Splits `text`, cleans each class mesh and writes the final class
    /// files. Nothing is written when the split itself fails.
    pub fn run(&self, text: &str) -> Result<Vec<PathBuf>> {
        let partition = split_by_class(text)?;
        info!(
            vertices = partition.vertices().len(),
            "split mesh into {} classes",
            SemanticClass::ALL.len()
        );

        fs::create_dir_all(&self.options.scratch_dir)?;
        fs::create_dir_all(&self.options.output_dir)?;

        let pb = progress_bar(SemanticClass::ALL.len() as u64, "classes");
        pb.set_message("Cleaning class meshes");

        let mut outputs = Vec::with_capacity(SemanticClass::ALL.len());
        for class in SemanticClass::ALL {
            let final_path = self.write_class(&partition, class)?;
            info!(
                class = class.name(),
                faces = partition.face_count(class),
                "wrote {}",
                final_path.display()
            );
            outputs.push(final_path);
            pb.inc(1);
        }

        pb.finish_with_message("Class meshes written");
        Ok(outputs)
    }

    /// Writes, cleans and finalizes one class mesh. The scratch files are
    /// removed whether or not the cleanup succeeded.
    fn write_class(&self, partition: &ClassPartition, class: SemanticClass) -> Result<PathBuf> {
        let raw_path = self
            .options
            .scratch_dir
            .join(format!("{}.obj", class.name()));
        let final_path = self
            .options
            .output_dir
            .join(format!("{}_1.obj", class.name()));
        fs::write(&raw_path, partition.render(class))?;

        let mut cleaned_path = None;
        let result = self.cleanup.cleanup(&raw_path).and_then(|path| {
            let cleaned = fs::read_to_string(&path);
            cleaned_path = Some(path);
            fs::write(&final_path, finalize_cleaned(class, &cleaned?))?;
            Ok(())
        });

        for temp in std::iter::once(&raw_path).chain(cleaned_path.as_ref()) {
            if *temp != final_path && temp.exists() {
                fs::remove_file(temp)?;
            }
        }

        result.map(|()| final_path)
    }
}
