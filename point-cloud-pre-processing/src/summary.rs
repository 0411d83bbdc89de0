/// JSON summary of a vegetation point cloud run.
use crate::aggregator::AggregateReport;
use crate::bounds::PointCloudBounds;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct RunSummary {
    /// Manifest the datasets were read from.
    pub manifest: PathBuf,
    /// COFF file written by the run.
    pub output: PathBuf,
    pub datasets: Vec<DatasetSummary>,
    pub point_count: usize,
    /// Absent when no point survived thinning.
    pub bounds: Option<PointCloudBounds>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct DatasetSummary {
    pub input: PathBuf,
    pub point_count: usize,
}

impl RunSummary {
    pub fn new(manifest: &Path, output: &Path, report: &AggregateReport) -> Self {
        Self {
            manifest: manifest.to_path_buf(),
            output: output.to_path_buf(),
            datasets: report
                .datasets
                .iter()
                .map(|d| DatasetSummary {
                    input: d.input.clone(),
                    point_count: d.point_count,
                })
                .collect(),
            point_count: report.point_count,
            bounds: report.bounds.clone(),
        }
    }

    /// Writes the summary as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Generated run summary: {}", path.display());
        Ok(())
    }

    /// Logs key statistics of the run.
    pub fn log(&self) {
        info!(
            datasets = self.datasets.len(),
            points = self.point_count,
            "Run summary"
        );
        if let Some(bounds) = &self.bounds {
            let (dx, dy, dz) = bounds.dimensions();
            info!(
                "  Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2}), extent {:.2} x {:.2} x {:.2}",
                bounds.min_x,
                bounds.min_y,
                bounds.min_z,
                bounds.max_x,
                bounds.max_y,
                bounds.max_z,
                dx,
                dy,
                dz
            );
        }
    }
}
