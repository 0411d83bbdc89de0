/// Merging of thinned point lists into one coloured OFF point cloud.
use crate::bounds::PointCloudBounds;
use crate::colour::ColourSource;
use crate::error::{Error, Result};
use crate::thinning::PointThinner;
use constants::format::COFF_HEADER;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tool_runner::progress_bar;
use tracing::info;

/// One point as written by the thinning step.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    /// Coordinate text, verbatim minus the line terminator.
    pub coordinates: String,
    pub position: [f64; 3],
}

/// Parses one `x y z` record per line. The trailing carriage return left
/// by the Windows build of the text exporter is stripped.
pub fn parse_points(text: &str, source: &Path) -> Result<Vec<PointRecord>> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| {
            let coordinates = line.trim_end_matches('\r');
            let malformed = |message: String| Error::MalformedPoint {
                path: source.to_path_buf(),
                line: idx + 1,
                message,
            };

            let fields: Vec<&str> = coordinates.split_whitespace().collect();
            if fields.len() != 3 {
                return Err(malformed(format!(
                    "expected 3 coordinates, found {}",
                    fields.len()
                )));
            }

            let mut position = [0.0; 3];
            for (slot, field) in position.iter_mut().zip(&fields) {
                *slot = field
                    .parse::<f64>()
                    .map_err(|_| malformed(format!("invalid coordinate '{}'", field)))?;
            }

            Ok(PointRecord {
                coordinates: coordinates.to_string(),
                position,
            })
        })
        .collect()
}

pub fn read_points(path: &Path) -> Result<Vec<PointRecord>> {
    let text = fs::read_to_string(path)?;
    parse_points(&text, path)
}

/// Writes `COFF`, the counts line and one `x y z r g b a` line per point.
pub fn write_coff<W: Write, C: ColourSource>(
    points: &[PointRecord],
    colours: &mut C,
    mut writer: W,
) -> io::Result<()> {
    writeln!(writer, "{}", COFF_HEADER)?;
    writeln!(writer, "{} 0 0", points.len())?;
    for point in points {
        let c = colours.next_colour();
        writeln!(
            writer,
            "{} {} {} {} {}",
            point.coordinates, c.red, c.green, c.blue, c.alpha
        )?;
    }
    writer.flush()
}

/// Point count contributed by one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetReport {
    pub input: PathBuf,
    pub thinned: PathBuf,
    pub point_count: usize,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub datasets: Vec<DatasetReport>,
    pub point_count: usize,
    pub bounds: Option<PointCloudBounds>,
}

/// Thins every dataset, then merges the results into one COFF file.
pub struct VegetationAggregator<T: PointThinner> {
    thinner: T,
    scratch_dir: PathBuf,
}

impl<T: PointThinner> VegetationAggregator<T> {
    pub fn new(thinner: T, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            thinner,
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Runs the whole pipeline. Any thinning or parse failure aborts the
    /// run before `output` is created.
    pub fn run<C: ColourSource>(
        &self,
        datasets: &[&Path],
        output: &Path,
        colours: &mut C,
    ) -> Result<AggregateReport> {
        fs::create_dir_all(&self.scratch_dir)?;

        let pb = progress_bar(datasets.len() as u64, "datasets");
        pb.set_message("Thinning datasets");
        let mut thinned = Vec::with_capacity(datasets.len());
        for (idx, input) in datasets.iter().enumerate() {
            let stem = self.scratch_dir.join(idx.to_string());
            thinned.push(self.thinner.thin(input, &stem)?);
            pb.inc(1);
        }
        pb.finish_with_message("Datasets thinned");

        info!("Reading thinned point files");
        let mut points = Vec::new();
        let mut reports = Vec::with_capacity(datasets.len());
        for (input, txt) in datasets.iter().zip(thinned) {
            let dataset_points = read_points(&txt)?;
            reports.push(DatasetReport {
                input: input.to_path_buf(),
                thinned: txt,
                point_count: dataset_points.len(),
            });
            points.extend(dataset_points);
        }

        let bounds = PointCloudBounds::from_positions(points.iter().map(|p| &p.position));

        let writer = BufWriter::new(File::create(output)?);
        write_coff(&points, colours, writer)?;
        info!(points = points.len(), "wrote {}", output.display());

        Ok(AggregateReport {
            datasets: reports,
            point_count: points.len(),
            bounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::{Colour, JitterColour};
    use constants::colour::{VEGETATION_BLUE, VEGETATION_GREEN, VEGETATION_RED};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::Cell;

    /// Serves canned text files instead of thinning, optionally failing on
    /// one dataset.
    struct CannedThinner {
        files: Vec<&'static str>,
        fail_at: Option<usize>,
        calls: Cell<usize>,
    }

    impl PointThinner for CannedThinner {
        fn thin(&self, _input: &Path, scratch_stem: &Path) -> Result<PathBuf> {
            let idx = self.calls.get();
            self.calls.set(idx + 1);
            if self.fail_at == Some(idx) {
                return Err(tool_runner::ToolError::Failed {
                    tool: "las2las".to_string(),
                    code: Some(1),
                    stderr: "ERROR: file not found".to_string(),
                }
                .into());
            }
            let path = scratch_stem.with_extension("txt");
            fs::write(&path, self.files[idx])?;
            Ok(path)
        }
    }

    struct FixedColour(Colour);

    impl ColourSource for FixedColour {
        fn next_colour(&mut self) -> Colour {
            self.0
        }
    }

    fn canned(files: Vec<&'static str>, fail_at: Option<usize>) -> CannedThinner {
        CannedThinner {
            files,
            fail_at,
            calls: Cell::new(0),
        }
    }

    #[test]
    fn test_parse_strips_carriage_return() {
        let points = parse_points("1.5 2.5 3.5\r\n4 5 6\n", Path::new("a.txt")).unwrap();
        assert_eq!(points[0].coordinates, "1.5 2.5 3.5");
        assert_eq!(points[1].position, [4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        let err = parse_points("1 2 3\n1 2\n", Path::new("a.txt")).unwrap_err();
        assert!(matches!(err, Error::MalformedPoint { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = parse_points("1 2 z\n", Path::new("a.txt")).unwrap_err();
        assert!(matches!(err, Error::MalformedPoint { line: 1, .. }));
    }

    #[test]
    fn test_write_coff_format() {
        let points = parse_points("1 2 3\n4 5 6\n", Path::new("a.txt")).unwrap();
        let mut colours = FixedColour(Colour {
            red: 48,
            green: 206,
            blue: 77,
            alpha: 100,
        });
        let mut out = Vec::new();
        write_coff(&points, &mut colours, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "COFF\n2 0 0\n1 2 3 48 206 77 100\n4 5 6 48 206 77 100\n"
        );
    }

    #[test]
    fn test_points_concatenated_in_dataset_order() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("veg.off");
        let aggregator = VegetationAggregator::new(
            canned(vec!["1 1 1\r\n2 2 2\r\n", "3 3 3\r\n", "4 4 4\r\n5 5 5\r\n6 6 6\r\n"], None),
            dir.path().join("scratch"),
        );
        let datasets = [Path::new("a.laz"), Path::new("b.laz"), Path::new("c.laz")];
        let mut colours = JitterColour::new(StdRng::seed_from_u64(3));

        let report = aggregator.run(&datasets, &output, &mut colours).unwrap();
        assert_eq!(report.point_count, 6);
        assert_eq!(
            report.datasets.iter().map(|d| d.point_count).collect::<Vec<_>>(),
            vec![2, 1, 3]
        );
        assert_eq!(report.bounds.unwrap().max_z, 6.0);

        let text = fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("COFF"));
        assert_eq!(lines.next(), Some("6 0 0"));

        let body: Vec<&str> = lines.collect();
        assert_eq!(body.len(), 6);
        for (idx, line) in body.iter().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(fields.len(), 7);
            let expected = (idx + 1).to_string();
            assert_eq!(&fields[..3], &[expected.as_str(); 3]);

            let rgb: Vec<u8> = fields[3..6].iter().map(|f| f.parse().unwrap()).collect();
            assert!(VEGETATION_RED.contains(&rgb[0]));
            assert!(VEGETATION_GREEN.contains(&rgb[1]));
            assert!(VEGETATION_BLUE.contains(&rgb[2]));
            assert_eq!(fields[6], "100");
        }
    }

    #[test]
    fn test_thinning_failure_writes_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("veg.off");
        let aggregator = VegetationAggregator::new(
            canned(vec!["1 1 1\n", "2 2 2\n"], Some(1)),
            dir.path().join("scratch"),
        );
        let datasets = [Path::new("a.laz"), Path::new("b.laz")];
        let mut colours = JitterColour::new(StdRng::seed_from_u64(3));

        let err = aggregator.run(&datasets, &output, &mut colours).unwrap_err();
        assert!(err.to_string().contains("ERROR: file not found"));
        assert!(!output.exists());
    }

    #[test]
    fn test_malformed_point_file_writes_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("veg.off");
        let aggregator = VegetationAggregator::new(
            canned(vec!["1 1 1\n", "oops\n"], None),
            dir.path().join("scratch"),
        );
        let datasets = [Path::new("a.laz"), Path::new("b.laz")];
        let mut colours = JitterColour::new(StdRng::seed_from_u64(3));

        let err = aggregator.run(&datasets, &output, &mut colours).unwrap_err();
        assert!(matches!(err, Error::MalformedPoint { line: 1, .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_no_datasets_gives_empty_cloud() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("veg.off");
        let aggregator = VegetationAggregator::new(canned(vec![], None), dir.path());
        let mut colours = JitterColour::new(StdRng::seed_from_u64(3));

        let report = aggregator.run(&[], &output, &mut colours).unwrap();
        assert!(report.bounds.is_none());
        assert_eq!(fs::read_to_string(&output).unwrap(), "COFF\n0 0 0\n");
    }
}
