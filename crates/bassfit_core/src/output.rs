//! Result table output
//!
//! The table is written once, after every zone has been processed. The
//! header is always `ZoneID,p,q,m`, also when no zone produced a result.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{FitError, Result};
use crate::model::ResultSet;

/// Column names of the result table
pub const HEADER: [&str; 4] = ["ZoneID", "p", "q", "m"];

#[derive(Serialize)]
struct OutputRow<'a> {
    zone: &'a str,
    p: f64,
    q: f64,
    m: f64,
}

/// Check that a run label can only name a file inside the output directory
pub fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(FitError::config("run label must not be empty"));
    }
    if label.contains(['/', '\\']) || label == "." || label == ".." {
        return Err(FitError::config(format!(
            "run label '{label}' must not contain path separators"
        )));
    }
    Ok(())
}

/// File name for a run label: `best_parameter_<label>.csv`
#[must_use]
pub fn output_file_name(label: &str) -> String {
    format!("best_parameter_{label}.csv")
}

/// Full output path for a run label inside `dir`
///
/// # Errors
/// Returns `InvalidConfig` when the label is empty or contains a path
/// separator.
pub fn output_path(dir: &Path, label: &str) -> Result<PathBuf> {
    validate_label(label)?;
    Ok(dir.join(output_file_name(label)))
}

/// Write the result table to any writer
pub fn write_results_to<W: io::Write>(writer: W, results: &ResultSet) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for result in results {
        wtr.serialize(OutputRow {
            zone: result.zone.as_str(),
            p: result.parameters.p,
            q: result.parameters.q,
            m: result.parameters.m,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the result table to `path` atomically using write-then-rename.
///
/// The table is first written to a sibling temporary file, then renamed
/// over the target, so an interrupted run never leaves a partial table.
pub fn write_results(path: &Path, results: &ResultSet) -> Result<()> {
    let temp_path = path.with_extension("csv.tmp");

    {
        let file = fs::File::create(&temp_path)?;
        write_results_to(io::BufWriter::new(file), results)?;
    }

    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BassParameters, FitResult, ZoneId};
    use tempfile::tempdir;

    fn sample_results() -> ResultSet {
        let mut results = ResultSet::new();
        results.push(FitResult {
            zone: ZoneId::from("A"),
            parameters: BassParameters::new(0.25, 0.5, 1500.0),
            objective_value: 0.0,
            island: 0,
            observations: 4,
            evaluations: 10,
        });
        results
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("run1"), "best_parameter_run1.csv");
        assert_eq!(
            output_path(Path::new("out"), "x").unwrap(),
            Path::new("out").join("best_parameter_x.csv")
        );
    }

    #[test]
    fn test_label_cannot_escape_output_dir() {
        let dir = Path::new("out");
        for label in ["../x", "a/b", "a\\b", "..", ".", ""] {
            assert!(
                matches!(output_path(dir, label), Err(FitError::InvalidConfig(_))),
                "label {label:?} was accepted"
            );
        }
        assert!(output_path(dir, "run..2").is_ok());
        assert!(output_path(dir, "zone-2021_v1").is_ok());
    }

    #[test]
    fn test_empty_results_still_have_header() {
        let mut buffer = Vec::new();
        write_results_to(&mut buffer, &ResultSet::new()).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "ZoneID,p,q,m\n");
    }

    #[test]
    fn test_rows_follow_header() {
        let mut buffer = Vec::new();
        write_results_to(&mut buffer, &sample_results()).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "ZoneID,p,q,m\nA,0.25,0.5,1500.0\n"
        );
    }

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = output_path(dir.path(), "t").unwrap();

        write_results(&path, &sample_results()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("ZoneID,p,q,m\n"));

        // Temp file should not exist
        assert!(!path.with_extension("csv.tmp").exists());
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let path = output_path(dir.path(), "t").unwrap();

        write_results(&path, &sample_results()).unwrap();
        write_results(&path, &ResultSet::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "ZoneID,p,q,m\n");
    }

    #[test]
    fn test_unwritable_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(write_results(&path, &sample_results()).is_err());
    }
}
