//! Reads `.dat` files into station-month records, and finds them on disk.

use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{error::PipelineError, reading::StationMonthRecord};

/// Reads a whole file, `batch_size` lines at a time.
///
/// Batching only bounds how many raw lines are held before parsing; the result is
/// the same for any batch size. Blank lines are ignored.
pub fn read_dat_file(
    path: &Path,
    skip_header: bool,
    batch_size: NonZeroUsize,
) -> Result<Vec<StationMonthRecord>, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let io_error = |source: io::Error| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut batch: Vec<(usize, String)> = Vec::with_capacity(batch_size.get());
    let mut batches = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(io_error)?;

        if skip_header && idx == 0 {
            continue;
        }

        batch.push((idx + 1, line));

        if batch.len() == batch_size.get() {
            records.extend(parse_batch(path, &batch)?);
            batch.clear();
            batches += 1;
        }
    }

    if !batch.is_empty() {
        records.extend(parse_batch(path, &batch)?);
        batches += 1;
    }

    debug!(
        "Parsed {} records from {} in {} batches",
        records.len(),
        path.display(),
        batches
    );

    Ok(records)
}

fn parse_batch(
    path: &Path,
    batch: &[(usize, String)],
) -> Result<Vec<StationMonthRecord>, PipelineError> {
    batch
        .iter()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_number, line)| {
            StationMonthRecord::from_line(line).map_err(|reason| PipelineError::Parse {
                path: path.to_path_buf(),
                line: *line_number,
                reason,
            })
        })
        .collect()
}

/// Every `.dat` file below `dir`, sorted by path.
pub fn discover_dat_files(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    if !dir.exists() {
        return Err(PipelineError::MissingFile {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    walk(dir, &mut files).map_err(|source| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    files.sort();

    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            walk(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "dat") {
            files.push(path);
        }
    }

    Ok(())
}

/// Immediate sub-directories of `dir`, sorted by path.
pub fn list_subfolders(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let io_error = |source: io::Error| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut directories = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            directories.push(path);
        }
    }
    directories.sort();

    Ok(directories)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    fn row(id: i64, year: i32, month: u32, value: &str) -> String {
        format!("{} {} {} {}", id, year, month, vec![value; 31].join(" "))
    }

    fn write_file(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn batch(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn should_skip_header() {
        let dir = TempDir::new().unwrap();
        let lines = vec![
            "precip MIROC5 RCP60 REGRESION decimas 1".to_string(),
            row(1, 2006, 1, "0.0"),
            row(1, 2006, 2, "1.0"),
            row(1, 2006, 3, "2.0"),
        ];
        let path = write_file(dir.path(), "a.dat", &lines);

        let records = read_dat_file(&path, true, batch(10)).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].month, 1);
    }

    #[test]
    fn should_fail_on_header_when_not_skipped() {
        let dir = TempDir::new().unwrap();
        let lines = vec!["header".to_string(), row(1, 2006, 1, "0.0")];
        let path = write_file(dir.path(), "a.dat", &lines);

        let err = read_dat_file(&path, false, batch(10)).unwrap_err();

        assert!(matches!(err, PipelineError::Parse { line: 1, .. }));
    }

    #[test]
    fn should_give_same_records_for_any_batch_size() {
        let dir = TempDir::new().unwrap();
        let lines: Vec<String> = (1..=12).map(|m| row(1, 2010, m, "0.5")).collect();
        let path = write_file(dir.path(), "a.dat", &lines);

        let whole = read_dat_file(&path, false, batch(10_000)).unwrap();

        for size in [1, 5, 12, 13] {
            assert_eq!(read_dat_file(&path, false, batch(size)).unwrap(), whole);
        }
    }

    #[test]
    fn should_report_line_of_bad_row() {
        let dir = TempDir::new().unwrap();
        let lines = vec![
            row(1, 2006, 1, "0.0"),
            row(1, 2006, 2, "0.0"),
            "1 2006 3 0.0".to_string(),
        ];
        let path = write_file(dir.path(), "a.dat", &lines);

        let err = read_dat_file(&path, false, batch(2)).unwrap_err();

        match err {
            PipelineError::Parse { line, reason, .. } => {
                assert_eq!(line, 3);
                assert_eq!(reason, "expected 34 columns, found 4");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn should_ignore_blank_lines() {
        let dir = TempDir::new().unwrap();
        let lines = vec![row(1, 2006, 1, "0.0"), "   ".to_string(), row(1, 2006, 2, "0.0")];
        let path = write_file(dir.path(), "a.dat", &lines);

        assert_eq!(read_dat_file(&path, false, batch(1)).unwrap().len(), 2);
    }

    #[test]
    fn should_fail_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_dat_file(&dir.path().join("nope.dat"), false, batch(1)).unwrap_err();

        assert!(matches!(err, PipelineError::MissingFile { .. }));
    }

    #[test]
    fn should_discover_dat_files_recursively() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("Parte_1");
        fs::create_dir(&nested).unwrap();
        write_file(dir.path(), "b.dat", &[]);
        write_file(&nested, "a.dat", &[]);
        write_file(dir.path(), "notes.txt", &[]);

        let files = discover_dat_files(dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "dat"));
        assert!(files.contains(&nested.join("a.dat")));
    }

    #[test]
    fn should_list_subfolders() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        write_file(dir.path(), "c.dat", &[]);

        let folders = list_subfolders(dir.path()).unwrap();

        assert_eq!(folders, vec![dir.path().join("a"), dir.path().join("b")]);
    }
}
