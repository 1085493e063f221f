//! src/file_splitter.rs
use crate::error::JobError;
use crate::mapreduce::InputSplit;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Files making up an input location: the file itself, or the regular files
/// directly inside a directory. Names starting with `.` or `_` are skipped.
pub fn list_input_files(path: &Path) -> Result<Vec<PathBuf>, JobError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(JobError::NoInput(path.to_path_buf()));
    }

    let entries = std::fs::read_dir(path).map_err(|e| JobError::io(path, e))?;
    let mut files = vec![];
    for entry in entries {
        let entry = entry.map_err(|e| JobError::io(path, e))?;
        let file_path = entry.path();
        let hidden = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name.starts_with('_'));
        if file_path.is_file() && !hidden {
            files.push(file_path);
        }
    }
    files.sort();
    Ok(files)
}

/// Cuts one file into line-aligned splits of at most `split_size_in_bytes`.
/// A line longer than that becomes a split of its own.
pub struct FileSplitter {
    split_size_in_bytes: u64,
    path: PathBuf,
    mapper: String,
}

impl FileSplitter {
    pub fn new(path: PathBuf, split_size_in_bytes: u64, mapper: &str) -> Self {
        FileSplitter {
            split_size_in_bytes,
            path,
            mapper: mapper.to_string(),
        }
    }

    /// Name given to records of this file that carry no document id.
    pub fn source_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Scans the file for line boundaries. Only offsets are kept; the
    /// records are read again by the task that maps the split.
    #[tracing::instrument(
        name = "Split input file",
        skip(self),
        fields(path = %self.path.display())
    )]
    pub fn split(&self) -> Result<Vec<InputSplit>, JobError> {
        let in_file = File::open(&self.path).map_err(|e| JobError::io(&self.path, e))?;
        let mut reader = BufReader::new(in_file);
        let source = self.source_name();

        let mut results = vec![];
        let mut split_start = 0u64;
        let mut curr_split_size = 0u64;
        let mut buf = vec![];
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| JobError::io(&self.path, e))?;
            if read == 0 {
                break;
            }
            let line_size = read as u64;

            if curr_split_size > 0 && curr_split_size + line_size > self.split_size_in_bytes {
                results.push(self.input_split(&source, split_start, curr_split_size));
                split_start += curr_split_size;
                curr_split_size = 0;
            }
            curr_split_size += line_size;
        }
        if curr_split_size > 0 {
            results.push(self.input_split(&source, split_start, curr_split_size));
        }

        tracing::debug!(splits = results.len(), "Split input file");
        Ok(results)
    }

    fn input_split(&self, source: &str, offset: u64, length: u64) -> InputSplit {
        InputSplit::new(&self.path, source, &self.mapper, offset, length)
    }
}

/// Reads the records of `split`, one per line.
pub fn read_split(split: &InputSplit) -> Result<Vec<String>, JobError> {
    let path = split.path();
    let mut in_file = File::open(path).map_err(|e| JobError::io(path, e))?;
    in_file
        .seek(SeekFrom::Start(split.offset()))
        .map_err(|e| JobError::io(path, e))?;
    let mut reader = BufReader::new(in_file.take(split.length()));

    let mut records = vec![];
    let mut buf = vec![];
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| JobError::io(path, e))?;
        if read == 0 {
            break;
        }
        records.push(decode_line(&buf));
    }
    Ok(records)
}

// Drops the line terminator (`\n` or `\r\n`); invalid UTF-8 is replaced.
fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
