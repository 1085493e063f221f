//! src/output.rs
use crate::{error::JobError, functions::KeyValue};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Written last, once every part file is complete.
pub const SUCCESS_MARKER: &str = "_SUCCESS";

pub fn part_file_name(partition: usize) -> String {
    format!("part-r-{partition:05}")
}

/// Creates the output directory. An existing directory is never reused.
pub fn prepare_output_dir(path: &Path) -> Result<(), JobError> {
    if path.exists() {
        return Err(JobError::OutputExists(path.to_path_buf()));
    }
    fs::create_dir_all(path).map_err(|e| JobError::io(path, e))
}

/// Removes an output directory left incomplete by a failed job.
pub fn discard_output_dir(path: &Path) {
    if let Err(e) = fs::remove_dir_all(path) {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove incomplete output directory"
        );
    }
}

/// Writes one `term<TAB>postings` line per record, one file per partition,
/// and returns the number of lines written.
#[tracing::instrument(name = "Write output", skip_all, fields(dir = %dir.display()))]
pub fn write_partitions(dir: &Path, partitions: &[Vec<KeyValue>]) -> Result<u64, JobError> {
    let mut lines = 0u64;
    for (partition, records) in partitions.iter().enumerate() {
        let path = dir.join(part_file_name(partition));
        write_part(&path, records)?;
        lines += records.len() as u64;
    }

    let marker: PathBuf = dir.join(SUCCESS_MARKER);
    File::create(&marker).map_err(|e| JobError::io(&marker, e))?;
    Ok(lines)
}

fn write_part(path: &Path, records: &[KeyValue]) -> Result<(), JobError> {
    let file = File::create(path).map_err(|e| JobError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for (key, value) in records {
        writeln!(writer, "{key}\t{value}").map_err(|e| JobError::io(path, e))?;
    }
    writer.flush().map_err(|e| JobError::io(path, e))
}
