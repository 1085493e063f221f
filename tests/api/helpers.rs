//! tests/api/helpers.rs
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub fn test_data_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path
}

/// A fresh output location under the system temp directory. Not created.
pub fn output_dir() -> PathBuf {
    std::env::temp_dir()
        .join("inverted-index-tests")
        .join(uuid::Uuid::new_v4().to_string())
}

pub fn part_files(dir: &Path) -> Vec<PathBuf> {
    let mut parts: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("Failed to read output dir")
        .map(|entry| entry.expect("Failed to read dir entry").path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("part-r-"))
        })
        .collect();
    parts.sort();
    parts
}

/// Every `term<TAB>postings` line of the job output, keyed by term.
/// Panics if a term shows up twice.
pub fn read_index(dir: &Path) -> BTreeMap<String, String> {
    let mut index = BTreeMap::new();
    for part in part_files(dir) {
        let content = std::fs::read_to_string(&part).expect("Failed to read part file");
        for line in content.lines() {
            let (term, postings) = line.split_once('\t').expect("Line without a tab");
            let previous = index.insert(term.to_string(), postings.to_string());
            assert!(previous.is_none(), "term {term} written twice");
        }
    }
    index
}
