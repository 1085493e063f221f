//! src/spec.rs
use crate::configuration::{IndexSettings, Settings};
use std::path::{Path, PathBuf};

pub const COMBINER: &str = "posting_combiner";
pub const REDUCER: &str = "posting_reducer";

#[derive(Debug, Clone)]
pub struct MapReduceInput {
    path: PathBuf,
    mapper: String,
}

impl MapReduceInput {
    /// `path` is a file or a directory of files.
    pub fn new(path: impl Into<PathBuf>, mapper: &str) -> Self {
        MapReduceInput {
            path: path.into(),
            mapper: mapper.into(),
        }
    }

    pub fn mapper(&self) -> &str {
        &self.mapper
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone)]
pub struct MapReduceOutput {
    base_path: PathBuf,
    num_tasks: usize,
    reducer: String,
    combiner: Option<String>,
}

impl MapReduceOutput {
    /// One output file is written per reduce task; at least one task runs.
    pub fn new(
        base_path: impl Into<PathBuf>,
        num_tasks: usize,
        reducer: &str,
        combiner: Option<&str>,
    ) -> Self {
        MapReduceOutput {
            base_path: base_path.into(),
            num_tasks: num_tasks.max(1),
            reducer: reducer.into(),
            combiner: combiner.map(str::to_string),
        }
    }

    pub fn reducer(&self) -> &str {
        &self.reducer
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn num_tasks(&self) -> usize {
        self.num_tasks
    }

    pub fn combiner(&self) -> Option<&str> {
        self.combiner.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct MapReduceSpecification {
    index: IndexSettings,
    input: Vec<MapReduceInput>,
    output: Option<MapReduceOutput>,
    split_size_in_bytes: u64,
}

impl MapReduceSpecification {
    pub fn new(index: IndexSettings, split_size_in_bytes: u64) -> Self {
        MapReduceSpecification {
            index,
            input: vec![],
            output: None,
            split_size_in_bytes: split_size_in_bytes.max(1),
        }
    }

    /// The index job described by `settings`: the configured variant reads
    /// `input`, postings are merged into `output`.
    pub fn from_settings(settings: &Settings, input: &Path, output: &Path) -> Self {
        let mut spec = Self::new(settings.index.clone(), settings.cluster.split_size_in_bytes);
        spec.add_input(MapReduceInput::new(
            input,
            settings.index.variant.mapper_name(),
        ));
        let combiner = settings.cluster.combine.then_some(COMBINER);
        spec.set_output(MapReduceOutput::new(
            output,
            settings.cluster.reduce_tasks.into(),
            REDUCER,
            combiner,
        ));
        spec
    }

    pub fn index(&self) -> &IndexSettings {
        &self.index
    }

    pub fn add_input(&mut self, input: MapReduceInput) {
        self.input.push(input);
    }

    pub fn inputs(&self) -> &[MapReduceInput] {
        &self.input
    }

    pub fn split_size_in_bytes(&self) -> u64 {
        self.split_size_in_bytes
    }

    pub fn set_output(&mut self, output: MapReduceOutput) {
        self.output = Some(output);
    }

    pub fn output(&self) -> Option<&MapReduceOutput> {
        self.output.as_ref()
    }
}
