//! src/mapreduce.rs
use crate::{
    error::JobError,
    executors::{ExecutionResult, Executor},
    file_splitter::{list_input_files, FileSplitter},
    master, output,
    spec::{MapReduceInput, MapReduceSpecification},
};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A line-aligned byte range of one input file, mapped by a single task.
/// Records are only read when the task runs.
#[derive(Clone, Debug)]
pub struct InputSplit {
    id: Uuid,
    path: PathBuf,
    source: String,
    mapper: String,
    offset: u64,
    length: u64,
}

impl InputSplit {
    pub fn new(path: &Path, source: &str, mapper: &str, offset: u64, length: u64) -> Self {
        InputSplit {
            id: Uuid::new_v4(),
            path: path.to_path_buf(),
            source: source.into(),
            mapper: mapper.into(),
            offset,
            length,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the file the split was cut from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn mapper(&self) -> &str {
        &self.mapper
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn length(&self) -> u64 {
        self.length
    }
}

/// Record and task counts of a finished job.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JobCounters {
    pub map_tasks: u64,
    pub reduce_tasks: u64,
    pub map_input_records: u64,
    pub map_output_records: u64,
    pub combine_output_records: u64,
    pub reduce_input_groups: u64,
    pub reduce_output_records: u64,
}

#[tracing::instrument(name = "Split inputs", skip_all)]
fn split_inputs(
    inputs: &[MapReduceInput],
    split_size_in_bytes: u64,
) -> Result<Vec<InputSplit>, JobError> {
    let mut results = vec![];
    for input in inputs {
        for file in list_input_files(input.path())? {
            tracing::debug!("processing input file: {}", file.display());
            let splitter = FileSplitter::new(file, split_size_in_bytes, input.mapper());
            results.extend(splitter.split()?);
        }
    }
    Ok(results)
}

pub struct MapReduce {
    job_id: Uuid,
    spec: MapReduceSpecification,
    input_splits: Vec<InputSplit>,
}

impl MapReduce {
    pub fn new(spec: MapReduceSpecification) -> Result<Self, JobError> {
        let job_id = Uuid::new_v4();
        let input_splits = split_inputs(spec.inputs(), spec.split_size_in_bytes())?;
        Ok(MapReduce {
            spec,
            job_id,
            input_splits,
        })
    }

    pub fn spec(&self) -> &MapReduceSpecification {
        &self.spec
    }

    pub fn input_splits(&self) -> &[InputSplit] {
        &self.input_splits
    }

    pub fn job_id(&self) -> &Uuid {
        &self.job_id
    }

    /// Runs the job on `executor` and writes the index to the output
    /// directory, which must not exist yet. Function names are checked
    /// before the directory is created; a directory created by a job that
    /// fails later is removed again.
    #[tracing::instrument(name = "Run MapReduce job", skip_all, fields(job_id = %self.job_id))]
    pub async fn run<E: Executor>(&self, executor: &E) -> Result<JobCounters, JobError> {
        let out = self.spec.output().ok_or(JobError::MissingOutput)?;
        master::validate(self)?;
        output::prepare_output_dir(out.base_path())?;

        let result = match self.execute_and_write(executor, out.base_path()).await {
            Ok(result) => result,
            Err(e) => {
                output::discard_output_dir(out.base_path());
                return Err(e);
            }
        };

        let counters = result.counters;
        tracing::info!(
            map_tasks = counters.map_tasks,
            reduce_tasks = counters.reduce_tasks,
            map_input_records = counters.map_input_records,
            map_output_records = counters.map_output_records,
            combine_output_records = counters.combine_output_records,
            reduce_input_groups = counters.reduce_input_groups,
            reduce_output_records = counters.reduce_output_records,
            "Job completed"
        );
        Ok(counters)
    }

    async fn execute_and_write<E: Executor>(
        &self,
        executor: &E,
        dir: &Path,
    ) -> Result<ExecutionResult, JobError> {
        let result = executor.execute(self).await?;
        output::write_partitions(dir, &result.partitions)?;
        Ok(result)
    }
}
