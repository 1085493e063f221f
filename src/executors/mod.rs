//! src/executors/mod.rs
use crate::{
    error::JobError,
    functions::KeyValue,
    mapreduce::{JobCounters, MapReduce},
    master::{MapOutput, ReduceOutput},
};

/// Reduce output of a job, indexed by partition.
#[derive(Debug, Default)]
pub struct ExecutionResult {
    pub partitions: Vec<Vec<KeyValue>>,
    pub counters: JobCounters,
}

/// Runs the map and reduce phases of a job. The reduce phase starts only
/// after every map task has finished.
#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn execute(&self, job: &MapReduce) -> Result<ExecutionResult, JobError>;
}

impl JobCounters {
    fn record_map(&mut self, output: &MapOutput) {
        self.map_tasks += 1;
        self.map_input_records += output.input_records;
        self.map_output_records += output.output_records;
        self.combine_output_records += output.combine_output_records;
    }

    fn record_reduce(&mut self, output: &ReduceOutput) {
        self.reduce_tasks += 1;
        self.reduce_input_groups += output.input_groups;
        self.reduce_output_records += output.records.len() as u64;
    }
}

impl ExecutionResult {
    fn new(num_partitions: usize) -> Self {
        ExecutionResult {
            partitions: vec![Vec::new(); num_partitions],
            counters: JobCounters::default(),
        }
    }

    fn add_map_output(&mut self, output: &MapOutput) {
        self.counters.record_map(output);
    }

    fn add_reduce_output(&mut self, output: ReduceOutput) {
        self.counters.record_reduce(&output);
        if let Some(slot) = self.partitions.get_mut(output.partition) {
            *slot = output.records;
        }
    }
}

mod parallel;
pub use parallel::ParallelExecutor;

mod sequential;
pub use sequential::SequentialExecutor;
