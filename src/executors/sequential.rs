//! src/executors/sequential.rs
use crate::{
    error::JobError,
    executors::{ExecutionResult, Executor},
    mapreduce::MapReduce,
    master,
};

/// Runs every task on the calling thread, one after the other.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    #[tracing::instrument(name = "Sequential execution", skip_all, fields(job_id = %job.job_id()))]
    async fn execute(&self, job: &MapReduce) -> Result<ExecutionResult, JobError> {
        let map_tasks = master::map_tasks(job)?;
        let num_partitions = job.spec().output().map_or(1, |out| out.num_tasks());
        let mut result = ExecutionResult::new(num_partitions);

        let mut map_outputs = Vec::with_capacity(map_tasks.len());
        for task in map_tasks {
            let output = task.run()?;
            result.add_map_output(&output);
            map_outputs.push(output);
        }

        for task in master::reduce_tasks(job, map_outputs)? {
            result.add_reduce_output(task.run());
        }
        Ok(result)
    }
}
