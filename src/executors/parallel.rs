//! src/executors/parallel.rs
use crate::{
    error::JobError,
    executors::{ExecutionResult, Executor},
    mapreduce::MapReduce,
    master,
};
use std::sync::Arc;
use tokio::{sync::Semaphore, task::JoinSet};

/// Runs tasks on tokio's blocking pool, at most `workers` at a time.
#[derive(Debug, Clone, Copy)]
pub struct ParallelExecutor {
    workers: usize,
}

impl ParallelExecutor {
    pub fn new(workers: usize) -> Self {
        ParallelExecutor {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ParallelExecutor {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Executor for ParallelExecutor {
    #[tracing::instrument(
        name = "Parallel execution",
        skip_all,
        fields(job_id = %job.job_id(), workers = self.workers)
    )]
    async fn execute(&self, job: &MapReduce) -> Result<ExecutionResult, JobError> {
        let permits = Arc::new(Semaphore::new(self.workers));

        let map_tasks = master::map_tasks(job)?;
        let num_partitions = job.spec().output().map_or(1, |out| out.num_tasks());
        let mut result = ExecutionResult::new(num_partitions);

        let mut running = JoinSet::new();
        for task in map_tasks {
            let permit = permits.clone().acquire_owned().await?;
            running.spawn_blocking(move || {
                let output = task.run();
                drop(permit);
                output
            });
        }
        let mut map_outputs = Vec::with_capacity(running.len());
        while let Some(joined) = running.join_next().await {
            let output = joined.map_err(|source| JobError::TaskFailed {
                phase: "map",
                source,
            })??;
            result.add_map_output(&output);
            map_outputs.push(output);
        }

        let mut running = JoinSet::new();
        for task in master::reduce_tasks(job, map_outputs)? {
            let permit = permits.clone().acquire_owned().await?;
            running.spawn_blocking(move || {
                let output = task.run();
                drop(permit);
                output
            });
        }
        while let Some(joined) = running.join_next().await {
            let output = joined.map_err(|source| JobError::TaskFailed {
                phase: "reduce",
                source,
            })?;
            result.add_reduce_output(output);
        }
        Ok(result)
    }
}
