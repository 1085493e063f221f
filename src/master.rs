//! src/master.rs
use crate::{
    error::JobError,
    functions::{Key, KeyValue, Mapper, Reducer, Value},
    mapreduce::{InputSplit, MapReduce},
    registry,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use uuid::Uuid;

pub struct MapTask {
    pub task_id: Uuid,
    pub input_split: InputSplit,
    pub mapper: Arc<dyn Mapper>,
    pub combiner: Option<Arc<dyn Reducer>>,
    pub partitions: usize,
}

/// What a map task hands over to the shuffle, one bucket per reduce task.
#[derive(Debug, Default)]
pub struct MapOutput {
    pub partitions: Vec<Vec<KeyValue>>,
    pub input_records: u64,
    pub output_records: u64,
    pub combine_output_records: u64,
}

pub struct ReduceTask {
    pub task_id: Uuid,
    pub partition: usize,
    pub reducer: Arc<dyn Reducer>,
    pub groups: BTreeMap<Key, Vec<Value>>,
}

#[derive(Debug, Default)]
pub struct ReduceOutput {
    pub partition: usize,
    pub records: Vec<KeyValue>,
    pub input_groups: u64,
}

/// Resolves every mapper, combiner and reducer name the job refers to.
/// Runs before the output directory is created, so a misconfigured job
/// leaves nothing behind.
pub fn validate(job: &MapReduce) -> Result<(), JobError> {
    let spec = job.spec();
    let output = spec.output().ok_or(JobError::MissingOutput)?;
    for input in spec.inputs() {
        registry::get_mapper(input.mapper(), spec.index())?;
    }
    if let Some(combiner) = output.combiner() {
        registry::get_reducer(combiner)?;
    }
    registry::get_reducer(output.reducer())?;
    Ok(())
}

/// One map task per input split. Mapper and combiner names are resolved
/// once per job and shared by every task.
pub fn map_tasks(job: &MapReduce) -> Result<Vec<MapTask>, JobError> {
    let spec = job.spec();
    let output = spec.output().ok_or(JobError::MissingOutput)?;
    let combiner = output.combiner().map(registry::get_reducer).transpose()?;
    registry::get_reducer(output.reducer())?;

    let mut mappers: HashMap<&str, Arc<dyn Mapper>> = HashMap::new();
    let mut tasks = Vec::with_capacity(job.input_splits().len());
    for split in job.input_splits() {
        let mapper = match mappers.get(split.mapper()) {
            Some(mapper) => mapper.clone(),
            None => {
                let mapper = registry::get_mapper(split.mapper(), spec.index())?;
                mappers.insert(split.mapper(), mapper.clone());
                mapper
            }
        };
        tasks.push(MapTask {
            task_id: Uuid::new_v4(),
            input_split: split.clone(),
            mapper,
            combiner: combiner.clone(),
            partitions: output.num_tasks(),
        });
    }
    Ok(tasks)
}

/// Groups every map output by key, one reduce task per partition. Keys are
/// sorted within a partition; values keep no particular order.
#[tracing::instrument(name = "Shuffle", skip_all)]
pub fn reduce_tasks(
    job: &MapReduce,
    map_outputs: Vec<MapOutput>,
) -> Result<Vec<ReduceTask>, JobError> {
    let output = job.spec().output().ok_or(JobError::MissingOutput)?;
    let reducer = registry::get_reducer(output.reducer())?;

    let mut groups: Vec<BTreeMap<Key, Vec<Value>>> =
        vec![BTreeMap::new(); output.num_tasks()];
    for map_output in map_outputs {
        for (r, partition) in map_output.partitions.into_iter().enumerate() {
            let Some(group) = groups.get_mut(r) else {
                continue;
            };
            for (key, value) in partition {
                group.entry(key).or_default().push(value);
            }
        }
    }

    Ok(groups
        .into_iter()
        .enumerate()
        .map(|(partition, groups)| ReduceTask {
            task_id: Uuid::new_v4(),
            partition,
            reducer: reducer.clone(),
            groups,
        })
        .collect())
}
