//! src/worker.rs
use crate::{
    emitter::{PartitionedEmitter, VecEmitter},
    error::JobError,
    file_splitter::read_split,
    functions::{Key, KeyValue, MapInput, Reducer, ReduceInput, Value},
    master::{MapOutput, MapTask, ReduceOutput, ReduceTask},
};
use std::collections::BTreeMap;

impl MapTask {
    /// Reads the split, maps every record, then runs the combiner over each
    /// partition on its own.
    #[tracing::instrument(
        name = "Map task",
        skip(self),
        fields(task_id = %self.task_id, source = %self.input_split.source())
    )]
    pub fn run(self) -> Result<MapOutput, JobError> {
        let records = read_split(&self.input_split)?;
        let mut emitter = PartitionedEmitter::new(self.partitions);
        let source = self.input_split.source();
        for record in &records {
            self.mapper.map(MapInput::new(source, record), &mut emitter);
        }
        let output_records = emitter.emitted();
        let mut partitions = emitter.into_partitions();

        let mut combine_output_records = output_records;
        if let Some(combiner) = &self.combiner {
            partitions = partitions
                .into_iter()
                .map(|partition| combine(combiner.as_ref(), partition))
                .collect();
            combine_output_records = partitions.iter().map(|p| p.len() as u64).sum();
        }

        tracing::debug!(output_records, combine_output_records, "Map task finished");
        Ok(MapOutput {
            partitions,
            input_records: records.len() as u64,
            output_records,
            combine_output_records,
        })
    }
}

fn combine(combiner: &dyn Reducer, partition: Vec<KeyValue>) -> Vec<KeyValue> {
    let mut emitter = VecEmitter::new();
    for (key, values) in group_by_key(partition) {
        combiner.reduce(ReduceInput::new(key, values), &mut emitter);
    }
    emitter.into_records()
}

fn group_by_key(pairs: Vec<KeyValue>) -> BTreeMap<Key, Vec<Value>> {
    let mut groups: BTreeMap<Key, Vec<Value>> = BTreeMap::new();
    for (key, value) in pairs {
        groups.entry(key).or_default().push(value);
    }
    groups
}

impl ReduceTask {
    #[tracing::instrument(
        name = "Reduce task",
        skip(self),
        fields(task_id = %self.task_id, partition = self.partition)
    )]
    pub fn run(self) -> ReduceOutput {
        let input_groups = self.groups.len() as u64;
        let mut emitter = VecEmitter::new();
        for (key, values) in self.groups {
            self.reducer.reduce(ReduceInput::new(key, values), &mut emitter);
        }
        let records = emitter.into_records();
        tracing::debug!(input_groups, output_records = records.len(), "Reduce task finished");
        ReduceOutput {
            partition: self.partition,
            records,
            input_groups,
        }
    }
}
