//! src/emitter.rs
use crate::functions::{Key, KeyValue, MapEmitter, ReduceEmitter, Value};

/// Reduce partition of `key`. Stable across processes and runs.
pub fn partition_for(key: &str, partition_count: usize) -> usize {
    let mut hash = 0usize;

    for byte in key.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(byte as usize);
    }

    hash % partition_count.max(1)
}

/// Map-side buffer that routes every emitted pair to its reduce partition.
#[derive(Debug)]
pub struct PartitionedEmitter {
    partitions: Vec<Vec<KeyValue>>,
    emitted: u64,
}

impl PartitionedEmitter {
    pub fn new(partition_count: usize) -> Self {
        Self {
            partitions: vec![Vec::new(); partition_count.max(1)],
            emitted: 0,
        }
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn into_partitions(self) -> Vec<Vec<KeyValue>> {
        self.partitions
    }
}

impl MapEmitter for PartitionedEmitter {
    fn emit(&mut self, key: Key, value: Value) {
        let r = partition_for(&key, self.partitions.len());
        self.partitions[r].push((key, value));
        self.emitted += 1;
    }
}

/// Collects pairs in emission order.
#[derive(Debug, Default)]
pub struct VecEmitter {
    records: Vec<KeyValue>,
}

impl VecEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[KeyValue] {
        &self.records
    }

    pub fn into_records(self) -> Vec<KeyValue> {
        self.records
    }
}

impl MapEmitter for VecEmitter {
    fn emit(&mut self, key: Key, value: Value) {
        self.records.push((key, value));
    }
}

impl ReduceEmitter for VecEmitter {
    fn emit(&mut self, key: Key, value: Value) {
        self.records.push((key, value));
    }
}
