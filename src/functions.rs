//! src/functions.rs

pub type Key = String;
pub type Value = String;
pub type KeyValue = (Key, Value);

/// A single input record. The key names the input the record came from and
/// doubles as the document id for lines that carry none.
#[derive(Debug, Clone)]
pub struct MapInput {
    key: Key,
    value: Value,
}

impl MapInput {
    pub fn new(key: &str, value: &str) -> Self {
        MapInput {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Every value delivered for one key, in no particular order.
#[derive(Debug, Clone)]
pub struct ReduceInput {
    key: Key,
    values: Vec<Value>,
}

impl ReduceInput {
    pub fn new(key: Key, values: Vec<Value>) -> Self {
        ReduceInput { key, values }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn into_parts(self) -> (Key, Vec<Value>) {
        (self.key, self.values)
    }
}

pub trait MapEmitter {
    fn emit(&mut self, key: Key, value: Value);
}

pub trait ReduceEmitter {
    fn emit(&mut self, key: Key, value: Value);
}

/// Per-record transformation. Implementations hold read-only configuration
/// only, so one instance can serve any number of tasks at once.
pub trait Mapper: Send + Sync {
    fn map(&self, input: MapInput, emitter: &mut dyn MapEmitter);
}

/// Merges all values for a key. Used for both the combine and the reduce
/// stage.
pub trait Reducer: Send + Sync {
    fn reduce(&self, input: ReduceInput, emitter: &mut dyn ReduceEmitter);
}
