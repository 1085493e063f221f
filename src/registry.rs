//! src/registry.rs
use crate::configuration::IndexSettings;
use crate::error::JobError;
use crate::functions::{Mapper, Reducer};
use crate::mappers::InvertedIndexMapper;
use crate::reducers::{PostingCombiner, PostingReducer};
use crate::terms::{SelectedBigrams, Unigrams};
use std::sync::Arc;

pub struct MapperRegistration {
    pub name: &'static str,
    pub factory: fn(&IndexSettings) -> Arc<dyn Mapper>,
}

pub struct ReducerRegistration {
    pub name: &'static str,
    pub factory: fn() -> Arc<dyn Reducer>,
}

fn unigram_mapper(_: &IndexSettings) -> Arc<dyn Mapper> {
    Arc::new(InvertedIndexMapper::new(Unigrams))
}

fn bigram_mapper(settings: &IndexSettings) -> Arc<dyn Mapper> {
    Arc::new(InvertedIndexMapper::new(SelectedBigrams::new(
        settings.allow_list(),
    )))
}

fn posting_combiner() -> Arc<dyn Reducer> {
    Arc::new(PostingCombiner)
}

fn posting_reducer() -> Arc<dyn Reducer> {
    Arc::new(PostingReducer)
}

static MAPPERS: &[MapperRegistration] = &[
    MapperRegistration {
        name: "unigram",
        factory: unigram_mapper,
    },
    MapperRegistration {
        name: "bigram",
        factory: bigram_mapper,
    },
];

static REDUCERS: &[ReducerRegistration] = &[
    ReducerRegistration {
        name: "posting_combiner",
        factory: posting_combiner,
    },
    ReducerRegistration {
        name: "posting_reducer",
        factory: posting_reducer,
    },
];

// Get mapper by name
pub fn get_mapper(name: &str, settings: &IndexSettings) -> Result<Arc<dyn Mapper>, JobError> {
    MAPPERS
        .iter()
        .find(|reg| reg.name == name)
        .map(|reg| (reg.factory)(settings))
        .ok_or_else(|| JobError::UnknownMapper(name.to_string()))
}

// Get reducer by name
pub fn get_reducer(name: &str) -> Result<Arc<dyn Reducer>, JobError> {
    REDUCERS
        .iter()
        .find(|reg| reg.name == name)
        .map(|reg| (reg.factory)())
        .ok_or_else(|| JobError::UnknownReducer(name.to_string()))
}

pub fn list_mappers() -> Vec<&'static str> {
    MAPPERS.iter().map(|reg| reg.name).collect()
}

pub fn list_reducers() -> Vec<&'static str> {
    REDUCERS.iter().map(|reg| reg.name).collect()
}
