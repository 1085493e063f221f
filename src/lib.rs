//! src/lib.rs
pub mod configuration;
pub mod document;
pub mod emitter;
pub mod error;
pub mod executors;
pub mod file_splitter;
pub mod functions;
pub mod mappers;
pub mod mapreduce;
pub mod master;
pub mod normalizer;
pub mod output;
pub mod posting;
pub mod reducers;
pub mod registry;
pub mod spec;
pub mod telemetry;
pub mod terms;
pub mod worker;
