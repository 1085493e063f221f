//! src/mappers/mod.rs
mod inverted_index;

pub use inverted_index::{count_terms, emit_postings, InvertedIndexMapper};
