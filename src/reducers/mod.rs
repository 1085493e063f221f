//! src/reducers/mod.rs
mod posting_merger;

pub use posting_merger::{PostingCombiner, PostingReducer};
