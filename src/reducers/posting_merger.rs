//! src/reducers/posting_merger.rs
use crate::functions::{ReduceEmitter, ReduceInput, Reducer};
use crate::posting::merge_postings;

/// Map-side partial merge. Emits one `docID:count` value per document so
/// the output can be merged again, any number of times.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostingCombiner;

impl Reducer for PostingCombiner {
    fn reduce(&self, input: ReduceInput, emitter: &mut dyn ReduceEmitter) {
        let (term, values) = input.into_parts();
        let postings = merge_postings(&term, values);
        for posting in postings.postings() {
            emitter.emit(term.clone(), posting.to_string());
        }
    }
}

/// Final merge. Emits the posting list of the term as a single value, or
/// nothing when no valid posting survived.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostingReducer;

impl Reducer for PostingReducer {
    fn reduce(&self, input: ReduceInput, emitter: &mut dyn ReduceEmitter) {
        let (term, values) = input.into_parts();
        let postings = merge_postings(&term, values);
        if postings.is_empty() {
            tracing::debug!(term = %term, "No valid postings left, dropping term");
            return;
        }
        emitter.emit(term, postings.to_string());
    }
}
