//! src/mappers/inverted_index.rs
use crate::document::DocumentRecord;
use crate::functions::{MapEmitter, MapInput, Mapper};
use crate::normalizer::normalize;
use crate::posting::Posting;
use crate::terms::TermExtractor;
use std::collections::HashMap;

/// Occurrences of each term within a single document.
pub fn count_terms<I>(terms: I) -> HashMap<String, u64>
where
    I: IntoIterator<Item = String>,
{
    let mut counts = HashMap::new();
    for term in terms {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Emits one `(term, docID:count)` pair per counted term.
pub fn emit_postings(doc_id: &str, counts: HashMap<String, u64>, emitter: &mut dyn MapEmitter) {
    for (term, count) in counts {
        emitter.emit(term, Posting::new(doc_id, count).to_string());
    }
}

/// Map stage of the index: split the record, normalize, extract terms,
/// count them and emit one posting per distinct term.
pub struct InvertedIndexMapper<T> {
    extractor: T,
}

impl<T: TermExtractor> InvertedIndexMapper<T> {
    pub fn new(extractor: T) -> Self {
        Self { extractor }
    }
}

impl<T: TermExtractor> Mapper for InvertedIndexMapper<T> {
    fn map(&self, input: MapInput, emitter: &mut dyn MapEmitter) {
        let Some(record) = DocumentRecord::parse(input.value(), input.key()) else {
            return;
        };
        let tokens = normalize(record.content());
        let terms = self.extractor.extract(&tokens);
        if terms.is_empty() {
            return;
        }
        emit_postings(record.doc_id(), count_terms(terms), emitter);
    }
}
