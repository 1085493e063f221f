//! src/posting.rs
use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// How often a term occurs in one document. Travels through the shuffle
/// as `docID:count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    doc_id: String,
    count: u64,
}

impl Posting {
    pub fn new(doc_id: &str, count: u64) -> Self {
        Posting {
            doc_id: doc_id.to_string(),
            count,
        }
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.doc_id, self.count)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MalformedPosting {
    #[error("missing ':' between document id and count")]
    MissingSeparator,
    #[error("empty document id")]
    EmptyDocumentId,
    #[error("invalid count")]
    InvalidCount(#[from] ParseIntError),
    #[error("count must be positive")]
    ZeroCount,
}

impl FromStr for Posting {
    type Err = MalformedPosting;

    // The count never contains ':' so the last one is the separator, which
    // lets document ids carry colons of their own.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (doc_id, count) = s.rsplit_once(':').ok_or(MalformedPosting::MissingSeparator)?;
        if doc_id.is_empty() {
            return Err(MalformedPosting::EmptyDocumentId);
        }
        let count: u64 = count.parse()?;
        if count == 0 {
            return Err(MalformedPosting::ZeroCount);
        }
        Ok(Posting::new(doc_id, count))
    }
}

/// Per-document counts for one term, each document id at most once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PostingList(BTreeMap<String, u64>);

impl PostingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, posting: Posting) {
        let count = self.0.entry(posting.doc_id).or_insert(0);
        *count = count.saturating_add(posting.count);
    }

    pub fn count(&self, doc_id: &str) -> Option<u64> {
        self.0.get(doc_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn postings(&self) -> impl Iterator<Item = Posting> + '_ {
        self.0
            .iter()
            .map(|(doc_id, count)| Posting::new(doc_id, *count))
    }
}

impl fmt::Display for PostingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, posting) in self.postings().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{posting}")?;
        }
        Ok(())
    }
}

/// Sums the counts reported for each document of `term`.
///
/// Shared by the combine and reduce stages. Values that do not parse are
/// logged and skipped, so the result only reflects the valid ones; an empty
/// list means nothing survived.
pub fn merge_postings<I, S>(term: &str, values: I) -> PostingList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut postings = PostingList::new();
    for value in values {
        let value = value.as_ref();
        match value.parse::<Posting>() {
            Ok(posting) => postings.add(posting),
            Err(e) => {
                tracing::warn!(term, value, error = %e, "Skipping malformed posting");
            }
        }
    }
    postings
}
