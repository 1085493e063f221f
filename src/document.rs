//! src/document.rs

/// One input line split into its document id and text.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DocumentRecord<'a> {
    doc_id: &'a str,
    content: &'a str,
}

impl<'a> DocumentRecord<'a> {
    /// Splits `docID<TAB>content`. Without a tab, or with a blank prefix,
    /// the record belongs to `fallback_id`. Blank lines yield `None`.
    pub fn parse(line: &'a str, fallback_id: &'a str) -> Option<Self> {
        if trim_control(line).is_empty() {
            return None;
        }
        let (doc_id, content) = match line.split_once('\t') {
            Some((prefix, content)) => (trim_control(prefix), content),
            None => (fallback_id, line),
        };
        let doc_id = if doc_id.is_empty() { fallback_id } else { doc_id };
        Some(DocumentRecord { doc_id, content })
    }

    pub fn doc_id(&self) -> &'a str {
        self.doc_id
    }

    pub fn content(&self) -> &'a str {
        self.content
    }
}

// Strips spaces and every control character (anything up to U+0020) from
// both ends. Unicode whitespace above U+0020 is kept.
fn trim_control(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}
