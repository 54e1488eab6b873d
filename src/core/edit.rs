//! Byte-range edits applied to a source text in one pass.
//!
//! Passes over the syntax tree never mutate it. They describe their output
//! as edits against the original text, which keeps untouched code
//! byte-identical and makes re-runs converge.

/// A single replacement of `source[start..end]` with `text`.
/// Insertions have `start == end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct SourceEdits {
    edits: Vec<Edit>,
}

impl SourceEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, start: usize, end: usize, text: impl Into<String>) {
        self.edits.push(Edit {
            start,
            end,
            text: text.into(),
        });
    }

    /// Insertions at the same offset are emitted in the order they were added.
    pub fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.replace(at, at, text);
    }

    pub fn delete(&mut self, start: usize, end: usize) {
        self.replace(start, end, String::new());
    }

    /// Apply all edits. An edit overlapping an earlier one is dropped.
    pub fn apply(mut self, source: &str) -> String {
        // Stable sort: an insertion at `p` lands before a replacement starting at `p`.
        self.edits.sort_by_key(|e| (e.start, e.end));

        let mut output = String::with_capacity(source.len());
        let mut cursor = 0;
        for edit in self.edits {
            if edit.start < cursor || edit.end > source.len() {
                tracing::debug!(start = edit.start, end = edit.end, "dropping overlapping edit");
                continue;
            }
            output.push_str(&source[cursor..edit.start]);
            output.push_str(&edit.text);
            cursor = edit.end;
        }
        output.push_str(&source[cursor..]);
        output
    }
}
