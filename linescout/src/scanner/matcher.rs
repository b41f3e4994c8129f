/// Literal substring matching over raw line bytes.
///
/// Matching is byte-wise and case-sensitive, so files that are not
/// valid UTF-8 are searched like any other.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    term: Vec<u8>,
}

impl TermMatcher {
    /// Creates a matcher for the given literal term
    pub fn new(term: &str) -> Self {
        Self {
            term: term.as_bytes().to_vec(),
        }
    }

    /// Whether the matcher was built from an empty term
    pub fn is_empty_term(&self) -> bool {
        self.term.is_empty()
    }

    /// Checks whether the line contains the term.
    ///
    /// An empty term matches every line, including empty ones.
    pub fn is_match(&self, line: &[u8]) -> bool {
        if self.term.is_empty() {
            return true;
        }
        line.windows(self.term.len()).any(|w| w == self.term)
    }
}
