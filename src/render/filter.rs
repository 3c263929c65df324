/// Additive substring filter over entry titles.
///
/// Each pattern gates emission on its own, so a title matched by two
/// patterns is emitted twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    patterns: Vec<String>,
    negate: bool,
}

impl SearchFilter {
    pub fn new(patterns: Vec<String>, negate: bool) -> Self {
        Self { patterns, negate }
    }

    /// How many times a line for `title` is printed.
    pub fn emissions(&self, title: &str) -> usize {
        if self.patterns.is_empty() {
            return 1;
        }

        self.patterns
            .iter()
            .filter(|pattern| title.contains(pattern.as_str()) != self.negate)
            .count()
    }
}
