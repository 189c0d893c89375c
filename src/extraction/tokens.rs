/// Estimates how many model tokens a file costs to load into context.
pub trait TokenEstimator {
    fn estimate(&self, content: &str) -> usize;
}

/// Fixed characters-per-token ratio, rounded up.
#[derive(Debug, Clone, Copy)]
pub struct CharRatioEstimator {
    pub chars_per_token: usize,
}

impl Default for CharRatioEstimator {
    fn default() -> Self {
        Self { chars_per_token: 4 }
    }
}

impl TokenEstimator for CharRatioEstimator {
    fn estimate(&self, content: &str) -> usize {
        content.chars().count().div_ceil(self.chars_per_token.max(1))
    }
}

/// Line count as `\n`-separated segments, so empty content is one line.
pub fn count_lines(content: &str) -> usize {
    content.split('\n').count()
}
