/// Two-level badge category for a package's risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreCategory {
    High,
    Mid,
}

impl ScoreCategory {
    pub fn css_class(self) -> &'static str {
        match self {
            ScoreCategory::High => "score-high",
            ScoreCategory::Mid => "score-mid",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreCategory::High => "high",
            ScoreCategory::Mid => "mid",
        }
    }
}

/// Scores strictly above `high_above` get the high badge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePolicy {
    high_above: f64,
}

impl ScorePolicy {
    pub const DEFAULT_HIGH_ABOVE: f64 = 66.0;

    pub fn new(high_above: f64) -> Self {
        Self { high_above }
    }

    pub fn high_above(&self) -> f64 {
        self.high_above
    }

    pub fn classify(&self, score: f64) -> ScoreCategory {
        if score > self.high_above {
            ScoreCategory::High
        } else {
            ScoreCategory::Mid
        }
    }
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HIGH_ABOVE)
    }
}
