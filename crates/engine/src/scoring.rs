use serde::{Deserialize, Serialize};

pub const DOUBLING_BASE: u32 = 10;

/// How a sweep turns into score. `lines_cleared` is tracked separately and
/// always advances by the raw row count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScoringRule {
    /// One point per cleared row.
    #[default]
    LineCount,
    PerLine(u32),
    /// 10 for the first row of a sweep, then twice the previous row: 10, 30, 70, 150.
    Doubling,
}

impl ScoringRule {
    pub fn points(self, lines: u32) -> u32 {
        match self {
            ScoringRule::LineCount => lines,
            ScoringRule::PerLine(points) => points.saturating_mul(lines),
            ScoringRule::Doubling => {
                let mut score = 0u32;
                let mut row_value = DOUBLING_BASE;
                for _ in 0..lines {
                    score = score.saturating_add(row_value);
                    row_value = row_value.saturating_mul(2);
                }
                score
            }
        }
    }
}
