//! Self-rated recall difficulty, as produced by the hard/good/easy buttons.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReviewScore {
    Hard = 1,
    Good = 2,
    Easy = 3,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid review score {0}, expected 1 (hard), 2 (good) or 3 (easy)")]
pub struct InvalidScore(pub i64);

impl ReviewScore {
    pub const ALL: [ReviewScore; 3] = [ReviewScore::Hard, ReviewScore::Good, ReviewScore::Easy];

    pub fn value(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for ReviewScore {
    type Error = InvalidScore;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ReviewScore::Hard),
            2 => Ok(ReviewScore::Good),
            3 => Ok(ReviewScore::Easy),
            other => Err(InvalidScore(other)),
        }
    }
}

impl From<ReviewScore> for i64 {
    fn from(score: ReviewScore) -> Self {
        score.value()
    }
}
