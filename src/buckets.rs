//! Fixed score-range bucketing for review scores.

use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

use crate::records::AudioFeatures;

/// A fixed review-score range. Boundaries are inclusive on the upper end:
/// a score of exactly 7.0 lands in "6 to 7", not "7 to 8".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoreBucket {
    SixOrLower,
    SixToSeven,
    SevenToEight,
    EightToNine,
    NineToTen,
}

impl ScoreBucket {
    pub const ALL: [ScoreBucket; 5] = [
        ScoreBucket::SixOrLower,
        ScoreBucket::SixToSeven,
        ScoreBucket::SevenToEight,
        ScoreBucket::EightToNine,
        ScoreBucket::NineToTen,
    ];

    /// Assigns a score to its bucket. Total over (-inf, 10]; scores above 10
    /// do not occur on the review scale and get no bucket.
    pub fn from_score(score: f64) -> Option<ScoreBucket> {
        if score <= 6.0 {
            Some(ScoreBucket::SixOrLower)
        } else if score <= 7.0 {
            Some(ScoreBucket::SixToSeven)
        } else if score <= 8.0 {
            Some(ScoreBucket::SevenToEight)
        } else if score <= 9.0 {
            Some(ScoreBucket::EightToNine)
        } else if score <= 10.0 {
            Some(ScoreBucket::NineToTen)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBucket::SixOrLower => "6 or lower",
            ScoreBucket::SixToSeven => "6 to 7",
            ScoreBucket::SevenToEight => "7 to 8",
            ScoreBucket::EightToNine => "8 to 9",
            ScoreBucket::NineToTen => "9 to 10",
        }
    }
}

impl fmt::Display for ScoreBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Averaged score and audio features of every row that fell into one bucket.
#[derive(Debug, Clone)]
pub struct BucketAggregate {
    pub bucket: ScoreBucket,
    pub mean_score: f64,
    pub features: AudioFeatures,
}

/// Buckets (score, features) rows and averages each bucket, emitted in
/// bucket order. Empty buckets are omitted; rows whose score falls outside
/// the bucketed range are dropped with a warning.
pub fn mean_by_bucket(
    rows: impl IntoIterator<Item = (f64, AudioFeatures)>,
) -> Vec<BucketAggregate> {
    let mut groups: BTreeMap<ScoreBucket, (f64, AudioFeatures, usize)> = BTreeMap::new();

    for (score, features) in rows {
        match ScoreBucket::from_score(score) {
            Some(bucket) => {
                let entry = groups
                    .entry(bucket)
                    .or_insert((0.0, AudioFeatures::default(), 0));
                entry.0 += score;
                entry.1.accumulate(&features);
                entry.2 += 1;
            }
            None => warn!(score, "score above bucket range, row dropped"),
        }
    }

    groups
        .into_iter()
        .map(|(bucket, (score_sum, feature_sum, n))| BucketAggregate {
            bucket,
            mean_score: score_sum / n as f64,
            features: feature_sum.divide(n as f64),
        })
        .collect()
}
