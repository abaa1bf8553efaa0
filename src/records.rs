//! Typed row schemas for the four input datasets.
//!
//! Each struct names exactly the columns a pipeline consumes; extra columns
//! in the source files (duration_ms, valence, key, mode, ...) are ignored by
//! the header-driven CSV deserializer, which keeps the column selection
//! explicit instead of relying on an aggregation to drop non-numeric fields.

use chrono::NaiveDate;
use serde::Deserialize;

/// The audio-feature columns retained by every aggregate, in table order.
pub const FEATURE_NAMES: [&str; 8] = [
    "acousticness",
    "danceability",
    "energy",
    "instrumentalness",
    "liveness",
    "loudness",
    "speechiness",
    "tempo",
];

/// The eight numeric audio features carried through grouping and joining.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioFeatures {
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub tempo: f64,
}

impl AudioFeatures {
    /// Adds another feature vector into this one, column by column.
    pub fn accumulate(&mut self, other: &AudioFeatures) {
        self.acousticness += other.acousticness;
        self.danceability += other.danceability;
        self.energy += other.energy;
        self.instrumentalness += other.instrumentalness;
        self.liveness += other.liveness;
        self.loudness += other.loudness;
        self.speechiness += other.speechiness;
        self.tempo += other.tempo;
    }

    /// Divides every column by `n`, giving the per-column mean of an
    /// accumulated sum. `n` must be non-zero.
    pub fn divide(&self, n: f64) -> AudioFeatures {
        AudioFeatures {
            acousticness: self.acousticness / n,
            danceability: self.danceability / n,
            energy: self.energy / n,
            instrumentalness: self.instrumentalness / n,
            liveness: self.liveness / n,
            loudness: self.loudness / n,
            speechiness: self.speechiness / n,
            tempo: self.tempo / n,
        }
    }
}

/// One per-artist track-statistics row from `data/data_by_artist.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistTrackRow {
    pub artists: String,
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub tempo: f64,
}

impl ArtistTrackRow {
    pub fn features(&self) -> AudioFeatures {
        AudioFeatures {
            acousticness: self.acousticness,
            danceability: self.danceability,
            energy: self.energy,
            instrumentalness: self.instrumentalness,
            liveness: self.liveness,
            loudness: self.loudness,
            speechiness: self.speechiness,
            tempo: self.tempo,
        }
    }
}

/// One critic review row from `data/reviews.csv`. Scores are on a 0-10 scale.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRow {
    pub reviewid: i64,
    pub artist: String,
    pub score: f64,
    pub best_new_music: u8,
    pub pub_date: NaiveDate,
    pub pub_year: i32,
}

/// One per-artist row from `data/data_w_genres.csv`. The `genres` column is
/// a bracketed list-like string, e.g. `"['pop', 'dance']"`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreRow {
    pub genres: String,
    pub artists: String,
    pub popularity: f64,
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub tempo: f64,
}

impl GenreRow {
    pub fn features(&self) -> AudioFeatures {
        AudioFeatures {
            acousticness: self.acousticness,
            danceability: self.danceability,
            energy: self.energy,
            instrumentalness: self.instrumentalness,
            liveness: self.liveness,
            loudness: self.loudness,
            speechiness: self.speechiness,
            tempo: self.tempo,
        }
    }
}

/// One per-year row from `data/data_by_year.csv`, already aggregated at the
/// source: one row per calendar year.
#[derive(Debug, Clone, Deserialize)]
pub struct YearRow {
    pub year: i32,
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub tempo: f64,
}

impl YearRow {
    pub fn features(&self) -> AudioFeatures {
        AudioFeatures {
            acousticness: self.acousticness,
            danceability: self.danceability,
            energy: self.energy,
            instrumentalness: self.instrumentalness,
            liveness: self.liveness,
            loudness: self.loudness,
            speechiness: self.speechiness,
            tempo: self.tempo,
        }
    }
}
