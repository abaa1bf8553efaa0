//! Review-score pipeline: critic review scores joined against per-artist
//! streaming feature averages.

use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

use crate::aggregate::{count_by_key, fold_key, inner_join, mean_by_key, mean_score_by_key, top_n_by};
use crate::buckets::{BucketAggregate, mean_by_bucket};
use crate::charts;
use crate::loader::load_records;
use crate::pipelines::attribute_series;
use crate::records::{ArtistTrackRow, AudioFeatures, ReviewRow};

/// Only reviews at or above this score count toward an artist's tally in
/// the most-reviewed ranking.
const TOP_SCORE_CUTOFF: f64 = 8.0;

/// Compilation placeholder excluded from the most-reviewed ranking.
const VARIOUS_ARTISTS: &str = "various artists";

/// One of the most-reviewed artists, with its review tally and streaming
/// feature averages.
#[derive(Debug, Clone)]
pub struct TopArtist {
    pub artist: String,
    pub review_count: usize,
    pub features: AudioFeatures,
}

/// One artist's mean review score joined with its feature averages.
#[derive(Debug, Clone)]
pub struct ScatterRow {
    pub artist: String,
    pub score: f64,
    pub features: AudioFeatures,
}

/// The review pipeline's base tables: per-artist feature means (keys folded
/// to lower case) and the raw review rows.
#[derive(Debug)]
pub struct ReviewData {
    artist_features: Vec<(String, AudioFeatures)>,
    reviews: Vec<ReviewRow>,
}

impl ReviewData {
    /// Loads and prepares `data_by_artist.csv` and `reviews.csv` from
    /// `data_dir`.
    pub fn load(data_dir: &Path) -> Result<ReviewData> {
        let tracks: Vec<ArtistTrackRow> =
            load_records(&data_dir.join("data_by_artist.csv"))?;
        let artist_features =
            mean_by_key(tracks.iter().map(|r| (fold_key(&r.artists), r.features())));
        info!(artists = artist_features.len(), "artist feature table built");

        let reviews: Vec<ReviewRow> = load_records(&data_dir.join("reviews.csv"))?;
        info!(reviews = reviews.len(), "review rows loaded");

        Ok(ReviewData {
            artist_features,
            reviews,
        })
    }

    pub fn artist_count(&self) -> usize {
        self.artist_features.len()
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// The `n` artists with the most reviews scoring 8.0 or higher, joined
    /// to their streaming feature averages. "various artists" is excluded;
    /// artists absent from the streaming dataset drop out of the inner join.
    pub fn top_reviewed(&self, n: usize) -> Vec<TopArtist> {
        let eligible = self
            .reviews
            .iter()
            .filter(|r| r.score >= TOP_SCORE_CUTOFF)
            .filter(|r| r.artist != VARIOUS_ARTISTS)
            .map(|r| fold_key(&r.artist));

        let counts = count_by_key(eligible);
        debug!(artists = counts.len(), "artists with high-scored reviews");

        let joined = inner_join(counts, &self.artist_features);
        top_n_by(joined, n, |(_, count, _)| *count as f64)
            .into_iter()
            .map(|(artist, review_count, features)| TopArtist {
                artist,
                review_count,
                features,
            })
            .collect()
    }

    /// Per-artist mean review score inner-joined with the feature table.
    pub fn scatter_rows(&self) -> Vec<ScatterRow> {
        let score_means = mean_score_by_key(
            self.reviews
                .iter()
                .map(|r| (fold_key(&r.artist), r.score)),
        );

        inner_join(score_means, &self.artist_features)
            .into_iter()
            .map(|(artist, score, features)| ScatterRow {
                artist,
                score,
                features,
            })
            .collect()
    }

    /// Buckets the joined artists by mean review score and averages each
    /// bucket.
    pub fn score_buckets(&self) -> Vec<BucketAggregate> {
        mean_by_bucket(
            self.scatter_rows()
                .into_iter()
                .map(|row| (row.score, row.features)),
        )
    }

    /// Renders the three review charts into `out_dir`.
    pub fn render_charts(&self, out_dir: &Path) -> Result<()> {
        let top5 = self.top_reviewed(5);
        let labels: Vec<String> = top5.iter().map(|a| a.artist.clone()).collect();
        let series = attribute_series(top5.iter().map(|a| &a.features));
        charts::grouped_bar_chart(
            &out_dir.join("pitchforkSpotifyData_combined_attributes_of_top_5_reviewed_artists.png"),
            "Music Attributes by Top 5 Artists",
            "Values",
            &labels,
            &series,
        )?;

        let buckets = self.score_buckets();
        let labels: Vec<String> = buckets.iter().map(|b| b.bucket.to_string()).collect();
        let series = attribute_series(buckets.iter().map(|b| &b.features));
        charts::grouped_bar_chart(
            &out_dir.join("pitchforkSpotifyData_combined_attributes_by_score_group.png"),
            "Music Attributes by Score Groupings",
            "Values",
            &labels,
            &series,
        )?;

        let top500 = top_n_by(self.scatter_rows(), 500, |row| row.score);
        let panel = |pick: fn(&AudioFeatures) -> f64| -> Vec<(f64, f64)> {
            top500
                .iter()
                .map(|row| (row.score, pick(&row.features)))
                .collect()
        };
        let panels = [
            ("Liveness", panel(|f| f.liveness)),
            ("Loudness", panel(|f| f.loudness)),
            ("Speechiness", panel(|f| f.speechiness)),
            ("Instrumentalness", panel(|f| f.instrumentalness)),
        ];
        charts::scatter_grid(
            &out_dir.join("pitchforkSpotifyData_combined_score_vs_music_attribute.png"),
            "Music Attribute Ratings for the Top 500 Rated Artists on Pitchfork",
            "Average Review Score",
            "Music Attribute Value",
            &panels,
        )?;

        Ok(())
    }
}
