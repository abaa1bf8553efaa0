//! Genre and yearly audio-feature pipeline.
//!
//! Cleans the per-artist genre dataset (empty genre lists and
//! zero-popularity rows go, subgenres collapse to the primary genre),
//! averages features per genre, joins in per-genre artist counts, and keeps
//! the per-year feature table for the trend chart.

use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

use crate::aggregate::{count_by_key, inner_join, mean_by_key, primary_genre, top_n_by};
use crate::charts;
use crate::loader::load_records;
use crate::pipelines::attribute_series;
use crate::records::{AudioFeatures, FEATURE_NAMES, GenreRow, YearRow};

/// Averaged audio features of one primary genre, joined with the number of
/// artists tagged with it.
#[derive(Debug, Clone)]
pub struct GenreAggregate {
    pub genre: String,
    pub features: AudioFeatures,
    pub artist_count: usize,
}

/// The genre pipeline's two output tables, built once per run.
#[derive(Debug)]
pub struct GenreData {
    pub by_genre: Vec<GenreAggregate>,
    pub by_year: Vec<(i32, AudioFeatures)>,
}

impl GenreData {
    /// Loads and aggregates `data_w_genres.csv` and `data_by_year.csv` from
    /// `data_dir`.
    pub fn load(data_dir: &Path) -> Result<GenreData> {
        let rows: Vec<GenreRow> = load_records(&data_dir.join("data_w_genres.csv"))?;
        debug!(rows = rows.len(), "raw genre rows loaded");

        // drop artists without genres or with zero popularity before grouping
        let cleaned: Vec<&GenreRow> = rows
            .iter()
            .filter(|r| r.genres != "[]" && r.popularity != 0.0)
            .collect();
        debug!(rows = cleaned.len(), "genre rows after cleaning");

        let means = mean_by_key(
            cleaned
                .iter()
                .map(|r| (primary_genre(&r.genres), r.features())),
        );
        let counts = count_by_key(cleaned.iter().map(|r| primary_genre(&r.genres)));

        let by_genre = inner_join(means, &counts)
            .into_iter()
            .map(|(genre, features, artist_count)| GenreAggregate {
                genre,
                features,
                artist_count,
            })
            .collect::<Vec<_>>();
        info!(genres = by_genre.len(), "per-genre aggregates built");

        let year_rows: Vec<YearRow> = load_records(&data_dir.join("data_by_year.csv"))?;
        let by_year: Vec<(i32, AudioFeatures)> =
            year_rows.iter().map(|r| (r.year, r.features())).collect();
        info!(years = by_year.len(), "per-year table built");

        Ok(GenreData { by_genre, by_year })
    }

    /// Column names of the per-genre table, index key first, count last.
    pub fn columns() -> Vec<&'static str> {
        let mut cols = vec!["genres"];
        cols.extend(FEATURE_NAMES);
        cols.push("artists");
        cols
    }

    /// The `n` genres with the most artists, descending.
    pub fn top_genres(&self, n: usize) -> Vec<GenreAggregate> {
        top_n_by(self.by_genre.clone(), n, |g| g.artist_count as f64)
    }

    /// The `n` rows with the largest year value, descending. With one row
    /// per year in the source this is the `n` most recent years.
    pub fn recent_years(&self, n: usize) -> Vec<(i32, AudioFeatures)> {
        top_n_by(self.by_year.clone(), n, |(year, _)| *year as f64)
    }

    /// Renders the three genre charts into `out_dir`.
    pub fn render_charts(&self, out_dir: &Path) -> Result<()> {
        let top10 = self.top_genres(10);
        let labels: Vec<String> = top10.iter().map(|g| g.genre.clone()).collect();
        let counts: Vec<f64> = top10.iter().map(|g| g.artist_count as f64).collect();
        charts::horizontal_bar_chart(
            &out_dir.join("spotifyData_top_10_genres_by_number_of_artists.png"),
            "Top Genres in Spotify by Number of Artists",
            "Total Artists",
            &labels,
            &counts,
        )?;

        let top5 = self.top_genres(5);
        let labels: Vec<String> = top5.iter().map(|g| g.genre.clone()).collect();
        let series = attribute_series(top5.iter().map(|g| &g.features));
        charts::grouped_bar_chart(
            &out_dir.join("spotifyData_music_attributes_of_top_genres.png"),
            "Music Attributes by Genre",
            "Values",
            &labels,
            &series,
        )?;

        let years = self.recent_years(70);
        let year_axis: Vec<i32> = years.iter().map(|(year, _)| *year).collect();
        let series = attribute_series(years.iter().map(|(_, features)| features));
        charts::year_line_chart(
            &out_dir.join("spotifyData_music_attributes_by_year.png"),
            "Music Attributes Over the Years",
            "Values",
            &year_axis,
            &series,
        )?;

        Ok(())
    }
}
