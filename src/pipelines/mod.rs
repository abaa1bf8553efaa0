//! The two analysis pipelines.
//!
//! Each pipeline loads its inputs once, passes immutable tables between
//! stages, and exposes a `render_charts` step gated behind the CLI's
//! `--plot` flag.

pub mod genres;
pub mod reviews;

use crate::records::AudioFeatures;

/// Splits feature rows into the six attribute series charted by both
/// pipelines, in legend order.
pub(crate) fn attribute_series<'a>(
    rows: impl Iterator<Item = &'a AudioFeatures>,
) -> Vec<(&'static str, Vec<f64>)> {
    let mut danceability = Vec::new();
    let mut energy = Vec::new();
    let mut instrumentalness = Vec::new();
    let mut liveness = Vec::new();
    let mut acousticness = Vec::new();
    let mut speechiness = Vec::new();

    for features in rows {
        danceability.push(features.danceability);
        energy.push(features.energy);
        instrumentalness.push(features.instrumentalness);
        liveness.push(features.liveness);
        acousticness.push(features.acousticness);
        speechiness.push(features.speechiness);
    }

    vec![
        ("Danceability", danceability),
        ("Energy", energy),
        ("Instrumentalness", instrumentalness),
        ("Liveness", liveness),
        ("Acousticness", acousticness),
        ("Speechiness", speechiness),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_series_order_and_length() {
        let rows = vec![
            AudioFeatures {
                danceability: 0.5,
                speechiness: 0.1,
                ..Default::default()
            },
            AudioFeatures {
                danceability: 0.7,
                speechiness: 0.2,
                ..Default::default()
            },
        ];

        let series = attribute_series(rows.iter());
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].0, "Danceability");
        assert_eq!(series[0].1, vec![0.5, 0.7]);
        assert_eq!(series[5].0, "Speechiness");
        assert_eq!(series[5].1, vec![0.1, 0.2]);
    }
}
