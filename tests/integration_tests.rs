use music_data_plots::buckets::ScoreBucket;
use music_data_plots::pipelines::genres::GenreData;
use music_data_plots::pipelines::reviews::ReviewData;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir); // clean up any prior run
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_artist_csv(dir: &Path) {
    fs::write(
        dir.join("data_by_artist.csv"),
        "artists,acousticness,danceability,duration_ms,energy,instrumentalness,liveness,loudness,speechiness,tempo,valence,popularity,key,mode,count\n\
         A,0.1,0.5,200000,0.6,0.0,0.2,-6.0,0.05,120.0,0.5,50,5,1,10\n\
         B,0.2,0.7,210000,0.5,0.1,0.3,-7.0,0.04,110.0,0.4,45,4,1,8\n\
         C,0.3,0.9,220000,0.4,0.2,0.4,-8.0,0.03,100.0,0.3,40,3,0,6\n",
    )
    .unwrap();
}

fn write_reviews_csv(dir: &Path, lines: &[(&str, f64)]) {
    let mut csv = String::from(
        "reviewid,title,artist,url,score,best_new_music,author,pub_date,pub_weekday,pub_day,pub_month,pub_year\n",
    );
    for (id, (artist, score)) in lines.iter().enumerate() {
        csv.push_str(&format!(
            "{},album,{artist},http://x,{score},0,author,2016-03-02,2,2,3,2016\n",
            id + 1
        ));
    }
    fs::write(dir.join("reviews.csv"), csv).unwrap();
}

#[test]
fn test_review_pipeline_top5_scenario() {
    // 10 qualifying reviews for "a", 2 for "b", none for "c"
    let dir = fixture_dir("music_data_plots_it_top5");
    write_artist_csv(&dir);

    let mut reviews: Vec<(&str, f64)> = Vec::new();
    for _ in 0..10 {
        reviews.push(("a", 8.4));
    }
    for _ in 0..2 {
        reviews.push(("b", 8.9));
    }
    reviews.push(("c", 6.0)); // below cutoff, never counted
    write_reviews_csv(&dir, &reviews);

    let data = ReviewData::load(&dir).unwrap();
    let top = data.top_reviewed(5);

    assert!(top.len() <= 5);
    assert_eq!(top[0].artist, "a");
    assert_eq!(top[0].review_count, 10);
    assert!(top.iter().any(|t| t.artist == "b"));
    // no qualifying reviews means no row on the left side of the inner join
    assert!(top.iter().all(|t| t.artist != "c"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_review_pipeline_join_keys_case_folded() {
    let dir = fixture_dir("music_data_plots_it_casefold");
    write_artist_csv(&dir); // upper-case artists A, B, C

    write_reviews_csv(&dir, &[("a", 9.0), ("A", 7.0), ("b", 8.0)]);

    let data = ReviewData::load(&dir).unwrap();
    let rows = data.scatter_rows();

    // "a" and "A" fold to one key; the join holds it once with the mean score
    let a = rows.iter().find(|r| r.artist == "a").unwrap();
    assert!((a.score - 8.0).abs() < 1e-12);

    // every joined key exists case-folded on both sides
    assert!(rows.len() <= 3);
    for row in &rows {
        assert!(["a", "b", "c"].contains(&row.artist.as_str()));
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_review_pipeline_bucket_assignment() {
    let dir = fixture_dir("music_data_plots_it_buckets");
    write_artist_csv(&dir);
    // one artist per bucket boundary of interest
    write_reviews_csv(&dir, &[("a", 6.0), ("b", 6.01), ("c", 10.0)]);

    let data = ReviewData::load(&dir).unwrap();
    let buckets = data.score_buckets();

    let kinds: Vec<ScoreBucket> = buckets.iter().map(|b| b.bucket).collect();
    assert_eq!(
        kinds,
        vec![
            ScoreBucket::SixOrLower,
            ScoreBucket::SixToSeven,
            ScoreBucket::NineToTen,
        ]
    );
    assert_eq!(buckets[0].bucket.to_string(), "6 or lower");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_genre_pipeline_end_to_end() {
    let dir = fixture_dir("music_data_plots_it_genres");
    fs::write(
        dir.join("data_w_genres.csv"),
        "genres,artists,acousticness,danceability,duration_ms,energy,instrumentalness,liveness,loudness,speechiness,tempo,valence,popularity,key,mode,count\n\
         \"['indie rock', 'lo-fi']\",One,0.3,0.5,200000,0.6,0.1,0.2,-7.0,0.05,120.0,0.5,61,5,1,9\n\
         \"['indie rock']\",Two,0.5,0.6,205000,0.5,0.2,0.3,-8.0,0.04,118.0,0.4,55,4,1,7\n\
         \"['ambient']\",Three,0.9,0.2,300000,0.1,0.8,0.1,-20.0,0.03,80.0,0.2,30,2,0,5\n\
         \"[]\",Four,0.5,0.5,210000,0.5,0.1,0.2,-9.0,0.05,100.0,0.5,50,4,1,6\n",
    )
    .unwrap();
    fs::write(
        dir.join("data_by_year.csv"),
        "year,acousticness,danceability,duration_ms,energy,instrumentalness,liveness,loudness,speechiness,tempo,valence,popularity,key,mode\n\
         2000,0.4,0.6,200000,0.7,0.05,0.2,-7.0,0.06,122.0,0.6,55,5,1\n\
         2001,0.38,0.62,201000,0.71,0.05,0.21,-6.9,0.06,123.0,0.61,56,5,1\n",
    )
    .unwrap();

    let data = GenreData::load(&dir).unwrap();

    // "[]" excluded entirely; subgenres collapsed to the primary genre
    let genres: Vec<&str> = data.by_genre.iter().map(|g| g.genre.as_str()).collect();
    assert_eq!(genres, vec!["ambient", "indie rock"]);

    let indie = data
        .by_genre
        .iter()
        .find(|g| g.genre == "indie rock")
        .unwrap();
    assert_eq!(indie.artist_count, 2);
    assert!((indie.features.danceability - 0.55).abs() < 1e-12);

    let top = data.top_genres(1);
    assert_eq!(top[0].genre, "indie rock");

    let years: Vec<i32> = data.recent_years(70).iter().map(|(y, _)| *y).collect();
    assert_eq!(years, vec![2001, 2000]);

    fs::remove_dir_all(&dir).unwrap();
}
