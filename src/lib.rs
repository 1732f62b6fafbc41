use std::path::{Path, PathBuf};

pub mod clients;
use clients::taste_client::{TasteApi, TasteClient};

pub mod config;
use config::Args;

pub mod error;
use error::Error;

pub mod extractors;
use extractors::movie_extractor::MovieExtractor;

pub mod fetchers;
use fetchers::ratings_fetcher::RatingsFetcher;

pub mod model;

pub mod persisters;
use persisters::{csv_writer::CsvWriter, json_writer::JsonWriter};

#[derive(Debug)]
pub struct RunReport {
    pub ratings: usize,
    pub files: Vec<PathBuf>,
}

/// Logs into taste.io with the resolved configuration and writes the user's
/// ratings to the current directory.
pub async fn run(args: Args) -> Result<RunReport, Error> {
    let client = TasteClient::new()?;
    run_with(&client, &args, Path::new(".")).await
}

pub async fn run_with<A: TasteApi + ?Sized>(
    api: &A,
    args: &Args,
    out_dir: &Path,
) -> Result<RunReport, Error> {
    let config = config::resolve(args)?;
    let user = config.user();

    log::info!("Logging in to taste.io as {}", config.email);
    let session = api.login(&config.email, &config.password).await?;

    let raw_movies = RatingsFetcher::new(api)
        .get_all_ratings(&session, user)
        .await?;
    let ratings = MovieExtractor::extract_ratings(&raw_movies)?;

    let formats = config.output_formats(args);
    let base_name = format!("{}_taste_ratings", user);
    let mut files = vec![];

    if formats.json {
        let path = out_dir.join(format!("{}.json", base_name));
        JsonWriter::save_ratings_to_json(&ratings, &path)?;
        log::info!("Successfully generated ratings file: {}", path.display());
        files.push(path);
    }

    if formats.csv {
        let path = out_dir.join(format!("{}.csv", base_name));
        CsvWriter::save_ratings_to_csv(&ratings, &path)?;
        log::info!("Successfully generated ratings file: {}", path.display());
        files.push(path);
    }

    Ok(RunReport {
        ratings: ratings.len(),
        files,
    })
}
