use serde_json::{Number, Value};

use crate::{error::Error, model::movie::TasteRating};

#[derive(Debug)]
pub struct MovieExtractor {}

impl MovieExtractor {
    pub fn extract_ratings(raw_movies: &[Value]) -> Result<Vec<TasteRating>, Error> {
        raw_movies
            .iter()
            .enumerate()
            .map(|(index, movie)| MovieExtractor::extract_rating(movie, index))
            .collect()
    }

    /// Reduces one movie from the ratings listing to the five fields we keep.
    /// `index` is the movie's position in the listing and only used for errors.
    pub fn extract_rating(movie: &Value, index: usize) -> Result<TasteRating, Error> {
        let malformed = |reason: &str| Error::MalformedRecord {
            index,
            reason: reason.to_string(),
        };

        if !movie.is_object() {
            return Err(malformed("movie is not a JSON object"));
        }

        let year = MovieExtractor::extract_year(movie)
            .ok_or_else(|| malformed("missing or invalid 'year'"))?;
        let name = MovieExtractor::extract_name(movie)
            .ok_or_else(|| malformed("missing or invalid 'name'"))?;
        let user_rating = MovieExtractor::extract_user_rating(movie)
            .ok_or_else(|| malformed("missing or invalid 'highlightRating'"))?;
        let taste_rating = MovieExtractor::extract_taste_rating(movie)
            .ok_or_else(|| malformed("missing or invalid 'stats.starRating'"))?;
        let description = MovieExtractor::extract_description(movie)
            .ok_or_else(|| malformed("missing or invalid 'description'"))?;

        Ok(TasteRating {
            year,
            name,
            user_rating,
            taste_rating,
            description,
        })
    }

    fn extract_year(movie: &Value) -> Option<u32> {
        match movie.get("year")? {
            Value::Number(n) => n.as_u64().and_then(|y| u32::try_from(y).ok()),
            Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        }
    }

    fn extract_name(movie: &Value) -> Option<String> {
        movie.get("name")?.as_str().map(|s| s.to_string())
    }

    fn extract_user_rating(movie: &Value) -> Option<Number> {
        MovieExtractor::as_number(movie.get("highlightRating")?)
    }

    fn extract_taste_rating(movie: &Value) -> Option<Number> {
        MovieExtractor::as_number(movie.get("stats")?.get("starRating")?)
    }

    // Some movies come back with an explicit null description.
    fn extract_description(movie: &Value) -> Option<String> {
        match movie.get("description")? {
            Value::String(s) => Some(s.clone()),
            Value::Null => Some(String::new()),
            _ => None,
        }
    }

    fn as_number(value: &Value) -> Option<Number> {
        match value {
            Value::Number(n) => Some(n.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_movie() -> Value {
        json!({
            "id": 1234,
            "slug": "the-thing-1982",
            "year": 1982,
            "name": "The Thing",
            "description": "Antarctic research station, shape-shifting alien.",
            "highlightRating": 8,
            "poster": "/images/the-thing.jpg",
            "stats": {"starRating": 4.5, "ratingCount": 1520}
        })
    }

    #[test]
    fn keeps_only_the_five_fields() {
        let rating = MovieExtractor::extract_rating(&raw_movie(), 0).unwrap();

        assert_eq!(
            serde_json::to_value(&rating).unwrap(),
            json!({
                "year": 1982,
                "name": "The Thing",
                "user_rating": 8,
                "taste_rating": 4.5,
                "description": "Antarctic research station, shape-shifting alien."
            })
        );
    }

    #[test]
    fn missing_stats_is_malformed() {
        let mut movie = raw_movie();
        movie.as_object_mut().unwrap().remove("stats");

        match MovieExtractor::extract_rating(&movie, 7) {
            Err(Error::MalformedRecord { index, reason }) => {
                assert_eq!(index, 7);
                assert!(reason.contains("starRating"));
            }
            other => panic!("expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn missing_highlight_rating_is_malformed() {
        let mut movie = raw_movie();
        movie.as_object_mut().unwrap().remove("highlightRating");

        assert!(matches!(
            MovieExtractor::extract_rating(&movie, 0),
            Err(Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn accepts_string_year_and_null_description() {
        let mut movie = raw_movie();
        movie["year"] = json!("1982");
        movie["description"] = Value::Null;

        let rating = MovieExtractor::extract_rating(&movie, 0).unwrap();

        assert_eq!(rating.year, 1982);
        assert_eq!(rating.description, "");
    }

    #[test]
    fn reports_position_of_first_bad_movie() {
        let movies = vec![raw_movie(), json!({"name": "No year"}), raw_movie()];

        match MovieExtractor::extract_ratings(&movies) {
            Err(Error::MalformedRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected malformed record, got {:?}", other),
        }
    }
}
