use serde_json::Value;

use crate::{
    clients::{session::Session, taste_client::TasteApi},
    error::Error,
};

pub struct RatingsFetcher<'a, A: TasteApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: TasteApi + ?Sized> RatingsFetcher<'a, A> {
    pub fn new(api: &'a A) -> Self {
        RatingsFetcher { api }
    }

    /// Walks the ratings listing page by page until the API hands back an empty
    /// page. Movies are returned in the order the API lists them.
    pub async fn get_all_ratings(&self, session: &Session, user: &str) -> Result<Vec<Value>, Error> {
        log::info!("Fetching ratings for user {}", user);

        let mut movies = vec![];
        let mut offset = 0;

        loop {
            let mut page = self.api.fetch_ratings_page(session, user, offset).await?;
            if page.is_empty() {
                break;
            }

            log::info!("Fetched {} ratings at offset {}", page.len(), offset);
            offset += page.len();
            movies.append(&mut page);
        }

        log::info!("Total ratings fetched for {}: {}", user, movies.len());
        Ok(movies)
    }
}
