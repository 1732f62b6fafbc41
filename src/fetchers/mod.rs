pub mod ratings_fetcher;
