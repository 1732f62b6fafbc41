pub mod session;
pub mod taste_client;
