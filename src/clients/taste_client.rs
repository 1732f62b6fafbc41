use async_trait::async_trait;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client, StatusCode,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{clients::session::Session, error::Error};

const BASE_URL: &str = "https://www.taste.io";

/// The two taste.io calls the exporter needs. Every failure is final; a retrying
/// implementation can wrap this without the pagination loop noticing.
#[async_trait]
pub trait TasteApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Session, Error>;

    /// One page of the user's ratings, starting at `offset`. An empty page means
    /// there is nothing left.
    async fn fetch_ratings_page(
        &self,
        session: &Session,
        user: &str,
        offset: usize,
    ) -> Result<Vec<Value>, Error>;
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RatingsPage {
    movies: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct TasteClient {
    client: Client,
    base_url: String,
}

impl TasteClient {
    pub fn new() -> Result<Self, Error> {
        TasteClient::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let user_agent = HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.132 Safari/537.36");
        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(TasteClient::browser_headers())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn login_url(&self) -> String {
        format!("{}/auth/local", self.base_url)
    }

    pub fn ratings_url(&self, user: &str, offset: usize) -> String {
        format!("{}/api/users/{}/ratings?offset={}", self.base_url, user, offset)
    }

    // Accept-Encoding is left to reqwest so it can undo brotli/gzip for us.
    fn browser_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9,he;q=0.8"),
        );
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers
    }
}

#[async_trait]
impl TasteApi for TasteClient {
    async fn login(&self, email: &str, password: &str) -> Result<Session, Error> {
        let response = self
            .client
            .post(self.login_url())
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(Error::AuthenticationFailed(format!(
                "server returned <{}>",
                response.status()
            )));
        }

        let set_cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .collect();

        let token = response
            .json::<LoginResponse>()
            .await
            .map_err(|e| Error::AuthenticationFailed(format!("unexpected login response: {}", e)))?
            .token
            .ok_or_else(|| {
                Error::AuthenticationFailed("login response carries no token".to_string())
            })?;

        Ok(Session::from_login(
            set_cookies.iter().map(|c| c.as_str()),
            &token,
        ))
    }

    async fn fetch_ratings_page(
        &self,
        session: &Session,
        user: &str,
        offset: usize,
    ) -> Result<Vec<Value>, Error> {
        let url = self.ratings_url(user, offset);
        log::debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, session.cookie_header())
            .send()
            .await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        check_ratings_response(response.status(), content_type.as_deref(), &url)?;

        let page: RatingsPage = response.json().await?;
        Ok(page.movies)
    }
}

fn check_ratings_response(
    status: StatusCode,
    content_type: Option<&str>,
    url: &str,
) -> Result<(), Error> {
    if status != StatusCode::OK {
        return Err(Error::RequestFailed(format!(
            "{} returned <{}>",
            url, status
        )));
    }

    match content_type {
        Some(ct) if ct.contains("application/json") => Ok(()),
        other => Err(Error::RequestFailed(format!(
            "{} answered with content type <{}> instead of json",
            url,
            other.unwrap_or("")
        ))),
    }
}
