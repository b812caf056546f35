use anyhow::{Context, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, header};
use thiserror::Error;
use url::Url;

use crate::config::Config;
use crate::models::{NewUser, User};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Failure kinds of one users-endpoint round trip. Callers decide whether to
/// surface or retry; nothing here escapes as an unhandled error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("request failed with HTTP status {status}")]
    Fetch { status: u16 },
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ApiError::Fetch { status: status.as_u16() }
        } else if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[derive(Debug)]
pub struct Api {
    users_url: Url,
    client: Client,
}

impl Api {
    pub fn new(config: &Config) -> Result<Api> {
        let users_url = Url::parse(&format!(
            "{}/users",
            config.users_api.as_str().trim_end_matches('/')
        ))
        .context("Fail to build users endpoint url")?;
        let client = Self::create_client()?;

        Ok(Self { users_url, client })
    }

    fn default_headers() -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, USER_AGENT.parse()?);
        Ok(headers)
    }

    fn create_client() -> Result<Client> {
        let client = Client::builder()
            .default_headers(Self::default_headers()?)
            .no_proxy()
            .build()
            .context("Fail to build client")?;
        Ok(client)
    }

    /// `GET /users` with the derived sort query string (`""` or
    /// `"?sortBy=<field>&order=<asc|desc>"`). The full dataset is returned;
    /// pagination is client-side.
    pub async fn get_users(&self, query: &str) -> Result<Vec<User>, ApiError> {
        let mut url = self.users_url.clone();
        if let Some(params) = query.strip_prefix('?') {
            url.set_query(Some(params));
        }

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<User>>()
            .await?;

        Ok(body)
    }

    /// `POST /users`, returning the record the server created.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        let body = self
            .client
            .post(self.users_url.clone())
            .json(user)
            .send()
            .await?
            .error_for_status()?
            .json::<User>()
            .await?;

        Ok(body)
    }
}
