//! # Movies API Service
//!
//! Talks to the movie catalog REST API. Every endpoint answers with an
//! envelope:
//!
//! ```text
//! { "status": 1, "data": ..., "meta": { "total": 42 } }
//! { "status": 0, "error": { "code": "MOVIE_EXISTS", "fields": { ... } } }
//! ```
//!
//! [`MoviesApi`] is the seam the view models depend on; [`HttpMoviesApi`]
//! is the reqwest-backed implementation.

use crate::repl::models::{Movie, MovieId, MovieQuery, NewMovie};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Server code for a duplicate title
pub const MOVIE_EXISTS: &str = "MOVIE_EXISTS";

/// Server code for a request that failed field validation
pub const FORMAT_ERROR: &str = "FORMAT_ERROR";

/// Server code for an unknown movie id
pub const NOT_FOUND: &str = "NOT_FOUND";

/// Errors from the movies REST API layer
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx status without a readable error envelope
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The API answered with `status: 0` and an error code
    #[error("{code}")]
    Rejected { code: String, fields: Vec<String> },

    /// The body did not match the envelope shape
    #[error("Invalid response from API: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Server error code, when the API rejected the request
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The movie title is already taken
    pub fn is_movie_exists(&self) -> bool {
        self.code() == Some(MOVIE_EXISTS)
    }

    /// The release year fell outside the range the server accepts
    pub fn is_year_out_of_range(&self) -> bool {
        matches!(self, ApiError::Rejected { fields, .. } if fields.iter().any(|field| field == "year"))
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == Some(NOT_FOUND) || matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// One page of the movie list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    /// Total matching records on the server, across all pages
    pub total: u64,
}

/// Operations the catalog offers
#[async_trait]
pub trait MoviesApi: Send + Sync {
    /// Fetch one page of movie summaries
    async fn list_movies(&self, query: &MovieQuery) -> Result<MoviePage, ApiError>;

    /// Fetch a movie with its full actor list
    async fn get_movie(&self, id: MovieId) -> Result<Movie, ApiError>;

    /// Create a movie and return the stored entity
    async fn create_movie(&self, movie: &NewMovie) -> Result<Movie, ApiError>;

    async fn delete_movie(&self, id: MovieId) -> Result<(), ApiError>;
}

#[derive(Debug, Deserialize)]
struct ListMeta {
    total: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    #[serde(default)]
    fields: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Response envelope shared by all endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    status: i64,
    data: Option<T>,
    meta: Option<ListMeta>,
    token: Option<String>,
    error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    fn require_data(self, what: &str) -> Result<T, ApiError> {
        self.data
            .ok_or_else(|| ApiError::InvalidResponse(format!("missing data in {what} response")))
    }

    pub(crate) fn require_token(self) -> Result<String, ApiError> {
        self.token
            .ok_or_else(|| ApiError::InvalidResponse("missing token".to_string()))
    }
}

/// Read a response body as an envelope, mapping failures to [`ApiError`]
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<Envelope<T>, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<Envelope<T>>(&body) {
        Ok(envelope) if envelope.status == 1 && status.is_success() => Ok(envelope),
        Ok(Envelope {
            error: Some(ErrorBody {
                code: Some(code),
                fields,
            }),
            ..
        }) => Err(ApiError::Rejected {
            code,
            fields: fields
                .map(|fields| fields.into_iter().map(|(name, _)| name).collect())
                .unwrap_or_default(),
        }),
        _ if !status.is_success() => Err(ApiError::Status {
            status: status.as_u16(),
            body,
        }),
        Ok(envelope) => Err(ApiError::InvalidResponse(format!(
            "unexpected envelope status {}",
            envelope.status
        ))),
        Err(e) => Err(ApiError::InvalidResponse(e.to_string())),
    }
}

/// HTTP client for the movies API
#[derive(Debug, Clone)]
pub struct HttpMoviesApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpMoviesApi {
    /// Create a client for an API base URL, e.g. `http://host:8000/api/v1`
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    pub fn with_client<S: Into<String>>(client: reqwest::Client, base_url: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!("Creating movies API client for {}", base_url);
        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// Attach the session token sent in the `Authorization` header
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, token),
            None => builder,
        }
    }
}

#[async_trait]
impl MoviesApi for HttpMoviesApi {
    async fn list_movies(&self, query: &MovieQuery) -> Result<MoviePage, ApiError> {
        tracing::debug!(?query, "GET /movies");
        let response = self
            .request(Method::GET, "/movies")
            .query(&query.to_params())
            .send()
            .await?;

        let mut envelope = read_envelope::<Vec<Movie>>(response).await?;
        let total = envelope.meta.take().map(|meta| meta.total);
        let movies = envelope.require_data("list")?;

        Ok(MoviePage {
            // Older API builds omit meta on the last page
            total: total.unwrap_or(u64::from(query.offset) + movies.len() as u64),
            movies,
        })
    }

    async fn get_movie(&self, id: MovieId) -> Result<Movie, ApiError> {
        tracing::debug!("GET /movies/{}", id);
        let response = self
            .request(Method::GET, &format!("/movies/{id}"))
            .send()
            .await?;

        read_envelope::<Movie>(response).await?.require_data("movie")
    }

    async fn create_movie(&self, movie: &NewMovie) -> Result<Movie, ApiError> {
        tracing::debug!(title = %movie.title, "POST /movies");
        let response = self
            .request(Method::POST, "/movies")
            .json(movie)
            .send()
            .await?;

        read_envelope::<Movie>(response).await?.require_data("create")
    }

    async fn delete_movie(&self, id: MovieId) -> Result<(), ApiError> {
        tracing::debug!("DELETE /movies/{}", id);
        let response = self
            .request(Method::DELETE, &format!("/movies/{id}"))
            .send()
            .await?;

        read_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }
}
