//! # Auth Service
//!
//! Obtains the session token the movies API expects. A new user is
//! registered first; when the server reports the user already exists the
//! service falls back to logging in with the same credentials.

use super::http::{read_envelope, ApiError};
use crate::config::Credentials;
use serde::Serialize;
use std::path::PathBuf;

/// Server codes meaning "this email is already registered"
const USER_EXISTS_CODES: [&str; 2] = ["USER_EXISTS", "EMAIL_NOT_UNIQUE"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    email: &'a str,
    name: &'a str,
    password: &'a str,
    confirm_password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the `/users` and `/sessions` endpoints
#[derive(Debug, Clone)]
pub struct AuthService {
    client: reqwest::Client,
    base_url: String,
}

impl AuthService {
    pub fn new<S: Into<String>>(client: reqwest::Client, base_url: S) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Register the user, or log in when the email is taken
    pub async fn register_or_login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let body = RegisterBody {
            email: &credentials.email,
            name: &credentials.name,
            password: &credentials.password,
            confirm_password: &credentials.password,
        };
        let response = self
            .client
            .post(format!("{}/users", self.base_url))
            .json(&body)
            .send()
            .await?;

        match read_envelope::<serde_json::Value>(response).await {
            Ok(envelope) => {
                tracing::info!("Registered user {}", credentials.email);
                envelope.require_token()
            }
            Err(e) if e.code().is_some_and(|code| USER_EXISTS_CODES.contains(&code)) => {
                tracing::debug!("User {} already exists, logging in", credentials.email);
                self.login(credentials).await
            }
            Err(e) => {
                tracing::error!("Registration failed: {}", e);
                Err(e)
            }
        }
    }

    /// Open a session for existing credentials
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let body = LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response = self
            .client
            .post(format!("{}/sessions", self.base_url))
            .json(&body)
            .send()
            .await?;

        let token = read_envelope::<serde_json::Value>(response)
            .await
            .inspect_err(|e| tracing::error!("Login failed: {}", e))?
            .require_token()?;
        tracing::info!("Logged in as {}", credentials.email);
        Ok(token)
    }
}

/// The session token owned by the running application
///
/// The token is persisted to a file so later runs skip registration.
#[derive(Debug, Clone)]
pub struct Session {
    token: Option<String>,
    token_path: Option<PathBuf>,
}

impl Session {
    /// Session without persistence
    pub fn in_memory(token: Option<String>) -> Self {
        Self {
            token,
            token_path: None,
        }
    }

    /// Session backed by a token file; an existing file hydrates the token
    pub fn hydrate(token_path: PathBuf) -> Self {
        let token = match std::fs::read_to_string(&token_path) {
            Ok(content) => Some(content.trim().to_string()).filter(|token| !token.is_empty()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Could not read token file '{}': {}", token_path.display(), e);
                None
            }
        };
        tracing::debug!("Session hydrated, token present: {}", token.is_some());
        Self {
            token,
            token_path: Some(token_path),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Store a token and persist it when backed by a file
    pub fn set_token(&mut self, token: String) {
        if let Some(path) = &self.token_path {
            let written = path
                .parent()
                .map_or(Ok(()), std::fs::create_dir_all)
                .and_then(|_| std::fs::write(path, &token));
            if let Err(e) = written {
                tracing::warn!("Could not persist token to '{}': {}", path.display(), e);
            }
        }
        self.token = Some(token);
    }

    /// Forget the token and delete its file
    pub fn clear(&mut self) {
        self.token = None;
        if let Some(path) = &self.token_path {
            if let Err(e) = std::fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Could not remove token file '{}': {}", path.display(), e);
                }
            }
        }
    }

    /// Make sure a token is present, registering or logging in if needed
    pub async fn ensure_token(
        &mut self,
        auth: &AuthService,
        credentials: Option<&Credentials>,
    ) -> Result<(), ApiError> {
        if self.is_authenticated() {
            return Ok(());
        }
        let Some(credentials) = credentials else {
            tracing::warn!("No token and no credentials configured; requests are unauthenticated");
            return Ok(());
        };
        let token = auth.register_or_login(credentials).await?;
        self.set_token(token);
        Ok(())
    }
}
