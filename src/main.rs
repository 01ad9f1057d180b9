//! # MovieLine Main Entry Point
//!
//! Loads the profile, makes sure there is a session token, then runs the
//! catalog REPL on the terminal.

use anyhow::{Context, Result};
use movieline::cmd_args::CommandLineArgs;
use movieline::config::{
    get_profile_path, token_path_for, Profile, API_URL_ENV_VAR, LOG_LEVEL_ENV_VAR,
};
use movieline::repl::io::{TerminalLineStream, TerminalRenderStream};
use movieline::repl::services::{AuthService, HttpMoviesApi, Session};
use movieline::AppController;
use std::sync::Arc;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Crates that are too chatty below warn
const QUIET_CRATES: &[&str] = &["reqwest", "hyper", "hyper_util", "rustls", "tokio", "mio"];

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose());

    let profile_path = get_profile_path();
    tracing::debug!(
        "Loading profile '{}' from '{}'",
        cmd_args.profile(),
        profile_path
    );
    let mut profile = Profile::load(cmd_args.profile(), &profile_path)
        .with_context(|| format!("Failed to load profile '{}'", cmd_args.profile()))?;

    #[allow(clippy::disallowed_methods)]
    let env_api_url = std::env::var(API_URL_ENV_VAR).ok();
    if let Some(api_url) = cmd_args.api_url().map(str::to_string).or(env_api_url) {
        profile.set_api_url(api_url);
    }
    tracing::debug!("Profile loaded, API: {}", profile.api_url());

    let client = reqwest::Client::new();
    let mut session = Session::hydrate(token_path_for(&profile_path));
    if cmd_args.reset_session() {
        tracing::info!("Discarding saved session token");
        session.clear();
    }
    if !session.is_authenticated() {
        if let Some(token) = profile.token() {
            session.set_token(token.to_string());
        }
    }
    let auth = AuthService::new(client.clone(), profile.api_url());
    if let Err(e) = session.ensure_token(&auth, profile.credentials()).await {
        // The catalog may still answer anonymous requests
        tracing::warn!("Authentication failed: {}", e);
        eprintln!("Authentication failed: {e}");
    }

    let api = HttpMoviesApi::with_client(client, profile.api_url())
        .with_token(session.token().map(str::to_string));

    let mut app = AppController::with_io_streams(
        Arc::new(api),
        &profile,
        &profile_path,
        TerminalLineStream::new(),
        TerminalRenderStream::new(),
    )
    .with_initial_import(cmd_args.import().cloned());

    app.run().await
}

fn init_tracing_subscriber(verbose: bool) {
    #[allow(clippy::disallowed_methods)]
    let level = std::env::var(LOG_LEVEL_ENV_VAR)
        .ok()
        .filter(|level| !level.trim().is_empty())
        .unwrap_or_else(|| if verbose { "debug" } else { "warn" }.to_string());

    let directives = QUIET_CRATES
        .iter()
        .fold(level.to_lowercase(), |acc, krate| format!("{acc},{krate}=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
