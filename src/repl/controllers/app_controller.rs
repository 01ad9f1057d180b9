//! # REPL Application Controller
//!
//! The controller orchestrates the REPL components and manages the event loop.
//! It connects input lines to commands, runs page loads in the background and
//! coordinates view updates.
//!
//! One loop iteration waits for whichever comes first:
//!
//! ```text
//!   input line ───────▶ command registry ──▶ CommandEvents ──▶ ViewModel
//!   page response ────▶ ViewModel::apply_page_response (stale ones dropped)
//!   filter deadline ──▶ ViewModel::settle_filters ──▶ new page load
//! ```

use crate::config::Profile;
use crate::repl::{
    commands::{CommandContext, CommandEvent, CommandInput, CommandRegistry, ViewModelSnapshot},
    events::SimpleEventBus,
    io::{LineStream, RenderStream},
    services::{encoding_for_label, MoviesApi},
    view_models::{fetch_page, PageRequest, PageResponse, ViewModel},
    views::{TerminalRenderer, ViewRenderer},
};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// The main application controller that orchestrates the MVVM pattern
pub struct AppController<LS: LineStream, RS: RenderStream> {
    view_model: ViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    line_stream: LS,
    /// Dropped once input ends so the drain sees the channel close
    page_tx: Option<mpsc::UnboundedSender<PageResponse>>,
    page_rx: mpsc::UnboundedReceiver<PageResponse>,
    initial_import: Option<PathBuf>,
    should_quit: bool,
}

impl<LS: LineStream, RS: RenderStream> AppController<LS, RS> {
    /// Create new application controller with injected I/O streams
    pub fn with_io_streams(
        api: Arc<dyn MoviesApi>,
        profile: &Profile,
        profile_path: &str,
        line_stream: LS,
        render_stream: RS,
    ) -> Self {
        let mut view_model = ViewModel::new(api, crate::config::MOVIES_PER_PAGE);
        Self::configure_view_model(&mut view_model, profile, profile_path);
        Self::from_view_model(view_model, line_stream, render_stream)
    }

    /// Create a controller around an already configured ViewModel
    pub fn from_view_model(view_model: ViewModel, line_stream: LS, render_stream: RS) -> Self {
        let (page_tx, page_rx) = mpsc::unbounded_channel();
        Self {
            view_model,
            view_renderer: TerminalRenderer::new(render_stream),
            command_registry: CommandRegistry::new(),
            line_stream,
            page_tx: Some(page_tx),
            page_rx,
            initial_import: None,
            should_quit: false,
        }
    }

    /// Import this file once the first page is shown
    pub fn with_initial_import(mut self, path: Option<PathBuf>) -> Self {
        self.initial_import = path;
        self
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    /// Configure view model with profile settings
    fn configure_view_model(view_model: &mut ViewModel, profile: &Profile, profile_path: &str) {
        view_model.set_profile_info(profile.name().to_string(), profile_path.to_string());
        view_model.set_import_encoding(profile.import_encoding().and_then(encoding_for_label));
        view_model.set_event_bus(Box::new(SimpleEventBus::with_tracing()));
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        let request = self.view_model.mount_list();
        self.view_model.load_page(request).await;

        if let Some(path) = self.initial_import.take() {
            tracing::info!("Importing '{}' before start", path.display());
            if let Err(e) = self.view_model.import_file(&path).await {
                tracing::debug!("Startup import aborted: {}", e);
            }
        }
        self.render_pending()?;

        let mut prompt_due = true;
        while !self.should_quit {
            if prompt_due && self.line_stream.is_interactive() {
                self.view_renderer.render_prompt()?;
            }
            let deadline = self.view_model.next_filter_deadline();

            tokio::select! {
                line = self.line_stream.next_line() => match line? {
                    Some(line) => {
                        tracing::debug!("Received input line: {:?}", line);
                        self.handle_line(&line).await?;
                        prompt_due = true;
                    }
                    None => {
                        tracing::debug!("Input exhausted");
                        self.finish_pending_work().await?;
                        break;
                    }
                },
                Some(response) = self.page_rx.recv() => {
                    self.view_model.apply_page_response(response);
                }
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.settle_filters();
                }
            }

            if self.render_pending()? {
                prompt_due = true;
            }
        }

        tracing::debug!("Controller loop finished");
        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> Result<()> {
        let Some(input) = CommandInput::parse(line) else {
            return Ok(());
        };
        let context = CommandContext::new(ViewModelSnapshot::from_view_model(&self.view_model));

        match self.command_registry.process_input(&input, &context) {
            Ok(events) => {
                tracing::debug!("Command events generated: {:?}", events);
                for event in events {
                    self.apply_command_event(event).await?;
                }
            }
            Err(e) => self.view_renderer.render_error(&e.to_string())?,
        }
        Ok(())
    }

    /// Apply a command event to the view model
    async fn apply_command_event(&mut self, event: CommandEvent) -> Result<()> {
        match event {
            CommandEvent::ReloadRequested => {
                let request = self.view_model.reload_list();
                self.spawn_page_load(request);
            }
            CommandEvent::NextPageRequested => {
                if let Some(request) = self.view_model.next_page() {
                    self.spawn_page_load(request);
                }
            }
            CommandEvent::PreviousPageRequested => {
                if let Some(request) = self.view_model.previous_page() {
                    self.spawn_page_load(request);
                }
            }
            CommandEvent::FilterInputRequested { field, value } => {
                self.view_model.input_filter(field, value, Instant::now());
            }
            CommandEvent::CardToggleRequested { id } => {
                self.view_model.toggle_card(id).await;
            }
            CommandEvent::DeleteRequested { id } => {
                if let Some(request) = self.view_model.delete_movie(id).await {
                    self.spawn_page_load(request);
                }
            }
            CommandEvent::DismissErrorRequested { id } => {
                self.view_model.dismiss_card_error(id);
            }
            CommandEvent::AddMovieRequested { form } => {
                self.view_model.add_movie(&form).await;
            }
            CommandEvent::ImportRequested { path } => {
                if let Err(e) = self.view_model.import_file(&path).await {
                    tracing::debug!("Import aborted: {}", e);
                }
            }
            CommandEvent::HelpRequested => {
                let usage = self.command_registry.help_lines();
                self.view_renderer.render_help(&usage)?;
            }
            CommandEvent::ClearRequested => {
                self.view_renderer.clear()?;
                self.view_renderer.render_list(&self.view_model)?;
            }
            CommandEvent::QuitRequested => {
                self.should_quit = true;
            }
            CommandEvent::NoAction => {}
        }
        Ok(())
    }

    fn settle_filters(&mut self) {
        if let Some(request) = self.view_model.settle_filters(Instant::now()) {
            self.spawn_page_load(request);
        }
    }

    /// Run a page load in the background; the response comes back through the channel
    fn spawn_page_load(&self, request: PageRequest) {
        let Some(page_tx) = self.page_tx.clone() else {
            tracing::debug!("Input finished, dropping page load at offset {}", request.query.offset);
            return;
        };
        let api = self.view_model.api();
        tokio::spawn(async move {
            let response = fetch_page(api, request).await;
            if page_tx.send(response).is_err() {
                tracing::debug!("Controller gone, dropping page response");
            }
        });
    }

    /// Settle pending filters and wait for the latest page load
    ///
    /// The controller's sender is dropped first, so the channel closes once
    /// every spawned load has finished, including loads that panicked.
    async fn finish_pending_work(&mut self) -> Result<()> {
        while let Some(deadline) = self.view_model.next_filter_deadline() {
            tokio::time::sleep_until(deadline).await;
            self.settle_filters();
            self.render_pending()?;
        }
        self.page_tx = None;

        while self.view_model.list().is_loading() {
            match self.page_rx.recv().await {
                Some(response) => {
                    self.view_model.apply_page_response(response);
                }
                None => {
                    tracing::warn!("Page load ended without a response");
                    break;
                }
            }
            self.render_pending()?;
        }
        Ok(())
    }

    /// Render pending view events; true when anything was drawn
    fn render_pending(&mut self) -> Result<bool> {
        let events = self.view_model.collect_pending_view_events();
        let visible = events.iter().any(|event| {
            !matches!(event, crate::repl::events::ViewEvent::StatusBarUpdateRequired)
        });
        if visible {
            self.view_renderer
                .handle_view_events(&events, &self.view_model)?;
        }
        Ok(visible)
    }
}
