//! Main application module.
//!
//! This module contains the `App` struct: the single context object that
//! owns the state store and the analysis backend. It is built once at
//! startup, handed to whatever front end drives it, and flushes the history
//! log when dropped.

use crate::api::{AnalysisBackend, ApiClient};
use crate::config::Config;
use crate::error::Result;
use crate::export::{self, Report};
use crate::state::{Action, HistoryLog, MarketData, SearchTicket, SessionState, Store};
use crate::storage::{HistoryStorage, JsonFileStorage};
use std::path::{Path, PathBuf};

/// The main application.
pub struct App {
    /// Application store.
    store: Store,
    /// Analysis backend.
    backend: Box<dyn AnalysisBackend>,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create an application talking to the configured backend and history file.
    pub fn new(config: Config) -> Result<Self> {
        let backend = ApiClient::new(config.api.clone())?;
        let storage = JsonFileStorage::new(config.history.resolved_path()?);
        tracing::debug!(path = %storage.path().display(), "Using history file");
        Ok(Self::with_parts(config, Box::new(backend), Box::new(storage)))
    }

    /// Create an application from explicit parts.
    pub fn with_parts(
        config: Config,
        backend: Box<dyn AnalysisBackend>,
        storage: Box<dyn HistoryStorage>,
    ) -> Self {
        let history = HistoryLog::with_capacity(storage, config.history.max_entries);
        let store = Store::new(history, config.history.page_size);
        Self {
            store,
            backend,
            config,
        }
    }

    /// Read-only view of all state.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The active search.
    pub fn session(&self) -> &SessionState {
        &self.store.session
    }

    /// Past searches.
    pub fn history(&self) -> &HistoryLog {
        &self.store.history
    }

    /// Configuration the app was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The analysis backend, for callers driving requests themselves.
    pub fn backend(&self) -> &dyn AnalysisBackend {
        self.backend.as_ref()
    }

    /// Apply an action to the store.
    pub fn dispatch(&mut self, action: Action) {
        self.store.reduce(action);
    }

    /// Run one complete search for `input`.
    ///
    /// Blank input is rejected without touching state or the network and
    /// returns `false`. Failures end up in the session error; nothing is
    /// returned to the caller.
    pub async fn submit_search(&mut self, input: &str) -> bool {
        let Some(ticket) = self.begin_search(input) else {
            return false;
        };
        let result = self.backend.analyze(&ticket.sector).await;
        self.finish_search(&ticket, result);
        true
    }

    /// Start a search and return its ticket, or `None` for blank input.
    ///
    /// Searches started this way may overlap. [`App::finish_search`] records
    /// every success in the history but only shows the most recently started
    /// one; a [`App::reset`] in between hides them all.
    pub fn begin_search(&mut self, input: &str) -> Option<SearchTicket> {
        let sector = input.trim();
        if sector.is_empty() {
            tracing::debug!("Ignoring blank search");
            return None;
        }

        let ticket = self.store.issue_ticket(sector);
        tracing::info!(sector = %ticket.sector, seq = ticket.seq, "Searching");
        self.store.reduce(Action::SearchStarted(ticket.clone()));
        Some(ticket)
    }

    /// Apply the outcome of a search started with [`App::begin_search`].
    pub fn finish_search(&mut self, ticket: &SearchTicket, result: Result<MarketData>) {
        let action = match result {
            Ok(data) => {
                tracing::info!(sector = %ticket.sector, "Analysis received");
                Action::SearchSucceeded {
                    ticket: ticket.clone(),
                    data,
                }
            }
            Err(e) => {
                tracing::warn!(sector = %ticket.sector, "Analysis failed: {}", e);
                Action::SearchFailed {
                    seq: ticket.seq,
                    message: e.user_message(),
                }
            }
        };
        self.store.reduce(action);
    }

    /// Return the session to idle. History is kept.
    pub fn reset(&mut self) {
        self.store.reduce(Action::ResetSession);
    }

    /// Report for the result currently shown in the session.
    pub fn current_report(&self) -> Option<Report> {
        let session = &self.store.session;
        session
            .data
            .as_ref()
            .map(|data| Report::new(&session.sector, data))
    }

    /// Report for a history entry.
    pub fn history_report(&self, id: &str) -> Option<Report> {
        self.store
            .history
            .get(id)
            .map(|item| Report::new(&item.sector, &item.data))
    }

    /// Copy a report to the clipboard. Failures are logged, not raised.
    pub fn copy_report(&self, report: &Report) -> bool {
        match export::copy_to_clipboard(&report.markdown) {
            Ok(()) => {
                tracing::info!(sector = %report.sector, "Report copied to clipboard");
                true
            }
            Err(e) => {
                tracing::warn!("Failed to copy report: {}", e);
                false
            }
        }
    }

    /// Save a report as a Markdown file in `dir`, or the configured export
    /// directory. Failures are logged, not raised.
    pub fn save_report(&self, report: &Report, dir: Option<&Path>) -> Option<PathBuf> {
        let dir = dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.export.resolved_dir());
        match export::write_report(&dir, &report.filename, &report.markdown) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Report saved");
                Some(path)
            }
            Err(e) => {
                tracing::warn!("Failed to save report: {}", e);
                None
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if !self.store.history.is_dirty() {
            return;
        }
        if let Err(e) = self.store.history.flush() {
            tracing::warn!("Failed to flush search history on shutdown: {}", e);
        }
    }
}
