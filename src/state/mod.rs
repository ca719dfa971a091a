//! State management for market-intel.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Every change to the
//! session, the history log or the history browser goes through
//! [`Store::reduce`].

mod history_browser;
mod history_log;
mod market_data;
mod session_state;

pub use history_browser::{HistoryBrowser, page, total_pages};
pub use history_log::{HistoryItem, HistoryLog, MAX_HISTORY_ENTRIES};
pub use market_data::{MarketData, Startup};
pub use session_state::{SessionPhase, SessionState};

/// Identifies one submitted search.
///
/// Sequence numbers increase with every submission and every session reset;
/// only the response for the newest one is shown in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub sector: String,
}

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Search lifecycle
    SearchStarted(SearchTicket),
    SearchSucceeded { ticket: SearchTicket, data: MarketData },
    SearchFailed { seq: u64, message: String },
    ResetSession,

    // History
    RemoveHistory(String),
    ClearHistory,

    // History browsing
    SelectHistory(String),
    SetHistoryPage(usize),
    NextHistoryPage,
    PrevHistoryPage,
    SetHistoryPageSize(usize),
}

/// The application state store.
#[derive(Debug)]
pub struct Store {
    /// Active search.
    pub session: SessionState,
    /// Past searches.
    pub history: HistoryLog,
    /// History pagination and selection.
    pub browser: HistoryBrowser,
    /// Highest sequence number handed out so far.
    latest_seq: u64,
}

impl Store {
    /// Create a store around an opened history log.
    pub fn new(history: HistoryLog, page_size: usize) -> Self {
        let mut browser = HistoryBrowser::new(page_size);
        browser.go_to_page(&history, 1);
        Self {
            session: SessionState::new(),
            history,
            browser,
            latest_seq: 0,
        }
    }

    /// Hand out a ticket for a new search.
    pub fn issue_ticket(&mut self, sector: impl Into<String>) -> SearchTicket {
        self.latest_seq += 1;
        SearchTicket {
            seq: self.latest_seq,
            sector: sector.into(),
        }
    }

    /// Check whether a ticket belongs to the most recently started search.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Search lifecycle
            Action::SearchStarted(ticket) => {
                self.latest_seq = self.latest_seq.max(ticket.seq);
                self.session.start(ticket.sector);
            }
            Action::SearchSucceeded { ticket, data } => {
                if self.is_current(ticket.seq) {
                    self.session.succeed(data.clone());
                } else {
                    tracing::debug!(
                        seq = ticket.seq,
                        latest = self.latest_seq,
                        "Stale result goes to history only"
                    );
                }
                self.history.append(ticket.sector, data);
                self.browser.on_appended(&self.history);
            }
            Action::SearchFailed { seq, message } => {
                if !self.is_current(seq) {
                    tracing::debug!(seq, latest = self.latest_seq, "Discarding stale failure");
                    return;
                }
                self.session.fail(message);
            }
            Action::ResetSession => {
                // Searches still in flight must not repopulate the session
                self.latest_seq += 1;
                self.session.reset();
            }

            // History
            Action::RemoveHistory(id) => {
                if self.history.remove(&id) {
                    self.browser.on_removed(&self.history, &id);
                }
            }
            Action::ClearHistory => {
                self.history.clear();
                self.browser.on_cleared();
            }

            // History browsing
            Action::SelectHistory(id) => {
                if self.browser.select(&self.history, &id).is_none() {
                    tracing::debug!(%id, "Ignoring selection of unknown history entry");
                }
            }
            Action::SetHistoryPage(page) => self.browser.go_to_page(&self.history, page),
            Action::NextHistoryPage => self.browser.next_page(&self.history),
            Action::PrevHistoryPage => self.browser.prev_page(&self.history),
            Action::SetHistoryPageSize(size) => self.browser.set_page_size(&self.history, size),
        }
    }

    /// The history entry currently selected in the browser.
    pub fn selected_history(&self) -> Option<&HistoryItem> {
        self.browser.selected(&self.history)
    }
}
