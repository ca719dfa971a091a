//! State of the active search.

use super::MarketData;

/// Lifecycle phase of the active search, derived from [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
        }
    }
}

/// Transient, never persisted state of the current search.
///
/// `is_loading` and `error` are never set together. Starting a search clears
/// the error but keeps `data`, so a failed re-search still shows the previous
/// result until [`SessionState::reset`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Sector of the most recently started search.
    pub sector: String,
    /// Last successful result.
    pub data: Option<MarketData>,
    /// Whether a search is in flight.
    pub is_loading: bool,
    /// Message for the last failed search.
    pub error: Option<String>,
}

impl SessionState {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::Loading
        } else if self.error.is_some() {
            SessionPhase::Failure
        } else if self.data.is_some() {
            SessionPhase::Success
        } else {
            SessionPhase::Idle
        }
    }

    pub(crate) fn start(&mut self, sector: String) {
        self.sector = sector;
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, data: MarketData) {
        self.data = Some(data);
        self.is_loading = false;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.is_loading = false;
    }

    /// Return to the initial idle state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        let mut session = SessionState::new();
        assert_eq!(session.phase(), SessionPhase::Idle);

        session.start("Fintech".to_string());
        assert_eq!(session.phase(), SessionPhase::Loading);

        session.succeed(MarketData::new("S"));
        assert_eq!(session.phase(), SessionPhase::Success);

        session.start("Biotech".to_string());
        assert_eq!(session.phase(), SessionPhase::Loading);
        assert!(session.data.is_some());

        session.fail("boom".to_string());
        assert_eq!(session.phase(), SessionPhase::Failure);
        assert_eq!(session.data, Some(MarketData::new("S")));
        assert_eq!(session.sector, "Biotech");
    }

    #[test]
    fn test_start_clears_error() {
        let mut session = SessionState::new();
        session.fail("boom".to_string());
        session.start("Fintech".to_string());
        assert!(session.is_loading);
        assert!(session.error.is_none());
    }

    #[test]
    fn test_reset() {
        let mut session = SessionState::new();
        session.start("Fintech".to_string());
        session.succeed(MarketData::new("S"));
        session.reset();
        assert_eq!(session, SessionState::default());
    }
}
