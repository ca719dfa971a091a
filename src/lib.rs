//! # market-intel - Market intelligence client
//!
//! Searches a sector against an AI analysis backend, keeps a capped local
//! history of results, and exports reports as Markdown.
//!
//! ## Architecture
//!
//! The application follows a clean architecture pattern:
//!
//! - **App**: Single context object owning the store and the backend
//! - **State**: Centralized state management (session, history log, browser)
//! - **Storage**: Durable history persistence
//! - **API**: Analysis backend integration layer
//! - **Export**: Markdown reports and their sinks
//! - **Config**: Configuration management
//! - **CLI**: Command-line front end

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod state;
pub mod storage;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use state::{HistoryItem, HistoryLog, MarketData, SessionState, Startup, Store};
