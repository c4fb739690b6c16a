//! contactdeck - a terminal address book
//!
//! This library provides the contact pipeline (search, tag filter, sort and
//! paging), the state machine behind the interactive browser, and the
//! configuration and display helpers the binary is built from.

pub mod cli;
pub mod config;
pub mod core;
pub mod manager;
pub mod ui;
pub mod utils;

// Re-export core types and traits for easier use
pub use core::{
    data::{Contact, ContactCollection, ContactDraft, Relation},
    operations::ContactOperations,
    query::{ContactQuery, PageView, SortField, SortOrder},
    state::{Action, AppState, Effect},
    traits::{ContactDisplay, ContactSource},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main library interface for external usage
pub struct ContactDeck {
    operations: ContactOperations,
}

impl ContactDeck {
    /// Create a new instance over the given configuration
    pub fn new(config: config::Config) -> Self {
        Self {
            operations: ContactOperations::new(config),
        }
    }

    /// Load the configuration from its default location
    pub fn from_default_config() -> utils::error::AppResult<Self> {
        Ok(Self::new(config::Config::load()?))
    }

    /// Get the underlying operations for direct access
    pub fn operations(&self) -> &ContactOperations {
        &self.operations
    }

    /// A fresh browser state over the configured dataset
    pub fn session_state(&self) -> utils::error::AppResult<AppState> {
        let general = &self.operations.config().general;
        Ok(AppState::new(
            self.operations.load_collection()?,
            self.operations.default_query(),
            general.view,
            general.dark_mode,
        ))
    }
}
