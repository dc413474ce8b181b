//! Typed client for the student portal backend.
//!
//! The crate mirrors the portal's screen flow without owning any rendering:
//! fetch actions load typed payloads into per-feature store slices, the
//! navigation guard gates entry on the persisted credential and tears the
//! session down on any unauthorized response, and the quiz controller owns
//! the in-progress answer state for one assignment attempt.

pub mod actions;
pub mod api;
pub mod chapters;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod nav;
pub mod quiz;
pub mod state;
pub mod storage;
pub mod store;
pub mod text;
pub mod theme;

pub use config::PortalConfig;
pub use error::PortalError;
pub use state::PortalState;
