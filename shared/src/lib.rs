//! Fitness Coach Shared Library
//!
//! This crate contains the data model, backend wire types, and the plan
//! workspace state machine used by both the native client and the WASM
//! bindings. It performs no I/O.

pub mod errors;
pub mod models;
pub mod notify;
pub mod types;
pub mod validation;
pub mod view;
pub mod workspace;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use notify::{Action, Notification, Severity};
pub use types::*;
pub use workspace::{update, ApiCall, Effect, Event, RequestId, Theme, ViewMode, WorkspaceState};
